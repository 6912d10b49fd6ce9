//! Expression inference.
//!
//! Every case returns the substitution it discovered together with the
//! expression's type. Callers compose that substitution into their own before
//! inferring the next child, so bindings learned in one subexpression are
//! visible to its siblings.

use crate::context::{Scheme, Subst, TypeEnv};
use crate::error::{Result, TypeError};
use crate::infer::context::Context;
use crate::infer::unify::unify;
use crate::types::Ty;
use miniml_log::debug;
use miniml_syntax::{BinOp, BinOpClass, Expr, ExprKind, Name, Spanned, UnOp};

/// Infer the type of `expr` under `env`.
///
/// Returns the substitution discovered along the way and the expression's
/// type. The type is already resolved through the substitution.
///
/// # Errors
///
/// Returns the first [`TypeError`] met in a left-to-right walk.
pub fn infer_expr(ctx: &mut Context<'_>, expr: &Expr, env: &TypeEnv) -> Result<(Subst, Ty)> {
    ctx.enter(expr.loc())?;
    let result = infer_kind(ctx, expr, env);
    ctx.exit();
    result
}

// Each form lives in its own function so the frame that stays on the stack
// while a child is inferred holds only that form's locals.
fn infer_kind(ctx: &mut Context<'_>, expr: &Expr, env: &TypeEnv) -> Result<(Subst, Ty)> {
    match &expr.kind {
        ExprKind::Var(name) => infer_var(ctx, name, expr, env),
        ExprKind::LitInt(_) => Ok((Subst::empty(), Ty::Int)),
        ExprKind::LitBool(_) => Ok((Subst::empty(), Ty::Bool)),
        ExprKind::LitTuple(elements) => infer_tuple(ctx, elements, env),
        ExprKind::Lam { param, body } => infer_lam(ctx, param, body, env),
        ExprKind::App { func, arg } => infer_app(ctx, func, arg, expr, env),
        ExprKind::Let { name, rhs, body } => infer_let(ctx, name, rhs, body, env),
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => infer_if(ctx, cond, then_branch, else_branch, env),
        ExprKind::UnOp {
            op: UnOp::Not,
            operand,
        } => infer_not(ctx, operand, env),
        ExprKind::BinOp { op, lhs, rhs } => infer_binop(ctx, *op, lhs, rhs, env),
    }
}

fn infer_var(ctx: &Context<'_>, name: &Name, expr: &Expr, env: &TypeEnv) -> Result<(Subst, Ty)> {
    match env.lookup(name) {
        Some(scheme) => Ok((Subst::empty(), scheme.instantiate(ctx.supply))),
        None => Err(TypeError::UnboundVariable {
            name: name.clone(),
            loc: expr.loc().clone(),
        }),
    }
}

/// The parameter gets a fresh monomorphic type.
fn infer_lam(
    ctx: &mut Context<'_>,
    param: &Name,
    body: &Expr,
    env: &TypeEnv,
) -> Result<(Subst, Ty)> {
    let param_ty = ctx.fresh_var();
    let body_env = env.extend(param.clone(), Scheme::mono(param_ty.clone()));
    let (s, body_ty) = infer_expr(ctx, body, &body_env)?;
    let ty = Ty::fun(s.apply(&param_ty), body_ty);
    Ok((s, ty))
}

fn infer_app(
    ctx: &mut Context<'_>,
    func: &Expr,
    arg: &Expr,
    expr: &Expr,
    env: &TypeEnv,
) -> Result<(Subst, Ty)> {
    let (s1, func_ty) = infer_expr(ctx, func, env)?;
    let (s2, arg_ty) = infer_expr(ctx, arg, &s1.apply_env(env))?;
    let result_ty = ctx.fresh_var();

    let s3 = unify(
        &Ty::fun(arg_ty, result_ty.clone()),
        &s2.apply(&func_ty),
        expr.loc(),
    )?;

    let s = s1.compose(&s2).compose(&s3);
    let ty = s.apply(&result_ty);
    Ok((s, ty))
}

fn infer_if(
    ctx: &mut Context<'_>,
    cond: &Expr,
    then_branch: &Expr,
    else_branch: &Expr,
    env: &TypeEnv,
) -> Result<(Subst, Ty)> {
    let (s1, cond_ty) = infer_expr(ctx, cond, env)?;
    let s2 = unify(&Ty::Bool, &cond_ty, cond.loc())?;
    let mut s = s1.compose(&s2);

    let (s3, then_ty) = infer_expr(ctx, then_branch, &s.apply_env(env))?;
    s = s.compose(&s3);

    let (s4, else_ty) = infer_expr(ctx, else_branch, &s.apply_env(env))?;
    s = s.compose(&s4);

    let s5 = unify(&s.apply(&then_ty), &s.apply(&else_ty), else_branch.loc())?;
    s = s.compose(&s5);

    let ty = s.apply(&then_ty);
    Ok((s, ty))
}

fn infer_not(ctx: &mut Context<'_>, operand: &Expr, env: &TypeEnv) -> Result<(Subst, Ty)> {
    let (s1, ty) = infer_expr(ctx, operand, env)?;
    let s2 = unify(&Ty::Bool, &ty, operand.loc())?;
    Ok((s1.compose(&s2), Ty::Bool))
}

/// Elements left to right, each under the environment updated by the ones
/// before it.
fn infer_tuple(ctx: &mut Context<'_>, elements: &[Expr], env: &TypeEnv) -> Result<(Subst, Ty)> {
    let mut s = Subst::empty();
    let mut types = Vec::with_capacity(elements.len());

    for element in elements {
        let (si, ty) = infer_expr(ctx, element, &s.apply_env(env))?;
        s = s.compose(&si);
        types.push(ty);
    }

    let ty = Ty::tuple(types.iter().map(|ty| s.apply(ty)));
    Ok((s, ty))
}

fn infer_let(
    ctx: &mut Context<'_>,
    name: &Name,
    rhs: &Expr,
    body: &Expr,
    env: &TypeEnv,
) -> Result<(Subst, Ty)> {
    let (s1, rhs_ty) = infer_expr(ctx, rhs, env)?;
    let rhs_env = s1.apply_env(env);

    let scheme = if ctx.config.let_polymorphism {
        rhs_env.generalize(&rhs_ty)
    } else {
        Scheme::mono(rhs_ty)
    };
    debug!("let {name} : {scheme}");

    let body_env = rhs_env.extend(name.clone(), scheme);
    let (s2, body_ty) = infer_expr(ctx, body, &body_env)?;
    Ok((s1.compose(&s2), body_ty))
}

fn infer_binop(
    ctx: &mut Context<'_>,
    op: BinOp,
    lhs: &Expr,
    rhs: &Expr,
    env: &TypeEnv,
) -> Result<(Subst, Ty)> {
    let (s1, lhs_ty) = infer_expr(ctx, lhs, env)?;
    let (s2, rhs_ty) = infer_expr(ctx, rhs, &s1.apply_env(env))?;
    constrain_operands(op, s1.compose(&s2), &lhs_ty, &rhs_ty, lhs, rhs)
}

/// Unifies the operand types against what `op` accepts.
fn constrain_operands(
    op: BinOp,
    mut s: Subst,
    lhs_ty: &Ty,
    rhs_ty: &Ty,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<(Subst, Ty)> {
    let (operand_ty, result_ty) = match op.class() {
        BinOpClass::Arithmetic => (Ty::Int, Ty::Int),
        BinOpClass::Ordering => (Ty::Int, Ty::Bool),
        BinOpClass::Logical => (Ty::Bool, Ty::Bool),
        BinOpClass::Equality => {
            // operands must agree with each other, at any type
            let s3 = unify(&s.apply(lhs_ty), &s.apply(rhs_ty), rhs.loc())?;
            return Ok((s.compose(&s3), Ty::Bool));
        }
    };

    let s3 = unify(&operand_ty, &s.apply(lhs_ty), lhs.loc())?;
    s = s.compose(&s3);
    let s4 = unify(&operand_ty, &s.apply(rhs_ty), rhs.loc())?;
    s = s.compose(&s4);

    Ok((s, result_ty))
}
