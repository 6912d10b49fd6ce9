//! Property tests for the type engine.
//!
//! Each property is checked over a fixed corpus of small types built from a
//! handful of variables, so failures are reproducible without a fuzzer.

use miniml_syntax::SrcLoc;
use miniml_typecheck::context::generalize;
use miniml_typecheck::infer::unify;
use miniml_typecheck::{Scheme, Subst, Ty, TypeEnv, TypeErrorKind};

/// Every type up to depth 2 over `Int`, `Bool`, `a0`, `a1`, `a2`.
fn corpus() -> Vec<Ty> {
    let leaves = vec![Ty::Int, Ty::Bool, Ty::Var(0), Ty::Var(1), Ty::Var(2)];
    let mut types = leaves.clone();
    for a in &leaves {
        for b in &leaves {
            types.push(Ty::fun(a.clone(), b.clone()));
            types.push(Ty::tuple([a.clone(), b.clone()]));
        }
    }
    types.push(Ty::tuple([Ty::Var(0), Ty::Var(1), Ty::Var(2)]));
    types.push(Ty::fun(Ty::fun(Ty::Var(0), Ty::Var(1)), Ty::Var(2)));
    types
}

fn loc() -> SrcLoc {
    SrcLoc::unknown(1, 1)
}

// ============================================================================
// Unification
// ============================================================================

#[test]
fn test_unification_soundness() {
    let types = corpus();
    let mut successes = 0;

    for t1 in &types {
        for t2 in &types {
            if let Ok(s) = unify(t1, t2, &loc()) {
                assert_eq!(s.apply(t1), s.apply(t2), "unify({t1}, {t2}) gave {s}");
                successes += 1;
            }
        }
    }
    assert!(successes > types.len());
}

#[test]
fn test_unification_is_symmetric_in_outcome() {
    let types = corpus();
    for t1 in &types {
        for t2 in &types {
            let forward = unify(t1, t2, &loc()).map_err(|e| e.kind());
            let backward = unify(t2, t1, &loc()).map_err(|e| e.kind());
            assert_eq!(forward.is_ok(), backward.is_ok(), "{t1} ~ {t2}");
        }
    }
}

#[test]
fn test_substitution_idempotence() {
    let types = corpus();
    for t1 in &types {
        for t2 in &types {
            let Ok(s) = unify(t1, t2, &loc()) else {
                continue;
            };
            for ty in &types {
                let once = s.apply(ty);
                assert_eq!(s.apply(&once), once, "{s} on {ty}");
            }
        }
    }
}

#[test]
fn test_occurs_check() {
    let err = unify(&Ty::Var(0), &Ty::fun(Ty::Var(0), Ty::Int), &loc()).unwrap_err();
    assert_eq!(err.kind(), TypeErrorKind::OccursCheck);

    let err = unify(&Ty::tuple([Ty::Var(1), Ty::Int]), &Ty::Var(1), &loc()).unwrap_err();
    assert_eq!(err.kind(), TypeErrorKind::OccursCheck);
}

#[test]
fn test_unify_with_self_is_empty() {
    for ty in corpus() {
        assert!(unify(&ty, &ty, &loc()).unwrap().is_empty(), "{ty}");
    }
}

// ============================================================================
// Substitution
// ============================================================================

#[test]
fn test_compose_law() {
    let types = corpus();
    let substs: Vec<Subst> = vec![
        Subst::single(0, Ty::Int),
        Subst::single(0, Ty::Var(1)),
        Subst::single(1, Ty::fun(Ty::Var(2), Ty::Bool)),
        Subst::single(2, Ty::tuple([Ty::Int, Ty::Var(0)])),
        Subst::single(1, Ty::Var(0)),
    ];

    for first in &substs {
        for later in &substs {
            // inference never composes a later substitution that maps back
            // into variables the earlier one already solved
            if later.iter().any(|(_, ty)| ty.free_vars().iter().any(|v| first.lookup(*v).is_some())) {
                continue;
            }
            let composed = first.compose(later);
            for ty in &types {
                assert_eq!(
                    composed.apply(ty),
                    later.apply(&first.apply(ty)),
                    "{first} then {later} on {ty}"
                );
            }
        }
    }
}

// ============================================================================
// Generalization
// ============================================================================

#[test]
fn test_generalization_boundary() {
    let ty = Ty::fun(Ty::Var(7), Ty::Var(7));

    let closed = TypeEnv::new().with("x", Scheme::mono(Ty::Int));
    assert_eq!(generalize(&closed, &ty).vars, vec![7]);

    let open = closed.extend("z", Scheme::mono(Ty::Var(7)));
    assert!(generalize(&open, &ty).vars.is_empty());
}

#[test]
fn test_generalize_quantifies_exactly_ftv_minus_env() {
    let env = TypeEnv::new().with("y", Scheme::mono(Ty::tuple([Ty::Var(1), Ty::Int])));
    for ty in corpus() {
        let scheme = generalize(&env, &ty);
        let expected: Vec<u32> = ty.free_vars().into_iter().filter(|&v| v != 1).collect();
        assert_eq!(scheme.vars, expected, "{ty}");
        assert_eq!(scheme.ty, ty);
    }
}
