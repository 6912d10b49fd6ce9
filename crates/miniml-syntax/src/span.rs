//! Source locations for AST nodes.
//!
//! The parser tags every node with the file, line and column where it
//! starts. Locations are only used to point diagnostics at source text.
//!
//! # Examples
//!
//! ```
//! use miniml_syntax::span::SrcLoc;
//!
//! let loc = SrcLoc::new("main.ml", 3, 14);
//! assert_eq!(loc.to_string(), "main.ml:3:14");
//!
//! let anon = SrcLoc::new("", 1, 1);
//! assert_eq!(anon.to_string(), "<unknown>:1:1");
//! ```

use std::fmt;
use std::sync::Arc;

/// A position in a source file.
///
/// `line` and `col` are 1-based. The file name is shared so that cloning a
/// location (which happens for every node the parser builds) is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SrcLoc {
    /// File name, empty when the source did not come from a file
    pub file: Arc<str>,

    /// Line number (1-based)
    pub line: u32,

    /// Column number (1-based)
    pub col: u32,
}

impl SrcLoc {
    /// Creates a location.
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, line: u32, col: u32) -> Self {
        Self {
            file: file.into(),
            line,
            col,
        }
    }

    /// A location with no file name, for synthesized nodes and tests.
    #[must_use]
    pub fn unknown(line: u32, col: u32) -> Self {
        Self::new("", line, col)
    }

    /// Same file, different position.
    #[must_use]
    pub fn at(&self, line: u32, col: u32) -> Self {
        Self {
            file: Arc::clone(&self.file),
            line,
            col,
        }
    }

    /// Returns true when no file name is attached.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.file.is_empty()
    }
}

impl Default for SrcLoc {
    fn default() -> Self {
        Self::unknown(1, 1)
    }
}

impl fmt::Display for SrcLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "<unknown>:{}:{}", self.line, self.col)
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.col)
        }
    }
}

/// Anything that knows where it came from in the source.
pub trait Spanned {
    /// Location of the node.
    fn loc(&self) -> &SrcLoc;
}

impl Spanned for SrcLoc {
    fn loc(&self) -> &SrcLoc {
        self
    }
}
