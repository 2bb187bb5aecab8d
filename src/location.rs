use std::fmt;

/// Position of a token or node inside the source buffer.
///
/// `line` and `column` are zero-based; [Display](fmt::Display) renders them one-based.
/// Locations synthesized during recovery carry `valid == false`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    pub valid: bool,
}

impl SourceLocation {
    pub const UNKNOWN: Self = Self {
        line: 0,
        column: 0,
        valid: false,
    };

    pub const fn new(line: u32, column: u32) -> Self {
        Self {
            line,
            column,
            valid: true,
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.valid {
            write!(f, "{}:{}", self.line + 1, self.column + 1)
        } else {
            write!(f, "?:?")
        }
    }
}
