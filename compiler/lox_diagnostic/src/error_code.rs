//! Error codes for all interpreter diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that produced it.

use std::fmt;

/// Error codes for all interpreter diagnostics.
///
/// Format: E#### where the first digit indicates phase:
/// - E0xxx: Scanner errors
/// - E1xxx: Parser errors
/// - E2xxx: Resolver errors
/// - E6xxx: Runtime errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Scanner Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character in source
    E0002,
    /// Unterminated block comment
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token (a `consume` failed)
    E1001,
    /// Expected expression
    E1002,
    /// Invalid assignment target
    E1003,
    /// Too many call arguments or parameters
    E1004,

    // Resolver Errors (E2xxx)
    /// Variable read in its own initializer
    E2001,
    /// Variable redeclared in the same local scope
    E2002,
    /// Return outside any function
    E2003,
    /// Return with a value inside an initializer
    E2004,
    /// `this` outside a class
    E2005,
    /// `super` outside a class
    E2006,
    /// `super` in a class with no superclass
    E2007,
    /// Class inherits from itself
    E2008,

    // Runtime Errors (E6xxx)
    /// Division by zero
    E6001,
    /// Unary operand must be a number
    E6010,
    /// Binary operands must be numbers
    E6011,
    /// `+` operands must be two numbers or two strings
    E6012,
    /// Undefined variable
    E6020,
    /// Undefined property
    E6021,
    /// Property access on a non-instance
    E6022,
    /// Field assignment on a non-instance
    E6023,
    /// Wrong number of call arguments
    E6030,
    /// Callee is not callable
    E6032,
    /// Superclass expression did not evaluate to a class
    E6033,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    ///
    /// Kept in sync with `as_str()` which is exhaustive (Rust match enforces it).
    /// When adding a new variant: add it to the enum, `as_str()`, and here.
    /// The `all_variants_classified` test catches any omission.
    pub const ALL: &[ErrorCode] = &[
        // Scanner
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        // Resolver
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        // Runtime
        ErrorCode::E6001,
        ErrorCode::E6010,
        ErrorCode::E6011,
        ErrorCode::E6012,
        ErrorCode::E6020,
        ErrorCode::E6021,
        ErrorCode::E6022,
        ErrorCode::E6023,
        ErrorCode::E6030,
        ErrorCode::E6032,
        ErrorCode::E6033,
    ];

    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Scanner
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            // Resolver
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            // Runtime
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6020 => "E6020",
            ErrorCode::E6021 => "E6021",
            ErrorCode::E6022 => "E6022",
            ErrorCode::E6023 => "E6023",
            ErrorCode::E6030 => "E6030",
            ErrorCode::E6032 => "E6032",
            ErrorCode::E6033 => "E6033",
        }
    }

    /// Check if this is a scanner error (E0xxx range).
    pub fn is_scan_error(&self) -> bool {
        matches!(self, ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003)
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }

    /// Check if this is a resolver error (E2xxx range).
    pub fn is_resolve_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E2001
                | ErrorCode::E2002
                | ErrorCode::E2003
                | ErrorCode::E2004
                | ErrorCode::E2005
                | ErrorCode::E2006
                | ErrorCode::E2007
                | ErrorCode::E2008
        )
    }

    /// Check if this is a runtime error (E6xxx range).
    pub fn is_runtime_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E6001
                | ErrorCode::E6010
                | ErrorCode::E6011
                | ErrorCode::E6012
                | ErrorCode::E6020
                | ErrorCode::E6021
                | ErrorCode::E6022
                | ErrorCode::E6023
                | ErrorCode::E6030
                | ErrorCode::E6032
                | ErrorCode::E6033
        )
    }

    /// Check if this is a static error (reported before execution starts).
    pub fn is_static_error(&self) -> bool {
        !self.is_runtime_error()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_variants_classified() {
        for code in ErrorCode::ALL {
            let classifications = [
                code.is_scan_error(),
                code.is_parse_error(),
                code.is_resolve_error(),
                code.is_runtime_error(),
            ];
            let count = classifications.iter().filter(|c| **c).count();
            assert_eq!(count, 1, "{code} must belong to exactly one phase");
        }
    }

    #[test]
    fn as_str_matches_variant_name() {
        for code in ErrorCode::ALL {
            assert_eq!(format!("{code:?}"), code.as_str());
        }
    }

    #[test]
    fn static_is_complement_of_runtime() {
        for code in ErrorCode::ALL {
            assert_ne!(code.is_static_error(), code.is_runtime_error());
        }
    }
}
