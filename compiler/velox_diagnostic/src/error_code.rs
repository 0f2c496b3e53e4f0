use std::fmt;

/// Error codes for all Velox diagnostics.
///
/// Format: E#### where the first digit names the phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Run-time errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Invalid escape sequence
    E0004,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Expected identifier
    E1004,
    /// Assignment target is not a location
    E1005,
    /// Ambiguous function name within one definition
    E1006,
    /// Duplicate parameter name
    E1007,
    /// `break`/`continue` outside a loop
    E1008,
    /// Included source could not be loaded
    E1009,
    /// Recursive include
    E1010,
    /// Non-function member in a class body
    E1011,

    // Run-time Errors (E2xxx)
    /// Unknown identifier
    E2001,
    /// Unknown field
    E2002,
    /// Unsupported operation between types
    E2003,
    /// Function call with too many parameters
    E2004,
    /// List index out of range
    E2005,
    /// Division or modulo by zero
    E2006,
    /// Value is not callable
    E2007,
    /// Unknown class in `new`
    E2008,
    /// Integer overflow
    E2009,
    /// Maximum recursion depth exceeded
    E2010,
    /// Value cannot be converted to the requested kind
    E2011,
    /// Assignment to a read-only member
    E2012,
    /// `this` outside a method or realization
    E2013,
    /// Realization target is not an object
    E2014,
    /// Error raised by a native function
    E2015,

    // Internal Errors (E9xxx)
    /// Internal engine error
    E9001,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            // Run-time
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::E2012 => "E2012",
            ErrorCode::E2013 => "E2013",
            ErrorCode::E2014 => "E2014",
            ErrorCode::E2015 => "E2015",
            // Internal
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Lexer error (E0xxx range), surfaced through the parser.
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Parser/syntax error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    /// Run-time error (E2xxx range).
    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
