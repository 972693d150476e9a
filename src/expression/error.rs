/// Why an expression could not be built or evaluated.
///
/// Every variant is fatal to the expression it was raised for; no partially built tree is
/// ever handed out.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,

    /// A `)` without a matching `(`, or a `(` that is never closed.
    #[error("mismatched parenthesis at token {token}")]
    MismatchedParen {
        token: usize,
    },

    /// An operator or function found fewer operands than its arity.
    #[error("operator '{op}' expects {expected} operand(s), found {found}")]
    MissingOperands {
        op: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed numeric literal '{0}'")]
    MalformedNumber(String),

    /// A token that is neither a number, an operator, a function nor a known name.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// An identifier that is not a declared variable, a declared constant, `pi` or `e`.
    #[error("unresolved identifier '{0}'")]
    UnresolvedIdentifier(String),

    /// Operands left over after the tree was built (e.g. `2 3`).
    #[error("expression leaves {0} values instead of one")]
    DanglingOperands(usize),

    /// A declared name would be read as a function keyword by the tokenizer.
    #[error("name '{name}' contains the function keyword '{keyword}'")]
    ReservedName {
        name: String,
        keyword: String,
    },

    #[error("name '{0}' is declared more than once")]
    DuplicateName(String),

    /// Crossover between expressions that declare different variable or constant names.
    #[error("expressions declare different variable or constant names")]
    ScopeMismatch,

    /// `evaluate` was called before every constant received a value.
    #[error("expression has {expected} constant(s) but {bound} value(s) are bound")]
    UnboundConstants {
        expected: usize,
        bound: usize,
    },

    /// The variable values slice is shorter than the declared variable list.
    #[error("expected {expected} variable value(s), got {got}")]
    VariableArity {
        expected: usize,
        got: usize,
    },
}

/// Result alias for the expression pipeline.
pub type ExprResult<T> = Result<T, ExprError>;
