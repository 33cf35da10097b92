use thiserror::Error;

/// Tokenization failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// No token rule matches at the head of `remainder`.
    #[error("Tokenization failed, invalid sequence: {remainder}")]
    InvalidSequence { remainder: String },
}

/// Structurally invalid token sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token: {token}")]
    UnexpectedToken { token: String },

    /// A function name was not followed by its opening parenthesis.
    #[error("Expected '(' after {function}, found {found}")]
    ExpectedOpenParen { function: String, found: String },

    #[error("Operator {operator} can't be unary")]
    NotUnary { operator: String },

    #[error("Invalid parentheses balance")]
    UnbalancedParentheses,

    #[error("Operator {operator} is missing its operand")]
    MissingOperand { operator: String },

    /// Empty input, or a group with nothing inside it.
    #[error("Empty expression")]
    EmptyExpression,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Undefined variable: {name}")]
    UndefinedVariable { name: String },

    #[error("Undefined constant: {name}")]
    UndefinedConstant { name: String },

    #[error("Undefined operator: {token}")]
    UndefinedOperator { token: String },

    #[error("Undefined function: {name}")]
    UndefinedFunction { name: String },

    #[error("Invalid number literal: {literal}")]
    InvalidNumber { literal: String },

    #[error("Missing operand for {node}")]
    MissingOperand { node: String },

    /// The final result was NaN, e.g. `sqrt(-1)` or `0/0`.
    #[error("Error while evaluating: result is not a number")]
    NotANumber,
}

/// Any failure of a parse-then-evaluate round.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, Error>;
