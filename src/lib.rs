//! Arithmetic expressions: parse once, evaluate against many variable bindings.
//!
//! ```
//! use std::collections::HashMap;
//!
//! let expression = yanbee::parse("2 * x ^ 2 + sin(PI / 2)").unwrap();
//! let context = HashMap::from([("x", 3.0)]);
//! assert_eq!(yanbee::evaluate(&expression, &context).unwrap(), 19.0);
//! ```

pub mod ast;
pub mod error;
pub mod functions;

pub use ast::{Context, Evaluator, Expression};
pub use error::{Error, EvalError, LexError, ParseError, Result};

use ast::{tokenize, TreeBuilder};

/// Tokenizes and builds the tree for `expression`.
pub fn parse(expression: &str) -> Result<Expression> {
    let tokens = tokenize(expression)?;
    Ok(TreeBuilder::build(&tokens)?)
}

/// Evaluates a parsed expression against `context`.
pub fn evaluate<C: Context + ?Sized>(
    expression: &Expression,
    context: &C,
) -> std::result::Result<f64, EvalError> {
    expression.evaluate(context)
}

/// One-shot parse and evaluate.
pub fn evaluate_expression<C: Context + ?Sized>(expression: &str, context: &C) -> Result<f64> {
    let ast = parse(expression)?;
    Ok(ast.evaluate(context)?)
}
