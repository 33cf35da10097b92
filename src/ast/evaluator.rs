use crate::ast::{tokenize, Expression, NodeId, NodeKind, TreeBuilder};
use crate::error::{EvalError, Result};
use crate::functions::{lookup_constant, lookup_function, lookup_operator};
use log::debug;
use lru::LruCache;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Variable bindings an expression is evaluated against.
///
/// Lookups are case-sensitive. `None` means the variable is unbound, which
/// fails evaluation of any expression that references it.
pub trait Context {
    fn get_variable(&self, name: &str) -> Option<f64>;
}

impl<S: BuildHasher> Context for HashMap<String, f64, S> {
    fn get_variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> Context for HashMap<&str, f64, S> {
    fn get_variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// A `None` value is a binding that is present but null.
impl<S: BuildHasher> Context for HashMap<String, Option<f64>, S> {
    fn get_variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied().flatten()
    }
}

impl Context for BTreeMap<String, f64> {
    fn get_variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<C: Context + ?Sized> Context for &C {
    fn get_variable(&self, name: &str) -> Option<f64> {
        (**self).get_variable(name)
    }
}

impl Expression {
    /// Evaluates the tree against `context`.
    ///
    /// A NaN result is an error: domain errors such as `sqrt(-1)` or `0/0`
    /// surface as NaN from the float operations and are reported here.
    pub fn evaluate<C: Context + ?Sized>(&self, context: &C) -> std::result::Result<f64, EvalError> {
        let value = self.evaluate_node(self.root(), context)?;
        if value.is_nan() {
            return Err(EvalError::NotANumber);
        }
        Ok(value)
    }

    /// Evaluates the tree once per context, in parallel. Results keep the
    /// order of `contexts`.
    pub fn evaluate_batch<C: Context + Sync>(
        &self,
        contexts: &[C],
    ) -> Vec<std::result::Result<f64, EvalError>> {
        contexts
            .par_iter()
            .map(|context| self.evaluate(context))
            .collect()
    }

    fn evaluate_node<C: Context + ?Sized>(
        &self,
        id: NodeId,
        context: &C,
    ) -> std::result::Result<f64, EvalError> {
        let node = &self.nodes[id];
        match node.kind {
            NodeKind::Number => node
                .value
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidNumber {
                    literal: node.value.clone(),
                }),

            NodeKind::Constant => lookup_constant(&node.value)
                .map(|c| c.value)
                .ok_or_else(|| EvalError::UndefinedConstant {
                    name: node.value.clone(),
                }),

            NodeKind::Variable => {
                context
                    .get_variable(&node.value)
                    .ok_or_else(|| EvalError::UndefinedVariable {
                        name: node.value.clone(),
                    })
            }

            NodeKind::Identity => {
                let child = self.operand(id)?;
                self.evaluate_node(child, context)
            }

            NodeKind::Operator => {
                let op = lookup_operator(&node.value).ok_or_else(|| {
                    EvalError::UndefinedOperator {
                        token: node.value.clone(),
                    }
                })?;
                let left = match node.left {
                    Some(left) => Some(self.evaluate_node(left, context)?),
                    None => None,
                };
                let right = self.evaluate_node(self.operand(id)?, context)?;
                op.apply(left, right).ok_or_else(|| EvalError::MissingOperand {
                    node: node.value.clone(),
                })
            }

            NodeKind::Function => {
                let function = lookup_function(&node.value).ok_or_else(|| {
                    EvalError::UndefinedFunction {
                        name: node.value.clone(),
                    }
                })?;
                let argument = self.evaluate_node(self.operand(id)?, context)?;
                Ok(function.apply(argument))
            }
        }
    }

    fn operand(&self, id: NodeId) -> std::result::Result<NodeId, EvalError> {
        let node = &self.nodes[id];
        node.right.ok_or_else(|| EvalError::MissingOperand {
            node: if node.kind == NodeKind::Identity {
                "()".to_string()
            } else {
                node.value.clone()
            },
        })
    }
}

/// Parses and evaluates expressions, remembering recently parsed trees.
///
/// Hosts that evaluate the same formula text repeatedly (spreadsheet cells,
/// per-row rules) skip tokenizing and building on every call after the first.
pub struct Evaluator {
    cache: Option<LruCache<String, Arc<Expression>>>,
}

impl Evaluator {
    /// Creates a new `Evaluator` keeping at most `max_cache_size` parsed
    /// expressions. A size of zero disables caching.
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(max_cache_size).map(LruCache::new),
        }
    }

    /// Parse an expression string into a tree, reusing a cached tree for
    /// identical text.
    pub fn parse_expression(&mut self, expression: &str) -> Result<Arc<Expression>> {
        if let Some(cached) = self.cache.as_mut().and_then(|cache| cache.get(expression)) {
            debug!("Cache hit for expression: {}", expression);
            return Ok(Arc::clone(cached));
        }

        let tokens = tokenize(expression)?;
        let tree = Arc::new(TreeBuilder::build(&tokens)?);
        if let Some(cache) = self.cache.as_mut() {
            cache.put(expression.to_string(), Arc::clone(&tree));
        }
        Ok(tree)
    }

    /// Evaluates a given expression string against a provided context.
    ///
    /// # Arguments
    ///
    /// * `expression` - The expression source text.
    /// * `context` - Variable bindings for the expression.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if parsing and evaluation succeed.
    /// * `Err(Error)` naming the stage that failed otherwise.
    pub fn evaluate_expression<C: Context + ?Sized>(
        &mut self,
        expression: &str,
        context: &C,
    ) -> Result<f64> {
        let tree = self.parse_expression(expression)?;
        Ok(tree.evaluate(context)?)
    }

    /// Parses `expression` once and evaluates it against every context.
    pub fn evaluate_batch<C: Context + Sync>(
        &mut self,
        expression: &str,
        contexts: &[C],
    ) -> Result<Vec<std::result::Result<f64, EvalError>>> {
        let tree = self.parse_expression(expression)?;
        debug!(
            "Evaluating {} against {} contexts",
            expression,
            contexts.len()
        );
        Ok(tree.evaluate_batch(contexts))
    }

    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(100)
    }
}
