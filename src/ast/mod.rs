use std::fmt;

mod evaluator;
mod lexer;
mod parser;

pub use evaluator::{Context, Evaluator};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::TreeBuilder;

use crate::functions::{lookup_operator, NO_PRIORITY};

/// Index of a node inside its [`Expression`].
pub type NodeId = usize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Number,
    Variable,
    Operator,
    /// A parenthesized group, including the implicit top-level one.
    Identity,
    Function,
    Constant,
}

impl NodeKind {
    pub fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Number | NodeKind::Variable | NodeKind::Constant)
    }

    /// Identity and Function nodes delimit a parenthesized scope.
    pub fn is_group(self) -> bool {
        matches!(self, NodeKind::Identity | NodeKind::Function)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionNode {
    pub kind: NodeKind,
    /// Numeral, name or operator token. Empty for Identity nodes.
    pub value: String,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) unary: bool,
    pub(crate) priority: i32,
    pub(crate) opened: bool,
}

impl ExpressionNode {
    pub(crate) fn new(kind: NodeKind, value: &str, parent: Option<NodeId>) -> Self {
        let priority = match kind {
            NodeKind::Operator => lookup_operator(value).map_or(NO_PRIORITY, |op| op.right_prior),
            _ => NO_PRIORITY,
        };
        Self {
            kind,
            value: value.to_string(),
            left: None,
            right: None,
            parent,
            unary: kind.is_group(),
            priority,
            opened: false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    pub fn has_children(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// A parsed expression: an arena of nodes rooted at an Identity node.
///
/// Trees are only handed out once the builder has validated them, and are never
/// mutated afterwards, so the same `Expression` can be evaluated any number of
/// times, from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: NodeId,
}

impl Expression {
    pub(crate) fn from_parts(nodes: Vec<ExpressionNode>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node at `id`, or `None` if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> Option<&ExpressionNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ExpressionNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Distinct variable names in order of first appearance in the source.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        self.collect_variables(self.root, &mut names);
        names
    }

    fn collect_variables<'a>(&'a self, id: NodeId, names: &mut Vec<&'a str>) {
        let node = &self.nodes[id];
        if let Some(left) = node.left {
            self.collect_variables(left, names);
        }
        if node.kind == NodeKind::Variable && !names.contains(&node.value.as_str()) {
            names.push(&node.value);
        }
        if let Some(right) = node.right {
            self.collect_variables(right, names);
        }
    }

    fn fmt_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[id];
        match node.kind {
            NodeKind::Number | NodeKind::Variable | NodeKind::Constant => {
                write!(f, "{}", node.value)
            }
            NodeKind::Identity => match node.right {
                Some(child) => self.fmt_node(child, f),
                None => Ok(()),
            },
            NodeKind::Function => {
                write!(f, "{}", node.value)?;
                match node.right {
                    // operators already render their own parentheses
                    Some(child) if self.nodes[child].kind == NodeKind::Operator => {
                        self.fmt_node(child, f)
                    }
                    Some(child) => {
                        write!(f, "(")?;
                        self.fmt_node(child, f)?;
                        write!(f, ")")
                    }
                    None => write!(f, "()"),
                }
            }
            NodeKind::Operator => {
                write!(f, "(")?;
                if let Some(left) = node.left {
                    self.fmt_node(left, f)?;
                    write!(f, " {} ", node.value)?;
                } else {
                    write!(f, "{}", node.value)?;
                }
                if let Some(right) = node.right {
                    self.fmt_node(right, f)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Renders the fully parenthesized form, e.g. `2^3^2` as `(2 ^ (3 ^ 2))`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(self.root, f)
    }
}

impl std::str::FromStr for Expression {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}
