use crate::ast::{Expression, ExpressionNode, NodeId, NodeKind, Token, TokenKind};
use crate::error::ParseError;
use crate::functions::{lookup_constant, lookup_function, lookup_operator};
use log::{debug, trace};

/// Builds an expression tree from tokens in a single pass.
///
/// There is no operator stack. The builder keeps one cursor into the tree and,
/// for every token, either descends into a freshly created child or, for a
/// binary operator, climbs through parent links while the ancestor binds at
/// least as tightly and splices the operator in above the climbed-to node.
pub struct TreeBuilder {
    nodes: Vec<ExpressionNode>,
    root: NodeId,
    cursor: NodeId,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: vec![ExpressionNode::new(NodeKind::Identity, "", None)],
            root: 0,
            cursor: 0,
        }
    }

    /// Consumes `tokens` and returns the validated tree.
    pub fn build(tokens: &[Token<'_>]) -> Result<Expression, ParseError> {
        let mut builder = Self::new();
        for token in tokens {
            builder.push(token)?;
        }
        builder.finish()
    }

    /// Feeds one token into the tree.
    pub fn push(&mut self, token: &Token<'_>) -> Result<(), ParseError> {
        trace!("Cursor at {:?}, token {:?}", self.nodes[self.cursor], token);

        let cursor = &self.nodes[self.cursor];
        if cursor.kind == NodeKind::Function && !cursor.opened && token.text != "(" {
            return Err(ParseError::ExpectedOpenParen {
                function: cursor.value.clone(),
                found: token.text.to_string(),
            });
        }

        match token.kind {
            TokenKind::Operator => self.push_operator(token.text),
            TokenKind::Parenthesis if token.text == "(" => self.open_group(),
            TokenKind::Parenthesis if token.text == ")" => self.close_group(),
            TokenKind::Parenthesis => Err(unexpected(token.text)),
            TokenKind::Name => {
                let kind = if lookup_constant(token.text).is_some() {
                    NodeKind::Constant
                } else if lookup_function(token.text).is_some() {
                    NodeKind::Function
                } else {
                    NodeKind::Variable
                };
                self.place(kind, token.text)
            }
            TokenKind::Number => self.place(NodeKind::Number, token.text),
        }
    }

    /// Checks that every group is closed and every operator has its operand.
    pub fn finish(self) -> Result<Expression, ParseError> {
        if self.nodes[self.root].right.is_none() {
            return Err(ParseError::EmptyExpression);
        }

        let group = self
            .enclosing_group(self.cursor)
            .ok_or(ParseError::UnbalancedParentheses)?;
        if self.nodes[group].parent.is_some() {
            return Err(ParseError::UnbalancedParentheses);
        }

        for node in &self.nodes {
            if node.right.is_some() {
                continue;
            }
            match node.kind {
                NodeKind::Operator => {
                    return Err(ParseError::MissingOperand {
                        operator: node.value.clone(),
                    })
                }
                NodeKind::Function if !node.opened => {
                    return Err(ParseError::ExpectedOpenParen {
                        function: node.value.clone(),
                        found: "end of input".to_string(),
                    })
                }
                NodeKind::Function | NodeKind::Identity => {
                    return Err(ParseError::EmptyExpression)
                }
                _ => {}
            }
        }

        debug!("Built expression tree with {} nodes", self.nodes.len());
        Ok(Expression::from_parts(self.nodes, self.root))
    }

    fn push_operator(&mut self, token: &str) -> Result<(), ParseError> {
        let op = lookup_operator(token).ok_or_else(|| unexpected(token))?;
        let cursor = &self.nodes[self.cursor];

        // prefix at the start of a group
        if cursor.kind.is_group() && cursor.right.is_none() {
            let node = self.add_node(NodeKind::Operator, token, self.cursor);
            self.nodes[self.cursor].right = Some(node);
            self.cursor = node;
            return Ok(());
        }

        // prefix in an operand slot, e.g. the `-` in `2*-3`
        if cursor.kind == NodeKind::Operator && op.can_be_unary && cursor.right.is_none() {
            let node = self.add_node(NodeKind::Operator, token, self.cursor);
            self.nodes[self.cursor].right = Some(node);
            self.cursor = node;
            return Ok(());
        }

        if !cursor.is_leaf() && !cursor.unary {
            return Err(unexpected(token));
        }

        let mut target = self.cursor;
        let parent = loop {
            let parent = self.nodes[target]
                .parent
                .ok_or(ParseError::UnbalancedParentheses)?;
            if self.nodes[parent].priority >= op.left_prior {
                target = parent;
            } else {
                break parent;
            }
        };

        let node = self.add_node(NodeKind::Operator, token, parent);
        self.nodes[node].left = Some(target);
        self.replace_child(parent, target, node);
        self.nodes[target].parent = Some(node);
        self.cursor = node;
        Ok(())
    }

    fn open_group(&mut self) -> Result<(), ParseError> {
        let cursor = &mut self.nodes[self.cursor];
        if cursor.is_leaf() {
            return Err(unexpected("("));
        }
        if cursor.kind == NodeKind::Function && !cursor.opened {
            cursor.opened = true;
            return Ok(());
        }
        self.place(NodeKind::Identity, "")
    }

    fn close_group(&mut self) -> Result<(), ParseError> {
        self.cursor = self
            .enclosing_group(self.cursor)
            .ok_or(ParseError::UnbalancedParentheses)?;
        Ok(())
    }

    /// Attaches a new Number, Name-derived or Identity node below the cursor.
    fn place(&mut self, kind: NodeKind, value: &str) -> Result<(), ParseError> {
        let cursor = &self.nodes[self.cursor];
        let shown = if kind == NodeKind::Identity { "(" } else { value };
        if cursor.is_leaf() {
            return Err(unexpected(shown));
        }

        match (cursor.left, cursor.right) {
            (None, None) => {
                if cursor.kind == NodeKind::Operator {
                    let can_be_unary =
                        lookup_operator(&cursor.value).is_some_and(|op| op.can_be_unary);
                    if !can_be_unary {
                        return Err(ParseError::NotUnary {
                            operator: cursor.value.clone(),
                        });
                    }
                }
                let is_operator = cursor.kind == NodeKind::Operator;
                let node = self.add_node(kind, value, self.cursor);
                let cursor = &mut self.nodes[self.cursor];
                cursor.right = Some(node);
                cursor.unary = true;
                // a unary operator keeps the cursor over its operand so the next
                // operator splices above it: `-2^2` is `(-2)^2`
                if !is_operator {
                    self.cursor = node;
                }
            }
            (Some(_), None) => {
                let node = self.add_node(kind, value, self.cursor);
                self.nodes[self.cursor].right = Some(node);
                self.cursor = node;
            }
            _ => return Err(unexpected(shown)),
        }
        Ok(())
    }

    /// The nearest Identity or Function strictly above `id`.
    fn enclosing_group(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.nodes[id].parent?;
        while !self.nodes[current].kind.is_group() {
            current = self.nodes[current].parent?;
        }
        Some(current)
    }

    fn add_node(&mut self, kind: NodeKind, value: &str, parent: NodeId) -> NodeId {
        self.nodes.push(ExpressionNode::new(kind, value, Some(parent)));
        self.nodes.len() - 1
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let parent = &mut self.nodes[parent];
        if parent.left == Some(old) {
            parent.left = Some(new);
        } else {
            parent.right = Some(new);
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn unexpected(token: &str) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.to_string(),
    }
}
