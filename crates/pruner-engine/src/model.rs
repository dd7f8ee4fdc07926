//! Canonical boolean-expression model.
//!
//! The model is the single translation boundary between the host-owned
//! syntax tree and the simplification engine: everything downstream of
//! [`BoolExpr::from_node`] operates on this owned, immutable value and
//! never touches tree nodes again.

use tree_sitter::Node;

use crate::locator::{BINARY_EXPRESSION, PARENTHESIZED_EXPRESSION, operator_of};

/// Maximum nesting depth modelled before a sub-expression is captured
/// as an opaque leaf. Keeps the recursive walk (and every later pass
/// over the model) within a bounded call stack.
const MAX_MODEL_DEPTH: usize = 128;

/// Logical/equality operators understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    /// Logical conjunction (`&&`).
    And,
    /// Logical disjunction (`||`).
    Or,
    /// Equality (`==` or `===`; the two are treated as identical).
    Equals,
}

impl BoolOp {
    /// Maps an operator token kind to its logical operator.
    ///
    /// Returns `None` for every non-logical operator, which is what
    /// makes comparisons and arithmetic opaque to the engine.
    #[must_use]
    pub fn from_operator(kind: &str) -> Option<Self> {
        match kind {
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            "==" | "===" => Some(Self::Equals),
            _ => None,
        }
    }

    /// Returns the source symbol this operator renders as.
    ///
    /// Equality always renders strict (`===`) regardless of the
    /// original loose/strict spelling.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Equals => "===",
        }
    }
}

/// A canonical boolean expression.
///
/// Strictly tree-shaped and immutable. Structural equality is the
/// derived one: tag-wise, order-sensitive, with exact text match for
/// leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolExpr {
    /// A `true` or `false` literal.
    Literal(bool),
    /// An opaque operand carried verbatim: an identifier or any
    /// expression the engine does not understand.
    Leaf(String),
    /// A logical/equality binary expression.
    Binary {
        /// The operator joining the operands.
        op: BoolOp,
        /// Left operand.
        left: Box<BoolExpr>,
        /// Right operand.
        right: Box<BoolExpr>,
    },
}

impl BoolExpr {
    /// Translates a syntax subtree into the canonical model.
    ///
    /// This is a total, best-effort parse: unsupported sub-expressions
    /// become opaque leaves preserving their source text exactly, so
    /// simplification can proceed on the parts the engine understands
    /// while leaving the rest untouched.
    #[must_use]
    pub fn from_node(node: Node<'_>, source: &str) -> Self {
        Self::from_node_bounded(node, source, MAX_MODEL_DEPTH)
    }

    fn from_node_bounded(node: Node<'_>, source: &str, depth: usize) -> Self {
        let Some(remaining) = depth.checked_sub(1) else {
            return Self::leaf_of(node, source);
        };

        match node.kind() {
            "true" => Self::Literal(true),
            "false" => Self::Literal(false),
            PARENTHESIZED_EXPRESSION => {
                // Parentheses are structural only. They disappear from
                // the model when the inner expression is understood;
                // otherwise the whole bracketed text stays verbatim.
                match node.named_child(0) {
                    Some(inner) if is_modelled(inner, remaining) => {
                        Self::from_node_bounded(inner, source, remaining)
                    }
                    _ => Self::leaf_of(node, source),
                }
            }
            BINARY_EXPRESSION => {
                let operands = node
                    .child_by_field_name("left")
                    .zip(node.child_by_field_name("right"));
                match operator_of(node).zip(operands) {
                    Some((op, (left, right))) => Self::Binary {
                        op,
                        left: Box::new(Self::from_node_bounded(left, source, remaining)),
                        right: Box::new(Self::from_node_bounded(right, source, remaining)),
                    },
                    None => Self::leaf_of(node, source),
                }
            }
            _ => Self::leaf_of(node, source),
        }
    }

    /// Captures a node as an opaque leaf with its exact source text.
    fn leaf_of(node: Node<'_>, source: &str) -> Self {
        Self::Leaf(source.get(node.byte_range()).unwrap_or_default().to_owned())
    }
}

/// Returns whether a node translates to something other than a leaf.
fn is_modelled(node: Node<'_>, depth: usize) -> bool {
    let Some(remaining) = depth.checked_sub(1) else {
        return false;
    };

    match node.kind() {
        "true" | "false" => true,
        BINARY_EXPRESSION => operator_of(node).is_some(),
        PARENTHESIZED_EXPRESSION => node
            .named_child(0)
            .is_some_and(|inner| is_modelled(inner, remaining)),
        _ => false,
    }
}
