//! Algebraic simplification of the boolean model.
//!
//! A single bottom-up pass over the model. Because every rule either
//! collapses to a literal or substitutes an already-simplified child,
//! one pass is a complete fixpoint for this grammar.

use crate::model::{BoolExpr, BoolOp};

impl BoolExpr {
    /// Simplifies the expression to its algebraic fixpoint.
    ///
    /// Pure and deterministic: literals and leaves are returned
    /// unchanged; binary expressions have both children simplified
    /// first and then the rule table applied, first match wins. When no
    /// rule fires the children are kept in their simplified form.
    #[must_use]
    pub fn simplify(&self) -> Self {
        match self {
            Self::Literal(_) | Self::Leaf(_) => self.clone(),
            Self::Binary { op, left, right } => {
                apply_rules(*op, left.simplify(), right.simplify())
            }
        }
    }
}

/// Applies the rule table for one operator to simplified operands.
fn apply_rules(op: BoolOp, left: BoolExpr, right: BoolExpr) -> BoolExpr {
    use BoolExpr::Literal;

    match op {
        BoolOp::And => match (&left, &right) {
            (Literal(true), Literal(true)) => Literal(true),
            (Literal(false), _) | (_, Literal(false)) => Literal(false),
            (Literal(true), _) => right,
            (_, Literal(true)) => left,
            _ => rebuild(op, left, right),
        },
        BoolOp::Or => match (&left, &right) {
            (Literal(true), _) | (_, Literal(true)) => Literal(true),
            (Literal(false), Literal(false)) => Literal(false),
            (Literal(false), _) => right,
            (_, Literal(false)) => left,
            _ => rebuild(op, left, right),
        },
        BoolOp::Equals => match (&left, &right) {
            (Literal(a), Literal(b)) => Literal(a == b),
            (BoolExpr::Leaf(a), BoolExpr::Leaf(b)) if a == b => Literal(true),
            _ => rebuild(op, left, right),
        },
    }
}

/// Reassembles a binary expression whose children are already simplified.
fn rebuild(op: BoolOp, left: BoolExpr, right: BoolExpr) -> BoolExpr {
    BoolExpr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
