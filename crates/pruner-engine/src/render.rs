//! Renders the boolean model back to source text.

use crate::model::BoolExpr;

impl BoolExpr {
    /// Renders the expression as source text.
    ///
    /// Literals render as `true`/`false`, leaves verbatim, and binary
    /// expressions as `left <op> right` with nested sub-expressions
    /// parenthesised. Equality always renders with the strict `===`
    /// symbol.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Literal(true) => String::from("true"),
            Self::Literal(false) => String::from("false"),
            Self::Leaf(text) => text.clone(),
            Self::Binary { op, left, right } => format!(
                "{} {} {}",
                render_operand(left),
                op.symbol(),
                render_operand(right)
            ),
        }
    }
}

/// Renders an operand, wrapping nested binary expressions in parentheses.
fn render_operand(expr: &BoolExpr) -> String {
    match expr {
        BoolExpr::Binary { .. } => format!("({})", expr.render()),
        BoolExpr::Literal(_) | BoolExpr::Leaf(_) => expr.render(),
    }
}
