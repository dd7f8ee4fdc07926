//! Boolean-expression simplification engine for editor refactorings.
//!
//! Given a parsed syntax tree and a cursor position or text selection,
//! this crate locates the maximal enclosing logical expression, models
//! it as a canonical boolean-algebra value, simplifies the model with a
//! fixed set of algebraic laws, and renders a precise text edit that
//! replaces the original expression with its simplified form.
//!
//! The pipeline is a pure, synchronous computation with no state held
//! across requests:
//!
//! 1. [`locate`] finds the enclosing logical expression, or nothing.
//! 2. [`BoolExpr::from_node`] translates the subtree into the canonical
//!    model, preserving anything it does not understand verbatim.
//! 3. [`BoolExpr::simplify`] rewrites the model bottom-up to a fixpoint.
//! 4. [`BoolExpr::render`] converts the model back to source text.
//! 5. [`produce_edit`] computes the replacement span and text.
//!
//! The host-facing entry points [`applicable_actions`] and
//! [`edits_for_action`] compose the pipeline for the "list actions" and
//! "apply action" queries respectively.
//!
//! # Example
//!
//! ```
//! use pruner_engine::{Target, applicable_actions};
//! use pruner_syntax::{Parser, SupportedLanguage};
//!
//! let mut parser = Parser::new(SupportedLanguage::TypeScript)?;
//! let parsed = parser.parse("const some = a && true;")?;
//!
//! let actions = applicable_actions(&parsed, &Target::Position(13));
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), pruner_syntax::SyntaxError>(())
//! ```

mod action;
mod edit;
mod locator;
mod model;
mod render;
mod simplify;

pub use action::{
    ActionDescriptor, ActionError, SIMPLIFY_EXPRESSION_ACTION, SIMPLIFY_EXPRESSION_TITLE,
    applicable_actions, edits_for_action,
};
pub use edit::{SourceEdit, produce_edit};
pub use locator::{Target, locate};
pub use model::{BoolExpr, BoolOp};

#[cfg(test)]
mod tests;
