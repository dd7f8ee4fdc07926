//! Named refactoring actions over the simplification pipeline.
//!
//! The host lists applicable actions for a cursor, shows their titles,
//! and later asks for the edits of the action the user picked. Both
//! queries run the pipeline from scratch against the tree supplied for
//! that request; no state is carried between them, so an action listed
//! against one tree may legitimately no longer apply when the edits are
//! requested against a newer one.

use thiserror::Error;
use tracing::{debug, info};
use tree_sitter::Node;

use pruner_syntax::{ParseResult, point_to_one_based};

use crate::edit::{SourceEdit, produce_edit};
use crate::locator::{Target, locate};
use crate::model::BoolExpr;

/// Identifier of the simplify-expression action.
pub const SIMPLIFY_EXPRESSION_ACTION: &str = "simplify_expression";

/// Human-readable title of the simplify-expression action.
pub const SIMPLIFY_EXPRESSION_TITLE: &str = "Simplify expression";

/// An action offered to the host for a particular cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Stable identifier the host passes back to apply the action.
    pub id: &'static str,
    /// Human-readable title for the editor's action menu.
    pub title: &'static str,
}

/// Errors from applying a named action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    /// The requested action id is not registered. The engine never
    /// guesses: an unknown id yields no edit rather than a wrong one.
    #[error("unknown refactoring action '{id}'")]
    UnknownAction {
        /// The id that was requested.
        id: String,
    },
}

/// A located expression together with its boolean models.
struct SimplifiableMatch<'tree> {
    node: Node<'tree>,
    original: BoolExpr,
    simplified: BoolExpr,
}

/// Runs locate → model → simplify and keeps the match only when the
/// simplified model differs structurally from the original.
fn try_match<'tree>(
    parsed: &'tree ParseResult,
    target: &Target,
) -> Option<SimplifiableMatch<'tree>> {
    let node = locate(parsed.root_node(), target)?;
    let original = BoolExpr::from_node(node, parsed.source());
    let simplified = original.simplify();

    if simplified == original {
        debug!(
            expression = parsed.node_text(node),
            "expression is already in simplest form"
        );
        return None;
    }

    Some(SimplifiableMatch {
        node,
        original,
        simplified,
    })
}

/// Lists the actions applicable at the target.
///
/// Zero or one descriptor: the simplify-expression action is offered
/// exactly when the located expression's simplified model differs from
/// the original. An empty list is the normal negative result for both
/// "no enclosing logical expression" and "nothing to simplify".
#[must_use]
pub fn applicable_actions(parsed: &ParseResult, target: &Target) -> Vec<ActionDescriptor> {
    let Some(matched) = try_match(parsed, target) else {
        return Vec::new();
    };

    let (start_line, start_col) = point_to_one_based(matched.node.start_position());
    let (end_line, end_col) = point_to_one_based(matched.node.end_position());
    info!(
        "can simplify binary expression '{}' at [({start_line}, {start_col}), ({end_line}, {end_col})]",
        parsed.node_text(matched.node)
    );

    vec![ActionDescriptor {
        id: SIMPLIFY_EXPRESSION_ACTION,
        title: SIMPLIFY_EXPRESSION_TITLE,
    }]
}

/// Computes the edit for a named action at the target.
///
/// Returns `Ok(None)` when the action is no longer applicable, for
/// example because the tree changed between listing and applying.
///
/// # Errors
///
/// Returns [`ActionError::UnknownAction`] when the action id is not
/// registered.
pub fn edits_for_action(
    parsed: &ParseResult,
    target: &Target,
    action_id: &str,
) -> Result<Option<SourceEdit>, ActionError> {
    if action_id != SIMPLIFY_EXPRESSION_ACTION {
        return Err(ActionError::UnknownAction {
            id: action_id.to_owned(),
        });
    }

    let Some(matched) = try_match(parsed, target) else {
        debug!(action = action_id, "action is no longer applicable");
        return Ok(None);
    };

    Ok(produce_edit(
        parsed.source(),
        matched.node.byte_range(),
        &matched.original,
        &matched.simplified,
    ))
}
