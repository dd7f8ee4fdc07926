//! Locates the maximal enclosing logical expression around a cursor.
//!
//! The locator is a read-only traversal over the host-owned tree:
//! repeated parent lookups bounded by the file root, never a held
//! back-reference. Only `&&`, `||`, `==` and `===` count as logical
//! operators; other binary expressions (comparisons, arithmetic) are
//! never climbed into.

use std::ops::Range;

use tree_sitter::Node;

use crate::model::BoolOp;

/// Node kind of a binary expression in the TypeScript grammar family.
pub(crate) const BINARY_EXPRESSION: &str = "binary_expression";
/// Node kind of a parenthesised expression.
pub(crate) const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";

/// Cursor position or text selection that anchors a refactoring request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single byte offset into the source text.
    Position(usize),
    /// A half-open `[start, end)` byte range.
    Selection(Range<usize>),
}

/// Returns whether a node is a logical/equality binary expression.
pub(crate) fn is_logical_expression(node: Node<'_>) -> bool {
    node.kind() == BINARY_EXPRESSION && operator_of(node).is_some()
}

/// Returns the logical operator of a binary expression node, if any.
pub(crate) fn operator_of(node: Node<'_>) -> Option<BoolOp> {
    node.child_by_field_name("operator")
        .and_then(|token| BoolOp::from_operator(token.kind()))
}

/// Finds the maximal enclosing logical expression for a target.
///
/// Returns `None` when no logical/equality binary expression encloses
/// the target before the file root is reached. A zero-width selection
/// degenerates to its start position.
#[must_use]
pub fn locate<'tree>(root: Node<'tree>, target: &Target) -> Option<Node<'tree>> {
    let initial = match target {
        Target::Position(offset) => locate_at_position(root, *offset)?,
        Target::Selection(range) if range.end <= range.start => {
            locate_at_position(root, range.start)?
        }
        Target::Selection(range) => locate_in_selection(root, range)?,
    };

    Some(expand_to_maximal(initial))
}

/// Nearest enclosing logical expression around a single offset.
fn locate_at_position(root: Node<'_>, offset: usize) -> Option<Node<'_>> {
    let token = root.descendant_for_byte_range(offset, offset)?;
    nearest_logical(token)
}

/// Nearest enclosing logical expression around a non-empty selection.
///
/// Finds the smallest nodes at both selection boundaries and takes
/// their lowest common ancestor. When the ancestor has exactly one
/// binary-expression child the selection is taken to mean that child;
/// otherwise the walk continues upward as in the position case.
fn locate_in_selection<'tree>(root: Node<'tree>, range: &Range<usize>) -> Option<Node<'tree>> {
    let start_node = root.descendant_for_byte_range(range.start, range.start)?;
    let last = range.end.saturating_sub(1);
    let end_node = root.descendant_for_byte_range(last, last)?;

    let ancestor = lowest_common_ancestor(start_node, end_node)?;

    if let Some(child) = sole_binary_child(ancestor) {
        if is_logical_expression(child) {
            return Some(child);
        }
        return nearest_logical(child);
    }

    nearest_logical(ancestor)
}

/// Walks the ancestor chain (including `node` itself) to the nearest
/// logical expression.
fn nearest_logical(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = Some(node);
    while let Some(candidate) = current {
        if is_logical_expression(candidate) {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Lowest common ancestor of two nodes of the same tree.
///
/// Both ancestor chains terminate at the file root, so a common node
/// always exists; the first match walking the second chain leaf-upward
/// is the one nearest the leaves.
fn lowest_common_ancestor<'tree>(a: Node<'tree>, b: Node<'tree>) -> Option<Node<'tree>> {
    let mut first_chain = Vec::new();
    let mut current = Some(a);
    while let Some(node) = current {
        first_chain.push(node.id());
        current = node.parent();
    }

    let mut candidate = Some(b);
    while let Some(node) = candidate {
        if first_chain.contains(&node.id()) {
            return Some(node);
        }
        candidate = node.parent();
    }
    None
}

/// Returns the sole binary-expression child of a node, if exactly one
/// of its named children is a binary expression.
fn sole_binary_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let mut found = None;
    for child in node.named_children(&mut cursor) {
        if child.kind() == BINARY_EXPRESSION {
            if found.is_some() {
                return None;
            }
            found = Some(child);
        }
    }
    found
}

/// Expands an enclosing logical expression to the outermost contiguous
/// run of logical operators.
///
/// Parentheses are structural, so the climb looks through
/// `parenthesized_expression` wrappers: a cursor anywhere inside
/// `(a && false) || true` must resolve to the entire disjunction, not
/// just the inner conjunction. The loop advances on the candidate it
/// just accepted, never on the first one found.
fn expand_to_maximal(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while let Some(parent) = parent_through_parens(current) {
        if !is_logical_expression(parent) {
            break;
        }
        current = parent;
    }
    current
}

/// Returns the nearest ancestor that is not a parenthesised expression.
fn parent_through_parens(node: Node<'_>) -> Option<Node<'_>> {
    let mut parent = node.parent()?;
    while parent.kind() == PARENTHESIZED_EXPRESSION {
        parent = parent.parent()?;
    }
    Some(parent)
}
