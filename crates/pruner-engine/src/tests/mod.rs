//! End-to-end pipeline tests: locate → model → simplify → render → edit.
//!
//! Sources are written with a `[||]` marker for the cursor position,
//! mirroring how the editor invokes the engine.

use rstest::rstest;

use pruner_syntax::{ParseResult, Parser, SupportedLanguage};

use crate::{
    ActionError, SIMPLIFY_EXPRESSION_ACTION, SIMPLIFY_EXPRESSION_TITLE, Target,
    applicable_actions, edits_for_action,
};

const CURSOR: &str = "[||]";

fn parse(source: &str) -> ParseResult {
    let mut parser = Parser::new(SupportedLanguage::TypeScript).expect("parser init");
    parser.parse(source).expect("parse")
}

/// Splits a marked source into the clean source and the cursor target.
fn fixture(marked: &str) -> (ParseResult, Target) {
    let offset = marked.find(CURSOR).expect("source must contain [||]");
    let source = marked.replacen(CURSOR, "", 1);
    (parse(&source), Target::Position(offset))
}

/// Runs both host queries and applies the edit, checking that the
/// "list" and "apply" answers agree.
fn simplify_at_cursor(marked: &str) -> Option<String> {
    let (parsed, target) = fixture(marked);

    let actions = applicable_actions(&parsed, &target);
    let edit = edits_for_action(&parsed, &target, SIMPLIFY_EXPRESSION_ACTION)
        .expect("registered action id");

    assert_eq!(
        actions.is_empty(),
        edit.is_none(),
        "list and apply must agree on applicability"
    );

    edit.map(|source_edit| source_edit.apply(parsed.source()))
}

#[rstest]
#[case::redundant_true_in_and("const some = [||]a && true;", "const some = a;")]
#[case::and_with_false_right("const some = [||]a && false;", "const some = false;")]
#[case::and_with_false_left("const some = [||]false && a;", "const some = false;")]
#[case::redundant_false_in_or("const some = [||]a || false;", "const some = a;")]
#[case::opaque_operand_keeps_brackets(
    "const some = [||](5 < a) || false;",
    "const some = (5 < a);"
)]
#[case::identical_operands_equal("const some = [||]a == a;", "const some = true;")]
#[case::or_with_true_left("const some = [||]true || a;", "const some = true;")]
#[case::nested_expression_collapses(
    "const some = [||](true && false) || true;",
    "const some = true;"
)]
#[case::equality_renders_strict("const some = [||](a == b) && true;", "const some = a === b;")]
#[case::strict_equality_literals("const some = [||]true === false;", "const some = false;")]
fn cursor_scenarios_produce_expected_text(#[case] marked: &str, #[case] expected: &str) {
    let result = simplify_at_cursor(marked).expect("an edit should be offered");
    assert_eq!(result, expected);

    // Span correctness: the edited text must still parse cleanly.
    assert!(!parse(&result).has_errors());
}

#[rstest]
#[case::comparison_is_not_logical("const some = [||]a < 32;")]
#[case::nothing_to_simplify("const some = [||]a && b;")]
#[case::distinct_leaf_equality("const some = [||]a == b;")]
#[case::no_expression_at_cursor("const some[||] = 42;")]
fn negative_scenarios_offer_no_action(#[case] marked: &str) {
    assert_eq!(simplify_at_cursor(marked), None);
}

#[test]
fn offered_action_carries_id_and_title() {
    let (parsed, target) = fixture("const some = [||]a && true;");
    let actions = applicable_actions(&parsed, &target);

    assert_eq!(actions.len(), 1);
    let action = actions.first().expect("one action");
    assert_eq!(action.id, SIMPLIFY_EXPRESSION_ACTION);
    assert_eq!(action.title, SIMPLIFY_EXPRESSION_TITLE);
}

#[test]
fn unknown_action_id_is_rejected() {
    let (parsed, target) = fixture("const some = [||]a && true;");
    let result = edits_for_action(&parsed, &target, "extract_variable");

    assert_eq!(
        result,
        Err(ActionError::UnknownAction {
            id: String::from("extract_variable"),
        })
    );
}

#[test]
fn selection_inside_inner_operand_simplifies_whole_expression() {
    let source = "const some = (a && false) || true;";
    let parsed = parse(source);
    // Select "a && false" inside the parentheses.
    let target = Target::Selection(14..24);

    let edit = edits_for_action(&parsed, &target, SIMPLIFY_EXPRESSION_ACTION)
        .expect("registered action id")
        .expect("an edit should be offered");

    assert_eq!(edit.apply(source), "const some = true;");
}

#[test]
fn cursor_in_whitespace_between_operands_still_matches() {
    let result = simplify_at_cursor("const some = a &&[||] true;")
        .expect("an edit should be offered");
    assert_eq!(result, "const some = a;");
}

#[test]
fn second_statement_is_edited_in_place() {
    let marked = "const keep = a && b;\nconst some = [||]a && true;\n";
    let result = simplify_at_cursor(marked).expect("an edit should be offered");
    assert_eq!(result, "const keep = a && b;\nconst some = a;\n");
}
