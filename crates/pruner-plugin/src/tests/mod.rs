//! Unit tests for plugin request dispatch.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;

use rstest::{fixture, rstest};

use crate::protocol::{FilePayload, PluginOutput, PluginRequest, PluginResponse};
use crate::{execute_request, run};

const SOURCE: &str = "const some = a && true;";

fn ts_payload(content: &str) -> FilePayload {
    FilePayload::new(PathBuf::from("/project/src/index.ts"), content)
}

#[fixture]
fn position_arguments() -> HashMap<String, serde_json::Value> {
    let mut arguments = HashMap::new();
    arguments.insert(String::from("position"), serde_json::Value::from(13));
    arguments
}

fn actions_request(
    content: &str,
    arguments: HashMap<String, serde_json::Value>,
) -> PluginRequest {
    PluginRequest::with_arguments("applicable-actions", vec![ts_payload(content)], arguments)
}

fn edits_request(
    content: &str,
    mut arguments: HashMap<String, serde_json::Value>,
) -> PluginRequest {
    arguments.insert(
        String::from("action"),
        serde_json::Value::String(String::from("simplify_expression")),
    );
    PluginRequest::with_arguments("action-edits", vec![ts_payload(content)], arguments)
}

fn expect_actions(response: &PluginResponse) -> usize {
    match response.output() {
        PluginOutput::Actions { actions } => actions.len(),
        other => panic!("expected actions output, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// applicable-actions
// ---------------------------------------------------------------------------

#[rstest]
fn applicable_actions_offers_simplification(
    position_arguments: HashMap<String, serde_json::Value>,
) {
    let response = execute_request(&actions_request(SOURCE, position_arguments))
        .expect("execute_request should succeed");

    assert!(response.is_success());
    assert_eq!(expect_actions(&response), 1);
}

#[rstest]
#[case::comparison("const some = a < 32;")]
#[case::already_simplest("const some = a && b;")]
fn applicable_actions_empty_list_is_success(
    #[case] content: &str,
    position_arguments: HashMap<String, serde_json::Value>,
) {
    let response = execute_request(&actions_request(content, position_arguments))
        .expect("execute_request should succeed");

    assert!(response.is_success());
    assert_eq!(expect_actions(&response), 0);
}

#[rstest]
fn applicable_actions_accepts_selection_arguments() {
    let mut arguments = HashMap::new();
    arguments.insert(String::from("start"), serde_json::Value::from(13));
    arguments.insert(String::from("end"), serde_json::Value::from(22));

    let response = execute_request(&actions_request(SOURCE, arguments))
        .expect("execute_request should succeed");

    assert_eq!(expect_actions(&response), 1);
}

#[rstest]
fn applicable_actions_accepts_string_offsets() {
    let mut arguments = HashMap::new();
    arguments.insert(
        String::from("position"),
        serde_json::Value::String(String::from("13")),
    );

    let response = execute_request(&actions_request(SOURCE, arguments))
        .expect("execute_request should succeed");

    assert_eq!(expect_actions(&response), 1);
}

// ---------------------------------------------------------------------------
// action-edits
// ---------------------------------------------------------------------------

#[rstest]
fn action_edits_returns_replacement_span(
    position_arguments: HashMap<String, serde_json::Value>,
) {
    let response = execute_request(&edits_request(SOURCE, position_arguments))
        .expect("execute_request should succeed");

    assert!(response.is_success());
    match response.output() {
        PluginOutput::Edit {
            start,
            end,
            new_text,
        } => {
            let mut edited = SOURCE.to_owned();
            edited.replace_range(*start..*end, new_text);
            assert_eq!(edited, "const some = a;");
        }
        other => panic!("expected edit output, got {other:?}"),
    }
}

#[rstest]
fn action_edits_empty_when_no_longer_applicable(
    position_arguments: HashMap<String, serde_json::Value>,
) {
    let response = execute_request(&edits_request("const some = a && b;", position_arguments))
        .expect("execute_request should succeed");

    assert!(response.is_success());
    assert_eq!(response.output(), &PluginOutput::Empty);
}

#[rstest]
fn action_edits_rejects_unknown_action(
    mut position_arguments: HashMap<String, serde_json::Value>,
) {
    position_arguments.insert(
        String::from("action"),
        serde_json::Value::String(String::from("extract_variable")),
    );
    let request =
        PluginRequest::with_arguments("action-edits", vec![ts_payload(SOURCE)], position_arguments);

    let error = execute_request(&request).expect_err("unknown action must be rejected");
    assert!(error.contains("unknown refactoring action"));
}

#[rstest]
fn action_edits_requires_action_argument(
    position_arguments: HashMap<String, serde_json::Value>,
) {
    let request = PluginRequest::with_arguments(
        "action-edits",
        vec![ts_payload(SOURCE)],
        position_arguments,
    );

    let error = execute_request(&request).expect_err("missing action must be rejected");
    assert!(error.contains("'action' argument"));
}

// ---------------------------------------------------------------------------
// request validation
// ---------------------------------------------------------------------------

#[test]
fn unsupported_operation_is_rejected() {
    let request = PluginRequest::new("rename", vec![ts_payload(SOURCE)]);
    let error = execute_request(&request).expect_err("unsupported operation");
    assert!(error.contains("unsupported refactoring operation"));
}

#[rstest]
fn missing_file_payload_is_rejected(position_arguments: HashMap<String, serde_json::Value>) {
    let request = PluginRequest::with_arguments("applicable-actions", vec![], position_arguments);
    let error = execute_request(&request).expect_err("missing payload");
    assert!(error.contains("one file payload"));
}

#[rstest]
fn unrecognised_file_type_is_rejected(position_arguments: HashMap<String, serde_json::Value>) {
    let request = PluginRequest::with_arguments(
        "applicable-actions",
        vec![FilePayload::new(PathBuf::from("/project/data.json"), "{}")],
        position_arguments,
    );

    let error = execute_request(&request).expect_err("unrecognised file type");
    assert!(error.contains("cannot obtain a syntax tree"));
}

#[test]
fn missing_target_arguments_are_rejected() {
    let request = PluginRequest::new("applicable-actions", vec![ts_payload(SOURCE)]);
    let error = execute_request(&request).expect_err("missing target");
    assert!(error.contains("'position'"));
}

#[rstest]
#[case::boolean_position(serde_json::Value::Bool(true), "string or number")]
#[case::negative_position(
    serde_json::Value::String(String::from("-1")),
    "non-negative integer"
)]
fn invalid_position_arguments_are_rejected(
    #[case] position: serde_json::Value,
    #[case] expected_message: &str,
) {
    let mut arguments = HashMap::new();
    arguments.insert(String::from("position"), position);
    let request = actions_request(SOURCE, arguments);

    let error = execute_request(&request).expect_err("invalid position");
    assert!(
        error.contains(expected_message),
        "expected '{expected_message}' in '{error}'"
    );
}

#[test]
fn inverted_selection_is_rejected() {
    let mut arguments = HashMap::new();
    arguments.insert(String::from("start"), serde_json::Value::from(22));
    arguments.insert(String::from("end"), serde_json::Value::from(13));
    let request = actions_request(SOURCE, arguments);

    let error = execute_request(&request).expect_err("inverted selection");
    assert!(error.contains("must not precede"));
}

// ---------------------------------------------------------------------------
// run: one JSONL line in, one JSONL line out
// ---------------------------------------------------------------------------

fn run_with_input(input: &str) -> PluginResponse {
    let mut reader = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();
    run(&mut reader, &mut output).expect("run should write a response");

    let line = String::from_utf8(output).expect("utf-8 response");
    assert!(line.ends_with('\n'), "response must be newline-terminated");
    serde_json::from_str(line.trim()).expect("valid response JSON")
}

#[rstest]
fn run_round_trips_a_request(position_arguments: HashMap<String, serde_json::Value>) {
    let request = actions_request(SOURCE, position_arguments);
    let line = serde_json::to_string(&request).expect("serialise request");

    let response = run_with_input(&format!("{line}\n"));
    assert!(response.is_success());
    assert_eq!(expect_actions(&response), 1);
}

#[test]
fn run_reports_empty_stdin_as_failure() {
    let response = run_with_input("");
    assert!(!response.is_success());
    assert!(!response.diagnostics().is_empty());
}

#[test]
fn run_reports_malformed_json_as_failure() {
    let response = run_with_input("{not json}\n");
    assert!(!response.is_success());
    let diagnostic = response.diagnostics().first().expect("diagnostic");
    assert!(diagnostic.message().contains("invalid plugin request JSON"));
}
