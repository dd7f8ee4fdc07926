//! Plugin entrypoint and request dispatcher for the simplify-expression
//! refactoring.
//!
//! This crate implements a one-shot plugin protocol handler: the host
//! writes exactly one JSONL request to stdin, the plugin runs the
//! refactoring engine against the supplied file payload, and writes one
//! JSONL response to stdout. The two supported operations mirror the
//! host's query pair: `applicable-actions` lists the refactoring
//! actions available at a target, and `action-edits` computes the text
//! edit for an action the user picked.

pub mod protocol;
pub mod telemetry;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::error;

use pruner_engine::{Target, applicable_actions, edits_for_action};
use pruner_syntax::{ParseResult, Parser, SupportedLanguage};

use crate::protocol::{
    ActionInfo, DiagnosticSeverity, FilePayload, PluginDiagnostic, PluginOutput, PluginRequest,
    PluginResponse,
};

/// Errors raised while dispatching plugin requests.
#[derive(Debug, Error)]
pub enum PluginDispatchError {
    /// Writing the plugin response to stdout failed.
    #[error("failed to write plugin response: {source}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Serializing the response payload failed.
    #[error("failed to serialize plugin response: {source}")]
    Serialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Executes one plugin request from `stdin` and writes one response to
/// `stdout`.
///
/// Malformed requests never crash the process: every failure becomes a
/// failure response with diagnostics.
///
/// # Errors
///
/// Returns an error if the response cannot be serialized or written.
pub fn run(stdin: &mut impl BufRead, stdout: &mut impl Write) -> Result<(), PluginDispatchError> {
    let response = match read_request(stdin).and_then(|request| execute_request(&request)) {
        Ok(resp) => resp,
        Err(message) => {
            error!("{message}");
            failure_response(message)
        }
    };

    let payload = serde_json::to_string(&response)
        .map_err(|source| PluginDispatchError::Serialize { source })?;
    stdout
        .write_all(payload.as_bytes())
        .map_err(|source| PluginDispatchError::Write { source })?;
    stdout
        .write_all(b"\n")
        .map_err(|source| PluginDispatchError::Write { source })?;
    stdout
        .flush()
        .map_err(|source| PluginDispatchError::Write { source })
}

fn read_request(stdin: &mut impl BufRead) -> Result<PluginRequest, String> {
    let mut line = String::new();
    let bytes_read = stdin
        .read_line(&mut line)
        .map_err(|error| format!("failed to read request: {error}"))?;

    if bytes_read == 0 {
        return Err(String::from("plugin request was empty"));
    }

    serde_json::from_str(line.trim())
        .map_err(|error| format!("invalid plugin request JSON: {error}"))
}

fn execute_request(request: &PluginRequest) -> Result<PluginResponse, String> {
    match request.operation() {
        "applicable-actions" => execute_applicable_actions(request),
        "action-edits" => execute_action_edits(request),
        other => Err(format!("unsupported refactoring operation '{other}'")),
    }
}

/// Lists the actions applicable at the requested target.
///
/// An empty action list is a normal negative result and reports
/// success, matching the engine's "not found" and "nothing to
/// simplify" outcomes.
fn execute_applicable_actions(request: &PluginRequest) -> Result<PluginResponse, String> {
    let parsed = parse_payload(request)?;
    let target = parse_target(request.arguments())?;

    let actions = applicable_actions(&parsed, &target)
        .into_iter()
        .map(|action| ActionInfo {
            id: action.id.to_owned(),
            title: action.title.to_owned(),
        })
        .collect();

    Ok(PluginResponse::success(PluginOutput::Actions { actions }))
}

/// Computes the edit for the named action at the requested target.
///
/// `Empty` output signals that the action is no longer applicable; an
/// unknown action id is a reported failure and never produces an edit.
fn execute_action_edits(request: &PluginRequest) -> Result<PluginResponse, String> {
    let action_id = request
        .arguments()
        .get("action")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| String::from("action-edits operation requires an 'action' argument"))?;

    let parsed = parse_payload(request)?;
    let target = parse_target(request.arguments())?;

    let edit = edits_for_action(&parsed, &target, action_id).map_err(|error| error.to_string())?;

    let output = match edit {
        Some(source_edit) => PluginOutput::Edit {
            start: source_edit.span.start,
            end: source_edit.span.end,
            new_text: source_edit.new_text,
        },
        None => PluginOutput::Empty,
    };

    Ok(PluginResponse::success(output))
}

/// Parses the request's single file payload into a syntax tree.
fn parse_payload(request: &PluginRequest) -> Result<ParseResult, String> {
    let file = request
        .files()
        .first()
        .ok_or_else(|| String::from("refactoring operations require one file payload"))?;

    let language = language_of(file)?;
    let mut parser = Parser::new(language).map_err(|error| error.to_string())?;
    parser
        .parse(file.content())
        .map_err(|error| error.to_string())
}

/// Determines the language of a file payload from its extension.
fn language_of(file: &FilePayload) -> Result<SupportedLanguage, String> {
    SupportedLanguage::from_path(file.path()).ok_or_else(|| {
        format!(
            "cannot obtain a syntax tree for '{}': unrecognised file type",
            file.path().display()
        )
    })
}

/// Extracts the cursor target from request arguments.
///
/// Accepts either a single `position` offset or a `start`/`end` offset
/// pair; offsets may be JSON numbers or strings.
fn parse_target(arguments: &HashMap<String, serde_json::Value>) -> Result<Target, String> {
    if let Some(value) = arguments.get("position") {
        return Ok(Target::Position(parse_offset("position", value)?));
    }

    match (arguments.get("start"), arguments.get("end")) {
        (Some(start_value), Some(end_value)) => {
            let start = parse_offset("start", start_value)?;
            let end = parse_offset("end", end_value)?;
            if end < start {
                return Err(format!(
                    "selection end {end} must not precede selection start {start}"
                ));
            }
            Ok(Target::Selection(start..end))
        }
        _ => Err(String::from(
            "refactoring operations require a 'position' argument or 'start'/'end' arguments",
        )),
    }
}

/// Parses a byte offset argument given as a JSON number or string.
fn parse_offset(name: &str, value: &serde_json::Value) -> Result<usize, String> {
    let text = json_value_to_string(value)
        .ok_or_else(|| format!("{name} argument must be a string or number"))?;
    text.parse::<usize>()
        .map_err(|error| format!("{name} must be a non-negative integer: {error}"))
}

fn json_value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text.to_owned()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn failure_response(message: String) -> PluginResponse {
    PluginResponse::failure(vec![PluginDiagnostic::new(
        DiagnosticSeverity::Error,
        message,
    )])
}
