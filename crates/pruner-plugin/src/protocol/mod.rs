//! IPC protocol types for host-plugin communication.
//!
//! The protocol is a single-line JSONL exchange over stdio. The host
//! writes one [`PluginRequest`] line to the plugin's stdin and closes
//! it. The plugin writes one [`PluginResponse`] line to stdout and
//! exits. Plugin stderr carries telemetry and is not part of the
//! protocol.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Request sent from the host to the plugin on stdin.
///
/// Serialised as a single JSONL line terminated by a newline character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginRequest {
    operation: String,
    files: Vec<FilePayload>,
    #[serde(default)]
    arguments: HashMap<String, serde_json::Value>,
}

impl PluginRequest {
    /// Creates a request with the given operation and files.
    #[must_use]
    pub fn new(operation: impl Into<String>, files: Vec<FilePayload>) -> Self {
        Self {
            operation: operation.into(),
            files,
            arguments: HashMap::new(),
        }
    }

    /// Creates a request with arguments.
    #[must_use]
    pub fn with_arguments(
        operation: impl Into<String>,
        files: Vec<FilePayload>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            operation: operation.into(),
            files,
            arguments,
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn operation(&self) -> &str {
        self.operation.as_str()
    }

    /// Returns the file payloads.
    #[must_use]
    pub fn files(&self) -> &[FilePayload] {
        &self.files
    }

    /// Returns the arguments map.
    #[must_use]
    pub const fn arguments(&self) -> &HashMap<String, serde_json::Value> {
        &self.arguments
    }
}

/// File content passed to the plugin in the request body.
///
/// Contains the path and the full text content of the file, so the
/// plugin does not need filesystem access.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilePayload {
    path: PathBuf,
    content: String,
}

impl FilePayload {
    /// Creates a file payload.
    #[must_use]
    pub fn new(path: PathBuf, content: impl Into<String>) -> Self {
        Self {
            path,
            content: content.into(),
        }
    }

    /// Returns the file path.
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the file content.
    #[must_use]
    pub const fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Response sent from the plugin to the host on stdout.
///
/// Serialised as a single JSONL line terminated by a newline character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginResponse {
    success: bool,
    output: PluginOutput,
    #[serde(default)]
    diagnostics: Vec<PluginDiagnostic>,
}

impl PluginResponse {
    /// Creates a successful response with the given output.
    #[must_use]
    pub const fn success(output: PluginOutput) -> Self {
        Self {
            success: true,
            output,
            diagnostics: Vec::new(),
        }
    }

    /// Creates a failed response with diagnostics.
    #[must_use]
    pub const fn failure(diagnostics: Vec<PluginDiagnostic>) -> Self {
        Self {
            success: false,
            output: PluginOutput::Empty,
            diagnostics,
        }
    }

    /// Returns whether the plugin completed successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the plugin output.
    #[must_use]
    pub const fn output(&self) -> &PluginOutput {
        &self.output
    }

    /// Returns the diagnostic messages.
    #[must_use]
    pub fn diagnostics(&self) -> &[PluginDiagnostic] {
        &self.diagnostics
    }
}

/// Output payload from the plugin.
///
/// The `kind` field acts as a discriminator for JSON serialisation so
/// the host can distinguish an action listing from a computed edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PluginOutput {
    /// The refactoring actions applicable at the requested target.
    Actions {
        /// Zero or more action descriptors; empty means no action is
        /// applicable, which is a normal negative result.
        actions: Vec<ActionInfo>,
    },
    /// The text edit computed for an applied action.
    Edit {
        /// Start byte offset of the replaced span.
        start: usize,
        /// End byte offset (exclusive) of the replaced span.
        end: usize,
        /// Replacement text.
        new_text: String,
    },
    /// Empty output (the action is no longer applicable).
    Empty,
}

/// A refactoring action descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionInfo {
    /// Stable action identifier.
    pub id: String,
    /// Human-readable title for the editor's action menu.
    pub title: String,
}

/// A diagnostic message emitted by the plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginDiagnostic {
    severity: DiagnosticSeverity,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<PathBuf>,
}

impl PluginDiagnostic {
    /// Creates a diagnostic with the given severity and message.
    #[must_use]
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: None,
        }
    }

    /// Attaches a file path to the diagnostic.
    #[must_use]
    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file = Some(path);
        self
    }

    /// Returns the severity level.
    #[must_use]
    pub const fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    /// Returns the message text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Severity level for plugin diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    /// A fatal error that prevented the plugin from completing.
    Error,
    /// A non-fatal warning.
    Warning,
    /// An informational message.
    Info,
}
