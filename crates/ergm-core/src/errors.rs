//! Structured error types shared across ERGM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`ErgmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (node ids, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the ERGM engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum ErgmError {
    /// Precondition violations on the graph store (malformed dyads, wrong graph kind).
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Invalid zone, term or attribute metadata detected at load time.
    #[error("metadata error: {0}")]
    Metadata(ErrorInfo),
    /// Statistic registry and parameter vector mismatches.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Recoverable degenerate sampler states.
    #[error("sampler error: {0}")]
    Sampler(ErrorInfo),
    /// Configuration parsing and validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl ErgmError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            ErgmError::Graph(info)
            | ErgmError::Metadata(info)
            | ErgmError::Model(info)
            | ErgmError::Sampler(info)
            | ErgmError::Config(info) => info,
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Whether the caller may retry or continue after this error.
    ///
    /// Only degenerate sampler states are recoverable; everything else
    /// indicates a programming or data error that must abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErgmError::Sampler(_))
    }

    /// Adds a context entry to the wrapped payload.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        self.map_info(|info| info.with_context(key, value))
    }

    /// Attaches a remediation hint to the wrapped payload.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        self.map_info(|info| info.with_hint(hint))
    }

    fn map_info(self, f: impl FnOnce(ErrorInfo) -> ErrorInfo) -> Self {
        match self {
            ErgmError::Graph(info) => ErgmError::Graph(f(info)),
            ErgmError::Metadata(info) => ErgmError::Metadata(f(info)),
            ErgmError::Model(info) => ErgmError::Model(f(info)),
            ErgmError::Sampler(info) => ErgmError::Sampler(f(info)),
            ErgmError::Config(info) => ErgmError::Config(f(info)),
        }
    }
}

/// Shorthand for a graph precondition error.
pub fn graph_error(code: impl Into<String>, message: impl Into<String>) -> ErgmError {
    ErgmError::Graph(ErrorInfo::new(code, message))
}

/// Shorthand for a metadata (data) error.
pub fn metadata_error(code: impl Into<String>, message: impl Into<String>) -> ErgmError {
    ErgmError::Metadata(ErrorInfo::new(code, message))
}

/// Shorthand for a model error.
pub fn model_error(code: impl Into<String>, message: impl Into<String>) -> ErgmError {
    ErgmError::Model(ErrorInfo::new(code, message))
}

/// Shorthand for a sampler error.
pub fn sampler_error(code: impl Into<String>, message: impl Into<String>) -> ErgmError {
    ErgmError::Sampler(ErrorInfo::new(code, message))
}

/// Shorthand for a configuration error.
pub fn config_error(code: impl Into<String>, message: impl Into<String>) -> ErgmError {
    ErgmError::Config(ErrorInfo::new(code, message))
}
