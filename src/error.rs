// src/error.rs
//! Unified error handling for adaptive-lab
//!
//! Every fallible operation in the crate returns [`LabResult`]. Errors carry an
//! [`ErrorContext`] naming the component and operation that failed so the
//! surrounding UI layer can translate them into user-facing messages. None of
//! these errors is fatal: retrying with corrected input always succeeds.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::processing::filters::TapRole;

/// Unified error type for the entire crate
#[derive(Debug, Error)]
pub enum LabError {
    /// Tap index outside the current group length
    #[error("[RANGE] {role} tap index {index} out of range for {len} taps ({context})")]
    OutOfRange {
        role: TapRole,
        index: usize,
        len: usize,
        context: ErrorContext,
    },

    /// Two sequences that must run in parallel have different lengths
    #[error("[SHAPE] {what}: expected length {expected}, got {actual} ({context})")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
        context: ErrorContext,
    },

    /// A normalization segment has a near-zero peak and was floored
    #[error("[NORMALIZE] segment {segment} has near-zero peak {max_abs:e} ({context})")]
    DegenerateNormalization {
        segment: usize,
        max_abs: f64,
        context: ErrorContext,
    },

    /// A persisted filter or signal payload violates its documented shape
    #[error("[DATA] malformed {format}{}: {reason} ({context})", line_suffix(.line))]
    MalformedPersistedData {
        format: PersistedFormat,
        reason: String,
        line: Option<usize>,
        context: ErrorContext,
    },

    /// Caller supplied a parameter outside its valid domain
    #[error("[PARAM] invalid {name}: {reason} ({context})")]
    InvalidParameter {
        name: String,
        reason: String,
        context: ErrorContext,
    },

    /// Configuration could not be parsed or failed validation
    #[error("[CONFIG] {reason} ({context})")]
    Configuration {
        reason: String,
        context: ErrorContext,
    },

    /// Filesystem failure while reading or writing a payload
    #[error("[IO] {reason} ({context})")]
    Io {
        reason: String,
        #[source]
        source: std::io::Error,
        context: ErrorContext,
    },
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}

/// Persisted payload kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistedFormat {
    FilterJson,
    SignalText,
}

impl fmt::Display for PersistedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistedFormat::FilterJson => write!(f, "filter JSON"),
            PersistedFormat::SignalText => write!(f, "signal text"),
        }
    }
}

/// Where an error happened
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
    pub additional_info: HashMap<String, String>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            file: None,
            line: None,
            additional_info: HashMap::new(),
        }
    }

    /// Create error context with file and line information
    pub fn with_location(component: &str, operation: &str, file: &'static str, line: u32) -> Self {
        let mut context = Self::new(component, operation);
        context.file = Some(file);
        context.line = Some(line);
        context
    }

    /// Add additional information to the context
    pub fn add_info<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.additional_info.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.component, self.operation)?;
        if let (Some(file), Some(line)) = (self.file, self.line) {
            write!(f, " at {}:{}", file, line)?;
        }
        Ok(())
    }
}

/// Macro for creating error context with file and line info
#[macro_export]
macro_rules! error_context {
    ($component:expr, $operation:expr) => {
        $crate::error::ErrorContext::with_location($component, $operation, file!(), line!())
    };
}

/// Result type alias for crate operations
pub type LabResult<T> = Result<T, LabError>;

impl LabError {
    /// Context attached to this error
    pub fn context(&self) -> &ErrorContext {
        match self {
            LabError::OutOfRange { context, .. }
            | LabError::ShapeMismatch { context, .. }
            | LabError::DegenerateNormalization { context, .. }
            | LabError::MalformedPersistedData { context, .. }
            | LabError::InvalidParameter { context, .. }
            | LabError::Configuration { context, .. }
            | LabError::Io { context, .. } => context,
        }
    }
}

impl From<std::io::Error> for LabError {
    fn from(err: std::io::Error) -> Self {
        LabError::Io {
            reason: err.to_string(),
            source: err,
            context: error_context!("io", "file_operation"),
        }
    }
}

impl From<serde_json::Error> for LabError {
    fn from(err: serde_json::Error) -> Self {
        LabError::MalformedPersistedData {
            format: PersistedFormat::FilterJson,
            reason: err.to_string(),
            line: Some(err.line()).filter(|&line| line > 0),
            context: error_context!("persistence", "decode_filter"),
        }
    }
}

impl From<toml::de::Error> for LabError {
    fn from(err: toml::de::Error) -> Self {
        LabError::Configuration {
            reason: err.to_string(),
            context: error_context!("config", "parse"),
        }
    }
}

/// Error builder for convenient error construction
pub struct LabErrorBuilder {
    context: ErrorContext,
}

impl LabErrorBuilder {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            context: ErrorContext::new(component, operation),
        }
    }

    /// Attach a key/value pair to the built error's context
    pub fn with_info<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.context = self.context.add_info(key, value);
        self
    }

    fn context(&self) -> ErrorContext {
        self.context.clone()
    }

    pub fn out_of_range(self, role: TapRole, index: usize, len: usize) -> LabError {
        LabError::OutOfRange {
            role,
            index,
            len,
            context: self.context(),
        }
    }

    pub fn shape_mismatch(self, what: &str, expected: usize, actual: usize) -> LabError {
        LabError::ShapeMismatch {
            what: what.to_string(),
            expected,
            actual,
            context: self.context(),
        }
    }

    pub fn degenerate_normalization(self, segment: usize, max_abs: f64) -> LabError {
        LabError::DegenerateNormalization {
            segment,
            max_abs,
            context: self.context(),
        }
    }

    pub fn malformed(self, format: PersistedFormat, reason: &str, line: Option<usize>) -> LabError {
        LabError::MalformedPersistedData {
            format,
            reason: reason.to_string(),
            line,
            context: self.context(),
        }
    }

    pub fn invalid_parameter(self, name: &str, reason: &str) -> LabError {
        LabError::InvalidParameter {
            name: name.to_string(),
            reason: reason.to_string(),
            context: self.context(),
        }
    }

    pub fn configuration(self, reason: &str) -> LabError {
        LabError::Configuration {
            reason: reason.to_string(),
            context: self.context(),
        }
    }

    pub fn io(self, source: std::io::Error) -> LabError {
        LabError::Io {
            reason: source.to_string(),
            source,
            context: self.context(),
        }
    }
}
