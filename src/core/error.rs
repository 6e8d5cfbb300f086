// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for channelforge.
//!
//! Provides error types for channel transformation operations:
//! - Document parsing and structural assumptions
//! - Embedded script call rewriting
//! - Configuration and file I/O

use std::fmt;

/// Errors that can occur during channel transformation operations.
#[derive(Debug, Clone)]
pub enum ChannelError {
    /// Malformed channel document
    Parse {
        /// What was being parsed
        context: String,
        /// Error message
        message: String,
    },

    /// A required structural path did not resolve to exactly one node
    Structural {
        /// Structural path that was queried
        path: String,
        /// Number of nodes the path resolved to
        found: usize,
    },

    /// Embedded script body does not match the expected call shape
    MalformedScript {
        /// Why the script body could not be rewritten
        reason: String,
    },

    /// Nested parentheses inside the factory call's argument list
    NestedCall {
        /// The call-site marker token
        marker: String,
    },

    /// More than one factory call in a single script body
    MultipleCall {
        /// The call-site marker token
        marker: String,
    },

    /// Invalid or unreadable configuration
    Config {
        /// Configuration source (file path or section)
        source: String,
        /// Error message
        message: String,
    },

    /// File or process I/O error
    Io {
        /// Error message
        message: String,
    },
}

impl ChannelError {
    /// Create a parse error.
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        ChannelError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a structural assumption error.
    pub fn structural(path: impl Into<String>, found: usize) -> Self {
        ChannelError::Structural {
            path: path.into(),
            found,
        }
    }

    /// Create a malformed script error.
    pub fn malformed_script(reason: impl Into<String>) -> Self {
        ChannelError::MalformedScript {
            reason: reason.into(),
        }
    }

    /// Create a nested call error.
    pub fn nested_call(marker: impl Into<String>) -> Self {
        ChannelError::NestedCall {
            marker: marker.into(),
        }
    }

    /// Create a multiple call error.
    pub fn multiple_call(marker: impl Into<String>) -> Self {
        ChannelError::MultipleCall {
            marker: marker.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(source: impl Into<String>, message: impl Into<String>) -> Self {
        ChannelError::Config {
            source: source.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        ChannelError::Io {
            message: message.into(),
        }
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Parse { context, message } => {
                write!(f, "Parse error in {context}: {message}")
            }
            ChannelError::Structural { path, found } => {
                write!(
                    f,
                    "Structural assumption violated: expected exactly one node at '{path}', found {found}"
                )
            }
            ChannelError::MalformedScript { reason } => {
                write!(f, "Malformed script body: {reason}")
            }
            ChannelError::NestedCall { marker } => {
                write!(f, "Nested parens in '{marker}()' not supported")
            }
            ChannelError::MultipleCall { marker } => {
                write!(f, "Multiple calls to '{marker}()' not supported")
            }
            ChannelError::Config { source, message } => {
                write!(f, "Configuration error in {source}: {message}")
            }
            ChannelError::Io { message } => write!(f, "I/O error: {message}"),
        }
    }
}

impl std::error::Error for ChannelError {}

impl From<std::io::Error> for ChannelError {
    fn from(err: std::io::Error) -> Self {
        ChannelError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for channelforge operations.
pub type Result<T> = std::result::Result<T, ChannelError>;
