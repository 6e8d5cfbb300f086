// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Channelforge
//!
//! Channel deployment toolkit for integration-engine exports.
//!
//! Integration channels are exported as XML and carry their environment
//! baked in: database names, credentials, and filesystem paths, some of them
//! embedded as string literals inside serialized script bodies. This library
//! rewrites those fields so one set of channel definitions can be deployed
//! to test and production alike, without touching processing logic.
//!
//! The library is organized by concern:
//! - **Document model** in [`document`] - arena tree with structural path
//!   queries, event-based parse and stable serialization
//! - **Rewriting engine** in [`rewrite`] - transfer agents, connection URL
//!   and embedded-call editing, end-to-end transform orchestration
//! - **Configuration** in [`config`] - TOML settings feeding the rewrite
//!   context
//! - **Admin shell** in [`shell`] - script generation and execution for the
//!   engine's scriptable deployment tool
//!
//! ## Example: transforming one export
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use channelforge::rewrite::{RewriteContext, TransformManager};
//!
//! let context = RewriteContext {
//!     database: "warehouse".into(),
//!     user: "deploy".into(),
//!     password: "secret".into(),
//!     input_dir: "/var/mirth/in".into(),
//!     output_dir: "/var/mirth/out".into(),
//!     error_dir: "/var/mirth/err".into(),
//! };
//! let manager = TransformManager::with_context(context);
//! let written = manager.run("exports/channel.xml".as_ref(), "deploy/".as_ref())?;
//! println!("wrote new channel export: {}", written.display());
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{ChannelError, Result};

// Channel document tree model
pub mod document;

pub use document::{ChannelDocument, NodeId};

// Rewriting engine
pub mod rewrite;

pub use rewrite::{
    rewrite_connection_call, rewrite_database_name, select_agent, transform_channels,
    CommonTransferAgent, HttpReceiverTransferAgent, RewriteContext, TransferAgent,
    TransformManager, CHANNEL_ROSTER, CONNECTION_CALL_MARKER, HTTP_RECEIVER_CHANNEL,
};

// Configuration file handling
pub mod config;

pub use config::Settings;

// Admin shell interface
pub mod shell;

pub use shell::MirthShell;
