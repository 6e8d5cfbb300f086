// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Embedded factory-call rewriting.
//!
//! Channel scripts open database connections through a factory call whose
//! arguments hardcode the environment:
//!
//! ```text
//! DatabaseConnectionFactory.createDatabaseConnection(
//!     'com.mysql.jdbc.Driver',
//!     'jdbc:mysql://localhost:3306/dbName','theUser',
//!     'thePassword');
//! ```
//!
//! This module rewrites the URL, user, and password arguments of that call
//! inside an otherwise opaque script body. It is positional text surgery,
//! not a script parser: the call site is located by its marker token and its
//! parenthesised argument span, the span is comma-split into positional
//! arguments, and everything outside the span is preserved byte-for-byte.
//!
//! The narrow contract is deliberate. A snippet with nested parentheses
//! inside the argument list, or with more than one call to the factory, is
//! rejected rather than guessed at. Commas inside quoted argument values are
//! not understood and shift the positional slots; callers own that caveat.

use super::connection_url::rewrite_database_name;
use crate::core::{ChannelError, Result};

/// Marker token identifying the factory call inside a script body.
pub const CONNECTION_CALL_MARKER: &str = "createDatabaseConnection";

/// The located span of one factory call within a script body.
///
/// Transient: derived during a rewrite, never persisted.
struct ConnectionCallSite<'a> {
    /// Everything up to and including the opening parenthesis
    head: &'a str,
    /// Comma-split positional arguments (driver, url, user, password, ...)
    args: Vec<&'a str>,
    /// Everything from the closing parenthesis onward
    tail: &'a str,
}

impl<'a> ConnectionCallSite<'a> {
    /// Locate the single factory call in `text`.
    fn locate(text: &'a str) -> Result<Self> {
        let marker_pos = text.find(CONNECTION_CALL_MARKER).ok_or_else(|| {
            ChannelError::malformed_script(format!(
                "'{CONNECTION_CALL_MARKER}' not found in script body"
            ))
        })?;

        let params_end = text[marker_pos..]
            .find(')')
            .map(|i| marker_pos + i)
            .ok_or_else(|| {
                ChannelError::malformed_script(format!(
                    "no closing parenthesis after '{CONNECTION_CALL_MARKER}'"
                ))
            })?;

        if text[marker_pos..params_end].matches('(').count() != 1 {
            return Err(ChannelError::nested_call(CONNECTION_CALL_MARKER));
        }
        if text[params_end..].contains(CONNECTION_CALL_MARKER) {
            return Err(ChannelError::multiple_call(CONNECTION_CALL_MARKER));
        }

        // The count check above guarantees exactly one '(' in this range.
        let params_start = text[marker_pos..]
            .find('(')
            .map(|i| marker_pos + i)
            .ok_or_else(|| {
                ChannelError::malformed_script(format!(
                    "no opening parenthesis after '{CONNECTION_CALL_MARKER}'"
                ))
            })?;

        let args: Vec<&str> = text[params_start + 1..params_end].split(',').collect();
        if args.len() < 4 {
            return Err(ChannelError::malformed_script(format!(
                "expected 4 arguments to '{CONNECTION_CALL_MARKER}', found {}",
                args.len()
            )));
        }

        Ok(ConnectionCallSite {
            head: &text[..params_start + 1],
            args,
            tail: &text[params_end..],
        })
    }
}

/// Rewrite the connection arguments of the factory call in a script body.
///
/// The URL argument has its database segment replaced with `database`; the
/// user and password arguments are replaced outright and re-wrapped in
/// single quotes. All text before the call's opening parenthesis and from
/// its closing parenthesis onward is preserved byte-for-byte.
///
/// Callers check for [`CONNECTION_CALL_MARKER`] before invoking; an absent
/// marker here is still an error rather than a silent no-op.
///
/// # Errors
///
/// - [`ChannelError::NestedCall`] when an extra `(` appears inside the
///   argument list.
/// - [`ChannelError::MultipleCall`] when the marker reappears after the
///   call's closing parenthesis.
/// - [`ChannelError::MalformedScript`] when the marker or its parentheses
///   are missing, or fewer than 4 arguments are present.
pub fn rewrite_connection_call(
    snippet: &str,
    database: &str,
    user: &str,
    password: &str,
) -> Result<String> {
    let site = ConnectionCallSite::locate(snippet)?;

    let mut args: Vec<String> = site.args.iter().map(|a| a.to_string()).collect();
    args[1] = rewrite_database_name(&args[1], database);
    args[2] = format!("'{user}'");
    args[3] = format!("'{password}'");

    Ok(format!("{}{}{}", site.head, args.join(","), site.tail))
}
