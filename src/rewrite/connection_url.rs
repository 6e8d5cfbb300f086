// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Connection URL editing.
//!
//! Connection URLs in channel exports carry the database name as the final
//! slash-delimited segment, typically something like
//! `jdbc:mysql://localhost:3306/mirthdb`. Deployment to another environment
//! only changes that final segment.

/// Replace the database name segment of a connection URL.
///
/// Splits on `/` and replaces the final segment with `new_db`. When the
/// original final segment ends with a single quote (the value was lifted
/// from quoted script text), the replacement keeps the trailing quote.
/// Every other segment (scheme, host, port) is preserved verbatim; no URL
/// validation is performed.
///
/// # Example
///
/// ```
/// use channelforge::rewrite::rewrite_database_name;
///
/// let url = rewrite_database_name("jdbc:mysql://localhost:3306/mirthdb", "warehouse");
/// assert_eq!(url, "jdbc:mysql://localhost:3306/warehouse");
/// ```
pub fn rewrite_database_name(url: &str, new_db: &str) -> String {
    match url.rsplit_once('/') {
        Some((head, last)) => {
            if last.ends_with('\'') {
                format!("{head}/{new_db}'")
            } else {
                format!("{head}/{new_db}")
            }
        }
        // No slash at all: the whole value is the database name.
        None => {
            if url.ends_with('\'') {
                format!("{new_db}'")
            } else {
                new_db.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_final_segment() {
        assert_eq!(
            rewrite_database_name("jdbc:mysql://localhost:3306/mirthdb", "warehouse"),
            "jdbc:mysql://localhost:3306/warehouse"
        );
    }

    #[test]
    fn test_preserves_trailing_quote() {
        assert_eq!(
            rewrite_database_name("jdbc:mysql://localhost:3306/olddb'", "newdb"),
            "jdbc:mysql://localhost:3306/newdb'"
        );
    }

    #[test]
    fn test_preserves_leading_quote() {
        assert_eq!(
            rewrite_database_name("'jdbc:mysql://localhost:3306/olddb'", "newdb"),
            "'jdbc:mysql://localhost:3306/newdb'"
        );
    }

    #[test]
    fn test_preserves_other_segments() {
        let url = "jdbc:postgresql://db.internal:5432/prod";
        let rewritten = rewrite_database_name(url, "test");
        assert_eq!(rewritten, "jdbc:postgresql://db.internal:5432/test");
        let head: Vec<&str> = rewritten.split('/').collect();
        assert_eq!(head[..head.len() - 1], url.split('/').collect::<Vec<_>>()[..head.len() - 1]);
    }

    #[test]
    fn test_no_slash_replaces_whole_value() {
        assert_eq!(rewrite_database_name("mirthdb", "warehouse"), "warehouse");
        assert_eq!(rewrite_database_name("mirthdb'", "warehouse"), "warehouse'");
    }

    #[test]
    fn test_garbage_in_garbage_out() {
        // No validation: any slash-bearing string gets its tail replaced.
        assert_eq!(rewrite_database_name("not a url/at all", "x"), "not a url/x");
    }

    #[test]
    fn test_idempotent() {
        let once = rewrite_database_name("jdbc:mysql://h:3306/a", "b");
        let twice = rewrite_database_name(&once, "b");
        assert_eq!(once, twice);
    }
}
