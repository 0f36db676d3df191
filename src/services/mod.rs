//! Stateless request/response mapping, one module per remote resource family.
//!
//! Each function takes the [`Transport`](crate::Transport) explicitly, issues one
//! call and returns the decoded payload untouched. Errors are never caught here;
//! classifying them is the job of the resource contexts.

pub mod album;
pub mod artist;
pub mod auth;
pub mod profile;
pub mod search;
pub mod track;

/// Percent-encode an identifier for use as a single path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
