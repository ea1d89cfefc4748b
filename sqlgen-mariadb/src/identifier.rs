//! Identifier quoting, literal escaping and the identifier length policy.
//!
//! MariaDB rejects identifiers longer than [`MAX_IDENTIFIER_LEN`] characters.
//! Generated names (constraints, indexes, triggers) that would exceed it are
//! shortened by [`wrap_name`]: the first [`WRAPPED_PREFIX_LEN`] characters are
//! kept and a digest of the full name is appended, so the result is always
//! exactly the limit and two names sharing a prefix stay distinct.

use std::borrow::Cow;

use sha2::{Digest, Sha256};

/// Longest identifier MariaDB accepts.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Characters of the original name kept by [`wrap_name`].
pub const WRAPPED_PREFIX_LEN: usize = 32;

/// Hex characters of the digest appended by [`wrap_name`].
pub const DIGEST_LEN: usize = MAX_IDENTIFIER_LEN - WRAPPED_PREFIX_LEN;

/// Shorten a generated identifier that exceeds [`MAX_IDENTIFIER_LEN`].
///
/// Names within the limit are returned unchanged.
pub fn wrap_name(name: &str) -> Cow<'_, str> {
    if name.chars().count() <= MAX_IDENTIFIER_LEN {
        return Cow::Borrowed(name);
    }

    let mut wrapped: String = name.chars().take(WRAPPED_PREFIX_LEN).collect();
    wrapped.push_str(&name_digest(name));

    tracing::debug!(original = name, wrapped = %wrapped, "identifier exceeds length limit");
    Cow::Owned(wrapped)
}

/// Fixed-length hex digest of an identifier.
pub fn name_digest(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(DIGEST_LEN);
    digest
}

/// Wrap an identifier in backticks.
pub fn quote(name: &str) -> String {
    format!("`{name}`")
}

/// `` `database`.`name` ``
pub fn qualified(database: &str, name: &str) -> String {
    format!("`{database}`.`{name}`")
}

/// Escape a single-quoted string literal body.
pub fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
