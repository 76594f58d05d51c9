//! Employee id helpers.
//!
//! Ids are opaque strings to the store. The transport layer uses
//! [`is_numeric_id`] only to flag unusual ids in logs.

/// Returns `true` if `id` is a non-empty run of ASCII digits.
#[must_use]
pub fn is_numeric_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}
