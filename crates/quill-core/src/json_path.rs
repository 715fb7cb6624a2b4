//! JSON field extraction via pointers, with the fallback policy every
//! provider shares: try the documented path, hand back the raw body if
//! anything about the parse or lookup fails.

use serde_json::Value;

/// Pull the string at `pointer` (RFC 6901) out of a JSON body.
///
/// Returns `None` if the body isn't valid JSON, the path doesn't exist, or
/// the value at the path isn't a string.
pub fn string_at(body: &str, pointer: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.pointer(pointer)?.as_str().map(str::to_owned)
}

/// Resolve an error message: the string at `pointer` when the body parses
/// and carries one, the raw body text otherwise.
///
/// This never fails — a non-JSON or unexpectedly-shaped body simply comes
/// back verbatim.
pub fn message_or_raw(body: &str, pointer: &str) -> String {
    string_at(body, pointer).unwrap_or_else(|| body.to_string())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
