//! HTTP status categorization for IndexNow responses.
//!
//! IndexNow engines answer with a small, documented set of status codes. This
//! module maps them to messages that explain what went wrong with a batch.

/// Returns true for any 2xx status.
///
/// Both `200 OK` and `202 Accepted` count as a successful submission; 202
/// only means the engine has not finished validating the key yet.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Describes an IndexNow response status.
pub fn describe_status(status: u16) -> &'static str {
    match status {
        200 => "URLs submitted successfully",
        202 => "URLs received, key validation pending",
        400 => "bad request, invalid format",
        403 => "forbidden, key not valid (key not found or file found but key not in the file)",
        422 => "unprocessable entity, URLs don't belong to the host or the key is not matching the schema",
        429 => "too many requests, potential spam",
        s if (200..300).contains(&s) => "request accepted",
        s if (400..500).contains(&s) => "request rejected by the engine",
        s if (500..600).contains(&s) => "engine server error",
        _ => "unexpected response status",
    }
}
