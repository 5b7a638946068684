//! Session identifier extraction from the page query string.
//!
//! The viewer page is opened as `viewer.html?id=<identifier>`.  The identifier
//! keys the thumbnail store, so it must decode to exactly the string the
//! session picker used when it built the link.

/// Name of the query parameter carrying the session identifier.
pub const SESSION_ID_PARAM: &str = "id";

/// Returns the percent-decoded value of the `id` parameter in `query`.
///
/// A leading `?` is optional.  Returns an empty string if the parameter is
/// absent.  Malformed escapes are kept literally rather than rejected, and `+`
/// is not treated as a space.
pub fn session_id_from_query(query: &str) -> String {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .find_map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (name == SESSION_ID_PARAM).then(|| percent_decode(value))
        })
        .unwrap_or_default()
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
