//! User-supplied text content
//!
//! Post and comment bodies are rendered by browsers, so they are cleaned
//! before they are stored or broadcast: `<script>` elements are dropped
//! together with their body and any remaining angle brackets are escaped.

/// Maximum length of a post or comment body (in characters, after sanitizing)
pub const MAX_CONTENT_LENGTH: usize = 5000;

const SCRIPT_OPEN: &str = "<script";
const SCRIPT_CLOSE: &str = "</script";

/// Strip script elements and escape markup in user content.
///
/// Matching is ASCII case-insensitive. An unterminated `<script` removes the
/// rest of the input. The result is trimmed.
pub fn sanitize_content(raw: &str) -> String {
    // ASCII lowercasing keeps byte offsets identical to `raw`
    let lower = raw.to_ascii_lowercase();
    let mut stripped = String::with_capacity(raw.len());
    let mut cursor = 0;

    while let Some(offset) = lower[cursor..].find(SCRIPT_OPEN) {
        let start = cursor + offset;
        stripped.push_str(&raw[cursor..start]);

        cursor = lower[start..]
            .find(SCRIPT_CLOSE)
            .and_then(|close| {
                let close_start = start + close;
                lower[close_start..].find('>').map(|gt| close_start + gt + 1)
            })
            .unwrap_or(raw.len());
    }
    stripped.push_str(&raw[cursor..]);

    escape_markup(stripped.trim())
}

fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
