//! Text cleanup for matched fragments

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Named entities decoded by [`normalize_text`], applied in this order.
pub const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&aacute;", "á"),
    ("&eacute;", "é"),
    ("&iacute;", "í"),
    ("&oacute;", "ó"),
    ("&uacute;", "ú"),
    ("&ntilde;", "ñ"),
];

/// Strip leftover tags, decode [`HTML_ENTITIES`] and collapse whitespace.
///
/// Tags are replaced by a space so adjacent words stay separated; entities
/// are decoded after tag removal, so `&lt;b&gt;` comes out as a literal `<b>`.
/// Empty or whitespace-only input yields an empty string.
pub fn normalize_text(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let mut text = TAG_RE.replace_all(raw, " ").into_owned();
    for (entity, literal) in HTML_ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, literal);
        }
    }

    WS_RE.replace_all(&text, " ").trim().to_string()
}

/// Decode a downloaded page as UTF-8, dropping any invalid byte sequences.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()),
    }
}
