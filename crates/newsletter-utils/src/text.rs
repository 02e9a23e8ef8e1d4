//! Text helpers for model output
//!
//! Chat models asked for "JSON only" still like to wrap the payload in a
//! markdown code fence, sometimes with prose around it. These helpers peel
//! that wrapping off before the text reaches a JSON parser.

use regex::Regex;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[\w+-]*\s*(.*?)\s*```").expect("fenced block pattern is valid")
});

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[\w+-]*").expect("opening fence pattern is valid"));

/// Strip markdown code-fence markup surrounding a JSON payload
///
/// - Text containing a fenced block yields the first block's content, with
///   any language tag (```` ```json ````) and surrounding prose dropped.
/// - Text without fences is returned trimmed.
/// - An unterminated fence (opening or closing only) is stripped.
///
/// The result is not validated; the caller's parser decides whether it is JSON.
///
/// ```
/// use newsletter_utils::unwrap_fenced_json;
///
/// assert_eq!(unwrap_fenced_json("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
/// assert_eq!(unwrap_fenced_json("  {\"a\": 1} "), "{\"a\": 1}");
/// ```
pub fn unwrap_fenced_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(inner) = FENCED_BLOCK.captures(trimmed).and_then(|caps| caps.get(1)) {
        return inner.as_str().trim();
    }

    let without_opening = OPENING_FENCE
        .find(trimmed)
        .map_or(trimmed, |fence| &trimmed[fence.end()..]);

    without_opening
        .strip_suffix("```")
        .unwrap_or(without_opening)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_with_language_tag() {
        let text = "```json\n{\"metrics\": {\"revenue\": 100}}\n```";
        assert_eq!(unwrap_fenced_json(text), "{\"metrics\": {\"revenue\": 100}}");
    }

    #[test]
    fn test_fenced_without_language_tag() {
        let text = "```\n[1, 2, 3]\n```";
        assert_eq!(unwrap_fenced_json(text), "[1, 2, 3]");
    }

    #[test]
    fn test_uppercase_tag_and_crlf() {
        let text = "```JSON\r\n{\"a\": true}\r\n```";
        assert_eq!(unwrap_fenced_json(text), "{\"a\": true}");
    }

    #[test]
    fn test_unfenced_is_trimmed() {
        assert_eq!(unwrap_fenced_json("\n  {\"a\": 1}  \n"), "{\"a\": 1}");
    }

    #[test]
    fn test_prose_around_fence() {
        let text = "Here is the data you asked for:\n```json\n{\"a\": 1}\n```\nLet me know if you need more.";
        assert_eq!(unwrap_fenced_json(text), "{\"a\": 1}");
    }

    #[test]
    fn test_first_block_wins() {
        let text = "```json\n{\"first\": 1}\n```\n```json\n{\"second\": 2}\n```";
        assert_eq!(unwrap_fenced_json(text), "{\"first\": 1}");
    }

    #[test]
    fn test_unterminated_opening_fence() {
        let text = "```json\n{\"a\": 1}";
        assert_eq!(unwrap_fenced_json(text), "{\"a\": 1}");
    }

    #[test]
    fn test_dangling_closing_fence() {
        let text = "{\"a\": 1}\n```";
        assert_eq!(unwrap_fenced_json(text), "{\"a\": 1}");
    }

    #[test]
    fn test_malformed_content_passes_through() {
        let text = "```json\nthis is not json\n```";
        assert_eq!(unwrap_fenced_json(text), "this is not json");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(unwrap_fenced_json(""), "");
        assert_eq!(unwrap_fenced_json("``````"), "");
    }
}
