//! Fixed texts and the deterministic fallback.

use navigator_core::text::truncate_chars;

/// Returned on the crisis path in place of any generated content.
pub const CRISIS_MESSAGE: &str = "It sounds like you are going through something really painful right now. \
You are not alone.\n\n\
Please reach out for immediate help: contact your local emergency number, a crisis line, \
or someone you trust and tell them how you are feeling.";

/// Replaces a draft that contains a banned phrase.
pub const SAFE_MESSAGE: &str = "Based on what you shared, some patterns may be relevant.\n\n\
This tool does not provide diagnoses. Its purpose is to help you reflect on your experiences \
in a supportive way.\n\n\
If these concerns feel intense, persistent, or unsafe, seeking support from a qualified \
mental health professional or a trusted person is strongly recommended.";

/// Appended to a draft that never points toward human support.
pub const HELP_REMINDER: &str = "\n\nIf these experiences start to feel overwhelming or unsafe, \
reaching out to a mental health professional or a trusted person can be very helpful.";

pub const FALLBACK_EXCERPT_CHARS: usize = 300;

/// Build the response used when generation is unavailable.
///
/// The context excerpt is trimmed and cut to [`FALLBACK_EXCERPT_CHARS`];
/// the excerpt paragraph is left out entirely when nothing remains.
pub fn fallback(context: &str) -> String {
    let excerpt = truncate_chars(context.trim(), FALLBACK_EXCERPT_CHARS).trim_end();

    let mut message =
        String::from("Based on what you shared, there are some patterns that may be worth noticing.\n\n");

    if !excerpt.is_empty() {
        message.push_str("Here is something from our resources that may help:\n\n");
        message.push_str(excerpt);
        message.push_str("\n\n");
    }

    message.push_str(
        "Many people experience similar feelings, especially during times of stress or change. \
This is not a diagnosis.\n\n\
If these experiences feel overwhelming or unsafe, seeking human support from a trusted person \
or professional is important.\n\n\
Consider: What specific situations trigger these feelings? \
Are there times when you feel more at ease?",
    );

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_embeds_excerpt() {
        let text = fallback("  Keeping a regular wake time helps the body settle.  ");
        assert!(text.contains("\n\nKeeping a regular wake time helps the body settle.\n\n"));
        assert!(text.contains("This is not a diagnosis."));
        assert!(text.contains("human support"));
    }

    #[test]
    fn test_fallback_truncates_excerpt() {
        let context = "x".repeat(FALLBACK_EXCERPT_CHARS + 50);
        let text = fallback(&context);
        assert!(text.contains(&"x".repeat(FALLBACK_EXCERPT_CHARS)));
        assert!(!text.contains(&"x".repeat(FALLBACK_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn test_fallback_without_context() {
        let text = fallback("   ");
        assert!(!text.contains("from our resources"));
        assert!(text.starts_with("Based on what you shared"));
        assert!(text.ends_with("Are there times when you feel more at ease?"));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        assert_eq!(fallback("same"), fallback("same"));
    }

    #[test]
    fn test_crisis_message_is_supportive() {
        assert!(CRISIS_MESSAGE.contains("You are not alone."));
    }
}
