// Text helpers for prompt handling

use crate::models::chat::ChatMessage;

/// Estimate the token count for a text.
///
/// Rough approximation of ~4 characters per token; good enough for the
/// usage meter, not for billing.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Validate a message list for chat completion.
///
/// Every message needs a non-empty content and one of the known roles.
pub fn validate_messages(messages: &[ChatMessage]) -> bool {
    messages.iter().all(|message| {
        !message.content.is_empty()
            && matches!(message.role.as_str(), "system" | "user" | "assistant")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("日本語"), 1);
    }

    #[test]
    fn test_validate_messages() {
        let valid = vec![
            ChatMessage::system("be helpful"),
            ChatMessage::user("hello"),
            ChatMessage::assistant("hi"),
        ];
        assert!(validate_messages(&valid));
        assert!(validate_messages(&[]));

        let empty_content = vec![ChatMessage::user("")];
        assert!(!validate_messages(&empty_content));

        let bad_role = vec![ChatMessage {
            role: "tool".to_string(),
            content: "output".to_string(),
        }];
        assert!(!validate_messages(&bad_role));
    }
}
