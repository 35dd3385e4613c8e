pub const SYSTEM_INSTRUCTION: &str = "You are an assistant that turns chat messages into clear, \
contextualized summaries to be used as Jira tickets.";

pub fn build_prompt(message: &str, language: &str) -> String {
    format!(
        r#"The following message was posted in Discord:

"{message}"

Based only on this message, write:

1. **Title (up to 8 words):**
   - Clearly summarize the central subject.

2. **Context:**
   - Explain what motivated the message.
   - Say whether it reports a problem, a question, a suggestion or a request.
   - Include any implicit information that helps understand the scenario.

3. **Summary (Jira ticket format):**
   - Describe the goal of the message.
   - If there is a problem, explain it clearly.
   - If a solution is proposed, detail it.
   - Write so that any team member understands what must be done or discussed.

Be clear, technical and direct, with enough context for full understanding.
Answer in {language}."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_message_verbatim_and_language() {
        let prompt = build_prompt("Login returns 401 for inactive users", "English");
        assert!(prompt.contains("\"Login returns 401 for inactive users\""));
        assert!(prompt.ends_with("Answer in English."));
        assert!(prompt.contains("Title"));
        assert!(prompt.contains("Context"));
        assert!(prompt.contains("Summary"));
    }
}
