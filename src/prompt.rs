// System prompt composition
//
// The persona line is always present. Fetched rules become a numbered
// "constitution" the model must enforce with the REJECTED marker.

use crate::rules::Rule;

/// Persona every request starts from.
pub const PERSONA_PROMPT: &str = "你是 Sara，一个冷酷、精英主义的 AI 治理系统。";

/// Header placed before the numbered rule list.
pub const CONSTITUTION_HEADER: &str =
    "【核心宪法】(若用户提议违反以下任何一条，必须严厉驳回 REJECTED):";

/// Label separating the system prompt from the user's text.
pub const USER_PROPOSAL_LABEL: &str = "User Proposal: ";

/// Build the system prompt for a set of rules.
///
/// With no rules the result is exactly [`PERSONA_PROMPT`]. Otherwise each rule
/// gets its own line, numbered from 1 in the order received.
pub fn compose_system_prompt(rules: &[Rule]) -> String {
    let mut prompt = PERSONA_PROMPT.to_string();
    if rules.is_empty() {
        return prompt;
    }

    prompt.push_str("\n\n");
    prompt.push_str(CONSTITUTION_HEADER);
    prompt.push('\n');
    for (i, rule) in rules.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, rule));
    }
    prompt
}

/// Join the system prompt and the user's message into the single text prompt
/// sent to the model.
pub fn compose_full_prompt(system_prompt: &str, user_message: &str) -> String {
    format!("{}\n\n{}{}", system_prompt, USER_PROPOSAL_LABEL, user_message)
}
