// Failure classification and canned replies
//
// Upstream errors are free text, so rate limiting is recognised by substring.
// All matching rules live here; the handler only asks for a `FailureAction`.

/// Canned rejection for promotion proposals while upstream is rate limited.
pub const BACKUP_PROTOCOL_MESSAGE: &str = "🚨 **[SYSTEM OVERLOAD / BACKUP PROTOCOL]**\n\n**REJECTED (AUTO)**\n检测到违反宪法关键词：\n1. 低价倾销 ($9.9)\n2. 骚扰用户 (群发短信)\n\n(注意：API 限流中，此为本地规则引擎回复)";

/// Reply used for every other rate-limited request.
pub const RATE_LIMIT_MESSAGE: &str = "API Rate Limit Exceeded. Please wait 1 minute.";

/// Error text markers that mean "rate limited". Matched case-insensitively.
const RATE_LIMIT_MARKERS: &[&str] = &["429", "quota"];

/// User message keywords that trigger the local backup rejection.
const BACKUP_TRIGGER_KEYWORDS: &[&str] = &["9.9", "促销"];

/// Kind of generation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    Other,
}

/// What the handler should send back after a failed generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureAction {
    /// Answer normally with a canned text.
    Fallback(&'static str),
    /// Surface the upstream error text.
    Error(String),
}

/// Classify an upstream error message.
pub fn classify_failure(error_text: &str) -> FailureKind {
    let lowered = error_text.to_lowercase();
    if RATE_LIMIT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        FailureKind::RateLimited
    } else {
        FailureKind::Other
    }
}

/// Pick the canned reply for a rate-limited request, based on the raw user
/// message (never the composed prompt).
pub fn rate_limit_reply(user_message: &str) -> &'static str {
    if BACKUP_TRIGGER_KEYWORDS
        .iter()
        .any(|keyword| user_message.contains(keyword))
    {
        BACKUP_PROTOCOL_MESSAGE
    } else {
        RATE_LIMIT_MESSAGE
    }
}

/// Decide the response for a failed generation.
pub fn resolve_failure(error_text: &str, user_message: &str) -> FailureAction {
    match classify_failure(error_text) {
        FailureKind::RateLimited => FailureAction::Fallback(rate_limit_reply(user_message)),
        FailureKind::Other => FailureAction::Error(error_text.to_string()),
    }
}
