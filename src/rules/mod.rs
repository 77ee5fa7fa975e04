// Governance rules
//
// Rules are free-text statements kept in a Supabase table. They are fetched
// per request and folded into the system prompt; the relay works without them.

mod fetcher;

pub use fetcher::{FetchError, RuleFetcher};

/// A single governance statement.
pub type Rule = String;
