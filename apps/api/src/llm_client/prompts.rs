// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every prompt whose reply is parsed as a JSON object.
pub const JSON_OBJECT_INSTRUCTION: &str = "\
    Respond with a single JSON object that follows the schema above exactly. \
    Do not add keys that are not in the schema. \
    Do not include comments inside the JSON.";
