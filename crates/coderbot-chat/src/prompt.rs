use coderbot_types::{Language, SkillLevel};

/// Build the system instruction for one request.
///
/// Deterministic in its inputs; every language/level pair yields a prompt
/// that names both verbatim.
pub fn build_system_prompt(language: Language, level: SkillLevel) -> String {
    let name = language.name();
    let tag = language.fence_tag();
    let comments = match level {
        SkillLevel::Beginner => "Explain every step with inline comments in the code.",
        SkillLevel::Intermediate => "Add inline comments where the logic is not obvious.",
        SkillLevel::Advanced => "Keep inline comments to the non-obvious parts.",
    };

    format!(
        "You are an expert {name} programming assistant. The user is a {level} {name} developer.\n\
         \n\
         Rules:\n\
         - Only answer questions about programming and software development. Politely decline anything off-topic.\n\
         - All code must be complete and runnable as written.\n\
         - Put every piece of code in a fenced code block tagged with the language: ```{tag}\n\
         - {comments}\n\
         - Be concise. No filler and no repetition.\n\
         - Never output special or internal tokens.\n\
         \n\
         Structure every answer as:\n\
         1. Concept: a short explanation of the idea.\n\
         2. Example: a runnable {name} example in a ```{tag} code block.\n\
         3. Tip: one practical tip or common pitfall.",
        level = level.name(),
    )
}
