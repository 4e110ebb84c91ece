/// Control tokens of the CodeGemma family that must never reach the user
pub const CONTROL_TOKENS: &[&str] = &[
    "<|fim_prefix|>",
    "<|fim_suffix|>",
    "<|fim_middle|>",
    "<|file_separator|>",
    "<start_of_turn>",
    "<end_of_turn>",
    "<eos>",
    "<bos>",
];

/// Remove every control token from `text`.
///
/// Repeats until nothing changes, so a token that only forms once another
/// one is cut out (`<eo<eos>s>`) is removed too and the result is stable.
pub fn sanitize(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        let before = out.len();
        for token in CONTROL_TOKENS {
            if out.contains(token) {
                out = out.replace(token, "");
            }
        }
        if out.len() == before {
            return out;
        }
    }
}
