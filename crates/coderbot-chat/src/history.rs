use coderbot_types::Turn;

/// Most recent `max_pairs` exchanges of `log`, oldest first.
///
/// System turns are dropped before counting. Call this before the new user
/// turn is appended, otherwise it ends up in the window twice.
pub fn trim(log: &[Turn], max_pairs: usize) -> Vec<Turn> {
    let eligible: Vec<&Turn> = log
        .iter()
        .filter(|turn| turn.role().is_conversational())
        .collect();
    let start = eligible.len().saturating_sub(max_pairs.saturating_mul(2));
    eligible[start..].iter().map(|turn| (*turn).clone()).collect()
}
