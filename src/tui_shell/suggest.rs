use super::CommandDef;

pub(super) fn score_match(q: &str, candidate: &str) -> i32 {
    let q = q.to_lowercase();
    let c = candidate.to_lowercase();
    if c == q {
        return 100;
    }
    if c.starts_with(&q) {
        return 50 - (c.len() as i32 - q.len() as i32);
    }
    if c.contains(&q) {
        return 10;
    }
    0
}

/// Best score over a command's name and aliases.
pub(super) fn score_command(q: &str, def: &CommandDef) -> i32 {
    std::iter::once(def.name)
        .chain(def.aliases.iter().copied())
        .map(|c| score_match(q, c))
        .max()
        .unwrap_or(0)
}

/// Highest score first, then by name.
pub(super) fn sort_scored_suggestions(scored: &mut [(i32, CommandDef)]) {
    scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| a.name.cmp(b.name)));
}

#[cfg(test)]
#[path = "../tests/tui_shell/suggest_tests.rs"]
mod tests;
