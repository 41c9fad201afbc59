//! Fuzzy resolution of a user token against a candidate set.
//!
//! Rules apply in strict priority order:
//!
//! 1. **Exact**: the token is literally a candidate.
//! 2. **Substring**: candidates containing the token. One hit is a match,
//!    several are ambiguous (never broken by similarity).
//! 3. **Similarity**: only when no candidate contains the token. Jaro-Winkler
//!    scores at or above [`SIMILARITY_THRESHOLD`] qualify; a strictly best
//!    score wins, a tie at the top is ambiguous.
//!
//! No case folding or trimming is applied to either side.

/// Minimum Jaro-Winkler score for a candidate to qualify in the similarity pass.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Result of resolving a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The token is literally one of the candidates.
    Exact(String),
    /// A single candidate matched by substring or similarity.
    Single(String),
    /// Several candidates matched equally well, in candidate order.
    Ambiguous(Vec<String>),
    /// Nothing matched.
    None,
}

impl MatchOutcome {
    /// The resolved name for `Exact` and `Single` outcomes.
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchOutcome::Exact(name) | MatchOutcome::Single(name) => Some(name),
            MatchOutcome::Ambiguous(_) | MatchOutcome::None => None,
        }
    }
}

/// Resolve `token` against `candidates`.
pub fn resolve<S: AsRef<str>>(token: &str, candidates: &[S]) -> MatchOutcome {
    let candidates: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();

    if candidates.contains(&token) {
        return MatchOutcome::Exact(token.to_string());
    }

    let containing: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|c| c.contains(token))
        .collect();
    match containing.as_slice() {
        [] => {}
        [only] => return MatchOutcome::Single(only.to_string()),
        many => return MatchOutcome::Ambiguous(many.iter().map(|s| s.to_string()).collect()),
    }

    resolve_by_similarity(token, &candidates)
}

fn resolve_by_similarity(token: &str, candidates: &[&str]) -> MatchOutcome {
    let qualifying: Vec<(&str, f64)> = candidates
        .iter()
        .map(|c| (*c, strsim::jaro_winkler(token, c)))
        .filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
        .collect();
    log::debug!("similarity candidates for {token:?}: {qualifying:?}");

    if qualifying.is_empty() {
        return MatchOutcome::None;
    }
    if let [(only, _)] = qualifying.as_slice() {
        return MatchOutcome::Single(only.to_string());
    }

    let mut scores: Vec<f64> = qualifying.iter().map(|(_, s)| *s).collect();
    scores.sort_by(|a, b| b.total_cmp(a));
    let (best, runner_up) = (scores[0], scores[1]);

    if best > runner_up
        && let Some((winner, _)) = qualifying.iter().find(|(_, s)| *s == best)
    {
        return MatchOutcome::Single(winner.to_string());
    }

    MatchOutcome::Ambiguous(qualifying.iter().map(|(c, _)| c.to_string()).collect())
}
