use std::path::{Path, PathBuf};

use nucleo::{
    Matcher, Utf32Str,
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
};

use crate::paths::display_name;

pub const MAX_SCORE: f64 = 100.0;

/// Approximate string matching, scored in `[0, 100]`.
///
/// `0` means "no match"; higher is better.
pub trait FuzzyScorer {
    fn score(&mut self, query: &str, candidate: &str) -> f64;
}

/// [`FuzzyScorer`] backed by nucleo.
///
/// The raw nucleo score is divided by the score the query earns against
/// itself, then scaled down by how much of the candidate the query leaves
/// unmatched. Only an exact match lands on [`MAX_SCORE`].
pub struct NucleoScorer {
    matcher: Matcher,
    buf: Vec<char>,
}

impl NucleoScorer {
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(nucleo::Config::DEFAULT),
            buf: Vec::new(),
        }
    }

    fn raw(&mut self, pattern: &Pattern, haystack: &str) -> u32 {
        pattern
            .score(Utf32Str::new(haystack, &mut self.buf), &mut self.matcher)
            .unwrap_or(0)
    }
}

impl Default for NucleoScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NucleoScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NucleoScorer").finish_non_exhaustive()
    }
}

impl FuzzyScorer for NucleoScorer {
    fn score(&mut self, query: &str, candidate: &str) -> f64 {
        let q = query.trim();
        if q.is_empty() || candidate.is_empty() {
            return 0.0;
        }

        let pattern = Pattern::new(
            q,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let best = self.raw(&pattern, q);
        if best == 0 {
            return 0.0;
        }
        let got = self.raw(&pattern, candidate);
        if got == 0 {
            return 0.0;
        }

        let quality = (f64::from(got) / f64::from(best)).min(1.0);
        (quality * coverage(q, candidate) * MAX_SCORE).min(MAX_SCORE)
    }
}

/// Share of the candidate covered by the query, mapped onto `[0.5, 1]`.
///
/// Unmatched trailing characters cost up to half the score, so `Test` beats
/// `Test2`, which beats `Tests of things`.
fn coverage(query: &str, candidate: &str) -> f64 {
    let q = query.chars().count() as f64;
    let c = candidate.chars().count() as f64;
    0.5 + 0.5 * (q / c).min(1.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPath {
    pub score: f64,
    pub path: PathBuf,
}

/// Scores every candidate by its file name (extension stripped) and returns
/// the matches best-first.
///
/// Candidates scoring zero are dropped. Ties keep their input order.
pub fn rank<S, P>(scorer: &mut S, query: &str, candidates: &[P]) -> Vec<RankedPath>
where
    S: FuzzyScorer + ?Sized,
    P: AsRef<Path>,
{
    let mut hits: Vec<RankedPath> = candidates
        .iter()
        .filter_map(|p| {
            let p = p.as_ref();
            let name = display_name(p, None, true);
            let score = scorer.score(query, &name);
            (score > 0.0).then(|| RankedPath {
                score,
                path: p.to_path_buf(),
            })
        })
        .collect();

    // `sort_by` is stable, which keeps equal scores in input order.
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores by shared prefix length, for deterministic ranking tests.
    struct PrefixScorer;

    impl FuzzyScorer for PrefixScorer {
        fn score(&mut self, query: &str, candidate: &str) -> f64 {
            let shared = query
                .chars()
                .zip(candidate.chars())
                .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
                .count();
            shared as f64 * 10.0
        }
    }

    #[test]
    fn no_match_yields_empty_ranking() {
        let files = ["/v/alpha.md", "/v/beta.md"];
        assert!(rank(&mut PrefixScorer, "zzz", &files).is_empty());
        assert!(rank(&mut NucleoScorer::new(), "zzz", &files).is_empty());
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let files = ["/v/abx.md", "/v/abc.md", "/v/a.md", "/v/abc2.md", "/v/q.md"];
        let hits = rank(&mut PrefixScorer, "abc", &files);
        let paths: Vec<_> = hits.iter().map(|h| h.path.to_str().unwrap()).collect();
        assert_eq!(paths, ["/v/abc.md", "/v/abc2.md", "/v/abx.md", "/v/a.md"]);
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ranking_matches_file_name_not_directories() {
        let files = ["/zebra/notes/alpha.md"];
        assert!(rank(&mut PrefixScorer, "zebra", &files).is_empty());
        assert_eq!(rank(&mut PrefixScorer, "alp", &files).len(), 1);
    }

    #[test]
    fn nucleo_scores_exact_match_at_max() {
        let mut s = NucleoScorer::new();
        assert_eq!(s.score("hallo", "hallo"), MAX_SCORE);
        assert_eq!(s.score("Hallo", "hallo"), MAX_SCORE);
    }

    #[test]
    fn nucleo_scores_stay_in_range() {
        let mut s = NucleoScorer::new();
        for candidate in ["hallo", "h-a-l-l-o", "say hallo", "hxaxlxlxo", "HalloWelt"] {
            let score = s.score("hallo", candidate);
            assert!(score > 0.0 && score <= MAX_SCORE, "{candidate}: {score}");
        }
        assert_eq!(s.score("hallo", "false"), 0.0);
        assert_eq!(s.score("", "hallo"), 0.0);
        assert_eq!(s.score("   ", "hallo"), 0.0);
    }

    #[test]
    fn nucleo_penalizes_unmatched_length() {
        let mut s = NucleoScorer::new();
        let exact = s.score("Test", "Test");
        let suffixed = s.score("Test", "Test2");
        let long = s.score("Test", "Tests of things");
        assert_eq!(exact, MAX_SCORE);
        assert!(exact > suffixed, "{exact} vs {suffixed}");
        assert!(suffixed > long, "{suffixed} vs {long}");
        assert!(long > 0.0);
    }

    #[test]
    fn nucleo_prefers_contiguous_matches() {
        let mut s = NucleoScorer::new();
        assert!(s.score("hallo", "hallo") > s.score("hallo", "hxaxlxlxo"));
    }
}
