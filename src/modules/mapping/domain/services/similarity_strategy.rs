use strsim::normalized_levenshtein;

/// Strategy for calculating similarity between two strings
///
/// This trait enables different similarity algorithms to be used interchangeably,
/// making the resolver testable and extensible.
pub trait SimilarityStrategy: Send + Sync {
    /// Calculate similarity between query and target
    ///
    /// Returns a value between 0.0 (completely different) and 1.0 (identical)
    fn calculate(&self, query: &str, target: &str) -> f64;

    /// Get the name of this strategy for logging/debugging
    fn name(&self) -> &'static str;
}

/// Normalized Levenshtein similarity strategy
///
/// `1 - distance / max(len(a), len(b))`, counted in characters.
#[derive(Debug, Clone, Default)]
pub struct LevenshteinStrategy;

impl SimilarityStrategy for LevenshteinStrategy {
    fn calculate(&self, query: &str, target: &str) -> f64 {
        normalized_levenshtein(query, target)
    }

    fn name(&self) -> &'static str {
        "Levenshtein"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical_strings() {
        let strategy = LevenshteinStrategy;
        assert_eq!(strategy.calculate("bleach", "bleach"), 1.0);
    }

    #[test]
    fn test_levenshtein_completely_different() {
        let strategy = LevenshteinStrategy;
        assert_eq!(strategy.calculate("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_levenshtein_matches_distance_formula() {
        let strategy = LevenshteinStrategy;
        // Three substitutions over twenty characters
        let similarity = strategy.calculate("mirror city twilight", "mirror city twilxyzt");
        assert!((similarity - 0.85).abs() < 1e-9);

        // One insertion over the longer length
        let similarity = strategy.calculate("naruto", "narutos");
        assert!((similarity - (1.0 - 1.0 / 7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_is_commutative() {
        let strategy = LevenshteinStrategy;
        assert_eq!(
            strategy.calculate("bleach", "breach"),
            strategy.calculate("breach", "bleach")
        );
    }

    #[test]
    fn test_similarity_is_bounded() {
        let strategy = LevenshteinStrategy;
        let test_cases = vec![
            ("naruto", "bleach"),
            ("one piece", "dragon ball"),
            ("", "something"),
            ("a", ""),
        ];

        for (a, b) in test_cases {
            let sim = strategy.calculate(a, b);
            assert!(
                (0.0..=1.0).contains(&sim),
                "Similarity {} out of bounds for '{}'/'{}'",
                sim,
                a,
                b
            );
        }
    }

    #[test]
    fn test_unicode_counts_characters_not_bytes() {
        let strategy = LevenshteinStrategy;
        assert_eq!(strategy.calculate("進撃の巨人", "進撃の巨人"), 1.0);
        // One of five characters differs
        let similarity = strategy.calculate("進撃の巨人", "進撃の小人");
        assert!((similarity - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_strategy_name() {
        assert_eq!(LevenshteinStrategy.name(), "Levenshtein");
    }
}
