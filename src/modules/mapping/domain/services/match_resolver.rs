use std::sync::LazyLock;

use super::similarity_strategy::{LevenshteinStrategy, SimilarityStrategy};
use super::title_normalizer::{extract_year, get_all_titles, TitleNormalizer};
use crate::modules::mapping::domain::value_objects::{MatchResult, MatchType};
use crate::modules::media::{Candidate, ReferenceRecord};
use crate::shared::config::MappingConfig;

static DEFAULT_RESOLVER: LazyLock<MatchResolver> =
    LazyLock::new(|| MatchResolver::new(&MappingConfig::default()));

/// Resolve a reference against candidates with the default thresholds
pub fn find_best_match(
    reference: &ReferenceRecord,
    candidates: &[Candidate],
) -> Option<MatchResult> {
    DEFAULT_RESOLVER.find_best_match(reference, candidates)
}

/// Picks the candidate that identifies the same work as a reference record
///
/// Tiers are tried in decreasing order of confidence:
///
/// 1. year-strict: same year, identical raw titles
/// 2. year-loose: same year, identical sanitized titles
/// 3. strict: identical raw titles
/// 4. loose: identical sanitized titles
/// 5. loose (fuzzy): best similarity over all pairs, above the loose threshold
/// 6. partial: the same best pair, above the partial threshold
///
/// Exact tiers stop at the first hit. The fuzzy tiers always scan every
/// candidate so the accepted pair is the global best; ties keep the first.
pub struct MatchResolver {
    loose_threshold: f64,
    partial_threshold: f64,
    normalizer: TitleNormalizer,
    strategy: Box<dyn SimilarityStrategy>,
}

/// Reference side of a comparison, computed once per resolution
struct Target {
    titles: Vec<String>,
    sanitized: Vec<String>,
    year: i32,
}

/// Candidate side of a comparison
struct Prepared<'a> {
    candidate: &'a Candidate,
    year: i32,
    /// Raw title paired with its sanitized form, if any
    titles: Vec<(&'a str, Option<String>)>,
}

impl MatchResolver {
    pub fn new(config: &MappingConfig) -> Self {
        Self {
            loose_threshold: config.loose_threshold,
            partial_threshold: config.partial_threshold,
            normalizer: TitleNormalizer::sanitizer(config.max_title_length),
            strategy: Box::new(LevenshteinStrategy),
        }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn SimilarityStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn find_best_match(
        &self,
        reference: &ReferenceRecord,
        candidates: &[Candidate],
    ) -> Option<MatchResult> {
        if candidates.is_empty() || reference.title.is_empty() {
            return None;
        }

        let target = self.prepare_target(reference);
        let prepared: Vec<Prepared<'_>> = candidates
            .iter()
            .map(|candidate| self.prepare_candidate(candidate))
            .collect();

        let result = self
            .exact_tiers(&target, &prepared)
            .or_else(|| self.fuzzy_tiers(&target, &prepared));

        match &result {
            Some(found) => log::debug!(
                "Resolved '{}' to '{}' ({}, {:.3})",
                reference.title,
                found.matched_title,
                found.match_type,
                found.similarity
            ),
            None => log::debug!(
                "No match for '{}' among {} candidates",
                reference.title,
                candidates.len()
            ),
        }

        result
    }

    fn prepare_target(&self, reference: &ReferenceRecord) -> Target {
        let titles: Vec<String> = get_all_titles(&reference.title)
            .into_iter()
            .chain(
                reference
                    .synonyms
                    .iter()
                    .filter(|s| !s.trim().is_empty())
                    .cloned(),
            )
            .collect();

        let year = reference
            .explicit_year()
            .or_else(|| titles.iter().find_map(|t| extract_year(t)))
            .unwrap_or(0);

        let sanitized = titles
            .iter()
            .filter_map(|t| self.normalizer.sanitize(t))
            .collect();

        Target {
            titles,
            sanitized,
            year,
        }
    }

    fn prepare_candidate<'a>(&self, candidate: &'a Candidate) -> Prepared<'a> {
        let titles: Vec<(&str, Option<String>)> = candidate
            .all_titles()
            .map(|raw| (raw, self.normalizer.sanitize(raw)))
            .collect();

        let year = candidate
            .explicit_year()
            .or_else(|| titles.iter().find_map(|(raw, _)| extract_year(raw)))
            .unwrap_or(0);

        Prepared {
            candidate,
            year,
            titles,
        }
    }

    /// Tiers 1 to 4, first hit wins
    fn exact_tiers(&self, target: &Target, prepared: &[Prepared<'_>]) -> Option<MatchResult> {
        let year_gated = target.year != 0;

        let tiers = [
            (MatchType::YearStrict, true, false),
            (MatchType::YearLoose, true, true),
            (MatchType::Strict, false, false),
            (MatchType::Loose, false, true),
        ];

        tiers
            .into_iter()
            .filter(|(_, needs_year, _)| year_gated || !needs_year)
            .find_map(|(match_type, needs_year, sanitized)| {
                prepared
                    .iter()
                    .filter(|p| !needs_year || p.year == target.year)
                    .find_map(|p| exact_hit(target, p, sanitized, match_type))
            })
    }

    /// Tiers 5 and 6 share a single global best-of scan
    fn fuzzy_tiers(&self, target: &Target, prepared: &[Prepared<'_>]) -> Option<MatchResult> {
        let mut best: Option<(f64, &Prepared<'_>, &str, &str)> = None;

        for p in prepared {
            for (raw, sanitized) in &p.titles {
                let Some(sanitized) = sanitized else { continue };
                for wanted in &target.sanitized {
                    let score = self.strategy.calculate(wanted, sanitized);
                    if best.as_ref().map_or(true, |(top, ..)| score > *top) {
                        best = Some((score, p, *raw, sanitized.as_str()));
                    }
                }
            }
        }

        let (similarity, p, raw, sanitized) = best?;
        let match_type = if similarity >= self.loose_threshold {
            MatchType::Loose
        } else if similarity >= self.partial_threshold {
            MatchType::Partial
        } else {
            log::trace!(
                "Best {} similarity {:.3} for '{}' is below every threshold",
                self.strategy.name(),
                similarity,
                raw
            );
            return None;
        };

        Some(MatchResult {
            similarity,
            candidate: p.candidate.clone(),
            match_type,
            sanitized_title: sanitized.to_string(),
            matched_title: raw.to_string(),
        })
    }
}

impl Default for MatchResolver {
    fn default() -> Self {
        Self::new(&MappingConfig::default())
    }
}

fn exact_hit(
    target: &Target,
    prepared: &Prepared<'_>,
    sanitized: bool,
    match_type: MatchType,
) -> Option<MatchResult> {
    let (raw, clean) = prepared.titles.iter().find(|(raw, clean)| {
        if sanitized {
            clean
                .as_ref()
                .is_some_and(|c| target.sanitized.iter().any(|t| t == c))
        } else {
            target.titles.iter().any(|t| t == raw)
        }
    })?;

    Some(MatchResult {
        similarity: 1.0,
        candidate: prepared.candidate.clone(),
        match_type,
        sanitized_title: clean.clone().unwrap_or_default(),
        matched_title: raw.to_string(),
    })
}
