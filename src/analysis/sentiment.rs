//! Lexicon sentiment and solution-orientation scoring.
//!
//! Both languages use the same scheme the original Japanese dictionary
//! used: polarity is the signed mean over matched lexicon terms,
//! subjectivity the share of the text the matches cover. English matches
//! whole tokens; Japanese matches substrings, since there is no whitespace
//! segmentation to lean on.
//!
//! The solution-orientation score compares solution vocabulary against
//! problem vocabulary: with S and P the respective occurrence totals, the
//! score is 0 when S+P is zero and `(S/(S+P) - 0.5) * 2` otherwise, so it
//! spans [-1, 1] from problem-centric to solution-centric.

use crate::analysis::text::{char_count, contains_japanese, normalize};
use crate::config::RunConfig;
use crate::models::PageRecord;
use serde::Serialize;

/// Polarity in [-1, 1] and subjectivity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// One output row of `analyze sentiment`.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentRow {
    pub title: String,
    pub language: String,
    pub polarity: f64,
    pub subjectivity: f64,
    pub solution_score: f64,
}

/// Count non-overlapping occurrences of each term in the text.
fn occurrence_total(text: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| text.matches(t.as_str()).count())
        .sum()
}

/// Score a text against positive/negative lexicons.
///
/// `japanese` switches between token matching and substring matching, and
/// between word count and character count as the subjectivity denominator.
pub fn score_sentiment(
    text: &str,
    positive: &[String],
    negative: &[String],
    japanese: bool,
) -> SentimentScore {
    if text.trim().is_empty() {
        return SentimentScore {
            polarity: 0.0,
            subjectivity: 0.0,
        };
    }

    let (positive_hits, negative_hits, total_units) = if japanese {
        (
            occurrence_total(text, positive),
            occurrence_total(text, negative),
            char_count(text),
        )
    } else {
        let tokens: Vec<String> = normalize(text)
            .split_whitespace()
            .map(|t| t.to_string())
            .collect();
        let hits = |lexicon: &[String]| {
            tokens
                .iter()
                .filter(|t| lexicon.iter().any(|w| w == *t))
                .count()
        };
        (hits(positive), hits(negative), tokens.len())
    };

    let matched = positive_hits + negative_hits;
    let polarity = (positive_hits as f64 - negative_hits as f64) / matched.max(1) as f64;
    let subjectivity = (matched as f64 / total_units.max(1) as f64).min(1.0);

    SentimentScore {
        polarity,
        subjectivity,
    }
}

/// Solution-orientation score in [-1, 1].
///
/// Occurrences are substring counts over the lowercased text for both
/// languages, which keeps multi-word entries like "best practice" working.
pub fn solution_orientation(text: &str, solution: &[String], problem: &[String]) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let lowered = text.to_lowercase();
    let solution_count = occurrence_total(&lowered, solution);
    let problem_count = occurrence_total(&lowered, problem);

    if solution_count + problem_count == 0 {
        return 0.0;
    }
    let solution_ratio = solution_count as f64 / (solution_count + problem_count) as f64;
    (solution_ratio - 0.5) * 2.0
}

/// Score every record with usable content.
pub fn analyze(records: &[PageRecord], config: &RunConfig) -> Vec<SentimentRow> {
    records
        .iter()
        .filter(|r| !r.is_empty_content())
        .map(|record| {
            let japanese = record.language == "ja" || contains_japanese(&record.content);
            let lang = if japanese { "ja" } else { "en" };
            let sentiment = score_sentiment(
                &record.content,
                config.positive_words(lang),
                config.negative_words(lang),
                japanese,
            );
            let solution_score = solution_orientation(
                &record.content,
                config.solution_words(lang),
                config.problem_words(lang),
            );
            SentimentRow {
                title: record.title.clone(),
                language: record.language.clone(),
                polarity: sentiment.polarity,
                subjectivity: sentiment.subjectivity,
                solution_score,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_solution_orientation_neutral_without_vocabulary() {
        let score = solution_orientation(
            "nothing relevant appears here",
            &words(&["solution"]),
            &words(&["problem"]),
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_solution_orientation_extremes() {
        let solution = words(&["solution", "fix"]);
        let problem = words(&["problem", "risk"]);
        let positive = solution_orientation("a solution and a fix", &solution, &problem);
        assert!((positive - 1.0).abs() < 1e-9);
        let negative = solution_orientation("a problem and a risk", &solution, &problem);
        assert!((negative + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_solution_orientation_balanced_is_zero() {
        let score = solution_orientation(
            "the solution to the problem",
            &words(&["solution"]),
            &words(&["problem"]),
        );
        assert!(score.abs() < 1e-9);
    }

    #[test]
    fn test_sentiment_sign_english() {
        let positive = words(&["good", "effective"]);
        let negative = words(&["stress", "difficult"]);
        let up = score_sentiment("a good and effective setup", &positive, &negative, false);
        assert!(up.polarity > 0.0);
        let down = score_sentiment("difficult days full of stress", &positive, &negative, false);
        assert!(down.polarity < 0.0);
        assert!(down.subjectivity > 0.0 && down.subjectivity <= 1.0);
    }

    #[test]
    fn test_sentiment_japanese_substring_matching() {
        let positive = words(&["改善", "効率"]);
        let negative = words(&["問題"]);
        let score = score_sentiment("業務の効率が改善した", &positive, &negative, true);
        assert!((score.polarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let score = score_sentiment("   ", &words(&["good"]), &words(&["bad"]), false);
        assert_eq!(score.polarity, 0.0);
        assert_eq!(score.subjectivity, 0.0);
    }

    #[test]
    fn test_analyze_skips_empty_content() {
        let config = RunConfig::default();
        let records = vec![PageRecord {
            url: "https://a.example".to_string(),
            title: "t".to_string(),
            meta_description: String::new(),
            content: String::new(),
            language: "en".to_string(),
            extracted_at: String::new(),
        }];
        assert!(analyze(&records, &config).is_empty());
    }
}
