//! Run configuration: query lists, keyword dictionaries, and pacing.
//!
//! All of the parameterized lookups the analyses depend on live here —
//! search queries, sentiment lexicons, solution/problem vocabularies,
//! stopword lists, keyword groups and factor categories — together with the
//! politeness-delay bounds and collection limits used by the scrape
//! pipeline.
//!
//! The built-in defaults are complete and the binary runs without any
//! configuration file. An optional YAML file (passed via `--config`) may
//! override any subset of fields; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Inclusive bounds, in seconds, for a randomized politeness sleep.
///
/// A range of `0..0` disables the sleep entirely, which tests and
/// mock-server runs rely on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DelayRange {
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// Zero-length range; `sample` returns `None`.
    pub fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Draw a sleep duration, or `None` when the range is empty.
    pub fn sample(&self) -> Option<Duration> {
        use rand::Rng;
        let (lo, hi) = (self.min_secs.max(0.0), self.max_secs.max(0.0));
        if hi <= 0.0 {
            return None;
        }
        let secs = if hi > lo {
            rand::rng().random_range(lo..=hi)
        } else {
            lo
        };
        (secs > 0.0).then(|| Duration::from_secs_f64(secs))
    }
}

/// A named group of keywords, used both for occurrence counting and for
/// factor-category matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Sentiment and orientation word lists for both corpus languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicons {
    pub positive_en: Vec<String>,
    pub negative_en: Vec<String>,
    pub positive_ja: Vec<String>,
    pub negative_ja: Vec<String>,
    pub solution_en: Vec<String>,
    pub problem_en: Vec<String>,
    pub solution_ja: Vec<String>,
    pub problem_ja: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for Lexicons {
    fn default() -> Self {
        Self {
            positive_en: owned(&[
                "good", "great", "effective", "improve", "benefit", "success", "flexible",
                "comfortable", "efficient", "productive", "advantage", "easy", "focus",
                "satisfied", "helpful", "enhance", "convenient",
            ]),
            negative_en: owned(&[
                "difficult", "problem", "challenge", "stress", "isolation", "fatigue", "risk",
                "barrier", "decline", "failure", "distraction", "burnout", "concern", "obstacle",
                "struggle", "worse", "trouble",
            ]),
            positive_ja: owned(&[
                "良い", "素晴らしい", "便利", "快適", "効率", "向上", "改善", "柔軟", "充実",
                "満足", "活用", "成功", "メリット", "効果", "簡単", "楽", "自由", "集中",
                "効率的", "有効", "利点",
            ]),
            negative_ja: owned(&[
                "難しい", "問題", "課題", "不安", "孤独", "ストレス", "困難", "低下", "悪化",
                "疲れ", "疲労", "デメリット", "障害", "負担", "限界", "失敗", "トラブル",
                "リスク", "欠点", "悪い", "危険",
            ]),
            solution_en: owned(&[
                "solution", "solve", "resolve", "fix", "improve", "enhance", "strategy",
                "approach", "method", "tool", "technique", "tip", "best practice",
                "recommendation", "advice", "guide", "how to",
            ]),
            problem_en: owned(&[
                "problem", "challenge", "issue", "difficulty", "obstacle", "barrier", "struggle",
                "concern", "risk", "limitation",
            ]),
            solution_ja: owned(&[
                "解決", "方法", "対策", "改善", "向上", "効率化", "ツール", "手法", "テクニック",
                "コツ", "ベストプラクティス", "推奨", "アドバイス", "ガイド", "提案", "実践",
                "活用法", "実現", "強化",
            ]),
            problem_ja: owned(&[
                "問題", "課題", "困難", "障害", "障壁", "弊害", "苦労", "懸念", "リスク", "制限",
                "限界", "欠点", "デメリット", "悩み",
            ]),
        }
    }
}

/// TF-IDF vectorization cut-offs shared by the topics and clusters analyses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerOptions {
    /// Keep at most this many terms, by corpus frequency.
    pub max_features: usize,
    /// Drop terms appearing in fewer than this many documents.
    pub min_df: usize,
    /// Drop terms appearing in more than this share of documents.
    pub max_df_ratio: f64,
}

impl Default for VectorizerOptions {
    fn default() -> Self {
        Self {
            max_features: 100,
            min_df: 1,
            max_df_ratio: 0.9,
        }
    }
}

/// Full run configuration with built-in defaults mirroring the original
/// collection's hard-coded lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// English search queries for the fixed topic.
    pub queries_en: Vec<String>,
    /// Japanese search queries for the fixed topic.
    pub queries_ja: Vec<String>,
    /// Search-result pages requested per query.
    pub pages_per_query: usize,
    /// Stop collecting once this many unique URLs are gathered.
    pub max_articles: usize,
    /// Content below this length triggers the paragraph fallback.
    pub min_content_len: usize,
    /// Sleep between search-result page requests.
    pub serp_delay: DelayRange,
    /// Sleep between article fetches.
    pub fetch_delay: DelayRange,
    /// Minimum documents a language needs before topic modeling runs.
    pub min_docs_for_topics: usize,
    pub vectorizer: VectorizerOptions,
    pub lexicons: Lexicons,
    /// Keyword dictionaries counted by `analyze keywords`.
    pub keyword_groups: Vec<KeywordGroup>,
    /// Factor categories matched per paragraph by `analyze keywords`.
    pub factors: Vec<KeywordGroup>,
    pub stopwords_en: Vec<String>,
    pub stopwords_ja: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            queries_en: owned(&[
                "remote work productivity statistics",
                "remote work communication challenges",
                "effective remote team management",
                "remote work tools comparison",
                "remote work benefits for companies",
                "remote work productivity measurement",
                "challenges of remote work collaboration",
                "time management in remote work environment",
            ]),
            queries_ja: owned(&[
                "リモートワーク 生産性 統計",
                "リモートワーク コミュニケーション 課題",
                "リモートチーム 効果的な管理",
                "リモートワーク ツール 比較",
                "リモートワーク 企業にとっての利点",
                "リモートワーク 生産性 測定",
                "リモートワーク コラボレーション 課題",
                "リモートワーク環境 時間管理",
            ]),
            pages_per_query: 2,
            max_articles: 15,
            min_content_len: 100,
            serp_delay: DelayRange::new(5.0, 15.0),
            fetch_delay: DelayRange::new(3.0, 8.0),
            min_docs_for_topics: 5,
            vectorizer: VectorizerOptions::default(),
            lexicons: Lexicons::default(),
            keyword_groups: vec![
                KeywordGroup::new(
                    "remote_work",
                    &[
                        "remote work", "telework", "work from home", "virtual office",
                        "distributed team", "online meeting", "video call",
                        "リモートワーク", "テレワーク", "在宅勤務", "リモート", "在宅",
                        "オンライン会議", "ビデオ会議", "バーチャルオフィス", "分散型チーム",
                    ],
                ),
                KeywordGroup::new(
                    "productivity",
                    &[
                        "productivity", "efficiency", "performance", "outcome",
                        "time management", "work-life balance", "focus", "distraction",
                        "communication", "collaboration", "meeting", "schedule",
                        "生産性", "効率", "パフォーマンス", "成果", "結果",
                        "タイムマネジメント", "ワークライフバランス", "集中", "注意散漫",
                        "コミュニケーション", "コラボレーション", "会議", "スケジュール",
                    ],
                ),
                KeywordGroup::new(
                    "optimization",
                    &[
                        "optimization", "improvement", "strategy", "best practice",
                        "effective", "solution", "hybrid", "flexible", "balance",
                        "最適化", "改善", "戦略", "ベストプラクティス", "効果的", "解決策",
                        "課題", "メリット", "デメリット", "バランス", "ハイブリッド", "柔軟",
                        "スケジュール", "環境",
                    ],
                ),
            ],
            factors: vec![
                KeywordGroup::new(
                    "communication_tools",
                    &[
                        "slack", "teams", "zoom", "chat", "video call",
                        "チャット", "ビデオ会議", "オンライン会議", "コミュニケーションツール",
                    ],
                ),
                KeywordGroup::new(
                    "time_management",
                    &[
                        "time management", "schedule", "focus time",
                        "時間管理", "時間効率", "スケジュール", "集中時間", "時間の使い方",
                        "タイムマネジメント",
                    ],
                ),
                KeywordGroup::new(
                    "work_environment",
                    &[
                        "workspace", "quiet", "home office", "environment",
                        "環境", "集中", "静か", "快適", "オフィス環境", "仕事場所",
                        "ワークスペース",
                    ],
                ),
                KeywordGroup::new(
                    "self_management",
                    &[
                        "self-management", "discipline", "motivation", "autonomy",
                        "自己管理", "セルフマネジメント", "自律", "規律", "モチベーション",
                        "意識",
                    ],
                ),
                KeywordGroup::new(
                    "work_life_balance",
                    &[
                        "work-life", "commute", "family", "balance",
                        "ワークライフ", "通勤時間", "家族", "生活", "バランス", "余暇",
                        "プライベート",
                    ],
                ),
                KeywordGroup::new(
                    "digital_tools",
                    &[
                        "tool", "app", "cloud", "digital", "software",
                        "ツール", "アプリ", "デジタル", "クラウド", "オンライン", "システム",
                        "デジタルツール",
                    ],
                ),
                KeywordGroup::new(
                    "management_culture",
                    &[
                        "trust", "leadership", "management", "evaluation",
                        "信頼", "裁量", "自律", "マネジメント", "リーダーシップ", "組織",
                        "評価",
                    ],
                ),
            ],
            stopwords_en: owned(&[
                "and", "the", "to", "of", "in", "a", "for", "is", "on", "with", "are", "that",
                "be", "by", "as", "at", "it", "this", "their", "from", "or", "an", "they",
                "have", "has", "had", "you", "your", "can", "will", "our",
            ]),
            stopwords_ja: owned(&[
                "を", "に", "は", "が", "の", "と", "た", "して", "です", "ます", "から",
                "など", "による",
            ]),
        }
    }
}

impl RunConfig {
    /// Load the configuration, overlaying an optional YAML file on the
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p)
                    .map_err(|e| format!("failed to read config file {}: {e}", p.display()))?;
                let config: RunConfig = serde_yaml::from_str(&raw)
                    .map_err(|e| format!("failed to parse config file {}: {e}", p.display()))?;
                info!(path = %p.display(), "Loaded configuration file");
                Ok(config)
            }
            None => {
                info!("Using built-in configuration defaults");
                Ok(Self::default())
            }
        }
    }

    /// Query list for a language tag.
    pub fn queries(&self, language: &str) -> &[String] {
        if language == "ja" {
            &self.queries_ja
        } else {
            &self.queries_en
        }
    }

    pub fn stopwords(&self, language: &str) -> &[String] {
        if language == "ja" {
            &self.stopwords_ja
        } else {
            &self.stopwords_en
        }
    }

    pub fn solution_words(&self, language: &str) -> &[String] {
        if language == "ja" {
            &self.lexicons.solution_ja
        } else {
            &self.lexicons.solution_en
        }
    }

    pub fn problem_words(&self, language: &str) -> &[String] {
        if language == "ja" {
            &self.lexicons.problem_ja
        } else {
            &self.lexicons.problem_en
        }
    }

    pub fn positive_words(&self, language: &str) -> &[String] {
        if language == "ja" {
            &self.lexicons.positive_ja
        } else {
            &self.lexicons.positive_en
        }
    }

    pub fn negative_words(&self, language: &str) -> &[String] {
        if language == "ja" {
            &self.lexicons.negative_ja
        } else {
            &self.lexicons.negative_en
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_queries_and_lexicons() {
        let config = RunConfig::default();
        assert_eq!(config.queries_en.len(), 8);
        assert_eq!(config.queries_ja.len(), 8);
        assert!(!config.lexicons.solution_en.is_empty());
        assert!(!config.lexicons.problem_ja.is_empty());
        assert_eq!(config.pages_per_query, 2);
        assert_eq!(config.max_articles, 15);
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let yaml = "max_articles: 3\npages_per_query: 1\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.max_articles, 3);
        assert_eq!(config.pages_per_query, 1);
        // untouched fields keep defaults
        assert_eq!(config.queries_en, RunConfig::default().queries_en);
        assert_eq!(config.min_content_len, 100);
    }

    #[test]
    fn test_delay_range_sampling() {
        assert_eq!(DelayRange::none().sample(), None);
        let fixed = DelayRange::new(2.0, 2.0);
        let d = fixed.sample().unwrap();
        assert!((d.as_secs_f64() - 2.0).abs() < 1e-9);
        let ranged = DelayRange::new(1.0, 3.0);
        for _ in 0..20 {
            let d = ranged.sample().unwrap().as_secs_f64();
            assert!((1.0..=3.0).contains(&d));
        }
    }

    #[test]
    fn test_language_accessors() {
        let config = RunConfig::default();
        assert!(config.queries("ja")[0].contains("リモートワーク"));
        assert!(config.queries("en")[0].contains("remote work"));
        assert!(config.stopwords("en").contains(&"the".to_string()));
        assert!(config.solution_words("ja").contains(&"解決".to_string()));
    }
}
