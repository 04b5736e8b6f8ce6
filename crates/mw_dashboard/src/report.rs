use chrono::{DateTime, Utc};
use mw_core::{Article, Sentiment};
use serde::Serialize;

/// Negative-coverage share (in percent) above which the alert level turns
/// critical even when negative is not the dominant label.
pub const CRITICAL_NEGATIVE_RATIO: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFilter {
    All,
    One(String),
}

impl SourceFilter {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            SourceFilter::All
        } else {
            SourceFilter::One(raw.to_string())
        }
    }

    fn matches(&self, source: &str) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::One(name) => name == source,
        }
    }
}

/// Viewer filter parameters: chosen sentiment labels AND chosen source.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub sentiments: Vec<Sentiment>,
    pub source: SourceFilter,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            sentiments: vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral],
            source: SourceFilter::All,
        }
    }
}

impl Filters {
    /// Parses the user-facing filter parameters shared by the API and the
    /// CLI: an optional comma-separated label list (absent means all
    /// three) and an optional source name ("all" or absent means every
    /// source). Unknown labels are a caller error.
    pub fn parse(sentiments: Option<&str>, source: Option<&str>) -> Result<Self, String> {
        let mut filters = Filters::default();

        if let Some(raw) = sentiments {
            let mut chosen = Vec::new();
            for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let sentiment = part
                    .parse::<Sentiment>()
                    .map_err(|_| format!("unknown sentiment: {}", part))?;
                if !chosen.contains(&sentiment) {
                    chosen.push(sentiment);
                }
            }
            filters.sentiments = chosen;
        }

        if let Some(source) = source {
            filters.source = SourceFilter::parse(source);
        }

        Ok(filters)
    }

    fn matches(&self, article: &Article) -> bool {
        self.sentiments.contains(&article.sentiment) && self.source.matches(&article.source)
    }
}

/// Returns only the rows matching both filters. Idempotent: re-applying
/// the same filters to the result is a fixed point.
pub fn apply(articles: &[Article], filters: &Filters) -> Vec<Article> {
    articles
        .iter()
        .filter(|a| filters.matches(a))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub dominant: Sentiment,
    pub distinct_sources: usize,
    /// Share of negative rows, in percent.
    pub negative_ratio: f32,
}

/// Summary statistics over a non-empty filtered set. Returns None on an
/// empty set so the ratio is never computed over zero rows; callers render
/// that as the "no matching articles" state.
pub fn summarize(articles: &[Article]) -> Option<Summary> {
    if articles.is_empty() {
        return None;
    }

    let count = articles.len();
    let negative = articles
        .iter()
        .filter(|a| a.sentiment == Sentiment::Negative)
        .count();

    let mut sources: Vec<&str> = articles.iter().map(|a| a.source.as_str()).collect();
    sources.sort_unstable();
    sources.dedup();

    Some(Summary {
        count,
        dominant: dominant_sentiment(articles),
        distinct_sources: sources.len(),
        negative_ratio: negative as f32 / count as f32 * 100.0,
    })
}

/// Most frequent label. Ties break to the label first encountered in the
/// set, so the result is deterministic for identical input.
fn dominant_sentiment(articles: &[Article]) -> Sentiment {
    let counts = sentiment_distribution(articles);

    let mut best = counts[0];
    for candidate in &counts[1..] {
        // strictly greater: an equal count never displaces an earlier label
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Negative coverage dominates or exceeds the critical ratio.
    Critical,
    /// Positive coverage dominates.
    Healthy,
    /// Coverage is informative and balanced.
    Balanced,
}

/// Pure function of the summary: critical beats healthy beats balanced.
pub fn classify(summary: &Summary) -> AlertLevel {
    if summary.dominant == Sentiment::Negative || summary.negative_ratio > CRITICAL_NEGATIVE_RATIO {
        AlertLevel::Critical
    } else if summary.dominant == Sentiment::Positive {
        AlertLevel::Healthy
    } else {
        AlertLevel::Balanced
    }
}

/// Label → count, in first-appearance order over the filtered set.
pub fn sentiment_distribution(articles: &[Article]) -> Vec<(Sentiment, usize)> {
    let mut counts: Vec<(Sentiment, usize)> = Vec::with_capacity(3);
    for article in articles {
        match counts.iter_mut().find(|(s, _)| *s == article.sentiment) {
            Some((_, n)) => *n += 1,
            None => counts.push((article.sentiment, 1)),
        }
    }
    counts
}

/// Source → count, ordered by count descending then name ascending.
pub fn source_distribution(articles: &[Article]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for article in articles {
        match counts.iter_mut().find(|(s, _)| *s == article.source) {
            Some((_, n)) => *n += 1,
            None => counts.push((article.source.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// One row of the detail table shown under the charts.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleRow {
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub title: String,
    pub sentiment: Sentiment,
}

/// Detail listing of the filtered set, newest first.
pub fn detail_rows(articles: &[Article]) -> Vec<ArticleRow> {
    let mut rows: Vec<ArticleRow> = articles
        .iter()
        .map(|a| ArticleRow {
            published_at: a.published_at,
            source: a.source.clone(),
            title: a.title.clone(),
            sentiment: a.sentiment,
        })
        .collect();
    rows.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    rows
}

/// Everything the viewer surface renders, with the two recovered empty
/// states kept distinct from real data.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Report {
    /// The store has never been written (or the database file is absent).
    NoDatabase,
    /// The store exists but could not be read. Recovered, but kept apart
    /// from "no database" so a corrupt file is visible instead of silent.
    StoreUnreadable { error: String },
    /// The store has rows but none match the chosen filters.
    NoMatches,
    Data {
        summary: Summary,
        alert: AlertLevel,
        sentiment_chart: Vec<(Sentiment, usize)>,
        source_chart: Vec<(String, usize)>,
        articles: Vec<ArticleRow>,
    },
}

/// Builds the report for an already-loaded dataset. The "no database"
/// state is decided by the caller, which knows why the load was empty.
pub fn build(articles: &[Article], filters: &Filters) -> Report {
    let filtered = apply(articles, filters);
    match summarize(&filtered) {
        None => Report::NoMatches,
        Some(summary) => {
            let alert = classify(&summary);
            Report::Data {
                alert,
                sentiment_chart: sentiment_distribution(&filtered),
                source_chart: source_distribution(&filtered),
                articles: detail_rows(&filtered),
                summary,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn article(title: &str, source: &str, sentiment: Sentiment, offset_hours: i64) -> Article {
        Article {
            title: title.to_string(),
            description: "desc".to_string(),
            url: format!("http://example.com/{}", title),
            published_at: Utc::now() - Duration::hours(offset_hours),
            source: source.to_string(),
            full_text: format!("{} desc", title),
            sentiment,
        }
    }

    fn mixed_set() -> Vec<Article> {
        vec![
            article("p1", "A", Sentiment::Positive, 1),
            article("n1", "B", Sentiment::Negative, 2),
            article("p2", "A", Sentiment::Positive, 3),
            article("u1", "C", Sentiment::Neutral, 4),
        ]
    }

    #[test]
    fn test_parse_filters_defaults_trims_and_dedups() {
        let filters = Filters::parse(None, None).unwrap();
        assert_eq!(filters.sentiments.len(), 3);
        assert_eq!(filters.source, SourceFilter::All);

        let filters = Filters::parse(Some(" positive , negative,positive, "), Some("Reuters")).unwrap();
        assert_eq!(
            filters.sentiments,
            vec![Sentiment::Positive, Sentiment::Negative]
        );
        assert_eq!(filters.source, SourceFilter::One("Reuters".to_string()));

        assert_eq!(
            Filters::parse(Some("ALL"), None),
            Err("unknown sentiment: ALL".to_string())
        );
    }

    #[test]
    fn test_filter_is_logical_and_of_sentiment_and_source() {
        let filters = Filters {
            sentiments: vec![Sentiment::Positive],
            source: SourceFilter::One("A".to_string()),
        };
        let filtered = apply(&mixed_set(), &filters);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|a| a.source == "A" && a.sentiment == Sentiment::Positive));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filters = Filters {
            sentiments: vec![Sentiment::Positive, Sentiment::Neutral],
            source: SourceFilter::All,
        };
        let once = apply(&mixed_set(), &filters);
        let twice = apply(&once, &filters);
        assert_eq!(once.len(), twice.len());
        let a: Vec<&str> = once.iter().map(|x| x.title.as_str()).collect();
        let b: Vec<&str> = twice.iter().map(|x| x.title.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summarize_counts_and_ratio() {
        let summary = summarize(&mixed_set()).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.dominant, Sentiment::Positive);
        assert_eq!(summary.distinct_sources, 3);
        assert_eq!(summary.negative_ratio, 25.0);
    }

    #[test]
    fn test_summarize_refuses_empty_set() {
        // No ratio over zero rows: empty in, None out.
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn test_dominant_tie_breaks_to_first_encountered() {
        let set = vec![
            article("n1", "A", Sentiment::Negative, 1),
            article("p1", "A", Sentiment::Positive, 2),
            article("n2", "A", Sentiment::Negative, 3),
            article("p2", "A", Sentiment::Positive, 4),
        ];
        assert_eq!(summarize(&set).unwrap().dominant, Sentiment::Negative);

        let reversed: Vec<Article> = set.into_iter().rev().collect();
        assert_eq!(summarize(&reversed).unwrap().dominant, Sentiment::Positive);
    }

    #[test]
    fn test_two_article_tie_is_critical_via_ratio() {
        // The worked case: one positive, one negative. Dominant is the tie
        // winner (first encountered) but the 50% negative share alone
        // crosses the critical threshold.
        let set = vec![
            article("Barca wins", "A", Sentiment::Positive, 1),
            article("Barca crisis", "B", Sentiment::Negative, 2),
        ];
        let summary = summarize(&set).unwrap();
        assert_eq!(summary.negative_ratio, 50.0);
        assert_eq!(summary.dominant, Sentiment::Positive);
        assert_eq!(classify(&summary), AlertLevel::Critical);
    }

    #[test]
    fn test_all_positive_is_healthy_with_zero_ratio() {
        let set = vec![
            article("p1", "A", Sentiment::Positive, 1),
            article("p2", "B", Sentiment::Positive, 2),
        ];
        let summary = summarize(&set).unwrap();
        assert_eq!(summary.negative_ratio, 0.0);
        assert_eq!(classify(&summary), AlertLevel::Healthy);
    }

    #[test]
    fn test_negative_dominant_is_critical_even_under_threshold() {
        // Three labels, negative has plurality at 40% exactly: the ratio
        // alone would not trip the alert, dominance does.
        let set = vec![
            article("n1", "A", Sentiment::Negative, 1),
            article("n2", "A", Sentiment::Negative, 2),
            article("p1", "A", Sentiment::Positive, 3),
            article("u1", "A", Sentiment::Neutral, 4),
            article("u2", "B", Sentiment::Neutral, 5),
        ];
        let summary = summarize(&set).unwrap();
        assert_eq!(summary.negative_ratio, 40.0);
        assert_eq!(summary.dominant, Sentiment::Negative);
        assert_eq!(classify(&summary), AlertLevel::Critical);
    }

    #[test]
    fn test_neutral_dominant_is_balanced() {
        let set = vec![
            article("u1", "A", Sentiment::Neutral, 1),
            article("u2", "A", Sentiment::Neutral, 2),
            article("p1", "A", Sentiment::Positive, 3),
        ];
        assert_eq!(classify(&summarize(&set).unwrap()), AlertLevel::Balanced);
    }

    #[test]
    fn test_distributions_are_deterministic() {
        let set = mixed_set();
        let sentiments = sentiment_distribution(&set);
        assert_eq!(
            sentiments,
            vec![
                (Sentiment::Positive, 2),
                (Sentiment::Negative, 1),
                (Sentiment::Neutral, 1),
            ]
        );

        let sources = source_distribution(&set);
        assert_eq!(
            sources,
            vec![
                ("A".to_string(), 2),
                ("B".to_string(), 1),
                ("C".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_detail_rows_sorted_newest_first() {
        let rows = detail_rows(&mixed_set());
        assert_eq!(rows[0].title, "p1");
        assert_eq!(rows[3].title, "u1");
    }

    #[test]
    fn test_build_distinguishes_no_matches() {
        let filters = Filters {
            sentiments: vec![Sentiment::Negative],
            source: SourceFilter::One("C".to_string()),
        };
        match build(&mixed_set(), &filters) {
            Report::NoMatches => {}
            other => panic!("expected NoMatches, got {:?}", other),
        }
    }
}
