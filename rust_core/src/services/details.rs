//! Detail-panel and tooltip content: sorted per-author breakdowns.

use serde::Serialize;

use crate::algorithms::classification;
use crate::algorithms::flow::split_pair;
use crate::core::domain::{AggregationCache, Author, CategoryCounts, Year};
use crate::core::state::QueryMode;

/// One row of a category breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub category: String,
    pub count: u64,
}

/// Topics of one subfield, ordered by occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicGroup {
    pub subfield: String,
    pub total: u64,
    pub topics: Vec<BreakdownRow>,
}

/// Header content for an author's detail panel.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorPanel {
    pub id: String,
    pub display_name: String,
    pub institution: String,
    pub orcid: String,
    pub dominant_subfield: String,
    pub interdisciplinarity_percent: f64,
    pub h_index: String,
    pub i10_index: String,
    pub works_count: String,
    pub cited_by_count: String,
}

/// Placeholder shown for metrics absent from the source data.
const MISSING_METRIC: &str = "-";

fn metric_display(value: Option<f64>) -> String {
    match value {
        Some(v) => {
            if v.fract() == 0.0 {
                format!("{}", v as i64)
            } else {
                format!("{v:.1}")
            }
        }
        None => MISSING_METRIC.to_string(),
    }
}

/// Sort a count table into display order: count descending, then name
/// ascending so equal counts render deterministically.
fn sorted_rows(counts: &CategoryCounts) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = counts
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(category, &count)| BreakdownRow {
            category: category.clone(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    rows
}

/// Subfield breakdown for the tooltip table, sorted by count descending.
pub fn subfield_breakdown(
    cache: &AggregationCache,
    year: Year,
    mode: QueryMode,
) -> Vec<BreakdownRow> {
    sorted_rows(classification::counts_for(cache, year, mode))
}

/// Topic breakdown grouped by subfield.
///
/// Topic keys are `"<subfield>---<topic>"`; malformed keys are dropped. The
/// topic table is not prefix-cached (it is only read at tooltip scale), so
/// `Entire` mode sums the raw table up to the query year on each call.
/// Groups are ordered by total occurrence descending, topics within a group
/// by count descending.
pub fn topic_breakdown(author: &Author, year: Year, mode: QueryMode) -> Vec<TopicGroup> {
    let mut merged = CategoryCounts::new();
    match mode {
        QueryMode::Year => {
            if let Some(counts) = author.topics_by_year.get(&year) {
                merged = counts.clone();
            }
        }
        QueryMode::Entire => {
            for counts in author.topics_by_year.range(..=year).map(|(_, c)| c) {
                for (key, count) in counts {
                    *merged.entry(key.clone()).or_insert(0) += count;
                }
            }
        }
    }

    let mut groups: Vec<TopicGroup> = Vec::new();
    for (key, count) in &merged {
        if *count == 0 {
            continue;
        }
        let Some((subfield, topic)) = split_pair(key) else {
            continue;
        };
        let group = match groups.iter_mut().find(|g| g.subfield == subfield) {
            Some(existing) => existing,
            None => {
                groups.push(TopicGroup {
                    subfield: subfield.to_string(),
                    total: 0,
                    topics: Vec::new(),
                });
                groups.last_mut().unwrap()
            }
        };
        group.total += count;
        group.topics.push(BreakdownRow {
            category: topic.to_string(),
            count: *count,
        });
    }

    for group in &mut groups {
        group
            .topics
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    }
    groups.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.subfield.cmp(&b.subfield)));
    groups
}

/// Assemble the detail-panel header for one author.
pub fn author_panel(
    author: &Author,
    cache: &AggregationCache,
    year: Year,
    mode: QueryMode,
) -> AuthorPanel {
    AuthorPanel {
        id: author.id.clone(),
        display_name: author.display_name(),
        institution: author.institution.clone(),
        orcid: author.orcid.clone(),
        dominant_subfield: classification::main_subfield_for(cache, year, mode).to_string(),
        interdisciplinarity_percent: classification::interdisciplinarity(cache, year, mode) * 100.0,
        h_index: metric_display(author.h_index),
        i10_index: metric_display(author.i10_index),
        works_count: metric_display(author.works_count),
        cited_by_count: metric_display(author.cited_by_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::YearTable;
    use crate::preprocessing::cache::build_cache;

    fn author_with_topics(topics: &[(Year, &[(&str, u64)])]) -> Author {
        let mut table = YearTable::new();
        for (year, counts) in topics {
            table.insert(
                *year,
                counts
                    .iter()
                    .map(|(name, count)| (name.to_string(), *count))
                    .collect(),
            );
        }
        Author {
            id: "A1".to_string(),
            given_name: "Ada".to_string(),
            family_name: "Lovelace".to_string(),
            institution: String::new(),
            orcid: String::new(),
            external_id: String::new(),
            h_index: Some(12.0),
            i10_index: None,
            works_count: Some(30.0),
            cited_by_count: None,
            subfields_by_year: YearTable::new(),
            fields_by_year: YearTable::new(),
            topics_by_year: table,
        }
    }

    #[test]
    fn breakdown_sorts_by_count_then_name() {
        let mut author = author_with_topics(&[]);
        author.subfields_by_year.insert(
            2020,
            [
                ("Software".to_string(), 5),
                ("AI".to_string(), 5),
                ("Hardware".to_string(), 9),
                ("Theory".to_string(), 0),
            ]
            .into_iter()
            .collect(),
        );
        let cache = build_cache(&author);
        let rows = subfield_breakdown(&cache, 2020, QueryMode::Year);

        let order: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, vec!["Hardware", "AI", "Software"]);
    }

    #[test]
    fn topic_groups_order_by_total_descending() {
        let author = author_with_topics(&[(
            2020,
            &[
                ("AI---Neural Networks", 2),
                ("AI---Planning", 1),
                ("Software---Testing", 5),
                ("malformed-key", 7),
            ],
        )]);
        let groups = topic_breakdown(&author, 2020, QueryMode::Year);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].subfield, "Software");
        assert_eq!(groups[0].total, 5);
        assert_eq!(groups[1].subfield, "AI");
        assert_eq!(groups[1].total, 3);
        assert_eq!(groups[1].topics[0].category, "Neural Networks");
    }

    #[test]
    fn topic_breakdown_entire_mode_sums_years() {
        let author = author_with_topics(&[
            (2019, &[("AI---Planning", 1)]),
            (2020, &[("AI---Planning", 2)]),
            (2021, &[("AI---Planning", 10)]),
        ]);
        let groups = topic_breakdown(&author, 2020, QueryMode::Entire);
        assert_eq!(groups[0].total, 3);
    }

    #[test]
    fn panel_formats_missing_metrics_as_dash() {
        let author = author_with_topics(&[]);
        let cache = build_cache(&author);
        let panel = author_panel(&author, &cache, 2020, QueryMode::Entire);

        assert_eq!(panel.display_name, "Ada Lovelace");
        assert_eq!(panel.h_index, "12");
        assert_eq!(panel.i10_index, "-");
        assert_eq!(panel.works_count, "30");
        assert_eq!(panel.cited_by_count, "-");
        assert_eq!(panel.dominant_subfield, "Unknown");
        assert_eq!(panel.interdisciplinarity_percent, 0.0);
    }
}
