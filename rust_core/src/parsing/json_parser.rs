use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};

use crate::core::domain::{Author, CategoryCounts, Year, YearTable};

/// Ordered alias lists for each logical identity field. Earlier keys win.
struct FieldAliases {
    given_name: &'static [&'static str],
    family_name: &'static [&'static str],
    institution: &'static [&'static str],
    orcid: &'static [&'static str],
    external_id: &'static [&'static str],
}

static IDENTITY_ALIASES: Lazy<FieldAliases> = Lazy::new(|| FieldAliases {
    given_name: &["given_name", "first_name", "name"],
    family_name: &["family_name", "last_name", "surname"],
    institution: &["institution", "affiliation", "last_known_institution"],
    orcid: &["orcid", "orcid_id"],
    external_id: &["openalex_id", "external_id", "id"],
});

static METRIC_ALIASES: Lazy<[(&'static str, &'static [&'static str]); 4]> = Lazy::new(|| {
    [
        ("h_index", &["h_index", "hindex"] as &[&str]),
        ("i10_index", &["i10_index", "i10index"]),
        ("works_count", &["works_count", "work_count", "works"]),
        ("cited_by_count", &["cited_by_count", "citations", "cited_by"]),
    ]
});

static TABLE_ALIASES: Lazy<[(&'static str, &'static [&'static str]); 3]> = Lazy::new(|| {
    [
        ("subfields", &["subfields", "subfields_by_year", "yearly_subfields"] as &[&str]),
        ("fields", &["fields", "fields_by_year", "yearly_fields"]),
        ("topics", &["topics", "topics_by_year", "yearly_topics"]),
    ]
});

/// Parse the dataset document into normalized authors.
///
/// A single-object document is promoted to a one-record array. Each record
/// yields exactly one author, in input order, with the synthetic id
/// `A<index+1>`. Malformed or missing fields degrade to empty strings,
/// `None` metrics or empty tables; only an unreadable document is an error.
pub fn parse_authors_str(json_str: &str) -> Result<Vec<Author>> {
    let deserializer = &mut serde_json::Deserializer::from_str(json_str);
    let document: Value = serde_path_to_error::deserialize(deserializer)
        .context("Invalid JSON in dataset document")?;

    let records: Vec<Value> = match document {
        Value::Array(items) => items,
        other @ Value::Object(_) => vec![other],
        other => anyhow::bail!(
            "Dataset document must be an object or an array of objects, got {}",
            json_type_name(&other)
        ),
    };

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record, index))
        .collect())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build one canonical author from one raw record.
///
/// Non-object records produce an inert author rather than failing the load.
fn normalize_record(record: Value, index: usize) -> Author {
    let fields = match record {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let aliases = &*IDENTITY_ALIASES;

    let mut metrics = [None; 4];
    for (slot, (_, keys)) in metrics.iter_mut().zip(METRIC_ALIASES.iter()) {
        *slot = resolve_number(&fields, keys);
    }
    let [h_index, i10_index, works_count, cited_by_count] = metrics;

    let mut tables = [YearTable::new(), YearTable::new(), YearTable::new()];
    for (slot, (_, keys)) in tables.iter_mut().zip(TABLE_ALIASES.iter()) {
        *slot = resolve_table(&fields, keys);
    }
    let [subfields_by_year, fields_by_year, topics_by_year] = tables;

    Author {
        id: format!("A{}", index + 1),
        given_name: resolve_string(&fields, aliases.given_name),
        family_name: resolve_string(&fields, aliases.family_name),
        institution: resolve_string(&fields, aliases.institution),
        orcid: resolve_string(&fields, aliases.orcid),
        external_id: resolve_string(&fields, aliases.external_id),
        h_index,
        i10_index,
        works_count,
        cited_by_count,
        subfields_by_year,
        fields_by_year,
        topics_by_year,
    }
}

/// First alias present with a string value, else empty string.
fn resolve_string(fields: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| fields.get(*key))
        .and_then(|value| value.as_str())
        .unwrap_or("")
        .to_string()
}

/// First alias present with a finite numeric value. Strings that parse as
/// numbers are accepted too; anything else is treated as missing.
fn resolve_number(fields: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    let value = keys.iter().find_map(|key| fields.get(*key))?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// First alias present with an object value, normalized as a year table.
fn resolve_table(fields: &Map<String, Value>, keys: &[&str]) -> YearTable {
    keys.iter()
        .find_map(|key| fields.get(*key))
        .and_then(|value| value.as_object())
        .map(normalize_year_table)
        .unwrap_or_default()
}

/// Convert a raw `"year" -> {category -> count}` object into a [`YearTable`].
///
/// Year keys arrive as JSON object keys (strings); non-numeric years and
/// non-representable counts are dropped silently. Counts are clamped to
/// non-negative integers.
fn normalize_year_table(raw: &Map<String, Value>) -> YearTable {
    let mut table = YearTable::new();
    for (year_key, entry) in raw {
        let Ok(year) = year_key.trim().parse::<Year>() else {
            continue;
        };
        let Some(categories) = entry.as_object() else {
            continue;
        };
        let mut counts = CategoryCounts::new();
        for (category, raw_count) in categories {
            if let Some(count) = coerce_count(raw_count) {
                counts.insert(category.clone(), count);
            }
        }
        table.insert(year, counts);
    }
    table
}

fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(int) = n.as_u64() {
                Some(int)
            } else {
                // Negative or fractional counts are malformed input.
                n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)
            }
        }
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
