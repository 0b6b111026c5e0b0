use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::normalizer::normalize_label;

/// One row of the legacy tracker export, pre-digested for the importer.
#[derive(Debug)]
pub(crate) struct LegacyRecord {
    pub(crate) id: Option<String>,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) author_id: Option<String>,
    pub(crate) author_name: String,
    pub(crate) department: String,
    pub(crate) normalized_status: String,
    pub(crate) tags: Vec<String>,
    pub(crate) estimated_cost: Option<f64>,
    pub(crate) timeline: Option<String>,
    pub(crate) collaboration: bool,
    pub(crate) submitted_at: Option<DateTime<Utc>>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<LegacyRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<LegacyRow>() {
        let row = record?;
        records.push(LegacyRecord {
            id: row.id.clone(),
            title: row.title.trim().to_string(),
            description: row.description.clone().unwrap_or_default(),
            category: row.category.clone().unwrap_or_default(),
            author_id: row.author_id.clone(),
            author_name: row.author.clone().unwrap_or_default(),
            department: row.department.clone().unwrap_or_default(),
            normalized_status: normalize_label(row.status.as_deref().unwrap_or_default()),
            tags: row.tag_list(),
            estimated_cost: row.estimated_cost(),
            timeline: row.timeline.clone(),
            collaboration: row.collaboration_flag(),
            submitted_at: row.submitted_at.as_deref().and_then(parse_datetime),
            updated_at: row.updated_at.as_deref().and_then(parse_datetime),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct LegacyRow {
    #[serde(rename = "Idea ID", default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(rename = "Title")]
    title: String,
    #[serde(
        rename = "Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(
        rename = "Author ID",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    author_id: Option<String>,
    #[serde(rename = "Author", default, deserialize_with = "empty_string_as_none")]
    author: Option<String>,
    #[serde(
        rename = "Department",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    department: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(rename = "Tags", default, deserialize_with = "empty_string_as_none")]
    tags: Option<String>,
    #[serde(
        rename = "Estimated Cost",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    estimated_cost: Option<String>,
    #[serde(rename = "Timeline", default, deserialize_with = "empty_string_as_none")]
    timeline: Option<String>,
    #[serde(
        rename = "Collaboration",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    collaboration: Option<String>,
    #[serde(
        rename = "Submitted At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    submitted_at: Option<String>,
    #[serde(
        rename = "Updated At",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    updated_at: Option<String>,
}

impl LegacyRow {
    fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn estimated_cost(&self) -> Option<f64> {
        self.estimated_cost
            .as_deref()
            .map(|raw| raw.replace([',', '$'], ""))
            .and_then(|cleaned| cleaned.trim().parse().ok())
    }

    fn collaboration_flag(&self) -> bool {
        matches!(
            normalize_label(self.collaboration.as_deref().unwrap_or_default()).as_str(),
            "yes" | "y" | "true" | "1" | "open"
        )
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_datetime(value)
}
