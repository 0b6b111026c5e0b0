//! Import of the previous idea tracker's CSV export.
//!
//! The old tracker kept cost, timeline, and the collaboration flag as
//! top-level spreadsheet columns and used its own status labels. The importer
//! folds all of that into the current aggregate shape in one pass so nothing
//! downstream has to know the legacy spellings.

mod mapping;
mod normalizer;
mod parser;

pub use normalizer::normalize_dynamic_keys;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::workflows::ideas::{fields, DynamicValue, Idea, IdeaId, IdeaStatus};

#[derive(Debug)]
pub enum LegacyImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for LegacyImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegacyImportError::Io(err) => write!(f, "failed to read legacy export: {}", err),
            LegacyImportError::Csv(err) => write!(f, "invalid legacy CSV data: {}", err),
        }
    }
}

impl std::error::Error for LegacyImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LegacyImportError::Io(err) => Some(err),
            LegacyImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LegacyImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LegacyImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct LegacyIdeaImporter;

impl LegacyIdeaImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<Idea>, LegacyImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, imported_at)
    }

    /// Parse a legacy export into idea aggregates.
    ///
    /// Rows without a title are skipped; duplicate ids keep the first
    /// occurrence; an unrecognized status falls back to Draft so no content
    /// is lost on migration.
    pub fn from_reader<R: Read>(
        reader: R,
        imported_at: DateTime<Utc>,
    ) -> Result<Vec<Idea>, LegacyImportError> {
        let mut ideas = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut generated = 0_u32;

        for record in parser::parse_records(reader)? {
            if record.title.is_empty() {
                continue;
            }

            let id = match record.id.clone() {
                Some(id) => id,
                None => {
                    generated += 1;
                    format!("legacy-{generated:04}")
                }
            };
            if !seen.insert(id.clone()) {
                continue;
            }

            let status =
                mapping::status_for_normalized(&record.normalized_status).unwrap_or(IdeaStatus::Draft);

            let mut dynamic_data = std::collections::BTreeMap::new();
            if let Some(cost) = record.estimated_cost {
                dynamic_data.insert(fields::COST.to_string(), DynamicValue::Number(cost));
            }
            if let Some(timeline) = record.timeline.clone() {
                dynamic_data.insert(fields::TIMELINE.to_string(), DynamicValue::Text(timeline));
            }
            if record.collaboration {
                dynamic_data.insert(
                    fields::COLLABORATION.to_string(),
                    DynamicValue::Boolean(true),
                );
            }

            let created_at = record.submitted_at.unwrap_or(imported_at);
            let updated_at = record.updated_at.unwrap_or(created_at);

            ideas.push(Idea {
                id: IdeaId(id),
                author_id: record.author_id.unwrap_or_default(),
                author_name: record.author_name,
                department: record.department,
                title: record.title,
                description: record.description,
                category: record.category,
                cover_image: None,
                tags: record.tags,
                status,
                template_id: None,
                template_name: None,
                dynamic_data,
                parent_idea_id: None,
                ratings: Vec::new(),
                comments: Vec::new(),
                created_at,
                updated_at,
            });
        }

        Ok(ideas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeMap;
    use std::io::Cursor;

    fn imported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().expect("valid timestamp")
    }

    const HEADER: &str = "Idea ID,Title,Description,Category,Author ID,Author,Department,Status,Tags,Estimated Cost,Timeline,Collaboration,Submitted At,Updated At\n";

    #[test]
    fn parse_datetime_supports_rfc3339_and_date_strings() {
        let rfc = parser::parse_datetime_for_tests("2026-01-15T10:30:00Z").expect("parse rfc");
        assert_eq!(
            rfc,
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).single().unwrap()
        );

        let date = parser::parse_datetime_for_tests("2026-01-20").expect("parse date");
        assert_eq!(
            date,
            Utc.with_ymd_and_hms(2026, 1, 20, 0, 0, 0).single().unwrap()
        );

        assert!(parser::parse_datetime_for_tests("  ").is_none());
        assert!(parser::parse_datetime_for_tests("not-a-date").is_none());
    }

    #[test]
    fn normalize_label_strips_noise_and_case() {
        let source = "\u{feff}Needs   Revision ";
        assert_eq!(normalizer::normalize_for_tests(source), "needs revision");
    }

    #[test]
    fn mapping_recognizes_legacy_status_labels() {
        assert_eq!(
            mapping::lookup_for_tests("Pending Review"),
            Some(IdeaStatus::Submitted)
        );
        assert_eq!(
            mapping::lookup_for_tests("Needs Work"),
            Some(IdeaStatus::NeedsRevision)
        );
        assert_eq!(
            mapping::lookup_for_tests("Declined"),
            Some(IdeaStatus::Rejected)
        );
        assert_eq!(mapping::lookup_for_tests("Live"), Some(IdeaStatus::Published));
        assert_eq!(mapping::lookup_for_tests("Archived"), None);
    }

    #[test]
    fn importer_builds_ideas_with_canonical_dynamic_fields() {
        let csv = format!(
            "{HEADER}IDEA-7,Solar roof,Panels on the warehouse,Sustainability,u-9,Dana Reyes,Facilities,Approved,energy;capex,\"12,500\",Q3 2026,Yes,2026-01-05T08:00:00Z,2026-02-01T12:00:00Z\n"
        );

        let ideas = LegacyIdeaImporter::from_reader(Cursor::new(csv), imported_at())
            .expect("import succeeds");
        assert_eq!(ideas.len(), 1);

        let idea = &ideas[0];
        assert_eq!(idea.id.0, "IDEA-7");
        assert_eq!(idea.status, IdeaStatus::Approved);
        assert_eq!(idea.tags, vec!["energy".to_string(), "capex".to_string()]);
        assert_eq!(
            idea.dynamic_data.get(fields::COST),
            Some(&DynamicValue::Number(12_500.0))
        );
        assert_eq!(
            idea.dynamic_data.get(fields::TIMELINE),
            Some(&DynamicValue::Text("Q3 2026".to_string()))
        );
        assert!(idea.collaboration_open());
        assert_eq!(
            idea.created_at,
            Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).single().unwrap()
        );
    }

    #[test]
    fn importer_keeps_first_row_for_duplicate_ids() {
        let csv = format!(
            "{HEADER}IDEA-1,First version,Body,Ops,u-1,Ana,Ops,Draft,,,,,,\nIDEA-1,Second version,Body,Ops,u-1,Ana,Ops,Draft,,,,,,\n"
        );

        let ideas = LegacyIdeaImporter::from_reader(Cursor::new(csv), imported_at())
            .expect("import succeeds");
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].title, "First version");
    }

    #[test]
    fn importer_defaults_unknown_status_to_draft_and_skips_untitled_rows() {
        let csv = format!(
            "{HEADER},Shuttle pooling,Body,Ops,u-2,Ben,Ops,Archived,,,,,,\n,,Body without title,Ops,u-3,Cam,Ops,Draft,,,,,,\n"
        );

        let ideas = LegacyIdeaImporter::from_reader(Cursor::new(csv), imported_at())
            .expect("import succeeds");
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].status, IdeaStatus::Draft);
        assert_eq!(ideas[0].id.0, "legacy-0001");
        assert_eq!(ideas[0].created_at, imported_at());
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = LegacyIdeaImporter::from_path("./does-not-exist.csv", imported_at())
            .expect_err("expected io error");

        match error {
            LegacyImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn normalize_dynamic_keys_prefers_canonical_entries() {
        let mut data = BTreeMap::new();
        data.insert(
            "estimatedCost".to_string(),
            DynamicValue::Number(100.0),
        );
        data.insert(fields::COST.to_string(), DynamicValue::Number(250.0));
        data.insert(
            "collaborationOpen".to_string(),
            DynamicValue::Boolean(true),
        );
        data.insert("region".to_string(), DynamicValue::Text("EMEA".to_string()));

        let normalized = normalize_dynamic_keys(data);

        assert_eq!(
            normalized.get(fields::COST),
            Some(&DynamicValue::Number(250.0))
        );
        assert_eq!(
            normalized.get(fields::COLLABORATION),
            Some(&DynamicValue::Boolean(true))
        );
        assert!(!normalized.contains_key("estimatedCost"));
        assert!(!normalized.contains_key("collaborationOpen"));
        assert_eq!(
            normalized.get("region"),
            Some(&DynamicValue::Text("EMEA".to_string()))
        );
    }
}
