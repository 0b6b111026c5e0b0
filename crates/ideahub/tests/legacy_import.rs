//! Integration specifications for importing the previous tracker's CSV
//! export into idea aggregates.

use std::io::Cursor;

use chrono::{TimeZone, Utc};
use ideahub::workflows::ideas::{fields, DynamicValue, IdeaStatus};
use ideahub::workflows::legacy::LegacyIdeaImporter;

const HEADER: &str = "Idea ID,Title,Description,Category,Author ID,Author,Department,Status,Tags,Estimated Cost,Timeline,Collaboration,Submitted At,Updated At\n";

fn imported_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn export_rows_become_review_ready_aggregates() {
    let csv = format!(
        "{HEADER}\
IDEA-1,Reusable packaging loop,Returnable crates for outbound shipping,Sustainability,u-1,Uma Okafor,Operations,Pending Review,logistics;green,4200,Q3 2026,yes,2026-01-05T08:00:00Z,2026-01-20T10:00:00Z\n\
IDEA-2,Cafeteria composting,Divert food waste,Facilities,u-2,Ben Ito,Facilities,Live,,900,,no,2025-11-12,2026-01-02\n"
    );

    let ideas =
        LegacyIdeaImporter::from_reader(Cursor::new(csv), imported_at()).expect("import succeeds");
    assert_eq!(ideas.len(), 2);

    let first = &ideas[0];
    assert_eq!(first.id.0, "IDEA-1");
    assert_eq!(first.status, IdeaStatus::Submitted);
    assert_eq!(first.author_name, "Uma Okafor");
    assert_eq!(first.department, "Operations");
    assert!(first.collaboration_open());
    assert_eq!(
        first.dynamic_data.get(fields::COST),
        Some(&DynamicValue::Number(4200.0))
    );
    assert!(first.ratings.is_empty());

    let second = &ideas[1];
    assert_eq!(second.status, IdeaStatus::Published);
    assert!(!second.collaboration_open());
    assert_eq!(
        second.created_at,
        Utc.with_ymd_and_hms(2025, 11, 12, 0, 0, 0).single().unwrap()
    );
}

#[test]
fn imported_ideas_round_trip_through_the_wire_format() {
    let csv = format!(
        "{HEADER}IDEA-1,Solar roof,Panels on the warehouse,Sustainability,u-9,Dana Reyes,Facilities,Approved,energy,12500,Q3 2026,yes,2026-01-05T08:00:00Z,\n"
    );

    let ideas =
        LegacyIdeaImporter::from_reader(Cursor::new(csv), imported_at()).expect("import succeeds");
    let wire = serde_json::to_string(&ideas[0]).expect("serialize");
    let reconstructed: ideahub::workflows::ideas::Idea =
        serde_json::from_str(&wire).expect("deserialize");
    assert_eq!(reconstructed, ideas[0]);
}

#[test]
fn malformed_exports_surface_csv_errors() {
    // Second row carries more columns than the header declares.
    let csv = format!("{HEADER}IDEA-1,Title only,,,,,,,,,,,,,extra-column\n");

    let error = LegacyIdeaImporter::from_reader(Cursor::new(csv), imported_at())
        .expect_err("column mismatch must fail");
    assert!(error.to_string().contains("CSV"));
}
