use super::common::*;
use crate::workflows::ideas::domain::{fields, DynamicValue, IdeaStatus};
use crate::workflows::ideas::intake::{IdeaIntake, ValidationError};
use crate::workflows::ideas::rubric;

fn intake() -> IdeaIntake {
    IdeaIntake::default()
}

fn templates() -> Vec<crate::workflows::ideas::domain::FormTemplate> {
    vec![rubric::default_template(), custom_template()]
}

#[test]
fn draft_becomes_a_timestamped_idea_with_denormalized_template_name() {
    let author = employee("u-1", "Uma");
    let idea = intake()
        .idea_from_draft(draft(), &author, &templates(), fixed_now())
        .expect("valid draft accepted");

    assert_eq!(idea.author_id, "u-1");
    assert_eq!(idea.author_name, "Uma");
    assert_eq!(idea.department, "Operations");
    assert_eq!(idea.status, IdeaStatus::Submitted);
    assert_eq!(idea.template_name.as_deref(), Some("General Proposal"));
    assert_eq!(idea.created_at, fixed_now());
    assert_eq!(idea.updated_at, fixed_now());
    assert!(idea.ratings.is_empty());
    assert!(idea.comments.is_empty());
}

#[test]
fn status_defaults_to_draft_when_unset() {
    let author = employee("u-1", "Uma");
    let mut payload = draft();
    payload.status = None;

    let idea = intake()
        .idea_from_draft(payload, &author, &templates(), fixed_now())
        .expect("valid draft accepted");
    assert_eq!(idea.status, IdeaStatus::Draft);
}

#[test]
fn creation_cannot_skip_review() {
    let author = employee("u-1", "Uma");

    for status in [
        IdeaStatus::Approved,
        IdeaStatus::Published,
        IdeaStatus::Rejected,
        IdeaStatus::NeedsRevision,
    ] {
        let mut payload = draft();
        payload.status = Some(status);
        let error = intake()
            .idea_from_draft(payload, &author, &templates(), fixed_now())
            .expect_err("privileged initial status rejected");
        assert_eq!(error, ValidationError::InvalidInitialStatus { found: status });
    }
}

#[test]
fn empty_title_and_description_are_rejected() {
    let author = employee("u-1", "Uma");

    let mut payload = draft();
    payload.title = "   ".to_string();
    assert_eq!(
        intake()
            .idea_from_draft(payload, &author, &templates(), fixed_now())
            .expect_err("blank title rejected"),
        ValidationError::MissingTitle
    );

    let mut payload = draft();
    payload.description = String::new();
    assert_eq!(
        intake()
            .idea_from_draft(payload, &author, &templates(), fixed_now())
            .expect_err("blank description rejected"),
        ValidationError::MissingDescription
    );
}

#[test]
fn guests_cannot_author_ideas() {
    let error = intake()
        .idea_from_draft(draft(), &guest(), &templates(), fixed_now())
        .expect_err("guest submission rejected");
    assert_eq!(error, ValidationError::GuestSubmission);
}

#[test]
fn typed_fields_are_checked_against_the_template_schema() {
    let author = employee("u-1", "Uma");

    let mut payload = draft();
    payload.template_id = Some("pilot".to_string());
    payload.dynamic_data.clear();
    payload
        .dynamic_data
        .insert("budget".to_string(), DynamicValue::Text("a lot".to_string()));

    let error = intake()
        .idea_from_draft(payload, &author, &templates(), fixed_now())
        .expect_err("type mismatch rejected");
    assert_eq!(
        error,
        ValidationError::FieldTypeMismatch {
            field: "budget".to_string(),
            expected: "number",
        }
    );

    let mut payload = draft();
    payload.template_id = Some("pilot".to_string());
    payload.dynamic_data.clear();
    let error = intake()
        .idea_from_draft(payload, &author, &templates(), fixed_now())
        .expect_err("missing required field rejected");
    assert_eq!(error, ValidationError::MissingField("budget".to_string()));
}

#[test]
fn unknown_dynamic_keys_pass_through() {
    let author = employee("u-1", "Uma");
    let mut payload = draft();
    payload
        .dynamic_data
        .insert("region".to_string(), DynamicValue::Text("EMEA".to_string()));

    let idea = intake()
        .idea_from_draft(payload, &author, &templates(), fixed_now())
        .expect("open mapping accepts unknown keys");
    assert_eq!(
        idea.dynamic_data.get("region"),
        Some(&DynamicValue::Text("EMEA".to_string()))
    );
}

#[test]
fn missing_template_skips_schema_validation() {
    let author = employee("u-1", "Uma");
    let mut payload = draft();
    payload.template_id = Some("retired-template".to_string());

    let idea = intake()
        .idea_from_draft(payload, &author, &templates(), fixed_now())
        .expect("dangling template reference tolerated");
    assert_eq!(idea.template_id.as_deref(), Some("retired-template"));
    assert_eq!(idea.template_name, None);
}

#[test]
fn legacy_keys_are_normalized_on_the_way_in() {
    let author = employee("u-1", "Uma");
    let mut payload = draft();
    payload.dynamic_data.clear();
    payload
        .dynamic_data
        .insert("estimatedCost".to_string(), DynamicValue::Number(900.0));
    payload.dynamic_data.insert(
        "collaborationOpen".to_string(),
        DynamicValue::Boolean(true),
    );

    let idea = intake()
        .idea_from_draft(payload, &author, &templates(), fixed_now())
        .expect("legacy keys accepted");
    assert_eq!(
        idea.dynamic_data.get(fields::COST),
        Some(&DynamicValue::Number(900.0))
    );
    assert!(idea.collaboration_open());
    assert!(!idea.dynamic_data.contains_key("estimatedCost"));
}

#[test]
fn edit_preserves_identity_and_discussion() {
    let author = employee("u-1", "Uma");
    let mut idea = intake()
        .idea_from_draft(draft(), &author, &templates(), fixed_now())
        .expect("valid draft accepted");
    idea.ratings.push(rating("m-1", 80));
    let created_at = idea.created_at;

    let mut edit = draft();
    edit.title = "Reusable packaging loop v2".to_string();
    let later = fixed_now() + chrono::Duration::days(1);

    intake()
        .apply_edit(&mut idea, edit, &templates(), later)
        .expect("edit accepted");

    assert_eq!(idea.title, "Reusable packaging loop v2");
    assert_eq!(idea.created_at, created_at);
    assert_eq!(idea.updated_at, later);
    assert_eq!(idea.ratings.len(), 1);
}

#[test]
fn edit_keeps_denormalized_name_when_template_disappears() {
    let author = employee("u-1", "Uma");
    let mut idea = intake()
        .idea_from_draft(draft(), &author, &templates(), fixed_now())
        .expect("valid draft accepted");
    assert_eq!(idea.template_name.as_deref(), Some("General Proposal"));

    // The template store no longer carries the referenced template.
    intake()
        .apply_edit(&mut idea, draft(), &[], fixed_now())
        .expect("edit accepted without template");

    assert_eq!(idea.template_name.as_deref(), Some("General Proposal"));
}
