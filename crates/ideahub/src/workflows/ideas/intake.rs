use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::domain::{
    Actor, DynamicValue, FormTemplate, Idea, IdeaDraft, IdeaId, IdeaStatus, Role,
};
use crate::workflows::legacy::normalize_dynamic_keys;

/// Validation errors raised while turning a draft into a stored idea.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("idea title must not be empty")]
    MissingTitle,
    #[error("idea description must not be empty")]
    MissingDescription,
    #[error("guests may not submit ideas")]
    GuestSubmission,
    #[error("an idea can only be created as a draft or a submission, not {found}")]
    InvalidInitialStatus { found: IdeaStatus },
    #[error("required field '{0}' is missing")]
    MissingField(String),
    #[error("field '{field}' expects a {expected} value")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
    },
}

/// Guard producing validated `Idea` aggregates from author submissions.
///
/// Normalizes legacy dynamic-data keys in one place and checks the typed
/// values against the referenced template's schema. A missing or inactive
/// template is not an error; validation is skipped and the fallback rubric
/// applies at rating time.
#[derive(Debug, Clone, Default)]
pub struct IdeaIntake;

impl IdeaIntake {
    /// Build a new idea from a draft. The id is assigned by the service
    /// after validation succeeds.
    pub fn idea_from_draft(
        &self,
        draft: IdeaDraft,
        author: &Actor,
        templates: &[FormTemplate],
        now: DateTime<Utc>,
    ) -> Result<Idea, ValidationError> {
        if author.role == Role::Guest {
            return Err(ValidationError::GuestSubmission);
        }

        let status = match draft.status {
            None | Some(IdeaStatus::Draft) => IdeaStatus::Draft,
            Some(IdeaStatus::Submitted) => IdeaStatus::Submitted,
            Some(found) => return Err(ValidationError::InvalidInitialStatus { found }),
        };

        let content = self.validated_content(draft, templates)?;

        Ok(Idea {
            id: IdeaId("pending".to_string()),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            department: author.department.clone().unwrap_or_default(),
            title: content.title,
            description: content.description,
            category: content.category,
            cover_image: content.cover_image,
            tags: content.tags,
            status,
            template_id: content.template_id,
            template_name: content.template_name,
            dynamic_data: content.dynamic_data,
            parent_idea_id: content.parent_idea_id,
            ratings: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite an existing idea's content fields from an authored edit.
    ///
    /// Identity, authorship, status, ratings, comments, and `created_at` are
    /// untouched; the caller authorizes the edit and resolves the status
    /// through the lifecycle rules first.
    pub fn apply_edit(
        &self,
        idea: &mut Idea,
        draft: IdeaDraft,
        templates: &[FormTemplate],
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let content = self.validated_content(draft, templates)?;

        idea.title = content.title;
        idea.description = content.description;
        idea.category = content.category;
        idea.cover_image = content.cover_image;
        idea.tags = content.tags;
        // The denormalized name outlives template deletion; only refresh it
        // when the linkage changed or the template resolved again.
        if content.template_name.is_some() || idea.template_id != content.template_id {
            idea.template_name = content.template_name;
        }
        idea.template_id = content.template_id;
        idea.dynamic_data = content.dynamic_data;
        idea.parent_idea_id = content.parent_idea_id;
        idea.updated_at = now;

        Ok(())
    }

    fn validated_content(
        &self,
        draft: IdeaDraft,
        templates: &[FormTemplate],
    ) -> Result<ValidatedContent, ValidationError> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if draft.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let dynamic_data = normalize_dynamic_keys(draft.dynamic_data);

        let template = draft.template_id.as_deref().and_then(|template_id| {
            templates
                .iter()
                .find(|template| template.is_active && template.id == template_id)
        });

        if let Some(template) = template {
            validate_dynamic_data(template, &dynamic_data)?;
        }

        Ok(ValidatedContent {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            category: draft.category,
            cover_image: draft.cover_image,
            tags: draft.tags,
            template_id: draft.template_id,
            template_name: template.map(|template| template.name.clone()),
            dynamic_data,
            parent_idea_id: draft.parent_idea_id,
        })
    }
}

struct ValidatedContent {
    title: String,
    description: String,
    category: String,
    cover_image: Option<String>,
    tags: Vec<String>,
    template_id: Option<String>,
    template_name: Option<String>,
    dynamic_data: BTreeMap<String, DynamicValue>,
    parent_idea_id: Option<IdeaId>,
}

/// Check typed dynamic values against the template's field schema. Unknown
/// keys are allowed (the mapping is open); known keys must match the field
/// type and required fields must be present.
pub fn validate_dynamic_data(
    template: &FormTemplate,
    data: &BTreeMap<String, DynamicValue>,
) -> Result<(), ValidationError> {
    for field in &template.fields {
        match data.get(&field.id) {
            Some(value) => {
                if !field.kind.accepts(value) {
                    return Err(ValidationError::FieldTypeMismatch {
                        field: field.id.clone(),
                        expected: field.kind.label(),
                    });
                }
            }
            None if field.required => {
                return Err(ValidationError::MissingField(field.id.clone()));
            }
            None => {}
        }
    }

    Ok(())
}
