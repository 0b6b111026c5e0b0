use super::domain::{
    fields, FieldKind, FormField, FormTemplate, Idea, RatingDimension,
};

/// Resolve the rubric an idea is judged against.
///
/// The idea's template wins when it is active and carries a non-empty rating
/// config; in every other case (no template reference, template deleted or
/// deactivated, empty config) the fixed fallback rubric applies. Never
/// returns an empty list and has no error path.
pub fn resolve_dimensions(idea: &Idea, templates: &[FormTemplate]) -> Vec<RatingDimension> {
    if let Some(template_id) = &idea.template_id {
        if let Some(template) = templates
            .iter()
            .find(|template| template.is_active && &template.id == template_id)
        {
            if !template.rating_config.is_empty() {
                return template.rating_config.clone();
            }
        }
    }

    default_rubric()
}

/// The published fallback rubric used when an idea has no usable template.
pub fn default_rubric() -> Vec<RatingDimension> {
    fn dimension(id: &str, name: &str, description: &str, weight: f32) -> RatingDimension {
        RatingDimension {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            weight,
        }
    }

    vec![
        dimension(
            "impact",
            "Impact",
            "How much the idea would improve outcomes for customers or the business.",
            30.0,
        ),
        dimension(
            "feasibility",
            "Feasibility",
            "How realistic delivery is with the teams and systems we have.",
            20.0,
        ),
        dimension(
            "roi",
            "ROI",
            "Expected return relative to the cost of building it.",
            20.0,
        ),
        dimension(
            "innovation",
            "Innovation",
            "How novel the approach is compared to what exists today.",
            15.0,
        ),
        dimension(
            "risk",
            "Risk",
            "Confidence that delivery and adoption risks are manageable.",
            15.0,
        ),
    ]
}

/// Template seeded into an empty template store so ideas always have a
/// schema and rubric to land on.
pub fn default_template() -> FormTemplate {
    FormTemplate {
        id: "default".to_string(),
        name: "General Proposal".to_string(),
        description: "Standard intake form for employee proposals.".to_string(),
        fields: vec![
            FormField {
                id: fields::COST.to_string(),
                label: "Estimated cost".to_string(),
                kind: FieldKind::Number,
                required: false,
            },
            FormField {
                id: fields::TIMELINE.to_string(),
                label: "Expected timeline".to_string(),
                kind: FieldKind::Text,
                required: false,
            },
            FormField {
                id: fields::COLLABORATION.to_string(),
                label: "Open for collaboration".to_string(),
                kind: FieldKind::Boolean,
                required: false,
            },
        ],
        rating_config: default_rubric(),
        is_active: true,
    }
}
