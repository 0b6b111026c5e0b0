use crate::infra::{DemoEvaluationAssistant, InMemoryIdeaStore, InMemoryTemplateStore};
use chrono::Utc;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use ideahub::error::AppError;
use ideahub::workflows::ideas::{
    fields, queries, Actor, DynamicValue, IdeaDraft, IdeaReviewService, IdeaStatus,
    LeaderboardEntry, Role, DEFAULT_LEADERBOARD_SIZE,
};
use ideahub::workflows::legacy::LegacyIdeaImporter;

#[derive(Args, Debug)]
pub(crate) struct LeaderboardArgs {
    /// Legacy tracker CSV export to rank
    #[arg(long)]
    pub(crate) source: PathBuf,
    /// Number of entries to show
    #[arg(long, default_value_t = DEFAULT_LEADERBOARD_SIZE)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the assistant-suggestion portion of the demo
    #[arg(long)]
    pub(crate) skip_assistant: bool,
}

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let LeaderboardArgs { source, limit } = args;

    let ideas = LegacyIdeaImporter::from_path(source, Utc::now())?;
    println!("Imported {} idea(s) from the legacy export", ideas.len());

    let entries = queries::top_ideas(&ideas, limit);
    render_leaderboard(&entries);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { skip_assistant } = args;

    println!("Idea review demo");

    let ideas = Arc::new(InMemoryIdeaStore::default());
    let templates = Arc::new(InMemoryTemplateStore::seeded());
    let service = IdeaReviewService::new(ideas, templates)
        .with_assistants(Some(Arc::new(DemoEvaluationAssistant)), None);

    let author = Actor {
        id: "u-100".to_string(),
        name: "Uma Okafor".to_string(),
        role: Role::Employee,
        department: Some("Operations".to_string()),
    };
    let reviewer = Actor {
        id: "m-1".to_string(),
        name: "Morgan Hale".to_string(),
        role: Role::Manager,
        department: None,
    };
    let second_reviewer = Actor {
        id: "m-2".to_string(),
        name: "Mika Chen".to_string(),
        role: Role::Manager,
        department: None,
    };

    println!("\nSubmissions");
    for (title, impact) in [
        ("Reusable packaging loop", 5u8),
        ("Cafeteria composting", 3),
        ("Warehouse robotics pilot", 4),
    ] {
        let idea = match service.submit_idea(demo_draft(title), &author) {
            Ok(idea) => idea,
            Err(err) => {
                println!("  Submission rejected: {}", err);
                return Ok(());
            }
        };
        println!("- {} -> {} ({})", idea.id, idea.title, idea.status.label());

        if !skip_assistant {
            match service.suggest_rating(&idea.id, &reviewer) {
                Ok(Some(suggestion)) => {
                    println!("  Assistant draft: {}", suggestion.comment)
                }
                Ok(None) => println!("  Assistant draft: unavailable"),
                Err(err) => println!("  Assistant draft failed: {}", err),
            }
        }

        for (manager, score) in [(&reviewer, impact), (&second_reviewer, impact.saturating_sub(1).max(1))] {
            if let Err(err) = service.submit_rating(&idea.id, manager, &demo_scores(score), "") {
                println!("  Rating rejected: {}", err);
                return Ok(());
            }
        }

        for to in [IdeaStatus::Approved, IdeaStatus::Published] {
            if let Err(err) = service.transition(&idea.id, to, &reviewer) {
                println!("  Transition rejected: {}", err);
                return Ok(());
            }
        }
    }

    println!("\nRevision loop");
    let revised = match service.submit_idea(demo_draft("Solar carport"), &author) {
        Ok(idea) => idea,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    if let Err(err) = service.transition(&revised.id, IdeaStatus::NeedsRevision, &reviewer) {
        println!("  Transition rejected: {}", err);
        return Ok(());
    }
    let mut resubmission = demo_draft("Solar carport");
    // No content assistant is wired up in the demo, so this keeps the
    // original text, which is exactly the degradation the platform promises.
    resubmission.description = service
        .polish_description("Covered parking with rooftop panels; phased rollout across two lots.");
    resubmission.status = Some(IdeaStatus::Submitted);
    match service.edit_idea(&revised.id, resubmission, &author) {
        Ok(idea) => println!("- {} resubmitted as {}", idea.id, idea.status.label()),
        Err(err) => {
            println!("  Resubmission rejected: {}", err);
            return Ok(());
        }
    }

    println!("\nLeaderboard");
    match service.leaderboard(DEFAULT_LEADERBOARD_SIZE) {
        Ok(entries) => render_leaderboard(&entries),
        Err(err) => println!("  Leaderboard unavailable: {}", err),
    }

    println!("\nSearch as another employee (query: \"packaging\")");
    let colleague = Actor {
        id: "u-200".to_string(),
        name: "Noor Haddad".to_string(),
        role: Role::Employee,
        department: Some("Finance".to_string()),
    };
    match service.search("packaging", &colleague) {
        Ok(results) => {
            for result in results {
                println!("- {} ({}) by {}", result.title, result.status_label, result.author_name);
            }
        }
        Err(err) => println!("  Search unavailable: {}", err),
    }

    println!("\nCollaboration feed");
    match service.collaboration_feed() {
        Ok(feed) => {
            for entry in feed {
                println!("- {} ({})", entry.title, entry.status_label);
            }
        }
        Err(err) => println!("  Feed unavailable: {}", err),
    }

    Ok(())
}

fn demo_draft(title: &str) -> IdeaDraft {
    let mut dynamic_data = BTreeMap::new();
    dynamic_data.insert(fields::COST.to_string(), DynamicValue::Number(4200.0));
    dynamic_data.insert(
        fields::TIMELINE.to_string(),
        DynamicValue::Text("Q3 2026".to_string()),
    );
    dynamic_data.insert(
        fields::COLLABORATION.to_string(),
        DynamicValue::Boolean(true),
    );

    IdeaDraft {
        title: title.to_string(),
        description: format!("{title}: proposal drafted for the review demo."),
        category: "Sustainability".to_string(),
        cover_image: None,
        tags: vec!["demo".to_string()],
        template_id: Some("default".to_string()),
        dynamic_data,
        parent_idea_id: None,
        status: Some(IdeaStatus::Submitted),
    }
}

fn demo_scores(impact: u8) -> BTreeMap<String, u8> {
    let mut scores = BTreeMap::new();
    scores.insert("impact".to_string(), impact);
    scores.insert("feasibility".to_string(), 4);
    scores.insert("roi".to_string(), 3);
    scores.insert("innovation".to_string(), 3);
    scores.insert("risk".to_string(), 2);
    scores
}

fn render_leaderboard(entries: &[LeaderboardEntry]) {
    if entries.is_empty() {
        println!("- no published ideas yet");
        return;
    }

    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>2}. {} | {} | {} | {:.1}% avg over {} rating(s)",
            rank + 1,
            entry.title,
            entry.author_name,
            entry.department,
            entry.average_percentage,
            entry.ratings
        );
    }
}
