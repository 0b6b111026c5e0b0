use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::RatingDimension;

/// Letter bands for a weighted evaluation. Declaration order is ascending so
/// band comparisons follow `D < C < B < A`. There is no band below D: raw
/// scores are confined to 1-5, so the weighted percentage never drops under
/// 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    D,
    C,
    B,
    A,
}

impl Grade {
    pub const fn from_percentage(percentage: u8) -> Self {
        match percentage {
            80..=u8::MAX => Self::A,
            60..=79 => Self::B,
            40..=59 => Self::C,
            _ => Self::D,
        }
    }

    pub const fn letter(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

/// Derived result of grading one set of raw scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeOutcome {
    pub percentage: u8,
    pub grade: Grade,
    pub total_score: f64,
}

/// Grade a set of raw scores against the rubric dimensions.
///
/// A dimension missing from `scores` counts as the minimum raw score of 1.
/// The dimension list must be non-empty; rubric resolution guarantees a
/// non-empty list for every idea.
pub fn grade(dimensions: &[RatingDimension], scores: &BTreeMap<String, u8>) -> GradeOutcome {
    let mut weighted = 0.0_f32;
    let mut max_possible = 0.0_f32;

    for dimension in dimensions {
        let score = scores.get(&dimension.id).copied().unwrap_or(1);
        weighted += f32::from(score) * dimension.weight;
        max_possible += 5.0 * dimension.weight;
    }

    let percentage = (100.0 * weighted / max_possible).round() as u8;

    GradeOutcome {
        percentage,
        grade: Grade::from_percentage(percentage),
        total_score: f64::from(percentage) / 20.0,
    }
}
