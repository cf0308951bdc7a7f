//! Review scores, averaging, and top-rated ranking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lowest score a reviewer may give on any axis.
pub const MIN_SCORE: i32 = 1;

/// Highest score a reviewer may give on any axis.
pub const MAX_SCORE: i32 = 10;

/// Number of ideas shown in the analytics top-rated list.
pub const DEFAULT_TOP_RATED_LIMIT: usize = 5;

/// The three scores a reviewer assigns to an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewScores {
    pub innovation_score: i32,
    pub feasibility_score: i32,
    pub impact_score: i32,
}

impl ReviewScores {
    /// Build a score set, rejecting any value outside `[MIN_SCORE, MAX_SCORE]`.
    pub fn new(innovation: i32, feasibility: i32, impact: i32) -> Result<Self, CoreError> {
        let scores = Self {
            innovation_score: innovation,
            feasibility_score: feasibility,
            impact_score: impact,
        };
        scores.validate()?;
        Ok(scores)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let named = [
            ("innovationScore", self.innovation_score),
            ("feasibilityScore", self.feasibility_score),
            ("impactScore", self.impact_score),
        ];
        for (name, value) in named {
            if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                return Err(CoreError::Validation(format!(
                    "{name} must be between {MIN_SCORE} and {MAX_SCORE}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Unrounded mean of the three scores.
    pub fn average(&self) -> f64 {
        f64::from(self.innovation_score + self.feasibility_score + self.impact_score) / 3.0
    }
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Validate the free-text part of a review.
pub fn validate_feedback(feedback: &str) -> Result<(), CoreError> {
    if feedback.trim().is_empty() {
        return Err(CoreError::Validation(
            "Review feedback must not be empty".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Top-rated ranking
-------------------------------------------------------------------------- */

/// One idea's best review, as produced by [`rank_top_rated`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedIdea<T> {
    pub idea_id: DbId,
    /// Best per-review average for the idea, rounded to one decimal.
    pub avg_score: f64,
    /// Scores of the review that produced `avg_score`.
    pub scores: ReviewScores,
    pub item: T,
}

/// Rank ideas by the maximum average score across their reviews.
///
/// `reviews` yields `(idea_id, scores, item)` per review, where `item` carries
/// whatever idea summary the caller wants returned. Ideas without reviews
/// never appear. Ties keep ascending idea id order.
pub fn rank_top_rated<T, I>(reviews: I, limit: usize) -> Vec<RankedIdea<T>>
where
    I: IntoIterator<Item = (DbId, ReviewScores, T)>,
{
    let mut best: BTreeMap<DbId, (f64, ReviewScores, T)> = BTreeMap::new();

    for (idea_id, scores, item) in reviews {
        let avg = scores.average();
        match best.get(&idea_id) {
            Some((current, _, _)) if avg <= *current => {}
            _ => {
                best.insert(idea_id, (avg, scores, item));
            }
        }
    }

    let mut ranked: Vec<RankedIdea<T>> = best
        .into_iter()
        .map(|(idea_id, (avg, scores, item))| RankedIdea {
            idea_id,
            avg_score: round_one_decimal(avg),
            scores,
            item,
        })
        .collect();

    // Stable sort: equal averages stay in idea id order.
    ranked.sort_by(|a, b| b.avg_score.total_cmp(&a.avg_score));
    ranked.truncate(limit);
    ranked
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
