//! Statistics and analytics shapes, composed from store aggregates.

use std::collections::BTreeMap;

use ideahub_core::status::IdeaStatus;
use ideahub_db::models::idea::DomainCount;
use ideahub_db::models::review::TopRatedIdea;
use serde::Serialize;

use crate::ports::StatusCounts;

/// Idea counts for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaStats {
    pub total: i64,
    pub submitted: i64,
    pub under_review: i64,
    pub approved: i64,
    pub rejected: i64,
    pub needs_improvement: i64,
    pub by_domain: BTreeMap<String, i64>,
}

impl IdeaStats {
    pub fn from_counts(total: i64, by_status: &StatusCounts, by_domain: &[DomainCount]) -> Self {
        let count = |status: IdeaStatus| by_status.get(&status).copied().unwrap_or(0);
        Self {
            total,
            submitted: count(IdeaStatus::Submitted),
            under_review: count(IdeaStatus::UnderReview),
            approved: count(IdeaStatus::Approved),
            rejected: count(IdeaStatus::Rejected),
            needs_improvement: count(IdeaStatus::NeedsImprovement),
            by_domain: by_domain
                .iter()
                .map(|d| (d.domain.clone(), d.count))
                .collect(),
        }
    }

    pub fn count_for(&self, status: IdeaStatus) -> i64 {
        match status {
            IdeaStatus::Submitted => self.submitted,
            IdeaStatus::UnderReview => self.under_review,
            IdeaStatus::Approved => self.approved,
            IdeaStatus::Rejected => self.rejected,
            IdeaStatus::NeedsImprovement => self.needs_improvement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_ideas: i64,
    pub submitted: i64,
    pub under_review: i64,
    pub approved: i64,
    pub rejected: i64,
    pub needs_improvement: i64,
    /// Whole-number percentage of ideas approved.
    pub approval_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    /// Human-readable status name.
    pub status: &'static str,
    pub count: i64,
}

/// The analytics report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub overview: Overview,
    pub status_distribution: Vec<StatusShare>,
    pub domain_distribution: Vec<DomainCount>,
    pub top_rated_ideas: Vec<TopRatedIdea>,
}

impl Analytics {
    pub fn compose(stats: &IdeaStats, top_rated_ideas: Vec<TopRatedIdea>) -> Self {
        let overview = Overview {
            total_ideas: stats.total,
            submitted: stats.submitted,
            under_review: stats.under_review,
            approved: stats.approved,
            rejected: stats.rejected,
            needs_improvement: stats.needs_improvement,
            approval_rate: approval_rate(stats.approved, stats.total),
        };

        let status_distribution = IdeaStatus::ALL
            .iter()
            .map(|&status| StatusShare {
                status: status.display_name(),
                count: stats.count_for(status),
            })
            .collect();

        let domain_distribution = stats
            .by_domain
            .iter()
            .map(|(domain, &count)| DomainCount {
                domain: domain.clone(),
                count,
            })
            .collect();

        Self {
            overview,
            status_distribution,
            domain_distribution,
            top_rated_ideas,
        }
    }
}

/// `round(approved / total * 100)`, or 0 when there are no ideas.
pub fn approval_rate(approved: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    (approved as f64 / total as f64 * 100.0).round() as i64
}
