//! In-memory stores.
//!
//! Each store keeps its rows in a `BTreeMap` behind a `tokio::sync::RwLock`
//! and hands out sequential ids. Listing order and validation match the
//! Postgres stores so tests exercise the same behaviour.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ideahub_core::error::CoreError;
use ideahub_core::idea::validate_new_idea;
use ideahub_core::roles::Role;
use ideahub_core::scoring::{rank_top_rated, validate_feedback};
use ideahub_core::status::IdeaStatus;
use ideahub_core::types::{DbId, Timestamp};
use ideahub_db::models::idea::{CreateIdea, DomainCount, Idea, IdeaSummary};
use ideahub_db::models::notification::Notification;
use ideahub_db::models::review::{CreateReview, Review, ReviewWithIdea, TopRatedIdea};
use ideahub_db::models::user::{CreateUser, User};
use ideahub_events::{Notice, NotificationSink};
use tokio::sync::RwLock;

use crate::backend::Backend;
use crate::ports::{IdeaStore, NotificationStore, ReviewStore, StatusCounts, UserDirectory};

/// Rows keyed by id plus the next id to hand out.
struct Table<T> {
    next_id: DbId,
    rows: BTreeMap<DbId, T>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(DbId) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    /// Rows matching `keep`, newest first by `(created_at, id)`.
    fn newest_first(&self, keep: impl Fn(&T) -> bool, key: impl Fn(&T) -> (Timestamp, DbId)) -> Vec<T> {
        let mut rows: Vec<T> = self.rows.values().filter(|r| keep(r)).cloned().collect();
        rows.sort_by(|a, b| key(b).cmp(&key(a)));
        rows
    }
}

/* --------------------------------------------------------------------------
Ideas
-------------------------------------------------------------------------- */

pub struct MemoryIdeaStore {
    table: RwLock<Table<Idea>>,
}

impl Default for MemoryIdeaStore {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl MemoryIdeaStore {
    async fn summaries(&self) -> HashMap<DbId, IdeaSummary> {
        let table = self.table.read().await;
        table.rows.values().map(|idea| (idea.id, idea.summary())).collect()
    }

    async fn list_where(&self, keep: impl Fn(&Idea) -> bool) -> Vec<Idea> {
        let table = self.table.read().await;
        table.newest_first(keep, |idea| (idea.created_at, idea.id))
    }

    async fn update(&self, id: DbId, apply: impl FnOnce(&mut Idea)) -> Result<Idea, CoreError> {
        let mut table = self.table.write().await;
        let idea = table
            .rows
            .get_mut(&id)
            .ok_or(CoreError::NotFound { entity: "Idea", id })?;
        apply(idea);
        idea.updated_at = Utc::now();
        Ok(idea.clone())
    }
}

#[async_trait]
impl IdeaStore for MemoryIdeaStore {
    async fn create(&self, input: &CreateIdea) -> Result<Idea, CoreError> {
        validate_new_idea(&input.title, &input.description, &input.domain)?;

        let now = Utc::now();
        let mut table = self.table.write().await;
        Ok(table.insert_with(|id| Idea {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            domain: input.domain.clone(),
            status: IdeaStatus::Submitted,
            innovator_id: input.innovator_id,
            reviewer_id: None,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Idea>, CoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Idea>, CoreError> {
        Ok(self.list_where(|_| true).await)
    }

    async fn list_by_innovator(&self, innovator_id: DbId) -> Result<Vec<Idea>, CoreError> {
        Ok(self.list_where(|idea| idea.innovator_id == innovator_id).await)
    }

    async fn list_by_reviewer(&self, reviewer_id: DbId) -> Result<Vec<Idea>, CoreError> {
        Ok(self
            .list_where(|idea| idea.reviewer_id == Some(reviewer_id))
            .await)
    }

    async fn set_status(&self, id: DbId, status: IdeaStatus) -> Result<Idea, CoreError> {
        self.update(id, |idea| idea.status = status).await
    }

    async fn set_reviewer(&self, id: DbId, reviewer_id: DbId) -> Result<Idea, CoreError> {
        self.update(id, |idea| {
            idea.reviewer_id = Some(reviewer_id);
            idea.status = IdeaStatus::UnderReview;
        })
        .await
    }

    async fn count_by_status(&self) -> Result<StatusCounts, CoreError> {
        let table = self.table.read().await;
        let mut counts = StatusCounts::new();
        for idea in table.rows.values() {
            *counts.entry(idea.status).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn count_by_domain(&self) -> Result<Vec<DomainCount>, CoreError> {
        let table = self.table.read().await;
        let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
        for idea in table.rows.values() {
            *counts.entry(idea.domain.as_str()).or_insert(0) += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(domain, count)| DomainCount {
                domain: domain.to_string(),
                count,
            })
            .collect())
    }

    async fn count(&self) -> Result<i64, CoreError> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}

/* --------------------------------------------------------------------------
Reviews
-------------------------------------------------------------------------- */

/// Reviews, joined against a shared idea store for summaries.
pub struct MemoryReviewStore {
    table: RwLock<Table<Review>>,
    ideas: Arc<MemoryIdeaStore>,
}

impl MemoryReviewStore {
    pub fn new(ideas: Arc<MemoryIdeaStore>) -> Self {
        Self {
            table: RwLock::new(Table::new()),
            ideas,
        }
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn create(&self, input: &CreateReview) -> Result<Review, CoreError> {
        input.scores.validate()?;
        validate_feedback(&input.feedback)?;

        // Holding the review table across the status write keeps the pair
        // atomic for readers. Lock order is always reviews, then ideas.
        let mut table = self.table.write().await;
        match input.status {
            Some(status) => {
                self.ideas.set_status(input.idea_id, status).await?;
            }
            None => {
                if self.ideas.find_by_id(input.idea_id).await?.is_none() {
                    return Err(CoreError::NotFound {
                        entity: "Idea",
                        id: input.idea_id,
                    });
                }
            }
        }

        Ok(table.insert_with(|id| Review {
            id,
            idea_id: input.idea_id,
            reviewer_id: input.reviewer_id,
            innovation_score: input.scores.innovation_score,
            feasibility_score: input.scores.feasibility_score,
            impact_score: input.scores.impact_score,
            feedback: input.feedback.clone(),
            created_at: Utc::now(),
        }))
    }

    async fn list_by_idea(&self, idea_id: DbId) -> Result<Vec<Review>, CoreError> {
        let table = self.table.read().await;
        Ok(table.newest_first(|r| r.idea_id == idea_id, |r| (r.created_at, r.id)))
    }

    async fn list_by_reviewer(&self, reviewer_id: DbId) -> Result<Vec<ReviewWithIdea>, CoreError> {
        let summaries = self.ideas.summaries().await;
        let table = self.table.read().await;
        Ok(table
            .newest_first(|r| r.reviewer_id == reviewer_id, |r| (r.created_at, r.id))
            .into_iter()
            .filter_map(|review| {
                let idea = summaries.get(&review.idea_id)?.clone();
                Some(ReviewWithIdea { review, idea })
            })
            .collect())
    }

    async fn top_rated(&self, limit: usize) -> Result<Vec<TopRatedIdea>, CoreError> {
        let summaries = self.ideas.summaries().await;
        let table = self.table.read().await;
        let scored = table.rows.values().filter_map(|review| {
            let summary = summaries.get(&review.idea_id)?.clone();
            Some((review.idea_id, review.scores(), summary))
        });
        Ok(rank_top_rated(scored, limit)
            .into_iter()
            .map(TopRatedIdea::from)
            .collect())
    }
}

/* --------------------------------------------------------------------------
Users
-------------------------------------------------------------------------- */

pub struct MemoryUserDirectory {
    table: RwLock<Table<User>>,
}

impl Default for MemoryUserDirectory {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, input: &CreateUser) -> Result<User, CoreError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.email == input.email) {
            return Err(CoreError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }
        Ok(table.insert_with(|id| User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role,
            created_at: Utc::now(),
        }))
    }

    async fn list_all(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, CoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().filter(|u| u.role == role).cloned().collect())
    }
}

/* --------------------------------------------------------------------------
Notifications
-------------------------------------------------------------------------- */

pub struct MemoryNotificationStore {
    table: RwLock<Table<Notification>>,
}

impl Default for MemoryNotificationStore {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

#[async_trait]
impl NotificationSink for MemoryNotificationStore {
    async fn emit(&self, notice: &Notice) -> Result<(), CoreError> {
        let mut table = self.table.write().await;
        table.insert_with(|id| Notification {
            id,
            user_id: notice.user_id,
            message: notice.message.clone(),
            is_read: false,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Notification>, CoreError> {
        let table = self.table.read().await;
        Ok(table.newest_first(|n| n.user_id == user_id, |n| (n.created_at, n.id)))
    }

    async fn mark_read(&self, notification_id: DbId, user_id: DbId) -> Result<bool, CoreError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&notification_id) {
            Some(n) if n.user_id == user_id => {
                n.is_read = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: DbId) -> Result<u64, CoreError> {
        let mut table = self.table.write().await;
        let mut changed = 0;
        for n in table.rows.values_mut() {
            if n.user_id == user_id && !n.is_read {
                n.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn unread_count(&self, user_id: DbId) -> Result<i64, CoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }
}

/* --------------------------------------------------------------------------
Bundle
-------------------------------------------------------------------------- */

/// Concrete in-memory stores, kept typed so tests can inspect them.
#[derive(Clone)]
pub struct MemoryBackend {
    pub ideas: Arc<MemoryIdeaStore>,
    pub reviews: Arc<MemoryReviewStore>,
    pub users: Arc<MemoryUserDirectory>,
    pub notifications: Arc<MemoryNotificationStore>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        let ideas = Arc::new(MemoryIdeaStore::default());
        Self {
            reviews: Arc::new(MemoryReviewStore::new(Arc::clone(&ideas))),
            ideas,
            users: Arc::new(MemoryUserDirectory::default()),
            notifications: Arc::new(MemoryNotificationStore::default()),
        }
    }

    pub fn backend(&self) -> Backend {
        Backend {
            ideas: self.ideas.clone(),
            reviews: self.reviews.clone(),
            users: self.users.clone(),
            notifications: self.notifications.clone(),
            sink: self.notifications.clone(),
        }
    }
}
