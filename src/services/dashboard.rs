//! Dashboard state
//!
//! Each visitor's results live in an explicit [`DashboardState`]. Every figure
//! starts at zero and changes only through the `record_*` entry points, so the
//! offset estimate never depends on which sections happened to be computed.

use crate::content::CONTENT;
use crate::models::{
    ImpactComponent, ImpactResult, OffsetEstimate, SavingsQuery, TrainingQuery, UsageQuery,
};
use crate::services::energy::{self, ModelError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// One visitor's dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub usage: ImpactResult,
    pub usage_computed: bool,
    pub training: ImpactResult,
    pub training_computed: bool,
    pub savings: ImpactResult,
    pub pledged: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_usage(&mut self, query: UsageQuery) -> Result<ImpactResult, ModelError> {
        let result = energy::usage_impact(query.prompt_count)?;
        self.usage = result;
        self.usage_computed = true;
        Ok(result)
    }

    pub fn record_training(&mut self, query: TrainingQuery) -> Result<ImpactResult, ModelError> {
        let result = energy::training_impact(query.model_count)?;
        self.training = result;
        self.training_computed = true;
        Ok(result)
    }

    pub fn record_savings(&mut self, query: SavingsQuery) -> Result<ImpactResult, ModelError> {
        let result = energy::savings(query.reduced_prompts)?;
        self.savings = result;
        Ok(result)
    }

    /// Records the visitor's support for greener AI
    pub fn pledge(&mut self) -> &'static str {
        self.pledged = true;
        CONTENT.pledge_message
    }

    /// Trees needed to offset the stored usage and training emissions.
    ///
    /// Components that were never recorded contribute zero.
    pub fn offset(&self) -> Result<OffsetEstimate, ModelError> {
        let total_co2_kg = self.usage.co2_kg + self.training.co2_kg;

        let mut components = Vec::new();
        if self.usage_computed {
            components.push(ImpactComponent::Usage);
        }
        if self.training_computed {
            components.push(ImpactComponent::Training);
        }

        Ok(OffsetEstimate {
            trees_per_year: energy::offset_trees(total_co2_kg)?,
            total_co2_kg,
            components,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A dashboard with bookkeeping timestamps
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: DashboardState,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            state: DashboardState::new(),
        }
    }
}

/// In-memory sessions keyed by id
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Create a fresh session, pruning idle ones first
    pub async fn create(&self) -> Session {
        let mut sessions = self.sessions.write().await;

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        if sessions.len() < before {
            debug!("Pruned {} idle sessions", before - sessions.len());
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|session| session.updated_at)
                .map(|session| session.id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    debug!("Evicted session {} to stay under the session limit", id);
                }
                None => break,
            }
        }

        let session = Session::new();
        sessions.insert(session.id, session.clone());
        info!("Created session {} ({} active)", session.id, sessions.len());
        session
    }

    /// Idle-expired sessions read as missing even before the next prune
    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .filter(|session| !self.is_expired(session, Utc::now()))
            .cloned()
    }

    /// Apply `f` to a session's state and return the updated session with its output
    pub async fn update<T, F>(&self, id: &Uuid, f: F) -> Option<(Session, T)>
    where
        F: FnOnce(&mut DashboardState) -> T,
    {
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(id)
            .is_some_and(|session| self.is_expired(session, Utc::now()))
        {
            sessions.remove(id);
            debug!("Dropped expired session {}", id);
            return None;
        }
        let session = sessions.get_mut(id)?;
        let output = f(&mut session.state);
        session.updated_at = Utc::now();
        Some((session.clone(), output))
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        let ttl = chrono::Duration::from_std(self.ttl)
            .unwrap_or_else(|_| chrono::Duration::days(365 * 100));
        now.signed_duration_since(session.updated_at) >= ttl
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
