// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::rule::{Rule, RuleDraft};

/// The rule persistence backend the store delegates I/O to.
///
/// Implementations own transport concerns (timeouts, authentication); the store never
/// retries and never rewrites their errors.
#[async_trait]
pub trait RuleBackend: Send + Sync {
    /// Error reported by the backend.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches all rules, or only those of one workshop.
    async fn list(&self, workshop_id: Option<&str>) -> Result<Vec<Rule>, Self::Error>;

    /// Persists a new rule and returns it with its assigned id.
    async fn create(&self, draft: &RuleDraft) -> Result<Rule, Self::Error>;

    /// Replaces the rule with the given id.
    async fn update(&self, id: &str, draft: &RuleDraft) -> Result<Rule, Self::Error>;

    /// Deletes the rule with the given id.
    async fn delete(&self, id: &str) -> Result<(), Self::Error>;
}

/// In-memory rule cache in front of a [`RuleBackend`].
///
/// Reads never block on backend calls. Mutations are serialized by a writer lock held across
/// the backend call, and the cache is only touched after the backend succeeds, so readers
/// observe either the old or the new state.
#[derive(Debug)]
pub struct RuleStore<B> {
    backend: B,
    rules: RwLock<Vec<Rule>>,
    writer: Mutex<()>,
}

impl<B: RuleBackend> RuleStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            rules: RwLock::new(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Refreshes the cache from the backend.
    ///
    /// With a workshop filter only that workshop's entries are replaced; otherwise the whole
    /// cache is. On failure the cache is left untouched.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, workshop_id: Option<&str>) -> Result<Vec<Rule>, B::Error> {
        let _writer = self.writer.lock().await;
        let workshop_id = workshop_id.map(str::trim).filter(|s| !s.is_empty());
        let fetched = self.backend.list(workshop_id).await?;

        // backends may ignore the query parameter
        let fetched: Vec<Rule> = fetched
            .into_iter()
            .filter(|r| workshop_id.is_none_or(|w| matches(r, w)))
            .collect();

        let mut rules = self.rules.write().await;
        match workshop_id {
            Some(w) => {
                rules.retain(|r| !matches(r, w));
                rules.extend(fetched.iter().cloned());
            }
            None => *rules = fetched.clone(),
        }
        tracing::debug!(count = fetched.len(), "loaded rules");
        Ok(fetched)
    }

    /// Cached rules, optionally restricted to one workshop.
    pub async fn list(&self, workshop_id: Option<&str>) -> Vec<Rule> {
        let workshop_id = workshop_id.map(str::trim).filter(|s| !s.is_empty());
        self.rules
            .read()
            .await
            .iter()
            .filter(|r| workshop_id.is_none_or(|w| matches(r, w)))
            .cloned()
            .collect()
    }

    /// Looks up a cached rule by id.
    pub async fn get(&self, id: &str) -> Option<Rule> {
        let id = id.trim();
        self.rules.read().await.iter().find(|r| r.id == id).cloned()
    }

    #[tracing::instrument(skip_all, fields(workshop_id = %draft.workshop_id))]
    pub async fn create(&self, draft: &RuleDraft) -> Result<Rule, B::Error> {
        let _writer = self.writer.lock().await;
        let rule = self.backend.create(draft).await?;
        tracing::info!(rule_id = %rule.id, "rule created");

        let mut rules = self.rules.write().await;
        rules.retain(|r| r.id != rule.id);
        rules.push(rule.clone());
        Ok(rule)
    }

    #[tracing::instrument(skip(self, draft))]
    pub async fn update(&self, id: &str, draft: &RuleDraft) -> Result<Rule, B::Error> {
        let _writer = self.writer.lock().await;
        let rule = self.backend.update(id, draft).await?;
        tracing::info!(rule_id = %rule.id, "rule updated");

        let mut rules = self.rules.write().await;
        match rules.iter_mut().find(|r| r.id == id || r.id == rule.id) {
            Some(slot) => *slot = rule.clone(),
            None => rules.push(rule.clone()),
        }
        Ok(rule)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), B::Error> {
        let _writer = self.writer.lock().await;
        self.backend.delete(id).await?;
        tracing::info!(rule_id = id, "rule deleted");

        self.rules.write().await.retain(|r| r.id != id);
        Ok(())
    }
}

fn matches(rule: &Rule, workshop_id: &str) -> bool {
    rule.workshop_id.trim() == workshop_id
}
