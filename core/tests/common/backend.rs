// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory [`RuleBackend`] used by the store and facade tests.

use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use atelier_core::{Rule, RuleBackend, RuleDraft};

/// Error returned by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    /// Failure injected with [`MemoryBackend::fail_next`].
    Injected,

    /// No rule with the given id.
    NotFound(String),
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Injected => write!(f, "injected failure"),
            Self::NotFound(id) => write!(f, "rule not found: {id}"),
        }
    }
}

impl std::error::Error for MemoryError {}

/// Rule backend keeping everything in a vector.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    rules: Mutex<Vec<Rule>>,
    next_id: AtomicUsize,
    fail: AtomicBool,
    list_calls: AtomicUsize,
}

impl MemoryBackend {
    /// Creates a backend seeded with `rules`.
    #[must_use]
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules: Mutex::new(rules),
            ..Self::default()
        }
    }

    /// Makes the next call fail with [`MemoryError::Injected`].
    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Number of `list` calls served so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the persisted rules.
    pub fn persisted(&self) -> Vec<Rule> {
        self.rules.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), MemoryError> {
        if self.fail.swap(false, Ordering::SeqCst) {
            Err(MemoryError::Injected)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RuleBackend for MemoryBackend {
    type Error = MemoryError;

    async fn list(&self, workshop_id: Option<&str>) -> Result<Vec<Rule>, Self::Error> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let rules = self.rules.lock().unwrap();
        Ok(rules
            .iter()
            .filter(|r| workshop_id.is_none_or(|w| r.workshop_id.trim() == w))
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &RuleDraft) -> Result<Rule, Self::Error> {
        self.check()?;
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let rule = Rule::new(id, draft.clone());
        self.rules.lock().unwrap().push(rule.clone());
        Ok(rule)
    }

    async fn update(&self, id: &str, draft: &RuleDraft) -> Result<Rule, Self::Error> {
        self.check()?;
        let mut rules = self.rules.lock().unwrap();
        let slot = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| MemoryError::NotFound(id.to_string()))?;
        slot.draft = draft.clone();
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), Self::Error> {
        self.check()?;
        let mut rules = self.rules.lock().unwrap();
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Err(MemoryError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
