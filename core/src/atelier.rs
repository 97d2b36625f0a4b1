// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::sync::Arc;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{ToSpan, Zoned};

use crate::coalesce::RequestCoalescer;
use crate::expand::Expander;
use crate::occurrence::Occurrence;
use crate::rule::{Rule, RuleDraft};
use crate::store::{RuleBackend, RuleStore};
use crate::Config;

/// Key of a session query: optional workshop filter plus the inclusive window.
type SessionKey = (Option<String>, Date, Date);

/// Atelier scheduling application core.
#[derive(Debug)]
pub struct Atelier<B> {
    config: Config,
    tz: TimeZone,
    expander: Expander,
    store: RuleStore<B>,
    sessions: RequestCoalescer<SessionKey, Arc<Vec<Occurrence>>>,
}

impl<B: RuleBackend> Atelier<B> {
    /// Creates a new instance with the given configuration and backend.
    pub fn new(mut config: Config, backend: B) -> Result<Self, Box<dyn Error>> {
        config.normalize()?;
        let tz = config.resolve_timezone();
        tracing::debug!(timezone = ?tz.iana_name(), "resolved default timezone");

        Ok(Self {
            expander: Expander::new(tz.clone()),
            tz,
            config,
            store: RuleStore::new(backend),
            sessions: RequestCoalescer::new(),
        })
    }

    /// The configuration in effect.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The default zone of every expansion run.
    pub fn timezone(&self) -> &TimeZone {
        &self.tz
    }

    /// The current date in the default zone.
    pub fn today(&self) -> Date {
        Zoned::now().with_time_zone(self.tz.clone()).date()
    }

    /// The week containing `date`, starting on the configured first weekday.
    pub fn week_of(&self, date: Date) -> (Date, Date) {
        let start: jiff::civil::Weekday = self.config.week_start.into();
        let back = date.weekday().since(start);
        let from = date.saturating_sub(i64::from(back).days());
        (from, from.saturating_add(6.days()))
    }

    /// The rule store behind this instance.
    pub fn store(&self) -> &RuleStore<B> {
        &self.store
    }

    /// Refreshes rules from the backend.
    pub async fn load(&self, workshop_id: Option<&str>) -> Result<Vec<Rule>, B::Error> {
        let rules = self.store.load(workshop_id).await?;
        self.sessions.clear().await;
        Ok(rules)
    }

    /// Cached rules, optionally for one workshop.
    pub async fn rules(&self, workshop_id: Option<&str>) -> Vec<Rule> {
        self.store.list(workshop_id).await
    }

    pub async fn create_rule(&self, draft: &RuleDraft) -> Result<Rule, B::Error> {
        let rule = self.store.create(draft).await?;
        self.sessions.clear().await;
        Ok(rule)
    }

    pub async fn update_rule(&self, id: &str, draft: &RuleDraft) -> Result<Rule, B::Error> {
        let rule = self.store.update(id, draft).await?;
        self.sessions.clear().await;
        Ok(rule)
    }

    pub async fn delete_rule(&self, id: &str) -> Result<(), B::Error> {
        self.store.delete(id).await?;
        self.sessions.clear().await;
        Ok(())
    }

    /// Loads the rules of `workshop_id` (or all rules) and expands them over `[from, to]`.
    ///
    /// Identical queries share one backend fetch until the next mutation.
    #[tracing::instrument(skip(self))]
    pub async fn sessions(
        &self,
        workshop_id: Option<&str>,
        from: Date,
        to: Date,
    ) -> Result<Arc<Vec<Occurrence>>, B::Error> {
        let workshop_id = workshop_id.map(str::trim).filter(|s| !s.is_empty());
        let compute = || async {
            let rules = self.store.load(workshop_id).await?;
            let occurrences = self.expander.expand_range(&rules, from, to);
            Ok::<_, B::Error>(Arc::new(occurrences))
        };

        if !self.config.coalesce {
            return compute().await;
        }

        let key = (workshop_id.map(str::to_string), from, to);
        self.sessions.get_or_try_init(key, compute).await
    }

    /// Expands the currently cached rules without touching the backend.
    pub async fn cached_sessions(
        &self,
        workshop_id: Option<&str>,
        from: Date,
        to: Date,
    ) -> Vec<Occurrence> {
        let rules = self.store.list(workshop_id).await;
        self.expander.expand_range(&rules, from, to)
    }
}
