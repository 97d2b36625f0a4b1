// SPDX-FileCopyrightText: 2025-2026 Atelier Developers <dev@atelier.example>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the `Atelier` facade.

mod common;

use atelier_core::{Atelier, Config, RuleDraft};
use jiff::civil::date;

use common::{MemoryBackend, MemoryError, test_config, weekly_rule};

fn atelier(config: Config) -> Atelier<MemoryBackend> {
    let backend = MemoryBackend::with_rules(vec![
        weekly_rule("r1", "w1", "TU", "18:00", 60, Some(date(2025, 1, 1))),
        weekly_rule("r2", "w2", "TH", "07:00", 45, None),
    ]);
    Atelier::new(config, backend).unwrap()
}

#[tokio::test]
async fn sessions_load_and_expand() {
    let atelier = atelier(test_config());
    assert_eq!(atelier.timezone().iana_name(), Some("Europe/Berlin"));

    let sessions = atelier
        .sessions(None, date(2025, 6, 2), date(2025, 6, 8))
        .await
        .unwrap();
    let ids: Vec<_> = sessions.iter().map(|o| o.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);

    let sessions = atelier
        .sessions(Some("w2"), date(2025, 6, 2), date(2025, 6, 8))
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].date, date(2025, 6, 5));
}

#[tokio::test]
async fn repeated_queries_are_coalesced_until_mutation() {
    let atelier = atelier(test_config());
    let (from, to) = (date(2025, 6, 2), date(2025, 6, 8));

    atelier.sessions(None, from, to).await.unwrap();
    atelier.sessions(None, from, to).await.unwrap();
    assert_eq!(atelier.store().backend().list_calls(), 1);

    let draft = RuleDraft::new("w1", "Loft", "12:00", 30, "FREQ=WEEKLY;BYDAY=WE");
    atelier.create_rule(&draft).await.unwrap();

    let sessions = atelier.sessions(None, from, to).await.unwrap();
    assert_eq!(atelier.store().backend().list_calls(), 2);
    assert_eq!(sessions.len(), 3);
}

#[tokio::test]
async fn coalescing_can_be_disabled() {
    let config = Config {
        coalesce: false,
        ..test_config()
    };
    let atelier = atelier(config);
    let (from, to) = (date(2025, 6, 2), date(2025, 6, 8));

    atelier.sessions(None, from, to).await.unwrap();
    atelier.sessions(None, from, to).await.unwrap();
    assert_eq!(atelier.store().backend().list_calls(), 2);
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let atelier = atelier(test_config());
    let (from, to) = (date(2025, 6, 2), date(2025, 6, 8));

    atelier.store().backend().fail_next();
    let err = atelier.sessions(None, from, to).await.unwrap_err();
    assert_eq!(err, MemoryError::Injected);

    let sessions = atelier.sessions(None, from, to).await.unwrap();
    assert_eq!(sessions.len(), 2);
}

#[tokio::test]
async fn rule_crud_through_facade() {
    let atelier = atelier(test_config());
    atelier.load(None).await.unwrap();
    assert_eq!(atelier.rules(None).await.len(), 2);

    let mut draft = atelier.rules(Some("w1")).await[0].draft.clone();
    draft.is_active = false;
    atelier.update_rule("r1", &draft).await.unwrap();

    let sessions = atelier
        .cached_sessions(Some("w1"), date(2025, 6, 2), date(2025, 6, 8))
        .await;
    assert!(sessions.is_empty());

    atelier.delete_rule("r2").await.unwrap();
    assert_eq!(atelier.rules(None).await.len(), 1);
}

#[test]
fn rejects_invalid_timezone() {
    let config = Config {
        timezone: Some("Nowhere/Special".to_string()),
        ..test_config()
    };
    assert!(Atelier::new(config, MemoryBackend::default()).is_err());
}

#[test]
fn week_follows_configured_start() {
    let atelier = atelier(test_config());
    // 2025-06-05 is a Thursday
    assert_eq!(atelier.week_of(date(2025, 6, 5)), (date(2025, 6, 2), date(2025, 6, 8)));
    assert_eq!(atelier.week_of(date(2025, 6, 2)), (date(2025, 6, 2), date(2025, 6, 8)));
    assert_eq!(atelier.week_of(date(2025, 6, 8)), (date(2025, 6, 2), date(2025, 6, 8)));
}
