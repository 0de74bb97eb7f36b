use std::future::Future;

use super::{make_declaration, make_notification, seed, TestResult, MRN};
use crate::record::StoreSeed;
use crate::{DecisionStore, StorageError};

pub(super) async fn run_fetch_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "fetch",
            "fetch_returns_seeded_declaration",
            fetch_returns_seeded_declaration(factory).await,
        ),
        TestResult::from_result(
            "fetch",
            "fetch_reports_stored_decision_version",
            fetch_reports_stored_decision_version(factory).await,
        ),
        TestResult::from_result(
            "fetch",
            "fetch_unknown_mrn_is_not_found",
            fetch_unknown_mrn_is_not_found(factory).await,
        ),
        TestResult::from_result(
            "fetch",
            "list_notifications_returns_linked",
            list_notifications_returns_linked(factory).await,
        ),
        TestResult::from_result(
            "fetch",
            "list_notifications_empty_for_unknown_mrn",
            list_notifications_empty_for_unknown_mrn(factory).await,
        ),
    ]
}

async fn fetch_returns_seeded_declaration<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(vec![make_declaration(MRN, None)], vec![])).await;
    let rec = s.fetch_declaration(MRN).await.map_err(|e| e.to_string())?;
    if rec.declaration.mrn != MRN {
        return Err(format!("expected mrn {MRN}, got {}", rec.declaration.mrn));
    }
    if rec.decision_version.is_some() || rec.prior_decision().is_some() {
        return Err("fresh declaration should carry no decision".to_string());
    }
    Ok(())
}

async fn fetch_reports_stored_decision_version<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(vec![make_declaration(MRN, Some("v1"))], vec![])).await;
    let rec = s.fetch_declaration(MRN).await.map_err(|e| e.to_string())?;
    if rec.decision_version.as_deref() != Some("v1") {
        return Err(format!(
            "expected decision version v1, got {:?}",
            rec.decision_version
        ));
    }
    Ok(())
}

async fn fetch_unknown_mrn_is_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(StoreSeed::default()).await;
    match s.fetch_declaration("25GB9999999999999").await {
        Err(StorageError::DeclarationNotFound { mrn }) if mrn == "25GB9999999999999" => Ok(()),
        Err(e) => Err(format!("expected DeclarationNotFound, got {e}")),
        Ok(_) => Err("expected DeclarationNotFound, got a record".to_string()),
    }
}

async fn list_notifications_returns_linked<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(
        vec![make_declaration(MRN, None)],
        vec![
            make_notification("CHEDA.GB.2025.1234567"),
            make_notification("CHEDA.GB.2025.7654321"),
        ],
    ))
    .await;
    let notifications = s.list_notifications(MRN).await.map_err(|e| e.to_string())?;
    if notifications.len() != 2 {
        return Err(format!("expected 2 notifications, got {}", notifications.len()));
    }
    Ok(())
}

async fn list_notifications_empty_for_unknown_mrn<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(StoreSeed::default()).await;
    let notifications = s
        .list_notifications("25GB9999999999999")
        .await
        .map_err(|e| e.to_string())?;
    if !notifications.is_empty() {
        return Err(format!("expected no notifications, got {}", notifications.len()));
    }
    Ok(())
}
