use std::future::Future;

use super::{make_decision, make_declaration, seed, TestResult, MRN};
use crate::record::StoreSeed;
use crate::{DecisionStore, StorageError};

pub(super) async fn run_write_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "write",
            "first_write_expects_no_version",
            first_write_expects_no_version(factory).await,
        ),
        TestResult::from_result(
            "write",
            "write_is_visible_to_fetch",
            write_is_visible_to_fetch(factory).await,
        ),
        TestResult::from_result(
            "write",
            "stale_version_returns_conflict",
            stale_version_returns_conflict(factory).await,
        ),
        TestResult::from_result(
            "write",
            "conflict_does_not_change_decision",
            conflict_does_not_change_decision(factory).await,
        ),
        TestResult::from_result(
            "write",
            "sequential_writes_chain_versions",
            sequential_writes_chain_versions(factory).await,
        ),
        TestResult::from_result(
            "write",
            "write_unknown_mrn_is_not_found",
            write_unknown_mrn_is_not_found(factory).await,
        ),
    ]
}

async fn first_write_expects_no_version<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(vec![make_declaration(MRN, None)], vec![])).await;
    let rec = s
        .write_decision(MRN, make_decision(Some("v1")), None)
        .await
        .map_err(|e| e.to_string())?;
    if rec.previous_version.is_some() || rec.source_version.as_deref() != Some("v1") {
        return Err(format!("unexpected write record {rec:?}"));
    }
    Ok(())
}

async fn write_is_visible_to_fetch<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(vec![make_declaration(MRN, None)], vec![])).await;
    s.write_decision(MRN, make_decision(Some("v1")), None)
        .await
        .map_err(|e| e.to_string())?;
    let rec = s.fetch_declaration(MRN).await.map_err(|e| e.to_string())?;
    if rec.decision_version.as_deref() != Some("v1") {
        return Err(format!("expected v1 after write, got {:?}", rec.decision_version));
    }
    Ok(())
}

async fn stale_version_returns_conflict<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(vec![make_declaration(MRN, Some("v2"))], vec![])).await;
    match s
        .write_decision(MRN, make_decision(Some("v3")), Some("v1"))
        .await
    {
        Err(StorageError::ConcurrentConflict {
            mrn,
            expected,
            actual,
        }) => {
            if mrn != MRN || expected.as_deref() != Some("v1") || actual.as_deref() != Some("v2") {
                return Err(format!(
                    "conflict fields wrong: mrn={mrn} expected={expected:?} actual={actual:?}"
                ));
            }
            Ok(())
        }
        Err(e) => Err(format!("expected ConcurrentConflict, got {e}")),
        Ok(rec) => Err(format!("expected ConcurrentConflict, got write {rec:?}")),
    }
}

async fn conflict_does_not_change_decision<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(vec![make_declaration(MRN, Some("v2"))], vec![])).await;
    // A first write against a declaration that already has a decision.
    let _ = s.write_decision(MRN, make_decision(Some("v3")), None).await;
    let rec = s.fetch_declaration(MRN).await.map_err(|e| e.to_string())?;
    if rec.decision_version.as_deref() != Some("v2") {
        return Err(format!(
            "decision changed by rejected write: {:?}",
            rec.decision_version
        ));
    }
    Ok(())
}

async fn sequential_writes_chain_versions<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(seed(vec![make_declaration(MRN, None)], vec![])).await;
    let first = s
        .write_decision(MRN, make_decision(Some("v1")), None)
        .await
        .map_err(|e| e.to_string())?;
    let second = s
        .write_decision(MRN, make_decision(Some("v2")), Some("v1"))
        .await
        .map_err(|e| e.to_string())?;
    if second.sequence <= first.sequence {
        return Err(format!(
            "write sequence did not advance: {} then {}",
            first.sequence, second.sequence
        ));
    }
    if second.previous_version.as_deref() != Some("v1") {
        return Err(format!(
            "expected previous version v1, got {:?}",
            second.previous_version
        ));
    }
    Ok(())
}

async fn write_unknown_mrn_is_not_found<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory(StoreSeed::default()).await;
    match s
        .write_decision("25GB9999999999999", make_decision(Some("v1")), None)
        .await
    {
        Err(StorageError::DeclarationNotFound { .. }) => Ok(()),
        Err(e) => Err(format!("expected DeclarationNotFound, got {e}")),
        Ok(rec) => Err(format!("expected DeclarationNotFound, got write {rec:?}")),
    }
}
