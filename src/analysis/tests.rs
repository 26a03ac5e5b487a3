//! Fusion and session behaviour tests
//!
//! In-process fakes stand in for the providers; a local stub server covers
//! the live adapters end to end.

use super::*;
use crate::config::ProvidersConfig;
use crate::constants::warnings::{REGION_UNAVAILABLE, STRUCTURES_UNAVAILABLE};
use crate::error::Error;
use crate::sources::{SourceKind, SourceResult, Unavailable};
use crate::testing::{climate_body, region_body, spawn_stub, structures_body};
use approx::assert_relative_eq;
use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Scripted source: `lookup` decides the answer, `delay` how long it takes
struct Fake<T> {
    lookup: fn(Coordinates) -> Option<T>,
    delay: fn(Coordinates) -> Duration,
    settled: Arc<AtomicUsize>,
}

impl<T: Copy + Send + Sync + 'static> Fake<T> {
    fn new(lookup: fn(Coordinates) -> Option<T>) -> Self {
        Self {
            lookup,
            delay: |_| Duration::ZERO,
            settled: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn delayed(mut self, delay: fn(Coordinates) -> Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn settle(&self, at: Coordinates, kind: SourceKind) -> SourceResult<T> {
        tokio::time::sleep((self.delay)(at)).await;
        self.settled.fetch_add(1, Ordering::SeqCst);
        (self.lookup)(at).ok_or_else(|| Unavailable::new(kind, "scripted outage"))
    }
}

impl ClimateSource for Fake<ClimateSummary> {
    async fn climate(&self, at: Coordinates) -> SourceResult<ClimateSummary> {
        self.settle(at, SourceKind::Climate).await
    }
}

impl StructureSource for Fake<u64> {
    async fn house_count(&self, at: Coordinates) -> SourceResult<u64> {
        self.settle(at, SourceKind::Structures).await
    }
}

impl RegionSource for Fake<&'static str> {
    async fn region(&self, at: Coordinates) -> SourceResult<RegionCode> {
        self.settle(at, SourceKind::Region).await.map(RegionCode::new)
    }
}

type FakeEngine = FusionEngine<Fake<ClimateSummary>, Fake<u64>, Fake<&'static str>>;

fn sunny(_: Coordinates) -> Option<ClimateSummary> {
    Some(ClimateSummary {
        peak_sun_hours: 6.0,
        avg_wind_speed_mph: 5.0,
    })
}

fn no_climate(_: Coordinates) -> Option<ClimateSummary> {
    None
}

fn hundred_houses(_: Coordinates) -> Option<u64> {
    Some(100)
}

fn no_houses(_: Coordinates) -> Option<u64> {
    None
}

/// Structures only answer east of the prime meridian
fn houses_east_only(at: Coordinates) -> Option<u64> {
    (at.lng >= 0.0).then_some(100)
}

fn kenya(_: Coordinates) -> Option<&'static str> {
    Some("KE")
}

fn no_region(_: Coordinates) -> Option<&'static str> {
    None
}

fn slow(_: Coordinates) -> Duration {
    Duration::from_millis(100)
}

/// Latitude doubles as the response delay in milliseconds
fn by_latitude(at: Coordinates) -> Duration {
    Duration::from_millis(at.lat.abs() as u64)
}

fn engine(
    climate: Fake<ClimateSummary>,
    structures: Fake<u64>,
    region: Fake<&'static str>,
) -> FakeEngine {
    FusionEngine::new(climate, structures, region)
}

fn here() -> Coordinates {
    Coordinates::new(-1.29, 36.82)
}

#[tokio::test]
async fn test_fuse_all_sources_available() {
    let engine = engine(Fake::new(sunny), Fake::new(hundred_houses), Fake::new(kenya));

    let fused = engine.fuse(here()).await.unwrap();

    assert!(fused.warnings.is_empty());
    assert_eq!(fused.dataset.number_of_houses(), 100);
    assert_eq!(fused.dataset.region().as_str(), "KE");
    assert_eq!(fused.dataset.avg_daily_usage_kwh(), 0.8);
    assert_eq!(fused.dataset.peak_sun_hours(), 6.0);
}

#[tokio::test]
async fn test_climate_failure_is_fatal() {
    let engine = engine(Fake::new(no_climate), Fake::new(hundred_houses), Fake::new(kenya));

    let err = engine.fuse(here()).await.unwrap_err();

    assert!(matches!(err, Error::ClimateUnavailable));
    assert_eq!(err.to_string(), "Could not fetch climate data.");
}

#[tokio::test]
async fn test_climate_failure_still_waits_for_other_sources() {
    let structures = Fake::new(hundred_houses).delayed(slow);
    let region = Fake::new(kenya).delayed(slow);
    let structures_settled = structures.settled.clone();
    let region_settled = region.settled.clone();
    let engine = engine(Fake::new(no_climate), structures, region);

    assert!(engine.fuse(here()).await.is_err());

    assert_eq!(structures_settled.load(Ordering::SeqCst), 1);
    assert_eq!(region_settled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_structure_failure_defaults_with_single_warning() {
    let engine = engine(Fake::new(sunny), Fake::new(no_houses), Fake::new(kenya));

    let fused = engine.fuse(here()).await.unwrap();

    assert_eq!(fused.dataset.number_of_houses(), 50);
    assert_eq!(fused.warnings, vec![STRUCTURES_UNAVAILABLE.to_string()]);
    assert_eq!(fused.dataset.region().as_str(), "KE");
}

#[tokio::test]
async fn test_region_failure_uses_global_average() {
    let engine = engine(Fake::new(sunny), Fake::new(hundred_houses), Fake::new(no_region));

    let fused = engine.fuse(here()).await.unwrap();

    assert!(fused.dataset.region().is_default());
    assert_eq!(fused.dataset.avg_daily_usage_kwh(), 9.6);
    assert_eq!(fused.warnings, vec![REGION_UNAVAILABLE.to_string()]);
}

#[tokio::test]
async fn test_warnings_accumulate_in_source_order() {
    // Region settles first; the structure warning must still lead
    let engine = engine(
        Fake::new(sunny),
        Fake::new(no_houses).delayed(slow),
        Fake::new(no_region),
    );

    let fused = engine.fuse(here()).await.unwrap();

    assert_eq!(
        fused.warnings,
        vec![STRUCTURES_UNAVAILABLE.to_string(), REGION_UNAVAILABLE.to_string()]
    );
    assert_eq!(fused.dataset.number_of_houses(), 50);
    assert!(fused.dataset.region().is_default());
}

#[tokio::test]
async fn test_warnings_do_not_leak_between_calls() {
    let engine = engine(Fake::new(sunny), Fake::new(houses_east_only), Fake::new(kenya));

    let west = engine.fuse(Coordinates::new(10.0, -5.0)).await.unwrap();
    let east = engine.fuse(Coordinates::new(10.0, 5.0)).await.unwrap();

    assert_eq!(west.warnings.len(), 1);
    assert!(east.warnings.is_empty());
}

#[tokio::test]
async fn test_sources_run_concurrently() {
    let engine = engine(
        Fake::new(sunny).delayed(slow),
        Fake::new(hundred_houses).delayed(slow),
        Fake::new(kenya).delayed(slow),
    );

    let started = Instant::now();
    engine.fuse(here()).await.unwrap();

    // Sequential execution would take at least 300ms
    assert!(started.elapsed() < Duration::from_millis(250));
}

#[tokio::test]
async fn test_analyze_builds_report() {
    let engine = engine(Fake::new(sunny), Fake::new(hundred_houses), Fake::new(kenya));

    let report = analyze(&engine, here()).await.unwrap();

    assert_eq!(report.recommendation.category, Category::Solar);
    assert_eq!(report.coordinates, here());
    assert_relative_eq!(report.demand.daily, 80.0, epsilon = 1e-9);
    assert_relative_eq!(report.demand.weekly, 560.0, epsilon = 1e-9);
    assert_relative_eq!(report.demand.monthly, 2400.0, epsilon = 1e-9);
    assert!(uuid::Uuid::parse_str(&report.id).is_ok());
}

#[tokio::test]
async fn test_analyze_rejects_invalid_coordinates_before_fetching() {
    let climate = Fake::new(sunny);
    let settled = climate.settled.clone();
    let engine = engine(climate, Fake::new(hundred_houses), Fake::new(kenya));

    let err = analyze(&engine, Coordinates::new(95.0, 0.0)).await.unwrap_err();

    assert!(matches!(err, Error::InvalidCoordinates(_)));
    assert_eq!(settled.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_session_starts_idle() {
    let session = AnalysisSession::new(engine(Fake::new(sunny), Fake::new(hundred_houses), Fake::new(kenya)));

    assert!(matches!(session.current().await, AnalysisOutcome::Idle));
    assert!(session.dataset().await.is_none());
    assert_eq!(session.project(Timeframe::Daily).await, None);
}

#[tokio::test]
async fn test_session_commits_success_and_projects() {
    let session = AnalysisSession::new(engine(Fake::new(sunny), Fake::new(hundred_houses), Fake::new(kenya)));

    let result = session.analyze(here()).await.unwrap();

    assert!(result.committed);
    assert_eq!(result.cycle, 1);
    assert!(matches!(session.current().await, AnalysisOutcome::Success(_)));
    assert_relative_eq!(session.project(Timeframe::Weekly).await.unwrap(), 560.0, epsilon = 1e-9);
    assert_relative_eq!(session.project(Timeframe::Monthly).await.unwrap(), 2400.0, epsilon = 1e-9);
}

#[tokio::test]
async fn test_session_failure_clears_previous_dataset() {
    // Climate only answers in the northern hemisphere
    fn northern(at: Coordinates) -> Option<ClimateSummary> {
        (at.lat >= 0.0).then(|| sunny(at)).flatten()
    }
    let session = AnalysisSession::new(engine(Fake::new(northern), Fake::new(hundred_houses), Fake::new(kenya)));

    session.analyze(Coordinates::new(10.0, 10.0)).await.unwrap();
    assert!(session.dataset().await.is_some());

    let result = session.analyze(Coordinates::new(-10.0, 10.0)).await.unwrap();

    assert!(result.committed);
    match session.current().await {
        AnalysisOutcome::Failure { reason } => assert_eq!(reason, "Could not fetch climate data."),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(session.dataset().await.is_none());
}

#[tokio::test]
async fn test_session_invalid_coordinates_leave_state_untouched() {
    let session = AnalysisSession::new(engine(Fake::new(sunny), Fake::new(hundred_houses), Fake::new(kenya)));

    assert!(session.analyze(Coordinates::new(0.0, 200.0)).await.is_err());

    assert!(matches!(session.current().await, AnalysisOutcome::Idle));
    assert_eq!(session.current_cycle().await, 0);
}

#[tokio::test]
async fn test_superseded_cycle_finishing_last_is_discarded() {
    let session = AnalysisSession::new(engine(
        Fake::new(sunny).delayed(by_latitude),
        Fake::new(hundred_houses),
        Fake::new(kenya),
    ));
    let first = Coordinates::new(80.0, 1.0);
    let second = Coordinates::new(5.0, 2.0);

    let (a, b) = tokio::join!(session.analyze(first), session.analyze(second));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(a.cycle < b.cycle);
    assert!(!a.committed);
    assert!(b.committed);
    match session.current().await {
        AnalysisOutcome::Success(report) => assert_eq!(report.coordinates, second),
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(session.current_cycle().await, b.cycle);
}

#[tokio::test]
async fn test_superseded_cycle_finishing_first_is_discarded() {
    let session = AnalysisSession::new(engine(
        Fake::new(sunny).delayed(by_latitude),
        Fake::new(hundred_houses),
        Fake::new(kenya),
    ));
    let first = Coordinates::new(5.0, 1.0);
    let second = Coordinates::new(60.0, 2.0);

    let (a, b) = tokio::join!(session.analyze(first), session.analyze(second));
    let (a, b) = (a.unwrap(), b.unwrap());

    // The older cycle still hands its own result back to its caller
    assert!(matches!(a.outcome, AnalysisOutcome::Success(_)));
    assert!(!a.committed);
    assert!(b.committed);
    match session.current().await {
        AnalysisOutcome::Success(report) => assert_eq!(report.coordinates, second),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sequential_cycles_each_commit() {
    let session = AnalysisSession::new(engine(Fake::new(sunny), Fake::new(hundred_houses), Fake::new(kenya)));

    let a = session.analyze(Coordinates::new(1.0, 1.0)).await.unwrap();
    let b = session.analyze(Coordinates::new(2.0, 2.0)).await.unwrap();

    assert!(a.committed);
    assert!(b.committed);
    assert_eq!(session.current_cycle().await, 2);
}

#[tokio::test]
async fn test_abandoned_cycle_still_settles() {
    let session = AnalysisSession::new(engine(
        Fake::new(sunny).delayed(by_latitude),
        Fake::new(hundred_houses),
        Fake::new(kenya),
    ));
    session.analyze(Coordinates::new(1.0, 1.0)).await.unwrap();

    // The caller gives up long before the 60 ms climate lookup returns
    let abandoned = Coordinates::new(60.0, 2.0);
    let gave_up = tokio::time::timeout(Duration::from_millis(10), session.analyze(abandoned)).await;
    assert!(gave_up.is_err());

    tokio::time::sleep(Duration::from_millis(300)).await;

    match session.current().await {
        AnalysisOutcome::Success(report) => assert_eq!(report.coordinates, abandoned),
        other => panic!("expected the abandoned cycle to settle, got {:?}", other),
    }
    assert_eq!(session.current_cycle().await, 2);
    assert!(session.dataset().await.is_some());
}

#[test]
fn test_outcome_serializes_with_state_tag() {
    let json = serde_json::to_value(AnalysisOutcome::Failure {
        reason: "Could not fetch climate data.".to_string(),
    })
    .unwrap();
    assert_eq!(json["state"], "failure");
    assert_eq!(json["reason"], "Could not fetch climate data.");

    let json = serde_json::to_value(AnalysisOutcome::Loading).unwrap();
    assert_eq!(json["state"], "loading");
}

fn stub_providers(base: &str) -> ProvidersConfig {
    ProvidersConfig {
        climate_url: format!("{}/v1/forecast", base),
        structures_url: format!("{}/api/interpreter", base),
        nominatim_url: base.to_string(),
        ..ProvidersConfig::default()
    }
}

#[tokio::test]
async fn test_live_engine_against_stub_providers() {
    let app = Router::new()
        .route("/v1/forecast", get(|| async { Json(climate_body(&[10.8; 30], &[14.0; 30])) }))
        .route("/api/interpreter", post(|| async { Json(structures_body("12")) }))
        .route("/reverse", get(|| async { Json(region_body("gb")) }));
    let base = spawn_stub(app).await;
    let engine = LiveEngine::from_config(&stub_providers(&base)).unwrap();

    let report = analyze(&engine, Coordinates::new(57.0, -4.0)).await.unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(report.recommendation.category, Category::Wind);
    assert_eq!(report.dataset.number_of_houses(), 12);
    assert_eq!(report.dataset.region().as_str(), "GB");
    assert_relative_eq!(report.dataset.peak_sun_hours(), 3.0, epsilon = 1e-9);
}

#[tokio::test]
async fn test_live_engine_degrades_when_secondary_providers_fail() {
    // Only climate is served; structures and region get 404s
    let app = Router::new().route("/v1/forecast", get(|| async { Json(climate_body(&[7.2; 30], &[3.0; 30])) }));
    let base = spawn_stub(app).await;
    let engine = LiveEngine::from_config(&stub_providers(&base)).unwrap();

    let report = analyze(&engine, Coordinates::new(0.0, 0.0)).await.unwrap();

    assert_eq!(report.recommendation.category, Category::Hybrid);
    assert_eq!(report.dataset.number_of_houses(), 50);
    assert!(report.dataset.region().is_default());
    assert_eq!(
        report.warnings,
        vec![STRUCTURES_UNAVAILABLE.to_string(), REGION_UNAVAILABLE.to_string()]
    );
    assert_relative_eq!(report.demand.daily, 480.0, epsilon = 1e-9);
}

#[tokio::test]
async fn test_live_engine_fails_without_climate() {
    let app = Router::new()
        .route("/api/interpreter", post(|| async { Json(structures_body("12")) }))
        .route("/reverse", get(|| async { Json(region_body("gb")) }));
    let base = spawn_stub(app).await;
    let engine = LiveEngine::from_config(&stub_providers(&base)).unwrap();

    let err = analyze(&engine, Coordinates::new(57.0, -4.0)).await.unwrap_err();

    assert!(matches!(err, Error::ClimateUnavailable));
}
