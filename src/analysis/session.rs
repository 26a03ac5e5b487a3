//! Analysis cycles and the observable outcome
//!
//! Every call to [`AnalysisSession::analyze`] starts a new cycle with a
//! monotonically increasing token. A cycle may only write the shared outcome
//! while its token is still the newest one issued, so a slow, superseded
//! cycle can never overwrite the result of a later coordinate.

use crate::analysis::{analyze, AnalysisReport, FusionEngine, LocationDataset};
use crate::coord::Coordinates;
use crate::energy::{project, Timeframe};
use crate::error::{Error, Result};
use crate::sources::{ClimateSource, RegionSource, StructureSource};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Externally observable state of the most recent cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// No cycle has started yet
    Idle,
    Loading,
    Success(AnalysisReport),
    Failure { reason: String },
}

impl AnalysisOutcome {
    pub fn dataset(&self) -> Option<&LocationDataset> {
        match self {
            Self::Success(report) => Some(&report.dataset),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failure { .. })
    }
}

impl From<Result<AnalysisReport>> for AnalysisOutcome {
    fn from(result: Result<AnalysisReport>) -> Self {
        match result {
            Ok(report) => Self::Success(report),
            Err(e) => Self::Failure { reason: e.to_string() },
        }
    }
}

/// What a single cycle produced, and whether it reached the shared state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleResult {
    pub cycle: u64,
    pub committed: bool,
    pub outcome: AnalysisOutcome,
}

#[derive(Debug)]
struct Committed {
    cycle: u64,
    outcome: AnalysisOutcome,
}

#[derive(Debug)]
struct Shared<C, S, R> {
    engine: FusionEngine<C, S, R>,
    latest: AtomicU64,
    state: RwLock<Committed>,
}

/// Owns the fusion engine and the single committed outcome
#[derive(Debug)]
pub struct AnalysisSession<C, S, R> {
    shared: Arc<Shared<C, S, R>>,
}

/// Session wired to the real providers
pub type LiveSession = AnalysisSession<
    crate::sources::OpenMeteoClimate,
    crate::sources::OverpassStructures,
    crate::sources::NominatimRegion,
>;

impl<C, S, R> Shared<C, S, R>
where
    C: ClimateSource + 'static,
    S: StructureSource + 'static,
    R: RegionSource + 'static,
{
    async fn run(&self, cycle: u64, at: Coordinates) -> CycleResult {
        self.mark_loading(cycle).await;
        let outcome = AnalysisOutcome::from(analyze(&self.engine, at).await);
        let committed = self.commit(cycle, outcome.clone()).await;

        CycleResult {
            cycle,
            committed,
            outcome,
        }
    }

    /// Mark the shared state as loading if `cycle` is still the newest
    ///
    /// Clears any previous dataset.
    async fn mark_loading(&self, cycle: u64) {
        let mut state = self.state.write().await;
        if self.latest.load(Ordering::SeqCst) == cycle {
            *state = Committed {
                cycle,
                outcome: AnalysisOutcome::Loading,
            };
        }
    }

    /// Write an outcome if `cycle` is still the newest; returns whether it was written
    async fn commit(&self, cycle: u64, outcome: AnalysisOutcome) -> bool {
        let mut state = self.state.write().await;
        if self.latest.load(Ordering::SeqCst) != cycle {
            debug!(cycle, "discarding superseded analysis result");
            return false;
        }
        info!(cycle, settled = outcome.is_settled(), "committing analysis result");
        *state = Committed { cycle, outcome };
        true
    }
}

impl<C, S, R> AnalysisSession<C, S, R>
where
    C: ClimateSource + 'static,
    S: StructureSource + 'static,
    R: RegionSource + 'static,
{
    pub fn new(engine: FusionEngine<C, S, R>) -> Self {
        Self {
            shared: Arc::new(Shared {
                engine,
                latest: AtomicU64::new(0),
                state: RwLock::new(Committed {
                    cycle: 0,
                    outcome: AnalysisOutcome::Idle,
                }),
            }),
        }
    }

    /// Run a cycle for a coordinate
    ///
    /// Invalid coordinates are rejected before a cycle starts and leave the
    /// shared state untouched. Otherwise the outcome is returned to the
    /// caller either way, but only committed if no newer cycle began.
    ///
    /// The cycle runs on its own task, so it still settles the shared state
    /// if the caller stops waiting for it.
    pub async fn analyze(&self, at: Coordinates) -> Result<CycleResult> {
        at.validate()?;

        let cycle = self.shared.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(cycle, "analysis cycle started");

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move { shared.run(cycle, at).await })
            .await
            .map_err(|e| Error::Server(format!("Analysis cycle {} aborted: {}", cycle, e)))
    }

    /// Snapshot of the committed outcome
    pub async fn current(&self) -> AnalysisOutcome {
        self.shared.state.read().await.outcome.clone()
    }

    /// Token of the cycle that owns the committed outcome
    pub async fn current_cycle(&self) -> u64 {
        self.shared.state.read().await.cycle
    }

    /// Dataset of the committed outcome, if it was a success
    pub async fn dataset(&self) -> Option<LocationDataset> {
        self.shared.state.read().await.outcome.dataset().cloned()
    }

    /// Re-project demand from the committed dataset without fetching anything
    pub async fn project(&self, timeframe: Timeframe) -> Option<f64> {
        self.shared
            .state
            .read()
            .await
            .outcome
            .dataset()
            .map(|dataset| project(dataset, timeframe))
    }
}
