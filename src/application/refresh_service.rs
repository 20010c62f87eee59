// Refresh service - Request sequencing, latest-wins publishing and auto refresh
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::time_range::TimeRange;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub type SnapshotSlot = Option<Arc<DashboardSnapshot>>;

pub struct RefreshService {
    dashboard: DashboardService,
    issued: AtomicU64,
    selected_range: watch::Sender<TimeRange>,
    snapshots: watch::Sender<SnapshotSlot>,
}

impl RefreshService {
    pub fn new(dashboard: DashboardService, initial_range: TimeRange) -> Self {
        Self {
            dashboard,
            issued: AtomicU64::new(0),
            selected_range: watch::Sender::new(initial_range),
            snapshots: watch::Sender::new(None),
        }
    }

    pub fn latest(&self) -> SnapshotSlot {
        self.snapshots.borrow().clone()
    }

    pub fn selected_range(&self) -> TimeRange {
        *self.selected_range.borrow()
    }

    /// Hand out the next request id. Ids only ever grow.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish a finished snapshot unless a newer request has been issued since.
    pub fn publish(&self, snapshot: DashboardSnapshot) -> bool {
        let id = snapshot.request_id;
        let snapshot = Arc::new(snapshot);
        self.snapshots.send_if_modified(move |current| {
            let latest_issued = self.issued.load(Ordering::SeqCst);
            let superseded = current.as_ref().is_some_and(|c| c.request_id > id);
            if id != latest_issued || superseded {
                return false;
            }
            *current = Some(snapshot);
            true
        })
    }

    /// Run one cycle. `range` replaces the selected range when given; the
    /// auto-refresh task passes `None` to keep whatever was last chosen.
    pub async fn refresh(&self, range: Option<TimeRange>) -> SnapshotSlot {
        if let Some(range) = range {
            self.selected_range.send_replace(range);
        }
        let range = self.selected_range();
        let id = self.issue();

        let snapshot = self.dashboard.refresh(id, range).await;
        let points = snapshot.point_count();
        if self.publish(snapshot) {
            tracing::info!("Published snapshot {} ({} points, {} range)", id, points, range);
        } else {
            tracing::debug!("Discarding stale snapshot {}", id);
        }

        self.latest()
    }
}

/// Refresh on a fixed period. The first tick fires immediately, and a tick
/// that lands while a refresh is still running is pushed back, not doubled up.
pub fn spawn_auto_refresh(service: Arc<RefreshService>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            tracing::debug!("Auto-refreshing dashboard");
            service.refresh(None).await;
        }
    })
}
