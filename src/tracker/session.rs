use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::client::{ClientError, ObserverLocation, Position, Satellite, TrackerApi};

use super::error::TrackingError;
use super::filter::filter_by_name;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Everything the view renders. Owned by the session, handed out as
/// snapshots.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub satellites: Vec<Satellite>,
    pub selected: Option<Satellite>,
    pub position: Option<Position>,
    pub observer: ObserverLocation,
    pub search_query: String,
    pub tracking: bool,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct Shared {
    view: ViewState,
    /// Bumped on every selection change; fetches started under an older
    /// value are not allowed to write a position.
    generation: u64,
    in_flight: usize,
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

pub struct TrackingSession<A: TrackerApi> {
    api: Arc<A>,
    shared: Arc<StdMutex<Shared>>,
    updates: Arc<watch::Sender<u64>>,
    worker: Option<WorkerHandle>,
    poll_interval: Duration,
}

impl<A: TrackerApi> TrackingSession<A> {
    pub fn new(api: A) -> Self {
        Self::with_interval(api, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(api: A, poll_interval: Duration) -> Self {
        let (updates, _) = watch::channel(0);
        Self {
            api: Arc::new(api),
            shared: Arc::new(StdMutex::new(Shared::default())),
            updates: Arc::new(updates),
            worker: None,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn snapshot(&self) -> ViewState {
        lock(&self.shared).view.clone()
    }

    /// Ticks whenever the view state changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// Fetch the catalog and select its first entry. On failure the list
    /// stays empty.
    pub async fn load_catalog(&self) -> Result<usize, ClientError> {
        let satellites = match self.api.satellites().await {
            Ok(satellites) => satellites,
            Err(e) => {
                log::error!("Failed to load satellites: {}", e);
                return Err(e);
            }
        };

        let count = satellites.len();
        {
            let mut shared = lock(&self.shared);
            shared.view.selected = satellites.first().cloned();
            shared.view.satellites = satellites;
        }
        notify(&self.updates);

        log::info!("Loaded {} satellites", count);
        Ok(count)
    }

    pub fn set_search_query(&self, query: &str) {
        lock(&self.shared).view.search_query = query.to_string();
        notify(&self.updates);
    }

    pub fn filtered_satellites(&self) -> Vec<Satellite> {
        let shared = lock(&self.shared);
        filter_by_name(&shared.view.satellites, &shared.view.search_query)
    }

    /// Whether "start tracking" is currently enabled.
    pub fn can_start_tracking(&self) -> bool {
        let shared = lock(&self.shared);
        match &shared.view.selected {
            Some(selected) => selected.is_iss() && !shared.view.loading,
            None => false,
        }
    }

    /// Switch to another satellite. Tracking stops and the last position is
    /// discarded.
    pub async fn select(&mut self, satellite: Satellite) {
        self.halt_worker().await;
        {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.view.selected = Some(satellite);
            shared.view.position = None;
            shared.view.tracking = false;
        }
        notify(&self.updates);
    }

    /// Select a catalog entry by NORAD id. Returns false when it is not in
    /// the loaded catalog.
    pub async fn select_norad(&mut self, norad_id: u32) -> bool {
        let found = lock(&self.shared)
            .view
            .satellites
            .iter()
            .find(|sat| sat.norad_id == norad_id)
            .cloned();
        match found {
            Some(satellite) => {
                self.select(satellite).await;
                true
            }
            None => false,
        }
    }

    /// Fetch the position right away and keep polling every interval.
    pub fn start_tracking(&mut self) -> Result<(), TrackingError> {
        let generation = {
            let mut shared = lock(&self.shared);
            match &shared.view.selected {
                Some(selected) if selected.is_iss() => {}
                Some(selected) => return Err(TrackingError::NotTrackable(selected.name.clone())),
                None => return Err(TrackingError::NoSelection),
            }
            if self.worker.is_some() {
                return Ok(());
            }
            shared.view.tracking = true;
            shared.generation
        };
        notify(&self.updates);

        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_poll_loop(
            self.api.clone(),
            self.shared.clone(),
            self.updates.clone(),
            generation,
            self.poll_interval,
            stop_rx,
        ));
        self.worker = Some(WorkerHandle { stop_tx, join });

        log::info!("Tracking started (every {:?})", self.poll_interval);
        Ok(())
    }

    pub async fn stop_tracking(&mut self) {
        self.halt_worker().await;
        lock(&self.shared).view.tracking = false;
        notify(&self.updates);
    }

    pub fn is_tracking(&self) -> bool {
        lock(&self.shared).view.tracking
    }

    async fn halt_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
            log::info!("Tracking stopped");
        }
    }
}

impl<A: TrackerApi> Drop for TrackingSession<A> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
        }
    }
}

async fn run_poll_loop<A: TrackerApi>(
    api: Arc<A>,
    shared: Arc<StdMutex<Shared>>,
    updates: Arc<watch::Sender<u64>>,
    generation: u64,
    period: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    // the first tick completes immediately
    let mut ticker = interval(period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // each tick is independent; a slow response does not hold
                // back the next one
                tokio::spawn(fetch_position(
                    api.clone(),
                    shared.clone(),
                    updates.clone(),
                    generation,
                ));
            }
            _ = &mut stop_rx => break,
        }
    }
}

async fn fetch_position<A: TrackerApi>(
    api: Arc<A>,
    shared: Arc<StdMutex<Shared>>,
    updates: Arc<watch::Sender<u64>>,
    generation: u64,
) {
    {
        let mut locked = lock(&shared);
        locked.in_flight += 1;
        locked.view.loading = true;
    }
    notify(&updates);

    let result = api.iss_position().await;

    {
        let mut locked = lock(&shared);
        locked.in_flight = locked.in_flight.saturating_sub(1);
        locked.view.loading = locked.in_flight > 0;
        match result {
            Ok(position) if locked.generation == generation => {
                locked.view.position = Some(position);
            }
            Ok(_) => log::debug!("Dropping position fetched for a previous selection"),
            Err(e) => log::error!("Failed to fetch ISS position: {}", e),
        }
    }
    notify(&updates);
}

fn lock(shared: &StdMutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn notify(updates: &watch::Sender<u64>) {
    updates.send_modify(|revision| *revision = revision.wrapping_add(1));
}
