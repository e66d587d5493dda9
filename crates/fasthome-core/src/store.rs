//! Device list store with optimistic deletion.
//!
//! The store owns the list and is the only thing that mutates it. Network
//! calls run on spawned tasks and report back over a channel; their results
//! are applied on the owning task by [`DeviceStore::handle_next`] or
//! [`DeviceStore::settle`], so every mutation and notification happens in
//! one place and in order.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::DeviceApi;
use crate::error::ApiError;
use crate::types::Device;

/// Receives list notifications from a [`DeviceStore`].
pub trait DeviceListObserver: Send {
    fn on_list_changed(&self, devices: &[Device]);
    fn on_item_removed_at(&self, index: usize);
    fn on_error(&self, message: &str);
}

/// Observer that ignores every notification.
pub struct NoopObserver;

impl DeviceListObserver for NoopObserver {
    fn on_list_changed(&self, _devices: &[Device]) {}
    fn on_item_removed_at(&self, _index: usize) {}
    fn on_error(&self, _message: &str) {}
}

/// A store notification as a value, for channel-based consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    ListChanged(Vec<Device>),
    ItemRemovedAt(usize),
    Error(String),
}

impl DeviceListObserver for mpsc::UnboundedSender<StoreEvent> {
    fn on_list_changed(&self, devices: &[Device]) {
        let _ = self.send(StoreEvent::ListChanged(devices.to_vec()));
    }

    fn on_item_removed_at(&self, index: usize) {
        let _ = self.send(StoreEvent::ItemRemovedAt(index));
    }

    fn on_error(&self, message: &str) {
        let _ = self.send(StoreEvent::Error(message.to_string()));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Loaded,
}

/// Outcome of a background request, delivered to the owning task.
enum Completion {
    Fetched {
        generation: u64,
        result: Result<Vec<Device>, ApiError>,
    },
    Deleted { id: i64, result: Result<(), ApiError> },
    Cancelled { id: Option<i64> },
}

/// A device in server order; `deleting` entries are hidden from callers
/// until their delete resolves.
struct Entry {
    device: Device,
    deleting: bool,
}

/// Authoritative in-process copy of the device list.
///
/// `refresh` and `delete` must be called from within a Tokio runtime.
pub struct DeviceStore {
    api: Arc<dyn DeviceApi>,
    observer: Box<dyn DeviceListObserver>,
    entries: Vec<Entry>,
    visible: Vec<Device>,
    in_flight: HashSet<i64>,
    fetch_generation: u64,
    open_fetches: BTreeSet<u64>,
    // Confirmed deletes, keyed by id, with the fetch generation current at
    // confirmation. Fetches issued at or before that generation are stale
    // for the id.
    confirmed: HashMap<i64, u64>,
    state: StoreState,
    pending: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    cancel: CancellationToken,
}

impl DeviceStore {
    pub fn new<O>(api: Arc<dyn DeviceApi>, observer: O) -> Self
    where
        O: DeviceListObserver + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            api,
            observer: Box::new(observer),
            entries: Vec::new(),
            visible: Vec::new(),
            in_flight: HashSet::new(),
            fetch_generation: 0,
            open_fetches: BTreeSet::new(),
            confirmed: HashMap::new(),
            state: StoreState::Empty,
            pending: 0,
            tx,
            rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Current list as the caller should display it.
    pub fn devices(&self) -> &[Device] {
        &self.visible
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Number of requests whose outcome has not been applied yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.in_flight.contains(&id)
    }

    /// Start fetching the list. The result is applied by `handle_next`.
    pub fn refresh(&mut self) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        self.open_fetches.insert(generation);

        let api = self.api.clone();
        self.spawn_request(None, async move {
            let result = api.fetch_devices().await;
            Completion::Fetched { generation, result }
        });
    }

    /// Optimistically remove the device at `index` and start deleting it.
    ///
    /// Out-of-range indexes are ignored. Devices with a delete in flight are
    /// hidden, so they cannot be deleted twice. Returns whether a delete was
    /// started.
    pub fn delete(&mut self, index: usize) -> bool {
        let Some(entry_index) = self.entry_index(index) else {
            tracing::debug!(index, len = self.visible.len(), "Ignoring out-of-range delete");
            return false;
        };

        let id = self.entries[entry_index].device.id;
        self.in_flight.insert(id);
        self.entries[entry_index].deleting = true;
        self.sync_visible();
        self.observer.on_item_removed_at(index);

        let api = self.api.clone();
        self.spawn_request(Some(id), async move {
            let result = api.delete_device(id).await;
            Completion::Deleted { id, result }
        });

        true
    }

    /// Wait for the next request to finish and apply it.
    ///
    /// Returns `false` immediately when nothing is pending.
    pub async fn handle_next(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }

        match self.rx.recv().await {
            Some(completion) => {
                self.pending -= 1;
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Apply every pending request, waiting for each to finish.
    pub async fn settle(&mut self) {
        while self.handle_next().await {}
    }

    /// Cancel all in-flight requests. Cancelled deletes are neither
    /// confirmed nor rolled back, and later outcomes are discarded.
    pub fn shutdown(&mut self) {
        self.cancel.cancel();
    }

    fn spawn_request<F>(&mut self, delete_id: Option<i64>, request: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        self.pending += 1;

        tokio::spawn(async move {
            let completion = tokio::select! {
                _ = cancel.cancelled() => Completion::Cancelled { id: delete_id },
                completion = request => completion,
            };
            let _ = tx.send(completion);
        });
    }

    fn apply(&mut self, completion: Completion) {
        if self.cancel.is_cancelled() {
            if let Completion::Deleted { id, .. } | Completion::Cancelled { id: Some(id) } =
                completion
            {
                self.in_flight.remove(&id);
            }
            return;
        }

        match completion {
            Completion::Fetched { generation, result } => {
                self.open_fetches.remove(&generation);
                match result {
                    Ok(devices) => self.replace(devices, generation),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to fetch devices");
                        self.observer.on_error(&e.user_message());
                    }
                }
                self.prune_confirmed();
            }
            Completion::Deleted { id, result: Ok(()) } => {
                self.in_flight.remove(&id);
                self.entries.retain(|e| e.device.id != id);
                if !self.open_fetches.is_empty() {
                    self.confirmed.insert(id, self.fetch_generation);
                }
                tracing::info!(id, "Device deleted");
            }
            Completion::Deleted { id, result: Err(e) } => self.rollback(id, e),
            Completion::Cancelled { id } => {
                if let Some(id) = id {
                    self.in_flight.remove(&id);
                }
            }
        }
    }

    /// Replace the list with a fresh server copy. Devices with a delete in
    /// flight stay hidden at their server position, and devices deleted after
    /// this fetch was issued are left out.
    fn replace(&mut self, devices: Vec<Device>, generation: u64) {
        let mut seen = HashSet::with_capacity(devices.len());
        self.entries = devices
            .into_iter()
            .filter(|device| {
                if matches!(self.confirmed.get(&device.id), Some(&at) if at >= generation) {
                    tracing::debug!(id = device.id, generation, "Skipping device deleted since fetch");
                    return false;
                }
                let first = seen.insert(device.id);
                if !first {
                    tracing::warn!(id = device.id, "Dropping duplicate device id from server list");
                }
                first
            })
            .map(|device| Entry {
                deleting: self.in_flight.contains(&device.id),
                device,
            })
            .collect();

        self.state = StoreState::Loaded;
        self.sync_visible();
        tracing::info!(count = self.visible.len(), "Device list replaced");
        self.observer.on_list_changed(&self.visible);
    }

    /// Forget confirmed deletes no open fetch can predate.
    fn prune_confirmed(&mut self) {
        match self.open_fetches.first() {
            Some(&oldest) => self.confirmed.retain(|_, at| *at >= oldest),
            None => self.confirmed.clear(),
        }
    }

    fn rollback(&mut self, id: i64, error: ApiError) {
        self.in_flight.remove(&id);

        let restored = match self.entries.iter_mut().find(|e| e.device.id == id) {
            Some(entry) => {
                entry.deleting = false;
                true
            }
            // A refresh since the delete no longer lists this device.
            None => false,
        };

        tracing::warn!(id, restored, error = %error, "Delete failed");

        if restored {
            self.sync_visible();
            self.observer.on_list_changed(&self.visible);
        }
        self.observer.on_error(&error.user_message());
    }

    /// Map a visible index to its position in `entries`.
    fn entry_index(&self, index: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.deleting)
            .nth(index)
            .map(|(i, _)| i)
    }

    fn sync_visible(&mut self) {
        self.visible = self
            .entries
            .iter()
            .filter(|e| !e.deleting)
            .map(|e| e.device.clone())
            .collect();
    }
}

impl Drop for DeviceStore {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
