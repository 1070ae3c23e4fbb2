//! Live collection synchronization.
//!
//! A [`LiveCollection`] pairs a one-shot fetch with an [`EventSource`]
//! and keeps a [`CollectionStore`] converged in the background:
//!
//! - on spawn it starts the initial load and begins draining the stream
//! - stream changes are applied as they arrive, including while a load
//!   is still in flight
//! - [`LiveCollection::reload`] re-runs the fetch without tearing down
//!   the stream
//! - dropping the handle cancels the sync task and releases the
//!   subscription
//!
//! Views read the state through [`LiveCollection::snapshot`] and wake on
//! [`LiveCollection::changed`].

use std::future::Future;

use futures::future::{BoxFuture, FutureExt};
use sceneflow_store::change::Change;
use sceneflow_store::StoredRecord;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::collection::CollectionStore;
use crate::error::ClientError;
use crate::source::EventSource;

type Loader<T> = Box<dyn Fn() -> BoxFuture<'static, Result<Vec<T>, ClientError>> + Send>;
type RecordFilter<T> = Box<dyn Fn(&T) -> bool + Send>;

enum Command {
    Reload,
}

/// Handle to a background-synchronized collection.
///
/// Each view owns its handle; there is no sharing of sync tasks between
/// views.
pub struct LiveCollection<T: StoredRecord + Clone> {
    state: watch::Receiver<CollectionStore<T>>,
    commands: mpsc::UnboundedSender<Command>,
    cancel: CancellationToken,
}

impl<T> LiveCollection<T>
where
    T: StoredRecord + Clone + Send + Sync + 'static,
{
    /// Spawn a sync task over a fetch and an event source.
    pub fn spawn<S, F, Fut>(source: S, fetch: F) -> Self
    where
        S: EventSource<T> + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<T>, ClientError>> + Send + 'static,
    {
        Self::spawn_inner(Box::new(source), Box::new(move || fetch().boxed()), None)
    }

    /// Spawn a sync task that keeps only records matching `filter`.
    ///
    /// The filter applies to loaded records, inserts, and updates.
    /// Deletes always pass through so a record that stops matching via
    /// deletion still leaves the collection.
    pub fn spawn_filtered<S, F, Fut>(
        source: S,
        fetch: F,
        filter: impl Fn(&T) -> bool + Send + 'static,
    ) -> Self
    where
        S: EventSource<T> + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<T>, ClientError>> + Send + 'static,
    {
        Self::spawn_inner(
            Box::new(source),
            Box::new(move || fetch().boxed()),
            Some(Box::new(filter)),
        )
    }

    fn spawn_inner(
        source: Box<dyn EventSource<T>>,
        loader: Loader<T>,
        filter: Option<RecordFilter<T>>,
    ) -> Self {
        let (state_tx, state_rx) = watch::channel(CollectionStore::new());
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        tokio::spawn(run(
            loader,
            source,
            filter,
            state_tx,
            command_rx,
            cancel.clone(),
        ));

        Self {
            state: state_rx,
            commands: command_tx,
            cancel,
        }
    }

    /// Current state of the collection.
    pub fn snapshot(&self) -> CollectionStore<T> {
        self.state.borrow().clone()
    }

    /// Subscribe to state snapshots directly.
    pub fn watch(&self) -> watch::Receiver<CollectionStore<T>> {
        self.state.clone()
    }

    /// Wait for the next state change. Returns `false` once the sync
    /// task has shut down.
    pub async fn changed(&mut self) -> bool {
        self.state.changed().await.is_ok()
    }

    /// Re-run the fetch. The collection flips back to loading and keeps
    /// serving its current records until the result lands.
    pub fn reload(&self) {
        // A send error means the task is already gone, which only
        // happens during teardown.
        let _ = self.commands.send(Command::Reload);
    }
}

impl<T: StoredRecord + Clone> Drop for LiveCollection<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run<T>(
    loader: Loader<T>,
    mut source: Box<dyn EventSource<T>>,
    filter: Option<RecordFilter<T>>,
    state: watch::Sender<CollectionStore<T>>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    cancel: CancellationToken,
) where
    T: StoredRecord + Clone + Send + Sync + 'static,
{
    // Fused so a finished load parks instead of re-completing; reload
    // swaps in a fresh future.
    let mut load = loader().fuse();
    let mut stream_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            result = &mut load => {
                state.send_modify(|store| match result {
                    Ok(mut records) => {
                        if let Some(filter) = &filter {
                            records.retain(|record| filter(record));
                        }
                        store.load_succeeded(records);
                    }
                    Err(e) => store.load_failed(e.to_string()),
                });
            }

            event = source.next_event(), if stream_open => match event {
                Some(change) => {
                    if admitted(&filter, &change) {
                        state.send_modify(|store| store.apply(change));
                    }
                }
                None => {
                    // Keep serving snapshots and reloads on a dead
                    // stream; the owner decides when to tear down.
                    stream_open = false;
                    tracing::debug!(
                        collection = T::COLLECTION.as_str(),
                        "change stream ended"
                    );
                }
            },

            command = commands.recv() => match command {
                Some(Command::Reload) => {
                    state.send_modify(CollectionStore::begin_load);
                    load = loader().fuse();
                }
                None => break,
            },
        }
    }
}

fn admitted<T>(filter: &Option<RecordFilter<T>>, change: &Change<T>) -> bool {
    match (filter, change) {
        (Some(filter), Change::Insert(record) | Change::Update(record)) => filter(record),
        _ => true,
    }
}
