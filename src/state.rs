use crate::storage::Storage;
use crate::tracker::Tracker;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(storage: Storage, tracker: Tracker) -> Self {
        Self {
            storage,
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Loads both records and builds the tracker from them.
    pub async fn load(storage: Storage) -> Self {
        let settings = storage.load_settings().await.unwrap_or_default();
        let checked = storage.load_checked().await;
        let tracker = Tracker::new(settings, checked);
        Self::new(storage, tracker)
    }
}
