use crate::format::DateFormatter;
use crate::store::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<RecordStore>>,
    pub formatter: Arc<dyn DateFormatter>,
}

impl AppState {
    pub fn new(store: RecordStore, formatter: impl DateFormatter + 'static) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            formatter: Arc::new(formatter),
        }
    }
}
