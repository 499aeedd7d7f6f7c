//! Process-wide application state shared across handlers via `web::Data`.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::rooms::RoomStore;
use crate::ws::hub::RoomSessionRegistry;

/// Everything the API layer needs: configuration, the room store (process
/// lifetime = server lifetime), and the realtime session registry. The
/// engine itself never reads ambient state; rooms and views take explicit
/// arguments.
pub struct AppState {
    pub config: AppConfig,
    pub rooms: RoomStore,
    pub registry: Arc<RoomSessionRegistry>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            rooms: RoomStore::new(),
            registry: Arc::new(RoomSessionRegistry::new()),
        }
    }
}
