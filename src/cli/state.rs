// Application State Module

use super::config::Config;
use crate::animation::AnimationConfig;
use crate::dashboard::DashboardSnapshot;
use crate::data::DataError;

/// Shared application state
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Re-read the metrics table and compute a fresh snapshot
    pub fn load_snapshot(&self) -> Result<DashboardSnapshot, DataError> {
        DashboardSnapshot::load(&self.config.data.path)
    }

    pub fn animation(&self) -> AnimationConfig {
        self.config.animation_config()
    }
}
