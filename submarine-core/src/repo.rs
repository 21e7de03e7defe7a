// submarine_core/src/repo.rs
use std::path::PathBuf;

use crate::domain::Subscription;
use crate::error::Result;
use crate::settings::Settings;

pub const SUBSCRIPTIONS_FILE: &str = "subscriptions.json";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug)]
pub struct OpenParams {
    pub data_dir: PathBuf,
}

impl OpenParams {
    pub fn subscriptions_path(&self) -> PathBuf {
        self.data_dir.join(SUBSCRIPTIONS_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }
}

/// Whole-list persistence. `load` on a first run yields an empty list.
pub trait SubscriptionRepo: Send + Sync {
    fn load(&self) -> Result<Vec<Subscription>>;

    fn save(&self, subs: &[Subscription]) -> Result<()>;
}

pub trait SettingsRepo: Send + Sync {
    fn load(&self) -> Result<Settings>;

    fn save(&self, settings: &Settings) -> Result<()>;
}

pub struct Repos {
    pub subscriptions: Box<dyn SubscriptionRepo>,
    pub settings: Box<dyn SettingsRepo>,
}
