use std::sync::Mutex;

use crate::domain::Subscription;
use crate::error::{Result, SubError};
use crate::repo::{SettingsRepo, SubscriptionRepo};
use crate::settings::Settings;

/// Volatile backend for dry runs and tests.
#[derive(Default)]
pub struct MemSubscriptionRepo {
    subs: Mutex<Vec<Subscription>>,
}

impl SubscriptionRepo for MemSubscriptionRepo {
    fn load(&self) -> Result<Vec<Subscription>> {
        Ok(self.subs.lock().map_err(|_| poisoned())?.clone())
    }

    fn save(&self, subs: &[Subscription]) -> Result<()> {
        *self.subs.lock().map_err(|_| poisoned())? = subs.to_vec();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemSettingsRepo {
    settings: Mutex<Settings>,
}

impl SettingsRepo for MemSettingsRepo {
    fn load(&self) -> Result<Settings> {
        Ok(self.settings.lock().map_err(|_| poisoned())?.clone())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self.settings.lock().map_err(|_| poisoned())? = settings.clone();
        Ok(())
    }
}

fn poisoned() -> SubError {
    SubError::Io(std::io::Error::other("in-memory repo lock poisoned"))
}
