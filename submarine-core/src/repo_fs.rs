use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{Subscription, validate_price};
use crate::error::{Result, SubError};
use crate::repo::{OpenParams, SettingsRepo, SubscriptionRepo};
use crate::settings::Settings;

pub struct FsSubscriptionRepo {
    path: PathBuf,
}

impl FsSubscriptionRepo {
    pub fn new(params: &OpenParams) -> Self {
        Self {
            path: params.subscriptions_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SubscriptionRepo for FsSubscriptionRepo {
    fn load(&self) -> Result<Vec<Subscription>> {
        let subs: Vec<Subscription> = read_json_or_default(&self.path)?;
        for (i, sub) in subs.iter().enumerate() {
            validate_price(sub.price).map_err(|e| {
                SubError::Format(format!(
                    "{}: record {} ({}): {e}",
                    self.path.display(),
                    i + 1,
                    sub.name
                ))
            })?;
        }
        debug!(path = %self.path.display(), count = subs.len(), "loaded subscriptions");
        Ok(subs)
    }

    fn save(&self, subs: &[Subscription]) -> Result<()> {
        write_json(&self.path, &subs)?;
        debug!(path = %self.path.display(), count = subs.len(), "saved subscriptions");
        Ok(())
    }
}

pub struct FsSettingsRepo {
    path: PathBuf,
}

impl FsSettingsRepo {
    pub fn new(params: &OpenParams) -> Self {
        Self {
            path: params.settings_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsRepo for FsSettingsRepo {
    fn load(&self) -> Result<Settings> {
        let settings = read_json_or_default(&self.path)?;
        debug!(path = %self.path.display(), "loaded settings");
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        write_json(&self.path, settings)?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}

/// Missing or blank file means first run. Malformed JSON is an error, never a silent reset.
fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&content)
        .map_err(|e| SubError::Format(format!("{}: {e}", path.display())))
}

/// Full overwrite through a sibling temp file renamed over the target.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let mut tmp = NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.write_all(b"\n")?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}
