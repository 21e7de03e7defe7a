use tracing::{info, warn};

use crate::aggregate::{Totals, totals};
use crate::domain::Subscription;
use crate::error::{Result, SubError};
use crate::repo::{Repos, SettingsRepo, SubscriptionRepo};
use crate::settings::Settings;

/// In-memory view of both persisted records. Every mutation is written
/// through before it returns; a failed write leaves memory unchanged.
pub struct Store {
    subs_repo: Box<dyn SubscriptionRepo>,
    settings_repo: Box<dyn SettingsRepo>,
    subscriptions: Vec<Subscription>,
    settings: Settings,
}

impl Store {
    pub fn open(repos: Repos) -> Result<Self> {
        let subscriptions = repos.subscriptions.load()?;
        let settings = repos.settings.load()?;
        Ok(Self {
            subs_repo: repos.subscriptions,
            settings_repo: repos.settings,
            subscriptions,
            settings,
        })
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// 0-based lookup.
    pub fn get(&self, index: usize) -> Result<&Subscription> {
        self.subscriptions
            .get(index)
            .ok_or(SubError::NotFound(index))
    }

    pub fn add(&mut self, sub: Subscription) -> Result<&Subscription> {
        self.subscriptions.push(sub);
        if let Err(e) = self.subs_repo.save(&self.subscriptions) {
            self.subscriptions.pop();
            warn!("add rolled back: {e}");
            return Err(e);
        }
        let added = &self.subscriptions[self.subscriptions.len() - 1];
        info!(name = %added.name, price = added.price, cycle = %added.cycle, "subscription added");
        Ok(added)
    }

    pub fn remove(&mut self, index: usize) -> Result<Subscription> {
        if index >= self.subscriptions.len() {
            return Err(SubError::NotFound(index));
        }
        let removed = self.subscriptions.remove(index);
        if let Err(e) = self.subs_repo.save(&self.subscriptions) {
            self.subscriptions.insert(index, removed);
            warn!("remove rolled back: {e}");
            return Err(e);
        }
        info!(name = %removed.name, "subscription removed");
        Ok(removed)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply `change` to a copy, persist it, then commit it.
    pub fn update_settings<F>(&mut self, change: F) -> Result<&Settings>
    where
        F: FnOnce(&mut Settings) -> Result<()>,
    {
        let mut next = self.settings.clone();
        change(&mut next)?;
        self.settings_repo.save(&next)?;
        self.settings = next;
        info!("settings updated");
        Ok(&self.settings)
    }

    pub fn totals(&self) -> Totals {
        totals(&self.subscriptions)
    }

    /// Flush both records, e.g. on quit.
    pub fn save(&self) -> Result<()> {
        self.subs_repo.save(&self.subscriptions)?;
        self.settings_repo.save(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cycle, NewSubscription};
    use crate::repo_mem::{MemSettingsRepo, MemSubscriptionRepo};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use time::macros::date;

    struct FlakyRepo {
        fail: Arc<AtomicBool>,
        inner: MemSubscriptionRepo,
    }

    impl SubscriptionRepo for FlakyRepo {
        fn load(&self) -> Result<Vec<Subscription>> {
            self.inner.load()
        }

        fn save(&self, subs: &[Subscription]) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(SubError::Io(std::io::Error::other("disk full")));
            }
            self.inner.save(subs)
        }
    }

    fn sub(name: &str, price: f64) -> Subscription {
        Subscription::create(
            NewSubscription {
                name: name.into(),
                price,
                cycle: Cycle::Monthly,
                website: None,
            },
            date!(2024 - 06 - 01),
        )
        .unwrap()
    }

    fn mem_store() -> Store {
        Store::open(Repos {
            subscriptions: Box::new(MemSubscriptionRepo::default()),
            settings: Box::new(MemSettingsRepo::default()),
        })
        .unwrap()
    }

    #[test]
    fn remove_keeps_order_of_the_rest() {
        let mut store = mem_store();
        for n in ["a", "b", "c", "d"] {
            store.add(sub(n, 1.0)).unwrap();
        }
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.name, "b");
        let names: Vec<&str> = store.subscriptions().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "c", "d"]);
    }

    #[test]
    fn out_of_range_is_not_found() {
        let mut store = mem_store();
        store.add(sub("a", 1.0)).unwrap();
        assert!(matches!(store.remove(3), Err(SubError::NotFound(3))));
        assert!(matches!(store.get(1), Err(SubError::NotFound(1))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_save_rolls_back() {
        let fail = Arc::new(AtomicBool::new(false));
        let mut store = Store::open(Repos {
            subscriptions: Box::new(FlakyRepo {
                fail: fail.clone(),
                inner: MemSubscriptionRepo::default(),
            }),
            settings: Box::new(MemSettingsRepo::default()),
        })
        .unwrap();
        store.add(sub("keep", 2.0)).unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(store.add(sub("lost", 3.0)).is_err());
        assert!(store.remove(0).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "keep");
    }

    #[test]
    fn invalid_settings_change_is_not_committed() {
        let mut store = mem_store();
        assert!(store.update_settings(|s| s.set_scaling(9.0)).is_err());
        assert_eq!(store.settings().scaling_factor, 1.0);
        store.update_settings(|s| s.set_hue(10.0)).unwrap();
        assert_eq!(store.settings().hue, 10.0);
    }
}
