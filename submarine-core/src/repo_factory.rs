use crate::repo::{OpenParams, Repos};
use crate::repo_fs::{FsSettingsRepo, FsSubscriptionRepo};
use crate::repo_mem::{MemSettingsRepo, MemSubscriptionRepo};

pub enum Backend {
    Fs,
    Memory,
}

pub fn open_repos(backend: Backend, p: &OpenParams) -> Repos {
    match backend {
        Backend::Fs => Repos {
            subscriptions: Box::new(FsSubscriptionRepo::new(p)),
            settings: Box::new(FsSettingsRepo::new(p)),
        },
        Backend::Memory => Repos {
            subscriptions: Box::new(MemSubscriptionRepo::default()),
            settings: Box::new(MemSettingsRepo::default()),
        },
    }
}
