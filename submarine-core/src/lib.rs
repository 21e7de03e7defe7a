#![forbid(unsafe_code)]

pub mod aggregate;
pub mod browser;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod reminders;
pub mod repo;
pub mod repo_factory;
pub mod repo_fs;
pub mod repo_mem;
pub mod settings;
pub mod store;
pub mod theme;

pub mod util {
    pub mod hex;
}

// Re-exports: stable API surface
pub use aggregate::{Totals, format_money, totals};
pub use domain::{Cycle, NewSubscription, Subscription};
pub use fetch::{MetadataSource, SiteMetadata, enrich};
pub use settings::Settings;
pub use store::Store;
