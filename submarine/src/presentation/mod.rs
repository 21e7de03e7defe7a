pub mod cli;
pub mod shell;
pub mod view;

use submarine_core::MetadataSource;
use submarine_core::browser::UrlOpener;
use submarine_core::error::Result;
use submarine_core::store::Store;

/// Outside collaborators a front-end drives. `fetcher` is absent when
/// website lookups are disabled or unavailable.
pub struct Services {
    pub fetcher: Option<Box<dyn MetadataSource>>,
    pub opener: Box<dyn UrlOpener>,
}

/// A presentation layer over the shared store.
pub trait Frontend {
    fn run(&mut self, store: &mut Store) -> Result<()>;
}
