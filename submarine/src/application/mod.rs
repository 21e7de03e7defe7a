pub mod handlers;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use submarine_core::MetadataSource;
use submarine_core::browser::SystemOpener;
use submarine_core::error::Result;
use submarine_core::fetch::http::{FetchOptions, HttpFetcher};
use submarine_core::repo::OpenParams;
use submarine_core::repo_factory::{Backend, open_repos};
use submarine_core::store::Store;
use tracing::{info, warn};

use crate::presentation::cli::{Cli, Commands, SettingsCommands};
use crate::presentation::shell::Shell;
use crate::presentation::{Frontend, Services};
use handlers::SettingsChange;

pub fn run(cli: Cli) -> Result<()> {
    let params = OpenParams {
        data_dir: resolve_data_dir(cli.data_dir),
    };
    info!(data_dir = %params.data_dir.display(), "opening store");
    let mut store = Store::open(open_repos(Backend::Fs, &params))?;
    let services = Services {
        fetcher: detect_fetcher(cli.no_fetch, cli.fetch_timeout),
        opener: Box::new(SystemOpener),
    };
    let mut frontend = select_frontend(cli.command, services);
    frontend.run(&mut store)
}

fn select_frontend(command: Option<Commands>, services: Services) -> Box<dyn Frontend> {
    match command {
        None | Some(Commands::Shell) => Box::new(Shell::new(
            std::io::stdin().lock(),
            std::io::stdout(),
            services,
        )),
        Some(command) => Box::new(OneShot { command, services }),
    }
}

/// Website lookups are optional: without a usable HTTP client the app still runs.
fn detect_fetcher(disabled: bool, timeout_secs: u64) -> Option<Box<dyn MetadataSource>> {
    if disabled {
        return None;
    }
    let opts = FetchOptions {
        timeout: Duration::from_secs(timeout_secs.max(1)),
        ..Default::default()
    };
    match HttpFetcher::new(opts) {
        Ok(f) => Some(Box::new(f)),
        Err(e) => {
            warn!("dynamic tracking disabled: {e}");
            None
        }
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    match std::env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
        Err(e) => {
            warn!("cannot locate executable ({e}); using current directory");
            PathBuf::from(".")
        }
    }
}

/// A single command from the command line.
struct OneShot {
    command: Commands,
    services: Services,
}

impl OneShot {
    fn dispatch(
        &mut self,
        store: &mut Store,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<()> {
        let services = &self.services;
        match std::mem::replace(&mut self.command, Commands::Shell) {
            Commands::List => handlers::handle_list(store, out),
            Commands::Add {
                name,
                price,
                cycle,
                website,
                no_track,
            } => handlers::handle_add(store, services, out, name, price, cycle, website, no_track),
            Commands::Rm { index, yes } => handlers::handle_rm(store, input, out, index, yes),
            Commands::Open { index } => handlers::handle_open(store, services, out, index),
            Commands::Totals => handlers::handle_totals(store, out),
            Commands::Reminders => handlers::handle_reminders(store, out),
            Commands::Theme { hue } => handlers::handle_theme(store, out, hue),
            Commands::Settings(cmd) => match cmd {
                SettingsCommands::Show => handlers::handle_settings_show(store, out),
                SettingsCommands::Set {
                    scaling,
                    appearance,
                    hue,
                    notifications,
                    notify_before,
                    push,
                    notify_text,
                } => handlers::handle_settings_set(
                    store,
                    out,
                    SettingsChange {
                        scaling,
                        appearance,
                        hue,
                        notifications,
                        notify_before,
                        push,
                        notify_text,
                    },
                ),
            },
            Commands::Shell => Ok(()),
        }
    }
}

impl Frontend for OneShot {
    fn run(&mut self, store: &mut Store) -> Result<()> {
        let mut input = std::io::stdin().lock();
        let mut out = std::io::stdout().lock();
        self.dispatch(store, &mut input, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
