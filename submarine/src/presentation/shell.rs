use std::io::{BufRead, Write};

use submarine_core::domain::{Cycle, NewSubscription, Subscription, parse_price, today};
use submarine_core::error::{Result, SubError};
use submarine_core::reminders::upcoming;
use submarine_core::store::Store;
use submarine_core::{SiteMetadata, enrich};
use tracing::debug;

use super::view::{write_list, write_reminders, write_totals};
use super::{Frontend, Services};

/// Line-oriented read-eval loop: (a)dd, (d)elete, (o)pen, (q)uit.
pub struct Shell<R, W> {
    input: R,
    out: W,
    services: Services,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, out: W, services: Services) -> Self {
        Self {
            input,
            out,
            services,
        }
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn overview(&mut self, store: &Store) -> Result<()> {
        write_list(&mut self.out, store.subscriptions())?;
        write_totals(&mut self.out, store.totals())?;
        let reminders = upcoming(store.subscriptions(), store.settings(), today());
        write_reminders(&mut self.out, &reminders)
    }

    /// Validation problems are shown inline; anything else is fatal.
    fn report(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Err(SubError::Invalid(msg)) => writeln!(self.out, "Invalid input: {msg}")?,
            Err(SubError::NotFound(_)) => writeln!(self.out, "Index out of range")?,
            Err(SubError::Browser(msg)) => writeln!(self.out, "Could not open browser: {msg}")?,
            other => return other,
        }
        Ok(())
    }

    fn add(&mut self, store: &mut Store) -> Result<()> {
        let Some(name) = self.prompt("Service name: ")? else {
            return Ok(());
        };
        if name.is_empty() {
            return Err(SubError::Invalid("service name cannot be empty".into()));
        }
        let Some(price) = self.prompt("Price: ")? else {
            return Ok(());
        };
        let price = parse_price(&price)?;
        let Some(cycle) = self.prompt("Billing cycle (Monthly/Yearly) [Monthly]: ")? else {
            return Ok(());
        };
        let Some(website) = self.prompt("Website URL [optional]: ")? else {
            return Ok(());
        };

        let sub = Subscription::create(
            NewSubscription {
                name,
                price,
                cycle: Cycle::parse_lenient(&cycle),
                website: Some(website),
            },
            today(),
        )?;
        let meta = self.track(&sub)?;
        if let Some(title) = &meta.title {
            writeln!(self.out, "Found: {title}")?;
        }
        store.add(sub.with_icon(meta.icon))?;
        writeln!(self.out, "Added.")?;
        Ok(())
    }

    fn track(&mut self, sub: &Subscription) -> Result<SiteMetadata> {
        let (Some(url), true) = (sub.website.clone(), self.services.fetcher.is_some()) else {
            return Ok(SiteMetadata::default());
        };
        let answer = self
            .prompt("Dynamic tracking - fetch website title and icon? [Y/n]: ")?
            .unwrap_or_default();
        if matches!(answer.to_ascii_lowercase().as_str(), "n" | "no") {
            return Ok(SiteMetadata::default());
        }
        writeln!(self.out, "Fetching website info...")?;
        self.out.flush()?;
        Ok(match &self.services.fetcher {
            Some(fetcher) => enrich(fetcher.as_ref(), &url),
            None => SiteMetadata::default(),
        })
    }

    fn read_index(&mut self, label: &str, store: &Store) -> Result<Option<usize>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        let position: usize = raw
            .parse()
            .map_err(|_| SubError::Invalid(format!("'{raw}' is not a valid index")))?;
        let index = position.checked_sub(1).ok_or(SubError::NotFound(0))?;
        store.get(index)?;
        Ok(Some(index))
    }

    fn delete(&mut self, store: &mut Store) -> Result<()> {
        let Some(index) = self.read_index("Index to delete: ", store)? else {
            return Ok(());
        };
        let name = store.get(index)?.name.clone();
        let answer = self
            .prompt(&format!("Delete {name}? [y/N]: "))?
            .unwrap_or_default();
        if !matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            writeln!(self.out, "Cancelled.")?;
            return Ok(());
        }
        let removed = store.remove(index)?;
        writeln!(self.out, "Removed {}", removed.name)?;
        Ok(())
    }

    fn open(&mut self, store: &Store) -> Result<()> {
        let Some(index) = self.read_index("Index to open website: ", store)? else {
            return Ok(());
        };
        let sub = store.get(index)?;
        match &sub.website {
            Some(url) => {
                self.services.opener.open_url(url)?;
                writeln!(self.out, "Opening website for {}...", sub.name)?;
            }
            None => writeln!(self.out, "No website URL saved for this subscription")?,
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Frontend for Shell<R, W> {
    fn run(&mut self, store: &mut Store) -> Result<()> {
        loop {
            self.overview(store)?;
            writeln!(self.out, "\nOptions: (a)dd  (d)elete  (o)pen website  (q)uit")?;
            let choice = self
                .prompt("Choose: ")?
                .map(|c| c.to_ascii_lowercase());
            debug!(?choice, "shell command");
            let outcome = match choice.as_deref() {
                None | Some("q") | Some("quit") => {
                    store.save()?;
                    writeln!(self.out, "Saved. Exiting.")?;
                    return Ok(());
                }
                Some("a") | Some("add") => self.add(store),
                Some("d") | Some("delete") => self.delete(store),
                Some("o") | Some("open") => self.open(store),
                Some("") => Ok(()),
                Some(other) => {
                    writeln!(self.out, "Unknown option '{other}'")?;
                    Ok(())
                }
            };
            self.report(outcome)?;
        }
    }
}
