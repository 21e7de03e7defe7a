use std::io::{BufRead, Write};

use submarine_core::aggregate::cost_line;
use submarine_core::domain::{Cycle, NewSubscription, Subscription, parse_price, today};
use submarine_core::error::{Result, SubError};
use submarine_core::reminders::upcoming;
use submarine_core::settings::{AppearanceMode, LeadTime, parse_scale};
use submarine_core::store::Store;
use submarine_core::theme::palette;
use submarine_core::{SiteMetadata, enrich};

use crate::presentation::Services;
use crate::presentation::view::{
    write_details, write_list, write_palette, write_reminders, write_settings, write_totals,
};

/// Requested settings changes; `None` leaves a field as it is.
#[derive(Default)]
pub struct SettingsChange {
    pub scaling: Option<String>,
    pub appearance: Option<String>,
    pub hue: Option<f64>,
    pub notifications: Option<bool>,
    pub notify_before: Option<String>,
    pub push: Option<bool>,
    pub notify_text: Option<String>,
}

// 1-based position from the user to a list index
fn position(store: &Store, pos: usize) -> Result<usize> {
    let index = pos
        .checked_sub(1)
        .ok_or_else(|| SubError::Invalid("positions start at 1".into()))?;
    store.get(index)?;
    Ok(index)
}

pub fn handle_list(store: &Store, out: &mut dyn Write) -> Result<()> {
    write_list(out, store.subscriptions())?;
    write_totals(out, store.totals())?;
    let reminders = upcoming(store.subscriptions(), store.settings(), today());
    write_reminders(out, &reminders)
}

pub fn handle_totals(store: &Store, out: &mut dyn Write) -> Result<()> {
    write_totals(out, store.totals())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_add(
    store: &mut Store,
    services: &Services,
    out: &mut dyn Write,
    name: String,
    price: String,
    cycle: String,
    website: Option<String>,
    no_track: bool,
) -> Result<()> {
    let draft = NewSubscription {
        name,
        price: parse_price(&price)?,
        cycle: cycle.parse::<Cycle>()?,
        website,
    };
    let sub = Subscription::create(draft, today())?;
    let meta = match (&services.fetcher, &sub.website, no_track) {
        (Some(fetcher), Some(url), false) => enrich(fetcher.as_ref(), url),
        _ => SiteMetadata::default(),
    };
    if let Some(title) = &meta.title {
        eprintln!("add: found \"{title}\"");
    }
    let added = store.add(sub.with_icon(meta.icon))?;
    write_details(out, added)?;
    eprintln!("add: #{} saved", store.len());
    Ok(())
}

pub fn handle_rm(
    store: &mut Store,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    pos: usize,
    yes: bool,
) -> Result<()> {
    let index = position(store, pos)?;
    if !yes {
        let sub = store.get(index)?;
        write!(out, "Delete {} ({})? [y/N]: ", sub.name, cost_line(sub))?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            writeln!(out, "Cancelled.")?;
            return Ok(());
        }
    }
    let removed = store.remove(index)?;
    eprintln!("rm: {}", removed.name);
    Ok(())
}

pub fn handle_open(store: &Store, services: &Services, out: &mut dyn Write, pos: usize) -> Result<()> {
    let sub = store.get(position(store, pos)?)?;
    match &sub.website {
        Some(url) => {
            services.opener.open_url(url)?;
            writeln!(out, "Opening website for {}...", sub.name)?;
        }
        None => writeln!(out, "No website URL saved for {}", sub.name)?,
    }
    Ok(())
}

pub fn handle_reminders(store: &Store, out: &mut dyn Write) -> Result<()> {
    let settings = store.settings();
    if !settings.notifications_enabled {
        writeln!(out, "Reminders are off (enable with `settings set --notifications true`).")?;
        return Ok(());
    }
    let reminders = upcoming(store.subscriptions(), settings, today());
    if reminders.is_empty() {
        writeln!(out, "No renewals in the next {}.", settings.notification_when)?;
        return Ok(());
    }
    write_reminders(out, &reminders)
}

pub fn handle_theme(store: &Store, out: &mut dyn Write, hue: Option<f64>) -> Result<()> {
    let hue = hue.unwrap_or(store.settings().hue);
    if !hue.is_finite() {
        return Err(SubError::Invalid(format!("hue must be a number, got {hue}")));
    }
    write_palette(out, hue, palette(hue))
}

pub fn handle_settings_show(store: &Store, out: &mut dyn Write) -> Result<()> {
    write_settings(out, store.settings())?;
    let p = store.settings().palette();
    writeln!(out, "Theme colours:        {} / {}", p.primary, p.hover)?;
    Ok(())
}

pub fn handle_settings_set(store: &mut Store, out: &mut dyn Write, change: SettingsChange) -> Result<()> {
    let scaling = change.scaling.as_deref().map(parse_scale).transpose()?;
    let appearance = change
        .appearance
        .as_deref()
        .map(str::parse::<AppearanceMode>)
        .transpose()?;
    let lead = change
        .notify_before
        .as_deref()
        .map(str::parse::<LeadTime>)
        .transpose()?;

    store.update_settings(|s| {
        if let Some(f) = scaling {
            s.set_scaling(f)?;
        }
        if let Some(mode) = appearance {
            s.appearance_mode = mode;
        }
        if let Some(h) = change.hue {
            s.set_hue(h)?;
        }
        if let Some(on) = change.notifications {
            s.notifications_enabled = on;
        }
        if let Some(l) = lead {
            s.notification_when = l;
        }
        if let Some(on) = change.push {
            s.notification_push = on;
        }
        if let Some(text) = change.notify_text {
            s.notification_custom_text = text;
        }
        Ok(())
    })?;
    eprintln!("settings: saved");
    handle_settings_show(store, out)
}
