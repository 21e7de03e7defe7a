use std::io::Write;

use submarine_core::aggregate::{Totals, cost_line, format_money};
use submarine_core::domain::Subscription;
use submarine_core::error::Result;
use submarine_core::reminders::Reminder;
use submarine_core::settings::{Settings, scale_label};
use submarine_core::theme::Palette;

pub fn write_list(out: &mut dyn Write, subs: &[Subscription]) -> Result<()> {
    writeln!(out, "\nSubscriptions:")?;
    if subs.is_empty() {
        writeln!(out, "  (no subscriptions)")?;
        return Ok(());
    }
    for (i, s) in subs.iter().enumerate() {
        let website = s
            .website
            .as_deref()
            .map(|w| format!(" [{w}]"))
            .unwrap_or_default();
        writeln!(
            out,
            "  {}. {} - {} ({}){}",
            i + 1,
            s.name,
            format_money(s.price),
            s.cycle,
            website
        )?;
        let added = if s.date_added.is_empty() {
            "?"
        } else {
            s.date_added.as_str()
        };
        writeln!(out, "     Added: {added}")?;
    }
    Ok(())
}

pub fn write_totals(out: &mut dyn Write, totals: Totals) -> Result<()> {
    writeln!(out, "\nTotals:")?;
    writeln!(out, "  Monthly: {}", format_money(totals.monthly))?;
    writeln!(out, "  Yearly:  {}", format_money(totals.yearly))?;
    Ok(())
}

pub fn write_reminders(out: &mut dyn Write, reminders: &[Reminder]) -> Result<()> {
    if reminders.is_empty() {
        return Ok(());
    }
    writeln!(out, "\nUpcoming renewals:")?;
    for r in reminders {
        let when = match r.days_left {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        writeln!(
            out,
            "  {}. {} renews {} ({}) - {}",
            r.index + 1,
            r.name,
            when,
            r.due,
            r.message
        )?;
    }
    Ok(())
}

pub fn write_details(out: &mut dyn Write, sub: &Subscription) -> Result<()> {
    writeln!(out, "{}: {}", sub.name, cost_line(sub))?;
    Ok(())
}

pub fn write_settings(out: &mut dyn Write, settings: &Settings) -> Result<()> {
    writeln!(out, "Display scaling:      {}", scale_label(settings.scaling_factor))?;
    writeln!(out, "Appearance:           {}", settings.appearance_mode)?;
    writeln!(out, "Theme hue:            {}", settings.hue)?;
    writeln!(out, "Notifications:        {}", on_off(settings.notifications_enabled))?;
    writeln!(out, "Notify before:        {}", settings.notification_when)?;
    writeln!(out, "Push notifications:   {}", on_off(settings.notification_push))?;
    writeln!(out, "Notification text:    {}", settings.notification_custom_text)?;
    Ok(())
}

pub fn write_palette(out: &mut dyn Write, hue: f64, palette: Palette) -> Result<()> {
    writeln!(out, "Hue:     {hue}")?;
    writeln!(out, "Primary: {}", palette.primary)?;
    writeln!(out, "Hover:   {}", palette.hover)?;
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
