use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "SUBmarine subscription tracker", long_about = None)]
pub struct Cli {
    /// Directory holding subscriptions.json and settings.json (defaults to the executable's directory)
    #[arg(long, global = true, env = "SUBMARINE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Never fetch website titles or icons
    #[arg(long, global = true)]
    pub no_fetch: bool,

    /// Timeout in seconds for each website request
    #[arg(long, global = true, default_value_t = 5)]
    pub fetch_timeout: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print current settings
    Show,
    /// Change one or more settings; each change is saved immediately
    Set {
        /// Display scaling, e.g. "125%" or 1.25 (75% to 300% in 25% steps)
        #[arg(long)]
        scaling: Option<String>,
        /// light or dark
        #[arg(long)]
        appearance: Option<String>,
        /// Theme hue in degrees (0-360)
        #[arg(long)]
        hue: Option<f64>,
        /// Enable or disable renewal reminders
        #[arg(long)]
        notifications: Option<bool>,
        /// Reminder lead time: "1 day", "3 days", "1 week" or "2 weeks"
        #[arg(long = "notify-before")]
        notify_before: Option<String>,
        /// Push notification preference
        #[arg(long)]
        push: Option<bool>,
        /// Text shown with each reminder
        #[arg(long = "notify-text")]
        notify_text: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum Commands {
    /// List subscriptions with totals
    List,

    /// Add a subscription
    Add {
        name: String,
        price: String,
        /// Monthly or Yearly
        #[arg(long, default_value = "Monthly")]
        cycle: String,
        #[arg(long)]
        website: Option<String>,
        /// Skip fetching the website's title and icon
        #[arg(long)]
        no_track: bool,
    },

    /// Delete a subscription by its position in `list`
    Rm {
        index: usize,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Open a subscription's website in the default browser
    Open { index: usize },

    /// Print monthly and yearly totals
    Totals,

    /// Show renewals due within the reminder lead time
    Reminders,

    /// Print the theme colours for the saved hue (or --hue)
    Theme {
        #[arg(long)]
        hue: Option<f64>,
    },

    #[command(subcommand)]
    /// View or change settings
    Settings(SettingsCommands),

    /// Interactive prompt (the default when no command is given)
    Shell,
}
