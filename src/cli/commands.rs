use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "auction-hunter", about = "Watch a marketplace listing and get emailed when it hits your target")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch a listing until the target is reached
    Hunt(HuntArgs),
    /// Show or change stored preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// List known server names and ids
    Servers,
}

#[derive(Args, Debug, Default)]
pub struct HuntArgs {
    /// Listing url, e.g. https://www.ffxiah.com/item/4096/fire-crystal/?stack=1
    pub url: String,
    /// Item pages only: inventory or price
    #[arg(long)]
    pub mode: Option<String>,
    /// Inventory: notify when none are listed
    #[arg(long, conflicts_with_all = ["stocked", "range"])]
    pub empty: bool,
    /// Inventory: notify when at least one is listed
    #[arg(long, conflicts_with = "range")]
    pub stocked: bool,
    /// Inventory: notify when stock is within LOW..=HIGH
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"])]
    pub range: Option<Vec<u64>>,
    /// Price: target price
    #[arg(long)]
    pub price: Option<u64>,
    /// Price: notify when the last sale is at or above the target
    #[arg(long, conflicts_with = "below")]
    pub above: bool,
    /// Price: notify when the last sale is at or below the target
    #[arg(long)]
    pub below: bool,
    /// Player: only notify for this item
    #[arg(long)]
    pub item: Option<String>,
    /// Player: notify on any sale
    #[arg(long, conflicts_with = "item")]
    pub any: bool,
    /// Log the notification instead of emailing it
    #[arg(long)]
    pub no_email: bool,
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Print all preferences as JSON
    Show,
    /// Store a preference (sendgrid_key, notification_address, server_id, sleep_minutes)
    Set { key: String, value: String },
    /// Forget a preference so it is asked for again
    Clear { key: String },
}
