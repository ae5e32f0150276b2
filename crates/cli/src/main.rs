#![forbid(unsafe_code)]

mod render;

use std::io::Write;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use stocktrack_client::{ApiClient, ClientConfig, fetch_snapshot};
use stocktrack_core::CategoryId;
use stocktrack_inventory::{CategoryFilter, alerts, listing::status_counts};

#[derive(Parser, Debug)]
#[command(author, version, about = "stocktrack: household inventory with stock status", long_about = None)]
struct Cli {
    /// Base URL of the stocktrack service.
    #[arg(long, global = true, env = "STOCKTRACK_API_URL", default_value = stocktrack_client::config::DEFAULT_API_URL)]
    api_url: String,

    /// Reference date for status derivation (YYYY-MM-DD); defaults to the local date.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Emit JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List items with their derived stock status.
    List(ListArgs),
    /// List categories.
    Categories,
    /// Show items that need attention and lots about to expire.
    Alerts(AlertsArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Only items in this category.
    #[arg(long)]
    category: Option<CategoryId>,
}

#[derive(Args, Debug)]
struct AlertsArgs {
    /// How far ahead to look for expiring lots.
    #[arg(long, default_value_t = alerts::DEFAULT_DAYS_AHEAD)]
    days_ahead: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stocktrack_observability::init_with(&stocktrack_observability::TracingConfig::cli());

    let cli = Cli::parse();
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let api = ApiClient::new(&ClientConfig::new(cli.api_url.as_str()))?;
    tracing::debug!(api = api.base_url(), %today, "starting");

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::List(args) => {
            let snapshot = fetch_snapshot(&api).await?;
            let rows = snapshot.rows(today, CategoryFilter::from(args.category));
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &rows)?;
                writeln!(out)?;
            } else {
                write!(out, "{}", render::inventory_table(&rows))?;
                writeln!(out, "{}", render::status_line(&status_counts(&rows)))?;
            }
        }
        Commands::Categories => {
            let categories = api.categories().list().await?;
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &categories)?;
                writeln!(out)?;
            } else {
                for c in &categories {
                    writeln!(out, "{:>4}  {}", c.id.get(), c.name)?;
                }
            }
        }
        Commands::Alerts(args) => {
            let snapshot = fetch_snapshot(&api).await?;
            let attention = render::needing_attention(snapshot.rows(today, CategoryFilter::All));
            let expiring = alerts::expiring_lots(&snapshot.lots, today, args.days_ahead);
            if cli.json {
                let lots: Vec<_> = expiring
                    .iter()
                    .map(|l| {
                        serde_json::json!({
                            "id": l.id,
                            "itemId": l.item_id,
                            "quantity": l.quantity,
                            "expiryDate": l.expiry_date,
                        })
                    })
                    .collect();
                serde_json::to_writer_pretty(
                    &mut out,
                    &serde_json::json!({ "items": attention, "expiringLots": lots }),
                )?;
                writeln!(out)?;
            } else {
                write!(out, "{}", render::inventory_table(&attention))?;
                writeln!(out)?;
                write!(
                    out,
                    "{}",
                    render::expiring_lots(&snapshot.items, &expiring, args.days_ahead)
                )?;
            }
        }
    }
    Ok(())
}
