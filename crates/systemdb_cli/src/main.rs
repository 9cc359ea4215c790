//! Command-line collaborator for the systemdb catalog store.
//!
//! # Responsibility
//! - Expose the store operations and search filter as subcommands.
//! - Own all user-facing presentation; no business logic lives here.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use systemdb_core::db::open_db;
use systemdb_core::{
    default_log_level, init_logging, matching_systems, CatalogStore, ImportError, Item,
    MarketSide, SqliteStorage, System, EXPORT_FILE_NAME,
};

#[derive(Parser)]
#[command(name = "systemdb", version, about = "Local star-system trade catalog")]
struct Cli {
    /// Path to the catalog database file.
    #[arg(long, default_value = "systemdb.sqlite3")]
    db: PathBuf,

    /// Directory for rolling log files. Logging stays off when absent.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List systems, optionally filtered by item-name substring.
    List {
        /// Case-insensitive item-name filter.
        #[arg(long, default_value = "")]
        search: String,
        /// Show only the buy side.
        #[arg(long, conflicts_with = "sell")]
        buy: bool,
        /// Show only the sell side.
        #[arg(long)]
        sell: bool,
    },
    /// Add a system to the catalog.
    Add {
        name: String,
        #[arg(long, default_value = "")]
        glyphs: String,
        /// System tag. Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Buy item as name:price:percent. Repeatable.
        #[arg(long = "buy", value_parser = parse_item)]
        buy: Vec<Item>,
        /// Sell item as name:price:percent. Repeatable.
        #[arg(long = "sell", value_parser = parse_item)]
        sell: Vec<Item>,
    },
    /// Remove every system with the given name.
    Remove { name: String },
    /// Merge systems from a JSON catalog file.
    Import { file: PathBuf },
    /// Write the catalog document to a file.
    Export {
        #[arg(default_value = EXPORT_FILE_NAME)]
        file: PathBuf,
    },
    /// Delete every catalog entry.
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(dir) = cli.log_dir.as_deref() {
        // Logging failure must not block catalog work.
        if let Err(message) = init_logging(default_log_level(), &dir.to_string_lossy()) {
            eprintln!("warning: {message}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let conn = open_db(&cli.db)
        .map_err(|err| format!("failed to open catalog database `{}`: {err}", cli.db.display()))?;
    let storage = SqliteStorage::new(&conn);
    let mut store = CatalogStore::load(storage).map_err(|err| err.to_string())?;

    match cli.command {
        Command::List { search, buy, sell } => {
            let both = buy == sell;
            if both || buy {
                print_side(store.systems(), &search, MarketSide::Buy);
            }
            if both || sell {
                print_side(store.systems(), &search, MarketSide::Sell);
            }
            Ok(())
        }
        Command::Add {
            name,
            glyphs,
            tags,
            buy,
            sell,
        } => {
            let system = System::new(name, glyphs, tags, buy, sell);
            store.append(system).map_err(|err| err.to_string())?;
            println!("system added ({} total)", store.systems().len());
            Ok(())
        }
        Command::Remove { name } => {
            let removed = store.remove(&name).map_err(|err| err.to_string())?;
            println!("removed {removed} system(s)");
            Ok(())
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(&file)
                .map_err(|err| format!("could not read `{}`: {err}", file.display()))?;
            match store.import_merge(&raw) {
                Ok(added) => {
                    println!("imported {added} system(s)");
                    Ok(())
                }
                Err(ImportError::Parse(_)) => Err(
                    "The file that you uploaded could not be parsed. Try uploading a different file."
                        .to_string(),
                ),
                Err(ImportError::Shape) => {
                    Err("The file that you uploaded is invalid.".to_string())
                }
                Err(ImportError::Persist(err)) => Err(err.to_string()),
            }
        }
        Command::Export { file } => {
            let document = store.export().map_err(|err| err.to_string())?;
            std::fs::write(&file, document)
                .map_err(|err| format!("could not write `{}`: {err}", file.display()))?;
            println!(
                "exported {} system(s) to {}",
                store.systems().len(),
                file.display()
            );
            Ok(())
        }
        Command::Clear => {
            store.clear().map_err(|err| err.to_string())?;
            println!("catalog cleared");
            Ok(())
        }
    }
}

fn print_side(systems: &[System], search: &str, side: MarketSide) {
    let label = match side {
        MarketSide::Buy => "Buy",
        MarketSide::Sell => "Sell",
    };
    println!("{label}");
    for system in matching_systems(systems, search, side) {
        println!("  {} [{}]", system.name, system.glyphs);
        if !system.tags.is_empty() {
            println!("    tags: {}", system.tags.join(", "));
        }
        let items = match side {
            MarketSide::Buy => &system.buy,
            MarketSide::Sell => &system.sell,
        };
        for item in items {
            let arrow = if item.percent > 0.0 { '^' } else { 'v' };
            println!(
                "    {}  {}  {arrow} {}%",
                item.name,
                item.price,
                item.percent.abs()
            );
        }
    }
}

/// Parses a `name:price:percent` item argument.
///
/// Item names may contain `:`; the two numeric fields are taken from the
/// end of the value.
fn parse_item(spec: &str) -> Result<Item, String> {
    let (rest, percent_text) = spec
        .rsplit_once(':')
        .ok_or_else(|| format!("expected name:price:percent, got `{spec}`"))?;
    let (name, price_text) = rest
        .rsplit_once(':')
        .ok_or_else(|| format!("expected name:price:percent, got `{spec}`"))?;

    let price: f64 = price_text
        .parse()
        .map_err(|_| format!("invalid price `{price_text}` in `{spec}`"))?;
    let percent: f64 = percent_text
        .parse()
        .map_err(|_| format!("invalid percent `{percent_text}` in `{spec}`"))?;

    Ok(Item::new(name, price, percent))
}
