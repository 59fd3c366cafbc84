use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use ptcg_prep::config::PipelineConfig;
use ptcg_prep::decklist;
use ptcg_prep::logging;
use ptcg_prep::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "ptcg_prep")]
#[command(about = "Pokémon TCG card feature preparation pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the card feature pipeline
    Prepare {
        /// Path to a TOML pipeline configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Delete a cached output artifact before running
        #[arg(long)]
        force: bool,
    },
    /// Parse a PTCGL decklist and print the card counts
    ParseDeck {
        /// Path to the decklist text file
        file: PathBuf,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(PipelineConfig::from_file(&path)?),
        None => Ok(PipelineConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare { config, force } => {
            println!("🔄 Running card feature pipeline...");

            let config = load_config(config)?;
            let pipeline = Pipeline::new(config);

            if force && pipeline.invalidate_cache()? {
                info!("cached artifact removed before run");
            }

            match pipeline.run() {
                Ok(result) => {
                    println!("\n📊 Pipeline Results:");
                    if result.from_cache {
                        println!("   Returned cached feature table");
                    } else if let Some(stats) = &result.stats {
                        println!("   Raw records: {}", stats.raw_records);
                        println!("   Filtered cards: {}", stats.filtered_cards);
                        println!("   Ability entries: {}", stats.ability_entries);
                        println!("   Attack entries: {}", stats.attack_entries);
                        println!("   Joined rows: {}", stats.joined_rows);
                        println!("   Energy rows: {}", stats.energy_rows);
                        println!("   Trainer rows: {}", stats.trainer_rows);
                    }
                    println!("   Feature rows: {}", result.rows.len());
                }
                Err(e) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Pipeline failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::ParseDeck { file } => {
            let deck_text = fs::read_to_string(&file)?;
            let deck = decklist::parse_decklist(&deck_text);

            let mut names: Vec<&String> = deck.keys().collect();
            names.sort();
            for name in names {
                let entry = &deck[name];
                let supertype = entry
                    .supertype
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "?".to_string());
                println!("{} x{} ({})", name, entry.count, supertype);
            }
        }
    }
    Ok(())
}
