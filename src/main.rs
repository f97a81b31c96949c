// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use specforge::{build_from_file, parse_recipe, DryRunAssembler, MacroContext};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "specforge")]
#[command(author, version, about = "Build Arch Linux packages from RPM-style spec recipes", long_about = None)]
struct Cli {
    /// Macro file loaded before parsing (one %name body per line)
    #[arg(short, long, global = true)]
    macro_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a recipe and hand it to the packager
    Build {
        /// Path to the recipe file
        recipe_path: PathBuf,
    },
    /// Parse a recipe and print its descriptor tree as JSON
    Inspect {
        /// Path to the recipe file
        recipe_path: PathBuf,
    },
    /// Parse a recipe and dump the resulting macro table
    Macros {
        /// Path to the recipe file
        recipe_path: PathBuf,
    },
}

/// One macro context per invocation, seeded from the optional macro file
fn macro_context(macro_file: Option<&PathBuf>) -> Result<MacroContext> {
    let mut macros = MacroContext::new();
    if let Some(path) = macro_file {
        let loaded = macros.load_from_file(path)?;
        info!("Loaded {} macro(s) from {}", loaded, path.display());
    }
    Ok(macros)
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut macros = macro_context(cli.macro_file.as_ref())?;

    match cli.command {
        Commands::Build { recipe_path } => {
            info!("Building recipe: {}", recipe_path.display());
            build_from_file(&recipe_path, &mut macros, &DryRunAssembler)?;
            Ok(())
        }
        Commands::Inspect { recipe_path } => {
            let text = std::fs::read_to_string(&recipe_path)?;
            let descriptor = parse_recipe(&text, &mut macros)?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
            Ok(())
        }
        Commands::Macros { recipe_path } => {
            let text = std::fs::read_to_string(&recipe_path)?;
            parse_recipe(&text, &mut macros)?;
            for (name, body) in macros.dump() {
                println!("%{}\t{}", name, body);
            }
            Ok(())
        }
    }
}
