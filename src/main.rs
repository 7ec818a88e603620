mod files;
mod generate;
mod model;
mod overrides;
mod parser;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "spellscribe", about = "Build spell description JSON from wiki page dumps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build description files from raw batch dumps
    Generate {
        /// Batch files to process (e.g. data/wiki/wizardSpells.json)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Directory for the generated description files
        #[arg(short, long, default_value = "public/resources")]
        out_dir: PathBuf,
        /// Manual corrections file (missing or malformed is fine)
        #[arg(long, default_value = "data/wiki/spellDescriptionOverrides.json")]
        overrides: PathBuf,
    },
    /// Show summary for a generated descriptions file
    Stats {
        /// Descriptions file to inspect
        file: PathBuf,
    },
    /// Print one spell from a generated descriptions file
    Show {
        /// Descriptions file to read
        file: PathBuf,
        /// Spell title (or pageid:<id> for untitled pages)
        title: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { inputs, out_dir, overrides } => {
            let summaries = files::run_generate(&inputs, &out_dir, &overrides)?;
            for s in &summaries {
                println!(
                    "Wrote {} ({} spells, {} errors)",
                    s.out_path.display(),
                    s.spells,
                    s.errors
                );
            }
            Ok(())
        }
        Commands::Stats { file } => {
            let d = files::read_descriptions(&file)?;
            println!("Generated: {}", d.generated_at.to_rfc3339());
            println!("Source:    {}", d.source);
            println!("Category:  {}", d.category_name);
            println!("Spells:    {}", d.spells_by_title.len());
            println!("Errors:    {}", d.errors.len());
            for e in &d.errors {
                println!("  {}: {}", e.title, e.message);
            }
            Ok(())
        }
        Commands::Show { file, title } => {
            let d = files::read_descriptions(&file)?;
            let spell = d
                .spells_by_title
                .get(&title)
                .with_context(|| format!("No spell titled {:?} in {}", title, file.display()))?;

            println!("{}", title);
            if !spell.infobox.is_empty() {
                let width = spell.infobox.keys().map(String::len).max().unwrap_or(0);
                for (key, value) in &spell.infobox {
                    println!("  {:<width$}  {}", key, value);
                }
            }
            for (heading, body) in &spell.sections {
                println!("\n== {} ==\n{}", heading, body);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
