use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "kdm")]
#[command(about = "KDM campaign tracker - campaign schema migration tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Document store directory, overriding the configured one
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate a campaign document to the current (or given) schema version
    Migrate {
        /// Campaign JSON file; the stored campaign is used when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        /// Target schema version
        #[arg(long)]
        target: Option<String>,
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List the known schema versions and what each step changes
    Versions,
    /// Resolve a legacy monster name against the standard bestiary
    Resolve {
        #[arg(value_enum)]
        kind: MonsterKind,
        name: String,
    },
    /// Show a campaign's schema version and whether migration is pending
    Inspect {
        /// Campaign JSON file; the stored campaign is used when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MonsterKind {
    Nemesis,
    Quarry,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = commands::Context::load(cli.config, cli.storage_dir)?;
    commands::init_tracing(&ctx.config.log_filter);
    tracing::debug!("Configuration: {:?}", ctx.config);

    match cli.command {
        Commands::Migrate {
            file,
            target,
            dry_run,
        } => commands::migrate::run(&ctx, file.as_deref(), target.as_deref(), dry_run)?,
        Commands::Versions => commands::versions::show(&ctx)?,
        Commands::Resolve { kind, name } => match kind {
            MonsterKind::Nemesis => commands::resolve::nemesis(&name)?,
            MonsterKind::Quarry => commands::resolve::quarry(&name)?,
        },
        Commands::Inspect { file } => commands::inspect::run(&ctx, file.as_deref())?,
    }

    Ok(())
}
