use anyhow::{bail, Context};
use colored::Colorize;
use hwl_server::{open_store, HospitalServer, ServerConfig, StorageConfig};
use hwl_store::{DocumentStore, RequestContext};
use hwl_worklist::{Hospital, Role, Worklist, WorklistError};
use tracing::Level;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    init_logging(cli.verbose || !config.is_production());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    match cli.command {
        Command::Serve(args) => runtime.block_on(cmd_serve(config, args)),
        Command::Seed(args) => runtime.block_on(cmd_seed(config, args)),
        Command::Config => cmd_config(&config),
    }
}

/// Defaults, then the TOML file, then `HOSPITAL_API_*` variables.
fn load_config(cli: &Cli) -> anyhow::Result<ServerConfig> {
    load_config_with(cli, |key| std::env::var(key).ok())
}

/// Like [`load_config`], reading variables through `lookup`.
fn load_config_with(
    cli: &Cli,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ServerConfig> {
    let config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    Ok(config.with_overrides(lookup)?)
}

fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage = StorageConfig::File { data_dir };
    }

    let store = open_store(&config.storage).await?;
    if args.seed {
        let worklist = Worklist::new(store.clone());
        report_seed(seed(&worklist).await?);
    }

    println!(
        "{} Hospital worklist on {} ({})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.environment.cyan()
    );
    HospitalServer::new(config, store).serve().await?;
    Ok(())
}

async fn cmd_seed(mut config: ServerConfig, args: SeedArgs) -> anyhow::Result<()> {
    if let Some(data_dir) = args.data_dir {
        config.storage = StorageConfig::File { data_dir };
    }
    if config.storage == StorageConfig::Memory {
        bail!("seeding needs a file store: pass --data-dir or set HOSPITAL_API_DATA_DIR");
    }

    let store = open_store(&config.storage).await?;
    let worklist = Worklist::new(store.clone());
    let outcome = seed(&worklist).await;
    store.disconnect(&RequestContext::background()).await?;
    report_seed(outcome?);
    Ok(())
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// The two sample hospitals with their predefined roles.
pub fn sample_hospitals() -> Vec<Hospital> {
    let roles = || {
        vec![
            Role::new("Doctor", "rhinitis"),
            Role::new("Nurse", "checkup"),
            Role::new("Transporter", "jason-statham"),
        ]
    };
    vec![
        Hospital::new("hospital-ba")
            .with_name("Hospital Bratislava")
            .with_address("123")
            .with_roles(roles()),
        Hospital::new("hospital-nr")
            .with_name("Hospital Nitra")
            .with_address("321")
            .with_roles(roles()),
    ]
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

/// Create each sample hospital. Ones that already exist are left untouched.
pub async fn seed(worklist: &Worklist) -> anyhow::Result<SeedOutcome> {
    let mut outcome = SeedOutcome::default();
    for hospital in sample_hospitals() {
        let id = hospital.id.clone();
        let ctx = RequestContext::background();
        match worklist.create_hospital(&ctx, hospital).await {
            Ok(_) => outcome.created.push(id),
            Err(WorklistError::Conflict(_)) => {
                tracing::debug!(hospital = %id, "sample hospital already exists");
                outcome.skipped.push(id);
            }
            Err(e) => return Err(e).with_context(|| format!("failed to seed {id}")),
        }
    }
    Ok(outcome)
}

fn report_seed(outcome: SeedOutcome) {
    for id in &outcome.created {
        println!("  {} {}", "created:".green(), id);
    }
    for id in &outcome.skipped {
        println!("  {} {} (already exists)", "skipped:".yellow(), id);
    }
}
