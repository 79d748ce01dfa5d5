use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hwl",
    about = "Hospital worklist: employees, roles and performance records per hospital",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level even in production
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Insert the sample hospitals, skipping ones that already exist
    Seed(SeedArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Keep hospitals as JSON files in this directory instead of in memory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Insert the sample hospitals before serving
    #[arg(long)]
    pub seed: bool,
}

#[derive(Args)]
pub struct SeedArgs {
    /// Directory of the file store to seed
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}
