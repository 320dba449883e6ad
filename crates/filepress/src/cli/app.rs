use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(name = "filepress", version = env!("CARGO_PKG_VERSION"), about = "Pack files into zip archives and unpack archives safely", long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    /// Output directory; overrides `root` from the config file
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file to load instead of ./filepress.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "p", name = "pack", about = "Compress a file into a single-entry archive")]
    Pack(PackArg),
    #[command(alias = "u", name = "unpack", about = "Extract an archive and re-bundle its files")]
    Unpack(UnpackArg),
    #[command(alias = "get", name = "fetch", about = "Copy an artifact out of the output directory")]
    Fetch(FetchArg),
    #[command(alias = "ls", name = "list", about = "List produced artifacts")]
    List,
    #[command(name = "clean", about = "Remove extraction scratch directories")]
    Clean,
}

#[derive(Clone, Debug, Args)]
pub struct PackArg {
    /// File to compress
    pub file: PathBuf,
    /// Name to record instead of the file's own
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct UnpackArg {
    /// Archive to extract (must end in .zip)
    pub file: PathBuf,
    /// Archive name to record instead of the file's own
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct FetchArg {
    /// Artifact name as printed by pack, unpack or list
    pub name: String,
    /// Write here instead of stdout
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<PathBuf>,
}
