//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// ccpkg - package descriptors for C/C++ build-file generators
#[derive(Parser)]
#[command(name = "ccpkg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the package and hand it to the generator
    Generate(GenerateArgs),

    /// Display the package dependency tree
    Tree(TreeArgs),

    /// Resolve and validate the package without generating
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Root manifest selection shared by all commands.
#[derive(Args)]
pub struct ManifestArgs {
    /// Path to ccpkg.toml (defaults to searching upwards from cwd)
    #[arg(long, env = "CCPKG_MANIFEST")]
    pub manifest: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Maximum depth to display
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Expand packages that appear more than once
    #[arg(long)]
    pub duplicates: bool,

    /// Show what each unit test links against
    #[arg(long)]
    pub tests: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
