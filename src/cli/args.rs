//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Compiles the USDA Keys to Soil Taxonomy criteria into a navigable clause tree
#[derive(Parser, Debug)]
#[command(name = "kstree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the source criteria into the keys document
    Build {
        /// Directory containing the three source JSON files
        #[arg(short, long, default_value = "assets", value_hint = ValueHint::DirPath)]
        assets: PathBuf,

        /// Output file for the compiled document
        #[arg(
            short,
            long,
            default_value = "data/keys_optimized.json",
            value_hint = ValueHint::FilePath
        )]
        output: PathBuf,

        /// Compile and report statistics without writing output
        #[arg(long)]
        validate: bool,
    },

    /// Render the clause tree of one taxonomic code
    Tree {
        /// Taxonomic code, e.g. AAB
        code: String,

        /// Directory containing the three source JSON files
        #[arg(short, long, default_value = "assets", value_hint = ValueHint::DirPath)]
        assets: PathBuf,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
