use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "giftdeck", about = concat!("giftdeck v", env!("CARGO_PKG_VERSION"), " - swipe through gift ideas grounded in search"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different config file
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask for gift ideas without opening the TUI
    Suggest(SuggestArgs),
    /// Inspect or edit the config file
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Suggest args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SuggestArgs {
    /// Something about the recipient: hobbies, interests, personality (repeatable, up to 5)
    #[arg(long = "trait", value_name = "TEXT", action = clap::ArgAction::Append)]
    pub traits: Vec<String>,
    /// Gender (unspecified, male, female, other)
    #[arg(long, default_value = "unspecified")]
    pub gender: String,
    /// Year of birth
    #[arg(long, value_name = "YEAR")]
    pub born: Option<String>,
    /// Where they live
    #[arg(long)]
    pub location: Option<String>,
    /// Lowest price in pounds (multiple of 5)
    #[arg(long, default_value_t = crate::model::MIN_BUDGET)]
    pub min: u32,
    /// Highest price in pounds (multiple of 5; 250 means "or more")
    #[arg(long, default_value_t = crate::model::MAX_BUDGET)]
    pub max: u32,
    /// What the gift is for, e.g. birthday
    #[arg(long)]
    pub occasion: Option<String>,
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file path
    Path,
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
    /// Set a value, keeping the rest of the file as is
    Set {
        /// Dotted key, e.g. api.model
        key: String,
        value: String,
    },
}
