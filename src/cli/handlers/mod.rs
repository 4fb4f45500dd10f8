use std::path::Path;

use chrono::Datelike;
use tracing::info;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::gateway::SuggestionGateway;
use crate::io::gemini::GeminiGateway;
use crate::io::logging::{self, LogTarget};
use crate::model::{AppConfig, BudgetRange, Gender, MAX_CHARACTERISTICS, ProfileDraft};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let path = config_io::config_path(cli.config.as_deref())?;

    match cli.command {
        None => {
            let config = config_io::load_config(&path)?;
            logging::init(&config.log, LogTarget::File);
            crate::tui::run(&config)
        }
        Some(Commands::Suggest(args)) => {
            let config = config_io::load_config(&path)?;
            logging::init(&config.log, LogTarget::Stderr);
            cmd_suggest(args, &config, json)
        }
        Some(Commands::Config(cmd)) => match cmd.action {
            ConfigAction::Path => cmd_config_path(&path),
            ConfigAction::Init { force } => cmd_config_init(&path, force),
            ConfigAction::Show => cmd_config_show(&path, json),
            ConfigAction::Set { key, value } => cmd_config_set(&path, &key, &value),
        },
    }
}

// ---------------------------------------------------------------------------
// Suggest
// ---------------------------------------------------------------------------

/// Build the same draft the form would hold from command-line flags
fn draft_from_args(args: SuggestArgs) -> Result<ProfileDraft, Box<dyn std::error::Error>> {
    if args.traits.len() > MAX_CHARACTERISTICS {
        return Err(format!(
            "at most {} --trait values are allowed (got {})",
            MAX_CHARACTERISTICS,
            args.traits.len()
        )
        .into());
    }
    let gender = Gender::parse(&args.gender).ok_or_else(|| {
        format!(
            "unknown gender '{}' (expected male, female, other or unspecified)",
            args.gender
        )
    })?;

    let mut characteristics = args.traits;
    if characteristics.is_empty() {
        characteristics.push(String::new());
    }

    Ok(ProfileDraft {
        characteristics,
        gender,
        birth_year: args.born.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        budget: BudgetRange {
            min: args.min,
            max: args.max,
        },
        occasion: args.occasion.unwrap_or_default(),
    })
}

fn cmd_suggest(
    args: SuggestArgs,
    config: &AppConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let current_year = chrono::Local::now().year();
    let profile = draft_from_args(args)?.validate(current_year)?;

    let gateway = GeminiGateway::from_config(&config.api)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let batch = runtime.block_on(gateway.suggest(&profile))?;
    info!(suggestions = batch.suggestions.len(), "suggest finished");

    if json {
        println!("{}", serde_json::to_string_pretty(&batch_to_json(&batch))?);
    } else {
        for line in format_batch(&batch) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config_path(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", path.display());
    Ok(())
}

fn cmd_config_init(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    config_io::write_default_config(path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn api_key_set(config: &AppConfig) -> bool {
    std::env::var(&config.api.api_key_env).is_ok_and(|v| !v.trim().is_empty())
}

fn cmd_config_show(path: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config(path)?;
    let key_set = api_key_set(&config);
    let shown = path.display().to_string();
    if json {
        let out = ConfigJson {
            path: shown,
            config: &config,
            api_key_set: key_set,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_config(&shown, &config, key_set) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_config_set(path: &Path, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
    config_io::set_value(path, key, value)?;
    println!("{} = {}", key, value);
    Ok(())
}
