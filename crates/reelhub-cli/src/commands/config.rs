use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use reelhub_config::{Config, CredentialStore, PathManager, CREDENTIAL_KEYS};
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn run_config(cmd: ConfigCommands, config_path: Option<&Path>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path_manager.config_file());

    match cmd {
        ConfigCommands::Show { full } => show_config(&config_file, &path_manager, full, output),
        ConfigCommands::Init { force } => init_config(&config_file, &path_manager, force, output),
        ConfigCommands::Credential { name, value } => set_credential(&path_manager, &name, value, output),
    }
}

fn show_config(config_file: &PathBuf, path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let exists = config_file.exists();
    let config = Config::load_or_default(config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

    let shown: Vec<(&str, String)> = CREDENTIAL_KEYS
        .iter()
        .map(|key| {
            let value = match credentials.get(key) {
                Some(v) if full => v.clone(),
                Some(v) => mask_string(v),
                None => "<not set>".to_string(),
            };
            (*key, value)
        })
        .collect();

    if !output.is_human() {
        let credentials_json: serde_json::Map<String, serde_json::Value> = shown
            .iter()
            .map(|(key, value)| (key.to_string(), json!(value)))
            .collect();
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "exists": exists,
            "config": config,
            "enabled_sources": config.enabled_sources(),
            "credentials": credentials_json,
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    if !exists {
        output.warn(format!(
            "No config file at {}; showing defaults. Run 'reelhub config init' to create one.",
            config_file.display()
        ));
    }

    println!("\n{} {}\n", "Configuration".bright_cyan().bold(), config_file.display().dimmed());
    let rendered = toml::to_string_pretty(&config).map_err(|e| eyre!("Failed to render config: {}", e))?;
    println!("{}", rendered);

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Credential").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    for (key, value) in &shown {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is not usable yet: {}", e));
    }
    Ok(())
}

fn init_config(config_file: &PathBuf, path_manager: &PathManager, force: bool, output: &Output) -> Result<()> {
    if config_file.exists() && !force {
        output.warn(format!(
            "Config file already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create config directories: {}", e))?;
    Config::default()
        .save_to_file(config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default config to {}", config_file.display()));
    output.info("Add your spreadsheet endpoints and channel id, then store credentials with 'reelhub config credential <name>'.");
    Ok(())
}

fn set_credential(path_manager: &PathManager, name: &str, value: Option<String>, output: &Output) -> Result<()> {
    if !CREDENTIAL_KEYS.contains(&name) {
        return Err(eyre!(
            "Unknown credential '{}'. Expected one of: {}",
            name,
            CREDENTIAL_KEYS.join(", ")
        ));
    }

    let value = match value {
        Some(v) => v,
        None => rpassword::prompt_password(format!("{}: ", name))
            .map_err(|e| eyre!("Failed to read {}: {}", name, e))?,
    };
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(eyre!("{} cannot be empty", name));
    }

    let mut credentials = CredentialStore::new(path_manager.credentials_file());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
    credentials.set(name.to_string(), value);
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Saved {}", name));
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
