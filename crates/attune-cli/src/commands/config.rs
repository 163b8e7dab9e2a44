use anyhow::{Context, Result};
use attune_source::{config, Config};
use toml_edit::{table, value, DocumentMut};

const VALID_KEYS: &str = "source, timeout_secs, max_retries, logging.level, logging.coloured";

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  source: {}", config.source);
    println!("  timeout_secs: {}", config.timeout_secs);
    println!("  max_retries: {}", config.max_retries);
    println!("  logging.level: {}", config.logging.level);
    println!("  logging.coloured: {}", config.logging.coloured);

    println!("\nPriority: CLI args > ENV vars (ATTUNE_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value.
pub fn get_config(key: Option<String>) -> Result<()> {
    if let Some(key) = key {
        let config = Config::load()?;
        println!("{}", lookup(&config, &key)?);
    } else {
        // No key provided, show entire config file contents
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'attune config init' to create it.");
        }
    }

    Ok(())
}

fn lookup(config: &Config, key: &str) -> Result<String> {
    Ok(match key {
        "source" => config.source.clone(),
        "timeout_secs" => config.timeout_secs.to_string(),
        "max_retries" => config.max_retries.to_string(),
        "logging.level" => config.logging.level.clone(),
        "logging.coloured" => config.logging.coloured.to_string(),
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    })
}

/// Set a config value.
pub fn set_config(key: &str, new_value: &str) -> Result<()> {
    let config_path = config::config_file_path();

    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = apply_setting(&contents, key, new_value)?;

    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, new_value);
    println!("  in {}", config_path.display());

    Ok(())
}

/// Rewrite one key of a config document, keeping comments and layout.
fn apply_setting(contents: &str, key: &str, new_value: &str) -> Result<String> {
    let mut doc: DocumentMut = contents.parse().context("Failed to parse config file")?;

    match key {
        "source" => doc["source"] = value(new_value),
        "timeout_secs" | "max_retries" => {
            let n: i64 = new_value
                .parse()
                .with_context(|| format!("{} must be a whole number", key))?;
            anyhow::ensure!(n >= 0, "{} must not be negative", key);
            doc[key] = value(n);
        }
        "logging.level" | "logging.coloured" => {
            if !doc.contains_key("logging") {
                doc["logging"] = table();
            }
            if key == "logging.level" {
                doc["logging"]["level"] = value(new_value);
            } else {
                let flag: bool = new_value
                    .parse()
                    .with_context(|| format!("{} must be true or false", key))?;
                doc["logging"]["coloured"] = value(flag);
            }
        }
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, VALID_KEYS),
    }

    Ok(doc.to_string())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    let config_path = config::config_file_path();
    println!("{}", config_path.display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure attune.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
