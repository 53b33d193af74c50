//! Config commands

use crate::config::Config;
use crate::ConfigCommands;

const KEYS: [&str; 2] = ["api_url", "default_format"];

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<(), String> {
    match action {
        ConfigCommands::Init => {
            let path = Config::default().save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile).unwrap_or_default();
            match key.as_str() {
                "api_url" => config.api_url = Some(value),
                "default_format" => config.default_format = Some(value),
                _ => return Err(format!("Unknown config key: {}", key)),
            }
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile).unwrap_or_default();
            println!("{}: {}", key, lookup(&config, &key)?.unwrap_or("(not set)"));
        }
        ConfigCommands::List => {
            let config = Config::load(profile).unwrap_or_default();
            for key in KEYS {
                println!("{}: {}", key, lookup(&config, key)?.unwrap_or("(not set)"));
            }
        }
    }
    Ok(())
}

fn lookup<'a>(config: &'a Config, key: &str) -> Result<Option<&'a str>, String> {
    match key {
        "api_url" => Ok(config.api_url.as_deref()),
        "default_format" => Ok(config.default_format.as_deref()),
        _ => Err(format!("Unknown config key: {}", key)),
    }
}
