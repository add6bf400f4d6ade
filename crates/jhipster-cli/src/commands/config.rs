//! `jhipster-jdl config`: inspect the loaded configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            output.emit(&get_config_value(&config, &key)?)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.emit_json(&config)?;
            } else {
                output.header("Current configuration:")?;
                let serialised = toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
                output.emit(&serialised)?;
            }
        }

        ConfigCommands::Path => {
            output.emit(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let generation = &config.generation;
    match key {
        "generation.database_type" => Ok(generation.database_type.clone()),
        "generation.unidirectional_relationships" => Ok(generation.unidirectional_relationships.to_string()),
        "generation.entities_dir" => Ok(generation.entities_dir.display().to_string()),
        "generation.creation_timestamp" => Ok(generation.creation_timestamp.clone().unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}
