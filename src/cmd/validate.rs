//! `zabbix-map validate`: check a configuration file for errors.
//!
//! Parses and validates the file alone (no environment overrides) and
//! reports in text or JSON. Half-configured Zabbix settings are warnings.

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::sources::{extension, parse_config_str};
use crate::config::validation;
use crate::error::ZabbixMapError;

pub fn execute(args: &ValidateArgs) -> Result<(), ZabbixMapError> {
    let path = &args.config;

    if !path.exists() {
        return Err(ZabbixMapError::ConfigFileNotFound { path: path.clone() });
    }

    let content = std::fs::read_to_string(path)?;
    let config = parse_config_str(extension(path), &content, &path.display().to_string())?;
    let warnings = validation::warnings(&config);

    if let Err(errors) = validation::validate(&config) {
        match args.format {
            ValidateFormat::Text => {
                eprintln!("\u{2717} {} has {} errors\n", path.display(), errors.len());
                for error in &errors {
                    eprintln!("{error}");
                }
            }
            ValidateFormat::Json => {
                let json_errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "field": e.field,
                            "message": e.message,
                            "suggestion": e.suggestion,
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": false,
                        "errors": json_errors,
                        "warnings": warnings,
                    })
                );
            }
        }
        return Err(ZabbixMapError::ConfigValidation { errors });
    }

    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &config)
            );
            for warning in &warnings {
                println!("  ! {warning}");
            }
        }
        ValidateFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "zabbixConfigured": config.zabbix_configured(),
                    "warnings": warnings,
                })
            );
        }
    }

    Ok(())
}
