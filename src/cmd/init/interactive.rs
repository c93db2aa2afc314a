//! Interactive wizard for step-by-step config generation.

use std::path::{Path, PathBuf};

use console::style;
use dialoguer::{Confirm, Input, Password, Select};

use crate::cli::{ConfigFormat, InitArgs};
use crate::config::model::{AuthMode, Config, CorsConfig, ServerConfig, ZabbixConfig};
use crate::config::validation::{validate, validate_api_url, validate_origin, validate_timeout};
use crate::error::ZabbixMapError;

use super::serialize::serialize_config;

fn map_prompt_err(e: dialoguer::Error) -> ZabbixMapError {
    ZabbixMapError::Io(std::io::Error::other(e.to_string()))
}

pub fn run(args: &InitArgs) -> Result<(), ZabbixMapError> {
    if !console::Term::stdout().is_term() {
        return Err(ZabbixMapError::Io(std::io::Error::other(
            "interactive mode requires a terminal (TTY). Use zabbix-map init without -i for non-interactive mode.",
        )));
    }

    println!(
        "\n  {} Config Wizard\n  {}\n",
        style("Zabbix Map").cyan().bold(),
        style("─────────────────────────").dim()
    );

    println!("  {}\n", style("Step 1: Output").bold());
    let format = prompt_format(args)?;
    let output = prompt_output(args, &format)?;

    println!("\n  {}\n", style("Step 2: Zabbix").bold());
    let zabbix = prompt_zabbix()?;

    println!("\n  {}\n", style("Step 3: Server").bold());
    let (server, cors) = prompt_server()?;

    let config = Config {
        zabbix,
        server,
        cors,
    };

    if let Err(errors) = validate(&config) {
        eprintln!(
            "\n  {} Config has validation errors:",
            style("!").red().bold()
        );
        for e in &errors {
            eprintln!("    {e}");
        }
        return Err(ZabbixMapError::ConfigValidation { errors });
    }

    println!("\n  {}\n", style("Step 4: Review").bold());
    print_summary(&config, &format, &output);

    let confirm = Confirm::new()
        .with_prompt(format!("Write config to {}?", output.display()))
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;

    if !confirm {
        println!("  Aborted.");
        return Ok(());
    }

    if output.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", output.display()))
            .default(false)
            .interact()
            .map_err(map_prompt_err)?;
        if !overwrite {
            println!("  Aborted.");
            return Ok(());
        }
    }

    let content = serialize_config(&config, &format)?;
    std::fs::write(&output, content)?;
    println!(
        "\n  {} Created {}",
        style("✓").green().bold(),
        output.display()
    );
    if config.zabbix.auth_token.is_some() {
        println!(
            "  {} The file holds your API token; keep it out of version control.",
            style("!").yellow().bold()
        );
    }
    Ok(())
}

fn prompt_format(args: &InitArgs) -> Result<ConfigFormat, ZabbixMapError> {
    const FORMATS: [ConfigFormat; 3] = [ConfigFormat::Yaml, ConfigFormat::Json, ConfigFormat::Toml];
    let default_idx = match args.format {
        ConfigFormat::Yaml => 0,
        ConfigFormat::Json => 1,
        ConfigFormat::Toml => 2,
    };

    let selection = Select::new()
        .with_prompt("Config format")
        .items(&["yaml", "json", "toml"])
        .default(default_idx)
        .interact()
        .map_err(map_prompt_err)?;

    Ok(FORMATS
        .get(selection)
        .cloned()
        .unwrap_or(ConfigFormat::Yaml))
}

fn prompt_output(args: &InitArgs, format: &ConfigFormat) -> Result<PathBuf, ZabbixMapError> {
    let default_path = args.output.as_ref().map_or_else(
        || format!("zabbix-map.{}", format.extension()),
        |p| p.display().to_string(),
    );

    let path_str: String = Input::new()
        .with_prompt("Output file path")
        .default(default_path)
        .interact_text()
        .map_err(map_prompt_err)?;

    Ok(PathBuf::from(path_str))
}

fn prompt_zabbix() -> Result<ZabbixConfig, ZabbixMapError> {
    let connect = Confirm::new()
        .with_prompt("Connect to a Zabbix server now? (no = serve example data)")
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;
    if !connect {
        return Ok(ZabbixConfig::default());
    }

    let api_url: String = Input::new()
        .with_prompt("Zabbix API URL")
        .default("https://zabbix.example.com/api_jsonrpc.php".into())
        .validate_with(|input: &String| validate_api_url(input))
        .interact_text()
        .map_err(map_prompt_err)?;

    let auth_token = Password::new()
        .with_prompt("API token")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err("token cannot be empty".into())
            } else {
                Ok(())
            }
        })
        .interact()
        .map_err(map_prompt_err)?;

    let timeout: u64 = Input::new()
        .with_prompt("Request timeout (ms)")
        .default(10_000)
        .validate_with(|input: &u64| validate_timeout(*input))
        .interact_text()
        .map_err(map_prompt_err)?;

    let accept_invalid_certs = Confirm::new()
        .with_prompt("Accept self-signed certificates?")
        .default(true)
        .interact()
        .map_err(map_prompt_err)?;

    let auth_mode = Select::new()
        .with_prompt("Token transport")
        .items(&[
            "JSON-RPC auth field (Zabbix < 7.2)",
            "Authorization: Bearer header (Zabbix 6.4+)",
        ])
        .default(0)
        .interact()
        .map_err(map_prompt_err)?;

    Ok(ZabbixConfig {
        api_url: Some(api_url.trim().to_string()),
        auth_token: Some(auth_token.trim().to_string()),
        timeout,
        accept_invalid_certs,
        auth_mode: if auth_mode == 1 {
            AuthMode::Header
        } else {
            AuthMode::Envelope
        },
    })
}

fn prompt_server() -> Result<(ServerConfig, CorsConfig), ZabbixMapError> {
    let ip: String = Input::new()
        .with_prompt("Server address reported to clients")
        .default("localhost".into())
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                Err("server address cannot be empty".into())
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(map_prompt_err)?;

    let origin: String = Input::new()
        .with_prompt("Allowed CORS origin")
        .default("*".into())
        .validate_with(|input: &String| validate_origin(input))
        .interact_text()
        .map_err(map_prompt_err)?;

    Ok((ServerConfig { ip }, CorsConfig { origin }))
}

fn print_summary(config: &Config, format: &ConfigFormat, output: &Path) {
    let zabbix = &config.zabbix;
    let endpoint = zabbix.api_url.as_deref().unwrap_or("none (example data)");
    let tls = if zabbix.accept_invalid_certs {
        "self-signed accepted"
    } else {
        "verified"
    };
    let rows = [
        ("Format:", format.extension().to_string()),
        ("Output:", output.display().to_string()),
        ("Zabbix:", endpoint.to_string()),
        ("Timeout:", format!("{}ms", zabbix.timeout)),
        ("TLS:", tls.to_string()),
        ("Server:", config.server.ip.clone()),
        ("CORS:", config.cors.origin.clone()),
    ];

    println!(
        "  {}",
        style("┌─────────────────────────────────────────────┐").dim()
    );
    for (label, value) in rows {
        println!(
            "  {}  {:<9} {:<33}{}",
            style("│").dim(),
            label,
            value,
            style("│").dim()
        );
    }
    println!(
        "  {}\n",
        style("└─────────────────────────────────────────────┘").dim()
    );
}
