//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the matching
//! handler: [`run`], [`init`], [`validate`], [`health`], or [`probe`].

pub mod health;
pub mod init;
pub mod probe;
pub mod run;
pub mod validate;

use crate::cli::{Cli, Commands};
use crate::error::ZabbixMapError;

pub async fn dispatch(cli: Cli) -> Result<(), ZabbixMapError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Init(ref args)) => init::execute(args),
        Some(Commands::Validate(ref args)) => validate::execute(args),
        Some(Commands::Health(args)) => health::execute(args).await,
        Some(Commands::Probe(args)) => probe::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  zabbix-map v{version}: geolocated device API over Zabbix\n\n  \
         No command provided. To get started:\n\n    \
         zabbix-map init                   Generate a starter config\n    \
         zabbix-map probe                  Check the Zabbix URL and token\n    \
         zabbix-map run                    Start the API (auto-detects ./zabbix-map.yaml)\n    \
         zabbix-map --help                 See all commands and options\n"
    );
}
