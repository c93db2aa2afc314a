//! `zabbix-map init`: generate a starter configuration file.
//!
//! Supports two modes:
//! - **Template mode** (default): writes a commented template.
//! - **Interactive mode** (`--interactive`): walks through a step-by-step wizard.

mod interactive;
mod serialize;
mod template;

use crate::cli::InitArgs;
use crate::error::ZabbixMapError;

pub fn execute(args: &InitArgs) -> Result<(), ZabbixMapError> {
    if args.interactive {
        interactive::run(args)
    } else {
        template::run(args)
    }
}
