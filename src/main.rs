use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = zabbix_map::cli::Cli::parse();
    if let Err(e) = zabbix_map::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
