use clap::Parser;
use colored::Colorize;

use orderlens::config::{Cli, StaticConfig};
use orderlens::errors::OrderlensError;
use orderlens::runtime::modes::run_server;
use orderlens::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        println!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    dotenvy::dotenv().ok();

    let config = match StaticConfig::load(cli.config.as_deref(), cli.config_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "{} {}\n  {}",
                "[ERROR]".red().bold(),
                "Failed to load configuration".red(),
                e.to_string().white()
            );
            std::process::exit(1);
        }
    };

    // guard 需要存活到进程结束，保证异步日志刷盘
    let _log_guard = init_logging(&config.logging)?;

    tracing::info!("orderlens {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        match e.downcast_ref::<OrderlensError>() {
            Some(err) => eprintln!("{}", err.format_colored()),
            None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
        }
        std::process::exit(1);
    }

    Ok(())
}
