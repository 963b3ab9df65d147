use clap::Parser;

use teenyurl_web::cli::Cli;
use teenyurl_web::config::{self, StaticConfig};
use teenyurl_web::{runtime, system};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.generate_config {
        println!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    config::init_config(cli.config.as_deref());
    let config = config::get_config();

    if let Err(e) = config.validate() {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    // guard 必须存活到进程结束，否则缓冲的日志会丢失
    let _log_guard = match system::init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    runtime::modes::run_server(&config).await
}
