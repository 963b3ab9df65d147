//! Command-line interface definitions using clap

use clap::Parser;

/// teenyurl-web - session-aware front end for the teenyurl link API
#[derive(Parser, Debug)]
#[command(name = "teenyurl-web")]
#[command(version)]
#[command(about = "Session-aware web front end for the teenyurl API", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<String>,

    /// Print a sample configuration file to stdout and exit
    #[arg(long)]
    pub generate_config: bool,
}
