use clap::Parser;
use missive::Provider;
use missive::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "missive", about = "Contact form for the terminal")]
struct Args {
    /// Delivery backend to use
    #[arg(short, long, value_enum)]
    provider: Option<Provider>,

    /// EmailJS service ID
    #[arg(long)]
    service_id: Option<String>,

    /// EmailJS template ID
    #[arg(long)]
    template_id: Option<String>,

    /// EmailJS public key
    #[arg(long)]
    public_key: Option<String>,

    /// Read configuration from this file instead of ~/.missive/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to missive.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("missive.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match args.config.as_deref() {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            provider: args.provider,
            service_id: args.service_id,
            template_id: args.template_id,
            public_key: args.public_key,
        },
    );

    log::info!("Missive starting up with provider: {:?}", resolved.provider);

    let (provider, credentials) = missive::tui::build_provider(&resolved)?;
    missive::tui::run(provider, credentials, &resolved)?;
    Ok(())
}
