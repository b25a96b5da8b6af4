use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{error, info};
use std::io::Write;

mod cli;

use cli::Cli;
use homework_bot::{Bot, Config, Credentials, PracticumClient, SystemClock, TelegramNotifier};

const DEFAULT_LOG_FILTER: &str = "homework_bot=debug";

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .init();
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("{}", e);
            return Err(e).context("Credential check failed");
        }
    };

    if cli.is_verbose() {
        println!("{} {}", "Polling:".green(), config.poll.endpoint);
        println!("{} every {}s", "Interval:".green(), config.poll.interval_secs);
        println!("{} {}", "Chat:".green(), credentials.telegram_chat_id);
    }

    let source = PracticumClient::new(&config.poll.endpoint, &credentials.practicum_token)
        .context("Failed to create status API client")?;
    let notifier = TelegramNotifier::new(
        &config.telegram.api_url,
        &credentials.telegram_token,
        &credentials.telegram_chat_id,
    );
    let mut bot = Bot::new(source, notifier, SystemClock, config.poll.interval());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    info!("Starting homework-bot");
    runtime.block_on(bot.run());

    Ok(())
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Setup logging before anything that logs
    setup_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
