use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dzivot_viegli::bot::{schema, Command};
use dzivot_viegli::config::{BotConfig, LogFormat};
use dzivot_viegli::dialogue::TriageSession;
use dzivot_viegli::localization::init_localization;
use dzivot_viegli::resources::load_resources;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing(LogFormat::from_env());

    info!("Starting DzīvotViegli Telegram bot");

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot start without configuration");
            return Err(e.into());
        }
    };

    init_localization();

    let resources = load_resources(&config.resources_path);
    info!(
        path = %config.resources_path.display(),
        hospital = %resources.hospital.name,
        duty_doctor = resources.duty_doctor.is_some(),
        "Town resources available"
    );

    let bot = Bot::new(&config.bot_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![
            InMemStorage::<TriageSession>::new(),
            Arc::new(config)
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
