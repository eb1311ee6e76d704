use anyhow::Result;
use clap::Parser;
use folio_core::{
    application::{
        ports::{ClockPort, SlugGeneratorPort},
        services::ApplicationServices,
    },
    cli::{self, Cli, Command},
    config::AppConfig,
    infrastructure::{
        database, repositories::postgres_repositories, time::SystemClock,
        util::DefaultSlugGenerator,
    },
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let pool =
        database::init_pool(config.database_url(), config.database_max_connections()).await?;

    if cli.command == Command::Migrate {
        database::run_migrations(&pool).await?;
        tracing::info!("migrations applied");
        return Ok(());
    }

    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let slugger: Arc<SlugGeneratorPort> = Arc::new(DefaultSlugGenerator);
    let services = ApplicationServices::new(
        postgres_repositories(&pool),
        clock,
        slugger,
        config.write_retry_limit(),
    );

    let output = cli::execute(&services, cli.command).await?;
    println!("{output}");

    pool.close().await;
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
