use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use messages_api::config::Config;
use messages_api::database::{redact, MessageStore};
use messages_api::middleware::CorsHeaders;
use messages_api::routes::configure_routes;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "messages-api", version, about = "JSON CRUD service for text messages")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first to get logging settings
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let database_url = config.database.connection_url()?;
    info!("Connecting to database at {}", redact(&database_url));

    let store = match MessageStore::connect(&config.database, &database_url).await {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(e).context("Failed to connect to database");
        }
    };

    if config.database.create_table {
        store
            .ensure_table()
            .await
            .context("Failed to create messages table")?;
    }
    info!(table = %config.database.table, "Database ready");

    let store = web::Data::new(store);
    let path_prefix = config.server.path_prefix.clone();
    let bind_addr = config.bind_address();
    info!("Starting messages-api on http://{}{}", bind_addr, path_prefix);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(CorsHeaders)
            .wrap(Logger::default())
            .configure(|cfg| configure_routes(cfg, &path_prefix))
    })
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {bind_addr}"))?
    .run()
    .await?;

    Ok(())
}
