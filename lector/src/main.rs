use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lector::api::{create_router, AppState};
use lector::config::Config;
use lector::media::MediaFetcher;
use lector::ocr::OcrProvider;

#[derive(Parser)]
#[command(name = "lector")]
#[command(about = "WhatsApp OCR bot: extract text from images via Twilio and Mistral OCR")]
struct Args {
    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lector=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if !config.twilio.validate_signature {
        tracing::warn!(
            "VALIDATE_TWILIO_SIGNATURE is disabled — webhook requests are not authenticated"
        );
    }

    let media = MediaFetcher::new(&config.twilio)?;
    let ocr = OcrProvider::new(&config.ocr)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, media, ocr);
    let app = create_router(state);

    tracing::info!("Lector starting on http://{}", addr);
    tracing::info!("  Webhook:      http://{}/webhook", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Lector stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
