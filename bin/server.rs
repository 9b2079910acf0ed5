// Namveda - Web Server
// REST API with Axum: birth charts, AI name suggestions, donations

use anyhow::{Context, Result};
use namveda::api::{router, AppState, PaymentState};
use namveda::{Config, GeminiClient, PaymentGateway, RazorpayClient, TextGenerator};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    namveda::logging::init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
        config.ai.api_url.clone(),
        config.ai.api_key.clone(),
    )?);

    let payments = match &config.payment {
        Some(payment) => {
            let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayClient::new(
                payment.api_url.clone(),
                payment.key_id.clone(),
                payment.key_secret.clone(),
            )?);
            Some(PaymentState {
                gateway,
                public_key_id: payment.public_key_id.clone(),
            })
        }
        None => {
            tracing::warn!("RAZORPAY_KEY_ID not set, /api/create-order is disabled");
            None
        }
    };

    let app = router(AppState {
        generator,
        payments,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        version = namveda::VERSION,
        "namveda server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
    tracing::info!("shutting down");
}
