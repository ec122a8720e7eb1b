use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use transcript_gateway::application::services::{
    JobPoller, TranscriptAssistant, TranscriptionService,
};
use transcript_gateway::infrastructure::llm::OpenAiChatClient;
use transcript_gateway::infrastructure::observability::init_tracing;
use transcript_gateway::infrastructure::transcription::AssemblyAiClient;
use transcript_gateway::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&settings.logging, environment);

    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .build()
        .context("failed to build HTTP client")?;

    let provider = Arc::new(AssemblyAiClient::new(
        http_client.clone(),
        settings.transcription.base_url.clone(),
        settings.transcription.api_key.clone(),
    ));
    if !provider.is_configured() {
        tracing::warn!(
            "Transcription provider base_url/api_key not configured; \
             /transcript endpoints will fail until APP_TRANSCRIPTION__BASE_URL and \
             APP_TRANSCRIPTION__API_KEY are set"
        );
    }

    let llm_client = Arc::new(OpenAiChatClient::new(http_client, &settings.llm));
    if !llm_client.is_configured() {
        tracing::warn!(
            "Chat provider api_key not configured; /transcript/ai endpoints will fail until \
             APP_LLM__API_KEY is set"
        );
    }

    let poller = JobPoller::new(provider.clone(), settings.polling.interval())
        .with_timeout(settings.polling.timeout());

    let state = AppState {
        transcription_service: Arc::new(TranscriptionService::new(
            provider,
            poller,
            settings.transcription.language_code.clone(),
        )),
        transcript_assistant: Arc::new(TranscriptAssistant::new(llm_client)),
        shutdown: CancellationToken::new(),
    };
    let shutdown = state.shutdown.clone();

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server host/port")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling in-flight polls");
    shutdown.cancel();
}
