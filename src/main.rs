//! agent-relay - process entry point.
//!
//! Starts the documentation agent behind its own network listener and the
//! coder agent on the configured transport (interactive console by default,
//! or its own listener).

use std::sync::Arc;

use agent_relay::agent::{coder_system_prompt, docs_system_prompt, Agent};
use agent_relay::config::{Config, TransportKind};
use agent_relay::llm::AnthropicClient;
use agent_relay::server;
use agent_relay::tools;
use agent_relay::transport::{bridge, ConsoleTransport};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CODER_AGENT: &str = "coder";
const DOCS_AGENT: &str = "docs";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    // Documentation agent: always network-backed, on its own listener.
    let docs_registry = Arc::new(tools::docs_tools());
    let docs_llm = Arc::new(AnthropicClient::new(
        config.api_key.clone(),
        config.model.clone(),
        config.max_tokens,
        docs_system_prompt(&docs_registry),
    ));
    let (docs_transport, docs_bridge) = bridge();
    let mut docs_agent = Agent::new(
        DOCS_AGENT,
        docs_llm,
        docs_registry,
        config.workspace_path.clone(),
        Box::new(docs_transport),
    );
    let docs_router = server::router(DOCS_AGENT, Arc::new(docs_bridge));
    let docs_addr = format!("{}:{}", config.host, config.docs_port);
    tokio::spawn(async move {
        if let Err(e) = server::serve(docs_addr, docs_router).await {
            error!("docs agent listener failed: {:#}", e);
        }
    });
    tokio::spawn(async move {
        if let Err(e) = docs_agent.run().await {
            error!("docs agent loop terminated: {:#}", e);
        }
    });

    // Coder agent: console or network, per configuration.
    let coder_registry = Arc::new(tools::coder_tools(&config.docs_agent_url));
    let coder_llm = Arc::new(AnthropicClient::new(
        config.api_key.clone(),
        config.model.clone(),
        config.max_tokens,
        coder_system_prompt(&coder_registry),
    ));

    match config.coder_transport {
        TransportKind::Http => {
            let (transport, bridge_handle) = bridge();
            let router = server::router(CODER_AGENT, Arc::new(bridge_handle));
            let addr = format!("{}:{}", config.host, config.coder_port);
            tokio::spawn(async move {
                if let Err(e) = server::serve(addr, router).await {
                    error!("coder agent listener failed: {:#}", e);
                }
            });

            let mut agent = Agent::new(
                CODER_AGENT,
                coder_llm,
                coder_registry,
                config.workspace_path.clone(),
                Box::new(transport),
            );
            agent.run().await
        }
        TransportKind::Console => {
            let mut agent = Agent::new(
                CODER_AGENT,
                coder_llm,
                coder_registry,
                config.workspace_path.clone(),
                Box::new(ConsoleTransport::new()),
            );
            agent.run().await
        }
    }
}
