//! Interview serve command
//!
//! Builds the session manager from the merged configuration and runs the
//! HTTP and WebSocket server in the foreground.

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use interview_core::{
    CredentialIssuer, QuestionBank, ReportFinalizer, ScoringEngine, SessionManager, assessor,
};
use interview_server::{AppState, InterviewServer, ServerConfig};
use tracing::{info, warn};

use crate::config::{ConfigLoader, InterviewConfig};

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides config)
    #[arg(long)]
    pub host: Option<String>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = ConfigLoader::load()?;
    apply_args(&mut config, &args);

    let state = build_state(&config)?;
    let server_config = ServerConfig::new(config.server.host.clone(), config.server.port)
        .with_allowed_origins(config.server.allowed_origins.clone());

    info!(
        "Starting interview server on {}:{}",
        server_config.host, server_config.port
    );

    InterviewServer::with_state(server_config, Arc::new(state))
        .run()
        .await
        .map_err(Into::into)
}

/// CLI flags are the last configuration layer
fn apply_args(config: &mut InterviewConfig, args: &ServeArgs) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}

/// Wire core components from configuration
pub fn build_state(config: &InterviewConfig) -> Result<AppState> {
    if !config.auth.is_valid() {
        bail!("auth.secret must not be empty and auth.ttl_minutes must be positive");
    }
    if config.auth.uses_dev_secret() {
        warn!("Using the development JWT secret; set INTERVIEW_JWT_SECRET in production");
    }

    let engine = ScoringEngine::new(
        config.scoring.clone(),
        assessor::from_config(&config.assessor),
        config.session.assessor_timeout(),
    );
    let finalizer = ReportFinalizer::new(engine, config.storage.build_store());
    let bank = QuestionBank::builtin().with_profiles(config.profiles.clone());

    let manager = SessionManager::new(config.session.clone(), bank, finalizer);
    let issuer = CredentialIssuer::new(config.auth.clone());

    Ok(AppState::with_components(
        Arc::new(manager),
        Arc::new(issuer),
    ))
}
