//! Shared test utilities for interview-server integration tests

pub mod client;

use std::net::SocketAddr;
use std::sync::Arc;

use interview_server::{AppState, InterviewServer, ServerConfig};
use tokio::net::TcpListener;

/// A started session plus the credential issued for it
#[allow(dead_code)]
pub struct TestSession {
    pub id: String,
    pub token: String,
}

/// Creates a test server with default state, returns state and address
#[allow(dead_code)]
pub async fn create_test_server() -> (Arc<AppState>, SocketAddr) {
    let state = Arc::new(AppState::new());
    let server = InterviewServer::with_state(ServerConfig::new("127.0.0.1", 0), Arc::clone(&state));
    let addr = spawn_server(server).await;

    (state, addr)
}

/// Start a two-question session directly on the manager
#[allow(dead_code)]
pub async fn start_session(state: &AppState) -> TestSession {
    let started = state
        .session_manager
        .start(vec![
            "Tell me about yourself.".to_string(),
            "Describe a challenging project you worked on.".to_string(),
        ])
        .await
        .unwrap();
    let credential = state.issuer.issue(&started.session_id).unwrap();

    TestSession {
        id: started.session_id,
        token: credential.access_token,
    }
}

/// Spawns server in background task, returns bound address
async fn spawn_server(server: InterviewServer) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = server.run_with_listener(listener).await;
    });

    // Brief delay to ensure server is accepting connections
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    addr
}
