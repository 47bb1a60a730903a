//! SessionManager for managing many interview sessions
//!
//! Each session lives behind its own handle: a `RwLock` around the state
//! (the per-session single-writer scope) and a `Mutex` gate that lets only
//! one finalize run at a time. The outer map lock is held for lookup and
//! insert only, so operations on different sessions never contend.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::SessionConfig;
use super::state::{FinalizeStep, IngestAck, InterviewSession, Question, SessionView};
use crate::assessor::{MockAssessor, QualitativeAssessor};
use crate::attention::{AttentionSnapshot, AttentionSummary};
use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::profiles::QuestionBank;
use crate::report::{MemoryReportStore, Report, ReportFinalizer, ReportStore};
use crate::scoring::{ScoringEngine, ScoringRules};

/// Newly created session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedSession {
    pub session_id: String,
    pub questions: Vec<Question>,
}

/// Result of a finalize call
#[derive(Debug, Clone)]
pub struct FinalizeOutcome {
    pub report: Arc<Report>,
    /// True when the report was already stored and nothing was recomputed
    pub replayed: bool,
}

struct SessionHandle {
    state: RwLock<InterviewSession>,
    finalize_gate: Mutex<()>,
}

impl SessionHandle {
    fn new(session: InterviewSession) -> Self {
        Self {
            state: RwLock::new(session),
            finalize_gate: Mutex::new(()),
        }
    }
}

/// Manages interview sessions
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<SessionHandle>>>,
    config: SessionConfig,
    bank: QuestionBank,
    finalizer: Arc<ReportFinalizer>,
}

impl SessionManager {
    pub fn new(config: SessionConfig, bank: QuestionBank, finalizer: ReportFinalizer) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            bank,
            finalizer: Arc::new(finalizer),
        }
    }

    /// Manager with default rules, the built-in bank and an in-memory store
    pub fn with_assessor(assessor: Arc<dyn QualitativeAssessor>) -> Self {
        let config = SessionConfig::default();
        let engine = ScoringEngine::new(
            ScoringRules::default(),
            assessor,
            config.assessor_timeout(),
        );
        let store: Arc<dyn ReportStore> = Arc::new(MemoryReportStore::new());
        Self::new(
            config,
            QuestionBank::builtin(),
            ReportFinalizer::new(engine, store),
        )
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn store(&self) -> &Arc<dyn ReportStore> {
        self.finalizer.store()
    }

    async fn handle(&self, id: &str) -> Result<Arc<SessionHandle>, SessionError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Create a session from an explicit prompt list
    pub async fn start(&self, prompts: Vec<String>) -> Result<StartedSession, SessionError> {
        let id = Uuid::new_v4().simple().to_string();
        let session = InterviewSession::new(id.clone(), prompts, &self.config, Utc::now())?;
        let questions = session.questions().to_vec();

        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(SessionHandle::new(session)));

        info!(session_id = %id, questions = questions.len(), "Session started");
        Ok(StartedSession {
            session_id: id,
            questions,
        })
    }

    /// Create a session from a named profile (unknown names fall back to
    /// the default profile)
    pub async fn start_profile(
        &self,
        profile: Option<&str>,
    ) -> Result<StartedSession, SessionError> {
        self.start(self.bank.resolve(profile)).await
    }

    /// Move a session to its next question
    pub async fn advance(&self, id: &str) -> Result<Question, SessionError> {
        let handle = self.handle(id).await?;
        let mut session = handle.state.write().await;
        let question = session.advance(Utc::now())?.clone();

        info!(session_id = %id, cursor = question.index, "Session advanced");
        Ok(question)
    }

    /// Route an event to the session named in it
    pub async fn ingest(&self, event: SessionEvent) -> Result<IngestAck, SessionError> {
        let handle = self.handle(event.session_id()).await?;
        let mut session = handle.state.write().await;
        let ack = session.ingest(event)?;

        debug!(session_id = %session.id(), ?ack, "Event ingested");
        Ok(ack)
    }

    pub async fn transcript(&self, id: &str, index: usize) -> Result<String, SessionError> {
        let handle = self.handle(id).await?;
        let session = handle.state.read().await;
        session.transcript(index).map(str::to_string)
    }

    /// Latest attention reading; `None` before any event was recorded
    pub async fn attention_snapshot(
        &self,
        id: &str,
    ) -> Result<Option<AttentionSnapshot>, SessionError> {
        let handle = self.handle(id).await?;
        let session = handle.state.read().await;
        Ok(session.attention_snapshot())
    }

    pub async fn attention_summary(&self, id: &str) -> Result<AttentionSummary, SessionError> {
        let handle = self.handle(id).await?;
        let session = handle.state.read().await;
        Ok(session.attention_summary())
    }

    pub async fn view(&self, id: &str) -> Result<SessionView, SessionError> {
        let handle = self.handle(id).await?;
        let session = handle.state.read().await;
        Ok(session.view(Utc::now()))
    }

    /// Finalize a session exactly once
    ///
    /// Concurrent callers queue on the session's gate; whoever runs second
    /// gets the stored report back with `replayed` set. The scoring work runs
    /// on its own task so a caller dropping out cannot strand the session in
    /// `Finalizing`.
    pub async fn finalize(&self, id: &str) -> Result<FinalizeOutcome, SessionError> {
        let handle = self.handle(id).await?;
        let _gate = handle.finalize_gate.lock().await;

        let input = match handle.state.write().await.begin_finalize()? {
            FinalizeStep::Done(report) => {
                debug!(session_id = %id, "Finalize replayed stored report");
                return Ok(FinalizeOutcome {
                    report,
                    replayed: true,
                });
            }
            FinalizeStep::Run(input) => input,
        };

        info!(session_id = %id, "Finalizing session");

        let finalizer = self.finalizer.clone();
        let task_handle = handle.clone();
        let task = tokio::spawn(async move {
            let result = finalizer.finalize(input).await;
            let mut session = task_handle.state.write().await;
            match result {
                Ok(report) => {
                    let report = Arc::new(report);
                    session.complete_finalize(report.clone());
                    Ok(report)
                }
                Err(e) => {
                    session.abort_finalize();
                    Err(SessionError::Finalize(e))
                }
            }
        });

        match task.await {
            Ok(Ok(report)) => Ok(FinalizeOutcome {
                report,
                replayed: false,
            }),
            Ok(Err(e)) => {
                warn!(session_id = %id, "Finalize failed, session back to active: {}", e);
                Err(e)
            }
            Err(join_error) => {
                handle.state.write().await.abort_finalize();
                warn!(session_id = %id, "Finalize task aborted: {}", join_error);
                Err(SessionError::InvalidTransition {
                    action: "finalize".to_string(),
                    reason: format!("finalize task aborted: {join_error}"),
                })
            }
        }
    }

    /// Stored report for a session
    ///
    /// `Ok(None)` while the session exists but is not finalized. Sessions no
    /// longer in memory are looked up in the report store.
    pub async fn report(&self, id: &str) -> Result<Option<Arc<Report>>, SessionError> {
        if let Ok(handle) = self.handle(id).await {
            return Ok(handle.state.read().await.report().cloned());
        }

        match self.store().load(id).await? {
            Some(report) => Ok(Some(Arc::new(report))),
            None => Err(SessionError::NotFound(id.to_string())),
        }
    }

    /// Drop a session from the registry; false if it was not registered
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn list_sessions(&self) -> Vec<String> {
        self.sessions.read().await.keys().cloned().collect()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::with_assessor(Arc::new(MockAssessor::new()))
    }
}
