//! Model-backed interpretation with a rule-based fallback.
//!
//! The agent asks a tool-calling model to pick one of the named tools for
//! the user's message and executes the first returned call. Fallback to
//! the deterministic [`Pipeline`] is reserved for upstream failure:
//! transport errors, bad status, unparseable output, no tool call, or a
//! hallucinated tool name. A well-formed call that dispatch rejects is
//! surfaced to the caller instead — rerunning a correction message like
//! "change the specialty" through the rules would log it as a new
//! interaction.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::pipeline::Pipeline;
use crate::providers::{CompletionRequest, LlmProvider};
use crate::record::ChatResponse;
use crate::tools::{self, ToolError};

/// Errors the agent surfaces to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The model returned a registered tool call whose arguments were
    /// rejected by dispatch. Not retried through the rules.
    #[error("tool call rejected: {0}")]
    Rejected(#[source] ToolError),
}

/// Internal split of model-path failures: provider-level trouble falls
/// back to the rules, dispatch rejections do not.
enum ModelFailure {
    Recoverable(String),
    Rejected(ToolError),
}

/// Interprets user messages into [`ChatResponse`]s.
///
/// Holds the rule-based pipeline and, optionally, a model provider. With
/// no provider configured, every message goes straight through the rules.
pub struct Agent {
    pipeline: Pipeline,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("model_backed", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Agent {
    /// Create an agent over the pipeline, optionally model-backed.
    pub fn new(pipeline: Pipeline, provider: Option<Arc<dyn LlmProvider>>) -> Self {
        if let Some(ref p) = provider {
            info!(model = p.model_id(), "agent is model-backed");
        } else {
            info!("agent is rule-based only");
        }
        Self { pipeline, provider }
    }

    /// Interpret one message into a response.
    pub async fn interpret(&self, text: &str) -> Result<ChatResponse, AgentError> {
        self.interpret_at(text, Local::now()).await
    }

    /// [`interpret`](Self::interpret) with a pinned clock.
    pub async fn interpret_at(
        &self,
        text: &str,
        now: DateTime<Local>,
    ) -> Result<ChatResponse, AgentError> {
        if let Some(ref provider) = self.provider {
            match self.try_model(provider.as_ref(), text, now).await {
                Ok(response) => return Ok(response),
                Err(ModelFailure::Recoverable(reason)) => {
                    warn!(reason = %reason, "model path failed; falling back to rules");
                }
                Err(ModelFailure::Rejected(err)) => {
                    warn!(error = %err, "model tool call rejected");
                    return Err(AgentError::Rejected(err));
                }
            }
        }
        Ok(self.pipeline.handle_at(text, now).await)
    }

    async fn try_model(
        &self,
        provider: &dyn LlmProvider,
        text: &str,
        now: DateTime<Local>,
    ) -> Result<ChatResponse, ModelFailure> {
        let request = CompletionRequest {
            system: Some(system_prompt(now)),
            user: text.to_owned(),
            tools: tools::definitions(),
            max_tokens: None,
        };

        let response = provider
            .complete(request)
            .await
            .map_err(|e| ModelFailure::Recoverable(e.to_string()))?;

        let call = response
            .tool_calls
            .into_iter()
            .next()
            .ok_or_else(|| ModelFailure::Recoverable("model returned no tool call".to_owned()))?;
        debug!(tool = %call.name, "model selected tool");

        tools::dispatch(self.pipeline.store(), &call.name, &call.arguments, now)
            .await
            .map_err(|err| match err {
                // A hallucinated tool name is upstream failure, same as
                // no tool call at all.
                ToolError::UnknownTool(_) => ModelFailure::Recoverable(err.to_string()),
                other => ModelFailure::Rejected(other),
            })
    }
}

/// System prompt sent with every model call.
///
/// The date/time instruction is load-bearing: the model must pass empty
/// strings for "now"/"today" so the reconciliation policy can fill in the
/// authoritative server clock instead of a hallucinated value.
fn system_prompt(now: DateTime<Local>) -> String {
    format!(
        "SYSTEM CONTEXT:\n\
         - Current Server Time: {}\n\
         - Role: CRM Data Entry Assistant.\n\
         - API MODE: RETURN JSON ONLY.\n\
         \n\
         CRITICAL INSTRUCTION FOR TIME:\n\
         - If the user implies \"now\" or \"today\", PASS EMPTY STRINGS \"\" for \
         date/time arguments. The tool will auto-fill the exact server timestamp.\n\
         - Only fill date/time if the user explicitly sets a PAST or FUTURE time \
         (e.g. \"yesterday at 2pm\").",
        now.format("%Y-%m-%d %H:%M")
    )
}
