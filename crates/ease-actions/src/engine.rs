//! End-to-end processing of one model reply.
//!
//! ```text
//! reply ──extract──▶ calls ──dispatch (sequential)──▶ results
//!   │                                                   │
//!   └──clean──▶ prose ─────────── render ◀──────────────┘
//!                                   │
//!                                   ▼
//!                              display text
//! ```

use crate::context::ExecutionContext;
use crate::dispatcher::ActionDispatcher;
use crate::error::ExtractorError;
use crate::extractor::{CallExtractor, MarkerExtractor};
use crate::registry::ActionRegistry;
use crate::summary::render_display_text;
use ease_core::{ActionCall, ActionResult, EaseConfig, SummaryConfig};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of processing one reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedReply {
    /// Prose followed by one status line per action.
    pub display_text: String,
    /// The reply with every call site removed.
    pub prose: String,
    /// One result per well-formed call site, in text order.
    pub results: Vec<ActionResult>,
}

/// Turns model replies into display text and executed actions.
pub struct ActionEngine {
    extractor: Box<dyn CallExtractor>,
    dispatcher: ActionDispatcher,
    summary: SummaryConfig,
}

impl ActionEngine {
    /// Engine with the default `[FUNCTION:` syntax and summary prefixes.
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self {
            extractor: Box::new(MarkerExtractor::default()),
            dispatcher: ActionDispatcher::new(registry),
            summary: SummaryConfig::default(),
        }
    }

    /// Engine with the marker tag and prefixes taken from configuration.
    ///
    /// Fails when the configured tag cannot form an unambiguous header.
    pub fn from_config(
        config: &EaseConfig,
        registry: Arc<ActionRegistry>,
    ) -> Result<Self, ExtractorError> {
        Ok(Self {
            extractor: Box::new(MarkerExtractor::from_config(&config.extractor)?),
            dispatcher: ActionDispatcher::new(registry),
            summary: config.summary.clone(),
        })
    }

    /// Replace the call-site extractor.
    pub fn with_extractor(mut self, extractor: impl CallExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_summary(mut self, summary: SummaryConfig) -> Self {
        self.summary = summary;
        self
    }

    pub fn registry(&self) -> &ActionRegistry {
        self.dispatcher.registry()
    }

    /// Process one reply. Never fails: every problem becomes a failed result
    /// or a silently dropped malformed site.
    pub async fn process(&self, reply: &str, ctx: &ExecutionContext) -> ProcessedReply {
        let calls: Vec<ActionCall> = self.extractor.extract(reply).collect();
        let results = self.dispatcher.dispatch_all(calls, ctx).await;

        let prose = self.extractor.clean(reply).trim().to_string();
        let display_text = render_display_text(&prose, &results, &self.summary);

        ProcessedReply {
            display_text,
            prose,
            results,
        }
    }

    /// Capability block for the upstream system prompt: the action list and
    /// the call syntax.
    pub fn prompt_capabilities(&self) -> String {
        format!(
            "Available actions:\n{}\n\nTo perform an action, include {} in your reply.",
            self.registry().describe_for_prompt(),
            self.extractor.call_syntax()
        )
    }
}
