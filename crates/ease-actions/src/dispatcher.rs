//! Action dispatch.
//!
//! Each call is validated against its schema and handed to the handler
//! registered with that schema. Whatever happens inside a handler, the
//! dispatcher produces exactly one [`ActionResult`] per call: handler errors
//! and panics are caught here and reported as `execution failed for <name>`.
//! Calls in a batch run strictly one after another, in extraction order.

use crate::context::ExecutionContext;
use crate::error::HandlerError;
use crate::registry::ActionRegistry;
use crate::validator::{ValidatedArguments, validate_call};
use async_trait::async_trait;
use ease_core::{ActionCall, ActionResult, FailureKind};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Performs one action's side effect.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Run the action with validated arguments.
    ///
    /// Return `Ok` with a failed result for expected, user-facing rejections
    /// (e.g. a blank title); return `Err` when the action could not run.
    async fn execute(
        &self,
        args: &ValidatedArguments,
        ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError>;
}

/// Validates calls and runs their handlers.
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    registry: Arc<ActionRegistry>,
}

impl ActionDispatcher {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Dispatch one call. Never fails; problems become failed results.
    pub async fn dispatch(&self, call: &ActionCall, ctx: &ExecutionContext) -> ActionResult {
        let (entry, args) = match validate_call(&self.registry, call) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::debug!(
                    action = %call.name,
                    kind = ?e.kind,
                    "Action call rejected: {}",
                    e
                );
                return e.into_result();
            }
        };

        let outcome = AssertUnwindSafe(entry.handler.execute(&args, ctx))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(result)) => {
                tracing::debug!(
                    action = %call.name,
                    success = result.success,
                    "Action executed"
                );
                result
            }
            Ok(Err(err)) => {
                tracing::warn!(action = %call.name, error = %err, "Action handler failed");
                execution_failed(&call.name)
            }
            Err(panic) => {
                tracing::warn!(
                    action = %call.name,
                    panic = %panic_message(panic.as_ref()),
                    "Action handler panicked"
                );
                execution_failed(&call.name)
            }
        }
    }

    /// Dispatch calls sequentially, awaiting each before starting the next.
    pub async fn dispatch_all<I>(&self, calls: I, ctx: &ExecutionContext) -> Vec<ActionResult>
    where
        I: IntoIterator<Item = ActionCall>,
    {
        let mut results = Vec::new();
        for call in calls {
            results.push(self.dispatch(&call, ctx).await);
        }

        let failed = results.iter().filter(|r| !r.success).count();
        if !results.is_empty() {
            tracing::info!(calls = results.len(), failed, "Action batch dispatched");
        }
        results
    }
}

fn execution_failed(action: &str) -> ActionResult {
    ActionResult::failed(
        FailureKind::HandlerFailed,
        format!("execution failed for {}", action),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{PersistenceHooks, RecordingNavigator};
    use ease_core::{ActionSchema, ParameterSpec, UserIdentity};
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ctx() -> ExecutionContext {
        let (hooks, _) = PersistenceHooks::in_memory();
        ExecutionContext::new(
            Arc::new(RecordingNavigator::new()),
            UserIdentity::new("u1"),
            hooks,
        )
    }

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ActionHandler for Arc<Counting> {
        async fn execute(
            &self,
            args: &ValidatedArguments,
            _ctx: &ExecutionContext,
        ) -> Result<ActionResult, HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ActionResult::ok(format!("echo {}", args.str("text").unwrap_or(""))))
        }
    }

    struct Failing;

    #[async_trait]
    impl ActionHandler for Failing {
        async fn execute(
            &self,
            _args: &ValidatedArguments,
            _ctx: &ExecutionContext,
        ) -> Result<ActionResult, HandlerError> {
            Err(HandlerError::Internal(anyhow::anyhow!("disk on fire")))
        }
    }

    struct Panicking;

    #[async_trait]
    impl ActionHandler for Panicking {
        async fn execute(
            &self,
            _args: &ValidatedArguments,
            _ctx: &ExecutionContext,
        ) -> Result<ActionResult, HandlerError> {
            panic!("handler bug");
        }
    }

    struct Logging(Arc<Mutex<Vec<&'static str>>>, &'static str);

    #[async_trait]
    impl ActionHandler for Logging {
        async fn execute(
            &self,
            _args: &ValidatedArguments,
            _ctx: &ExecutionContext,
        ) -> Result<ActionResult, HandlerError> {
            self.0.lock().unwrap().push(self.1);
            Ok(ActionResult::ok(self.1))
        }
    }

    fn dispatcher(counting: Arc<Counting>) -> ActionDispatcher {
        let registry = ActionRegistry::builder()
            .register(
                ActionSchema::new("echo", "Echo text")
                    .param(ParameterSpec::string("text").required()),
                counting,
            )
            .unwrap()
            .register(ActionSchema::new("explode", "Always fails"), Failing)
            .unwrap()
            .register(ActionSchema::new("panic", "Always panics"), Panicking)
            .unwrap()
            .build();
        ActionDispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let counting = Arc::new(Counting::default());
        let dispatcher = dispatcher(counting.clone());

        let result = dispatcher
            .dispatch(&ActionCall::from_value("echo", json!({"text": "hi"})), &ctx())
            .await;
        assert!(result.success);
        assert_eq!(result.message, "echo hi");
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_action_invokes_nothing() {
        let counting = Arc::new(Counting::default());
        let dispatcher = dispatcher(counting.clone());

        let result = dispatcher
            .dispatch(&ActionCall::from_value("delete_universe", json!({})), &ctx())
            .await;
        assert!(!result.success);
        assert_eq!(result.failure, Some(FailureKind::UnknownAction));
        assert!(result.message.contains("delete_universe"));
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_arguments_skip_handler() {
        let counting = Arc::new(Counting::default());
        let dispatcher = dispatcher(counting.clone());

        let result = dispatcher
            .dispatch(&ActionCall::from_value("echo", json!({"text": 5})), &ctx())
            .await;
        assert_eq!(result.failure, Some(FailureKind::TypeMismatch));
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_becomes_failed_result() {
        let dispatcher = dispatcher(Arc::new(Counting::default()));
        let result = dispatcher
            .dispatch(&ActionCall::from_value("explode", json!({})), &ctx())
            .await;
        assert!(!result.success);
        assert_eq!(result.message, "execution failed for explode");
        assert_eq!(result.failure, Some(FailureKind::HandlerFailed));
    }

    #[tokio::test]
    async fn test_handler_panic_is_contained() {
        let dispatcher = dispatcher(Arc::new(Counting::default()));
        let result = dispatcher
            .dispatch(&ActionCall::from_value("panic", json!({})), &ctx())
            .await;
        assert!(!result.success);
        assert_eq!(result.message, "execution failed for panic");
    }

    #[tokio::test]
    async fn test_batch_continues_after_failures() {
        let counting = Arc::new(Counting::default());
        let dispatcher = dispatcher(counting.clone());

        let calls = vec![
            ActionCall::from_value("panic", json!({})),
            ActionCall::from_value("explode", json!({})),
            ActionCall::from_value("echo", json!({"text": "still here"})),
        ];
        let results = dispatcher.dispatch_all(calls, &ctx()).await;

        assert_eq!(results.len(), 3);
        assert!(!results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[2].message, "echo still here");
        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_batch_runs_in_call_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = ActionRegistry::builder()
            .register(ActionSchema::new("a", "A"), Logging(log.clone(), "a"))
            .unwrap()
            .register(ActionSchema::new("b", "B"), Logging(log.clone(), "b"))
            .unwrap()
            .build();
        let dispatcher = ActionDispatcher::new(Arc::new(registry));

        let calls = ["b", "a", "b"]
            .into_iter()
            .map(|name| ActionCall::from_value(name, json!({})));
        let results = dispatcher.dispatch_all(calls, &ctx()).await;

        assert_eq!(*log.lock().unwrap(), vec!["b", "a", "b"]);
        let messages: Vec<&str> = results.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(panic_message(&"static"), "static");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&42_u8), "non-string panic payload");
    }
}
