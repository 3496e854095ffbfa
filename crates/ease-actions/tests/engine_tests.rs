//! Integration tests for the action engine.
//!
//! Run with: cargo test --package ease-actions --test engine_tests

use async_trait::async_trait;
use ease_actions::{
    ActionEngine, ActionHandler, ExecutionContext, HandlerError, InMemoryStores, JsonLinesHook,
    PersistenceHooks, RecordingNavigator, ValidatedArguments, standard_builder, standard_registry,
};
use ease_core::{
    ActionResult, ActionSchema, CatalogConfig, FailureKind, MoodEntry, TodoItem, UserIdentity,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Fixture {
    engine: ActionEngine,
    ctx: ExecutionContext,
    stores: InMemoryStores,
    navigator: Arc<RecordingNavigator>,
}

fn fixture() -> Fixture {
    let registry = standard_registry(&CatalogConfig::default()).unwrap();
    let (hooks, stores) = PersistenceHooks::in_memory();
    let navigator = Arc::new(RecordingNavigator::new());
    let ctx = ExecutionContext::new(navigator.clone(), UserIdentity::new("user-42"), hooks);

    Fixture {
        engine: ActionEngine::new(Arc::new(registry)),
        ctx,
        stores,
        navigator,
    }
}

#[tokio::test]
async fn test_navigate_end_to_end() {
    let f = fixture();
    let reply = r#"Sure! [FUNCTION:navigate_to_section:{"section":"mood"}] Let's check in."#;

    let out = f.engine.process(reply, &f.ctx).await;

    assert_eq!(
        out.display_text,
        "Sure!  Let's check in.\n\n✅ Navigated to mood section"
    );
    assert_eq!(f.navigator.visited(), vec!["mood"]);
    assert_eq!(out.results.len(), 1);
}

#[tokio::test]
async fn test_extracted_call_is_persisted() {
    let f = fixture();
    let out = f
        .engine
        .process(r#"On it. [FUNCTION:add_todo:{"title":"Walk"}]"#, &f.ctx)
        .await;

    assert_eq!(out.prose, "On it.");
    assert_eq!(out.display_text, "On it.\n\n✅ Added to-do: Walk");

    let todos: Vec<TodoItem> = f.stores.todos.records();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Walk");
    assert_eq!(todos[0].user_id, "user-42");
}

#[tokio::test]
async fn test_unknown_action_reports_failure() {
    let f = fixture();
    let out = f
        .engine
        .process("Bye. [FUNCTION:delete_universe:{}]", &f.ctx)
        .await;

    assert_eq!(out.results.len(), 1);
    assert_eq!(out.results[0].failure, Some(FailureKind::UnknownAction));
    assert_eq!(
        out.display_text,
        "Bye.\n\n❌ Unknown action: delete_universe"
    );
}

#[tokio::test]
async fn test_missing_required_parameter() {
    let f = fixture();
    let out = f
        .engine
        .process(
            r#"[FUNCTION:book_therapist_appointment:{"preferredTime":"morning"}]"#,
            &f.ctx,
        )
        .await;

    let result = &out.results[0];
    assert!(!result.success);
    assert_eq!(result.failure, Some(FailureKind::MissingParameter));
    assert!(result.message.contains("preferredDate"));
    assert!(f.stores.appointments.is_empty());
}

#[tokio::test]
async fn test_invalid_enum_value() {
    let f = fixture();
    let out = f
        .engine
        .process(r#"[FUNCTION:log_mood:{"mood":"ecstatic"}]"#, &f.ctx)
        .await;

    assert_eq!(out.results[0].failure, Some(FailureKind::InvalidEnumValue));
    assert!(out.results[0].message.contains("great, good, okay, low, bad"));
    assert!(f.stores.moods.is_empty());
}

#[tokio::test]
async fn test_malformed_site_is_tolerated() {
    let f = fixture();
    let out = f
        .engine
        .process("Okay [FUNCTION:add_todo:{not valid json}] done.", &f.ctx)
        .await;

    assert!(out.results.is_empty());
    assert_eq!(out.display_text, "Okay  done.");
    assert!(f.stores.todos.is_empty());
}

#[tokio::test]
async fn test_batch_isolation() {
    let f = fixture();
    let reply = concat!(
        "Let me help. ",
        r#"[FUNCTION:add_todo:{"title":"Walk"}]"#,
        r#"[FUNCTION:log_mood:{"mood":"good","intensity":42}]"#,
        r#"[FUNCTION:delete_universe:{}]"#,
        r#"[FUNCTION:add_habit:{"name":"Stretch"}]"#,
    );

    let out = f.engine.process(reply, &f.ctx).await;

    let outcomes: Vec<bool> = out.results.iter().map(|r| r.success).collect();
    assert_eq!(outcomes, vec![true, false, false, true]);
    assert_eq!(
        out.display_text,
        "Let me help.\n\n\
         ✅ Added to-do: Walk\n\
         ❌ Mood intensity must be between 1 and 10, got 42\n\
         ❌ Unknown action: delete_universe\n\
         ✅ Started tracking habit: Stretch"
    );
    assert_eq!(f.stores.todos.len(), 1);
    assert_eq!(f.stores.habits.len(), 1);
    assert!(f.stores.moods.is_empty());
}

/// Handler that appends start and end markers around an optional sleep.
struct Traced {
    label: &'static str,
    delay: Duration,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ActionHandler for Traced {
    async fn execute(
        &self,
        _args: &ValidatedArguments,
        _ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError> {
        self.log.lock().unwrap().push(format!("{} start", self.label));
        tokio::time::sleep(self.delay).await;
        self.log.lock().unwrap().push(format!("{} end", self.label));
        Ok(ActionResult::ok(self.label))
    }
}

#[tokio::test]
async fn test_slow_handler_finishes_before_next_starts() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = standard_builder(&CatalogConfig::default())
        .unwrap()
        .register(
            ActionSchema::new("slow", "Takes a while"),
            Traced {
                label: "slow",
                delay: Duration::from_millis(50),
                log: log.clone(),
            },
        )
        .unwrap()
        .register(
            ActionSchema::new("fast", "Returns at once"),
            Traced {
                label: "fast",
                delay: Duration::ZERO,
                log: log.clone(),
            },
        )
        .unwrap()
        .build();

    let engine = ActionEngine::new(Arc::new(registry));
    let f = fixture();
    let out = engine
        .process("[FUNCTION:slow:{}] [FUNCTION:fast:{}]", &f.ctx)
        .await;

    assert_eq!(
        *log.lock().unwrap(),
        vec!["slow start", "slow end", "fast start", "fast end"]
    );
    let messages: Vec<&str> = out.results.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["slow", "fast"]);
}

#[tokio::test]
async fn test_json_lines_hooks_write_records() {
    let dir = tempfile::tempdir().unwrap();
    let todos = Arc::new(JsonLinesHook::new(dir.path().join("todos.jsonl")));
    let moods = Arc::new(JsonLinesHook::new(dir.path().join("moods.jsonl")));

    let (mut hooks, _) = PersistenceHooks::in_memory();
    hooks.todos = todos;
    hooks.moods = moods;

    let ctx = ExecutionContext::new(
        Arc::new(RecordingNavigator::new()),
        UserIdentity::new("user-7"),
        hooks,
    );
    let registry = standard_registry(&CatalogConfig::default()).unwrap();
    let engine = ActionEngine::new(Arc::new(registry));

    let reply = concat!(
        r#"[FUNCTION:add_todo:{"title":"Walk","tags":["outside"]}]"#,
        r#"[FUNCTION:add_todo:{"title":"Read"}]"#,
        r#"[FUNCTION:log_mood:{"mood":"great","note":"sunny"}]"#,
    );
    let out = engine.process(reply, &ctx).await;
    assert!(out.results.iter().all(|r| r.success));

    let contents = std::fs::read_to_string(dir.path().join("todos.jsonl")).unwrap();
    let stored: Vec<TodoItem> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].title, "Walk");
    assert_eq!(stored[0].tags, vec!["outside"]);
    assert_eq!(stored[1].title, "Read");

    let contents = std::fs::read_to_string(dir.path().join("moods.jsonl")).unwrap();
    let entry: MoodEntry = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(entry.note.as_deref(), Some("sunny"));
    assert_eq!(entry.user_id, "user-7");
}
