//! # ease-actions
//!
//! Action-call engine for the Ease companion app.
//!
//! The chat model can ask the app to do things by embedding call sites in
//! its reply. This crate finds those call sites, checks them against a
//! catalog of typed action schemas, runs each one and appends a status line
//! per action to the cleaned reply:
//!
//! - **Extraction**: `[FUNCTION:<name>:<json-object>]` sites, parsed with a
//!   real JSON parser; malformed sites are dropped and never break a reply
//! - **Validation**: required, type and enum checks before any side effect
//! - **Dispatch**: strictly sequential, with handler errors and panics
//!   contained per call
//! - **Summary**: `✅`/`❌` lines under the prose
//!
//! ## Architecture
//!
//! ```text
//! Model reply
//!       │
//!       ▼
//! ┌──────────────────────┐
//! │   ActionEngine       │
//! │  1. Extract calls    │  ← MarkerExtractor
//! │  2. Validate         │  ← ActionRegistry schemas
//! │  3. Dispatch         │  ← handlers + ExecutionContext
//! │  4. Clean prose      │
//! │  5. Render summary   │
//! └──────────┬───────────┘
//!            │
//!            ▼
//!   ProcessedReply { display_text, prose, results }
//! ```
//!
//! ## Example Usage
//!
//! ```ignore
//! use ease_actions::{ActionEngine, ExecutionContext, PersistenceHooks, standard_registry};
//! use ease_core::{CatalogConfig, UserIdentity};
//!
//! let registry = Arc::new(standard_registry(&CatalogConfig::default())?);
//! let engine = ActionEngine::new(registry);
//!
//! let (hooks, _stores) = PersistenceHooks::in_memory();
//! let ctx = ExecutionContext::new(navigator, UserIdentity::new("user-1"), hooks);
//!
//! let reply = engine
//!     .process(r#"Sure! [FUNCTION:navigate_to_section:{"section":"mood"}]"#, &ctx)
//!     .await;
//! println!("{}", reply.display_text);
//! ```

pub mod catalog;
pub mod context;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod hooks;
pub mod registry;
pub mod summary;
pub mod tool_definition;
pub mod validator;

// Re-export main types
pub use catalog::{standard_builder, standard_registry};
pub use context::{ExecutionContext, InMemoryStores, Navigator, PersistenceHooks, RecordingNavigator};
pub use dispatcher::{ActionDispatcher, ActionHandler};
pub use engine::{ActionEngine, ProcessedReply};
pub use error::{ExtractorError, HandlerError, HookError, RegistryError};
pub use extractor::{CallExtractor, CallSite, MarkerExtractor};
pub use hooks::{JsonLinesHook, MemoryHook, PersistenceHook};
pub use registry::{ActionRegistry, ActionRegistryBuilder, RegisteredAction};
pub use summary::{render_display_text, summary_lines};
pub use tool_definition::ToolDefinition;
pub use validator::{ValidatedArguments, ValidationError, validate_arguments, validate_call};
