use super::{enum_or_default, non_blank, optional_text, record_data, rejected};
use crate::context::ExecutionContext;
use crate::dispatcher::ActionHandler;
use crate::error::HandlerError;
use crate::validator::ValidatedArguments;
use async_trait::async_trait;
use chrono::Utc;
use ease_core::{ActionResult, ActionSchema, ParameterSpec, Priority, TodoItem};
use uuid::Uuid;

/// `add_todo`: add an item to the user's to-do list.
pub struct AddTodoHandler;

impl AddTodoHandler {
    pub const NAME: &'static str = "add_todo";

    pub fn schema() -> ActionSchema {
        ActionSchema::new(Self::NAME, "Add an item to the user's to-do list")
            .param(
                ParameterSpec::string("title")
                    .required()
                    .describe("Short title of the task"),
            )
            .param(ParameterSpec::string("description").describe("Optional details"))
            .param(
                ParameterSpec::enumeration("priority", Priority::VALUES.iter().copied())
                    .describe("Defaults to medium"),
            )
            .param(ParameterSpec::string("dueDate").describe("Due date, e.g. 2024-06-01"))
            .param(ParameterSpec::array("tags").describe("Labels for grouping"))
    }
}

#[async_trait]
impl ActionHandler for AddTodoHandler {
    async fn execute(
        &self,
        args: &ValidatedArguments,
        ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError> {
        let Some(title) = non_blank(args, "title")? else {
            return Ok(rejected("To-do title cannot be empty"));
        };

        let todo = TodoItem {
            id: Uuid::new_v4(),
            user_id: ctx.user.id.clone(),
            title: title.to_string(),
            description: optional_text(args, "description"),
            priority: enum_or_default(args, "priority", Priority::parse)?,
            due_date: optional_text(args, "dueDate"),
            tags: args.strings("tags"),
            completed: false,
            created_at: Utc::now(),
        };

        let data = record_data(&todo)?;
        ctx.hooks.todos.persist(todo).await?;

        Ok(ActionResult::ok(format!("Added to-do: {}", title)).with_data(data))
    }
}
