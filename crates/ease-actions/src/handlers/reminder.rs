use super::{enum_or_default, non_blank, record_data, rejected};
use crate::context::ExecutionContext;
use crate::dispatcher::ActionHandler;
use crate::error::HandlerError;
use crate::validator::ValidatedArguments;
use async_trait::async_trait;
use chrono::Utc;
use ease_core::{ActionResult, ActionSchema, ParameterSpec, Reminder, Repeat};
use uuid::Uuid;

/// `set_reminder`: schedule a reminder.
pub struct SetReminderHandler;

impl SetReminderHandler {
    pub const NAME: &'static str = "set_reminder";

    pub fn schema() -> ActionSchema {
        ActionSchema::new(Self::NAME, "Schedule a reminder for the user")
            .param(ParameterSpec::string("title").required().describe("What to remind about"))
            .param(
                ParameterSpec::string("time")
                    .required()
                    .describe("When to remind, e.g. 08:00 or 2024-06-01T08:00"),
            )
            .param(
                ParameterSpec::enumeration("repeat", Repeat::VALUES.iter().copied())
                    .describe("Defaults to once"),
            )
    }
}

#[async_trait]
impl ActionHandler for SetReminderHandler {
    async fn execute(
        &self,
        args: &ValidatedArguments,
        ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError> {
        let Some(title) = non_blank(args, "title")? else {
            return Ok(rejected("Reminder title cannot be empty"));
        };
        let Some(time) = non_blank(args, "time")? else {
            return Ok(rejected("Reminder time cannot be empty"));
        };

        let reminder = Reminder {
            id: Uuid::new_v4(),
            user_id: ctx.user.id.clone(),
            title: title.to_string(),
            time: time.to_string(),
            repeat: enum_or_default(args, "repeat", Repeat::parse)?,
            enabled: true,
            created_at: Utc::now(),
        };

        let data = record_data(&reminder)?;
        ctx.hooks.reminders.persist(reminder).await?;

        Ok(ActionResult::ok(format!("Reminder set: {} at {}", title, time)).with_data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{args, harness};
    use serde_json::json;

    #[tokio::test]
    async fn test_sets_reminder() {
        let h = harness();
        let input = json!({"title": "Drink water", "time": "15:00", "repeat": "daily"});
        let result = SetReminderHandler
            .execute(&args(&SetReminderHandler::schema(), input), &h.ctx)
            .await
            .unwrap();

        assert_eq!(result.message, "Reminder set: Drink water at 15:00");
        let reminder = &h.stores.reminders.records()[0];
        assert_eq!(reminder.repeat, Repeat::Daily);
        assert!(reminder.enabled);
    }

    #[tokio::test]
    async fn test_repeat_defaults_to_once() {
        let h = harness();
        let input = json!({"title": "Stretch", "time": "09:30"});
        SetReminderHandler
            .execute(&args(&SetReminderHandler::schema(), input), &h.ctx)
            .await
            .unwrap();
        assert_eq!(h.stores.reminders.records()[0].repeat, Repeat::Once);
    }

    #[tokio::test]
    async fn test_blank_time_is_rejected() {
        let h = harness();
        let input = json!({"title": "Stretch", "time": " "});
        let result = SetReminderHandler
            .execute(&args(&SetReminderHandler::schema(), input), &h.ctx)
            .await
            .unwrap();
        assert!(!result.success);
        assert!(h.stores.reminders.is_empty());
    }
}
