use super::{enum_or_default, non_blank, record_data, rejected};
use crate::context::ExecutionContext;
use crate::dispatcher::ActionHandler;
use crate::error::HandlerError;
use crate::validator::ValidatedArguments;
use async_trait::async_trait;
use chrono::Utc;
use ease_core::{ActionResult, ActionSchema, Habit, HabitFrequency, ParameterSpec};
use uuid::Uuid;

/// `add_habit`: start tracking a habit.
pub struct AddHabitHandler;

impl AddHabitHandler {
    pub const NAME: &'static str = "add_habit";

    pub fn schema() -> ActionSchema {
        ActionSchema::new(Self::NAME, "Start tracking a new habit")
            .param(ParameterSpec::string("name").required().describe("Habit to build"))
            .param(
                ParameterSpec::enumeration("frequency", HabitFrequency::VALUES.iter().copied())
                    .describe("Defaults to daily"),
            )
            .param(ParameterSpec::boolean("reminder").describe("Also remind the user"))
    }
}

#[async_trait]
impl ActionHandler for AddHabitHandler {
    async fn execute(
        &self,
        args: &ValidatedArguments,
        ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError> {
        let Some(name) = non_blank(args, "name")? else {
            return Ok(rejected("Habit name cannot be empty"));
        };

        let habit = Habit {
            id: Uuid::new_v4(),
            user_id: ctx.user.id.clone(),
            name: name.to_string(),
            frequency: enum_or_default(args, "frequency", HabitFrequency::parse)?,
            reminder: args.bool("reminder").unwrap_or(false),
            streak: 0,
            created_at: Utc::now(),
        };

        let data = record_data(&habit)?;
        ctx.hooks.habits.persist(habit).await?;

        Ok(ActionResult::ok(format!("Started tracking habit: {}", name)).with_data(data))
    }
}
