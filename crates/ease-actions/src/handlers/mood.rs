use super::{optional_text, record_data, rejected};
use crate::context::ExecutionContext;
use crate::dispatcher::ActionHandler;
use crate::error::HandlerError;
use crate::validator::ValidatedArguments;
use async_trait::async_trait;
use chrono::Utc;
use ease_core::{ActionResult, ActionSchema, Mood, MoodEntry, ParameterSpec};
use uuid::Uuid;

const MIN_INTENSITY: f64 = 1.0;
const MAX_INTENSITY: f64 = 10.0;

/// `log_mood`: record a mood check-in.
pub struct LogMoodHandler;

impl LogMoodHandler {
    pub const NAME: &'static str = "log_mood";

    pub fn schema() -> ActionSchema {
        ActionSchema::new(Self::NAME, "Record how the user is feeling right now")
            .param(
                ParameterSpec::enumeration("mood", Mood::VALUES.iter().copied())
                    .required()
                    .describe("Overall mood"),
            )
            .param(ParameterSpec::number("intensity").describe("Strength from 1 to 10"))
            .param(ParameterSpec::string("note").describe("What is behind the mood"))
    }
}

#[async_trait]
impl ActionHandler for LogMoodHandler {
    async fn execute(
        &self,
        args: &ValidatedArguments,
        ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError> {
        let raw = args.require_str("mood")?;
        let mood = Mood::parse(raw).ok_or_else(|| HandlerError::InvalidArgument {
            parameter: "mood".to_string(),
            reason: format!("unsupported value {:?}", raw),
        })?;

        let intensity = match args.number("intensity") {
            None => None,
            Some(n) if (MIN_INTENSITY..=MAX_INTENSITY).contains(&n) => Some(n.round() as u8),
            Some(n) => {
                return Ok(rejected(format!(
                    "Mood intensity must be between 1 and 10, got {}",
                    n
                )));
            }
        };

        let entry = MoodEntry {
            id: Uuid::new_v4(),
            user_id: ctx.user.id.clone(),
            mood,
            intensity,
            note: optional_text(args, "note"),
            created_at: Utc::now(),
        };

        let data = record_data(&entry)?;
        ctx.hooks.moods.persist(entry).await?;

        Ok(ActionResult::ok(format!("Logged mood: {}", mood)).with_data(data))
    }
}
