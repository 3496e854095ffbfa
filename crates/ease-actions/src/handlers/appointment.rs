use super::{enum_or_default, non_blank, optional_text, record_data, rejected};
use crate::context::ExecutionContext;
use crate::dispatcher::ActionHandler;
use crate::error::HandlerError;
use crate::validator::ValidatedArguments;
use async_trait::async_trait;
use chrono::Utc;
use ease_core::{
    ActionResult, ActionSchema, AppointmentRequest, AppointmentStatus, ParameterSpec, SessionType,
};
use uuid::Uuid;

/// `book_therapist_appointment`: submit a session request for review.
///
/// The request is stored as `pending`; confirming it is up to whoever reads
/// the appointment store.
pub struct BookAppointmentHandler;

impl BookAppointmentHandler {
    pub const NAME: &'static str = "book_therapist_appointment";

    pub fn schema() -> ActionSchema {
        ActionSchema::new(Self::NAME, "Request a session with a therapist")
            .param(
                ParameterSpec::string("preferredDate")
                    .required()
                    .describe("Preferred date, e.g. 2024-06-03"),
            )
            .param(ParameterSpec::string("preferredTime").describe("Preferred time of day"))
            .param(
                ParameterSpec::enumeration("sessionType", SessionType::VALUES.iter().copied())
                    .describe("Defaults to individual"),
            )
            .param(ParameterSpec::string("notes").describe("Anything the therapist should know"))
            .param(ParameterSpec::boolean("urgent").describe("Flag for priority follow-up"))
    }
}

#[async_trait]
impl ActionHandler for BookAppointmentHandler {
    async fn execute(
        &self,
        args: &ValidatedArguments,
        ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError> {
        let Some(date) = non_blank(args, "preferredDate")? else {
            return Ok(rejected("Preferred date cannot be empty"));
        };

        let request = AppointmentRequest {
            id: Uuid::new_v4(),
            user_id: ctx.user.id.clone(),
            preferred_date: date.to_string(),
            preferred_time: optional_text(args, "preferredTime"),
            session_type: enum_or_default(args, "sessionType", SessionType::parse)?,
            notes: optional_text(args, "notes"),
            urgent: args.bool("urgent").unwrap_or(false),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };

        if request.urgent {
            tracing::info!(user = %ctx.user.id, "Urgent appointment request submitted");
        }

        let data = record_data(&request)?;
        ctx.hooks.appointments.persist(request).await?;

        Ok(
            ActionResult::ok(format!("Appointment request submitted for {}", date))
                .with_data(data),
        )
    }
}
