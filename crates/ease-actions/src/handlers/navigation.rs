use crate::context::ExecutionContext;
use crate::dispatcher::ActionHandler;
use crate::error::HandlerError;
use crate::validator::ValidatedArguments;
use async_trait::async_trait;
use ease_core::{ActionResult, ActionSchema, ParameterSpec};
use serde_json::json;

/// `navigate_to_section`: move the app to one of its sections.
pub struct NavigateHandler;

impl NavigateHandler {
    pub const NAME: &'static str = "navigate_to_section";

    pub fn schema(sections: &[String]) -> ActionSchema {
        ActionSchema::new(Self::NAME, "Open a section of the app for the user").param(
            ParameterSpec::enumeration("section", sections.iter().cloned())
                .required()
                .describe("Section to open"),
        )
    }
}

#[async_trait]
impl ActionHandler for NavigateHandler {
    async fn execute(
        &self,
        args: &ValidatedArguments,
        ctx: &ExecutionContext,
    ) -> Result<ActionResult, HandlerError> {
        let section = args.require_str("section")?;
        ctx.navigator.navigate(section);

        Ok(ActionResult::ok(format!("Navigated to {} section", section))
            .with_data(json!({ "section": section })))
    }
}
