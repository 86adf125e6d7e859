use tracing::info;

use crate::core::AgentServices;
use crate::core::models::InboundEvent;
use crate::errors::AgentError;

use super::{progress, reply};

pub const EMPTY_QUERY_TEXT: &str =
    "Please include a question after `ask`, for example: `ask What is our refund policy?`";
pub const NO_ANSWER_TEXT: &str = "Sorry, I could not generate an answer.";
pub const FAILURE_TEXT: &str =
    "Sorry, I couldn't get an answer from the knowledge base. Please try again later.";

/// # Errors
///
/// Returns an error only if the final Slack reply cannot be delivered.
pub async fn handle(
    services: &AgentServices,
    event: &InboundEvent,
    query: &str,
) -> Result<(), AgentError> {
    if query.is_empty() {
        return reply(services, event, EMPTY_QUERY_TEXT).await;
    }

    info!(channel = %event.channel, query_len = query.len(), "Querying knowledge base");

    let timeout = services.knowledge_base_timeout;
    progress::run(
        services,
        event,
        "Searching the knowledge base...",
        async {
            let answer = tokio::time::timeout(timeout, services.knowledge_base.query(query))
                .await
                .map_err(|_| {
                    AgentError::Timeout(format!("knowledge base query exceeded {timeout:?}"))
                })??;
            Ok::<_, AgentError>(answer.unwrap_or_else(|| NO_ANSWER_TEXT.to_string()))
        },
        |_| FAILURE_TEXT.to_string(),
    )
    .await
}
