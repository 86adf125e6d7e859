use std::time::Duration;
use tracing::warn;

use crate::core::AgentServices;
use crate::core::models::InboundEvent;
use crate::errors::AgentError;

use super::{progress, reply};

pub const PRESIGNED_URL_EXPIRY: Duration = Duration::from_secs(15 * 60);

#[must_use]
pub fn failure_message(key: &str) -> String {
    format!(
        "Sorry, I couldn't generate a download URL for `{key}`. \
         Please check the file key (try `list-files`) and send `get-url <file-key>` again."
    )
}

#[must_use]
pub fn success_message(key: &str, url: &str) -> String {
    format!("Download URL for `{key}` (valid for 15 minutes):\n{url}")
}

/// # Errors
///
/// Returns an error only if the final Slack reply cannot be delivered.
pub async fn handle(
    services: &AgentServices,
    event: &InboundEvent,
    key: &str,
) -> Result<(), AgentError> {
    if key.is_empty() {
        warn!(channel = %event.channel, "get-url without a file key");
        return reply(services, event, &failure_message(key)).await;
    }

    progress::run(
        services,
        event,
        &format!("Generating a download URL for `{key}`..."),
        async {
            let url = services
                .objects
                .presign_get(key, PRESIGNED_URL_EXPIRY)
                .await?;
            Ok::<_, AgentError>(success_message(key, &url))
        },
        |_| failure_message(key),
    )
    .await
}
