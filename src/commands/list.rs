use crate::core::AgentServices;
use crate::core::models::{InboundEvent, ObjectSummary};
use crate::errors::AgentError;
use crate::utils::format::format_object_line;

use super::progress;

/// Page size of a single listing.
pub const MAX_LISTED_OBJECTS: i32 = 20;

#[must_use]
pub fn format_listing(bucket: &str, objects: &[ObjectSummary]) -> String {
    if objects.is_empty() {
        return format!("No objects found in bucket `{bucket}`.");
    }

    let lines: Vec<String> = objects.iter().map(format_object_line).collect();
    format!(
        "*Files in `{bucket}`* (showing {} of up to {MAX_LISTED_OBJECTS}):\n{}",
        objects.len(),
        lines.join("\n")
    )
}

/// # Errors
///
/// Returns an error only if the final Slack reply cannot be delivered.
pub async fn handle(services: &AgentServices, event: &InboundEvent) -> Result<(), AgentError> {
    let bucket = services.objects.bucket().to_string();

    progress::run(
        services,
        event,
        "Fetching the file list...",
        async {
            let objects = services.objects.list_objects(MAX_LISTED_OBJECTS).await?;
            Ok::<_, AgentError>(format_listing(&bucket, &objects))
        },
        |_| "Sorry, I couldn't list the files. Please try again later.".to_string(),
    )
    .await
}
