//! Mention text classification and the command handlers.
//!
//! Classification runs over the ASCII-lower-cased text with an ordered list of
//! matchers; the first matcher that accepts the text decides the command.

pub mod ask;
pub mod list;
pub mod progress;
pub mod sign_url;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::core::AgentServices;
use crate::core::models::InboundEvent;
use crate::errors::AgentError;

pub const GREETING_TEXT: &str = "Hello, World!";

pub const HELP_TEXT: &str = "Here's what I can do:\n\
• `hello` - Say hello\n\
• `list-files` - List files in the document bucket\n\
• `get-url <file-key>` - Get a download URL for a file (valid for 15 minutes)\n\
• `ask <question>` - Ask the knowledge base a question";

/// Parsed user intent from mention text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Greet,
    ListObjects,
    SignUrl { key: String },
    Ask { query: String },
    Help,
}

type Matcher = fn(normalized: &str, raw: &str) -> Option<Command>;

/// Checked in order; the first match wins.
const MATCHERS: &[Matcher] = &[match_greeting, match_list, match_sign_url, match_ask];

fn match_greeting(normalized: &str, _raw: &str) -> Option<Command> {
    normalized.contains("hello").then_some(Command::Greet)
}

fn match_list(normalized: &str, _raw: &str) -> Option<Command> {
    normalized.contains("list-files").then_some(Command::ListObjects)
}

fn match_sign_url(normalized: &str, raw: &str) -> Option<Command> {
    // `get-url` alone or followed by whitespace and a key; `get-urlfoo` is not a command.
    static URL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"get-url(?:\s+(\S+))?(?:\s|$)").expect("static regex compile")
    });

    let caps = URL_RE.captures(normalized)?;
    // Object keys are case-sensitive, so slice the key out of the raw text.
    let key = caps
        .get(1)
        .and_then(|m| raw.get(m.range()))
        .unwrap_or_default()
        .to_string();
    Some(Command::SignUrl { key })
}

fn match_ask(normalized: &str, raw: &str) -> Option<Command> {
    let idx = normalized.find("ask ")?;
    let query = raw.get(idx + "ask ".len()..).unwrap_or_default().trim();
    Some(Command::Ask {
        query: query.to_string(),
    })
}

/// Classify mention text into a [`Command`].
#[must_use]
pub fn classify(text: &str) -> Command {
    // ASCII lowering keeps byte offsets aligned with `text`.
    let normalized = text.to_ascii_lowercase();
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(&normalized, text))
        .unwrap_or(Command::Help)
}

/// Run the handler for the command found in `event.text`.
///
/// # Errors
///
/// Returns an error only when the final Slack reply cannot be delivered;
/// failures of the S3 or knowledge-base calls are reported to the user.
pub async fn dispatch(services: &AgentServices, event: &InboundEvent) -> Result<(), AgentError> {
    let command = classify(&event.text);
    info!(command = ?command, channel = %event.channel, user = %event.user, "Dispatching command");

    match command {
        Command::Greet => reply(services, event, GREETING_TEXT).await,
        Command::Help => reply(services, event, HELP_TEXT).await,
        Command::ListObjects => list::handle(services, event).await,
        Command::SignUrl { key } => sign_url::handle(services, event, &key).await,
        Command::Ask { query } => ask::handle(services, event, &query).await,
    }
}

/// Single-phase reply in the event's thread (if any).
pub(crate) async fn reply(
    services: &AgentServices,
    event: &InboundEvent,
    text: &str,
) -> Result<(), AgentError> {
    services
        .chat
        .post_message(&event.channel, event.thread_ts.as_deref(), text)
        .await
        .map(|_| ())
}
