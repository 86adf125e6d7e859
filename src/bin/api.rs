pub use slack_ai_agent::api::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    slack_ai_agent::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
