use anyhow::Context;
use users_api_actix::{
    configuration::get_configuration,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("users-api-actix".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;
    tracing::info!("Starting the application...");

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;

    Ok(())
}
