use reelpipe_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (metadata store, storage, pipeline, routes)
    let (_state, router) = reelpipe_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    reelpipe_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
