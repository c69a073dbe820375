use anyhow::Result;
use scribe_configuration::{load_config, setup_logging};
use scribe_setup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = load_config()?;
    setup_logging(&config);
    let app = Application::new(config).await?;
    app.run().await?;
    Ok(())
}
