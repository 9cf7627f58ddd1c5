use unsubscribe_service::{app, config::AppConfig, App, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        unsubscribe_service::init_production_tracing()
    }
    #[cfg(debug_assertions)]
    {
        unsubscribe_service::init_dbg_tracing();
    }

    let config = AppConfig::load()?;
    let app = App::build_from_config(&config).await?;

    app::serve(app).await?;

    Ok(())
}
