use bboard::{
    config::{database, settings},
    core::bulletin,
    errors::Result,
    templatetags::TagLibrary,
    web,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = settings::load_app_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and make sure every table exists
    if std::env::var("DATABASE_URL").is_err() {
        std::fs::create_dir_all("data")?;
    }
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed configured rubrics
    let rubric_names: Vec<String> = app_config.rubrics.iter().map(|r| r.name.clone()).collect();
    bulletin::seed_rubrics(&db, &rubric_names).await?;

    // 6. Serve
    let state = web::AppState::new(db, TagLibrary::standard(&app_config.currency_name));
    let listener = tokio::net::TcpListener::bind(&app_config.bind_address).await?;
    info!("Listening on http://{}", app_config.bind_address);

    axum::serve(listener, web::build_router(state)).await?;
    Ok(())
}
