use hrms_payroll::api::{AppState, create_router};
use hrms_payroll::config::{ConfigLoader, ServerSettings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hrms_payroll=info,tower_http=info".into()),
        )
        .init();

    let settings = ServerSettings::from_env();
    let config = ConfigLoader::load(&settings.config_dir)?;
    info!(
        config_dir = %settings.config_dir,
        employees = config.employees().len(),
        working_days = config.policy().working_days,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!(bind_addr = %settings.bind_addr, "HRMS payroll service listening");
    axum::serve(listener, app).await?;

    Ok(())
}
