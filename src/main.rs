use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    render::Views,
    routes::build_app,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // A missing database is fatal at startup.
    let orm = match create_orm_conn(&config.database_url).await {
        Ok(orm) => orm,
        Err(err) => {
            tracing::error!(error = %err, "database connection failed");
            return Err(err);
        }
    };
    run_migrations(&orm).await?;
    tracing::info!("database connected and migrations applied");

    let views = Views::new()?;
    let state = AppState::new(orm, views);
    let app = build_app(state, &config.public_dir);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
