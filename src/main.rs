use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;

use hospital_api::config::Config;
use hospital_api::db::init_db;
use hospital_api::docs::ApiDoc;
use hospital_api::routes;
use hospital_api::server::bind_listener;

use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log, mirrored to stdout
    let file_appender = rolling::daily(&config.log_dir, "hospital-api.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking.and(std::io::stdout))
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Server starting...");

    if let Err(e) = run(config).await {
        error!(error = ?e, "Server failed to start");
        return Err(e);
    }
    Ok(())
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!(
        db_host = %config.db_host,
        db_user = %config.db_user,
        db_name = %config.db_name,
        db_password_set = !config.db_password.is_empty(),
        "Database settings loaded"
    );

    let pool = init_db(&config)
        .await
        .context("failed to connect to the database")?;

    let listener = bind_listener(&config.host, config.port, config.port_attempts)
        .context("failed to bind the HTTP listener")?;
    info!(addr = %listener.local_addr()?, "Server listening");

    let app_pool = pool.clone();
    let app_config = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors())
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(app_pool.clone()))
            .configure(|cfg| routes::configure(cfg, &app_config))
    })
    .listen(listener)?
    .run()
    .await?;

    info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}
