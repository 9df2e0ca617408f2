use std::str::FromStr;

use hospital_api::config::Config;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use uuid::Uuid;

/// A throwaway database carved out of `TEST_DATABASE_URL`, migrated and
/// dropped again by `cleanup`.
pub struct MySqlTestContext {
    pub pool: MySqlPool,
    admin: MySqlPool,
    db_name: String,
}

impl MySqlTestContext {
    /// `None` when `TEST_DATABASE_URL` is unset, so suites skip on machines
    /// without MySQL.
    pub async fn new() -> Option<Self> {
        let base = std::env::var("TEST_DATABASE_URL").ok()?;
        let options = MySqlConnectOptions::from_str(&base).expect("invalid TEST_DATABASE_URL");

        let admin = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .expect("connect to TEST_DATABASE_URL");

        let db_name = format!("hospital_test_{}", Uuid::new_v4().to_simple());
        sqlx::query(&format!("CREATE DATABASE `{}`", db_name))
            .execute(&admin)
            .await
            .expect("create test database");

        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect_with(options.database(&db_name))
            .await
            .expect("connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("apply migrations");

        Some(Self {
            pool,
            admin,
            db_name,
        })
    }

    pub async fn insert_department(&self, name: &str) -> u64 {
        sqlx::query("INSERT INTO departments (department_name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .expect("insert department")
            .last_insert_id()
    }

    pub async fn cleanup(self) {
        let Self {
            pool,
            admin,
            db_name,
        } = self;
        pool.close().await;
        let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS `{}`", db_name))
            .execute(&admin)
            .await;
        admin.close().await;
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "DB_USER" => Some("hospital".to_string()),
        "DB_NAME" => Some("hospital_db".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Builds the service exactly as `main` wires the routes.
macro_rules! test_app {
    ($pool:expr) => {{
        let config = common::test_config();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(|cfg| hospital_api::routes::configure(cfg, &config)),
        )
        .await
    }};
}

/// Sends a `TestRequest` and returns the status with the JSON body.
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = actix_web::test::read_body(resp).await;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }};
}
