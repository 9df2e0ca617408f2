use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use crate::config::Config;

/// Opens the process-wide pool. Callers queue for a connection once all
/// `db_max_connections` are checked out.
pub async fn init_db(config: &Config) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(config.connect_options())
        .await
}
