use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Schema,
    Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entity::{group, group_chat_room, group_member, notice, user};

/// Initialize database connection and auto-migrate tables
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let database_url = config.connection_url();

    if config.is_sqlite() {
        info!("Connecting to sqlite database: {}", config.path);
        if config.path != ":memory:" {
            if let Some(dir) = Path::new(&config.path).parent() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DbErr::Custom(format!("cannot create {}: {}", dir.display(), e))
                })?;
            }
        }
    } else {
        info!("Connecting to database: {}:{}/{}", config.host, config.port, config.name);
    }

    let mut opt = ConnectOptions::new(&database_url);
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;
    info!("Database connection established");

    auto_migrate(&db).await?;

    Ok(db)
}

/// Create missing tables from the entity definitions.
///
/// Foreign keys (and their `ON DELETE CASCADE` actions) come from the entity
/// relations, so tables are created parents first.
pub async fn auto_migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Running auto-migration for all entities...");

    create_table_if_not_exists(db, backend, schema.create_table_from_entity(user::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(group::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(notice::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(group_chat_room::Entity)).await?;
    create_table_if_not_exists(db, backend, schema.create_table_from_entity(group_member::Entity)).await?;

    info!("Auto-migration completed successfully");
    Ok(())
}

/// Create a table if it doesn't exist
async fn create_table_if_not_exists(
    db: &DatabaseConnection,
    backend: DbBackend,
    mut stmt: TableCreateStatement,
) -> Result<(), DbErr> {
    stmt.if_not_exists();

    let sql = backend.build(&stmt);

    db.execute(Statement::from_string(backend, sql.to_string())).await?;

    Ok(())
}

/// Fresh in-memory database with all tables, for tests
#[cfg(test)]
pub async fn test_database() -> DatabaseConnection {
    init_database(&DatabaseConfig::sqlite_memory())
        .await
        .expect("in-memory sqlite")
}
