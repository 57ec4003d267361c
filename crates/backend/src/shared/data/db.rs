use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const SCHEMA: &[(&str, &str)] = &[
    (
        "localidade",
        r#"
        CREATE TABLE IF NOT EXISTS localidade (
            id TEXT PRIMARY KEY NOT NULL,
            codigo_ibge TEXT NOT NULL UNIQUE,
            nome TEXT NOT NULL,
            uf TEXT NOT NULL,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "localidade_categoria",
        r#"
        CREATE TABLE IF NOT EXISTS localidade_categoria (
            localidade_id TEXT NOT NULL,
            label TEXT NOT NULL,
            raw_value TEXT NOT NULL,
            PRIMARY KEY (localidade_id, label)
        );
        "#,
    ),
    (
        "simulation",
        r#"
        CREATE TABLE IF NOT EXISTS simulation (
            id TEXT PRIMARY KEY NOT NULL,
            owner_id TEXT NOT NULL,
            localidade_id TEXT NOT NULL,
            name TEXT NOT NULL,
            reference_year INTEGER NOT NULL,
            parameters_json TEXT NOT NULL,
            result_json TEXT NOT NULL,
            total REAL NOT NULL DEFAULT 0,
            resultado_liquido REAL NOT NULL DEFAULT 0,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    ),
    (
        "idx_simulation_owner",
        "CREATE INDEX IF NOT EXISTS idx_simulation_owner ON simulation (owner_id, is_deleted);",
    ),
];

/// Opens (creating if needed) the SQLite database and bootstraps the schema.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database {}", absolute_path.display());
    let conn = Database::connect(&db_url).await?;

    for (name, sql) in SCHEMA {
        tracing::debug!("Ensuring schema object {}", name);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await?;
    }

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("database already initialized"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("database connection is not initialized")
}
