use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_SYS_USERS: &str = r#"
    CREATE TABLE sys_users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        full_name TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        is_admin INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        last_login_at TEXT
    );
"#;

const CREATE_SYS_SETTINGS: &str = r#"
    CREATE TABLE sys_settings (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        description TEXT,
        created_at TEXT,
        updated_at TEXT
    );
"#;

const CREATE_GRID_CONFIGURATION: &str = r#"
    CREATE TABLE a001_grid_configuration (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        content_type TEXT NOT NULL DEFAULT 'product',
        is_title_show INTEGER NOT NULL DEFAULT 1,
        grid_rows INTEGER NOT NULL,
        grid_columns INTEGER NOT NULL,
        mobile_rows INTEGER NOT NULL,
        mobile_columns INTEGER NOT NULL,
        content_items TEXT NOT NULL DEFAULT '[]',
        banner_image TEXT,
        banner_image_mobile TEXT,
        background_image TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        position INTEGER NOT NULL DEFAULT 0,
        keyword TEXT NOT NULL DEFAULT 'home',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_CONTENT_ENTITY: &str = r#"
    CREATE TABLE a002_content_entity (
        id TEXT PRIMARY KEY NOT NULL,
        content_type TEXT NOT NULL,
        name TEXT NOT NULL,
        slug TEXT NOT NULL,
        image TEXT,
        parent_slug TEXT,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0,
        UNIQUE (content_type, slug)
    );
"#;

/// Build a sqlite connection URL for a database file path
fn sqlite_url(db_file: &Path) -> anyhow::Result<String> {
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

/// Create the table if it is missing
async fn ensure_table(
    conn: &DatabaseConnection,
    table_name: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let exists = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [table_name.into()],
        ))
        .await?;

    if exists.is_empty() {
        tracing::info!("Creating {} table", table_name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = sqlite_url(db_file)?;
    tracing::info!("Connecting to database: {}", db_url);
    let conn = Database::connect(&db_url).await?;

    // Ensure required tables exist (minimal schema bootstrap)
    ensure_table(&conn, "sys_users", CREATE_SYS_USERS).await?;
    ensure_table(&conn, "sys_settings", CREATE_SYS_SETTINGS).await?;
    ensure_table(&conn, "a001_grid_configuration", CREATE_GRID_CONFIGURATION).await?;
    ensure_table(&conn, "a002_content_entity", CREATE_CONTENT_ENTITY).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_url_for_absolute_path() {
        let url = sqlite_url(Path::new("/var/lib/shopdesk/app.db")).unwrap();
        assert_eq!(url, "sqlite:///var/lib/shopdesk/app.db?mode=rwc");
    }

    #[test]
    fn test_sqlite_url_for_relative_path() {
        let url = sqlite_url(Path::new("target/db/app.db")).unwrap();
        assert!(url.starts_with("sqlite://"));
        assert!(url.ends_with("target/db/app.db?mode=rwc"));
    }
}
