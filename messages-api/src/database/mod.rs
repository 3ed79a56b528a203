use crate::config::DatabaseConfig;
use message_types::Message;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{MySqlPool, SqlitePool};
use std::path::Path;

#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    message: String,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            content: row.message,
        }
    }
}

/// SQL flavour of the connected database, chosen from the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?;
        match scheme {
            "mysql" | "mariadb" => Some(Dialect::MySql),
            "sqlite" => Some(Dialect::Sqlite),
            _ => None,
        }
    }

    fn create_table_sql(self, table: &str) -> String {
        match self {
            Dialect::MySql => format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    message TEXT NOT NULL
                )"
            ),
            Dialect::Sqlite => format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    message TEXT NOT NULL
                )"
            ),
        }
    }

    /// How the id of a freshly inserted row is read back.
    fn insert_id(self) -> InsertId {
        match self {
            Dialect::MySql => InsertId::LastInsertId,
            Dialect::Sqlite => InsertId::Returning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertId {
    /// Taken from the OK packet of the INSERT.
    LastInsertId,
    /// Selected by the INSERT itself through `RETURNING id`.
    Returning,
}

/// Statements for one table. The table name is validated as an identifier
/// when the configuration loads.
#[derive(Debug, Clone)]
struct Statements {
    select_all: String,
    select_one: String,
    insert: String,
    insert_id: InsertId,
    update: String,
    delete: String,
    create_table: String,
}

impl Statements {
    fn new(dialect: Dialect, table: &str) -> Self {
        let insert_id = dialect.insert_id();
        let insert = match insert_id {
            InsertId::LastInsertId => format!("INSERT INTO {table} (message) VALUES (?)"),
            InsertId::Returning => {
                format!("INSERT INTO {table} (message) VALUES (?) RETURNING id")
            }
        };

        Self {
            select_all: format!("SELECT id, message FROM {table}"),
            select_one: format!("SELECT id, message FROM {table} WHERE id = ?"),
            insert,
            insert_id,
            update: format!("UPDATE {table} SET message = ? WHERE id = ?"),
            delete: format!("DELETE FROM {table} WHERE id = ?"),
            create_table: dialect.create_table_sql(table),
        }
    }
}

#[derive(Debug, Clone)]
enum Pool {
    MySql(MySqlPool),
    Sqlite(SqlitePool),
}

/// Runs the same statement against whichever pool is connected.
macro_rules! with_pool {
    ($pool:expr, $p:ident => $body:expr) => {
        match $pool {
            Pool::MySql($p) => $body,
            Pool::Sqlite($p) => $body,
        }
    };
}

/// Accessor for the messages table. Cloning shares the underlying pool.
#[derive(Debug, Clone)]
pub struct MessageStore {
    pool: Pool,
    statements: Statements,
}

impl MessageStore {
    /// Opens a pool against `database_url` and pings it once, so an unreachable
    /// database fails here rather than on the first request.
    pub async fn connect(config: &DatabaseConfig, database_url: &str) -> Result<Self, sqlx::Error> {
        let dialect = Dialect::from_url(database_url).ok_or_else(|| {
            sqlx::Error::Configuration(
                format!("unsupported database URL scheme in '{}'", redact(database_url)).into(),
            )
        })?;

        let pool = match dialect {
            Dialect::MySql => Pool::MySql(
                MySqlPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(database_url)
                    .await?,
            ),
            Dialect::Sqlite => {
                ensure_sqlite_parent_dir(database_url)?;
                Pool::Sqlite(
                    SqlitePoolOptions::new()
                        .max_connections(config.max_connections)
                        .connect(database_url)
                        .await?,
                )
            }
        };

        let store = Self {
            pool,
            statements: Statements::new(dialect, &config.table),
        };
        store.ping().await?;
        Ok(store)
    }

    pub async fn ensure_table(&self) -> Result<(), sqlx::Error> {
        let sql = &self.statements.create_table;
        with_pool!(&self.pool, pool => sqlx::query(sql).execute(pool).await.map(|_| ()))
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        with_pool!(&self.pool, pool => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()))
    }

    pub async fn list(&self) -> Result<Vec<Message>, sqlx::Error> {
        let sql = &self.statements.select_all;
        let rows = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, MessageRow>(sql).fetch_all(pool).await?
        });

        Ok(rows.into_iter().map(Message::from).collect())
    }

    /// `Ok(None)` when no row has this id.
    pub async fn get(&self, id: i64) -> Result<Option<Message>, sqlx::Error> {
        let sql = &self.statements.select_one;
        let row = with_pool!(&self.pool, pool => {
            sqlx::query_as::<_, MessageRow>(sql)
                .bind(id)
                .fetch_optional(pool)
                .await?
        });

        Ok(row.map(Message::from))
    }

    /// Inserts a message and returns the id the database assigned to it.
    pub async fn create(&self, content: &str) -> Result<i64, sqlx::Error> {
        let sql = &self.statements.insert;
        match (&self.pool, self.statements.insert_id) {
            (Pool::MySql(pool), InsertId::LastInsertId) => {
                let result = sqlx::query(sql).bind(content).execute(pool).await?;
                i64::try_from(result.last_insert_id())
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))
            }
            (Pool::Sqlite(pool), InsertId::Returning) => {
                sqlx::query_scalar::<_, i64>(sql)
                    .bind(content)
                    .fetch_one(pool)
                    .await
            }
            (Pool::Sqlite(pool), InsertId::LastInsertId) => {
                let result = sqlx::query(sql).bind(content).execute(pool).await?;
                Ok(result.last_insert_rowid())
            }
            (Pool::MySql(pool), InsertId::Returning) => {
                sqlx::query_scalar::<_, i64>(sql)
                    .bind(content)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Returns `false` when no row has this id.
    pub async fn update(&self, id: i64, content: &str) -> Result<bool, sqlx::Error> {
        let sql = &self.statements.update;
        let rows_affected = with_pool!(&self.pool, pool => {
            sqlx::query(sql)
                .bind(content)
                .bind(id)
                .execute(pool)
                .await?
                .rows_affected()
        });

        if rows_affected > 0 {
            return Ok(true);
        }

        // MySQL counts changed rows, not matched ones: rewriting the same text reports 0.
        Ok(self.get(id).await?.is_some())
    }

    /// Returns `false` when no row has this id.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let sql = &self.statements.delete;
        let rows_affected = with_pool!(&self.pool, pool => {
            sqlx::query(sql).bind(id).execute(pool).await?.rows_affected()
        });

        Ok(rows_affected > 0)
    }

    pub async fn close(&self) {
        with_pool!(&self.pool, pool => pool.close().await)
    }
}

fn ensure_sqlite_parent_dir(database_url: &str) -> Result<(), sqlx::Error> {
    let path = database_url
        .trim_start_matches("sqlite:")
        .trim_start_matches("//")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Strips credentials from a URL before it is logged or reported.
pub fn redact(database_url: &str) -> String {
    match (database_url.find("://"), database_url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &database_url[..scheme_end], &database_url[at..])
        }
        _ => database_url.to_string(),
    }
}
