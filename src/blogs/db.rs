//! Blog database operations
//!
//! Handles all database interactions for blog records.

use crate::blogs::models::{Blog, BlogChanges, BlogRow, NewBlog};
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

const BLOG_COLUMNS: &str = "id, title, author, url, likes";

/// Database connection pool for blog operations
pub struct BlogDb {
    pool: SqlitePool,
}

impl BlogDb {
    /// Initialize database connection pool
    ///
    /// # Arguments
    /// * `db_url` - Path to the SQLite database file, or a `sqlite:` URL
    ///
    /// # Returns
    /// * `Ok(BlogDb)` if successful
    /// * `Err(AppError)` if connection failed
    pub async fn new(db_url: &str) -> Result<Self, AppError> {
        // Ensure parent directory exists
        if let Some(parent) = database_file(db_url).as_ref().and_then(|p| p.parent()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
            })?;
        }

        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_url.starts_with("sqlite:") {
            db_url.to_string()
        } else {
            format!("sqlite:{}", db_url)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database path: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to connect to database: {}", e))
            })?;

        info!("Connected to SQLite database at: {}", db_url);

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_blogs.sql");

        for statement in migration_statements(migration_sql) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!(
                        "Migration failed: {} - Statement: {}",
                        e,
                        statement.chars().take(100).collect::<String>()
                    ))
                })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get all blogs in insertion order
    pub async fn get_blogs(&self) -> Result<Vec<Blog>, AppError> {
        let rows = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs ORDER BY rowid ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Blog::try_from(row).map_err(AppError::from))
            .collect()
    }

    /// Get a blog by ID
    pub async fn get_blog(&self, id: &str) -> Result<Option<Blog>, AppError> {
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Blog::try_from).transpose().map_err(AppError::from)
    }

    /// Count stored blogs
    #[cfg(test)]
    pub(crate) async fn count_blogs(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Store a new blog and return it with its assigned ID
    pub async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError> {
        let id = Blog::generate_id();
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "INSERT INTO blogs (id, title, author, url, likes) VALUES (?, ?, ?, ?, ?) \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(&id)
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(likes_to_sql(blog.likes)?)
        .fetch_one(&self.pool)
        .await?;

        debug!("Created blog: {}", id);
        Ok(Blog::try_from(row)?)
    }

    /// Apply changes to a blog in a single statement
    ///
    /// # Returns
    /// * `Ok(Some(Blog))` with the updated record
    /// * `Ok(None)` if no blog has the given ID
    pub async fn update_blog(
        &self,
        id: &str,
        changes: &BlogChanges,
    ) -> Result<Option<Blog>, AppError> {
        if changes.is_empty() {
            return self.get_blog(id).await;
        }

        let likes = changes.likes.map(likes_to_sql).transpose()?;
        let row = sqlx::query_as::<_, BlogRow>(&format!(
            "UPDATE blogs SET \
                title = COALESCE(?, title), \
                author = COALESCE(?, author), \
                url = COALESCE(?, url), \
                likes = COALESCE(?, likes) \
             WHERE id = ? \
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.url)
        .bind(likes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            debug!("Updated blog: {}", id);
        }
        row.map(Blog::try_from).transpose().map_err(AppError::from)
    }

    /// Delete a blog
    ///
    /// # Returns
    /// * `Ok(true)` if a blog was removed
    /// * `Ok(false)` if no blog has the given ID
    pub async fn delete_blog(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!("Deleted blog: {}", id);
        }
        Ok(deleted)
    }
}

/// Filesystem path behind a database URL, if it names a file
fn database_file(db_url: &str) -> Option<PathBuf> {
    let path = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Strip comments from a migration script and split it into statements
fn migration_statements(sql: &str) -> Vec<String> {
    let mut cleaned_sql = String::new();
    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        let without_comments = match trimmed.find("--") {
            Some(comment_pos) => &trimmed[..comment_pos],
            None => trimmed,
        };
        cleaned_sql.push_str(without_comments.trim());
        cleaned_sql.push(' ');
    }

    cleaned_sql
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn likes_to_sql(likes: u64) -> Result<i64, AppError> {
    i64::try_from(likes)
        .map_err(|_| AppError::Validation(format!("Likes out of range: {}", likes)))
}

/// A throwaway database in a temporary directory
#[cfg(test)]
pub(crate) async fn test_db() -> (BlogDb, tempfile::TempDir) {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let db = BlogDb::new(db_path.to_str().unwrap())
        .await
        .expect("Failed to create test database");
    (db, temp_dir)
}
