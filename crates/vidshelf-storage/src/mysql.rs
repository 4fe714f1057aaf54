use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::mysql::{MySqlPoolOptions, MySqlRow};
use sqlx::{MySqlPool, Row};
use tracing::trace;
use vidshelf_core::error::Result;
use vidshelf_core::{ReadRepository, Repository, StorageError, Video};

/// MySQL implementation of the repository contract.
///
/// Videos live in a single `videos` table (see `ddl/mysql/videos.sql`).
/// `uploaded_at` is stored as Unix milliseconds. Title filtering uses
/// `LIKE`, so case sensitivity follows the column collation.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Same as [`MySqlRepository::connect`] with a bounded pool size.
    pub async fn connect_with_max_connections(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }
}

/// Escapes `LIKE` wildcards so the filter matches literally.
fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn parse_uploaded_at(millis: i64) -> Result<Timestamp> {
    Timestamp::from_millisecond(millis).map_err(|e| {
        StorageError::InvalidData(format!("invalid uploaded_at timestamp '{}': {e}", millis))
    })
}

fn row_to_video(row: &MySqlRow) -> Result<Video> {
    let uploaded_at: i64 = row.try_get("uploaded_at").map_err(map_sqlx_error)?;

    Ok(Video {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        title: row.try_get("title").map_err(map_sqlx_error)?,
        video_length: row.try_get("video_length").map_err(map_sqlx_error)?,
        uploaded_at: parse_uploaded_at(uploaded_at)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Video>> {
        let rows = match title_filter {
            Some(filter) => {
                sqlx::query(
                    r#"
                    SELECT id, title, video_length, uploaded_at
                    FROM videos
                    WHERE title LIKE ?
                    ORDER BY uploaded_at, id
                    "#,
                )
                .bind(like_pattern(filter))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, title, video_length, uploaded_at
                    FROM videos
                    ORDER BY uploaded_at, id
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        trace!(count = rows.len(), "listed videos");
        rows.iter().map(row_to_video).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Video>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, video_length, uploaded_at
            FROM videos
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_video).transpose()
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let exists = sqlx::query(
            r#"
            SELECT 1
            FROM videos
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .is_some();

        Ok(exists)
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, video: &Video) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO videos (id, title, video_length, uploaded_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&video.id)
        .bind(&video.title)
        .bind(video.video_length)
        .bind(video.uploaded_at.as_millisecond())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(video.id.clone())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn update(&self, id: &str, video: &Video) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE videos
            SET id = ?, title = ?, video_length = ?, uploaded_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&video.id)
        .bind(&video.title)
        .bind(video.video_length)
        .bind(video.uploaded_at.as_millisecond())
        .bind(id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() > 0 => Ok(true),
            // affected rows may count changed rows only; rewriting identical
            // values then reports zero
            Ok(_) => self.exists(id).await,
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(video.id.clone())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM videos
            WHERE id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn pool_timeout_maps_to_timeout() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StorageError::Timeout(_)));
    }

    #[test]
    fn row_not_found_maps_to_invalid_data() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, StorageError::InvalidData(_)));
    }
}
