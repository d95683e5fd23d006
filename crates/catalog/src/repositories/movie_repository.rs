use async_trait::async_trait;
use domain::Movie;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use super::MovieRepository;
use crate::CatalogError;

#[derive(Debug, Clone, FromRow)]
struct MovieRow {
    id: String,
    title: String,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: Some(row.id),
            title: row.title,
        }
    }
}

/// PostgreSQL implementation of MovieRepository
pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS movie (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Movie schema ready");
        Ok(())
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn save(&self, movie: Movie) -> Result<Movie, CatalogError> {
        let id = movie.id.unwrap_or_else(|| Uuid::new_v4().to_string());

        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            INSERT INTO movie (id, title)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET title = EXCLUDED.title
            RETURNING id, title
            "#,
        )
        .bind(&id)
        .bind(&movie.title)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movie>, CatalogError> {
        let row = sqlx::query_as::<_, MovieRow>("SELECT id, title FROM movie WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Movie::from))
    }

    async fn find_all(&self) -> Result<Vec<Movie>, CatalogError> {
        let rows = sqlx::query_as::<_, MovieRow>("SELECT id, title FROM movie ORDER BY title")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), CatalogError> {
        sqlx::query("DELETE FROM movie WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), CatalogError> {
        sqlx::query("DELETE FROM movie").execute(&self.pool).await?;
        Ok(())
    }
}
