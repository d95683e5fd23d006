use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Beer, BeerStyle, PageRequest};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::BeerRepository;
use crate::criteria::BeerCriteria;
use crate::CatalogError;

const BEER_COLUMNS: &str = "id, version, beer_name, beer_style, upc, quantity_on_hand, price, created_date, last_modified_date";

/// Row shape of the `beer` table
#[derive(Debug, Clone, FromRow)]
struct BeerRow {
    id: i32,
    version: i64,
    beer_name: String,
    beer_style: String,
    upc: String,
    quantity_on_hand: Option<i32>,
    price: f64,
    created_date: DateTime<Utc>,
    last_modified_date: DateTime<Utc>,
}

impl TryFrom<BeerRow> for Beer {
    type Error = CatalogError;

    fn try_from(row: BeerRow) -> Result<Self, Self::Error> {
        let beer_style: BeerStyle = row.beer_style.parse().map_err(|e| CatalogError::CorruptRecord {
            id: row.id.to_string(),
            reason: format!("{}", e),
        })?;

        Ok(Beer {
            id: Some(row.id),
            version: Some(row.version),
            beer_name: row.beer_name,
            beer_style,
            upc: row.upc,
            quantity_on_hand: row.quantity_on_hand,
            price: row.price,
            created_date: Some(row.created_date),
            last_modified_date: Some(row.last_modified_date),
        })
    }
}

/// PostgreSQL implementation of BeerRepository
pub struct PostgresBeerRepository {
    pool: PgPool,
}

impl PostgresBeerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `beer` table and its UPC index if they do not exist
    pub async fn ensure_schema(&self) -> Result<(), CatalogError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS beer (
                id SERIAL PRIMARY KEY,
                version BIGINT NOT NULL DEFAULT 0,
                beer_name VARCHAR(100) NOT NULL,
                beer_style VARCHAR(30) NOT NULL,
                upc VARCHAR(25) NOT NULL,
                quantity_on_hand INTEGER,
                price DOUBLE PRECISION NOT NULL,
                created_date TIMESTAMPTZ NOT NULL DEFAULT now(),
                last_modified_date TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS beer_upc_idx ON beer (upc)")
            .execute(&self.pool)
            .await?;

        info!("Beer schema ready");
        Ok(())
    }

    async fn insert(&self, beer: Beer) -> Result<Beer, CatalogError> {
        let row = sqlx::query_as::<_, BeerRow>(&format!(
            r#"
            INSERT INTO beer (beer_name, beer_style, upc, quantity_on_hand, price, version)
            VALUES ($1, $2, $3, $4, $5, 0)
            RETURNING {}
            "#,
            BEER_COLUMNS
        ))
        .bind(&beer.beer_name)
        .bind(beer.beer_style.as_str())
        .bind(&beer.upc)
        .bind(beer.quantity_on_hand)
        .bind(beer.price)
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted beer {}", row.id);
        row.try_into()
    }

    async fn update(&self, id: i32, beer: Beer) -> Result<Beer, CatalogError> {
        let row = sqlx::query_as::<_, BeerRow>(&format!(
            r#"
            UPDATE beer
            SET beer_name = $1, beer_style = $2, upc = $3, quantity_on_hand = $4, price = $5,
                version = version + 1, last_modified_date = now()
            WHERE id = $6
            RETURNING {}
            "#,
            BEER_COLUMNS
        ))
        .bind(&beer.beer_name)
        .bind(beer.beer_style.as_str())
        .bind(&beer.upc)
        .bind(beer.quantity_on_hand)
        .bind(beer.price)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        debug!("Updated beer {} to version {}", row.id, row.version);
        row.try_into()
    }
}

#[async_trait]
impl BeerRepository for PostgresBeerRepository {
    async fn find(&self, criteria: &BeerCriteria, page: PageRequest) -> Result<Vec<Beer>, CatalogError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM beer", BEER_COLUMNS));
        criteria.push_where(&mut builder);
        builder
            .push(" ORDER BY id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = builder
            .build_query_as::<BeerRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Beer::try_from).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Beer>, CatalogError> {
        let row = sqlx::query_as::<_, BeerRow>(&format!("SELECT {} FROM beer WHERE id = $1", BEER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Beer::try_from).transpose()
    }

    async fn find_by_upc(&self, upc: &str) -> Result<Option<Beer>, CatalogError> {
        let row = sqlx::query_as::<_, BeerRow>(&format!(
            "SELECT {} FROM beer WHERE upc = $1 ORDER BY id LIMIT 1",
            BEER_COLUMNS
        ))
        .bind(upc)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Beer::try_from).transpose()
    }

    async fn save(&self, beer: Beer) -> Result<Beer, CatalogError> {
        match beer.id {
            Some(id) => self.update(id, beer).await,
            None => self.insert(beer).await,
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), CatalogError> {
        sqlx::query("DELETE FROM beer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
