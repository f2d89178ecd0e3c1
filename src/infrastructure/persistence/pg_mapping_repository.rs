//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgExecutor;
use std::sync::Arc;

use crate::domain::entities::{MapOutcome, Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    site_id: i64,
    domain: String,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(r: MappingRow) -> Self {
        Mapping::new(r.id, r.site_id, r.domain, r.active, r.created_at)
    }
}

/// PostgreSQL repository for domain mappings.
///
/// The mapping rule runs inside one transaction: the site row is locked so
/// purchases for the same site serialize, and the unique key on
/// `domain_mappings.domain` settles races between sites.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

async fn mapping_count<'e, E>(executor: E, site_id: i64) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM domain_mappings WHERE site_id = $1")
        .bind(site_id)
        .fetch_one(executor)
        .await
}

/// A domain is claimed by a site living at path `/` on it, or by a mapping.
async fn domain_claimed<'e, E>(executor: E, domain: &str) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM sites WHERE domain = $1 AND path = '/')
            OR EXISTS (SELECT 1 FROM domain_mappings WHERE domain = $1)
        "#,
    )
    .bind(domain)
    .fetch_one(executor)
    .await
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn count_for_site(&self, site_id: i64) -> Result<i64, AppError> {
        Ok(mapping_count(self.pool.as_ref(), site_id).await?)
    }

    async fn is_domain_claimed(&self, domain: &str) -> Result<bool, AppError> {
        Ok(domain_claimed(self.pool.as_ref(), domain).await?)
    }

    async fn insert_if_unclaimed(
        &self,
        new_mapping: NewMapping,
        allow_multi: bool,
    ) -> Result<MapOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent purchases for the same site.
        sqlx::query("SELECT id FROM sites WHERE id = $1 FOR UPDATE")
            .bind(new_mapping.site_id)
            .fetch_optional(&mut *tx)
            .await?;

        if !allow_multi && mapping_count(&mut *tx, new_mapping.site_id).await? > 0 {
            tx.rollback().await?;
            return Ok(MapOutcome::SiteAlreadyMapped);
        }

        if domain_claimed(&mut *tx, &new_mapping.domain).await? {
            tx.rollback().await?;
            return Ok(MapOutcome::DomainClaimed);
        }

        // A concurrent insert of the same domain commits first and this one
        // returns no row.
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO domain_mappings (site_id, domain, active)
            VALUES ($1, $2, TRUE)
            ON CONFLICT (domain) DO NOTHING
            RETURNING id, site_id, domain, active, created_at
            "#,
        )
        .bind(new_mapping.site_id)
        .bind(&new_mapping.domain)
        .fetch_optional(&mut *tx)
        .await?;

        match row {
            Some(row) => {
                tx.commit().await?;
                Ok(MapOutcome::Inserted(row.into()))
            }
            None => {
                tx.rollback().await?;
                Ok(MapOutcome::DomainClaimed)
            }
        }
    }

    async fn list_for_site(&self, site_id: i64) -> Result<Vec<Mapping>, AppError> {
        let rows = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, site_id, domain, active, created_at
            FROM domain_mappings
            WHERE site_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(site_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Mapping::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
