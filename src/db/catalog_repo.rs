// src/db/catalog_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::{db_utils::TenantSchema, error::AppError},
    models::catalog::{JobPosting, RegistrationField, SourceOption},
};

// Somente leituras: configuração de cadastro e vagas do tenant.
// Ids e sequências são convertidos no SELECT para os tipos dos modelos.
#[derive(Clone, Default)]
pub struct CatalogRepository;

impl CatalogRepository {
    pub fn new() -> Self {
        Self
    }

    /// Campos de cadastro na ordem da tabela
    pub async fn list_registration_fields<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
    ) -> Result<Vec<RegistrationField>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT id::bigint AS id, key FROM {} ORDER BY id ASC",
            tenant.table("registration_field")
        );

        let fields = sqlx::query_as::<_, RegistrationField>(&sql)
            .fetch_all(executor)
            .await?;

        Ok(fields)
    }

    /// Origens visíveis, ordenadas pela sequência configurada
    pub async fn list_source_options<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
    ) -> Result<Vec<SourceOption>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT id::bigint AS id, name, sequence::int4 AS sequence
            FROM {}
            WHERE visible = TRUE
            ORDER BY sequence ASC, id ASC
            "#,
            tenant.table("source")
        );

        let options = sqlx::query_as::<_, SourceOption>(&sql)
            .fetch_all(executor)
            .await?;

        Ok(options)
    }

    pub async fn find_job_posting<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
        job_code: &str,
    ) -> Result<Option<JobPosting>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "SELECT id::bigint AS id, job_code, title FROM {} WHERE job_code = $1",
            tenant.table("job_posting")
        );

        let job = sqlx::query_as::<_, JobPosting>(&sql)
            .bind(job_code)
            .fetch_optional(executor)
            .await?;

        Ok(job)
    }
}
