// src/db/candidate_repo.rs

use sqlx::{Executor, Postgres};

use crate::{
    common::{db_utils::TenantSchema, error::AppError},
    models::application::{NewCandidate, NewPhoneContact, NewRecruitmentProcess},
};

// Responsável pelas três tabelas da cadeia de inscrição:
// candidate -> candidate_phone_contact -> recruitment_process.
// Os métodos devolvem `Option<i64>`: `None` significa INSERT sem RETURNING,
// e quem decide o que fazer com isso é o serviço.
#[derive(Clone, Default)]
pub struct CandidateRepository;

impl CandidateRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn insert_candidate<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
        candidate: &NewCandidate,
    ) -> Result<Option<i64>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = candidate_insert_sql(tenant);

        let id = sqlx::query_scalar::<_, i64>(&sql)
            .bind(&candidate.name)
            .bind(&candidate.email)
            .bind(&candidate.cpf)
            .fetch_optional(executor)
            .await?;

        Ok(id)
    }

    pub async fn insert_phone_contact<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
        contact: &NewPhoneContact,
    ) -> Result<Option<i64>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = phone_contact_insert_sql(tenant);

        let id = sqlx::query_scalar::<_, i64>(&sql)
            .bind(contact.candidate_id)
            .bind(&contact.country_code)
            .bind(&contact.number)
            .bind(&contact.contact_type)
            .fetch_optional(executor)
            .await?;

        Ok(id)
    }

    pub async fn insert_recruitment_process<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
        process: &NewRecruitmentProcess,
    ) -> Result<Option<i64>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = recruitment_process_insert_sql(tenant);

        let id = sqlx::query_scalar::<_, i64>(&sql)
            .bind(process.candidate_id)
            .bind(process.job_posting_id)
            .bind(&process.status)
            .bind(&process.subscription_type)
            .bind(process.stage_id)
            .bind(&process.stage_type)
            .fetch_optional(executor)
            .await?;

        Ok(id)
    }
}

// O `id` volta sempre como bigint: os schemas dos tenants são criados fora
// daqui e podem usar `serial` (int4) ou `bigserial` (int8).

fn candidate_insert_sql(tenant: &TenantSchema) -> String {
    format!(
        r#"
        INSERT INTO {} (name, email, cpf, created_at, updated_at)
        VALUES ($1, $2, $3, NOW(), NOW())
        RETURNING id::bigint
        "#,
        tenant.table("candidate")
    )
}

fn phone_contact_insert_sql(tenant: &TenantSchema) -> String {
    format!(
        r#"
        INSERT INTO {} (candidate_id, country_code, number, "type", created_at, updated_at)
        VALUES ($1, $2, $3, $4, NOW(), NOW())
        RETURNING id::bigint
        "#,
        tenant.table("candidate_phone_contact")
    )
}

fn recruitment_process_insert_sql(tenant: &TenantSchema) -> String {
    format!(
        r#"
        INSERT INTO {} (
            candidate_id, job_posting_id, status, subscription_type,
            stage_id, stage_type, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
        RETURNING id::bigint
        "#,
        tenant.table("recruitment_process")
    )
}
