// src/db/answer_repo.rs

use sqlx::{Executor, Postgres};

use crate::common::{db_utils::TenantSchema, error::AppError};

#[derive(Clone, Default)]
pub struct AnswerRepository;

impl AnswerRepository {
    pub fn new() -> Self {
        Self
    }

    /// Resposta livre (`answer_type = "text"`)
    pub async fn insert_text<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_id: i64,
        text: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO {} (text, question_id, recruitment_process_id, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            "#,
            tenant.table("answer_text")
        );

        sqlx::query(&sql)
            .bind(text)
            .bind(question_id)
            .bind(recruitment_process_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Alternativa escolhida (`answer_type = "options"`)
    pub async fn insert_alternative<'e, E>(
        &self,
        executor: E,
        tenant: &TenantSchema,
        recruitment_process_id: i64,
        question_alternative_id: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO {} (question_alternative_id, recruitment_process_id, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            "#,
            tenant.table("answer_alternative")
        );

        sqlx::query(&sql)
            .bind(question_alternative_id)
            .bind(recruitment_process_id)
            .execute(executor)
            .await?;

        Ok(())
    }
}
