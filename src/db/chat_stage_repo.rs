// src/db/chat_stage_repo.rs

use sqlx::{types::Json, Executor, Postgres};

use crate::{
    common::error::AppError,
    models::chat_stage::{ChatStageRow, ChatStageUpdate},
};

// `chat_stage` é compartilhada entre tenants (schema public),
// por isso o filtro por `tenant_name` em todas as consultas.

// `id::bigint`: a coluna pode ter sido criada como `serial`.
const FIND_FOR_UPDATE_SQL: &str = r#"
    SELECT id::bigint AS id, conversation, context, status
    FROM public.chat_stage
    WHERE id = $1 AND tenant_name = $2
    FOR UPDATE
"#;

#[derive(Clone, Default)]
pub struct ChatStageRepository;

impl ChatStageRepository {
    pub fn new() -> Self {
        Self
    }

    /// Lê a linha travando-a até o fim da transação (`FOR UPDATE`).
    /// Dois turnos simultâneos no mesmo chat ficam em fila aqui.
    pub async fn find_for_update<'e, E>(
        &self,
        executor: E,
        tenant_name: &str,
        chat_stage_id: i64,
    ) -> Result<Option<ChatStageRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, ChatStageRow>(FIND_FOR_UPDATE_SQL)
        .bind(chat_stage_id)
        .bind(tenant_name)
        .fetch_optional(executor)
        .await?;

        Ok(row)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        update: &ChatStageUpdate,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // COALESCE mantém o contexto atual quando o turno não o alterou
        let result = sqlx::query(
            r#"
            UPDATE public.chat_stage
            SET conversation = $1,
                context = COALESCE($2, context),
                status = $3,
                updated_at = NOW()
            WHERE id = $4 AND tenant_name = $5
            "#,
        )
        .bind(Json(&update.conversation))
        .bind(update.context.as_ref().map(Json))
        .bind(&update.status)
        .bind(update.id)
        .bind(&update.tenant_name)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::PersistenceError(format!(
                "chat_stage {} não foi atualizado",
                update.id
            )));
        }

        Ok(())
    }
}
