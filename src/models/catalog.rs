// src/models/catalog.rs

use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::question::Question;

/// Campo de cadastro configurado pelo tenant (`<tenant>.registration_field`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct RegistrationField {
    pub id: i64,
    pub key: String,
}

/// Origem visível ("Como ficou sabendo da vaga?"), já ordenada por `sequence`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SourceOption {
    pub id: i64,
    pub name: String,
    pub sequence: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QuestionCatalog {
    pub questions: Vec<Question>,
    #[schema(example = 6)]
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct JobPosting {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = "DEV-2026-01")]
    pub job_code: String,
    #[schema(example = "Desenvolvedor Backend")]
    pub title: String,
}
