// src/services/catalog_service.rs

use std::sync::Arc;

use serde_json::Value;

use crate::{
    common::{db_utils::TenantSchema, error::AppError, normalize::fold_key},
    db::IntakeStore,
    models::{
        catalog::{QuestionCatalog, RegistrationField, SourceOption},
        question::{AnswerOption, AnswerType, Question, QuestionType},
    },
};

// Chaves geográficas que nunca viram pergunta (comparadas já normalizadas)
const IGNORED_KEYS: &[&str] = &["pais", "country", "estado", "state", "uf"];

// A única pergunta cujas opções vêm do banco
const SOURCE_KEY: &str = "source";

// Dicionário: chave normalizada -> (pergunta, tipo de resposta)
const QUESTION_DICTIONARY: &[(&str, &str, AnswerType)] = &[
    ("nome", "Qual é o seu nome completo?", AnswerType::Text),
    ("name", "Qual é o seu nome completo?", AnswerType::Text),
    ("email", "Qual é o seu e-mail?", AnswerType::Text),
    ("e-mail", "Qual é o seu e-mail?", AnswerType::Text),
    ("telefone", "Qual é o seu telefone com DDD?", AnswerType::Text),
    ("celular", "Qual é o seu telefone com DDD?", AnswerType::Text),
    ("phone", "Qual é o seu telefone com DDD?", AnswerType::Text),
    ("cpf", "Qual é o seu CPF?", AnswerType::Text),
    ("documento", "Qual é o seu CPF?", AnswerType::Text),
    ("document", "Qual é o seu CPF?", AnswerType::Text),
    ("data de nascimento", "Qual é a sua data de nascimento?", AnswerType::Text),
    ("data_nascimento", "Qual é a sua data de nascimento?", AnswerType::Text),
    ("birth_date", "Qual é a sua data de nascimento?", AnswerType::Text),
    ("cidade", "Em qual cidade você mora?", AnswerType::Text),
    ("city", "Em qual cidade você mora?", AnswerType::Text),
    ("endereco", "Qual é o seu endereço?", AnswerType::Text),
    ("address", "Qual é o seu endereço?", AnswerType::Text),
    ("linkedin", "Qual é o link do seu perfil no LinkedIn?", AnswerType::Text),
    ("pretensao salarial", "Qual é a sua pretensão salarial?", AnswerType::Text),
    ("salary_expectation", "Qual é a sua pretensão salarial?", AnswerType::Text),
    ("escolaridade", "Qual é a sua escolaridade?", AnswerType::Text),
    ("education", "Qual é a sua escolaridade?", AnswerType::Text),
    (SOURCE_KEY, "Como você ficou sabendo da vaga?", AnswerType::Options),
];

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn IntakeStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn IntakeStore>) -> Self {
        Self { store }
    }

    /// Monta a lista ordenada de perguntas básicas do tenant.
    pub async fn build_catalog(&self, tenant: &TenantSchema) -> Result<QuestionCatalog, AppError> {
        let fields = self.store.list_registration_fields(tenant).await?;

        // Só consulta as origens se algum campo precisar delas
        let needs_sources = fields.iter().any(|f| fold_key(&f.key) == SOURCE_KEY);
        let sources = if needs_sources {
            self.store.list_source_options(tenant).await?
        } else {
            Vec::new()
        };

        let catalog = assemble_catalog(&fields, &sources);
        tracing::debug!(tenant = %tenant, total = catalog.total_questions, "Catálogo montado");
        Ok(catalog)
    }
}

/// Filtra, traduz e numera os campos de cadastro. Campos sem entrada no
/// dicionário são descartados em silêncio.
pub fn assemble_catalog(fields: &[RegistrationField], sources: &[SourceOption]) -> QuestionCatalog {
    let questions: Vec<Question> = fields
        .iter()
        .filter_map(|field| {
            let key = fold_key(&field.key);
            if IGNORED_KEYS.contains(&key.as_str()) {
                return None;
            }
            let (_, label, answer_type) =
                QUESTION_DICTIONARY.iter().find(|(entry, _, _)| *entry == key)?;

            let answer_options = (key == SOURCE_KEY).then(|| {
                sources
                    .iter()
                    .map(|s| AnswerOption {
                        label: Some(s.name.clone()),
                        option_id: Some(Value::from(s.id)),
                    })
                    .collect()
            });

            Some(Question {
                id: None,
                key: Some(field.key.clone()),
                name: Some(label.to_string()),
                question_type: Some(QuestionType::Basic),
                answer_type: Some(answer_type.as_str().to_string()),
                user_answer: None,
                answer_options,
                sequence: None,
            })
        })
        .zip(1..)
        .map(|(question, sequence)| Question { sequence: Some(sequence), ..question })
        .collect();

    QuestionCatalog {
        total_questions: questions.len(),
        questions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::MemoryStore;

    fn field(id: i64, key: &str) -> RegistrationField {
        RegistrationField { id, key: key.to_string() }
    }

    fn source(id: i64, name: &str, sequence: i32) -> SourceOption {
        SourceOption { id, name: name.to_string(), sequence }
    }

    #[test]
    fn geography_keys_are_ignored_regardless_of_accent_and_case() {
        let fields = [
            field(1, "País"),
            field(2, "pais"),
            field(3, "PAÍS"),
            field(4, " Estado "),
            field(5, "UF"),
            field(6, "nome"),
        ];

        let catalog = assemble_catalog(&fields, &[]);

        assert_eq!(catalog.total_questions, 1);
        assert_eq!(catalog.questions[0].key.as_deref(), Some("nome"));
    }

    #[test]
    fn unknown_fields_are_dropped_and_sequence_stays_dense() {
        let fields = [
            field(1, "Nome"),
            field(2, "cor favorita"),
            field(3, "E-mail"),
            field(4, "Pretensão Salarial"),
        ];

        let catalog = assemble_catalog(&fields, &[]);

        let sequences: Vec<_> = catalog.questions.iter().map(|q| q.sequence).collect();
        assert_eq!(sequences, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(catalog.questions[1].name.as_deref(), Some("Qual é o seu e-mail?"));
        assert_eq!(catalog.questions[2].answer_type.as_deref(), Some("text"));
        assert_eq!(catalog.questions[0].question_type, Some(QuestionType::Basic));
        assert!(catalog.questions[0].answer_options.is_none());
    }

    #[test]
    fn source_question_carries_options() {
        let catalog = assemble_catalog(
            &[field(1, "source")],
            &[source(5, "LinkedIn", 1), source(9, "Indicação", 2)],
        );

        let question = &catalog.questions[0];
        assert_eq!(question.answer_type.as_deref(), Some("options"));
        let options = question.options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label.as_deref(), Some("LinkedIn"));
        assert_eq!(options[1].option_id, Some(Value::from(9)));
    }

    #[tokio::test]
    async fn build_catalog_orders_sources_by_sequence() {
        let store = MemoryStore::new();
        store
            .seed_catalog(
                "acme",
                vec![field(1, "nome"), field(2, "país"), field(3, "Source")],
                vec![source(7, "Site", 3), source(8, "LinkedIn", 1), source(9, "Indicação", 2)],
            )
            .await;
        let service = CatalogService::new(Arc::new(store));

        let catalog = service
            .build_catalog(&TenantSchema::parse("acme").unwrap())
            .await
            .unwrap();

        assert_eq!(catalog.total_questions, 2);
        let labels: Vec<_> = catalog.questions[1]
            .options()
            .iter()
            .filter_map(|o| o.label.clone())
            .collect();
        assert_eq!(labels, vec!["LinkedIn", "Indicação", "Site"]);
    }
}
