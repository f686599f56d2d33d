// src/models/question.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    // Campo fixo de cadastro
    Basic,
    // Pergunta específica da vaga
    Customized,
    #[serde(other)]
    Unknown,
}

/// Como a resposta é persistida. O valor chega como texto livre no payload,
/// por isso a conversão é feita sob demanda em `Question::answer_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerType {
    Text,
    Options,
}

impl AnswerType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "text" => Some(AnswerType::Text),
            "options" => Some(AnswerType::Options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerType::Text => "text",
            AnswerType::Options => "options",
        }
    }
}

// --- OPÇÕES ---

/// Alternativa de uma pergunta de múltipla escolha.
/// Aceita os dois formatos históricos:
/// `{ "option": "Sim", "option_id": 1 }` e `{ "desc"|"option_name": "Sim", "opcao": 1 }`.
/// Sempre serializa no primeiro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnswerOption {
    #[serde(rename = "option", alias = "desc", alias = "option_name", default)]
    #[schema(example = "Sim")]
    pub label: Option<String>,

    #[serde(alias = "opcao", default)]
    #[schema(value_type = Option<Object>, example = 1)]
    pub option_id: Option<Value>,
}

// --- PERGUNTA ---

/// Pergunta semi-estruturada, como vive em `context.steps.questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    #[serde(default)]
    #[schema(value_type = Option<Object>, example = 1)]
    pub id: Option<Value>,

    #[serde(default)]
    #[schema(example = "nome")]
    pub key: Option<String>,

    #[serde(default)]
    #[schema(example = "Qual é o seu nome completo?")]
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    #[schema(value_type = Option<String>, example = "basic")]
    pub question_type: Option<QuestionType>,

    #[serde(default)]
    #[schema(example = "text")]
    pub answer_type: Option<String>,

    #[serde(default)]
    #[schema(value_type = Option<Object>, example = "Ana Souza")]
    pub user_answer: Option<Value>,

    #[serde(default)]
    pub answer_options: Option<Vec<AnswerOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub sequence: Option<i32>,
}

impl Question {
    pub fn answer_kind(&self) -> Option<AnswerType> {
        self.answer_type.as_deref().and_then(AnswerType::parse)
    }

    pub fn options(&self) -> &[AnswerOption] {
        self.answer_options.as_deref().unwrap_or(&[])
    }
}
