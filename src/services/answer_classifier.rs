// src/services/answer_classifier.rs

use serde_json::Value;
use thiserror::Error;

use crate::{
    common::normalize::scalar_to_string,
    models::{
        application::ClassifiedAnswer,
        question::{AnswerOption, AnswerType, Question},
    },
};

/// Motivos para uma resposta não ser gravada. Não interrompem o lote:
/// são coletados e devolvidos junto com o resultado.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationWarning {
    #[error("tipo de resposta não reconhecido: {0:?}")]
    UnrecognizedAnswerType(Option<String>),

    #[error("nenhuma opção corresponde à resposta '{0}'")]
    NoMatchingOption(String),

    #[error("pergunta sem identificador")]
    MissingQuestionId,

    #[error("identificador não numérico: '{0}'")]
    NonNumericIdentifier(String),
}

/// Decide como a resposta de uma pergunta deve ser persistida.
pub fn classify(question: &Question) -> Result<ClassifiedAnswer, ClassificationWarning> {
    let answer = answer_text(question.user_answer.as_ref());

    match question.answer_kind() {
        Some(AnswerType::Text) => Ok(ClassifiedAnswer::Text(answer)),
        Some(AnswerType::Options) => resolve_option(question.options(), &answer)
            .map(ClassifiedAnswer::Alternative)
            .ok_or(ClassificationWarning::NoMatchingOption(answer)),
        None => Err(ClassificationWarning::UnrecognizedAnswerType(
            question.answer_type.clone(),
        )),
    }
}

/// Procura a alternativa primeiro pelo identificador, depois pelo rótulo
/// (sem diferenciar maiúsculas). Devolve o identificador da alternativa.
pub fn resolve_option(options: &[AnswerOption], answer: &str) -> Option<String> {
    let wanted = answer.trim();
    if wanted.is_empty() {
        return None;
    }

    let option_ids = options
        .iter()
        .filter_map(|o| o.option_id.as_ref().and_then(scalar_to_string).map(|id| (o, id)));

    let by_id = option_ids.clone().find(|(_, id)| id.trim() == wanted);
    if let Some((_, id)) = by_id {
        return Some(id.trim().to_string());
    }

    let wanted_label = wanted.to_lowercase();
    option_ids
        .filter(|(o, _)| {
            o.label
                .as_deref()
                .is_some_and(|label| label.trim().to_lowercase() == wanted_label)
        })
        .map(|(_, id)| id.trim().to_string())
        .next()
}

// Resposta ausente vira string vazia; números/booleanos viram o texto JSON.
fn answer_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(other) => scalar_to_string(other).unwrap_or_else(|| other.to_string()),
    }
}

/// Converte um identificador (pergunta ou alternativa) para a coluna inteira.
pub fn numeric_id(raw: &str) -> Result<i64, ClassificationWarning> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ClassificationWarning::NonNumericIdentifier(raw.to_string()))
}
