// src/common/normalize.rs

use serde_json::Value;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub const DEFAULT_COUNTRY_CODE: &str = "55";

/// Telefone já separado em DDI + número
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    pub country_code: String,
    pub number: String,
}

/// Classificação do documento apenas pelo tamanho (sem dígito verificador).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
    Unknown,
}

impl DocumentKind {
    pub fn from_digits(digits: &str) -> Self {
        match digits.len() {
            11 => DocumentKind::Cpf,
            14 => DocumentKind::Cnpj,
            _ => DocumentKind::Unknown,
        }
    }
}

/// "123.456.789-00" -> "12345678900"
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Remove espaços e separa o DDI.
/// - `+CC...`: os dois dígitos após o `+` são o DDI e saem do número
/// - `55...`: o prefixo literal sai do número
/// - qualquer outro: DDI padrão, número intacto
pub fn normalize_phone(raw: &str) -> PhoneNumber {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(rest) = compact.strip_prefix('+') {
        let country_code: String = rest.chars().take(2).collect();
        let number: String = rest.chars().skip(2).collect();
        return PhoneNumber { country_code, number };
    }

    if let Some(rest) = compact.strip_prefix(DEFAULT_COUNTRY_CODE) {
        return PhoneNumber {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            number: rest.to_string(),
        };
    }

    PhoneNumber {
        country_code: DEFAULT_COUNTRY_CODE.to_string(),
        number: compact,
    }
}

/// Chave comparável: sem acentos, minúscula, sem espaços nas pontas.
/// "  PAÍS " -> "pais"
pub fn fold_key(raw: &str) -> String {
    raw.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Representação textual de um escalar JSON (ids e respostas chegam
/// tanto como número quanto como string).
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
