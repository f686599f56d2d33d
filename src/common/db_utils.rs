// src/common/db_utils.rs

use std::collections::HashSet;
use std::fmt;

use crate::common::error::AppError;

// Limite do Postgres para identificadores (NAMEDATALEN - 1)
const MAX_SCHEMA_LEN: usize = 63;

// ---
// Schema do tenant: a "chave" para as tabelas qualificadas
// ---
/// Nome de schema já validado. É o único valor que pode ser interpolado
/// em SQL, por isso só existe via `TenantSchema::parse`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantSchema(String);

impl TenantSchema {
    /// Aceita apenas `[a-z_][a-z0-9_]*`, até 63 caracteres.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(AppError::InvalidTenant("nome do tenant é obrigatório".into()));
        }
        if name.len() > MAX_SCHEMA_LEN {
            return Err(AppError::InvalidTenant(format!(
                "'{}' excede {} caracteres",
                name, MAX_SCHEMA_LEN
            )));
        }

        let mut chars = name.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
        let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if !first_ok || !rest_ok {
            return Err(AppError::InvalidTenant(format!(
                "'{}' contém caracteres não permitidos",
                name
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Referência qualificada para uma tabela do tenant: `"acme".candidate`
    pub fn table(&self, table: &str) -> String {
        format!("\"{}\".{}", self.0, table)
    }
}

impl fmt::Display for TenantSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Valida o nome do tenant e, se configurada, aplica a allow-list.
#[derive(Debug, Clone, Default)]
pub struct TenantResolver {
    allowed: Option<HashSet<String>>,
}

impl TenantResolver {
    pub fn new(allowed: Option<HashSet<String>>) -> Self {
        Self { allowed }
    }

    pub fn resolve(&self, raw: &str) -> Result<TenantSchema, AppError> {
        let schema = TenantSchema::parse(raw)?;

        if let Some(allowed) = &self.allowed {
            if !allowed.contains(schema.as_str()) {
                return Err(AppError::InvalidTenant(format!(
                    "'{}' não está na lista de tenants permitidos",
                    schema
                )));
            }
        }

        Ok(schema)
    }
}
