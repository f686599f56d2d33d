// src/config.rs

use std::{collections::HashSet, env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::db_utils::TenantResolver,
    db::{IntakeStore, PgIntakeStore},
    services::{
        application_service::ApplicationService, catalog_service::CatalogService,
        conversation_service::ConversationService,
    },
};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuração lida do ambiente (.env é opcional)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub max_connections: u32,
    pub allowed_tenants: Option<HashSet<String>>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {}", raw))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let allowed_tenants = env::var("ALLOWED_TENANTS").ok().map(|raw| parse_tenant_list(&raw));

        Ok(Self {
            database_url: normalize_database_url(&database_url),
            bind_address,
            max_connections,
            allowed_tenants,
        })
    }
}

// Heroku/Railway ainda entregam o prefixo antigo
fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{}", rest),
        None => url.to_string(),
    }
}

fn parse_tenant_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub tenants: TenantResolver,
    pub application_service: ApplicationService,
    pub conversation_service: ConversationService,
    pub catalog_service: CatalogService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&settings.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let store: Arc<dyn IntakeStore> = Arc::new(PgIntakeStore::new(db_pool));

        Ok(Self::from_store(
            store,
            TenantResolver::new(settings.allowed_tenants.clone()),
        ))
    }

    pub fn from_store(store: Arc<dyn IntakeStore>, tenants: TenantResolver) -> Self {
        Self {
            tenants,
            application_service: ApplicationService::new(store.clone()),
            conversation_service: ConversationService::new(store.clone()),
            catalog_service: CatalogService::new(store),
        }
    }
}
