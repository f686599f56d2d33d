use serde::Deserialize;

pub mod applications;
pub mod catalog;
pub mod conversation;

/// `?tenant=acme`
#[derive(Debug, Deserialize)]
pub struct TenantQuery {
    pub tenant: String,
}
