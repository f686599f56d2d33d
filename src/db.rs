pub mod answer_repo;
pub use answer_repo::AnswerRepository;
pub mod candidate_repo;
pub use candidate_repo::CandidateRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod chat_stage_repo;
pub use chat_stage_repo::ChatStageRepository;
pub mod store;
pub use store::{IntakeStore, IntakeTransaction, PgIntakeStore};

#[cfg(test)]
pub mod memory_store;
