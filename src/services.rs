pub mod answer_classifier;
pub mod application_service;
pub mod catalog_service;
pub mod conversation_service;
