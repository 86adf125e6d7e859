//! Configuration, domain types and the service seams shared by the handlers

pub mod config;
pub mod dedup;
pub mod models;
pub mod services;

pub use services::{AgentServices, KnowledgeBase, ObjectStore};
