// src/services/mod.rs
pub mod metrics_manager;
pub mod responder;
pub mod session_manager;
