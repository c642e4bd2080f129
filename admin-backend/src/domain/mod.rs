// src/domain/mod.rs
pub mod dept_model;
pub mod log_model;
pub mod option_model;
pub mod status;
pub mod user_model;
