// src/middleware/mod.rs
pub mod operation_log;
