// src/api/handlers/mod.rs
pub mod dept_handler;
pub mod log_handler;
pub mod option_handler;
pub mod system_handler;
