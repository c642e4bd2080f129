// src/service/mod.rs
pub mod dept_service;
pub mod dept_tree;
pub mod log_service;
pub mod option_service;
