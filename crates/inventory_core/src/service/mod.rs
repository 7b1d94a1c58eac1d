//! Core use-case services.
//!
//! # Responsibility
//! - Give presentation callers one entry point over all repositories.
//! - Keep UI layers decoupled from storage details.

pub mod inventory_service;
