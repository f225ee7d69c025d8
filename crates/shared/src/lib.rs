//! Shared configuration for Valuta.
//!
//! This crate provides the configuration types consumed by the core crate
//! and by the outer layers (persistence, web) that embed it:
//! - Application configuration loading with environment overrides
//! - Currency selection and display settings

pub mod config;

pub use config::{AppConfig, CurrencyConfig};
