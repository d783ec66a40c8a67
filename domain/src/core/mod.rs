//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: evaluator contract violations and invalid configuration
//! - [`string`]: small text helpers used when composing responses

pub mod error;
pub mod string;
