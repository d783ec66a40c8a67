//! Progress reporting while a deliberation runs

pub mod reporter;
