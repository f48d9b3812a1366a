//! Core value types: coordinates, provider endpoints, and session state.

pub mod context;
pub mod endpoints;
pub mod geo;
