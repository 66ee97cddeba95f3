// Ordering Service Library
//
// This library provides the HTTP API for the restaurant ordering
// service. It exposes REST endpoints for menu dishes and customer
// orders over in-memory record stores.

pub mod api;
pub mod config;
pub mod types;
