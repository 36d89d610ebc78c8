//! # IO Module
//!
//! Interface layer between the dashboard and the domain logic. Translates
//! HTTP requests into domain commands and domain results into wire DTOs
//! from the `shared` crate.

pub mod rest;
