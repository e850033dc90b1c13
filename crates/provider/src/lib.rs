//! Meshguard Terraform Provider
//!
//! Maps Terraform resource and data-source blocks onto the Meshguard
//! control plane REST API. The heart of the crate is the generic CRUD
//! dispatch in [`crud`]; everything under [`resources`] and [`data_sources`]
//! is thin wiring of typed payloads into those four dispatchers.

pub mod crud;
pub mod data_sources;
pub mod diag;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod state;
