//! HTTP/JSON API server for the recetario recipe service.
//!
//! Exposes recipe and ingredient management plus batch-size scaling over a
//! small REST surface, and serves the single-page frontend (one HTML entry
//! document and a directory of static assets). This crate contains the
//! server framework, API schema types, error handling, and route
//! definitions; all business logic lives in `recetario-storage`.

pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
