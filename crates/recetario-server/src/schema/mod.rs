//! API schema types for request definitions.
//!
//! Each sub-module defines the request types for one API domain. Responses
//! serialize the `recetario-storage` records directly, so only the inbound
//! shapes live here. Types use serde derives with lenient defaults: missing
//! fields become empty values and are rejected by store validation with a
//! user-facing message.

pub mod ingredients;
pub mod recipes;
