//! # ModKit - shared building blocks for service modules
//!
//! - **Contracts**: `RestfulModule` lets a module contribute routes and an
//!   OpenAPI fragment to the HTTP host.
//! - **Problem details**: RFC 9457 error bodies rendered as axum responses.
//! - **Runtime**: OS-signal shutdown waiter used by the server binary.

pub use anyhow::Result;

// Core module contracts and traits
pub mod contracts;
pub use crate::contracts::*;

pub mod api;
pub use api::problem::{FieldError, Problem, PROBLEM_CONTENT_TYPE};

pub mod runtime;
