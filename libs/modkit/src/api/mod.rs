//! HTTP API helpers shared by modules.

pub mod problem;

pub use problem::{FieldError, Problem, PROBLEM_CONTENT_TYPE};
