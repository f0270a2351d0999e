// src/lib.rs
// Cable finder and order status assistant

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod agent;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod llm;
pub mod orders;
pub mod search;
pub mod tools;
pub mod web;

pub use error::{AssistError, Result};
