//! Rendezvous prompt engine.
//!
//! Turns a reusable date-experience template plus loosely-structured request
//! data into a single prompt payload for a generative model, and offers the
//! template validation, ranking and analytics operations around it.

pub mod analytics;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod context;
pub mod engine;
pub mod errors;
pub mod generation;
pub mod models;
pub mod request_file;
pub mod store;

pub use engine::PromptEngine;
