//! Org-chart hierarchy engine.
//!
//! A single Manager → Lead → Member tree, edited through gated operations and
//! tracked by a linear undo/redo history. See [`app::OrgChart`] for the
//! entry point that ties the pieces together.

pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod history;
pub mod models;
pub mod render;
pub mod seed;
pub mod session;
