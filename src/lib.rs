//! storygen - preference-driven story generation
//!
//! The `storygen` binary is a terminal form that collects story preferences
//! and a prompt; `storygen-relay` turns each submission into one instruction
//! for a generative model and relays the text back.

pub mod analytics;
pub mod api;
pub mod app;
pub mod config;
pub mod events;
pub mod models;
pub mod preferences;
pub mod prompt;
pub mod server;
pub mod ui;
