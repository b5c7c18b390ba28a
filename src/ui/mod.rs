//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and verbosity
//! - [`prompts`] - Interactive confirmations
//! - [`render`] - Plain-text view of a document
//!
//! # Design
//!
//! The UI layer handles all direct user interaction. Core and engine
//! modules never print; they return values and log through `log`.

pub mod output;
pub mod prompts;
pub mod render;
