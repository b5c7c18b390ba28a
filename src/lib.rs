//! Tierlist - ranking documents with drag-and-drop placement
//!
//! A tierlist is a titled document of ordered rows plus an untiered pool,
//! each holding image items. This crate is the editor core behind the `tl`
//! binary: the document model, its JSON wire format, the drag-and-drop
//! placement engine, remote import, and batch tools that rewrite files in
//! place.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Drag controller, placement rules and editing sessions
//! - [`core`] - Domain types, the document model, wire format, storage, config
//! - [`remote`] - Fetching documents and images over HTTP
//! - [`tools`] - Batch edits: dedupe and image append
//! - [`ui`] - Terminal output, rendering and prompts
//!
//! # Invariants
//!
//! 1. Every item lives in exactly one container
//! 2. Drag operations never change the number of items, except dropping on trash
//! 3. A failed load or import leaves the current document untouched

pub mod cli;
pub mod core;
pub mod engine;
pub mod remote;
pub mod tools;
pub mod ui;
