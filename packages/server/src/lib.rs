//! Real-time message relay library.
//!
//! Clients connect over WebSocket, submit text messages tagged with a display
//! name, and receive recent history on join followed by a live stream of every
//! message relayed by the server.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
