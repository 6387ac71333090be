//! clipforge library crate
//!
//! Content generation workflows on top of the hosted Gemini API, and the
//! PCM to WAV pipeline for generated speech. The binary is in main.rs.

#[macro_use]
extern crate log;

pub mod audio;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod gemini;
pub mod prompts;
pub mod session;
pub mod studio;
