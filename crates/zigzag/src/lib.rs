//! ZigZag: connect the numbered dots in ascending order with a single drag,
//! without passing over any other dot.
//!
//! The game logic lives in [`tracker`]; [`app`] is the eframe host that feeds it
//! pointer events and draws the board.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod progress;
pub mod tracker;
