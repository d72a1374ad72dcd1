//! Autonomous snake on a toroidal grid.
//!
//! The simulation core lives in [`cell`], [`grid`] and [`game`]; [`driver`]
//! runs it against a [`driver::Frontend`], and [`terminal_runtime`] provides
//! the full-screen one.

pub mod cell;
pub mod config;
pub mod direction;
pub mod driver;
pub mod error;
pub mod game;
pub mod grid;
pub mod platform;
pub mod renderer;
pub mod snapshot;
pub mod terminal_runtime;
