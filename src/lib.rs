//! Toroidal Snake: a deterministic tick-driven simulation engine plus the
//! terminal front end that schedules, steers, scores and draws it.
//!
//! The engine ([`game::GameState`]) has no dependency on timers or the
//! terminal; [`session::Session`] wires it to a [`scheduler::Scheduler`] and a
//! [`score::ScoreStore`].

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
