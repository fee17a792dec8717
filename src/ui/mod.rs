//! Terminal widgets drawn around and on top of the board.

pub mod hud;
pub mod menu;
