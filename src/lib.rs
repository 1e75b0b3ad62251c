//! Overrun — a horde-survival arcade core built on Bevy and Rapier2D.
//!
//! The player avatar holds a fixed arena while enemies stream in from just
//! outside the viewport edges, faster and more numerous with every timed
//! phase, until the horde finally gets through.

pub mod combat;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod menu;
pub mod player;
pub mod rendering;
pub mod session;
pub mod waves;
