//! Terminal dashboard for maritime shipping risk.
//!
//! A Braille world map shows key risk chokepoints and major ports; focusing
//! a risk draws its affected shipping corridors.

pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod map;
pub mod risk;
pub mod ui;
