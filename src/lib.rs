//! Astrowheel: natal chart wheel and planetary ephemeris graph rendering
//!
//! This crate draws the classic circular horoscope wheel (planet glyphs,
//! zodiac sign divisions, house cusps, aspect lines) and a longitude-vs-time
//! ephemeris graph with hover hit-testing. The heavy ephemeris math
//! (Julian-day conversion, planetary positions, house cusps) is consumed
//! through a narrow adapter interface; a deterministic synthetic engine is
//! included for offline use and testing.

use thiserror::Error;

pub mod aspects;
pub mod canvas;
pub mod chart;
pub mod ephemeris;
pub mod ephgraph;
pub mod localtime;
pub mod prefs;
pub mod projection;
pub mod report;
pub mod viewer;
pub mod zodiac;

// Re-export commonly used types
pub use aspects::Aspect;
pub use chart::{Chart, ChartConfig, ChartPatch};
pub use ephemeris::{EphemerisAdapter, HouseSystem, SyntheticEphemeris};
pub use ephgraph::{EphGraph, GraphConfig, GraphPatch};
pub use viewer::{RenderMode, Viewer, ViewerPatch};
pub use zodiac::{Dignity, Planet, Sign};

/// Main error type for the astrowheel library
#[derive(Debug, Error)]
pub enum AstrowheelError {
    #[error("Ephemeris error: {0}")]
    Ephemeris(#[from] ephemeris::EphemerisError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No computed position for {0}")]
    MissingPosition(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for astrowheel operations
pub type Result<T> = std::result::Result<T, AstrowheelError>;
