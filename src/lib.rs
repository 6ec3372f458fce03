//! G-code chamber-control annotator
//!
//! Post-processes slicer-emitted G-code for an external chamber controller
//! (heater, LEDs, exhaust fan) reachable over HTTP.
//!
//! This library provides:
//! - Filament classification from slicer comments
//! - The annotation pass (pure text transformation, effects as data)
//! - A best-effort blocking HTTP client for the controller
//! - Configuration management

pub mod annotate;
pub mod annotator;
pub mod config;
pub mod controller;
pub mod filament;

// Re-exports for clean public API
pub use annotate::{Annotation, Effect, annotate};
pub use annotator::{GCodeAnnotator, RunSummary};
pub use config::Config;
pub use controller::{ChamberClient, ChamberCommand};
pub use filament::{FilamentProfile, FilamentType};
