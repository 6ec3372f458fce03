//! Filament classification from slicer comments.
//!
//! Slicers (PrusaSlicer, SuperSlicer, OrcaSlicer) embed their settings as
//! `; filament_type = ABS` comments near the top of the emitted G-code. The
//! detection here is deliberately loose: case-insensitive substring matching
//! over a bounded window of leading lines, no comment-aware parsing.

use std::fmt;

/// How many leading lines are searched for a filament marker.
pub const FILAMENT_SCAN_WINDOW: usize = 100;

/// The lowercase marker substring a line must contain to qualify.
const FILAMENT_MARKER: &str = "filament_type";

/// Filament material classes the chamber controller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilamentType {
    #[default]
    Pla,
    Abs,
    Petg,
    Nylon,
}

impl FilamentType {
    /// Fixed chamber target for the material, in °C. PLA prints open-chamber.
    pub fn chamber_temp_c(self) -> u16 {
        match self {
            FilamentType::Pla => 0,
            FilamentType::Abs => 50,
            FilamentType::Petg => 35,
            FilamentType::Nylon => 55,
        }
    }
}

impl fmt::Display for FilamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilamentType::Pla => "PLA",
            FilamentType::Abs => "ABS",
            FilamentType::Petg => "PETG",
            FilamentType::Nylon => "NYLON",
        };
        f.write_str(name)
    }
}

/// Filament type plus derived chamber target, fixed for the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilamentProfile {
    pub filament: FilamentType,
    pub chamber_temp_c: u16,
}

impl Default for FilamentProfile {
    fn default() -> Self {
        Self::for_filament(FilamentType::Pla)
    }
}

impl FilamentProfile {
    pub fn for_filament(filament: FilamentType) -> Self {
        Self {
            filament,
            chamber_temp_c: filament.chamber_temp_c(),
        }
    }

    /// Scan the first [`FILAMENT_SCAN_WINDOW`] lines for a filament marker.
    pub fn detect(lines: &[&str]) -> Self {
        Self::detect_within(lines, FILAMENT_SCAN_WINDOW)
    }

    /// Windowed scan. The scan runs the whole window without stopping at the
    /// first hit, so a later marker line overwrites an earlier assignment. A
    /// marker line naming no known material leaves the profile as-is.
    pub fn detect_within(lines: &[&str], window: usize) -> Self {
        let mut profile = Self::default();

        for line in lines.iter().take(window) {
            if !line.to_lowercase().contains(FILAMENT_MARKER) {
                continue;
            }
            let upper = line.to_uppercase();
            if upper.contains("ABS") || upper.contains("ASA") {
                profile = Self::for_filament(FilamentType::Abs);
            } else if upper.contains("PETG") {
                profile = Self::for_filament(FilamentType::Petg);
            } else if upper.contains("NYLON") || upper.contains("PA") {
                profile = Self::for_filament(FilamentType::Nylon);
            }
        }

        profile
    }
}
