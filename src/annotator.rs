//! End-to-end pipeline: read, classify, annotate, dispatch, write back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::annotate::annotate;
use crate::config::Config;
use crate::controller::ChamberClient;
use crate::filament::FilamentProfile;

/// What one run did, for the summary line.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub profile: FilamentProfile,
    /// Controller commands the annotation produced.
    pub effects: usize,
    /// How many of them the controller acknowledged.
    pub delivered: usize,
}

/// One-shot annotator for a single G-code file.
pub struct GCodeAnnotator {
    config: Config,
}

impl GCodeAnnotator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Process `path` in place. The file is rewritten even when every
    /// controller send fails; read or write errors propagate.
    pub fn run(&self, path: &Path) -> Result<RunSummary> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let lines: Vec<&str> = content.split_inclusive('\n').collect();

        let profile = FilamentProfile::detect(&lines);
        log::info!(
            "detected filament {} (chamber {}°C)",
            profile.filament,
            profile.chamber_temp_c
        );

        let annotation = annotate(&lines, &profile, &self.config.controller_host);

        let client = ChamberClient::new(&self.config);
        let effects = annotation.effects.len();
        let delivered = client.dispatch(&annotation.effects);
        if delivered < effects {
            log::warn!("delivered {}/{} controller commands", delivered, effects);
        }

        fs::write(path, annotation.into_content())
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(RunSummary {
            profile,
            effects,
            delivered,
        })
    }
}
