//! The plan of a run: which files to subset and how many samples to keep.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::subset::Overflow;

/// A single file to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingItem {
    /// Human readable label, only used for logging.
    #[serde(default)]
    pub description: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ProcessingItem {
    pub fn new<D, P, Q>(description: D, input: P, output: Q) -> ProcessingItem
    where
        D: Into<String>,
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
    {
        ProcessingItem {
            description: description.into(),
            input: input.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Number of samples to keep from every 3-D dataset.
    pub sample_count: usize,

    #[serde(default)]
    pub on_overflow: Overflow,

    pub items: Vec<ProcessingItem>,
}

impl Configuration {
    pub fn new(sample_count: usize, items: Vec<ProcessingItem>) -> Result<Configuration, anyhow::Error> {
        let c = Configuration {
            sample_count,
            on_overflow: Overflow::default(),
            items,
        };
        c.validate()?;

        Ok(c)
    }

    #[must_use]
    pub fn with_overflow(mut self, on_overflow: Overflow) -> Configuration {
        self.on_overflow = on_overflow;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_path<P>(path: P) -> Result<Configuration, anyhow::Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("reading configuration {}", path.display()))?;

        Configuration::from_json(&s)
            .with_context(|| format!("parsing configuration {}", path.display()))
    }

    pub fn from_json(s: &str) -> Result<Configuration, anyhow::Error> {
        let c: Configuration = serde_json::from_str(s)?;
        c.validate()?;

        Ok(c)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        ensure!(self.sample_count > 0, "sample_count must be positive");
        Ok(())
    }
}
