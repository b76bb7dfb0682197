//! Create the demo subset of a single dataset file.
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::npy::{fmt_shape, Header, NpyArray};

/// What to do when more samples are requested than a dataset holds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Warn and use all available samples.
    #[default]
    Clamp,
    /// Fail the item.
    Error,
}

/// Reason an item was skipped without producing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    MissingInput,
    UnsupportedDimension(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A 3-D dataset was truncated along the sample axis.
    Sliced { shape: Vec<usize>, clamped: bool },
    /// A 2-D metadata array was copied verbatim.
    Copied { bytes: u64 },
    Skipped(Skip),
    /// Processing failed, with the error and its causes.
    Failed(String),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Subsetter {
    pub on_overflow: Overflow,
}

impl Subsetter {
    pub fn new(on_overflow: Overflow) -> Subsetter {
        Subsetter { on_overflow }
    }

    /// Create the demo subset of `input` at `output`, keeping `num_samples` samples of 3-D
    /// datasets and copying 2-D datasets.
    ///
    /// Never fails: errors are logged and returned as [Outcome::Failed] so that a batch can
    /// carry on with the next file.
    pub fn process<P, Q>(&self, input: P, output: Q, num_samples: usize) -> Outcome
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output = output.as_ref();

        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());

        info!("--- Processing: {name} ---");

        let outcome = self
            .try_process(input, output, num_samples)
            .unwrap_or_else(|e| {
                error!("Failed to process {}: {e:#}", input.display());
                Outcome::Failed(format!("{e:#}"))
            });

        info!("{}", "-".repeat(name.chars().count() + 20));

        outcome
    }

    /// Like [Subsetter::process], but returns errors to the caller.
    pub fn try_process<P, Q>(
        &self,
        input: P,
        output: Q,
        num_samples: usize,
    ) -> Result<Outcome, anyhow::Error>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.is_file() {
            error!("Input file does not exist, skipping: {}", input.display());
            return Ok(Outcome::Skipped(Skip::MissingInput));
        }

        if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("creating output directory {}", dir.display()))?;
                info!("Created output directory: {}", dir.display());
            }
        }

        ensure!(
            !same_file(input, output),
            "input and output are the same file: {}",
            input.display()
        );

        info!("Loading data from {}..", input.display());
        let header = Header::from_path(input)?;
        let len = fs::metadata(input)?.len();
        header
            .check_len(len)
            .with_context(|| format!("reading {}", input.display()))?;

        info!("Original shape: {}", fmt_shape(&header.shape));
        debug!(
            "dtype: {} ({:?}, byte order: {:?}), fortran order: {}, data offset: {}",
            header.descr, header.dtype, header.order, header.fortran_order, header.data_offset
        );

        match header.ndim() {
            3 => self.slice(input, output, &header, num_samples),
            2 => {
                info!("Detected 2D metadata, copying file.");
                let bytes = fs::copy(input, output).with_context(|| {
                    format!("copying {} to {}", input.display(), output.display())
                })?;
                info!("Copied metadata to: {}", output.display());

                Ok(Outcome::Copied { bytes })
            }
            n => {
                warn!("Unsupported number of dimensions ({n}), skipping file.");
                Ok(Outcome::Skipped(Skip::UnsupportedDimension(n)))
            }
        }
    }

    fn slice(
        &self,
        input: &Path,
        output: &Path,
        header: &Header,
        num_samples: usize,
    ) -> Result<Outcome, anyhow::Error> {
        let total = header.shape[0];
        let clamped = num_samples > total;

        let n = if clamped {
            match self.on_overflow {
                Overflow::Clamp => {
                    warn!(
                        "Requested number of samples ({num_samples}) exceeds the number of samples in the file ({total}), using all available samples."
                    );
                    total
                }
                Overflow::Error => bail!(
                    "requested number of samples ({num_samples}) exceeds the number of samples in {} ({total})",
                    input.display()
                ),
            }
        } else {
            num_samples
        };

        let array = NpyArray::read(input, header)
            .with_context(|| format!("loading {}", input.display()))?;

        let shape = array
            .write_leading(n, output)
            .with_context(|| format!("writing {}", output.display()))?;

        info!("Kept the first {n} samples.");
        info!("New demo shape: {}", fmt_shape(&shape));
        info!("Saved demo file to: {}", output.display());

        Ok(Outcome::Sliced { shape, clamped })
    }
}

/// Create the demo subset of `input` at `output`, clamping `num_samples` to the available
/// samples. See [Subsetter::process].
pub fn process<P, Q>(input: P, output: Q, num_samples: usize) -> Outcome
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    Subsetter::default().process(input, output, num_samples)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
