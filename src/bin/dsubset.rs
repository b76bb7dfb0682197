//! Create demo subsets of NumPy datasets.
//!
//! Either from a JSON plan:
//!
//! ```text
//! dsubset --config plan.json [--samples 150] [--strict]
//! ```
//!
//! or for a single file:
//!
//! ```text
//! dsubset --samples 150 input.npy demo/output.npy
//! ```
use std::path::PathBuf;

#[macro_use]
extern crate anyhow;

use clap::Parser;
use demoset::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opt {
    /// JSON plan with `sample_count` and `items`.
    #[arg(short, long, conflicts_with_all = ["input", "output"])]
    config: Option<PathBuf>,

    /// Number of samples to keep (overrides `sample_count` of the plan).
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Fail a dataset when it has fewer samples than requested, instead of using all of them.
    #[arg(long)]
    strict: bool,

    /// Input `.npy` file.
    #[arg(requires = "output")]
    input: Option<PathBuf>,

    /// Output `.npy` file.
    output: Option<PathBuf>,
}

impl Opt {
    fn configuration(&self) -> Result<Configuration, anyhow::Error> {
        let mut c = match (&self.config, &self.input, &self.output) {
            (Some(plan), _, _) => Configuration::from_path(plan)?,
            (None, Some(input), Some(output)) => {
                let n = self
                    .samples
                    .ok_or_else(|| anyhow!("--samples is required without --config"))?;
                Configuration::new(n, vec![ProcessingItem::new("", input, output)])?
            }
            _ => bail!("either --config or INPUT and OUTPUT must be given"),
        };

        if let Some(n) = self.samples {
            c.sample_count = n;
        }
        if self.strict {
            c.on_overflow = Overflow::Error;
        }
        c.validate()?;

        Ok(c)
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::parse();
    let c = opt.configuration()?;

    let report = run(&c);

    ensure!(
        report.success(),
        "{} of {} datasets failed",
        report.failed,
        report.total()
    );

    Ok(())
}
