//! Process every item of a [Configuration] in order.
use crate::config::Configuration;
use crate::subset::{Outcome, Subsetter};

/// Number of items ending in each outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub sliced: usize,
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Report {
    pub fn add(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Sliced { .. } => self.sliced += 1,
            Outcome::Copied { .. } => self.copied += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.sliced + self.copied + self.skipped + self.failed
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Run the configuration. A failing item is logged and counted, it does not stop the
/// remaining items.
pub fn run(config: &Configuration) -> Report {
    info!("===== Creating demo datasets =====");
    info!(
        "Keeping {} samples of every dataset.",
        config.sample_count
    );

    let subsetter = Subsetter::new(config.on_overflow);
    let mut report = Report::default();

    for item in &config.items {
        if !item.description.is_empty() {
            info!("{}", item.description);
        }

        let outcome = subsetter.process(&item.input, &item.output, config.sample_count);
        debug!("{}: {:?}", item.input.display(), outcome);

        report.add(&outcome);
    }

    info!(
        "===== Done: {} sliced, {} copied, {} skipped, {} failed =====",
        report.sliced, report.copied, report.skipped, report.failed
    );

    report
}
