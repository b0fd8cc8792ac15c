//! Evaluate command implementation

use super::Context;
use crate::error::Result;
use crate::output;
use bookmatch::recommend::ClassifierTarget;
use clap::ValueEnum;

/// Command-line spelling of [`ClassifierTarget`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    /// Derived reader label
    Label,
    /// Book title
    Title,
}

impl From<Target> for ClassifierTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Label => Self::Label,
            Target::Title => Self::Title,
        }
    }
}

pub(crate) fn run(ctx: &Context, target: Target, json: bool) -> Result<()> {
    let report = ctx.recommender.evaluate(&ctx.catalog, target.into())?;

    if json {
        return output::json(&report);
    }

    let evaluation = &ctx.recommender.config().evaluation;
    output::section("Decision Tree Evaluation");
    output::kv("Target", report.target);
    output::kv("Accuracy", output::format_percent(report.accuracy));
    output::kv("Train records", report.n_train);
    output::kv("Test records", report.n_test);
    output::kv("Test size", evaluation.test_size);
    match evaluation.random_state {
        Some(seed) => output::kv("Seed", seed),
        None => output::kv("Seed", "random"),
    }
    if report.target == ClassifierTarget::Title {
        output::warning("held-out titles never appear in training, so title accuracy is always 0");
    }
    Ok(())
}
