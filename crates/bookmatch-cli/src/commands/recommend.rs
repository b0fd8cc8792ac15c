//! Recommend command implementation

use super::Context;
use crate::error::{CliError, Result};
use crate::output;
use bookmatch::catalog::BookRecord;
use bookmatch::features::{
    FeatureSet, PreferenceVector, AGE, FICTION, MOOD, MYSTERY, NON_FICTION, ROMANCE, SCIFI,
};
use bookmatch::recommend::{CategoryLabel, RankedBook};
use bookmatch::BookmatchError;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

/// Preference flags for `recommend`.
#[derive(Args, Debug, Clone)]
pub(crate) struct RecommendArgs {
    /// Fiction rating (1-10)
    #[arg(long, default_value_t = 5.0)]
    fiction: f32,

    /// Mystery rating (1-10)
    #[arg(long, default_value_t = 5.0)]
    mystery: f32,

    /// Sci-fi rating (1-10)
    #[arg(long, default_value_t = 5.0)]
    scifi: f32,

    /// Romance rating (1-10)
    #[arg(long, default_value_t = 5.0)]
    romance: f32,

    /// Your age (5-100)
    #[arg(long, default_value_t = 25.0)]
    age: f32,

    /// Mood level (1-10)
    #[arg(long, default_value_t = 5.0)]
    mood: f32,

    /// Non-fiction rating (1-10)
    #[arg(long, default_value_t = 5.0)]
    nonfiction: f32,

    /// Comma-separated values in feature-set order; overrides the rating flags
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    values: Option<Vec<f32>>,

    /// Number of books to show
    #[arg(long, default_value = "5")]
    top: usize,
}

impl RecommendArgs {
    /// Builds the query, mapping named flags onto the feature set.
    fn query(&self, features: &FeatureSet) -> Result<PreferenceVector> {
        if let Some(values) = &self.values {
            return Ok(PreferenceVector::from_slice(values));
        }

        features
            .names()
            .map(|name| {
                self.flag(name).ok_or_else(|| {
                    CliError::InvalidArgument(format!(
                        "no flag for feature {name}; pass --values in feature-set order"
                    ))
                })
            })
            .collect::<Result<Vec<f32>>>()
            .map(PreferenceVector::new)
    }

    fn flag(&self, feature: &str) -> Option<f32> {
        match feature {
            FICTION => Some(self.fiction),
            MYSTERY => Some(self.mystery),
            SCIFI => Some(self.scifi),
            ROMANCE => Some(self.romance),
            AGE => Some(self.age),
            MOOD => Some(self.mood),
            NON_FICTION => Some(self.nonfiction),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct RecommendResult<'c> {
    query: Vec<f32>,
    label: Option<CategoryLabel>,
    tree_pick: Option<&'c str>,
    books: Vec<RankedBook<'c>>,
}

pub(crate) fn run(ctx: &Context, args: &RecommendArgs, json: bool) -> Result<()> {
    let query = args.query(ctx.catalog.features())?;
    let recommender = &ctx.recommender;

    let ranked = recommender.rank(&ctx.catalog, &query)?;
    let label = optional_model(recommender.classify(&ctx.catalog, &query))?;
    let tree_pick = optional_model(recommender.predict_title(&ctx.catalog, &query))?;

    if json {
        return output::json(&RecommendResult {
            query: query.as_slice().to_vec(),
            label,
            tree_pick: tree_pick.map(|record| record.title.as_str()),
            books: ranked.top(args.top).to_vec(),
        });
    }

    output::section("Your Reader Profile");
    output::kv("Preferences", output::format_values(query.as_slice()));
    match &label {
        Some(label) => output::kv("Category", label.to_string().green().bold()),
        None => output::warning("catalog too small or uniform to classify readers"),
    }
    if let Some(record) = tree_pick {
        output::kv("Tree pick", &record.title);
    }

    output::section("Closest Books");
    for (rank, entry) in ranked.top(args.top).iter().enumerate() {
        print_book(rank + 1, entry.record, entry.distance);
    }
    Ok(())
}

/// Untrainable catalogs still get a ranking; other failures propagate.
fn optional_model<T>(result: bookmatch::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(BookmatchError::Untrainable { reason }) => {
            tracing::warn!(%reason, "classifier skipped");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_book(rank: usize, record: &BookRecord, distance: f32) {
    println!(
        "\n  {} {} {}",
        format!("#{rank}").cyan().bold(),
        record.title.bold(),
        format!("(distance {distance:.2})").dimmed()
    );
    if !record.description.is_empty() {
        output::kv("Description", &record.description);
    }
    if !record.cover_image.is_empty() {
        output::kv("Cover", &record.cover_image);
    }
    output::kv(
        "Link",
        output::link_or_placeholder(record.external_link.as_deref()),
    );
}
