//! Catalog command implementation

use super::Context;
use crate::error::Result;
use crate::output;
use bookmatch::catalog::BookRecord;
use colored::Colorize;
use serde::Serialize;

#[derive(Serialize)]
struct CatalogListing<'c> {
    features: Vec<&'c str>,
    records: &'c [BookRecord],
}

pub(crate) fn run(ctx: &Context, json: bool) -> Result<()> {
    let catalog = &ctx.catalog;

    if json {
        return output::json(&CatalogListing {
            features: catalog.features().names().collect(),
            records: catalog.records(),
        });
    }

    output::section("Catalog");
    output::kv("Records", catalog.len());
    output::kv(
        "Features",
        catalog.features().names().collect::<Vec<_>>().join(", "),
    );
    if catalog.is_empty() {
        output::warning("no records matched the accepted language");
        return Ok(());
    }

    println!();
    for (idx, record) in catalog.iter().enumerate() {
        println!(
            "  {:>3}  {}  {}  {}",
            idx,
            record.title.bold(),
            format!("({})", record.language).dimmed(),
            output::format_values(&record.features)
        );
    }
    Ok(())
}
