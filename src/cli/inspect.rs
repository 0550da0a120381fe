use serde::Serialize;

use crate::catalog::index::IndexStatus;
use crate::catalog::store::SequenceCatalog;
use crate::cli::{OutputFormat, TargetArgs};
use crate::core::sequence::SequenceSummary;

#[derive(Serialize)]
struct StatusReport<'a> {
    root: String,
    sequences: usize,
    active: Option<&'a str>,
    active_index: Option<usize>,
    current_step: u32,
    index: String,
}

fn describe_status(status: &IndexStatus) -> String {
    match status {
        IndexStatus::Created => "created".to_string(),
        IndexStatus::Loaded => "loaded".to_string(),
        IndexStatus::Repaired { pruned } => format!("repaired ({} pruned)", pruned.len()),
        IndexStatus::Corrupt { reason } => format!("corrupt: {reason}"),
    }
}

pub fn run_list(catalog: &SequenceCatalog, format: OutputFormat) -> anyhow::Result<()> {
    let summaries: Vec<SequenceSummary> = (0..catalog.count())
        .filter_map(|i| catalog.summary(i))
        .collect();

    match format {
        OutputFormat::Text => {
            let name_width = summaries
                .iter()
                .map(|s| s.name.as_str().len())
                .max()
                .unwrap_or(4)
                .max(4);

            println!("Sequence Catalog ({} sequences)\n", summaries.len());
            println!("  {:>3} {:<name_w$} {:>6}", "#", "Name", "Assets", name_w = name_width);
            println!("  {}", "-".repeat(name_width + 11));

            for s in &summaries {
                let marker = if s.active { "*" } else { " " };
                println!(
                    "{marker} {:>3} {:<name_w$} {:>4}/6",
                    s.index,
                    s.name.as_str(),
                    s.assets.len(),
                    name_w = name_width
                );
            }

            if let Some(name) = catalog.active_name() {
                println!("\nActive: {name} (step {})", catalog.current_step());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(())
}

pub fn run_show(
    catalog: &SequenceCatalog,
    args: &TargetArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let index = args.resolve(catalog)?;
    let summary = catalog
        .summary(index)
        .ok_or_else(|| anyhow::anyhow!("No sequence at index {index}"))?;

    match format {
        OutputFormat::Text => {
            println!("Sequence: {}", summary.name);
            println!("Index: {}", summary.index);
            println!("Directory: {}", summary.directory.display());
            if summary.active {
                println!("Active: yes (step {})", catalog.current_step());
            }
            println!("\nAssets:");
            for asset in &summary.assets {
                let modified = asset
                    .modified
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default();
                println!(
                    "  {:<10} {:<14} {}",
                    asset.kind.to_string(),
                    asset.kind.file_name(),
                    modified
                );
            }
            let missing = summary.missing();
            if !missing.is_empty() {
                let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
                println!("\nMissing: {}", names.join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

pub fn run_status(catalog: &SequenceCatalog, format: OutputFormat) -> anyhow::Result<()> {
    let report = StatusReport {
        root: catalog.root().display().to_string(),
        sequences: catalog.count(),
        active: catalog.active_name().map(|n| n.as_str()),
        active_index: catalog.active_index(),
        current_step: catalog.current_step(),
        index: describe_status(catalog.load_report()),
    };

    match format {
        OutputFormat::Text => {
            println!("Root: {}", report.root);
            println!("Index: {}", report.index);
            println!("Sequences: {}", report.sequences);
            match report.active {
                Some(name) => println!("Active: {name}"),
                None => println!("Active: none"),
            }
            println!("Step: {}", report.current_step);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
