use std::path::PathBuf;

use clap::Args;
use serde_json::json;

use crate::catalog::store::SequenceCatalog;
use crate::cli::{OutputFormat, TargetArgs};
use crate::core::types::AssetKind;

#[derive(Args)]
pub struct NameArgs {
    /// Sequence name (also its directory name)
    #[arg(required = true)]
    pub name: String,
}

#[derive(Args)]
pub struct AttachArgs {
    /// Asset kind (scan, imu-video, imu-log, qr, portrait)
    #[arg(required = true)]
    pub kind: AssetKind,

    /// File to move into the active sequence (it is consumed)
    #[arg(required = true)]
    pub path: PathBuf,
}

fn print_cursor(catalog: &SequenceCatalog, format: OutputFormat) {
    let active = catalog.active_name().map(|n| n.as_str().to_string());
    match format {
        OutputFormat::Text => match &active {
            Some(name) => println!("Active: {name} (step {})", catalog.current_step()),
            None => println!("Active: none (step {})", catalog.current_step()),
        },
        OutputFormat::Json => {
            let value = json!({
                "active": active,
                "activeIndex": catalog.active_index(),
                "currentStep": catalog.current_step(),
            });
            println!("{value}");
        }
    }
}

pub fn run_create(
    catalog: &mut SequenceCatalog,
    args: &NameArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    catalog.create(&args.name)?;
    print_cursor(catalog, format);
    Ok(())
}

pub fn run_add(
    catalog: &mut SequenceCatalog,
    args: &NameArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let index = catalog.add(&args.name)?;
    match format {
        OutputFormat::Text => println!("Added {} at index {index}", args.name),
        OutputFormat::Json => println!("{}", json!({ "name": args.name, "index": index })),
    }
    Ok(())
}

pub fn run_activate(
    catalog: &mut SequenceCatalog,
    args: &TargetArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let index = args.resolve(catalog)?;
    catalog.set_active(index)?;
    print_cursor(catalog, format);
    Ok(())
}

pub fn run_step(
    catalog: &mut SequenceCatalog,
    forward: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if forward {
        catalog.advance_step()?;
    } else {
        catalog.retreat_step()?;
    }
    print_cursor(catalog, format);
    Ok(())
}

pub fn run_delete(
    catalog: &mut SequenceCatalog,
    args: &TargetArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let index = args.resolve(catalog)?;
    let record = catalog.delete_at(index)?;
    match format {
        OutputFormat::Text => println!("Deleted {}", record.name),
        OutputFormat::Json => println!("{}", json!({ "deleted": record.name })),
    }
    Ok(())
}

pub fn run_attach(
    catalog: &SequenceCatalog,
    args: &AttachArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if args.kind == AssetKind::Portrait {
        let attachment = catalog.attach_portrait(&args.path)?;
        match format {
            OutputFormat::Text => {
                println!("Portrait: {}", attachment.portrait.display());
                match &attachment.thumbnail {
                    Some(t) => println!(
                        "Thumbnail: {} ({}x{})",
                        t.path.display(),
                        t.width,
                        t.height
                    ),
                    None => println!("Thumbnail: not generated"),
                }
            }
            OutputFormat::Json => {
                let value = json!({
                    "portrait": attachment.portrait,
                    "thumbnail": attachment.thumbnail.as_ref().map(|t| json!({
                        "path": t.path,
                        "width": t.width,
                        "height": t.height,
                    })),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }
        return Ok(());
    }

    let destination = catalog.attach_asset(&args.path, args.kind)?;
    match format {
        OutputFormat::Text => println!("Moved {} to {}", args.path.display(), destination.display()),
        OutputFormat::Json => println!("{}", json!({ "kind": args.kind, "path": destination })),
    }
    Ok(())
}
