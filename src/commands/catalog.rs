use anyhow::{Context as _, Result};
use chrono::Utc;

use metadelta::presentation::cli::CatalogCommands;
use metadelta::presentation::factory::create_catalog_service;
use metadelta::EnvironmentHandle;

use super::Context;

pub fn cmd_catalog(ctx: &Context, action: CatalogCommands) -> Result<()> {
    match action {
        CatalogCommands::Refresh { target_org } => refresh(ctx, &target_org),
        CatalogCommands::Show { target_org } => show(ctx, target_org.as_deref()),
    }
}

fn refresh(ctx: &Context, target_org: &str) -> Result<()> {
    let env = EnvironmentHandle::from(target_org);
    let catalog = create_catalog_service(&ctx.config)
        .refresh(&env, Utc::now())
        .with_context(|| format!("failed to refresh the catalog of {}", env))?;

    if ctx.json {
        println!(
            "{}",
            serde_json::json!({
                "event": "catalog_refreshed",
                "command": "catalog",
                "target": env.alias(),
                "types": catalog.len(),
            })
        );
    } else {
        println!("Cached {} artifact types for {}", catalog.len(), env);
    }
    Ok(())
}

fn show(ctx: &Context, target_org: Option<&str>) -> Result<()> {
    let catalog = ctx.catalog(target_org);

    if ctx.json {
        let entries: serde_json::Map<String, serde_json::Value> = catalog
            .entries()
            .map(|(dir, type_name)| (dir.to_string(), type_name.into()))
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "event": "catalog",
                "command": "catalog",
                "refreshed_at": catalog.refreshed_at(),
                "types": entries,
            })
        );
        return Ok(());
    }

    match catalog.refreshed_at() {
        Some(at) => println!("Refreshed {}", at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("Built-in catalog (never refreshed)"),
    }
    for (dir, type_name) in catalog.entries() {
        println!("  {:<28} {}", dir, type_name);
    }
    Ok(())
}
