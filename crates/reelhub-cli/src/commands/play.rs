use super::AppContext;
use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use reelhub_core::PlaybackResolver;
use reelhub_models::PlaybackMetadata;
use serde_json::json;

pub async fn run_play(ctx: &AppContext, id: &str, no_enrich: bool, output: &Output) -> Result<()> {
    let catalog = ctx.load_catalog(output).await;
    catalog
        .ensure_initialized()
        .wrap_err("Failed to load movie data. Please try again")?;

    let record = catalog
        .get(id)
        .ok_or_else(|| eyre!("No title with id '{}' in the catalog", id))?;

    let resolver = PlaybackResolver::new(ctx.sources.clone(), ctx.config.video_host.embed_base.clone());
    let url = match resolver.resolve(record).await {
        Ok(url) => url,
        Err(e) => {
            // Non-fatal: the catalog is fine, only this title is unplayable
            tracing::warn!("Playback resolution failed for {}: {}", record.id, e);
            output.error(format!("Could not play this title: {}", e));
            return Ok(());
        }
    };

    // The URL goes out before the metadata lookup starts
    if output.is_human() {
        output.success(format!("Playing {}", record.title));
        if !output.is_quiet() {
            println!("{}", url);
        }
    } else {
        output.json(&json!({
            "type": "playback",
            "id": record.id,
            "source": record.source,
            "url": url,
        }));
    }

    let metadata = if no_enrich {
        PlaybackMetadata::from_record(record)
    } else {
        resolver.enrich(record).await
    };

    if !output.is_human() {
        output.json(&json!({ "type": "metadata", "id": record.id, "metadata": metadata }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(vec![Cell::new("Year"), Cell::new(&metadata.year)]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(&metadata.genre)]);
    table.add_row(vec![Cell::new("Rating"), Cell::new(&metadata.rating)]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);
    Ok(())
}
