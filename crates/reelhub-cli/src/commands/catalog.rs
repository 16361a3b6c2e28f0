use super::{records_table, AppContext};
use crate::output::Output;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use reelhub_models::UnifiedMovieRecord;
use serde_json::json;

pub async fn run_catalog(ctx: &AppContext, all: bool, output: &Output) -> Result<()> {
    let catalog = ctx.load_catalog(output).await;
    catalog
        .ensure_initialized()
        .wrap_err("Failed to load movie data. Please try again")?;

    let views = catalog.views();

    if !output.is_human() {
        output.json(&json!({
            "records": catalog.records(),
            "views": {
                "hero": ids(views.hero),
                "new": ids(views.new),
                "recommended": ids(views.recommended),
            },
            "report": catalog.report(),
        }));
        return Ok(());
    }

    if output.is_quiet() {
        return Ok(());
    }

    if all {
        println!("{}", records_table("All titles", catalog.records()));
    } else {
        println!("{}", records_table("Featured", views.hero));
        println!("{}", records_table("New", views.new));
        println!("{}", records_table("Recommended", views.recommended));
    }

    output.success(format!(
        "{} titles from {} sources in {:.2}s",
        catalog.len(),
        catalog.report().sources.len(),
        catalog.report().duration.as_secs_f64()
    ));
    Ok(())
}

fn ids(records: &[UnifiedMovieRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}
