mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_data::filter::TitleFilter;
use dashboard_data::reader::LoadOptions;
use dashboard_runtime::data_manager::DataManager;
use dashboard_ui::app::App;
use dashboard_ui::report::{render_json, render_text, ReportContext};

/// Build the initial session filter from the command line.
fn build_filter(settings: &Settings) -> TitleFilter {
    let mut filter = TitleFilter::all()
        .with_types(settings.types.iter().map(String::as_str))
        .with_countries(settings.countries.iter().map(String::as_str));
    if let Some((from, to)) = settings.year_range() {
        filter = filter.with_year_range(from, to);
    }
    filter
}

fn run_report(settings: &Settings, mut manager: DataManager) -> Result<()> {
    manager
        .load()
        .with_context(|| format!("failed to load {}", settings.data.display()))?;

    let source = settings.data.display().to_string();
    let filter = manager.filter().clone();
    let summary = manager.summary().context("no dataset loaded")?;

    let ctx = ReportContext {
        source: &source,
        filter: &filter,
        top: usize::from(settings.top),
    };
    let out = if settings.format == "json" {
        render_json(summary, &ctx).context("failed to serialise report")?
    } else {
        render_text(summary, &ctx)
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    let settings = Settings::load();

    // Stderr output would be drawn over the dashboard's alternate screen.
    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        settings.is_report(),
    )?;

    if settings.year_range_swapped {
        tracing::warn!(
            from = ?settings.year_from,
            to = ?settings.year_to,
            "year range given backwards; bounds swapped"
        );
    }

    tracing::info!("Netflix dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        data = %settings.data.display(),
        view = %settings.view,
        theme = %settings.theme,
        "settings resolved"
    );

    let options = LoadOptions {
        dedupe: settings.dedupe,
    };
    let mut manager = DataManager::new(&settings.data, options, build_filter(&settings));

    if settings.is_report() {
        return run_report(&settings, manager);
    }

    // The dashboard shows load errors on screen and offers a retry.
    if let Err(e) = manager.load() {
        tracing::error!(error = %e, "initial load failed");
    }

    let app = App::new(&settings.theme, manager, usize::from(settings.top));
    app.run().context("terminal error")?;

    Ok(())
}
