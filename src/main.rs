//! Binary entry point: open the catalog database, then hand control to the
//! login screen and the catalog screen behind it.
use anyhow::Context;
use library_catalog::{ensure_schema, run_app, telemetry, App, Settings};

/// Storage failures anywhere in here are fatal and surface on the terminal
/// after it has been restored. Logging is best effort.
fn main() -> anyhow::Result<()> {
    let settings = Settings::default();
    telemetry::init_or_warn(&settings.log_path);
    tracing::info!(db = %settings.db_path.display(), "library catalog starting");

    let conn = ensure_schema(&settings.db_path)
        .with_context(|| format!("failed to prepare {}", settings.db_path.display()))?;

    let mut app = App::new(conn, settings.credentials);
    run_app(&mut app)?;
    app.close()?;

    tracing::info!("library catalog closed");
    Ok(())
}
