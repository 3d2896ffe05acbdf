//! Galaxy viewer.
//!
//! Run with: cargo run --release -- [config.json]

use galaxy::{Viewer, ViewerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,galaxy=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = ViewerConfig::from_args_or_env()?;
    Viewer::new().with_config(config).run()?;
    Ok(())
}
