use std::env;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deskpilot::{CaptureParameters, FileType, Screen, ScreenCapture, ScreenConfig, VisionAdapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let vision = VisionAdapter::new(Arc::new(ScreenCapture::new()));
    let screen = Screen::with_config(Arc::new(vision), ScreenConfig::from_env());

    let width = screen.width().await?;
    let height = screen.height().await?;
    tracing::info!("Primary screen is {}x{}", width, height);

    let mut params = CaptureParameters::new(FileType::Png).with_prefix("deskpilot_");
    if let Ok(dir) = env::var("DESKPILOT_CAPTURE_DIR") {
        params = params.with_path(dir);
    }

    let name = env::args().nth(1).unwrap_or_else(|| "screen".to_string());
    let output = screen.capture(&name, &params).await?;
    println!("{}", output.display());

    Ok(())
}
