//! DriveGuard - Main Entry Point

use actuator_link::{ActuatorLink, AlertDispatcher};
use anyhow::Context;
use driveguard::synthetic::{ScriptedExtractor, SyntheticSource};
use driveguard::{init_logging, DetectionSession, DriveGuardConfig};
use drowsiness::DrowsinessTracker;
use storage::SleepLog;
use tracing::info;
use vision::EarCalculator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== DriveGuard v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let config = DriveGuardConfig::load(config_path.as_deref())
        .context("Failed to load configuration")?;
    info!(?config, "Configuration loaded");

    // Fatal if the port cannot be opened; the settle wait happens inside.
    let link = ActuatorLink::open(&config.link)
        .await
        .context("Serial link bring-up failed")?;
    let dispatcher = AlertDispatcher::new(link, config.link.dwell());

    let recorder = std::sync::Arc::new(SleepLog::new());
    let tracker = DrowsinessTracker::new(config.detection.clone());

    // Perception is external; until a camera/face-mesh backend is wired in,
    // replay a scripted closure episode through the full pipeline.
    let required = config.detection.consecutive_frames;
    let mut script = vec![0.30; 30];
    script.extend(vec![0.10; required as usize + 10]);
    script.extend(vec![0.30; 30]);
    let frames = script.len() as u32;

    let mut session = DetectionSession::new(
        ScriptedExtractor::new(script),
        EarCalculator::from_selection(&config.eyes),
        tracker,
        dispatcher,
        std::sync::Arc::clone(&recorder),
    );

    let mut source = SyntheticSource::new(frames);
    let stats = session.run(&mut source)?;
    info!(
        frames = stats.frames,
        skipped = stats.skipped,
        alerts = stats.alerts,
        "Session complete"
    );

    if let Some((hour, count)) = recorder.most_common_sleep_hour()? {
        info!(hour, count, "Most common sleep hour");
    }

    // Wait out in-flight alert sequences before dropping the link.
    session.drain_alerts().await;

    Ok(())
}
