use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::core::context::OverlayContext;
use crate::engine::core::scheduler::TickScheduler;
use crate::rpc::web_rpc::WebRpcInterface;

/// Push frame rate and detector throughput to the host every half second.
pub fn tracking_stats_notification_system(
    mut rpc_interface: ResMut<WebRpcInterface>,
    diagnostics: Res<DiagnosticsStore>,
    scheduler: Res<TickScheduler>,
    ctx: Res<OverlayContext>,
    mut last_send_time: Local<f32>,
    time: Res<Time>,
) {
    let current_time = time.elapsed_secs();
    if current_time - *last_send_time < 0.5 {
        return;
    }
    *last_send_time = current_time;

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0) as f32;
    let stats = scheduler.stats();

    debug!(
        "ticks {} requests {} detections {} faces {}",
        stats.ticks, stats.requests, stats.detections, stats.faces
    );
    rpc_interface.send_notification(
        "tracking_stats",
        serde_json::json!({
            "fps": fps,
            "ticks": stats.ticks,
            "requests": stats.requests,
            "detections": stats.detections,
            "faces": stats.faces,
            "tracking": ctx.transform().is_some(),
        }),
    );
}
