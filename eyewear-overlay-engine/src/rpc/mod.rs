//! JSON-RPC 2.0 bridge to the page embedding the overlay.
//!
//! On wasm32 the engine runs inside an iframe and talks to its parent via
//! `postMessage`. Natively the transport is a no-op, but the handlers still
//! run so they can be driven from tests.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)                 Bevy (iframe)
//!        │                                  │
//!        │ <──────── detect_frame ──────────┤  scheduler wants a detection
//!        ├─ landmarks { points | null } ──> │  completes the detection
//!        │                                  │
//!        ├─ set_calibration / set_style ──> │
//!        │ <─────────── response (id) ──────┤
//!        │                                  │
//!        │ <──────── asset_status ──────────┤  model loaded / failed
//!        │ <──────── tracking_stats ────────┤  every 0.5 s
//! ```
//!
//! ## Methods
//!
//! - `landmarks`: `{ "points": [[x, y, z], ...] | null }`, detector output in
//!   normalised image coordinates. Usually sent as a notification.
//! - `set_calibration`: any of `scaleMultiplier`, `widthMultiplier`,
//!   `verticalOffset`, `depthOffset`; returns the full calibration.
//! - `set_style`: a style profile (`lensColor`, `frameColor`, `tintOpacity`,
//!   `frameScale`, `frameMaterial`, `frameMetalness`).
//! - `select_model`: `{ "index": n }` or `{ "direction": "next" | "previous" }`.
//! - `get_models`: catalogue names and the selected index.
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// JSON-RPC 2.0 bidirectional communication system for host integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
