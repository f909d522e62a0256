use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::assets::catalogue::ModelCatalogue;
use crate::engine::assets::style::GlassesStyle;
use crate::engine::core::context::{CalibrationUpdate, OverlayContext};
use crate::engine::loading::model_loader::{AssetStatus, StyleChanged};
use crate::engine::systems::model_navigation::ModelNavigation;
use crate::engine::tracking::detector::{Detection, HostDetectorLink};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Requests without an `id` are
/// notifications and get no response.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page
/// and Bevy.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the postMessage bridge to the embedding page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_detection_requests,
                    report_asset_status,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Hand the closure to JS so it outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
pub struct MessageQueue(pub std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host.
#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// World access the method handlers need.
struct RpcTargets<'a, 'w, 'x> {
    ctx: &'a mut OverlayContext,
    catalogue: &'a ModelCatalogue,
    link: Option<&'a HostDetectorLink>,
    navigation: &'a mut EventWriter<'w, ModelNavigation>,
    style_changes: &'a mut EventWriter<'x, StyleChanged>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut ctx: ResMut<OverlayContext>,
    catalogue: Res<ModelCatalogue>,
    link: Option<Res<HostDetectorLink>>,
    mut navigation: EventWriter<ModelNavigation>,
    mut style_changes: EventWriter<StyleChanged>,
) {
    let mut targets = RpcTargets {
        ctx: &mut ctx,
        catalogue: &catalogue,
        link: link.as_deref(),
        navigation: &mut navigation,
        style_changes: &mut style_changes,
    };

    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(&request, &mut targets) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
            }
        }
    }
}

/// Dispatch one request. Returns a response only for requests with an ID.
fn handle_rpc_request(request: &RpcRequest, targets: &mut RpcTargets) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "landmarks" => handle_landmarks(&request.params, targets),
        "set_calibration" => handle_set_calibration(&request.params, targets),
        "set_style" => handle_set_style(&request.params, targets),
        "select_model" => handle_select_model(&request.params, targets),
        "get_models" => handle_get_models(targets),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({"method": request.method})),
            })
        }
    };

    // Notifications have no ID and get no response.
    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => create_error_response(id, error),
    })
}

/// Detector output from the host: `{ "points": [[x, y, z], ...] | null }`.
fn handle_landmarks(
    params: &serde_json::Value,
    targets: &mut RpcTargets,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct LandmarkParams {
        points: Option<Vec<[f32; 3]>>,
    }

    let Some(link) = targets.link else {
        return Err(RpcError::internal_error("No host detector is active"));
    };

    let parsed = serde_json::from_value::<LandmarkParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'points' array or null"))?;

    let detection = Detection::from_normalized(
        parsed.points.as_deref(),
        &targets.ctx.projection,
        &targets.ctx.schema,
    );

    match detection {
        Ok(detection) => {
            link.deliver(detection);
            Ok(serde_json::json!({ "accepted": true }))
        }
        Err(err) => {
            // Still complete the outstanding detection so tracking continues.
            link.deliver(Detection::NoFace);
            Err(RpcError::invalid_params(&err.to_string()))
        }
    }
}

fn handle_set_calibration(
    params: &serde_json::Value,
    targets: &mut RpcTargets,
) -> Result<serde_json::Value, RpcError> {
    let update = serde_json::from_value::<CalibrationUpdate>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Invalid calibration: {}", e)))?;

    targets.ctx.calibration.apply(&update);
    info!("Calibration updated: {:?}", targets.ctx.calibration);

    serde_json::to_value(targets.ctx.calibration)
        .map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn handle_set_style(
    params: &serde_json::Value,
    targets: &mut RpcTargets,
) -> Result<serde_json::Value, RpcError> {
    let style = serde_json::from_value::<GlassesStyle>(params.clone())
        .map_err(|e| RpcError::invalid_params(&format!("Invalid style: {}", e)))?;
    let resolved = style
        .resolve()
        .map_err(|e| RpcError::invalid_params(&e.to_string()))?;

    targets.ctx.style = resolved;
    targets.style_changes.write(StyleChanged);

    Ok(serde_json::json!({ "success": true }))
}

/// `{ "index": n }` or `{ "direction": "next" | "previous" }`.
fn handle_select_model(
    params: &serde_json::Value,
    targets: &mut RpcTargets,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SelectParams {
        index: Option<usize>,
        direction: Option<String>,
    }

    let parsed = serde_json::from_value::<SelectParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'index' or 'direction'"))?;

    let navigation = match (parsed.index, parsed.direction.as_deref()) {
        (Some(index), _) => {
            if index >= targets.catalogue.len() {
                return Err(RpcError::invalid_params(&format!(
                    "No model at index {}",
                    index
                )));
            }
            ModelNavigation::Select(index)
        }
        (None, Some("next")) => ModelNavigation::Next,
        (None, Some("previous")) => ModelNavigation::Previous,
        _ => return Err(RpcError::invalid_params("Expected 'index' or 'direction'")),
    };

    targets.navigation.write(navigation);
    Ok(serde_json::json!({ "success": true }))
}

fn handle_get_models(targets: &mut RpcTargets) -> Result<serde_json::Value, RpcError> {
    let models: Vec<&str> = (0..targets.catalogue.len())
        .filter_map(|i| targets.catalogue.entry(i))
        .map(|e| e.name.as_str())
        .collect();

    Ok(serde_json::json!({
        "models": models,
        "selected": targets.catalogue.selected(),
    }))
}

/// Tell the host to run its detector when the scheduler asks for a frame.
fn forward_detection_requests(
    link: Option<Res<HostDetectorLink>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if link.is_some_and(|link| link.take_request()) {
        rpc_interface.send_notification("detect_frame", serde_json::json!({}));
    }
}

fn report_asset_status(
    mut statuses: EventReader<AssetStatus>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for status in statuses.read() {
        let params = match status {
            AssetStatus::Loaded {
                model,
                name,
                parts,
                lenses,
                source,
            } => serde_json::json!({
                "status": "loaded",
                "model": model,
                "name": name,
                "parts": parts,
                "lenses": lenses,
                "source": source,
            }),
            AssetStatus::Failed { model, reason } => serde_json::json!({
                "status": "failed",
                "model": model,
                "reason": reason,
            }),
        };
        rpc_interface.send_notification("asset_status", params);
    }
}

fn create_error_response(id: serde_json::Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(error),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No transport natively.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
