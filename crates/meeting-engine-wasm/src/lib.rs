//! WASM bindings for meeting-engine.
//!
//! Exposes availability computation and schedule building to JavaScript via
//! `wasm-bindgen`. Requests, configs and results cross the boundary as JSON
//! strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p meeting-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/meeting_engine_wasm.wasm
//! ```

use meeting_engine::{AvailabilityRequest, AvailabilityResult, EngineConfig, OutputMode};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct AvailabilityDto<'a> {
    #[serde(flatten)]
    result: &'a AvailabilityResult,
    global_max_count: usize,
    global_best: Vec<String>,
}

impl<'a> From<&'a AvailabilityResult> for AvailabilityDto<'a> {
    fn from(result: &'a AvailabilityResult) -> Self {
        Self {
            result,
            global_max_count: result.global_max_count(),
            global_best: result
                .global_best_moments()
                .iter()
                .map(|m| m.format("%Y-%m-%dT%H:%M:%S").to_string())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: everything below returns `String` errors so it runs off-wasm too
// ---------------------------------------------------------------------------

/// Parse an optional JSON config; absent or empty means defaults.
fn parse_config(config_json: Option<&str>) -> Result<EngineConfig, String> {
    let config = match config_json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => serde_json::from_str::<EngineConfig>(json)
            .map_err(|e| format!("Invalid config JSON: {}", e))?,
        None => EngineConfig::default(),
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn parse_mode(mode: &str) -> Result<OutputMode, String> {
    match mode {
        "" | "intervals" => Ok(OutputMode::Intervals),
        "moments" => Ok(OutputMode::Moments),
        "counts" => Ok(OutputMode::Counts),
        other => Err(format!(
            "Unknown mode '{}'. Expected one of: counts, moments, intervals",
            other
        )),
    }
}

fn compute(request_json: &str, config_json: Option<&str>, mode: &str) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let mode = parse_mode(mode)?;
    let request = AvailabilityRequest::from_json(request_json).map_err(|e| e.to_string())?;
    let result = request
        .prepare(&config)
        .and_then(|prepared| prepared.compute(&config, mode))
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&AvailabilityDto::from(&result))
        .map_err(|e| format!("Serialization error: {}", e))
}

fn schedules(request_json: &str, config_json: Option<&str>) -> Result<String, String> {
    let config = parse_config(config_json)?;
    let request = AvailabilityRequest::from_json(request_json).map_err(|e| e.to_string())?;
    let schedules = request
        .prepare(&config)
        .and_then(|prepared| prepared.schedules(&config))
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&schedules).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute per-day best meeting times.
///
/// # Arguments
/// - `request_json` -- `{candidate_days, duration_minutes, participants, pending}`
/// - `config_json` -- Optional `{working_hours: {start, end}, granularity_minutes, timezone}`
/// - `mode` -- `"counts"`, `"moments"` or `"intervals"` (default)
///
/// Returns the result as a JSON string, including `global_max_count` and
/// `global_best` across all days.
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    request_json: &str,
    config_json: Option<String>,
    mode: &str,
) -> Result<String, JsValue> {
    compute(request_json, config_json.as_deref(), mode).map_err(|e| JsValue::from_str(&e))
}

/// Build every participant's free schedule for the request's candidate days.
///
/// Returns a JSON array of `{participant, selected_days, availability}` objects.
#[wasm_bindgen(js_name = "buildSchedules")]
pub fn build_schedules(request_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    schedules(request_json, config_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "candidate_days": ["2026-03-16"],
        "duration_minutes": 30,
        "participants": [
            {"id": "a", "selected_days": ["2026-03-16"],
             "busy": [{"start": "2026-03-16T12:00", "end": "2026-03-16T18:00"}]},
            {"id": "b", "selected_days": ["2026-03-16"],
             "busy": [{"start": "2026-03-16T09:00", "end": "2026-03-16T10:00"}]}
        ]
    }"#;

    #[test]
    fn compute_returns_json_with_global_summary() {
        let json: serde_json::Value =
            serde_json::from_str(&compute(REQUEST, None, "intervals").unwrap()).unwrap();

        assert_eq!(json["global_max_count"], 2);
        assert_eq!(json["days"][0]["best"]["values"][0]["start"], "10:00:00");
        assert_eq!(json["global_best"][0], "2026-03-16T10:00:00");
    }

    #[test]
    fn config_json_changes_working_hours() {
        let config = r#"{"working_hours": {"start": "10:30", "end": "12:00"}}"#;
        let json: serde_json::Value =
            serde_json::from_str(&compute(REQUEST, Some(config), "moments").unwrap()).unwrap();

        assert_eq!(json["days"][0]["best"]["values"][0], "10:30:00");
    }

    #[test]
    fn empty_config_means_defaults() {
        assert_eq!(parse_config(Some("  ")).unwrap(), EngineConfig::default());
        assert_eq!(parse_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = compute(REQUEST, None, "weighted").unwrap_err();
        assert!(err.contains("Unknown mode"));
    }

    #[test]
    fn engine_errors_surface_as_messages() {
        let bad = r#"{"candidate_days": ["2026-03-16"], "duration_minutes": -5}"#;
        let err = compute(bad, None, "").unwrap_err();
        assert!(err.contains("Invalid duration"));
    }

    #[test]
    fn schedules_lists_participants() {
        let json: serde_json::Value =
            serde_json::from_str(&schedules(REQUEST, None).unwrap()).unwrap();

        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[1]["availability"]["2026-03-16"][0]["start"], "10:00:00");
    }
}
