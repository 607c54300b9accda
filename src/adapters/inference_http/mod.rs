//! Shared request and response handling for HTTP inference backends
//!
//! Both backends accept the same `{"inputs", "parameters"}` payload and
//! answer with frames, either as base64-encoded images or as nested
//! `rows x cols x channels` pixel arrays.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Build an HTTP client with the configured timeout
pub fn build_client(timeout_secs: u64) -> Result<Client, DomainError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| DomainError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Request body for a generation call
pub fn build_payload(prompt: &str, params: &GenerationParams) -> Value {
    json!({
        "inputs": prompt,
        "parameters": {
            "negative_prompt": params.effective_negative_prompt(),
            "num_frames": params.frame_count,
            "num_inference_steps": params.inference_steps,
            "width": params.width,
            "height": params.height,
            "seed": params.seed,
        }
    })
}

/// POST a prompt and decode the frames in the response
pub async fn request_frames(
    client: &Client,
    url: &str,
    token: Option<&str>,
    prompt: &str,
    params: &GenerationParams,
) -> Result<Vec<Frame>, DomainError> {
    let payload = build_payload(prompt, params);
    debug!("Sending generation request to {}", url);

    let mut request = client
        .post(url)
        .header("Accept", "application/json")
        .json(&payload);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|e| DomainError::Backend(format!("Request to {} failed: {}", url, e)))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| DomainError::Backend(format!("Failed to read response body: {}", e)))?;

    if !status.is_success() {
        return Err(DomainError::Backend(format!(
            "{} returned HTTP {}: {}",
            url,
            status,
            String::from_utf8_lossy(&body)
        )));
    }

    let frames = decode_frames(&body)?;
    info!("Received {} frames from {}", frames.len(), url);
    Ok(frames)
}

/// Decode a response body into frames
pub fn decode_frames(body: &[u8]) -> Result<Vec<Frame>, DomainError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| DomainError::Backend(format!("Response is not valid JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(error) = map.get("error") {
                return Err(DomainError::Backend(format!("Backend reported: {}", error)));
            }
            match map.remove("frames") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(DomainError::Backend(
                        "Response has no frames array".to_string(),
                    ))
                }
            }
        }
        other => {
            return Err(DomainError::Backend(format!(
                "Unexpected response shape: {}",
                other
            )))
        }
    };

    if items.is_empty() {
        return Err(DomainError::Backend(
            "No frames received from endpoint".to_string(),
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decode_frame(item)
                .map_err(|reason| DomainError::Backend(format!("Frame {}: {}", index, reason)))
        })
        .collect()
}

fn decode_frame(item: &Value) -> Result<Frame, String> {
    match item {
        Value::String(encoded) => decode_image(encoded),
        Value::Array(rows) => decode_pixel_grid(rows),
        _ => Err("expected a base64 image or a pixel array".to_string()),
    }
}

fn decode_image(encoded: &str) -> Result<Frame, String> {
    let data = encoded
        .split_once("base64,")
        .map(|(_, data)| data)
        .unwrap_or(encoded);
    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|e| format!("invalid base64: {}", e))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|e| format!("undecodable image: {}", e))?
        .to_rgb8();
    let (width, height) = image.dimensions();
    Frame::new(width, height, image.into_raw()).map_err(|e| e.to_string())
}

fn decode_pixel_grid(rows: &[Value]) -> Result<Frame, String> {
    let mut width: Option<usize> = None;
    let mut channels: Vec<&Value> = Vec::new();

    for (y, row) in rows.iter().enumerate() {
        let columns = row
            .as_array()
            .ok_or_else(|| format!("row {} is not an array", y))?;
        match width {
            None => width = Some(columns.len()),
            Some(expected) if expected != columns.len() => {
                return Err(format!(
                    "row {} has {} pixels, expected {}",
                    y,
                    columns.len(),
                    expected
                ))
            }
            Some(_) => {}
        }
        for pixel in columns {
            push_pixel(pixel, &mut channels)?;
        }
    }

    let normalized = is_normalized(&channels);
    let pixels = channels
        .into_iter()
        .map(|value| channel_value(value, normalized))
        .collect::<Result<Vec<u8>, String>>()?;

    let width = u32::try_from(width.unwrap_or(0)).map_err(|_| "frame too wide".to_string())?;
    let height = u32::try_from(rows.len()).map_err(|_| "frame too tall".to_string())?;
    Frame::new(width, height, pixels).map_err(|e| e.to_string())
}

/// Queue the RGB channel values of one pixel, expanding gray to three
fn push_pixel<'a>(pixel: &'a Value, out: &mut Vec<&'a Value>) -> Result<(), String> {
    match pixel {
        Value::Number(_) => out.extend([pixel, pixel, pixel]),
        Value::Array(channels) => match channels.len() {
            1 => out.extend([&channels[0], &channels[0], &channels[0]]),
            3 | 4 => out.extend(&channels[..3]),
            n => return Err(format!("pixel has {} channels", n)),
        },
        _ => return Err("pixel is not numeric".to_string()),
    }
    Ok(())
}

/// A frame is normalized when it has floats and all of them lie in [0, 1]
fn is_normalized(channels: &[&Value]) -> bool {
    let floats: Vec<f64> = channels
        .iter()
        .filter(|v| v.is_f64())
        .filter_map(|v| v.as_f64())
        .collect();
    !floats.is_empty() && floats.iter().all(|f| (0.0..=1.0).contains(f))
}

/// Integers are 0-255; floats are 0-255 unless the frame is normalized
fn channel_value(value: &Value, normalized: bool) -> Result<u8, String> {
    if let Some(n) = value.as_u64() {
        return Ok(n.min(255) as u8);
    }
    if let Some(n) = value.as_i64() {
        return Ok(if n < 0 { 0 } else { 255 });
    }
    let f = value
        .as_f64()
        .ok_or_else(|| "channel is not a number".to_string())?;
    let scaled = if normalized { f * 255.0 } else { f };
    Ok(scaled.round().clamp(0.0, 255.0) as u8)
}
