use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use seabed::{BathymetryGenerator, LayerBreakdown, Region, TerrainConfig, TerrainError, render};

#[derive(Clone)]
struct AppState {
    generator: Arc<BathymetryGenerator>,
}

#[derive(Deserialize)]
struct SurveyRequest {
    region: Option<Region>,
    width: Option<usize>,
    height: Option<usize>,
    /// Full or partial terrain config; replaces the server's world for this request.
    config: Option<serde_json::Value>,
    // Quick overrides
    seam_blend_width: Option<f64>,
    fault_sense_seed: Option<u64>,
}

#[derive(Serialize)]
struct SurveyResponse {
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
    deepest: f32,
    shallowest: f32,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Deserialize)]
struct ProbeRequest {
    points: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct ProbeResponse {
    samples: Vec<LayerBreakdown>,
}

type ApiError = (StatusCode, String);

/// Upper bound on points per probe request; matches a 100×100 survey.
const MAX_PROBE_POINTS: usize = 10_000;

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn internal(e: impl std::fmt::Display) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn encode_png(pixels: &[u8], w: usize, h: usize, color: image::ExtendedColorType) -> Result<String, TerrainError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(pixels, w as u32, h as u32, color)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn request_generator(state: &AppState, req: &SurveyRequest) -> Result<Arc<BathymetryGenerator>, TerrainError> {
    if req.config.is_none() && req.seam_blend_width.is_none() && req.fault_sense_seed.is_none() {
        return Ok(state.generator.clone());
    }
    let mut config = match &req.config {
        Some(value) => serde_json::from_value::<TerrainConfig>(value.clone())?,
        None => state.generator.config().clone(),
    };
    if let Some(w) = req.seam_blend_width {
        config.provinces.seam_blend_width = w;
    }
    if req.fault_sense_seed.is_some() {
        config.fault_sense_seed = req.fault_sense_seed;
    }
    Ok(Arc::new(BathymetryGenerator::new(config)?))
}

async fn survey_handler(
    State(state): State<AppState>,
    Json(req): Json<SurveyRequest>,
) -> Result<Json<SurveyResponse>, ApiError> {
    let width = req.width.unwrap_or(800).clamp(1, 4096);
    let height = req.height.unwrap_or(480).clamp(1, 4096);
    let region = req.region.unwrap_or_default();
    let generator = request_generator(&state, &req).map_err(bad_request)?;

    let response = tokio::task::spawn_blocking(move || -> Result<SurveyResponse, TerrainError> {
        let (survey, timings) = seabed::survey(&generator, region, width, height);
        let rgba = image::ExtendedColorType::Rgba8;

        let layers = vec![
            Layer {
                name: "bathymetry".into(),
                data_url: encode_png(&survey.rgba, width, height, rgba)?,
            },
            Layer {
                name: "heightmap".into(),
                data_url: encode_png(&render::render_heightmap(&survey.height), width, height, rgba)?,
            },
            Layer {
                name: "provinces".into(),
                data_url: encode_png(&render::render_provinces(&survey.province), width, height, rgba)?,
            },
            Layer {
                name: "depth_brightness".into(),
                data_url: encode_png(
                    survey.depth_brightness().as_raw(),
                    width,
                    height,
                    image::ExtendedColorType::L8,
                )?,
            },
        ];

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        let (deepest, shallowest) = survey.height.min_max();
        Ok(SurveyResponse {
            layers,
            timings: timing_entries,
            width,
            height,
            deepest,
            shallowest,
        })
    })
    .await
    .map_err(internal)?
    .map_err(internal)?;

    Ok(Json(response))
}

fn probe_points(generator: &BathymetryGenerator, points: &[[f64; 2]]) -> Result<Vec<LayerBreakdown>, ApiError> {
    if points.len() > MAX_PROBE_POINTS {
        return Err(bad_request(format!(
            "{} probe points requested, at most {MAX_PROBE_POINTS} allowed",
            points.len()
        )));
    }
    Ok(points.iter().map(|&[x, z]| generator.breakdown(x, z)).collect())
}

async fn probe_handler(
    State(state): State<AppState>,
    Json(req): Json<ProbeRequest>,
) -> Result<Json<ProbeResponse>, ApiError> {
    let samples = probe_points(&state.generator, &req.points)?;
    Ok(Json(ProbeResponse { samples }))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("SEABED_CONFIG") {
        Ok(path) => TerrainConfig::load(&path),
        Err(_) => Ok(TerrainConfig::default()),
    };
    let generator = match config.and_then(BathymetryGenerator::new) {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("cannot build terrain: {e}");
            std::process::exit(1);
        }
    };
    let state = AppState {
        generator: Arc::new(generator),
    };

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/survey", post(survey_handler))
        .route("/api/probe", post(probe_handler))
        .fallback_service(frontend)
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("seabed server at http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server stopped: {e}");
    }
}
