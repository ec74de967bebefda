// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected HTTP status: {status}")]
    Status { status: u16 },

    #[error("Rate limited by remote service after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Request failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },

    #[error("Transport error: {0}")]
    Transport(String),
}
