//! Error types
//!
//! Only resource acquisition and configuration can fail. Per-frame update and
//! composition are total and never return errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::assets::TextureId;

/// A single resource could not be acquired by the asset collaborator
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("asset file not found: {path}")]
    MissingFile { path: PathBuf },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("failed to build shader program ({vertex} + {fragment}): {reason}")]
    Shader {
        vertex: PathBuf,
        fragment: PathBuf,
        reason: String,
    },
    #[error("failed to create quad geometry: {0}")]
    Geometry(String),
}

/// Fatal startup failure; the frame loop must not be entered
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid screen size {width}x{height}")]
    InvalidScreenSize { width: u32, height: u32 },
    #[error("required shader unavailable")]
    Shader(#[source] LoadError),
    #[error("required texture {id:?} unavailable")]
    Texture {
        id: TextureId,
        #[source]
        source: LoadError,
    },
    #[error("quad geometry unavailable")]
    Geometry(#[source] LoadError),
}

/// Settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}
