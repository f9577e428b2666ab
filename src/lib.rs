//! Modera Studio: turn a garment photo into a studio shot of a model wearing
//! it, generated by Gemini image models.

pub mod auth;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod status;
pub mod studio;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{classify, AuthGate, AuthState, CredentialHost, EnvCredentialHost, ErrorClass};
pub use config::{ApiKeySource, StudioConfig};
pub use error::{Result, StudioError};
pub use gemini::{GeminiClient, GenerationTransport, HttpTransport, ImageClient};
pub use models::{
    AgeGroup, AttributeSet, CameraView, FashionStyle, Gender, ImagePayload, ImageResult,
    ModelPose, QualityTier, SkinTone,
};
pub use studio::{Studio, StudioOutcome};
