//! Face Client Common Library
//!
//! CLIとWeb(WASM)で共有される型・正規化・通信処理

pub mod types;
pub mod error;
pub mod normalizer;
pub mod endpoints;
pub mod transport;
pub mod workflow;
pub mod i18n;

#[cfg(test)]
mod testing;

pub use types::{
    EnrollResponse, FaceImage, FaceRecord, GalleryPage, MatchOutcome, NormalizedImage,
    RawCapture, RecognitionResult, PAGE_SIZE,
};
pub use error::{Error, Result};
pub use normalizer::{normalize, mime_for_filename};
pub use endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use transport::{ApiRequest, ApiResponse, FaceApi, FormPart, HttpClient, Method};
pub use workflow::{
    CaptureMode, EnrollmentController, GalleryController, GalleryState, RecognitionController,
    WorkflowState,
};
pub use i18n::{translate, Key, Lang};
