pub mod capture_panel;
pub mod header;
pub mod image_upload;
pub mod language_selector;
pub mod recognition_result;
pub mod webcam_capture;
