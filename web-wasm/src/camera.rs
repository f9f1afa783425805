//! Webカメラ（getUserMedia）とスナップショット

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

/// スナップショットの形式
const SNAPSHOT_MIME: &str = "image/jpeg";

/// 映像のみのストリームを要求する
pub async fn start() -> Result<MediaStream, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let devices = window.navigator().media_devices()?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);

    let stream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?).await?;
    stream.dyn_into::<MediaStream>()
}

/// 全トラックを停止してカメラを解放する
pub fn stop(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// 現在のフレームを `data:image/jpeg;base64,...` として取り出す
pub fn snapshot(video: &HtmlVideoElement) -> Result<String, JsValue> {
    let (width, height) = (video.video_width(), video.video_height());
    if width == 0 || height == 0 {
        return Err(JsValue::from_str("video is not ready"));
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(JsValue::from)?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context is not available"))?
        .dyn_into()
        .map_err(JsValue::from)?;
    context.draw_image_with_html_video_element(video, 0.0, 0.0)?;

    canvas.to_data_url_with_type(SNAPSHOT_MIME)
}
