//! ブラウザの fetch による `HttpClient` 実装

use face_client_common::{
    ApiRequest, ApiResponse, Endpoints, Error, FaceApi, FormPart, HttpClient, Result,
    DEFAULT_BASE_URL,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestInit, Response};

/// ビルド時に `FACE_API_BASE_URL` で指定されたバックエンド
const BUILD_BASE_URL: Option<&str> = option_env!("FACE_API_BASE_URL");

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

pub type WebFaceApi = FaceApi<FetchClient>;

pub fn face_api() -> WebFaceApi {
    FaceApi::new(
        FetchClient,
        Endpoints::new(BUILD_BASE_URL.unwrap_or(DEFAULT_BASE_URL)),
    )
}

impl HttpClient for FetchClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(parts) = request.form {
            // Content-Type（boundary付き）はブラウザが付ける
            let form = build_form_data(parts)?;
            init.set_body(&form);
        }

        let window = web_sys::window()
            .ok_or_else(|| Error::Transport("window is not available".to_string()))?;
        let value = JsFuture::from(window.fetch_with_str_and_init(&request.url, &init))
            .await
            .map_err(transport_error)?;
        let response: Response = value.dyn_into().map_err(transport_error)?;

        let status = response.status();
        let content_type = response.headers().get("content-type").ok().flatten();
        let buffer = JsFuture::from(response.array_buffer().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}

fn build_form_data(parts: Vec<FormPart>) -> Result<FormData> {
    let form = FormData::new().map_err(transport_error)?;
    for part in parts {
        match part {
            FormPart::Text { name, value } => form.append_with_str(&name, &value),
            FormPart::File {
                name,
                filename,
                mime_type,
                bytes,
            } => {
                let blob = bytes_to_blob(&bytes, &mime_type)?;
                form.append_with_blob_and_filename(&name, &blob, &filename)
            }
        }
        .map_err(transport_error)?;
    }
    Ok(form)
}

fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<Blob> {
    let array = js_sys::Uint8Array::from(bytes);
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&array), &options)
        .map_err(transport_error)
}

/// fetchの失敗（ネットワーク断・CORSなど）
fn transport_error(value: JsValue) -> Error {
    Error::Transport(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
