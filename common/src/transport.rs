//! アップロード・取得の通信処理
//!
//! 実際のHTTP送信は `HttpClient` に任せる（CLIはreqwest、Webはfetch）。
//! ここではリクエストの組み立てとレスポンスの解釈だけを行う。

use crate::endpoints::Endpoints;
use crate::error::{Error, Result};
use crate::normalizer::DEFAULT_MIME_TYPE;
use crate::types::{
    EnrollResponse, FaceImage, FaceListResponse, GalleryPage, NormalizedImage, RecognitionResult,
};
use futures::future::{AbortRegistration, Abortable};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// multipartの1フィールド
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// `Some` ならmultipart/form-dataで送信
    pub form: Option<Vec<FormPart>>,
}

impl ApiRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: Method::Get,
            url,
            form: None,
        }
    }

    pub fn multipart(url: String, parts: Vec<FormPart>) -> Self {
        Self {
            method: Method::Post,
            url,
            form: Some(parts),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP送信の抽象
///
/// レスポンスを得られなかった場合は `Error::Transport` を返すこと。
/// ステータスコードの解釈は呼び出し側（`FaceApi`）で行う。
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// 操作の種類（フォールバックメッセージ用）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Enrollment,
    Recognition,
    FaceImage,
    Gallery,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Enrollment => "Upload failed",
            Operation::Recognition => "Recognition failed",
            Operation::FaceImage => "Face image fetch failed",
            Operation::Gallery => "Gallery fetch failed",
        }
    }
}

/// 送信内容（登録 or 認識）
#[derive(Debug, Clone, PartialEq)]
pub enum UploadRequest {
    Enrollment { image: NormalizedImage, label: String },
    Recognition { image: NormalizedImage },
}

impl UploadRequest {
    /// ラベルは前後の空白を除去して保持する
    pub fn enrollment(image: NormalizedImage, label: &str) -> Result<Self> {
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::Validation("Label is required".to_string()));
        }
        ensure_image(&image)?;
        Ok(UploadRequest::Enrollment {
            image,
            label: label.to_string(),
        })
    }

    pub fn recognition(image: NormalizedImage) -> Result<Self> {
        ensure_image(&image)?;
        Ok(UploadRequest::Recognition { image })
    }

    pub fn operation(&self) -> Operation {
        match self {
            UploadRequest::Enrollment { .. } => Operation::Enrollment,
            UploadRequest::Recognition { .. } => Operation::Recognition,
        }
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        match self {
            UploadRequest::Enrollment { image, label } => vec![
                file_part(image),
                FormPart::Text {
                    name: "label".to_string(),
                    value: label,
                },
            ],
            UploadRequest::Recognition { image } => vec![file_part(image)],
        }
    }
}

fn ensure_image(image: &NormalizedImage) -> Result<()> {
    if image.bytes.is_empty() {
        return Err(Error::Validation("An image is required".to_string()));
    }
    Ok(())
}

fn file_part(image: NormalizedImage) -> FormPart {
    FormPart::File {
        name: "file".to_string(),
        filename: image.filename,
        mime_type: image.mime_type,
        bytes: image.bytes,
    }
}

/// 顔認識バックエンドのクライアント
#[derive(Debug, Clone)]
pub struct FaceApi<C> {
    client: C,
    endpoints: Endpoints,
}

impl<C: HttpClient> FaceApi<C> {
    pub fn new(client: C, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// 顔を登録する（`POST /upload-face`）
    ///
    /// ラベルが空なら通信せずに `Error::Validation` を返す。
    pub async fn submit_enrollment(
        &self,
        image: NormalizedImage,
        label: &str,
    ) -> Result<EnrollResponse> {
        let request = UploadRequest::enrollment(image, label)?;
        self.upload(self.endpoints.upload_face(), request).await
    }

    /// 類似顔を検索する（`POST /recognize`）
    pub async fn submit_recognition(&self, image: NormalizedImage) -> Result<RecognitionResult> {
        let request = UploadRequest::recognition(image)?;
        self.upload(self.endpoints.recognize(), request).await
    }

    /// 登録済み画像を取得する（`GET /faces/{id}/image`）
    pub async fn fetch_face_image(&self, id: &str) -> Result<FaceImage> {
        let response = self
            .send(Operation::FaceImage, ApiRequest::get(self.endpoints.face_image(id)))
            .await?;
        let content_type = response
            .content_type
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        Ok(FaceImage {
            bytes: response.body,
            content_type,
        })
    }

    /// ギャラリー1ページ分を取得する（`GET /faces?page=&pageSize=`）
    pub async fn fetch_gallery(&self, page_index: u32, page_size: u32) -> Result<GalleryPage> {
        let response = self
            .send(
                Operation::Gallery,
                ApiRequest::get(self.endpoints.faces(page_index, page_size)),
            )
            .await?;
        let list: FaceListResponse = decode_body(Operation::Gallery, &response)?;
        let total_count = list.count.unwrap_or(list.faces.len() as u64);
        Ok(GalleryPage {
            faces: list.faces,
            total_count,
            page_index,
            page_size,
        })
    }

    async fn upload<T: DeserializeOwned>(&self, url: String, request: UploadRequest) -> Result<T> {
        let operation = request.operation();
        let response = self
            .send(operation, ApiRequest::multipart(url, request.into_parts()))
            .await?;
        decode_body(operation, &response)
    }

    /// 送信して2xx以外をエラーに変換する
    async fn send(&self, operation: Operation, request: ApiRequest) -> Result<ApiResponse> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.client.execute(request).await?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "response received");

        if response.is_success() {
            Ok(response)
        } else {
            Err(failure_from_response(operation, &response))
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// 非2xxレスポンスをエラーに変換する
///
/// `detail` が空でない文字列なら `Error::Remote`、それ以外は操作ごとの既定メッセージ。
pub fn failure_from_response(operation: Operation, response: &ApiResponse) -> Error {
    let detail = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        });

    match detail {
        Some(detail) => Error::Remote(detail),
        None => Error::Transport(operation.failure_message().to_string()),
    }
}

fn decode_body<T: DeserializeOwned>(operation: Operation, response: &ApiResponse) -> Result<T> {
    serde_json::from_slice(&response.body).map_err(|e| {
        tracing::debug!(error = %e, "response body could not be decoded");
        Error::Transport(operation.failure_message().to_string())
    })
}

/// 中断可能な呼び出しにする
///
/// 対応する `AbortHandle::abort` が呼ばれると `Error::Cancelled` で終わる。
pub async fn cancellable<T, F>(future: F, registration: AbortRegistration) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match Abortable::new(future, registration).await {
        Ok(result) => result,
        Err(_) => Err(Error::Cancelled),
    }
}
