//! reqwestによる `HttpClient` 実装

use face_client_common::{ApiRequest, ApiResponse, Error, FormPart, HttpClient, Method, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    http: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpClient for ReqwestClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        };
        if let Some(parts) = request.form {
            builder = builder.multipart(build_form(parts)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?
            .to_vec();

        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                filename,
                mime_type,
                bytes,
            } => {
                let file = Part::bytes(bytes)
                    .file_name(filename)
                    .mime_str(&mime_type)
                    .map_err(|e| Error::Validation(format!("Invalid MIME type {}: {}", mime_type, e)))?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}
