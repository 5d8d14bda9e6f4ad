use crate::error::{ApiError, Result};
use crate::traits::ProfileNetwork;
use crate::types::{ApiRequest, ApiResponse, MultipartForm, RequestBody};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::collections::BTreeMap;

pub struct NativeNetwork {
    client: Client,
}

impl NativeNetwork {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn build_form(form: &MultipartForm) -> Result<Form> {
    let mut out = Form::new();
    for (name, value) in &form.fields {
        out = out.text(name.clone(), value.clone());
    }
    for file in &form.files {
        let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        if let Some(mime) = &file.mime {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::Multipart(format!("{}: {}", file.file_name, e)))?;
        }
        out = out.part(file.name.clone(), part);
    }
    Ok(out)
}

fn map_send_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Http(e.to_string())
    }
}

#[async_trait]
impl ProfileNetwork for NativeNetwork {
    async fn fetch(&self, url: &str, request: ApiRequest) -> Result<ApiResponse> {
        let method = match request.method.to_uppercase().as_str() {
            "POST" => reqwest::Method::POST,
            "PUT" => reqwest::Method::PUT,
            "DELETE" => reqwest::Method::DELETE,
            "PATCH" => reqwest::Method::PATCH,
            "HEAD" => reqwest::Method::HEAD,
            _ => reqwest::Method::GET,
        };

        let mut target = url::Url::parse(url)?;
        if !request.query.is_empty() {
            target
                .query_pairs_mut()
                .extend_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut req_builder = self
            .client
            .request(method.clone(), target.as_str())
            .header(reqwest::header::ACCEPT, "application/json");

        for (k, v) in &request.extra_headers {
            req_builder = req_builder.header(k, v);
        }

        req_builder = match &request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Json(bytes) => req_builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes.clone()),
            RequestBody::Multipart(form) => req_builder.multipart(build_form(form)?),
        };

        tracing::debug!("[ProfileHTTP-Out] {} {}", method, target);

        let response = req_builder.send().await.map_err(map_send_error)?;

        let status = response.status().as_u16();
        let mut headers = BTreeMap::new();
        for (k, v) in response.headers() {
            if let Ok(val) = v.to_str() {
                headers.insert(k.as_str().to_string(), val.to_string());
            }
        }

        let body = response.bytes().await.map_err(map_send_error)?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
