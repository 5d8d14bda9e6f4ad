//! Remote seam for a section: the four collection operations.

use crate::adapter::EntityAdapter;
use async_trait::async_trait;
use profile_http::{ApiRequest, ProfileClient, Result as ApiResult};
use std::marker::PhantomData;

/// The authoritative store behind a section.
///
/// `list` returns the full snapshot in server order. Create and update
/// results are not read back: the controller always refetches.
#[async_trait]
pub trait CollectionRemote<A: EntityAdapter>: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<A::Wire>>;
    async fn create(&self, record: A::Wire) -> ApiResult<()>;
    async fn update(&self, id: i64, record: A::Wire) -> ApiResult<()>;
    async fn delete(&self, id: i64) -> ApiResult<()>;
}

/// REST implementation: `GET/POST /{resource}`, `PATCH/DELETE /{resource}/{id}`.
pub struct RestCollection<A> {
    client: ProfileClient,
    performer_id: Option<i64>,
    _adapter: PhantomData<fn() -> A>,
}

impl<A: EntityAdapter> RestCollection<A> {
    pub fn new(client: ProfileClient) -> Self {
        Self {
            client,
            performer_id: None,
            _adapter: PhantomData,
        }
    }

    /// Lists another performer's section instead of the session owner's.
    pub fn for_performer(mut self, performer_id: i64) -> Self {
        self.performer_id = Some(performer_id);
        self
    }

    pub fn client(&self) -> &ProfileClient {
        &self.client
    }

    async fn send(&self, path: &str, request: ApiRequest) -> ApiResult<profile_http::ApiResponse> {
        let url = self.client.endpoint(path)?;
        self.client.fetch(&url, request).await?.error_for_status()
    }
}

#[async_trait]
impl<A: EntityAdapter> CollectionRemote<A> for RestCollection<A> {
    async fn list(&self) -> ApiResult<Vec<A::Wire>> {
        let mut request = ApiRequest::get();
        if let Some(id) = self.performer_id {
            request = request.with_query("performerId", id.to_string());
        }
        let response = self.send(&A::collection_path(), request).await?;
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        response.json()
    }

    async fn create(&self, record: A::Wire) -> ApiResult<()> {
        let body = A::request_body(&record)?;
        self.send(&A::collection_path(), ApiRequest::post().with_body(body))
            .await?;
        tracing::debug!("[Remote:{}] created record", A::KIND);
        Ok(())
    }

    async fn update(&self, id: i64, record: A::Wire) -> ApiResult<()> {
        let body = A::request_body(&record)?;
        self.send(&A::item_path(id), ApiRequest::patch().with_body(body))
            .await?;
        tracing::debug!("[Remote:{}] updated record {}", A::KIND, id);
        Ok(())
    }

    async fn delete(&self, id: i64) -> ApiResult<()> {
        self.send(&A::item_path(id), ApiRequest::delete()).await?;
        tracing::debug!("[Remote:{}] deleted record {}", A::KIND, id);
        Ok(())
    }
}
