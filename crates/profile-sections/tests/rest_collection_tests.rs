use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use bytes::Bytes;
use parking_lot::Mutex;
use profile_http::{ApiError, ClientConfig, ProfileClient, Session};
use profile_sections::entities::*;
use profile_sections::{
    CollectionRemote, Outcome, RestCollection, SectionContext, SectionController,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct Backend {
    achievements: Vec<Value>,
    gallery: Vec<Value>,
    next_id: i64,
    authorizations: Vec<Option<String>>,
    performer_queries: Vec<Option<String>>,
    uploads: Vec<(String, usize)>,
}

type Shared = Arc<Mutex<Backend>>;

impl Backend {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn seen(&mut self, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.authorizations.push(auth);
    }
}

async fn list_achievements(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut backend = state.lock();
    backend.seen(&headers);
    backend.performer_queries.push(query.get("performerId").cloned());
    Json(Value::Array(backend.achievements.clone()))
}

async fn create_achievement(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut backend = state.lock();
    backend.seen(&headers);
    let id = backend.allocate();
    body["id"] = json!(id);
    backend.achievements.insert(0, body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update_achievement(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = state.lock();
    let slot = backend
        .achievements
        .iter_mut()
        .find(|r| r["id"] == json!(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = json!(id);
    *slot = body.clone();
    Ok(Json(body))
}

async fn delete_achievement(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    state.lock().achievements.retain(|r| r["id"] != json!(id));
    StatusCode::NO_CONTENT
}

/// Reads the gallery form into (text fields, optional uploaded file).
async fn read_form(mut multipart: Multipart) -> (HashMap<String, String>, Option<(String, usize)>) {
    let mut fields = HashMap::new();
    let mut file = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.unwrap();
        match file_name {
            Some(file_name) if name == IMAGE_FIELD => file = Some((file_name, data.len())),
            _ => {
                fields.insert(name, String::from_utf8_lossy(&data).into_owned());
            }
        }
    }
    (fields, file)
}

fn apply_gallery_form(
    backend: &mut Backend,
    id: i64,
    fields: &HashMap<String, String>,
    file: Option<(String, usize)>,
) -> Value {
    let is_profile_picture = fields.get("isProfilePicture").map(String::as_str) == Some("true");
    if is_profile_picture {
        for image in backend.gallery.iter_mut() {
            image["isProfilePicture"] = json!(false);
        }
    }
    let image_url = match &file {
        Some((name, _)) => json!(format!("https://cdn.example.com/{}", name)),
        None => backend
            .gallery
            .iter()
            .find(|r| r["id"] == json!(id))
            .map(|r| r["imageUrl"].clone())
            .unwrap_or(Value::Null),
    };
    if let Some(upload) = file {
        backend.uploads.push(upload);
    }
    json!({
        "id": id,
        "caption": fields.get("caption").cloned().unwrap_or_default(),
        "isProfilePicture": is_profile_picture,
        "imageUrl": image_url,
    })
}

async fn list_gallery(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().gallery.clone()))
}

async fn create_gallery(State(state): State<Shared>, multipart: Multipart) -> (StatusCode, Json<Value>) {
    let (fields, file) = read_form(multipart).await;
    let mut backend = state.lock();
    let id = backend.allocate();
    let record = apply_gallery_form(&mut backend, id, &fields, file);
    backend.gallery.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn update_gallery(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Json<Value> {
    let (fields, file) = read_form(multipart).await;
    let mut backend = state.lock();
    let record = apply_gallery_form(&mut backend, id, &fields, file);
    if let Some(slot) = backend.gallery.iter_mut().find(|r| r["id"] == json!(id)) {
        *slot = record.clone();
    }
    Json(record)
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn spawn(state: Shared) -> String {
    let app = Router::new()
        .route("/api/achievements", get(list_achievements).post(create_achievement))
        .route(
            "/api/achievements/{id}",
            patch(update_achievement).delete(delete_achievement),
        )
        .route("/api/gallery", get(list_gallery).post(create_gallery))
        .route("/api/gallery/{id}", patch(update_gallery))
        .route("/api/contacts", get(broken))
        .route("/api/links", get(empty))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

async fn client(state: &Shared) -> ProfileClient {
    let base = spawn(state.clone()).await;
    ProfileClient::with_config(ClientConfig::default().with_base_url(base))
        .unwrap()
        .with_session(Session::with_token("s3cret"))
}

#[tokio::test]
async fn test_achievement_lifecycle_over_rest() {
    let state = Shared::default();
    let remote = Arc::new(RestCollection::<AchievementAdapter>::new(client(&state).await));
    let controller = SectionController::new(remote, SectionContext::owner());

    controller.load().await.unwrap();
    assert!(controller.items().is_empty());

    controller.add().unwrap();
    let outcome = controller
        .save(Achievement {
            rank: "1st".into(),
            field: "Dance".into(),
            show_name: "Spring".into(),
            year: Some(2023),
            ..Achievement::default()
        })
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::Applied);
    let items = controller.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, Some(1));
    assert_eq!(items[0].show_name, "Spring");
    assert_eq!(state.lock().achievements[0]["showName"], "Spring");

    controller.edit(0).unwrap();
    let mut updated = items[0].clone();
    updated.rank = "Gold".into();
    controller.save(updated).await.unwrap();
    assert_eq!(controller.items()[0].rank, "Gold");

    controller.request_delete(0).unwrap();
    controller.confirm_delete().await.unwrap();
    assert!(controller.items().is_empty());
    assert!(state.lock().achievements.is_empty());

    let backend = state.lock();
    assert!(backend
        .authorizations
        .iter()
        .all(|a| a.as_deref() == Some("Bearer s3cret")));
}

#[tokio::test]
async fn test_list_for_performer_sends_query() {
    let state = Shared::default();
    let remote = RestCollection::<AchievementAdapter>::new(client(&state).await).for_performer(42);

    let records = remote.list().await.unwrap();
    assert!(records.is_empty());
    assert_eq!(state.lock().performer_queries, vec![Some("42".to_string())]);
}

#[tokio::test]
async fn test_gallery_upload_keeps_single_profile_picture() {
    let state = Shared::default();
    let remote = Arc::new(RestCollection::<GalleryAdapter>::new(client(&state).await));
    let controller = SectionController::new(remote, SectionContext::owner());

    for (name, caption) in [("one.jpg", "Headshot"), ("two.jpg", "Stage")] {
        controller.add().unwrap();
        controller
            .save(GalleryImage {
                caption: caption.into(),
                is_profile_picture: true,
                upload: Some(ImageUpload {
                    file_name: name.into(),
                    mime: Some("image/jpeg".into()),
                    bytes: Bytes::from_static(b"\xff\xd8\xff\xe0"),
                }),
                ..GalleryImage::default()
            })
            .await
            .unwrap();
    }

    let items = controller.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].caption, "Headshot");
    assert!(!items[0].is_profile_picture);
    assert!(items[1].is_profile_picture);
    assert_eq!(
        items[1].image_url.as_deref(),
        Some("https://cdn.example.com/two.jpg")
    );
    assert!(items.iter().all(|i| i.upload.is_none()));
    assert_eq!(
        state.lock().uploads,
        vec![("one.jpg".to_string(), 4), ("two.jpg".to_string(), 4)]
    );

    // Caption-only edit: no file part, image kept.
    controller.edit(0).unwrap();
    let mut first = items[0].clone();
    first.caption = "Portrait".into();
    controller.save(first).await.unwrap();
    let items = controller.items();
    assert_eq!(items[0].caption, "Portrait");
    assert_eq!(
        items[0].image_url.as_deref(),
        Some("https://cdn.example.com/one.jpg")
    );
    assert_eq!(state.lock().uploads.len(), 2);
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let state = Shared::default();
    let remote = RestCollection::<ContactAdapter>::new(client(&state).await);

    match remote.list().await {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_list_body_is_empty_section() {
    let state = Shared::default();
    let remote = RestCollection::<PublicLinkAdapter>::new(client(&state).await);
    assert!(remote.list().await.unwrap().is_empty());
}
