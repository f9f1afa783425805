//! HTTPクライアント結合テスト
//!
//! axumで立てたローカルのバックエンドに対して送受信を検証

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use face_client::client::ReqwestClient;
use face_client_common::{
    EnrollmentController, Endpoints, Error, FaceApi, GalleryController, MatchOutcome,
    NormalizedImage, RecognitionController, WorkflowState,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 受信したマルチパートのフィールド
#[derive(Debug, Clone)]
struct ReceivedField {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

type Received = Arc<Mutex<Vec<ReceivedField>>>;

async fn read_fields(mut multipart: Multipart) -> Vec<ReceivedField> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("multipart") {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.expect("field bytes").to_vec();
        fields.push(ReceivedField {
            name,
            filename,
            content_type,
            data,
        });
    }
    fields
}

async fn upload_face(State(received): State<Received>, multipart: Multipart) -> impl IntoResponse {
    let fields = read_fields(multipart).await;
    let label = fields
        .iter()
        .find(|f| f.name == "label")
        .map(|f| String::from_utf8_lossy(&f.data).to_string());
    let filename = fields
        .iter()
        .find(|f| f.name == "file")
        .and_then(|f| f.filename.clone())
        .unwrap_or_default();
    received.lock().unwrap().extend(fields);

    (
        StatusCode::CREATED,
        Json(json!({
            "id": "f1",
            "filename": filename,
            "label": label.unwrap_or_default(),
            "message": "Face uploaded successfully"
        })),
    )
}

async fn recognize_match(State(received): State<Received>, multipart: Multipart) -> impl IntoResponse {
    let fields = read_fields(multipart).await;
    received.lock().unwrap().extend(fields);
    Json(json!({
        "cosine_similarity": 0.92,
        "cosine_distance": 0.08,
        "search_vector": [0.1, 0.2],
        "matched_record": {
            "id": "f1",
            "filename": "alice.jpg",
            "label": "alice",
            "created_at": "2024-01-01T00:00:00",
            "feature_vector": [0.1, 0.2]
        }
    }))
}

async fn recognize_no_match(multipart: Multipart) -> impl IntoResponse {
    let _ = read_fields(multipart).await;
    Json(json!({
        "cosine_similarity": 0.31,
        "cosine_distance": 0.69,
        "search_vector": [],
        "matched_record": null
    }))
}

async fn recognize_no_face(multipart: Multipart) -> impl IntoResponse {
    let _ = read_fields(multipart).await;
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "No face detected" })),
    )
}

async fn list_faces(
    State(received): State<Received>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    // クエリはフィールドとして記録する
    for (name, value) in params {
        received.lock().unwrap().push(ReceivedField {
            name,
            filename: None,
            content_type: None,
            data: value.into_bytes(),
        });
    }
    Json(json!({
        "faces": [
            { "id": "a", "filename": "a.jpg", "label": "alice", "created_at": "2024-01-01T00:00:00" },
            { "id": "b", "filename": "b.jpg", "label": "bob", "created_at": "2024-01-02T00:00:00" }
        ],
        "count": 45
    }))
}

async fn face_image(Path(id): Path<String>) -> impl IntoResponse {
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            br#"{"detail":"Face not found"}"#.to_vec(),
        );
    }
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png")],
        vec![0x89, 0x50, 0x4e, 0x47],
    )
}

/// 127.0.0.1の空きポートでルーターを起動し、ベースURLを返す
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{}", addr)
}

fn backend(received: &Received, recognize: Router<Received>) -> Router {
    Router::new()
        .route("/upload-face", post(upload_face))
        .route("/faces", get(list_faces))
        .route("/faces/{id}/image", get(face_image))
        .merge(recognize)
        .with_state(received.clone())
}

fn api(base_url: &str) -> FaceApi<ReqwestClient> {
    FaceApi::new(ReqwestClient::new(), Endpoints::new(base_url))
}

fn jpeg_image(filename: &str) -> NormalizedImage {
    NormalizedImage {
        bytes: vec![0xff, 0xd8, 0xff, 0xe0],
        mime_type: "image/jpeg".to_string(),
        filename: filename.to_string(),
    }
}

/// 登録: ファイルとトリム済みラベルが送られる
#[tokio::test]
async fn test_enrollment_sends_file_and_trimmed_label() {
    let received = Received::default();
    let url = spawn_backend(backend(
        &received,
        Router::new().route("/recognize", post(recognize_match)),
    ))
    .await;
    let api = api(&url);

    let response = api
        .submit_enrollment(jpeg_image("alice.jpg"), "  alice  ")
        .await
        .expect("enrollment");
    assert_eq!(response.id, "f1");
    assert_eq!(response.filename, "alice.jpg");
    assert_eq!(response.label, "alice");

    let fields = received.lock().unwrap().clone();
    assert_eq!(fields.len(), 2);
    let file = fields.iter().find(|f| f.name == "file").expect("file field");
    assert_eq!(file.filename.as_deref(), Some("alice.jpg"));
    assert_eq!(file.content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(file.data, vec![0xff, 0xd8, 0xff, 0xe0]);
    let label = fields.iter().find(|f| f.name == "label").expect("label field");
    assert_eq!(label.data, b"alice".to_vec());
}

/// 登録: Webカメラのスナップショットはタイムスタンプ付きのファイル名で送られる
#[tokio::test]
async fn test_enrollment_controller_with_snapshot() {
    let received = Received::default();
    let url = spawn_backend(backend(
        &received,
        Router::new().route("/recognize", post(recognize_match)),
    ))
    .await;
    let api = api(&url);

    let mut form = EnrollmentController::new();
    form.capture_snapshot("data:image/jpeg;base64,/9j/4A==".to_string());
    form.set_label("bob");
    let state = form.submit(&api, 1700000000000).await.clone();

    let response = state.success().expect("success");
    assert_eq!(response.filename, "webcam-capture-1700000000000.jpg");
    // 成功後は入力がクリアされる
    assert!(form.capture().is_none());
    assert_eq!(form.label(), "");

    let fields = received.lock().unwrap().clone();
    let file = fields.iter().find(|f| f.name == "file").expect("file field");
    assert_eq!(file.data, vec![0xff, 0xd8, 0xff, 0xe0]);
}

/// 認識: 一致あり
#[tokio::test]
async fn test_recognition_match() {
    let received = Received::default();
    let url = spawn_backend(backend(
        &received,
        Router::new().route("/recognize", post(recognize_match)),
    ))
    .await;
    let api = api(&url);

    let result = api
        .submit_recognition(jpeg_image("probe.jpg"))
        .await
        .expect("recognition");
    assert_eq!(result.similarity_percent(), 92);
    match result.outcome() {
        MatchOutcome::Matched(record) => {
            assert_eq!(record.label, "alice");
            assert_eq!(record.id, "f1");
        }
        MatchOutcome::NoMatch => panic!("expected a match"),
    }

    // 認識ではラベルを送らない
    let fields = received.lock().unwrap().clone();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "file");
}

/// 認識: matched_record が null なら「一致なし」でエラーではない
#[tokio::test]
async fn test_recognition_no_match_is_success() {
    let received = Received::default();
    let url = spawn_backend(backend(
        &received,
        Router::new().route("/recognize", post(recognize_no_match)),
    ))
    .await;
    let api = api(&url);

    let mut form = RecognitionController::new();
    form.select_file(vec![1, 2, 3], "probe.png".to_string(), "image/png".to_string());
    let state = form.submit(&api, 0).await;

    let result = state.success().expect("success");
    assert_eq!(result.outcome(), MatchOutcome::NoMatch);
    // 認識後もキャプチャは残る
    assert!(form.capture().is_some());
}

/// 認識: バックエンドの detail がそのままエラーメッセージになる
#[tokio::test]
async fn test_recognition_backend_detail() {
    let received = Received::default();
    let url = spawn_backend(backend(
        &received,
        Router::new().route("/recognize", post(recognize_no_face)),
    ))
    .await;
    let api = api(&url);

    let err = api
        .submit_recognition(jpeg_image("probe.jpg"))
        .await
        .unwrap_err();
    assert_eq!(err, Error::Remote("No face detected".to_string()));

    let mut form = RecognitionController::new();
    form.select_file(vec![1], "probe.jpg".to_string(), "image/jpeg".to_string());
    let state = form.submit(&api, 0).await;
    assert!(matches!(state, WorkflowState::Failed(msg) if msg == "No face detected"));
}

/// ギャラリー: ページ番号とページサイズがクエリで送られ、件数からページ数が決まる
#[tokio::test]
async fn test_gallery_query_and_total_pages() {
    let received = Received::default();
    let url = spawn_backend(backend(
        &received,
        Router::new().route("/recognize", post(recognize_match)),
    ))
    .await;
    let api = api(&url);

    let mut gallery = GalleryController::new();
    let state = gallery.go_to(2, &api).await;
    let page = state.success().expect("gallery page");
    assert_eq!(page.faces.len(), 2);
    assert_eq!(page.total_count, 45);
    assert_eq!(page.page_index, 2);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(gallery.total_pages(), 3);

    let fields = received.lock().unwrap().clone();
    let query: HashMap<String, Vec<u8>> =
        fields.into_iter().map(|f| (f.name, f.data)).collect();
    assert_eq!(query.get("page"), Some(&b"2".to_vec()));
    assert_eq!(query.get("pageSize"), Some(&b"20".to_vec()));
}

/// 画像取得: バイナリとContent-Typeをそのまま返す
#[tokio::test]
async fn test_fetch_face_image_bytes() {
    let received = Received::default();
    let url = spawn_backend(backend(
        &received,
        Router::new().route("/recognize", post(recognize_match)),
    ))
    .await;
    let api = api(&url);

    let image = api.fetch_face_image("f1").await.expect("image");
    assert_eq!(image.bytes, vec![0x89, 0x50, 0x4e, 0x47]);
    assert_eq!(image.content_type, "image/png");

    let err = api.fetch_face_image("missing").await.unwrap_err();
    assert_eq!(err, Error::Remote("Face not found".to_string()));
}

/// 接続できない場合は Transport エラー
#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // 一度bindしてすぐ閉じたポートには誰もいない
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let api = api(&format!("http://{}", addr));
    let err = api.fetch_gallery(1, 20).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
