use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedPayload {
    pub items: Vec<FeedItem>,
}

#[derive(Deserialize)]
pub struct CreateFeedItem {
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: String,
}

pub type Db = Arc<RwLock<Vec<FeedItem>>>;

/// The eight items the end-to-end feed account is expected to hold.
pub fn fixture_items() -> Vec<FeedItem> {
    let item = |id: &str, description: Option<&str>, location: Option<&str>, n: u32| FeedItem {
        id: Uuid::parse_str(id).expect("fixture ids are valid"),
        description: description.map(str::to_string),
        location: location.map(str::to_string),
        image: format!("https://url-{n}.com"),
    };
    vec![
        item("73A7F70C-75DA-4C2E-B5A3-EED40DC53AA6", Some("Description 1"), Some("Location 1"), 1),
        item("BA298A85-6275-48D3-8315-9C8F7C1CD109", None, Some("Location 2"), 2),
        item("5A0D45B3-8E26-4385-8C5D-213E160A5E3C", Some("Description 3"), None, 3),
        item("FF0ECFE2-2879-403F-8DBE-A83B4010B340", None, None, 4),
        item("DC97EF5E-2CC9-4905-A8AD-3C351C311001", Some("Description 5"), Some("Location 5"), 5),
        item("557D87F1-25D3-4D77-82E9-364B2ED9CB30", Some("Description 6"), Some("Location 6"), 6),
        item("A83284EF-C2DF-415D-AB73-2A9B8B04950B", Some("Description 7"), Some("Location 7"), 7),
        item("F79BD7F8-063F-46E2-8147-A67635C3BB01", Some("Description 8"), Some("Location 8"), 8),
    ]
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(fixture_items()));
    Router::new()
        .route("/feed", get(get_feed))
        .route("/feed/items", post(create_item))
        .route("/status/{code}", get(status_only))
        .route("/invalid", get(invalid_json))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_feed(State(db): State<Db>) -> Json<FeedPayload> {
    let items = db.read().await;
    Json(FeedPayload {
        items: items.clone(),
    })
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateFeedItem>,
) -> (StatusCode, Json<FeedItem>) {
    let item = FeedItem {
        id: Uuid::new_v4(),
        description: input.description,
        location: input.location,
        image: input.image,
    };
    debug!(id = %item.id, "appending feed item");
    db.write().await.push(item.clone());
    (StatusCode::CREATED, Json(item))
}

/// Any status with a well-formed, empty feed body.
async fn status_only(Path(code): Path<u16>) -> Result<(StatusCode, Json<FeedPayload>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(FeedPayload { items: Vec::new() })))
}

async fn invalid_json() -> &'static str {
    "invalid json"
}
