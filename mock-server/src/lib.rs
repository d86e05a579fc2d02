//! In-memory implementation of the `/todos` API the task list client talks to.
//!
//! Items keep insertion order. Ids are v4 UUID strings under `_id`, the way
//! the document-store backed server names them. Delete is also routed at
//! `/todos/todos/{id}` because that is the path the client sends by default.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemInput {
    pub title: String,
    pub description: String,
}

pub type Db = Arc<RwLock<Vec<Item>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router pre-populated with `items`.
pub fn app_with(items: Vec<Item>) -> Router {
    let db: Db = Arc::new(RwLock::new(items));
    Router::new()
        .route("/todos", get(list_items).post(create_item))
        .route("/todos/{id}", put(update_item).delete(delete_item))
        .route("/todos/todos/{id}", delete(delete_item))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    Json(db.read().await.clone())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<ItemInput>,
) -> (StatusCode, Json<Item>) {
    let item = Item {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        description: input.description,
    };
    tracing::info!(id = %item.id, "created");
    db.write().await.push(item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, StatusCode> {
    let mut items = db.write().await;
    let item = items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    item.title = input.title;
    item.description = input.description;
    tracing::info!(%id, "updated");
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let mut items = db.write().await;
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
        return StatusCode::NOT_FOUND;
    }
    tracing::info!(%id, "deleted");
    StatusCode::NO_CONTENT
}
