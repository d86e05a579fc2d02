//! Stateless HTTP request builder and response parser for the `/todos` API.
//!
//! # Design
//! `TaskApi` holds only a `base_url` and the delete route variant. Each
//! operation is a `build_*` method producing an `HttpRequest` and a
//! `parse_*` method consuming an `HttpResponse`. The parsers encode how the
//! client interprets each endpoint, which is deliberately uneven:
//!
//! - list ignores the status and only requires a JSON array body;
//! - create and update require 2xx; create reads an assigned id from the
//!   body when there is one, and otherwise ignores it;
//! - delete accepts every response.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Item, ItemFields, ItemId};

/// Which URL the delete request is sent to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteRoute {
    /// `{base}/todos/todos/{id}`: the path the deployed client has always
    /// produced. Kept as the default until the server contract is confirmed.
    #[default]
    Nested,
    /// `{base}/todos/{id}`, symmetric with update.
    Item,
}

/// What came back from a delete. Never an error: the item is dropped locally
/// regardless, this only feeds logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub status: u16,
    pub acknowledged: bool,
}

#[derive(Debug, Clone)]
pub struct TaskApi {
    base_url: String,
    delete_route: DeleteRoute,
}

impl TaskApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            delete_route: DeleteRoute::default(),
        }
    }

    pub fn with_delete_route(mut self, route: DeleteRoute) -> Self {
        self.delete_route = route;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn delete_route(&self) -> DeleteRoute {
        self.delete_route
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_item(&self, input: &ItemFields) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url(),
            headers: json_headers(),
            body: Some(serde_json::to_string(input).map_err(ApiError::Serialization)?),
        })
    }

    pub fn build_update_item(
        &self,
        id: &ItemId,
        input: &ItemFields,
    ) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{id}", self.collection_url()),
            headers: json_headers(),
            body: Some(serde_json::to_string(input).map_err(ApiError::Serialization)?),
        })
    }

    pub fn build_delete_item(&self, id: &ItemId) -> HttpRequest {
        let path = match self.delete_route {
            DeleteRoute::Nested => format!("{}/todos/{id}", self.collection_url()),
            DeleteRoute::Item => format!("{}/{id}", self.collection_url()),
        };
        HttpRequest {
            method: HttpMethod::Delete,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        if !response.is_success() {
            tracing::debug!(status = response.status, "list returned non-2xx, reading body anyway");
        }
        serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
    }

    /// Returns the server-assigned id when the body carries one.
    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Option<ItemId>, ApiError> {
        check_success(&response)?;
        Ok(serde_json::from_str::<Created>(&response.body)
            .ok()
            .and_then(|created| created.id))
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }

    pub fn parse_delete_item(&self, response: &HttpResponse) -> DeleteOutcome {
        DeleteOutcome {
            status: response.status,
            acknowledged: response.is_success(),
        }
    }
}

/// Only the identifier of a create response matters; the rest of the body
/// may have any shape.
#[derive(Deserialize)]
struct Created {
    #[serde(rename = "_id", alias = "id", default)]
    id: Option<ItemId>,
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn api() -> TaskApi {
        TaskApi::new("http://localhost:8000")
    }

    #[test]
    fn build_list_items_produces_correct_request() {
        let req = api().build_list_items();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_item_sends_untrimmed_fields() {
        let input = ItemFields::new(" Buy milk ", "two litres");
        let req = api().build_create_item(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": " Buy milk ", "description": "two litres"})
        );
    }

    #[test]
    fn build_update_item_targets_item_path() {
        let req = api()
            .build_update_item(&ItemId::from("abc"), &ItemFields::new("T", "D"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:8000/todos/abc");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "T");
        assert_eq!(body["description"], "D");
    }

    #[test]
    fn build_delete_item_default_route_repeats_collection_segment() {
        let req = api().build_delete_item(&ItemId::from(7_u64));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8000/todos/todos/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_item_item_route() {
        let req = api()
            .with_delete_route(DeleteRoute::Item)
            .build_delete_item(&ItemId::from(7_u64));
        assert_eq!(req.path, "http://localhost:8000/todos/7");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let api = TaskApi::new("http://localhost:8000/");
        assert_eq!(api.build_list_items().path, "http://localhost:8000/todos");
    }

    #[test]
    fn parse_list_items_success() {
        let response = HttpResponse::new(200, r#"[{"id":1,"title":"A","description":"a"}]"#);
        let items = api().parse_list_items(response).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, Some(ItemId::from(1_u64)));
        assert_eq!(items[0].title, "A");
    }

    #[test]
    fn parse_list_items_ignores_status_when_body_is_an_array() {
        let response = HttpResponse::new(500, "[]");
        assert!(api().parse_list_items(response).unwrap().is_empty());
    }

    #[test]
    fn parse_list_items_accepts_negative_ids() {
        let response = HttpResponse::new(200, r#"[{"id":-1,"title":"A","description":"a"}]"#);
        let items = api().parse_list_items(response).unwrap();
        assert_eq!(items[0].id, Some(ItemId::from(-1_i64)));
        let req = api().build_delete_item(items[0].id.as_ref().unwrap());
        assert_eq!(req.path, "http://localhost:8000/todos/todos/-1");
    }

    #[test]
    fn parse_list_items_bad_json() {
        let response = HttpResponse::new(200, "not json");
        let err = api().parse_list_items(response).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_list_items_rejects_non_array() {
        let response = HttpResponse::new(500, r#"{"message":"boom"}"#);
        assert!(api().parse_list_items(response).is_err());
    }

    #[test]
    fn parse_create_item_picks_up_assigned_id() {
        let response = HttpResponse::new(201, r#"{"_id":"n1","title":"B","description":"b"}"#);
        assert_eq!(
            api().parse_create_item(response).unwrap(),
            Some(ItemId::from("n1"))
        );
    }

    #[test]
    fn parse_create_item_tolerates_any_success_body() {
        let response = HttpResponse::new(200, "created");
        assert_eq!(api().parse_create_item(response).unwrap(), None);
        let response = HttpResponse::new(201, r#"{"acknowledged":true}"#);
        assert_eq!(api().parse_create_item(response).unwrap(), None);
        let response = HttpResponse::new(201, r#"{"id":9}"#);
        assert_eq!(
            api().parse_create_item(response).unwrap(),
            Some(ItemId::from(9_u64))
        );
    }

    #[test]
    fn parse_create_item_wrong_status() {
        let response = HttpResponse::new(500, "internal error");
        let err = api().parse_create_item(response).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn parse_update_item_status_only() {
        assert!(api().parse_update_item(HttpResponse::new(200, "")).is_ok());
        let err = api()
            .parse_update_item(HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn parse_delete_item_never_fails() {
        let ok = api().parse_delete_item(&HttpResponse::new(204, ""));
        assert!(ok.acknowledged);
        let missing = api().parse_delete_item(&HttpResponse::new(404, ""));
        assert_eq!(
            missing,
            DeleteOutcome {
                status: 404,
                acknowledged: false
            }
        );
    }
}
