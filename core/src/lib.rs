//! Deterministic core of the task list client.
//!
//! # Overview
//! Holds the list of items, the create form draft and the single inline edit
//! session, and talks to a four-endpoint `/todos` HTTP API. Nothing in this
//! crate performs I/O: `TaskListClient` emits `Command`s (send a request,
//! start a status timer, ask for confirmation) and the host reports the
//! outcomes back.
//!
//! # Design
//! - `TaskApi` is stateless: `build_*` produces an `HttpRequest`, `parse_*`
//!   interprets an `HttpResponse`.
//! - `TaskListState::reduce` is the only mutator, driven by a tagged `Action`.
//! - `view::render` turns the state into a `View` the host can draw.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod state;
pub mod types;
pub mod view;

pub use api::{DeleteOutcome, DeleteRoute, TaskApi};
pub use client::{Command, Pending, TaskListClient, DEFAULT_STATUS_TTL, DELETE_PROMPT};
pub use error::{ApiError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use state::{Action, Banner, EditSession, TaskListState};
pub use types::{Field, Item, ItemFields, ItemId};
pub use view::{BannerKind, BannerView, Row, RowMode, View};
