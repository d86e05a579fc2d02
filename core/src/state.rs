//! Explicit task list state and the reducer over it.
//!
//! # Design
//! Every mutation goes through `TaskListState::reduce` with a tagged
//! `Action`, so each transition is a pure function of (state, action) and can
//! be tested without a host. The single inline-edit slot is an
//! `EditSession`: at most one item can be `Editing` because there is only
//! one place to keep its draft.

use crate::types::{Field, Item, ItemFields, ItemId};

pub const FETCH_FAILED: &str = "Unable to fetch todos";
pub const FIELDS_REQUIRED: &str = "Title and description are required";
pub const CREATE_FAILED: &str = "Unable to create todo item";
pub const UPDATE_FAILED: &str = "Unable to update todo item";
pub const CONNECTION_FAILED: &str = "Unable to connect to server";
pub const ITEM_ADDED: &str = "Item added successfully ✅";
pub const ITEM_UPDATED: &str = "Item updated successfully ✅";

/// The at-most-one inline edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSession {
    /// No row is in edit mode. `stale` is whatever text was left in the
    /// edit inputs when the last session was cancelled.
    Idle { stale: ItemFields },
    Editing { id: ItemId, draft: ItemFields },
}

impl Default for EditSession {
    fn default() -> Self {
        EditSession::Idle {
            stale: ItemFields::default(),
        }
    }
}

impl EditSession {
    pub fn editing_id(&self) -> Option<&ItemId> {
        match self {
            EditSession::Editing { id, .. } => Some(id),
            EditSession::Idle { .. } => None,
        }
    }

    pub fn draft(&self) -> &ItemFields {
        match self {
            EditSession::Idle { stale } => stale,
            EditSession::Editing { draft, .. } => draft,
        }
    }

    fn draft_mut(&mut self) -> &mut ItemFields {
        match self {
            EditSession::Idle { stale } => stale,
            EditSession::Editing { draft, .. } => draft,
        }
    }
}

/// The one user-visible message line. Status and error never show together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Banner {
    #[default]
    None,
    /// Transient success message; `generation` identifies the timer allowed
    /// to clear it.
    Status {
        text: &'static str,
        generation: u64,
    },
    /// Stays until the next action clears or replaces it.
    Error(&'static str),
}

impl Banner {
    pub fn status_generation(&self) -> Option<u64> {
        match self {
            Banner::Status { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}

/// State transitions, one per thing that can happen to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadSucceeded(Vec<Item>),
    LoadFailed,
    NewDraftChanged(Field, String),
    EditDraftChanged(Field, String),
    /// A create or update submit began: clears the banner.
    SubmitStarted,
    ValidationFailed,
    CreateSucceeded {
        fields: ItemFields,
        id: Option<ItemId>,
    },
    CreateRejected,
    EditStarted {
        id: ItemId,
        fields: ItemFields,
    },
    EditCancelled,
    UpdateSucceeded {
        id: ItemId,
        fields: ItemFields,
    },
    UpdateRejected,
    ConnectionFailed,
    DeleteConfirmed(ItemId),
    StatusExpired(u64),
}

#[derive(Debug, Clone, Default)]
pub struct TaskListState {
    pub new_draft: ItemFields,
    pub edit: EditSession,
    pub items: Vec<Item>,
    pub banner: Banner,
    next_generation: u64,
}

impl TaskListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id.as_ref() == Some(id))
    }

    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::LoadSucceeded(items) => self.items = items,
            Action::LoadFailed => self.banner = Banner::Error(FETCH_FAILED),
            Action::NewDraftChanged(field, value) => self.new_draft.set(field, value),
            Action::EditDraftChanged(field, value) => self.edit.draft_mut().set(field, value),
            Action::SubmitStarted => self.banner = Banner::None,
            Action::ValidationFailed => self.banner = Banner::Error(FIELDS_REQUIRED),
            Action::CreateSucceeded { fields, id } => {
                self.items.push(Item {
                    id,
                    title: fields.title,
                    description: fields.description,
                });
                self.show_status(ITEM_ADDED);
                self.new_draft = ItemFields::default();
            }
            Action::CreateRejected => self.banner = Banner::Error(CREATE_FAILED),
            Action::EditStarted { id, fields } => {
                self.edit = EditSession::Editing { id, draft: fields };
            }
            Action::EditCancelled => {
                let stale = self.edit.draft().clone();
                self.edit = EditSession::Idle { stale };
            }
            Action::UpdateSucceeded { id, fields } => {
                for item in self
                    .items
                    .iter_mut()
                    .filter(|item| item.id.as_ref() == Some(&id))
                {
                    item.title.clone_from(&fields.title);
                    item.description.clone_from(&fields.description);
                }
                self.show_status(ITEM_UPDATED);
                self.edit = EditSession::default();
            }
            Action::UpdateRejected => self.banner = Banner::Error(UPDATE_FAILED),
            Action::ConnectionFailed => self.banner = Banner::Error(CONNECTION_FAILED),
            Action::DeleteConfirmed(id) => self.items.retain(|item| item.id.as_ref() != Some(&id)),
            Action::StatusExpired(generation) => {
                if self.banner.status_generation() == Some(generation) {
                    self.banner = Banner::None;
                }
            }
        }
    }

    fn show_status(&mut self, text: &'static str) {
        self.next_generation += 1;
        self.banner = Banner::Status {
            text,
            generation: self.next_generation,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(id: u64, title: &str, description: &str) -> Item {
        Item {
            id: Some(ItemId::from(id)),
            title: title.into(),
            description: description.into(),
        }
    }

    fn loaded() -> TaskListState {
        let mut state = TaskListState::new();
        state.reduce(Action::LoadSucceeded(vec![
            item(1, "A", "a"),
            item(2, "B", "b"),
            item(3, "C", "c"),
        ]));
        state
    }

    #[test]
    fn load_failure_keeps_items() {
        let mut state = loaded();
        state.reduce(Action::LoadFailed);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.banner, Banner::Error(FETCH_FAILED));
    }

    #[test]
    fn create_appends_and_clears_draft() {
        let mut state = loaded();
        state.reduce(Action::NewDraftChanged(Field::Title, "D".into()));
        state.reduce(Action::NewDraftChanged(Field::Description, "d".into()));
        state.reduce(Action::CreateSucceeded {
            fields: ItemFields::new("D", "d"),
            id: None,
        });
        let last = state.items.last().unwrap();
        assert_eq!(last.title, "D");
        assert_eq!(last.description, "d");
        assert!(last.id.is_none());
        assert_eq!(state.new_draft, ItemFields::default());
        assert!(matches!(state.banner, Banner::Status { text: ITEM_ADDED, .. }));
    }

    #[test]
    fn update_touches_only_matching_item() {
        let mut state = loaded();
        let before = state.items.clone();
        state.reduce(Action::EditStarted {
            id: ItemId::from(2_u64),
            fields: before[1].fields(),
        });
        state.reduce(Action::UpdateSucceeded {
            id: ItemId::from(2_u64),
            fields: ItemFields::new("B2", "b2"),
        });
        assert_eq!(state.items[0], before[0]);
        assert_eq!(state.items[1], item(2, "B2", "b2"));
        assert_eq!(state.items[2], before[2]);
        assert_eq!(state.edit, EditSession::default());
        assert!(matches!(state.banner, Banner::Status { text: ITEM_UPDATED, .. }));
    }

    #[test]
    fn cancel_keeps_stale_edit_text() {
        let mut state = loaded();
        state.reduce(Action::EditStarted {
            id: ItemId::from(1_u64),
            fields: ItemFields::new("A", "a"),
        });
        state.reduce(Action::EditDraftChanged(Field::Title, "A!".into()));
        state.reduce(Action::EditCancelled);
        assert_eq!(state.edit.editing_id(), None);
        assert_eq!(state.edit.draft(), &ItemFields::new("A!", "a"));
        assert_eq!(state.items[0], item(1, "A", "a"));
    }

    #[test]
    fn second_edit_replaces_first() {
        let mut state = loaded();
        state.reduce(Action::EditStarted {
            id: ItemId::from(1_u64),
            fields: ItemFields::new("A", "a"),
        });
        state.reduce(Action::EditStarted {
            id: ItemId::from(3_u64),
            fields: ItemFields::new("C", "c"),
        });
        assert_eq!(state.edit.editing_id(), Some(&ItemId::from(3_u64)));
        assert_eq!(state.edit.draft(), &ItemFields::new("C", "c"));
    }

    #[test]
    fn delete_removes_exactly_matching_id() {
        let mut state = loaded();
        state.reduce(Action::DeleteConfirmed(ItemId::from(2_u64)));
        let ids: Vec<_> = state.items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![Some(ItemId::from(1_u64)), Some(ItemId::from(3_u64))]);

        // Second delete of the same id is a no-op.
        state.reduce(Action::DeleteConfirmed(ItemId::from(2_u64)));
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn stale_timer_does_not_clear_newer_status() {
        let mut state = loaded();
        state.reduce(Action::CreateSucceeded {
            fields: ItemFields::new("D", "d"),
            id: None,
        });
        let first = state.banner.status_generation().unwrap();
        state.reduce(Action::CreateSucceeded {
            fields: ItemFields::new("E", "e"),
            id: None,
        });
        let second = state.banner.status_generation().unwrap();
        assert_ne!(first, second);

        state.reduce(Action::StatusExpired(first));
        assert_eq!(state.banner.status_generation(), Some(second));
        state.reduce(Action::StatusExpired(second));
        assert_eq!(state.banner, Banner::None);
    }

    #[test]
    fn timer_never_clears_an_error() {
        let mut state = loaded();
        state.reduce(Action::CreateSucceeded {
            fields: ItemFields::new("D", "d"),
            id: None,
        });
        let generation = state.banner.status_generation().unwrap();
        state.reduce(Action::ConnectionFailed);
        state.reduce(Action::StatusExpired(generation));
        assert_eq!(state.banner, Banner::Error(CONNECTION_FAILED));
    }

    #[test]
    fn submit_start_clears_banner() {
        let mut state = loaded();
        state.reduce(Action::ValidationFailed);
        state.reduce(Action::SubmitStarted);
        assert_eq!(state.banner, Banner::None);
    }
}
