//! Render the state into a view model.
//!
//! Each row is either displayed or being edited; only the row whose id
//! matches the edit session can be in the second mode. `View` also renders
//! itself as plain text for terminal hosts.

use std::fmt;

use crate::state::{Banner, TaskListState};
use crate::types::{ItemFields, ItemId};

pub const HEADING: &str = "ToDo Project";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Status,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerView {
    pub kind: BannerKind,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    Display(ItemFields),
    Editing(ItemFields),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the list.
    pub number: usize,
    pub id: Option<ItemId>,
    pub mode: RowMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub heading: &'static str,
    pub banner: Option<BannerView>,
    pub draft: ItemFields,
    pub rows: Vec<Row>,
}

impl View {
    pub fn editing_row(&self) -> Option<&Row> {
        self.rows
            .iter()
            .find(|row| matches!(row.mode, RowMode::Editing(_)))
    }

    pub fn row(&self, number: usize) -> Option<&Row> {
        self.rows.iter().find(|row| row.number == number)
    }
}

pub fn render(state: &TaskListState) -> View {
    let banner = match state.banner {
        Banner::None => None,
        Banner::Status { text, .. } => Some(BannerView {
            kind: BannerKind::Status,
            text,
        }),
        Banner::Error(text) => Some(BannerView {
            kind: BannerKind::Error,
            text,
        }),
    };

    let editing = state.edit.editing_id();
    let rows = state
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mode = if item.id.is_some() && item.id.as_ref() == editing {
                RowMode::Editing(state.edit.draft().clone())
            } else {
                RowMode::Display(item.fields())
            };
            Row {
                number: index + 1,
                id: item.id.clone(),
                mode,
            }
        })
        .collect();

    View {
        heading: HEADING,
        banner,
        draft: state.new_draft.clone(),
        rows,
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "{}", "=".repeat(self.heading.len()))?;
        writeln!(f)?;
        writeln!(f, "Add item")?;
        match &self.banner {
            Some(BannerView {
                kind: BannerKind::Status,
                text,
            }) => writeln!(f, "  {text}")?,
            Some(BannerView {
                kind: BannerKind::Error,
                text,
            }) => writeln!(f, "  ! {text}")?,
            None => {}
        }
        writeln!(f, "  title:       {}", self.draft.title)?;
        writeln!(f, "  description: {}", self.draft.description)?;
        writeln!(f)?;
        writeln!(f, "Tasks")?;
        if self.rows.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for row in &self.rows {
            match &row.mode {
                RowMode::Display(fields) => {
                    writeln!(f, "  {:>2}. {}", row.number, fields.title)?;
                    writeln!(f, "      {}", fields.description)?;
                }
                RowMode::Editing(fields) => {
                    writeln!(f, "  {:>2}. [editing] title:       {}", row.number, fields.title)?;
                    writeln!(f, "      [editing] description: {}", fields.description)?;
                }
            }
        }
        Ok(())
    }
}
