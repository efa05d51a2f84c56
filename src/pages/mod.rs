//! Headless dashboard screens: the state a page renders and the actions its
//! buttons trigger. Every mutation is followed by a re-fetch of the list.

pub mod crud;
pub mod debounce;
pub mod loader;
pub mod pagination;
pub mod resources;
pub mod users;

use crate::forms::FieldErrors;

pub use crud::{CrudPage, Resource};
pub use debounce::{DebounceTicket, Debouncer};
pub use loader::{Loader, LoaderGuard};
pub use pagination::Pager;
pub use resources::{Brands, Categories, Products};
pub use users::{UserModal, UsersPage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Banner shown above the table after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// What a confirmation modal will do once accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingAction {
    Delete(i64),
    DeleteVariant(i64),
    ToggleStatus { id: i64, block: bool },
}

impl PendingAction {
    pub fn prompt(&self, label: &str) -> String {
        match self {
            PendingAction::Delete(_) => format!("Delete {label}?"),
            PendingAction::DeleteVariant(_) => format!("Delete variant {label}?"),
            PendingAction::ToggleStatus { block: true, .. } => format!("Block {label}?"),
            PendingAction::ToggleStatus { block: false, .. } => format!("Unblock {label}?"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState<F> {
    pub values: F,
    pub errors: FieldErrors,
}

impl<F> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            errors: FieldErrors::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Modal<F> {
    #[default]
    Closed,
    Create(FormState<F>),
    Edit { id: i64, form: FormState<F> },
    Confirm { action: PendingAction, label: String },
}

impl<F> Modal<F> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::Closed)
    }

    pub fn form(&self) -> Option<&FormState<F>> {
        match self {
            Modal::Create(form) | Modal::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState<F>> {
        match self {
            Modal::Create(form) | Modal::Edit { form, .. } => Some(form),
            _ => None,
        }
    }
}

/// The table on a listing screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub pager: Pager,
    pub state: LoadState,
}

impl<T> ListView<T> {
    pub fn new(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            pager: Pager::new(per_page),
            state: LoadState::Idle,
        }
    }
}
