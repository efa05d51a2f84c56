use tracing::{error, info};

use super::{ListView, LoadState, Loader, Notice, PendingAction};
use crate::api::admin::user::{get_user, list_users, toggle_user_status};
use crate::api::{ApiClient, ListQuery};
use crate::entities::{User, UserDetail};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum UserModal {
    #[default]
    Closed,
    Details(UserDetail),
    Confirm {
        action: PendingAction,
        label: String,
    },
}

/// User administration: listing, detail view and block/unblock.
pub struct UsersPage {
    client: ApiClient,
    loader: Loader,
    query: ListQuery,
    pub list: ListView<User>,
    pub modal: UserModal,
    pub notice: Option<Notice>,
}

impl UsersPage {
    pub fn new(client: ApiClient, loader: Loader, per_page: u32) -> Self {
        Self {
            client,
            loader,
            query: ListQuery::page(1, per_page),
            list: ListView::new(per_page),
            modal: UserModal::Closed,
            notice: None,
        }
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.list.items.iter().find(|user| user.id == id)
    }

    pub async fn load(&mut self) -> bool {
        let _busy = self.loader.begin();
        self.list.state = LoadState::Loading;
        self.query.page = self.list.pager.page();
        self.query.per_page = self.list.pager.per_page();

        match list_users(&self.client, &self.query).await {
            Ok(page) => {
                self.list.pager.update(page.page, page.total);
                self.list.items = page.items;
                self.list.state = LoadState::Loaded;
                true
            }
            Err(err) => {
                error!(error = %err, "Failed to load users");
                self.list.state = LoadState::Failed("Failed to load users".into());
                self.notice = Some(Notice::error("Failed to load users"));
                false
            }
        }
    }

    pub async fn change_page(&mut self, page: u32) -> bool {
        if !self.list.pager.go_to(page) {
            return false;
        }
        self.load().await
    }

    pub async fn next_page(&mut self) -> bool {
        let page = self.list.pager.page().saturating_add(1);
        self.change_page(page).await
    }

    pub async fn previous_page(&mut self) -> bool {
        let page = self.list.pager.page().saturating_sub(1);
        self.change_page(page).await
    }

    pub fn is_busy(&self) -> bool {
        self.loader.is_visible()
    }

    pub async fn show(&mut self, id: i64) -> bool {
        let _busy = self.loader.begin();
        match get_user(&self.client, id).await {
            Ok(detail) => {
                self.modal = UserModal::Details(detail);
                true
            }
            Err(err) => {
                error!(id, error = %err, "Failed to load user");
                self.notice = Some(Notice::error("Failed to load user"));
                false
            }
        }
    }

    pub fn request_toggle(&mut self, id: i64) -> bool {
        let Some(user) = self.user(id) else {
            return false;
        };
        let action = PendingAction::ToggleStatus {
            id,
            block: !user.is_blocked,
        };
        self.modal = UserModal::Confirm {
            action,
            label: user.name.clone(),
        };
        true
    }

    pub fn cancel(&mut self) {
        self.modal = UserModal::Closed;
    }

    /// Sends the toggle once and updates the status badge.
    pub async fn confirm(&mut self) -> bool {
        let (id, block) = match &self.modal {
            UserModal::Confirm {
                action: PendingAction::ToggleStatus { id, block },
                ..
            } => (*id, *block),
            _ => return false,
        };
        self.modal = UserModal::Closed;

        let result = {
            let _busy = self.loader.begin();
            toggle_user_status(&self.client, id).await
        };

        match result {
            Ok(response) if response.success => {
                let blocked = response
                    .result
                    .as_ref()
                    .map(|user| user.is_blocked)
                    .unwrap_or(block);
                if let Some(row) = self.list.items.iter_mut().find(|user| user.id == id) {
                    match response.result {
                        Some(user) => *row = user,
                        None => row.is_blocked = blocked,
                    }
                }
                info!(id, blocked, "User status changed");
                let message = match (response.message.is_empty(), blocked) {
                    (false, _) => response.message,
                    (true, true) => "User blocked".to_string(),
                    (true, false) => "User unblocked".to_string(),
                };
                if self.load().await {
                    self.notice = Some(Notice::success(message));
                }
                true
            }
            Ok(response) => {
                let detail = if response.errors.is_empty() {
                    response.message
                } else {
                    response.errors.join(", ")
                };
                self.notice = Some(Notice::error(format!(
                    "Failed to update user status: {detail}"
                )));
                false
            }
            Err(err) => {
                error!(id, error = %err, "Failed to toggle user status");
                self.notice = Some(Notice::error(format!(
                    "Failed to update user status: {}",
                    err.display_message()
                )));
                false
            }
        }
    }
}
