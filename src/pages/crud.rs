use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;
use tracing::{error, info};

use super::{
    Debouncer, FormState, ListView, LoadState, Loader, Modal, Notice, PendingAction,
};
use crate::api::{ApiClient, ApiResponse, ListQuery};
use crate::entities::Page;
use crate::error::ClientError;
use crate::forms::{FieldErrors, FormSchema};

pub const SEARCH_DELAY: Duration = Duration::from_millis(300);

/// A backend collection managed through a listing screen.
#[allow(async_fn_in_trait)]
pub trait Resource {
    type Item: Clone;
    type Form: FormSchema + Clone;

    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(item: &Self::Item) -> i64;

    fn label(item: &Self::Item) -> String;

    fn new_form() -> Self::Form;

    async fn list(client: &ApiClient, query: &ListQuery) -> Result<Page<Self::Item>, ClientError>;

    /// Fetches the record and builds the pre-populated edit form.
    async fn edit_form(client: &ApiClient, id: i64) -> Result<Self::Form, ClientError>;

    async fn create(
        client: &ApiClient,
        payload: &<Self::Form as FormSchema>::Payload,
    ) -> Result<ApiResponse<Self::Item>, ClientError>;

    async fn update(
        client: &ApiClient,
        id: i64,
        payload: &<Self::Form as FormSchema>::Payload,
    ) -> Result<ApiResponse<Self::Item>, ClientError>;

    async fn delete(client: &ApiClient, id: i64) -> Result<ApiResponse<Value>, ClientError>;

    async fn delete_variant(
        _client: &ApiClient,
        _id: i64,
    ) -> Result<ApiResponse<Value>, ClientError> {
        Err(ClientError::InvalidInput(format!(
            "{} have no variants",
            Self::PLURAL
        )))
    }
}

/// A CRUD listing screen: table, pagination, create/edit modal and
/// confirmation modal.
pub struct CrudPage<R: Resource> {
    client: ApiClient,
    loader: Loader,
    query: ListQuery,
    search: Debouncer,
    pub list: ListView<R::Item>,
    pub modal: Modal<R::Form>,
    pub notice: Option<Notice>,
    _resource: PhantomData<R>,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn failure(prefix: String, err: &ClientError) -> String {
    let detail = err.display_message();
    if detail.is_empty() {
        prefix
    } else {
        format!("{prefix}: {detail}")
    }
}

fn rejection<T>(prefix: String, response: &ApiResponse<T>) -> String {
    let detail = if response.errors.is_empty() {
        response.message.clone()
    } else {
        response.errors.join(", ")
    };
    if detail.is_empty() {
        prefix
    } else {
        format!("{prefix}: {detail}")
    }
}

impl<R: Resource> CrudPage<R> {
    pub fn new(client: ApiClient, loader: Loader, per_page: u32) -> Self {
        Self {
            client,
            loader,
            query: ListQuery::page(1, per_page),
            search: Debouncer::new(SEARCH_DELAY),
            list: ListView::new(per_page),
            modal: Modal::Closed,
            notice: None,
            _resource: PhantomData,
        }
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search = Debouncer::new(delay);
        self
    }

    /// Handle for cancelling a pending search from another task.
    pub fn search_debouncer(&self) -> Debouncer {
        self.search.clone()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Fetches the current page. Returns whether the fetch succeeded.
    pub async fn load(&mut self) -> bool {
        let _busy = self.loader.begin();
        self.list.state = LoadState::Loading;

        // A deletion can leave the current page past the end; step back once.
        for _ in 0..2 {
            self.query.page = self.list.pager.page();
            self.query.per_page = self.list.pager.per_page();

            match R::list(&self.client, &self.query).await {
                Ok(page) => {
                    self.list.pager.update(page.page, page.total);
                    if page.items.is_empty() && self.list.pager.is_past_end() {
                        let last = self.list.pager.last_page();
                        self.list.pager.go_to(last);
                        continue;
                    }
                    self.list.items = page.items;
                    self.list.state = LoadState::Loaded;
                    return true;
                }
                Err(err) => {
                    error!(resource = R::PLURAL, error = %err, "Failed to load listing");
                    let message = format!("Failed to load {}", R::PLURAL);
                    self.list.state = LoadState::Failed(message.clone());
                    self.notice = Some(Notice::error(message));
                    return false;
                }
            }
        }

        self.list.items.clear();
        self.list.state = LoadState::Loaded;
        true
    }

    /// Re-fetches only when the page actually changes.
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

    /// Debounced search; a newer keystroke cancels this one.
    pub async fn search(&mut self, term: &str) -> bool {
        if !self.search.trigger().settled().await {
            return false;
        }
        let term = term.trim();
        self.query.search = (!term.is_empty()).then(|| term.to_string());
        self.list.pager.reset();
        self.load().await
    }

    pub fn open_create(&mut self) {
        self.notice = None;
        self.modal = Modal::Create(FormState::new(R::new_form()));
    }

    pub async fn open_edit(&mut self, id: i64) -> bool {
        let _busy = self.loader.begin();
        match R::edit_form(&self.client, id).await {
            Ok(form) => {
                self.notice = None;
                self.modal = Modal::Edit {
                    id,
                    form: FormState::new(form),
                };
                true
            }
            Err(err) => {
                error!(resource = R::SINGULAR, id, error = %err, "Failed to load record");
                self.notice = Some(Notice::error(format!("Failed to load {}", R::SINGULAR)));
                false
            }
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Form> {
        self.modal.form_mut().map(|state| &mut state.values)
    }

    pub fn form_errors(&self) -> Option<&FieldErrors> {
        self.modal.form().map(|state| &state.errors)
    }

    /// Validates the open form and sends it. Nothing is sent while the form
    /// has errors.
    pub async fn submit(&mut self) -> bool {
        let (id, payload) = match &mut self.modal {
            Modal::Create(state) => match state.values.check() {
                Ok(()) => {
                    state.errors = FieldErrors::default();
                    (None, state.values.payload())
                }
                Err(errors) => {
                    state.errors = errors;
                    return false;
                }
            },
            Modal::Edit { id, form } => match form.values.check() {
                Ok(()) => {
                    form.errors = FieldErrors::default();
                    (Some(*id), form.values.payload())
                }
                Err(errors) => {
                    form.errors = errors;
                    return false;
                }
            },
            _ => return false,
        };

        let verb = if id.is_some() { "update" } else { "create" };
        let result = {
            let _busy = self.loader.begin();
            match id {
                Some(id) => R::update(&self.client, id, &payload).await,
                None => R::create(&self.client, &payload).await,
            }
        };

        match result {
            Ok(response) if response.success => {
                info!(resource = R::SINGULAR, action = verb, "Saved");
                let message = if response.message.is_empty() {
                    format!("{} {verb}d", capitalize(R::SINGULAR))
                } else {
                    response.message
                };
                self.modal = Modal::Closed;
                if self.load().await {
                    self.notice = Some(Notice::success(message));
                }
                true
            }
            Ok(response) => {
                self.notice = Some(Notice::error(rejection(
                    format!("Failed to {verb} {}", R::SINGULAR),
                    &response,
                )));
                false
            }
            Err(err) => {
                error!(resource = R::SINGULAR, action = verb, error = %err, "Request failed");
                self.notice = Some(Notice::error(failure(
                    format!("Failed to {verb} {}", R::SINGULAR),
                    &err,
                )));
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        let label = self
            .list
            .items
            .iter()
            .find(|item| R::id(item) == id)
            .map(R::label)
            .unwrap_or_else(|| format!("{} #{id}", R::SINGULAR));
        self.modal = Modal::Confirm {
            action: PendingAction::Delete(id),
            label,
        };
    }

    pub(crate) fn request_confirm(&mut self, action: PendingAction, label: String) {
        self.modal = Modal::Confirm { action, label };
    }

    pub fn cancel(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Runs the pending confirmation once, then re-fetches.
    pub async fn confirm(&mut self) -> bool {
        let action = match &self.modal {
            Modal::Confirm { action, .. } => *action,
            _ => return false,
        };
        self.modal = Modal::Closed;

        let (what, result) = {
            let _busy = self.loader.begin();
            match action {
                PendingAction::Delete(id) => (R::SINGULAR, R::delete(&self.client, id).await),
                PendingAction::DeleteVariant(id) => {
                    ("variant", R::delete_variant(&self.client, id).await)
                }
                PendingAction::ToggleStatus { .. } => return false,
            }
        };

        match result {
            Ok(response) if response.success => {
                info!(resource = what, ?action, "Deleted");
                let message = if response.message.is_empty() {
                    format!("{} deleted", capitalize(what))
                } else {
                    response.message
                };
                if self.load().await {
                    self.notice = Some(Notice::success(message));
                }
                true
            }
            Ok(response) => {
                self.notice = Some(Notice::error(rejection(
                    format!("Failed to delete {what}"),
                    &response,
                )));
                false
            }
            Err(err) => {
                error!(resource = what, ?action, error = %err, "Delete failed");
                self.notice = Some(Notice::error(failure(format!("Failed to delete {what}"), &err)));
                false
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loader.is_visible()
    }
}
