//! View synchronizer: drives todo operations and patches the view state

use crate::error::{SyncError, SyncResult};
use crate::markup::Renderer;
use crate::state::{Patch, ViewItem, ViewState, reconcile};
use todo_protocol::{TodoClient, Transport};
use tracing::{debug, warn};

/// Synchronizer options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Render items from an [`ItemTemplate`](crate::ItemTemplate) instead of
    /// the built-in markup
    pub use_template: bool,
    /// Re-fetch the whole list after a toggle instead of patching the item.
    /// Superseded by the in-place patch; kept for backends whose update
    /// response cannot be trusted.
    pub full_reload_on_toggle: bool,
}

/// Interaction events coming from the rendering surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Initial page load
    PageLoad,
    /// Add-form submit with the entered text
    Submit(String),
    /// A checkbox changed state
    CheckboxChanged { id: String, checked: bool },
}

/// Owns the view state and keeps it in sync with the server
pub struct ViewSynchronizer<T> {
    client: TodoClient<T>,
    state: ViewState,
    options: SyncOptions,
}

impl<T: Transport> ViewSynchronizer<T> {
    pub fn new(transport: T, options: SyncOptions) -> Self {
        Self {
            client: TodoClient::new(transport),
            state: ViewState::new(),
            options,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    pub fn client(&self) -> &TodoClient<T> {
        &self.client
    }

    /// Render the current surface as markup
    pub fn render(&self) -> String {
        Renderer::from_options(&self.options).render(&self.state)
    }

    /// Route a UI event to the matching transition
    pub async fn dispatch(&mut self, event: UiEvent) -> SyncResult<Vec<Patch>> {
        match event {
            UiEvent::PageLoad => self.load().await,
            UiEvent::Submit(text) => self.create(&text).await,
            UiEvent::CheckboxChanged { id, checked } => {
                let previous = self
                    .state
                    .item(&id)
                    .map(|item| item.checked)
                    .ok_or_else(|| SyncError::UnknownItem(id.clone()))?;
                self.state.set_checked(&id, checked);

                let result = self.toggle(&id).await;
                if result.is_err() {
                    self.state.set_checked(&id, previous);
                }
                result
            }
        }
    }

    /// Fetch the full list and replace the rendered items
    pub async fn load(&mut self) -> SyncResult<Vec<Patch>> {
        let records = self.client.list().await.inspect_err(|e| {
            warn!(error = %e, "todo list load failed");
        })?;

        let patches = reconcile(&self.state, &records);
        self.state.apply_all(&patches);
        debug!(
            items = records.len(),
            patches = patches.len(),
            "todo list loaded"
        );
        Ok(patches)
    }

    /// Create a todo and append it without reloading
    pub async fn create(&mut self, text: &str) -> SyncResult<Vec<Patch>> {
        let record = self.client.create(text).await.inspect_err(|e| {
            if !e.is_validation() {
                warn!(error = %e, "todo creation failed");
            }
        })?;

        let mut patches = Vec::with_capacity(2);
        if self.state.shows_placeholder() {
            patches.push(Patch::HidePlaceholder);
        }
        patches.push(Patch::Append(ViewItem::from_record(&record)));
        self.state.apply_all(&patches);
        debug!(id = %record.id, "todo appended");
        Ok(patches)
    }

    /// Send the checkbox state of `id` and apply the returned done flag
    pub async fn toggle(&mut self, id: &str) -> SyncResult<Vec<Patch>> {
        let checked = self
            .state
            .item(id)
            .map(|item| item.checked)
            .ok_or_else(|| SyncError::UnknownItem(id.to_string()))?;

        let record = self.client.update(id, checked).await.inspect_err(|e| {
            warn!(id, error = %e, "todo update failed");
        })?;

        if self.options.full_reload_on_toggle {
            return self.load().await;
        }

        let patches = vec![Patch::SetDone {
            id: id.to_string(),
            done: record.done,
        }];
        self.state.apply_all(&patches);
        Ok(patches)
    }
}
