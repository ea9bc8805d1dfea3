//! Todo view synchronization
//!
//! The rendering surface is an explicit [`ViewState`] owned by a
//! [`ViewSynchronizer`]. Server responses are turned into [`Patch`]es by the
//! pure [`reconcile`] function (full loads) or directly by the synchronizer
//! (single-item append, in-place done toggle), so everything here can be
//! exercised without a real UI.

pub mod error;
pub mod markup;
pub mod state;
pub mod sync;

pub use error::{SyncError, SyncResult};
pub use markup::{ItemTemplate, Renderer};
pub use state::{Patch, ViewItem, ViewState, reconcile};
pub use sync::{SyncOptions, UiEvent, ViewSynchronizer};
