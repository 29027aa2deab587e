//! Interactive browsers: chunked page navigation and single-pick selection,
//! bound to owner-only, time-limited sessions.

use thiserror::Error;

/// Default lifetime of a browser session.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default number of entries per list page.
pub const DEFAULT_PAGE_CAPACITY: usize = 10;
/// Maximum number of candidates a selection browser offers.
pub const MAX_CANDIDATES: usize = 5;

mod components;
pub mod interaction;
pub mod navigation;
pub mod page;
pub mod respond;
pub mod selection;
pub mod session;
pub mod token;
pub mod view;

/// Errors raised while constructing a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BrowserError {
    /// Nothing to browse; callers must report an empty result instead.
    #[error("nothing to browse")]
    EmptyResult,
}

pub use interaction::handle_browser_interaction;
pub use navigation::{NavAction, NavigationState, Navigator};
pub use page::{
    ContentPage, PageBody, PageField, PageSet, chunk_entries, list_page_template, total_pages,
};
pub use respond::{freeze_expired_message, run_expiry_listener, send_browser_message};
pub use selection::{Candidate, Continuation, SelectionBrowser, SelectionState};
pub use session::{InteractionOutcome, MessageRef, SessionExpired, SessionRegistry};
pub use token::{SessionId, is_browser_custom_id};
pub use view::{Browser, BrowserInput, BrowserView, Control, ControlKind, Followup, Transition};
