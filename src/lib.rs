//! Navigation, form and notification behaviors for a static marketing site.
//!
//! The behaviors run against [`Page`], a deterministic in-memory page host with
//! a DOM arena, capture/bubble event dispatch and a virtual clock. An embedder
//! builds a page from markup, installs the [`App`] context and then drives the
//! page with user actions:
//!
//! ```
//! use site_behaviors::{App, Page, Result, Scheduler};
//!
//! fn run() -> Result<()> {
//!     let mut page = Page::from_html(
//!         r#"<button class="navbar-toggler" aria-expanded="false"></button>
//!            <div class="navbar-collapse"><a class="nav-link" href="/">Home</a></div>"#,
//!     )?;
//!     App::new().install(&mut page)?;
//!     page.click(".navbar-toggler")?;
//!     page.assert_attr(".navbar-toggler", "aria-expanded", Some("true"))?;
//!     page.advance_time(1_000)?;
//!     Ok(())
//! }
//! # run().unwrap();
//! ```

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use url::Url;

mod app;
mod behaviors;
mod dom;
mod html;
mod locale;
mod page;
mod pattern;
mod runtime_state;
mod scheduler;
mod selector;
mod timing;

pub use app::App;
pub use behaviors::notify::{Notifier, ToastKind};
pub use behaviors::validators::{ContactField, ValidationError, Validators};
pub use dom::NodeId;
pub use locale::Locale;
pub use page::{Page, PageConfig};
pub use runtime_state::{
    EventState, EventTarget, LocationNavigation, LocationNavigationKind, ObjectUrlBlob,
    ReadyState, ScrollBehavior, ScrollRequest,
};
pub use scheduler::{Clock, PendingTimer, Scheduler, TimerId, TimerQueue};
pub use timing::{debounce, throttle};

use dom::*;
use html::*;
use pattern::*;
use runtime_state::*;
use selector::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("pattern error: {0}")]
    Pattern(String),
    #[error(
        "flush exceeded max task steps: limit={limit}, now_ms={now_ms}, pending_tasks={pending}"
    )]
    TimerStepLimit {
        limit: usize,
        now_ms: i64,
        pending: usize,
    },
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

#[cfg(test)]
mod tests;
