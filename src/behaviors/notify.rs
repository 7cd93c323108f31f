use super::*;

use tracing::{debug, trace};

const DISPLAY_MS: i64 = 5_000;
const FADE_MS: i64 = 300;

/// Alert flavour of a toast, rendered as `alert-<kind>`. Covers every
/// contextual alert class of the site's stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    #[default]
    Info,
    Light,
    Dark,
}

impl ToastKind {
    pub const ALL: [ToastKind; 8] = [
        Self::Primary,
        Self::Secondary,
        Self::Success,
        Self::Danger,
        Self::Warning,
        Self::Info,
        Self::Light,
        Self::Dark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses an alert suffix such as `"warning"`. Unknown names give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

/// Appends self-dismissing toasts to a fixed container, created on first use.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    _private: (),
}

impl Notifier {
    /// Shows `message` and returns the toast element. The toast fades after
    /// five seconds and is removed 300 ms later.
    pub fn notify(&self, page: &mut Page, message: &str, kind: ToastKind) -> Result<NodeId> {
        let container = match page.dom.by_id(TOAST_CONTAINER_ID) {
            Some(container) => container,
            None => create_container(page)?,
        };

        let toast = page.dom.create_detached_element("div");
        page.dom
            .set_attr(toast, "class", &format!("alert alert-{}", kind.as_str()))?;
        page.dom.set_attr(toast, "role", "alert")?;
        page.dom.style_set(toast, "min-width", "250px")?;
        page.dom.style_set(toast, "margin-bottom", "10px")?;
        page.dom.set_text_content(toast, message)?;
        page.dom.append_child(container, toast)?;
        debug!(kind = kind.as_str(), "toast shown");

        page.set_timeout(DISPLAY_MS, move |page| {
            page.dom.style_set(toast, "opacity", "0")?;
            page.set_timeout(FADE_MS, move |page| {
                if page.dom.parent(toast) != Some(container) {
                    return Ok(());
                }
                trace!("toast removed");
                page.dom.remove_child(container, toast)
            });
            Ok(())
        });
        Ok(toast)
    }
}

fn create_container(page: &mut Page) -> Result<NodeId> {
    let body = page
        .dom
        .body()
        .ok_or_else(|| Error::Runtime("toast container requires a document body".into()))?;
    let container = page.dom.create_detached_element("div");
    page.dom.set_attr(container, "id", TOAST_CONTAINER_ID)?;
    for (property, value) in [
        ("position", "fixed"),
        ("top", "20px"),
        ("right", "20px"),
        ("z-index", "9999"),
    ] {
        page.dom.style_set(container, property, value)?;
    }
    page.dom.append_child(body, container)?;
    Ok(container)
}
