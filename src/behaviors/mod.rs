//! Page behaviors. Each `init` wires listeners once and degrades to a no-op
//! when the markup it needs is absent.

use super::*;

pub(crate) mod active_nav;
pub(crate) mod contact_form;
pub(crate) mod images;
pub(crate) mod menu;
pub mod notify;
pub(crate) mod scroll_spy;
pub(crate) mod scroll_top;
pub(crate) mod smooth_scroll;
pub mod validators;

// Markup contract.
pub(crate) const MENU_TOGGLE: &str = ".navbar-toggler, .c-nav__toggle";
pub(crate) const MENU_PANEL: &str = ".navbar-collapse";
pub(crate) const NAV_LINKS: &str = ".nav-link, .c-nav__link";
pub(crate) const IN_PAGE_NAV_LINKS: &str = r##".nav-link[href^="#"], .c-nav__link[href^="#"]"##;
pub(crate) const HEADER: &str = "header, .l-header";
pub(crate) const CONTACT_FORM: &str = ".c-form";
pub(crate) const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;
pub(crate) const FIELD_GROUP: &str = ".mb-3, .c-form__group";
pub(crate) const FIELD_ERROR: &str = ".invalid-feedback, .c-form__error";
pub(crate) const LOGO_IMAGE_CLASS: &str = "c-logo__img";
pub(crate) const TOAST_CONTAINER_ID: &str = "toast-container";
pub(crate) const THANK_YOU_PAGE: &str = "thank_you.html";

// Visual contract.
pub(crate) const OPEN_CLASS: &str = "show";
pub(crate) const NO_SCROLL_CLASS: &str = "u-no-scroll";
pub(crate) const ACTIVE_CLASS: &str = "active";
pub(crate) const INVALID_CLASS: &str = "is-invalid";

/// Marks a nav link as the current page, or clears the marking.
pub(crate) fn set_link_current(page: &mut Page, link: NodeId, current: bool) -> Result<()> {
    if current {
        page.dom.class_add(link, ACTIVE_CLASS)?;
        page.dom.set_attr(link, "aria-current", "page")
    } else {
        page.dom.class_remove(link, ACTIVE_CLASS)?;
        page.dom.remove_attr(link, "aria-current")
    }
}
