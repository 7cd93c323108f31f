use super::*;

use tracing::debug;

const SHOW_AFTER_PX: i64 = 300;
const SCROLL_THROTTLE_MS: i64 = 200;

pub(crate) fn init(page: &mut Page, locale: &Locale) -> Result<()> {
    let Some(body) = page.dom.body() else {
        debug!("no body, scroll-to-top disabled");
        return Ok(());
    };

    let button = page.dom.create_detached_element("button");
    page.dom.set_attr(button, "class", "c-button c-button--primary")?;
    for (property, value) in [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("right", "20px"),
        ("z-index", "1000"),
        ("display", "none"),
    ] {
        page.dom.style_set(button, property, value)?;
    }
    page.dom.set_attr(button, "aria-label", &locale.scroll_to_top_label)?;
    page.dom.set_inner_html(button, "↑")?;
    page.dom.append_child(body, button)?;

    page.add_event_listener(EventTarget::Node(button), "click", false, |page, _| {
        page.scroll_to(0, ScrollBehavior::Smooth)
    });

    let on_scroll = throttle(SCROLL_THROTTLE_MS, move |page: &mut Page, ()| {
        sync_visibility(page, button)
    });
    page.add_event_listener(EventTarget::Window, "scroll", false, move |page, _| {
        on_scroll(page, ())
    });

    debug!("scroll-to-top button added");
    sync_visibility(page, button)
}

fn sync_visibility(page: &mut Page, button: NodeId) -> Result<()> {
    let display = if page.scroll_y() > SHOW_AFTER_PX {
        "flex"
    } else {
        "none"
    };
    page.dom.style_set(button, "display", display)
}
