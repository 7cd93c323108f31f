use super::*;

use tracing::{debug, trace};

const DESKTOP_MIN_WIDTH: i64 = 1024;
const RESIZE_DEBOUNCE_MS: i64 = 200;

/// Open/closed state of the collapsible navigation, mirrored into the DOM.
#[derive(Debug)]
struct MenuController {
    toggle: NodeId,
    panel: NodeId,
    is_open: Cell<bool>,
}

impl MenuController {
    fn open(&self, page: &mut Page) -> Result<()> {
        self.is_open.set(true);
        page.dom.class_add(self.panel, OPEN_CLASS)?;
        page.dom.set_attr(self.toggle, "aria-expanded", "true")?;
        if let Some(body) = page.dom.body() {
            page.dom.class_add(body, NO_SCROLL_CLASS)?;
        }
        debug!("menu opened");
        Ok(())
    }

    fn close(&self, page: &mut Page) -> Result<()> {
        self.is_open.set(false);
        page.dom.class_remove(self.panel, OPEN_CLASS)?;
        page.dom.set_attr(self.toggle, "aria-expanded", "false")?;
        if let Some(body) = page.dom.body() {
            page.dom.class_remove(body, NO_SCROLL_CLASS)?;
        }
        debug!("menu closed");
        Ok(())
    }

    fn toggle(&self, page: &mut Page) -> Result<()> {
        if self.is_open.get() {
            self.close(page)
        } else {
            self.open(page)
        }
    }

    fn is_outside(&self, page: &Page, node: NodeId) -> bool {
        !page.dom.contains(self.panel, node) && !page.dom.contains(self.toggle, node)
    }
}

pub(crate) fn init(page: &mut Page) -> Result<()> {
    let toggle = page.dom.query_selector(MENU_TOGGLE)?;
    let panel = page.dom.query_selector(MENU_PANEL)?;
    let links = page.dom.query_selector_all(NAV_LINKS)?;

    let (Some(toggle), Some(panel)) = (toggle, panel) else {
        debug!("menu toggle or panel missing, menu disabled");
        return Ok(());
    };

    let menu = Rc::new(MenuController {
        toggle,
        panel,
        is_open: Cell::new(false),
    });

    let m = Rc::clone(&menu);
    page.add_event_listener(EventTarget::Node(toggle), "click", false, move |page, event| {
        event.prevent_default();
        m.toggle(page)
    });

    let document = page.document();
    let m = Rc::clone(&menu);
    page.add_event_listener(document, "keydown", false, move |page, event| {
        if event.key() == Some("Escape") && m.is_open.get() {
            m.close(page)?;
            page.focus_node(m.toggle)?;
        }
        Ok(())
    });

    let m = Rc::clone(&menu);
    page.add_event_listener(document, "click", false, move |page, event| {
        let Some(target) = event.target_node() else {
            return Ok(());
        };
        if m.is_open.get() && m.is_outside(page, target) {
            trace!("click outside the menu");
            m.close(page)?;
        }
        Ok(())
    });

    let link_count = links.len();
    for link in links {
        let m = Rc::clone(&menu);
        page.add_event_listener(EventTarget::Node(link), "click", false, move |page, _| {
            m.close(page)
        });
    }

    let m = Rc::clone(&menu);
    let collapse_on_desktop = debounce(RESIZE_DEBOUNCE_MS, move |page: &mut Page, ()| {
        if page.inner_width() >= DESKTOP_MIN_WIDTH && m.is_open.get() {
            m.close(page)?;
        }
        Ok(())
    });
    page.add_event_listener(EventTarget::Window, "resize", false, move |page, _| {
        collapse_on_desktop(page, ())
    });

    debug!(nav_links = link_count, "menu wired");
    Ok(())
}
