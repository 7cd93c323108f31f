use super::*;

use tracing::{debug, trace};

const THRESHOLD_OFFSET: i64 = 100;
const SCROLL_THROTTLE_MS: i64 = 100;

/// Fragment to section index plus the in-page nav links it drives.
#[derive(Debug)]
struct ScrollSpy {
    /// `#id` keys in document order. A repeated id keeps its first slot but
    /// points at the later element.
    sections: Vec<(String, NodeId)>,
    links: Vec<NodeId>,
    active: RefCell<Option<String>>,
}

impl ScrollSpy {
    fn build(page: &Page) -> Result<Option<Self>> {
        let candidates = page.dom.query_selector_all("[id]")?;
        let links = page.dom.query_selector_all(IN_PAGE_NAV_LINKS)?;
        if candidates.is_empty() || links.is_empty() {
            return Ok(None);
        }

        let mut sections: Vec<(String, NodeId)> = Vec::new();
        for node in candidates {
            let Some(id) = page.dom.attr(node, "id").filter(|id| !id.is_empty()) else {
                continue;
            };
            let key = format!("#{id}");
            match sections.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = node,
                None => sections.push((key, node)),
            }
        }

        Ok(Some(Self {
            sections,
            links,
            active: RefCell::new(None),
        }))
    }

    /// Last section whose `[top, top + height)` span holds `threshold`.
    fn section_at(&self, page: &Page, threshold: i64) -> Result<Option<&str>> {
        let mut active = None;
        for (hash, section) in &self.sections {
            let top = page.dom.offset_top(*section)?;
            let bottom = top + page.dom.offset_height(*section)?;
            if threshold >= top && threshold < bottom {
                active = Some(hash.as_str());
            }
        }
        Ok(active)
    }

    fn update(&self, page: &mut Page) -> Result<()> {
        let threshold = page.scroll_y() + THRESHOLD_OFFSET;
        let active = self.section_at(page, threshold)?;

        for link in &self.links {
            let is_active = active.is_some() && page.dom.attr(*link, "href").as_deref() == active;
            set_link_current(page, *link, is_active)?;
        }

        let mut previous = self.active.borrow_mut();
        if previous.as_deref() != active {
            trace!(threshold, section = ?active, "scroll spy section changed");
            *previous = active.map(str::to_string);
        }
        Ok(())
    }
}

pub(crate) fn init(page: &mut Page) -> Result<()> {
    let Some(spy) = ScrollSpy::build(page)? else {
        debug!("no sections or in-page nav links, scroll spy disabled");
        return Ok(());
    };
    let spy = Rc::new(spy);
    debug!(
        sections = spy.sections.len(),
        links = spy.links.len(),
        "scroll spy wired"
    );

    let s = Rc::clone(&spy);
    let on_scroll = throttle(SCROLL_THROTTLE_MS, move |page: &mut Page, ()| s.update(page));
    page.add_event_listener(EventTarget::Window, "scroll", false, move |page, _| {
        on_scroll(page, ())
    });

    spy.update(page)
}
