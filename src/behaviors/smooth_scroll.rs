use super::*;

use tracing::{debug, trace};

const FALLBACK_HEADER_HEIGHT: i64 = 80;

pub(crate) fn init(page: &mut Page) -> Result<()> {
    let document = page.document();
    page.add_event_listener(document, "click", false, |page, event| {
        let Some(anchor) = event.target_node().and_then(|node| nearest_anchor(&page.dom, node))
        else {
            return Ok(());
        };
        let Some(href) = page.dom.attr(anchor, "href") else {
            return Ok(());
        };
        let Some(fragment) = in_page_fragment(&href) else {
            return Ok(());
        };
        // Unknown targets keep the default navigation.
        let Some(section) = page.dom.by_id(fragment) else {
            trace!(%href, "in-page link target missing");
            return Ok(());
        };

        event.prevent_default();
        let top = page.dom.offset_top(section)? - header_height(page)?;
        trace!(%href, top, "smooth scrolling");
        page.scroll_to(top, ScrollBehavior::Smooth)
    });
    debug!("smooth scroll wired");
    Ok(())
}

fn nearest_anchor(dom: &Dom, node: NodeId) -> Option<NodeId> {
    let mut cursor = Some(node);
    while let Some(current) = cursor {
        if dom.is_tag(current, "a") {
            return Some(current);
        }
        cursor = dom.parent_element(current);
    }
    None
}

/// The id an href points at, for `#id` hrefs other than `#` and `#!`.
fn in_page_fragment(href: &str) -> Option<&str> {
    if href == "#" || href == "#!" {
        return None;
    }
    href.strip_prefix('#')
}

fn header_height(page: &Page) -> Result<i64> {
    match page.dom.query_selector(HEADER)? {
        Some(header) => page.dom.offset_height(header),
        None => Ok(FALLBACK_HEADER_HEIGHT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_page_fragment_skips_placeholder_hrefs() {
        assert_eq!(in_page_fragment("#about"), Some("about"));
        assert_eq!(in_page_fragment("#"), None);
        assert_eq!(in_page_fragment("#!"), None);
        assert_eq!(in_page_fragment("/contact.html#form"), None);
        assert_eq!(in_page_fragment(""), None);
    }
}
