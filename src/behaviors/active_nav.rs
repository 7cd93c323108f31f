use super::*;

use tracing::debug;

/// Highlights the nav links that point at the current page, once.
pub(crate) fn init(page: &mut Page) -> Result<()> {
    let current_path = page.pathname().to_string();
    let mut marked = 0usize;

    for link in page.dom.query_selector_all(NAV_LINKS)? {
        let Some(href) = page.dom.attr(link, "href") else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let is_current = same_page(&current_path, &href);
        set_link_current(page, link, is_current)?;
        marked += usize::from(is_current);
    }

    debug!(path = %current_path, marked, "active nav state applied");
    Ok(())
}

/// Exact match, with `/` and `/index.html` treated as the same page.
pub(crate) fn same_page(current_path: &str, href: &str) -> bool {
    href == current_path
        || (current_path == "/" && href == "/index.html")
        || (current_path == "/index.html" && href == "/")
}
