use super::*;

use tracing::debug;

const PLACEHOLDER_MIME: &str = "image/svg+xml";

/// A grey 100x100 tile labelled with `label`.
pub(crate) fn placeholder_svg(label: &str) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="0 0 100 100">"#,
            r##"<rect width="100" height="100" fill="#f0f0f0"/>"##,
            r##"<text x="50" y="50" font-family="Arial" font-size="14" fill="#999" text-anchor="middle" dominant-baseline="middle">{}</text>"##,
            "</svg>"
        ),
        label
    )
}

pub(crate) fn init(page: &mut Page, locale: &Locale) -> Result<()> {
    let images = page.dom.query_selector_all("img")?;
    let placeholder = Rc::new(placeholder_svg(&locale.image_placeholder));
    let mut deferred = 0usize;

    for img in &images {
        if !page.dom.has_attr(*img, "loading") && !page.dom.class_contains(*img, LOGO_IMAGE_CLASS) {
            page.dom.set_attr(*img, "loading", "lazy")?;
            deferred += 1;
        }

        let svg = Rc::clone(&placeholder);
        page.add_event_listener(EventTarget::Node(*img), "error", false, move |page, event| {
            let Some(failed) = event.target_node() else {
                return Ok(());
            };
            let url = page.create_object_url(PLACEHOLDER_MIME, svg.as_bytes().to_vec());
            debug!(%url, "image failed, placeholder substituted");
            page.dom.set_attr(failed, "src", &url)
        });
    }

    debug!(images = images.len(), deferred, "image handling wired");
    Ok(())
}
