use super::*;

const SCROLL_BUTTON: &str = "body > button.c-button.c-button--primary";

#[test]
fn content_images_become_lazy_but_logo_and_explicit_loading_stay() -> Result<()> {
    let (page, _app) = installed_site()?;
    page.assert_attr("#hero", "loading", Some("lazy"))?;
    page.assert_attr("#team", "loading", Some("eager"))?;
    page.assert_attr(".c-logo__img", "loading", None)?;
    Ok(())
}

#[test]
fn broken_image_gets_svg_placeholder() -> Result<()> {
    let (mut page, _app) = installed_site()?;

    page.fail_image_load("#hero")?;
    let src = page
        .attr("#hero", "src")?
        .ok_or_else(|| Error::Runtime("src missing".into()))?;
    assert!(src.starts_with("blob:"), "unexpected src {src}");

    let blob = page
        .object_url_blob(&src)
        .ok_or_else(|| Error::Runtime("blob not registered".into()))?;
    assert_eq!(blob.mime_type, "image/svg+xml");
    let svg = String::from_utf8_lossy(&blob.bytes);
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100""#));
    assert!(svg.contains(r##"<rect width="100" height="100" fill="#f0f0f0"/>"##));
    assert!(svg.contains(">Image</text>"));

    // Other images keep their source.
    page.assert_attr("#team", "src", Some("/img/team.jpg"))?;
    Ok(())
}

#[test]
fn logo_also_gets_a_placeholder_on_error() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.fail_image_load(".c-logo__img")?;
    let src = page.attr(".c-logo__img", "src")?.unwrap_or_default();
    assert!(src.starts_with("blob:"));
    Ok(())
}

#[test]
fn fail_image_load_requires_an_image() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    assert!(matches!(
        page.fail_image_load("h2"),
        Err(Error::TypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn images_added_later_are_not_touched() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    let section = page.select_one("#services")?;
    page.dom.set_inner_html(section, r#"<img id="late" src="/img/late.jpg">"#)?;

    page.assert_attr("#late", "loading", None)?;
    page.fail_image_load("#late")?;
    page.assert_attr("#late", "src", Some("/img/late.jpg"))?;
    Ok(())
}

#[test]
fn scroll_button_is_appended_hidden() -> Result<()> {
    let (page, _app) = installed_site()?;
    assert_eq!(page.count(SCROLL_BUTTON)?, 1);
    page.assert_attr(SCROLL_BUTTON, "aria-label", Some("Atgriezties augšā"))?;
    page.assert_text(SCROLL_BUTTON, "↑")?;
    page.assert_attr(
        SCROLL_BUTTON,
        "style",
        Some("position: fixed; bottom: 20px; right: 20px; z-index: 1000; display: none;"),
    )?;
    Ok(())
}

#[test]
fn scroll_button_shows_past_300px_with_throttle() -> Result<()> {
    let (mut page, _app) = installed_site()?;

    page.scroll_window_to(300)?;
    page.assert_style(SCROLL_BUTTON, "display", "none")?;

    page.advance_time(200)?;
    page.scroll_window_to(301)?;
    page.assert_style(SCROLL_BUTTON, "display", "flex")?;

    // Dropped: inside the 200 ms window.
    page.advance_time(150)?;
    page.scroll_window_to(10)?;
    page.assert_style(SCROLL_BUTTON, "display", "flex")?;

    page.advance_time(50)?;
    page.scroll_window_to(20)?;
    page.assert_style(SCROLL_BUTTON, "display", "none")?;
    Ok(())
}

#[test]
fn scroll_button_reflects_initial_offset() -> Result<()> {
    let mut page = site_page()?;
    page.scroll_window_to(900)?;
    App::new().install(&mut page)?;
    page.assert_style(SCROLL_BUTTON, "display", "flex")
}

#[test]
fn scroll_button_click_smooth_scrolls_to_top() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.scroll_window_to(1500)?;

    page.click(SCROLL_BUTTON)?;
    assert_eq!(
        page.scroll_requests().last(),
        Some(&ScrollRequest {
            top: 0,
            behavior: ScrollBehavior::Smooth,
        })
    );
    assert_eq!(page.scroll_y(), 0);
    Ok(())
}

#[test]
fn custom_locale_labels_button_and_placeholder() -> Result<()> {
    let locale = Locale {
        scroll_to_top_label: "Back to top".into(),
        image_placeholder: "Missing".into(),
        ..Locale::latvian()
    };
    let mut page = site_page()?;
    App::with_locale(locale).install(&mut page)?;

    page.assert_attr(SCROLL_BUTTON, "aria-label", Some("Back to top"))?;
    page.fail_image_load("#hero")?;
    let src = page.attr("#hero", "src")?.unwrap_or_default();
    let svg = page
        .object_url_blob(&src)
        .map(|blob| String::from_utf8_lossy(&blob.bytes).into_owned())
        .unwrap_or_default();
    assert!(svg.contains(">Missing</text>"));
    Ok(())
}
