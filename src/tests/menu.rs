use super::*;

fn assert_menu_open(page: &Page, open: bool) -> Result<()> {
    page.assert_attr(
        ".navbar-toggler",
        "aria-expanded",
        Some(if open { "true" } else { "false" }),
    )?;
    page.assert_class(".navbar-collapse", "show", open)?;
    page.assert_class("body", "u-no-scroll", open)
}

#[test]
fn toggle_click_opens_then_closes_the_menu() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.assert_attr(".navbar-toggler", "aria-expanded", Some("false"))?;

    page.click(".navbar-toggler")?;
    assert_menu_open(&page, true)?;

    page.click(".navbar-toggler")?;
    assert_menu_open(&page, false)?;
    Ok(())
}

#[test]
fn escape_closes_open_menu_and_returns_focus_to_toggle() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.click(".navbar-toggler")?;
    page.focus("#contact-phone")?;

    page.press_key("Escape")?;
    assert_menu_open(&page, false)?;
    assert!(page.is_focused(".navbar-toggler")?);
    Ok(())
}

#[test]
fn escape_while_closed_leaves_focus_alone() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.focus("#contact-phone")?;

    page.press_key("Escape")?;
    assert!(page.is_focused("#contact-phone")?);
    assert!(!page.is_focused(".navbar-toggler")?);
    Ok(())
}

#[test]
fn other_keys_do_not_close_the_menu() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.click(".navbar-toggler")?;
    page.press_key("Enter")?;
    assert_menu_open(&page, true)
}

#[test]
fn click_outside_closes_and_click_inside_panel_keeps_open() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.click(".navbar-toggler")?;

    page.click(".navbar-collapse")?;
    assert_menu_open(&page, true)?;

    page.click("h2")?;
    assert_menu_open(&page, false)?;
    Ok(())
}

#[test]
fn nav_link_click_always_closes() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.click(".navbar-toggler")?;

    page.click(r#"a[href="/about.html"]"#)?;
    assert_menu_open(&page, false)?;
    assert_eq!(page.pathname(), "/about.html");
    assert_eq!(
        page.navigations().last().map(|nav| nav.kind.clone()),
        Some(LocationNavigationKind::Link)
    );

    // Closing an already closed menu keeps it consistent.
    page.click(r#"a[href="/index.html"]"#)?;
    assert_menu_open(&page, false)?;
    Ok(())
}

#[test]
fn resize_to_desktop_closes_after_debounce() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.click(".navbar-toggler")?;

    page.resize_viewport(1200, 800)?;
    page.advance_time(199)?;
    assert_menu_open(&page, true)?;

    page.advance_time(1)?;
    assert_menu_open(&page, false)?;
    Ok(())
}

#[test]
fn resize_burst_uses_final_viewport_width() -> Result<()> {
    let (mut page, _app) = installed_site()?;
    page.click(".navbar-toggler")?;

    page.resize_viewport(1100, 800)?;
    page.advance_time(100)?;
    page.resize_viewport(900, 800)?;
    page.advance_time(500)?;
    assert_menu_open(&page, true)?;

    page.resize_viewport(1024, 800)?;
    page.flush()?;
    assert_menu_open(&page, false)?;
    Ok(())
}

#[test]
fn menu_without_panel_is_not_wired() -> Result<()> {
    let mut page = Page::from_html(
        r#"<button class="c-nav__toggle" aria-expanded="false">Menu</button>
           <a class="c-nav__link" href="/">Home</a>"#,
    )?;
    behaviors::menu::init(&mut page)?;

    let document = page.document();
    assert_eq!(page.listener_count(document, "keydown"), 0);
    assert_eq!(page.listener_count(EventTarget::Window, "resize"), 0);

    page.click(".c-nav__toggle")?;
    page.assert_attr(".c-nav__toggle", "aria-expanded", Some("false"))?;
    Ok(())
}

#[test]
fn bem_toggle_class_is_recognised() -> Result<()> {
    let mut page = Page::from_html(
        r##"<button class="c-nav__toggle" aria-expanded="false">Menu</button>
           <div class="navbar-collapse"><a class="c-nav__link" href="#top">Top</a></div>"##,
    )?;
    behaviors::menu::init(&mut page)?;

    page.click(".c-nav__toggle")?;
    page.assert_class(".navbar-collapse", "show", true)?;
    page.click(".c-nav__link")?;
    page.assert_class(".navbar-collapse", "show", false)?;
    Ok(())
}
