use site_behaviors::{
    App, Error, LocationNavigationKind, Page, PageConfig, Result, ScrollBehavior, ScrollRequest,
    Scheduler, ToastKind,
};

const LANDING_HTML: &str = r##"
<!DOCTYPE html>
<html lang="lv">
<body>
  <header class="l-header">
    <button class="c-nav__toggle" aria-expanded="false">Izvēlne</button>
    <div class="navbar-collapse">
      <a class="c-nav__link" href="/">Sākums</a>
      <a class="c-nav__link" href="#pakalpojumi">Pakalpojumi</a>
      <a class="c-nav__link" href="#kontakti">Kontakti</a>
      <a class="c-nav__link" href="/par-mums.html">Par mums</a>
    </div>
  </header>
  <main>
    <section id="pakalpojumi"><h2>Pakalpojumi</h2></section>
    <section id="kontakti">
      <form class="c-form">
        <div class="c-form__group"><input id="contact-name"></div>
        <div class="c-form__group"><input id="contact-email" type="email"></div>
        <div class="c-form__group"><input id="contact-phone" type="tel"></div>
        <div class="c-form__group"><textarea id="contact-message"></textarea></div>
        <div class="c-form__group"><input id="contact-privacy" type="checkbox"></div>
        <button type="submit">Nosūtīt</button>
      </form>
    </section>
  </main>
</body>
</html>
"##;

fn landing_page() -> Result<Page> {
    let config = PageConfig::default()
        .with_url("https://studija.lv/")
        .with_viewport(375, 700);
    let mut page = Page::with_config(LANDING_HTML, config)?;
    page.set_layout("header", 0, 72)?;
    page.set_layout("#pakalpojumi", 700, 500)?;
    page.set_layout("#kontakti", 1200, 900)?;
    Ok(page)
}

fn fill(page: &mut Page, selector: &str, value: &str) -> Result<()> {
    page.focus(selector)?;
    page.type_text(selector, value)?;
    page.blur(selector)
}

#[test]
fn visitor_navigates_fills_the_form_and_is_redirected() -> Result<()> {
    let mut page = landing_page()?;
    let app = App::new();
    app.install(&mut page)?;

    page.assert_class(r#".c-nav__link[href="/"]"#, "active", true)?;
    page.assert_attr(r#".c-nav__link[href="/"]"#, "aria-current", Some("page"))?;

    page.click(".c-nav__toggle")?;
    page.assert_class("body", "u-no-scroll", true)?;

    page.click(r##".c-nav__link[href="#kontakti"]"##)?;
    page.assert_class(".navbar-collapse", "show", false)?;
    page.assert_class("body", "u-no-scroll", false)?;
    assert_eq!(
        page.scroll_requests().last(),
        Some(&ScrollRequest {
            top: 1_128,
            behavior: ScrollBehavior::Smooth,
        })
    );
    assert!(page.navigations().is_empty());
    page.assert_class(r##".c-nav__link[href="#kontakti"]"##, "active", true)?;
    page.assert_class(r#".c-nav__link[href="/"]"#, "active", true)?;
    page.assert_style("body > button.c-button", "display", "flex")?;

    fill(&mut page, "#contact-name", "Anna")?;
    fill(&mut page, "#contact-email", "anna@studija.lv")?;
    fill(&mut page, "#contact-phone", "+371 2000 0000")?;
    fill(&mut page, "#contact-message", "Labdien, vēlos saņemt piedāvājumu.")?;
    page.set_checked("#contact-privacy", true)?;
    page.click(r#"button[type="submit"]"#)?;

    page.assert_attr(r#"button[type="submit"]"#, "disabled", Some(""))?;
    page.assert_text(r#"button[type="submit"]"#, "Sūta...")?;
    assert_eq!(page.count("button .spinner-border")?, 1);

    assert!(app.notify(&mut page, "Paldies!", ToastKind::Success)?);

    page.advance_time(799)?;
    assert_eq!(page.pathname(), "/");
    page.advance_time(1)?;
    let last = page
        .navigations()
        .last()
        .ok_or_else(|| Error::Runtime("no navigation recorded".into()))?;
    assert_eq!(last.kind, LocationNavigationKind::HrefSet);
    assert_eq!(last.to, "https://studija.lv/thank_you.html");
    assert_eq!(page.pathname(), "/thank_you.html");

    page.flush()?;
    assert_eq!(page.count("#toast-container > div")?, 0);
    Ok(())
}

#[test]
fn empty_submission_lists_every_problem_in_latvian() -> Result<()> {
    let mut page = landing_page()?;
    App::new().install(&mut page)?;

    page.submit(".c-form")?;

    assert_eq!(page.count(".c-form .is-invalid")?, 5);
    assert_eq!(
        page.texts(".c-form__error, .invalid-feedback")?,
        vec![
            "Lūdzu, ievadiet derīgu vārdu (vismaz 2 rakstzīmes)",
            "E-pasta adrese ir obligāta",
            "Telefona numurs ir obligāts",
            "Ziņojumam jābūt vismaz 10 rakstzīmēm garam",
            "Jums jāpiekrīt privātuma politikai",
        ]
    );

    page.flush()?;
    assert!(page.navigations().is_empty());
    page.assert_text(r#"button[type="submit"]"#, "Nosūtīt")
}

#[test]
fn menu_closes_on_escape_and_returns_focus() -> Result<()> {
    let mut page = landing_page()?;
    App::new().install(&mut page)?;

    page.click(".c-nav__toggle")?;
    page.focus(r#".c-nav__link[href="/par-mums.html"]"#)?;
    page.press_key("Escape")?;

    page.assert_attr(".c-nav__toggle", "aria-expanded", Some("false"))?;
    assert!(page.is_focused(".c-nav__toggle")?);
    Ok(())
}

#[test]
fn page_without_any_contract_markup_still_installs() -> Result<()> {
    let mut page = Page::from_html("<main><p>Tikai teksts</p></main>")?;
    let app = App::new();
    app.install(&mut page)?;
    app.install(&mut page)?;

    page.scroll_window_to(400)?;
    page.advance_time(1_000)?;
    page.assert_style("body > button", "display", "flex")?;
    assert!(app.notify(&mut page, "Labi", ToastKind::Info)?);
    Ok(())
}
