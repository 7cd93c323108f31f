use super::*;

mod images_and_scroll_top;
mod menu;
mod validators;

const SITE_HTML: &str = r##"
<!DOCTYPE html>
<html lang="lv">
<head><title>Studija</title></head>
<body>
  <header class="l-header">
    <a href="/"><img class="c-logo__img" src="/img/logo.svg" alt="Studija"></a>
    <nav>
      <button class="navbar-toggler" type="button" aria-expanded="false">Izvēlne</button>
      <div class="navbar-collapse">
        <a class="nav-link" href="/index.html">Sākums</a>
        <a class="nav-link" href="#services">Pakalpojumi</a>
        <a class="nav-link" href="#contact">Kontakti</a>
        <a class="nav-link" href="/about.html">Par mums</a>
      </div>
    </nav>
  </header>
  <main>
    <section id="services">
      <h2>Pakalpojumi</h2>
      <img id="hero" src="/img/hero.jpg" alt="">
      <img id="team" src="/img/team.jpg" loading="eager" alt="">
    </section>
    <section id="contact">
      <form class="c-form" action="/send" method="post">
        <div class="mb-3" id="group-name">
          <input id="contact-name" type="text">
          <div class="invalid-feedback"></div>
        </div>
        <div class="mb-3" id="group-email"><input id="contact-email" type="email"></div>
        <div class="mb-3" id="group-phone"><input id="contact-phone" type="tel"></div>
        <div class="mb-3" id="group-message"><textarea id="contact-message"></textarea></div>
        <div class="mb-3" id="group-privacy"><input id="contact-privacy" type="checkbox"></div>
        <button type="submit">Nosūtīt</button>
      </form>
    </section>
  </main>
</body>
</html>
"##;

fn site_page() -> Result<Page> {
    let mut page = Page::from_html(SITE_HTML)?;
    page.set_layout("header", 0, 64)?;
    page.set_layout("#services", 600, 400)?;
    page.set_layout("#contact", 1000, 800)?;
    Ok(page)
}

fn installed_site() -> Result<(Page, App)> {
    let mut page = site_page()?;
    let app = App::new();
    app.install(&mut page)?;
    Ok((page, app))
}

/// Focus, type and blur, the way a visitor fills one field.
fn fill(page: &mut Page, selector: &str, value: &str) -> Result<()> {
    page.focus(selector)?;
    page.type_text(selector, value)?;
    page.blur(selector)
}

fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}
