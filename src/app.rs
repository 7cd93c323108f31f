use super::*;

use crate::behaviors::{active_nav, contact_form, images, menu, scroll_spy, scroll_top, smooth_scroll};
use tracing::debug;

/// Run-once markers, one per initializer.
#[derive(Debug, Default)]
struct InitFlags {
    menu: Cell<bool>,
    smooth_scroll: Cell<bool>,
    scroll_spy: Cell<bool>,
    active_nav: Cell<bool>,
    contact_form: Cell<bool>,
    images: Cell<bool>,
    scroll_top: Cell<bool>,
    notifications: Cell<bool>,
}

/// Returns `true` the first time it sees `flag`.
fn claim(flag: &Cell<bool>) -> bool {
    !flag.replace(true)
}

#[derive(Debug, Default)]
struct AppContext {
    flags: InitFlags,
    locale: Rc<Locale>,
    notifier: RefCell<Option<Notifier>>,
}

/// Shared application context. Clones share the same flags and notifier.
#[derive(Debug, Clone, Default)]
pub struct App {
    inner: Rc<AppContext>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self {
            inner: Rc::new(AppContext {
                locale: Rc::new(locale),
                ..AppContext::default()
            }),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.inner.locale
    }

    /// Runs [`App::init`] now, or on `DOMContentLoaded` while the page is
    /// still loading.
    pub fn install(&self, page: &mut Page) -> Result<()> {
        if page.ready_state() != ReadyState::Loading {
            return self.init(page);
        }
        let app = self.clone();
        let document = page.document();
        page.add_event_listener(document, "DOMContentLoaded", false, move |page, _| {
            app.init(page)
        });
        debug!("init deferred until DOMContentLoaded");
        Ok(())
    }

    /// Wires every behavior. Initializers that already ran are skipped, so a
    /// second call registers nothing.
    pub fn init(&self, page: &mut Page) -> Result<()> {
        let flags = &self.inner.flags;
        let locale = &self.inner.locale;

        if claim(&flags.menu) {
            menu::init(page)?;
        }
        if claim(&flags.smooth_scroll) {
            smooth_scroll::init(page)?;
        }
        if claim(&flags.scroll_spy) {
            scroll_spy::init(page)?;
        }
        if claim(&flags.active_nav) {
            active_nav::init(page)?;
        }
        if claim(&flags.contact_form) {
            contact_form::init(page, Rc::clone(locale))?;
        }
        if claim(&flags.images) {
            images::init(page, locale)?;
        }
        if claim(&flags.scroll_top) {
            scroll_top::init(page, locale)?;
        }
        if claim(&flags.notifications) {
            *self.inner.notifier.borrow_mut() = Some(Notifier::default());
            debug!("notifications ready");
        }
        Ok(())
    }

    pub fn notifier(&self) -> Option<Notifier> {
        self.inner.notifier.borrow().clone()
    }

    /// Shows a toast. Returns `false` when notifications are not initialised.
    pub fn notify(&self, page: &mut Page, message: &str, kind: ToastKind) -> Result<bool> {
        let Some(notifier) = self.notifier() else {
            return Ok(false);
        };
        notifier.notify(page, message, kind)?;
        Ok(true)
    }
}
