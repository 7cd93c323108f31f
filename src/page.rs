use super::*;

use tracing::debug;

/// Startup settings for a [`Page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    pub url: String,
    pub viewport_width: i64,
    pub viewport_height: i64,
    pub ready_state: ReadyState,
    pub timer_step_limit: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            url: "https://site.local/".to_string(),
            viewport_width: 1280,
            viewport_height: 800,
            ready_state: ReadyState::Complete,
            timer_step_limit: 10_000,
        }
    }
}

impl PageConfig {
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_viewport(mut self, width: i64, height: i64) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_ready_state(mut self, ready_state: ReadyState) -> Self {
        self.ready_state = ready_state;
        self
    }

    pub fn with_timer_step_limit(mut self, max_steps: usize) -> Self {
        self.timer_step_limit = max_steps;
        self
    }
}

/// Deterministic page host: DOM, listeners, window state and a virtual clock.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: TimerQueue<Page>,
    pub(crate) window: WindowState,
    pub(crate) browser_apis: BrowserApiState,
    pub(crate) trace_state: TraceState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::with_config(html, PageConfig::default())
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        Self::with_config(html, PageConfig::default().with_url(url))
    }

    pub fn with_config(html: &str, config: PageConfig) -> Result<Self> {
        let dom = parse_document(html)?;
        let location = Url::parse(&config.url)?;
        let mut scheduler = TimerQueue::default();
        scheduler.set_step_limit(config.timer_step_limit)?;
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler,
            window: WindowState {
                scroll_y: 0,
                inner_width: config.viewport_width,
                inner_height: config.viewport_height,
                ready_state: config.ready_state,
                active_element: None,
                location,
                navigations: Vec::new(),
                scroll_requests: Vec::new(),
            },
            browser_apis: BrowserApiState::default(),
            trace_state: TraceState::default(),
        })
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    /// Mirror trace lines into `tracing` debug events as well as the buffer.
    pub fn set_trace_to_tracing(&mut self, enabled: bool) {
        self.trace_state.to_tracing = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_state.log_limit = max_entries;
        while self.trace_state.logs.len() > max_entries {
            self.trace_state.logs.pop_front();
        }
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        self.scheduler.set_step_limit(max_steps)
    }

    /// Registers `callback` for `event` on `target`. Listeners of the same
    /// target, type and phase run in registration order.
    pub fn add_event_listener<F>(
        &mut self,
        target: EventTarget,
        event: &str,
        capture: bool,
        callback: F,
    ) where
        F: Fn(&mut Page, &mut EventState) -> Result<()> + 'static,
    {
        self.listeners.add(
            target,
            event,
            Listener {
                capture,
                callback: Rc::new(callback),
            },
        );
    }

    pub fn listener_count(&self, target: EventTarget, event: &str) -> usize {
        self.listeners.count(target, event)
    }

    pub fn document(&self) -> EventTarget {
        EventTarget::Node(self.dom.root)
    }

    // User actions.

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.click_node(target)
    }

    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.dom.disabled(target) {
            return Ok(());
        }

        let outcome = self.dispatch_event(EventTarget::Node(target), "click")?;
        if outcome.default_prevented {
            return Ok(());
        }

        if is_checkbox_input(&self.dom, target) {
            let current = self.dom.checked(target)?;
            self.dom.set_checked(target, !current)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.dispatch_event(EventTarget::Node(target), "change")?;
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.form_owner(target)? {
                self.dispatch_event(EventTarget::Node(form), "submit")?;
            }
            return Ok(());
        }

        if let Some(anchor) = self.dom.closest(target, "a[href]")? {
            let href = self.dom.attr(anchor, "href").unwrap_or_default();
            self.follow_link(&href)?;
        }

        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.blur_node(target)
    }

    pub(crate) fn focus_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.disabled(node) || self.window.active_element == Some(node) {
            return Ok(());
        }
        if let Some(current) = self.window.active_element {
            self.blur_node(current)?;
        }
        self.window.active_element = Some(node);
        self.dispatch_event(EventTarget::Node(node), "focusin")?;
        self.dispatch_event(EventTarget::Node(node), "focus")?;
        Ok(())
    }

    pub(crate) fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.window.active_element != Some(node) {
            return Ok(());
        }
        self.dispatch_event(EventTarget::Node(node), "focusout")?;
        self.dispatch_event(EventTarget::Node(node), "blur")?;
        self.window.active_element = None;
        Ok(())
    }

    /// Replaces the field value the way typing would, firing `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        self.dom.set_value(target, text)?;
        self.dispatch_event(EventTarget::Node(target), "input")?;
        Ok(())
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if !is_checkbox_input(&self.dom, target) {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox]".into(),
                actual: self.dom.tag_name(target).unwrap_or("node").to_string(),
            });
        }
        if self.dom.checked(target)? != checked {
            self.dom.set_checked(target, checked)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.dispatch_event(EventTarget::Node(target), "change")?;
        }
        Ok(())
    }

    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let form = if self.dom.is_tag(target, "form") {
            Some(target)
        } else {
            self.form_owner(target)?
        };
        if let Some(form) = form {
            self.dispatch_event(EventTarget::Node(form), "submit")?;
        }
        Ok(())
    }

    /// Fires `keydown` at the focused element, or the body when nothing has focus.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let target = self
            .window
            .active_element
            .or_else(|| self.dom.body())
            .unwrap_or(self.dom.root);
        let mut event = EventState::new("keydown", EventTarget::Node(target), self.now_ms());
        event.key = Some(key.to_string());
        self.dispatch_prepared(event)?;
        Ok(())
    }

    /// User scroll: moves the viewport and fires `scroll` when it moved.
    pub fn scroll_window_to(&mut self, y: i64) -> Result<()> {
        self.set_scroll_position(y)
    }

    pub fn resize_viewport(&mut self, width: i64, height: i64) -> Result<()> {
        self.window.inner_width = width;
        self.window.inner_height = height;
        self.dispatch_event(EventTarget::Window, "resize")?;
        Ok(())
    }

    /// Fires the `error` event an image gets when its source fails to load.
    pub fn fail_image_load(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.dom.is_tag(target, "img") {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "img".into(),
                actual: self.dom.tag_name(target).unwrap_or("node").to_string(),
            });
        }
        self.dispatch_event(EventTarget::Node(target), "error")?;
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventTarget::Node(target), event)?;
        Ok(())
    }

    pub fn dispatch_window(&mut self, event: &str) -> Result<()> {
        self.dispatch_event(EventTarget::Window, event)?;
        Ok(())
    }

    /// Ends parsing: flips the ready state and fires `DOMContentLoaded` once.
    pub fn finish_loading(&mut self) -> Result<()> {
        if self.window.ready_state == ReadyState::Complete {
            return Ok(());
        }
        self.window.ready_state = ReadyState::Complete;
        self.dispatch_event(self.document(), "DOMContentLoaded")?;
        Ok(())
    }

    pub fn set_layout(&mut self, selector: &str, top: i64, height: i64) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dom.set_layout(target, LayoutBox { top, height })
    }

    // Window.

    pub fn ready_state(&self) -> ReadyState {
        self.window.ready_state
    }

    pub fn scroll_y(&self) -> i64 {
        self.window.scroll_y
    }

    pub fn inner_width(&self) -> i64 {
        self.window.inner_width
    }

    pub fn inner_height(&self) -> i64 {
        self.window.inner_height
    }

    pub fn location(&self) -> &Url {
        &self.window.location
    }

    pub fn pathname(&self) -> &str {
        self.window.location.path()
    }

    pub fn navigations(&self) -> &[LocationNavigation] {
        &self.window.navigations
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.window.scroll_requests
    }

    /// `window.scrollTo`. The offset clamps at the document top.
    pub fn scroll_to(&mut self, top: i64, behavior: ScrollBehavior) -> Result<()> {
        self.window.scroll_requests.push(ScrollRequest { top, behavior });
        self.set_scroll_position(top)
    }

    fn set_scroll_position(&mut self, y: i64) -> Result<()> {
        let y = y.max(0);
        if y == self.window.scroll_y {
            return Ok(());
        }
        self.window.scroll_y = y;
        self.dispatch_event(EventTarget::Window, "scroll")?;
        Ok(())
    }

    /// Assigns `location.href`, resolving `href` against the current URL.
    pub fn navigate(&mut self, href: &str) -> Result<()> {
        let next = self.window.location.join(href)?;
        self.record_navigation(LocationNavigationKind::HrefSet, next);
        Ok(())
    }

    fn follow_link(&mut self, href: &str) -> Result<()> {
        if let Some(fragment) = href.strip_prefix('#') {
            let mut next = self.window.location.clone();
            next.set_fragment(Some(fragment));
            self.record_navigation(LocationNavigationKind::Fragment, next);
            return Ok(());
        }
        let next = self.window.location.join(href)?;
        self.record_navigation(LocationNavigationKind::Link, next);
        Ok(())
    }

    fn record_navigation(&mut self, kind: LocationNavigationKind, next: Url) {
        debug!(from = %self.window.location, to = %next, ?kind, "navigation");
        self.window.navigations.push(LocationNavigation {
            kind,
            from: self.window.location.to_string(),
            to: next.to_string(),
        });
        self.window.location = next;
    }

    /// `URL.createObjectURL(new Blob([bytes], { type }))`.
    pub fn create_object_url(&mut self, mime_type: &str, bytes: Vec<u8>) -> String {
        self.browser_apis.allocate_blob_url(ObjectUrlBlob {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn object_url_blob(&self, object_url: &str) -> Option<&ObjectUrlBlob> {
        self.browser_apis.blob_urls.get(object_url)
    }

    pub fn is_focused(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.window.active_element == Some(target))
    }

    // Queries.

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.dom.query_selector(selector)?.is_some())
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.class_contains(target, class_name))
    }

    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, property)
    }

    pub fn inner_html(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.inner_html(target)
    }

    /// Texts of every match, in document order.
    pub fn texts(&self, selector: &str) -> Result<Vec<String>> {
        Ok(self
            .dom
            .query_selector_all(selector)?
            .into_iter()
            .map(|node| self.dom.text_content(node))
            .collect())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.outer_html(target))
    }

    // Assertions.

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        self.check(selector, target, expected, &actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        self.check(selector, target, expected, &actual)
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.checked(target)?;
        self.check(selector, target, &expected.to_string(), &actual.to_string())
    }

    /// `None` asserts the attribute is absent.
    pub fn assert_attr(&self, selector: &str, name: &str, expected: Option<&str>) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.attr(target, name);
        self.check(
            selector,
            target,
            &format!("{name}={expected:?}"),
            &format!("{name}={:?}", actual.as_deref()),
        )
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.class_contains(target, class_name);
        self.check(
            selector,
            target,
            &format!("class {class_name} present={expected}"),
            &format!("class {class_name} present={actual}"),
        )
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, property)?;
        self.check(
            selector,
            target,
            &format!("{property}: {expected}"),
            &format!("{property}: {actual}"),
        )
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(|_| ())
    }

    pub fn assert_not_exists(&self, selector: &str) -> Result<()> {
        match self.dom.query_selector(selector)? {
            None => Ok(()),
            Some(node) => Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "no match".into(),
                actual: "element present".into(),
                dom_snippet: self.node_snippet(node),
            }),
        }
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: &str) -> Result<()> {
        if actual == expected {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            dom_snippet: self.node_snippet(target),
        })
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.outer_html(node_id), 200)
    }

    fn form_owner(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        match self.dom.parent_element(node_id) {
            Some(parent) => self.dom.closest(parent, "form"),
            None => Ok(None),
        }
    }

    // Event dispatch.

    pub(crate) fn dispatch_event(&mut self, target: EventTarget, event_type: &str) -> Result<EventState> {
        let event = EventState::new(event_type, target, self.now_ms());
        self.dispatch_prepared(event)
    }

    pub(crate) fn dispatch_prepared(&mut self, mut event: EventState) -> Result<EventState> {
        // Listeners may dispatch further events (click -> submit -> focus).
        stacker::maybe_grow(64 * 1024, 1024 * 1024, || self.run_dispatch(&mut event))?;
        Ok(event)
    }

    fn event_path(&self, target: EventTarget) -> Vec<EventTarget> {
        let EventTarget::Node(node) = target else {
            return vec![EventTarget::Window];
        };
        let mut path = Vec::new();
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            path.push(EventTarget::Node(current));
            cursor = self.dom.parent(current);
        }
        if self.dom.is_connected(node) {
            path.push(EventTarget::Window);
        }
        path.reverse();
        path
    }

    fn run_dispatch(&mut self, event: &mut EventState) -> Result<()> {
        let path = self.event_path(event.target);
        let Some((target, ancestors)) = path.split_last() else {
            self.trace_event_done(event, "empty_path");
            return Ok(());
        };

        // Capture phase.
        for current in ancestors {
            event.current_target = *current;
            self.invoke_listeners(*current, event, true)?;
            if event.propagation_stopped {
                self.trace_event_done(event, "propagation_stopped");
                return Ok(());
            }
        }

        // Target phase: capture listeners first, then bubble listeners.
        event.current_target = *target;
        for capture in [true, false] {
            self.invoke_listeners(*target, event, capture)?;
            if event.propagation_stopped {
                self.trace_event_done(event, "propagation_stopped");
                return Ok(());
            }
        }

        if event.bubbles {
            for current in ancestors.iter().rev() {
                event.current_target = *current;
                self.invoke_listeners(*current, event, false)?;
                if event.propagation_stopped {
                    self.trace_event_done(event, "propagation_stopped");
                    return Ok(());
                }
            }
        }

        self.trace_event_done(event, "completed");
        Ok(())
    }

    fn invoke_listeners(
        &mut self,
        current: EventTarget,
        event: &mut EventState,
        capture: bool,
    ) -> Result<()> {
        for listener in self.listeners.get(current, &event.event_type, capture) {
            if self.trace_state.enabled && self.trace_state.events {
                let phase = if capture { "capture" } else { "bubble" };
                let line = format!(
                    "[event] {} target={} current={} phase={phase} default_prevented={}",
                    event.event_type,
                    self.trace_label(event.target),
                    self.trace_label(event.current_target),
                    event.default_prevented
                );
                self.trace_line(line);
            }
            (listener.callback)(self, event)?;
            if event.immediate_propagation_stopped {
                break;
            }
        }
        Ok(())
    }

    // Tracing.

    fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !(self.trace_state.enabled && self.trace_state.events) {
            return;
        }
        let line = format!(
            "[event] done {} target={} outcome={outcome} default_prevented={}",
            event.event_type,
            self.trace_label(event.target),
            event.default_prevented
        );
        self.trace_line(line);
    }

    fn trace_label(&self, target: EventTarget) -> String {
        let EventTarget::Node(node) = target else {
            return "window".into();
        };
        if node == self.dom.root {
            return "document".into();
        }
        let Some(element) = self.dom.element(node) else {
            return "#text".into();
        };
        match element.attrs.get("id").filter(|id| !id.is_empty()) {
            Some(id) => format!("{}#{id}", element.tag_name),
            None => element.tag_name.clone(),
        }
    }

    fn trace_line(&mut self, line: String) {
        if !self.trace_state.enabled {
            return;
        }
        if self.trace_state.to_tracing {
            debug!(target: "site_behaviors::trace", "{line}");
        }
        if self.trace_state.logs.len() >= self.trace_state.log_limit {
            self.trace_state.logs.pop_front();
        }
        self.trace_state.logs.push_back(line);
    }
}

impl Clock for Page {
    fn now_ms(&self) -> i64 {
        self.scheduler.now_ms()
    }
}

impl Scheduler for Page {
    fn timer_queue(&self) -> &TimerQueue<Self> {
        &self.scheduler
    }

    fn timer_queue_mut(&mut self) -> &mut TimerQueue<Self> {
        &mut self.scheduler
    }

    fn trace_timer_line(&mut self, line: String) {
        if self.trace_state.timers {
            self.trace_line(line);
        }
    }
}
