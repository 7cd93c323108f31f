use super::*;

/// Something listeners can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

impl EventTarget {
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Window => None,
            Self::Node(node) => Some(node),
        }
    }
}

/// The event object handed to listeners.
#[derive(Debug, Clone)]
pub struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: EventTarget,
    pub(crate) current_target: EventTarget,
    pub(crate) key: Option<String>,
    pub(crate) time_stamp_ms: i64,
    pub(crate) bubbles: bool,
    pub(crate) default_prevented: bool,
    pub(crate) propagation_stopped: bool,
    pub(crate) immediate_propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: EventTarget, time_stamp_ms: i64) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            key: None,
            time_stamp_ms,
            bubbles: event_bubbles(event_type),
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> EventTarget {
        self.target
    }

    pub fn target_node(&self) -> Option<NodeId> {
        self.target.node()
    }

    pub fn current_target(&self) -> EventTarget {
        self.current_target
    }

    /// `KeyboardEvent.key` for key events.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn time_stamp_ms(&self) -> i64 {
        self.time_stamp_ms
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }
}

fn event_bubbles(event_type: &str) -> bool {
    !matches!(
        event_type,
        "focus" | "blur" | "load" | "error" | "scroll" | "resize"
    )
}

pub(crate) type ListenerCallback = Rc<dyn Fn(&mut Page, &mut EventState) -> Result<()>>;

#[derive(Clone)]
pub(crate) struct Listener {
    pub(crate) capture: bool,
    pub(crate) callback: ListenerCallback,
}

#[derive(Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<EventTarget, HashMap<String, Vec<Listener>>>,
}

impl std::fmt::Debug for ListenerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerStore")
            .field("targets", &self.map.len())
            .finish()
    }
}

impl ListenerStore {
    pub(crate) fn add(&mut self, target: EventTarget, event: &str, listener: Listener) {
        self.map
            .entry(target)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(listener);
    }

    pub(crate) fn get(&self, target: EventTarget, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.capture == capture)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: EventTarget, event: &str) -> usize {
        self.map
            .get(&target)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// A `window.scrollTo` call as the page received it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub top: i64,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationNavigationKind {
    /// Default action of an activated link.
    Link,
    /// Fragment-only change.
    Fragment,
    /// Script assigned `location.href`.
    HrefSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub kind: LocationNavigationKind,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrlBlob {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub(crate) struct WindowState {
    pub(crate) scroll_y: i64,
    pub(crate) inner_width: i64,
    pub(crate) inner_height: i64,
    pub(crate) ready_state: ReadyState,
    pub(crate) active_element: Option<NodeId>,
    pub(crate) location: Url,
    pub(crate) navigations: Vec<LocationNavigation>,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
}

#[derive(Debug, Default)]
pub(crate) struct BrowserApiState {
    next_blob_url_id: usize,
    pub(crate) blob_urls: HashMap<String, ObjectUrlBlob>,
}

impl BrowserApiState {
    pub(crate) fn allocate_blob_url(&mut self, blob: ObjectUrlBlob) -> String {
        self.next_blob_url_id = self.next_blob_url_id.saturating_add(1);
        let object_url = format!("blob:site-{}", self.next_blob_url_id);
        self.blob_urls.insert(object_url.clone(), blob);
        object_url
    }
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_tracing: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_tracing: true,
        }
    }
}
