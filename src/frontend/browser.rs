use crate::clipboard::{Clipboard, ClipboardError};
use crate::lifecycle::{Disposer, Ticker};
use crate::nav::ScrollRequest;
use crate::pointer::Rect;
use crate::sections::{ActivationBand, IntersectionBatch, IntersectionEntry, IntersectionSource};
use crate::telemetry::{log_event, LogLevel};
use crate::viewport::{ScrollMetrics, ScrollSource};
use gloo_timers::callback::{Interval, Timeout};
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    window, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollToOptions,
};

const SCROLL_EVENTS: [&str; 2] = ["scroll", "resize"];
pub const MOUNT_ID: &str = "app";

fn warn_js_failure(event: &str, detail: &str, error: &JsValue) {
    log_event(
        LogLevel::Warn,
        LogLevel::Warn,
        event,
        serde_json::json!({ "detail": detail, "error": describe_js_error(error) }),
    );
}

pub struct BrowserTicker;

impl Ticker for BrowserTicker {
    fn every(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> Disposer {
        let interval = Interval::new(period_ms, move || tick());
        Disposer::new(move || drop(interval))
    }

    fn after(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Disposer {
        let timeout = Timeout::new(delay_ms, move || fire());
        Disposer::new(move || drop(timeout))
    }
}

pub struct BrowserScroll;

impl ScrollSource for BrowserScroll {
    fn metrics(&self) -> ScrollMetrics {
        current_metrics()
    }

    fn on_scroll(&self, mut handler: Box<dyn FnMut(ScrollMetrics)>) -> Disposer {
        let Some(win) = window() else {
            return Disposer::noop();
        };

        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            handler(current_metrics());
        });
        let function: Function = callback.as_ref().unchecked_ref::<Function>().clone();

        for event in SCROLL_EVENTS {
            if let Err(error) = win.add_event_listener_with_callback(event, &function) {
                warn_js_failure("scroll_listener_failed", event, &error);
            }
        }

        Disposer::new(move || {
            for event in SCROLL_EVENTS {
                if let Err(error) = win.remove_event_listener_with_callback(event, &function) {
                    warn_js_failure("scroll_listener_release_failed", event, &error);
                }
            }
            drop(callback);
        })
    }
}

pub struct BrowserSections;

impl IntersectionSource for BrowserSections {
    fn observe(
        &self,
        ids: &[String],
        band: ActivationBand,
        mut on_batch: Box<dyn FnMut(IntersectionBatch)>,
    ) -> Disposer {
        let Some(document) = window().and_then(|w| w.document()) else {
            return Disposer::noop();
        };

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| {
                        let rect = entry.bounding_client_rect();
                        IntersectionEntry {
                            id: entry.target().id(),
                            is_intersecting: entry.is_intersecting(),
                            top: rect.top(),
                        }
                    })
                    .collect();

                on_batch(IntersectionBatch {
                    viewport_height: viewport_height(),
                    entries,
                });
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&band.root_margin());
        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(error) => {
                    warn_js_failure("section_observer_failed", &band.root_margin(), &error);
                    return Disposer::noop();
                }
            };

        // Regions missing from the document are skipped.
        for id in ids {
            if let Some(element) = document.get_element_by_id(id) {
                observer.observe(&element);
            }
        }

        Disposer::new(move || {
            observer.disconnect();
            drop(callback);
        })
    }
}

pub struct BrowserClipboard;

impl Clipboard for BrowserClipboard {
    fn write_text(&self, text: &str, done: Box<dyn FnOnce(Result<(), ClipboardError>)>) {
        let promise = match clipboard_write_promise(text) {
            Ok(promise) => promise,
            Err(error) => {
                done(Err(error));
                return;
            }
        };

        spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|error| ClipboardError::Rejected(describe_js_error(&error)));
            done(result);
        });
    }
}

fn clipboard_write_promise(text: &str) -> Result<Promise, ClipboardError> {
    let navigator: JsValue = window().ok_or(ClipboardError::Unavailable)?.navigator().into();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
        .ok_or(ClipboardError::Unavailable)?;

    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or(ClipboardError::Unavailable)?;

    write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|error| ClipboardError::Rejected(describe_js_error(&error)))?
        .dyn_into::<Promise>()
        .map_err(|_| ClipboardError::Unavailable)
}

fn describe_js_error(error: &JsValue) -> String {
    Reflect::get(error, &JsValue::from_str("name"))
        .ok()
        .and_then(|value| value.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn current_metrics() -> ScrollMetrics {
    let Some(win) = window() else {
        return ScrollMetrics::default();
    };

    let viewport_height = viewport_height();
    let scroll_height = win
        .document()
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(viewport_height);

    ScrollMetrics::new(win.scroll_y().unwrap_or(0.0), scroll_height, viewport_height)
}

pub fn viewport_height() -> f64 {
    window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn section_offset_top(id: &str) -> Option<f64> {
    window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<HtmlElement>()
        .ok()
        .map(|element| f64::from(element.offset_top()))
}

pub fn scroll_window(request: ScrollRequest) {
    let Some(win) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(request.top);
    options.set_behavior(if request.smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    win.scroll_to_with_scroll_to_options(&options);
}

pub fn mount_setting(name: &str) -> Option<String> {
    window()?
        .document()?
        .get_element_by_id(MOUNT_ID)?
        .get_attribute(&format!("data-{name}"))
}

pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
