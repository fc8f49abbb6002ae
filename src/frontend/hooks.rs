use super::browser::{self, BrowserScroll, BrowserTicker};
use crate::config::ScrollEffect;
use crate::lifecycle::FrameLoop;
use crate::motion::{Counter, SpringConfig};
use crate::pointer::{Point, PointerGlowTracker, Rect};
use crate::viewport::{element_progress, ViewportTracker};
use std::rc::Rc;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

const FRAME_MS: u32 = 16;
const FRAME_SECONDS: f64 = FRAME_MS as f64 / 1_000.0;
const GLOW_WIND_DOWN_MS: u32 = 1_500;

fn browser_frames() -> FrameLoop {
    FrameLoop::new(Rc::new(BrowserTicker), FRAME_MS)
}

#[derive(Clone, PartialEq)]
pub struct PointerGlow {
    pub node: NodeRef,
    pub position: Point,
    pub frame: Option<Rect>,
    pub onmousemove: Callback<MouseEvent>,
    pub onmouseleave: Callback<MouseEvent>,
}

#[hook]
pub fn use_pointer_glow(spring: SpringConfig) -> PointerGlow {
    let node = use_node_ref();
    let position = use_state_eq(Point::default);
    let frame = use_state_eq(|| None::<Rect>);
    let tracker = use_mut_ref(|| PointerGlowTracker::new(spring));
    let frames = use_mut_ref(browser_frames);

    {
        let frames = frames.clone();
        use_effect_with((), move |_| move || frames.borrow_mut().stop());
    }

    let onmousemove = {
        let node = node.clone();
        let position = position.clone();
        let frame = frame.clone();
        let tracker = tracker.clone();
        let frames = frames.clone();
        Callback::from(move |event: MouseEvent| {
            let rect = node.cast::<Element>().map(|element| browser::element_rect(&element));
            if let Some(rect) = rect.filter(Rect::is_measured) {
                frame.set(Some(Rect::new(0.0, 0.0, rect.width, rect.height)));
            }

            let client = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            if !tracker.borrow_mut().pointer_moved(client, rect) {
                return;
            }

            let tracker = tracker.clone();
            let position = position.clone();
            FrameLoop::ensure_running(&frames, move || {
                let mut tracker = tracker.borrow_mut();
                position.set(tracker.step(FRAME_SECONDS));
                !tracker.is_settled()
            });
        })
    };

    let onmouseleave = {
        let frames = frames.clone();
        Callback::from(move |_event: MouseEvent| {
            let running = frames.borrow().is_running();
            if running {
                FrameLoop::stop_after(&frames, GLOW_WIND_DOWN_MS);
            }
        })
    };

    PointerGlow {
        node,
        position: *position,
        frame: *frame,
        onmousemove,
        onmouseleave,
    }
}

#[hook]
pub fn use_scroll_effect(node: NodeRef, effect: Option<ScrollEffect>) -> String {
    let progress = use_state_eq(|| 0.0_f64);

    {
        let progress = progress.clone();
        use_effect_with(effect, move |effect| {
            let mount = effect.map(|effect| {
                ViewportTracker::attach(&BrowserScroll, move |metrics| {
                    if let Some(element) = node.cast::<Element>() {
                        let rect = browser::element_rect(&element);
                        progress.set(element_progress(
                            rect.top,
                            rect.height,
                            metrics.viewport_height,
                            effect.span,
                        ));
                    }
                })
            });
            move || drop(mount)
        });
    }

    effect
        .map(|effect| effect.style(*progress))
        .unwrap_or_default()
}

#[hook]
pub fn use_counter(counter: Counter) -> u32 {
    let value = use_state_eq(|| 0_u32);
    let frames = use_mut_ref(browser_frames);

    {
        let value = value.clone();
        use_effect_with(counter, move |counter| {
            let counter = *counter;
            let started_at = browser::now_ms();
            FrameLoop::ensure_running(&frames, move || {
                let elapsed_ms = browser::now_ms() - started_at;
                value.set(counter.value_at(elapsed_ms));
                !counter.is_done(elapsed_ms)
            });
            move || frames.borrow_mut().stop()
        });
    }

    *value
}
