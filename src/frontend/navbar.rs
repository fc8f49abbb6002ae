use super::browser::{self, BrowserScroll, BrowserSections};
use crate::nav::{NavAction, NavLink, NavState, Navigation};
use crate::route::Route;
use std::rc::Rc;
use web_sys::MouseEvent;
use yew::prelude::*;

const LOGO_TARGET: &str = "about";

impl Reducible for NavState {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub navigation: Navigation,
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let state = use_reducer(NavState::default);

    {
        let dispatcher = state.dispatcher();
        use_effect_with(props.navigation.clone(), move |navigation| {
            let mount = navigation.attach(&BrowserScroll, &BrowserSections, move |action| {
                dispatcher.dispatch(action);
            });
            move || drop(mount)
        });
    }

    // Links fall back to plain `/#id` navigation when the region is not on
    // this page.
    let go_to = {
        let navigation = props.navigation.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |(id, event): (&'static str, MouseEvent)| {
            if let Some(offset_top) = browser::section_offset_top(id) {
                event.prevent_default();
                browser::scroll_window(navigation.scroll_request(offset_top));
                dispatcher.dispatch(NavAction::Navigated);
            }
        })
    };

    let on_toggle = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(NavAction::ToggleMenu))
    };

    let render_link = |link: &NavLink| {
        let id = link.id;
        let onclick = go_to.reform(move |event: MouseEvent| (id, event));
        html! {
            <a
                key={id}
                class={classes!("nav-link", state.is_active(id).then_some("is-active"))}
                href={Route::section_href(id)}
                aria-current={state.is_active(id).then_some("true")}
                onclick={onclick}
            >
                {link.label}
            </a>
        }
    };

    let on_logo = go_to.reform(|event: MouseEvent| (LOGO_TARGET, event));

    html! {
        <nav class={classes!("navbar", state.scrolled.then_some("is-scrolled"))}>
            <div class="nav-progress" style={state.progress_style()} aria-hidden="true" />
            <div class="nav-inner">
                <a class="nav-logo" href={Route::section_href(LOGO_TARGET)} onclick={on_logo}>
                    {"Riduan"}
                </a>
                <div class="nav-links">
                    { for props.navigation.links().iter().map(render_link) }
                </div>
                <button
                    class="nav-toggle"
                    type="button"
                    aria-label="Toggle menu"
                    aria-expanded={state.menu_open.to_string()}
                    onclick={on_toggle}
                >
                    { if state.menu_open { "✕" } else { "☰" } }
                </button>
            </div>
            if state.menu_open {
                <div class="nav-mobile">
                    { for props.navigation.links().iter().map(render_link) }
                </div>
            }
        </nav>
    }
}
