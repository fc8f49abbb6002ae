use crate::lifecycle::Mount;
use crate::sections::{ActivationBand, IntersectionSource, SectionObserver, TieBreak};
use crate::viewport::{ScrollSource, ViewportTracker};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub id: &'static str,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink { label: "About", id: "about" },
    NavLink { label: "Skills", id: "skills" },
    NavLink { label: "Projects", id: "projects" },
    NavLink { label: "Contact", id: "contact" },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

pub fn scroll_target(element_offset_top: f64, nav_offset: f64) -> ScrollRequest {
    ScrollRequest {
        top: (element_offset_top - nav_offset).max(0.0),
        smooth: true,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavAction {
    Scrolled { progress: f64, scrolled: bool },
    Activated(String),
    ToggleMenu,
    Navigated,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavState {
    pub menu_open: bool,
    pub active: Option<String>,
    pub progress: f64,
    pub scrolled: bool,
}

impl NavState {
    pub fn apply(&mut self, action: NavAction) {
        match action {
            NavAction::Scrolled { progress, scrolled } => {
                self.progress = progress;
                self.scrolled = scrolled;
            }
            NavAction::Activated(id) => self.active = Some(id),
            NavAction::ToggleMenu => self.menu_open = !self.menu_open,
            NavAction::Navigated => self.menu_open = false,
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    pub fn progress_style(&self) -> String {
        format!("transform: scaleX({:.4});", self.progress.clamp(0.0, 1.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavConfig {
    pub nav_offset: f64,
    pub scrolled_threshold: f64,
    pub band: ActivationBand,
    pub tie_break: TieBreak,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            nav_offset: 70.0,
            scrolled_threshold: 40.0,
            band: ActivationBand::default(),
            tie_break: TieBreak::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Navigation {
    links: Vec<NavLink>,
    config: NavConfig,
}

impl Navigation {
    pub fn new(links: impl Into<Vec<NavLink>>, config: NavConfig) -> Self {
        Self {
            links: links.into(),
            config,
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn scroll_request(&self, element_offset_top: f64) -> ScrollRequest {
        scroll_target(element_offset_top, self.config.nav_offset)
    }

    pub fn attach(
        &self,
        scroll: &dyn ScrollSource,
        sections: &dyn IntersectionSource,
        dispatch: impl Fn(NavAction) + 'static,
    ) -> Mount {
        let dispatch = Rc::new(dispatch);
        let threshold = self.config.scrolled_threshold;

        let mut mount = Mount::new();

        let on_scroll = Rc::clone(&dispatch);
        mount.hold(
            ViewportTracker::attach(scroll, move |metrics| {
                on_scroll(NavAction::Scrolled {
                    progress: metrics.progress(),
                    scrolled: metrics.is_scrolled_past(threshold),
                });
            })
            .into_disposer(),
        );

        let observer = SectionObserver::new(
            self.links.iter().map(|link| link.id),
            self.config.band,
            self.config.tie_break,
        );
        let on_active = dispatch;
        mount.hold(
            observer
                .attach(sections, move |id| on_active(NavAction::Activated(id.to_string())))
                .into_disposer(),
        );

        mount
    }
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(NAV_LINKS, NavConfig::default())
    }
}
