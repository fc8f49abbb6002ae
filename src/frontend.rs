mod browser;
mod detail;
mod home;
mod hooks;
mod navbar;

use crate::catalog::ProjectCatalog;
use crate::config::SiteConfig;
use crate::nav::{Navigation, NAV_LINKS};
use crate::route::Route;
use crate::telemetry::{log_event, LogLevel};
use detail::{NotFound, ProjectDetail};
use home::Home;
use navbar::Navbar;
use web_sys::window;
use yew::prelude::*;

fn load_catalog(log_level: LogLevel) -> ProjectCatalog {
    ProjectCatalog::bundled().unwrap_or_else(|error| {
        log_event(
            log_level,
            LogLevel::Warn,
            "catalog_invalid",
            serde_json::json!({ "error": error.to_string() }),
        );
        ProjectCatalog::empty()
    })
}

#[function_component(App)]
fn app() -> Html {
    let config = *use_memo((), |_| SiteConfig::default().with_overrides(browser::mount_setting));
    let route = use_memo((), |_| Route::parse(&browser::current_path()));
    let catalog = use_memo(config.log_level, |log_level| load_catalog(*log_level));
    let navigation = Navigation::new(NAV_LINKS, config.nav);

    let page = match &*route {
        Route::Home => html! { <Home config={config} catalog={(*catalog).clone()} /> },
        Route::Project(slug) => html! {
            <ProjectDetail
                slug={AttrValue::from(slug.clone())}
                catalog={(*catalog).clone()}
                log_level={config.log_level}
            />
        },
        Route::NotFound => html! { <NotFound /> },
    };

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <Navbar navigation={navigation} />
            <main id="content">{page}</main>
            <footer class="site-footer">
                <p class="muted">{"© Muhammad Riduan. Built with Rust and Yew."}</p>
            </footer>
        </>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(browser::MOUNT_ID));

    match root {
        Some(root) => yew::Renderer::<App>::with_root(root).render(),
        None => {
            log_event(
                LogLevel::Warn,
                LogLevel::Warn,
                "mount_point_missing",
                serde_json::json!({ "id": browser::MOUNT_ID }),
            );
            yew::Renderer::<App>::new().render()
        }
    };
}
