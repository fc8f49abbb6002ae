use super::browser::{self, BrowserClipboard, BrowserTicker};
use super::hooks::{use_counter, use_pointer_glow, use_scroll_effect};
use crate::catalog::{ProjectCatalog, ProjectRecord};
use crate::clipboard::{CopyAction, CopyStatus};
use crate::config::{HeroMotion, SectionMotion, SiteConfig};
use crate::motion::Counter;
use crate::pointer::{magnetic_offset, Point, TiltController};
use crate::roles::RoleCycler;
use crate::route::Route;
use crate::skills::{Highlight, SkillFilter, SkillMap};
use crate::telemetry::LogLevel;
use std::rc::Rc;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

const CONTACT_EMAIL: &str = "muhamadridwanbjm@gmail.com";

const STATS: [(u32, &str); 3] = [
    (12, "Projects Engineered"),
    (6, "Systems Deployed"),
    (3, "Cloud Environments"),
];

const PRINCIPLES: [(&str, &str); 3] = [
    (
        "System Thinking",
        "Designing software as interconnected components, not isolated features.",
    ),
    (
        "Reliability First",
        "Every architectural decision anticipates failure, recovery, and observability.",
    ),
    (
        "Long-Term Maintainability",
        "Code should remain understandable months later, even under pressure.",
    ),
];

const SYSTEM_LAYERS: [&str; 5] = ["Client", "API Gateway", "Services", "Data", "Infrastructure"];

const CONTACT_LINKS: [(&str, &str, bool); 4] = [
    ("Email", "mailto:muhamadridwanbjm@gmail.com", false),
    ("LinkedIn", "https://linkedin.com/in/muhammad-riduan-018890256", true),
    ("GitHub", "https://github.com/RduaneD", true),
    ("WhatsApp", "https://wa.me/6285849985763", true),
];

fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    pub config: SiteConfig,
    pub catalog: ProjectCatalog,
}

#[function_component(Home)]
pub fn home(props: &HomeProps) -> Html {
    let config = props.config;

    html! {
        <>
            <Hero motion={config.hero} role_interval_ms={config.role_interval_ms} />
            <About
                motion={config.about}
                counter_duration_ms={config.counter_duration_ms}
                show_system_layers={config.show_system_layers}
            />
            <Skills motion={config.skills} />
            <Projects
                motion={config.projects}
                tilt_degrees={config.project_tilt_degrees}
                catalog={props.catalog.clone()}
            />
            <Contact
                motion={config.contact}
                copy_revert_ms={config.copy_revert_ms}
                log_level={config.log_level}
            />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct HeroProps {
    motion: HeroMotion,
    role_interval_ms: u32,
}

#[function_component(Hero)]
fn hero(props: &HeroProps) -> Html {
    let motion = props.motion;
    let glow = use_pointer_glow(motion.section.glow_spring);
    let content_style = use_scroll_effect(glow.node.clone(), motion.section.scroll);
    let role = use_state_eq(|| RoleCycler::default().current().unwrap_or_default().to_string());
    let magnet = use_state_eq(Point::default);
    let cta = use_node_ref();

    {
        let role = role.clone();
        use_effect_with(props.role_interval_ms, move |period_ms| {
            let cycler = RoleCycler::default();
            role.set(cycler.current().unwrap_or_default().to_string());
            let mount = cycler.attach(&BrowserTicker, *period_ms, move |_, next| {
                role.set(next.to_string());
            });
            move || drop(mount)
        });
    }

    let on_cta_move = {
        let magnet = magnet.clone();
        let cta = cta.clone();
        let strength = motion.magnetic_strength;
        Callback::from(move |event: MouseEvent| {
            let rect = cta.cast::<Element>().map(|element| browser::element_rect(&element));
            if let Some(offset) = magnetic_offset(client_point(&event), rect, strength) {
                magnet.set(offset);
            }
        })
    };

    let on_cta_leave = {
        let magnet = magnet.clone();
        Callback::from(move |_: MouseEvent| magnet.set(Point::default()))
    };

    let portrait_style = glow
        .frame
        .map(|frame| {
            TiltController::new(motion.tilt_degrees)
                .with_input_extent(motion.tilt_extent_px)
                .pointer_moved(glow.position, Some(frame))
        })
        .unwrap_or_default()
        .transform();

    html! {
        <section
            class="hero"
            ref={glow.node.clone()}
            onmousemove={glow.onmousemove.clone()}
            onmouseleave={glow.onmouseleave.clone()}
        >
            <div class="glow" style={motion.section.glow.background(glow.position)} />
            <div class="hero-content" style={content_style}>
                <div class="hero-copy">
                    <span class="pill">{"Open to opportunities"}</span>
                    <h1 class="hero-name">{"Muhammad Riduan"}</h1>
                    <h2 class="hero-role" key={(*role).clone()}>{(*role).clone()}</h2>
                    <p class="hero-lede">
                        {"I architect scalable backend systems and cloud-native platforms engineered for reliability, performance, and production-grade deployment."}
                    </p>
                    <div class="hero-actions">
                        <a
                            ref={cta}
                            class="button button-primary"
                            href={Route::section_href("projects")}
                            style={format!("transform: translate({:.1}px, {:.1}px);", magnet.x, magnet.y)}
                            onmousemove={on_cta_move}
                            onmouseleave={on_cta_leave}
                        >
                            {"View Projects ↘"}
                        </a>
                        <a class="button button-outline" href="/cv/Muhammad_Riduan_CV.pdf" download="">
                            {"Download CV"}
                        </a>
                    </div>
                </div>
                <div class="hero-portrait" style={portrait_style}>
                    <img src="/images/profile.png" alt="Muhammad Riduan" />
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct AboutProps {
    motion: SectionMotion,
    counter_duration_ms: u32,
    show_system_layers: bool,
}

#[function_component(About)]
fn about(props: &AboutProps) -> Html {
    let glow = use_pointer_glow(props.motion.glow_spring);
    let content_style = use_scroll_effect(glow.node.clone(), props.motion.scroll);
    let duration_ms = f64::from(props.counter_duration_ms);

    html! {
        <section
            id="about"
            class="section about"
            ref={glow.node.clone()}
            onmousemove={glow.onmousemove.clone()}
            onmouseleave={glow.onmouseleave.clone()}
        >
            <div class="glow" style={props.motion.glow.background(glow.position)} />
            <div class="container" style={content_style}>
                <h2 class="section-title">{"About Me"}</h2>
                <p class="section-lede">
                    {"I don't just build features. I engineer systems that remain stable as complexity grows."}
                </p>
                <div class="about-grid">
                    <div class="about-story">
                        <p>{"I specialize in backend architecture, secure APIs, and cloud-native infrastructure."}</p>
                        <p>{"My focus is ensuring software survives real usage, not just ideal conditions."}</p>
                        <p>{"Performance, scalability, and operational clarity guide every technical decision I make."}</p>
                    </div>
                    <div class="about-stats">
                        { for STATS.iter().map(|(target, label)| html! {
                            <StatCard key={*label} counter={Counter::new(*target, duration_ms)} label={*label} />
                        }) }
                    </div>
                </div>
                <div class="principles">
                    { for PRINCIPLES.iter().map(|(title, description)| html! {
                        <div class="card principle" key={*title}>
                            <h3>{*title}</h3>
                            <p>{*description}</p>
                        </div>
                    }) }
                </div>
                if props.show_system_layers {
                    <ol class="flow system-layers">
                        { for SYSTEM_LAYERS.iter().map(|layer| html! { <li key={*layer}>{*layer}</li> }) }
                    </ol>
                }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    counter: Counter,
    label: &'static str,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    let value = use_counter(props.counter);

    html! {
        <div class="card stat">
            <span class="stat-value">{format!("{value}+")}</span>
            <span class="stat-label">{props.label}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SkillsProps {
    motion: SectionMotion,
}

#[function_component(Skills)]
fn skills(props: &SkillsProps) -> Html {
    let glow = use_pointer_glow(props.motion.glow_spring);
    let map = use_state_eq(SkillMap::default);

    let set_filter = {
        let map = map.clone();
        Callback::from(move |filter: SkillFilter| {
            let mut next = (*map).clone();
            next.set_filter(filter);
            map.set(next);
        })
    };

    let set_hover = {
        let map = map.clone();
        Callback::from(move |name: Option<&'static str>| {
            let mut next = (*map).clone();
            next.hover(name);
            map.set(next);
        })
    };

    html! {
        <section
            id="skills"
            class="section skills"
            ref={glow.node.clone()}
            onmousemove={glow.onmousemove.clone()}
            onmouseleave={glow.onmouseleave.clone()}
        >
            <div class="glow" style={props.motion.glow.background(glow.position)} />
            <div class="container">
                <h2 class="section-title">{"Engineering Capability Map"}</h2>
                <p class="section-lede">
                    {"Interactive visualization of my engineering stack and technology focus."}
                </p>
                <div class="skill-filters">
                    { for SkillFilter::ALL.iter().map(|filter| {
                        let filter = *filter;
                        html! {
                            <button
                                type="button"
                                key={filter.label()}
                                class={classes!("chip", (map.filter() == filter).then_some("is-selected"))}
                                onclick={set_filter.reform(move |_: MouseEvent| filter)}
                            >
                                {filter.label()}
                            </button>
                        }
                    }) }
                </div>
                <div class="skill-grid">
                    { for map.visible().map(|skill| {
                        let name = skill.name;
                        html! {
                            <div
                                key={name}
                                class={map.highlight(name).class()}
                                onmouseenter={set_hover.reform(move |_: MouseEvent| Some(name))}
                                onmouseleave={set_hover.reform(|_: MouseEvent| None)}
                            >
                                <span>{name}</span>
                                if map.highlight(name) == Highlight::Active {
                                    <span class="skill-outline" aria-hidden="true" />
                                }
                            </div>
                        }
                    }) }
                </div>
                <p class="legend">{"Hover a skill to highlight its focus area"}</p>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectsProps {
    motion: SectionMotion,
    tilt_degrees: f64,
    catalog: ProjectCatalog,
}

#[function_component(Projects)]
fn projects(props: &ProjectsProps) -> Html {
    let glow = use_pointer_glow(props.motion.glow_spring);
    let content_style = use_scroll_effect(glow.node.clone(), props.motion.scroll);

    html! {
        <section
            id="projects"
            class="section projects"
            ref={glow.node.clone()}
            onmousemove={glow.onmousemove.clone()}
            onmouseleave={glow.onmouseleave.clone()}
        >
            <div class="glow" style={props.motion.glow.background(glow.position)} />
            <div class="container" style={content_style}>
                <h2 class="section-title">{"Project Experience"}</h2>
                if props.catalog.is_empty() {
                    <p class="notice">{"Projects are unavailable right now."}</p>
                } else {
                    <div class="project-grid">
                        { for props.catalog.records().iter().map(|record| html! {
                            <ProjectCard
                                key={record.slug.clone()}
                                record={Rc::new(record.clone())}
                                tilt_degrees={props.tilt_degrees}
                            />
                        }) }
                    </div>
                }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    record: Rc<ProjectRecord>,
    tilt_degrees: f64,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let node = use_node_ref();
    let tilt = use_mut_ref(|| TiltController::new(props.tilt_degrees));
    let resting = tilt.borrow().angles();
    let angles = use_state_eq(move || resting);

    let onmousemove = {
        let node = node.clone();
        let angles = angles.clone();
        let tilt = tilt.clone();
        Callback::from(move |event: MouseEvent| {
            let rect = node.cast::<Element>().map(|element| browser::element_rect(&element));
            let next = tilt.borrow_mut().pointer_moved(client_point(&event), rect);
            angles.set(next);
        })
    };

    let onmouseleave = {
        let angles = angles.clone();
        Callback::from(move |_: MouseEvent| {
            let next = tilt.borrow_mut().pointer_left();
            angles.set(next);
        })
    };

    let record = &props.record;
    html! {
        <a
            ref={node}
            class="card project-card"
            href={Route::Project(record.slug.clone()).href()}
            style={angles.transform()}
            onmousemove={onmousemove}
            onmouseleave={onmouseleave}
        >
            <div class="card-tags">
                if let Some(badge) = record.badge.clone() {
                    <span class="pill">{badge}</span>
                }
                if let Some(platform) = record.platform {
                    <span class="pill pill-muted">{platform.as_str()}</span>
                }
            </div>
            <h3>{record.title.clone()}</h3>
            <p class="project-role">{record.role.clone()}</p>
            <p class="muted">{record.summary.clone()}</p>
            <div class="tech-list">
                { for record.tech.iter().map(|tech| html! { <span class="chip" key={tech.clone()}>{tech.clone()}</span> }) }
            </div>
            <span class="card-cta">{"View Project →"}</span>
        </a>
    }
}

#[derive(Properties, PartialEq)]
struct ContactProps {
    motion: SectionMotion,
    copy_revert_ms: u32,
    log_level: LogLevel,
}

#[function_component(Contact)]
fn contact(props: &ContactProps) -> Html {
    let glow = use_pointer_glow(props.motion.glow_spring);
    let status = use_state_eq(CopyStatus::default);
    let action = use_mut_ref(|| None::<CopyAction>);

    {
        let status = status.clone();
        let action = action.clone();
        use_effect_with(
            (props.copy_revert_ms, props.log_level),
            move |(revert_ms, log_level)| {
                *action.borrow_mut() = Some(CopyAction::new(
                    CONTACT_EMAIL,
                    *revert_ms,
                    *log_level,
                    Rc::new(BrowserTicker),
                    move |next| status.set(next),
                ));
                move || drop(action.borrow_mut().take())
            },
        );
    }

    let on_copy = {
        let action = action.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(action) = action.borrow().as_ref() {
                action.trigger(&BrowserClipboard);
            }
        })
    };

    let copy_label = match *status {
        CopyStatus::Copied => "Copied!",
        CopyStatus::Idle | CopyStatus::Failed => "Copy email",
    };

    html! {
        <section
            id="contact"
            class="section contact"
            ref={glow.node.clone()}
            onmousemove={glow.onmousemove.clone()}
            onmouseleave={glow.onmouseleave.clone()}
        >
            <div class="glow" style={props.motion.glow.background(glow.position)} />
            <div class="container">
                <h2 class="section-title">{"Let's Work Together"}</h2>
                <p class="section-lede">
                    {"Interested in collaborating, hiring, or discussing a project?"}
                </p>
                <div class="card contact-card">
                    <div class="contact-links">
                        { for CONTACT_LINKS.iter().map(|(label, href, external)| html! {
                            <a
                                key={*label}
                                class="contact-link"
                                href={*href}
                                target={external.then_some("_blank")}
                                rel={external.then_some("noopener noreferrer")}
                            >
                                {*label}
                            </a>
                        }) }
                    </div>
                    <button type="button" class="button button-outline" onclick={on_copy}>
                        {copy_label}
                    </button>
                    if *status == CopyStatus::Failed {
                        <p class="notice" role="status">
                            {format!("Couldn't copy automatically. The address is {CONTACT_EMAIL}.")}
                        </p>
                    }
                </div>
            </div>
        </section>
    }
}
