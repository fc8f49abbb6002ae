use crate::catalog::{Access, CaseBody, CaseStudy, CaseVideo, ProjectCatalog, VideoSource};
use crate::route::Route;
use crate::telemetry::{log_event, LogLevel};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProjectDetailProps {
    pub slug: AttrValue,
    pub catalog: ProjectCatalog,
    pub log_level: LogLevel,
}

#[function_component(ProjectDetail)]
pub fn project_detail(props: &ProjectDetailProps) -> Html {
    let record = match props.catalog.find(&props.slug) {
        Ok(record) => record,
        Err(error) => {
            log_event(
                props.log_level,
                LogLevel::Info,
                "project_not_found",
                serde_json::json!({ "slug": props.slug.as_str(), "reason": error.to_string() }),
            );
            return html! { <NotFound /> };
        }
    };

    let study = record.case_study();

    html! {
        <article class="case-study container">
            <a class="back-link" href={Route::section_href("projects")}>{"← Back to Projects"}</a>
            <header class="case-header">
                if let Some(badge) = study.badge {
                    <span class="pill">{badge}</span>
                }
                <h1>{study.title}</h1>
                <p class="case-role">{study.role}</p>
            </header>

            { for study.sections.iter().map(|section| html! {
                <section class="card case-section" key={section.title}>
                    <h2>{section.title}</h2>
                    { render_body(&section.body) }
                </section>
            }) }

            { render_video(&study) }

            <section class="case-tech">
                <h2>{"Technology Stack"}</h2>
                <div class="tech-list">
                    { for study.tech.iter().map(|tech| html! { <span class="chip" key={tech.clone()}>{tech.clone()}</span> }) }
                </div>
            </section>

            if !study.repositories.is_empty() || study.apk.is_some() {
                <section class="case-links">
                    <h2>{"Source & Downloads"}</h2>
                    <div class="link-row">
                        { for study.repositories.iter().map(|link| html! {
                            <a
                                key={link.label.clone()}
                                class="button button-outline"
                                href={link.url.to_string()}
                                target="_blank"
                                rel="noopener noreferrer"
                            >
                                {format!("{} Repository", link.label)}
                            </a>
                        }) }
                        if let Some(apk) = study.apk {
                            <a class="button button-outline" href={apk.to_string()} download="">{"Download APK"}</a>
                        }
                    </div>
                </section>
            }

            { render_access(study.access) }

            if let Some(note) = study.note {
                <p class="notice">{note}</p>
            }
        </article>
    }
}

fn render_body(body: &CaseBody<'_>) -> Html {
    match body {
        CaseBody::Text(text) => html! { <p>{*text}</p> },
        CaseBody::Flow(stages) => html! {
            <ol class="flow">
                { for stages.iter().map(|stage| html! { <li key={*stage}>{*stage}</li> }) }
            </ol>
        },
    }
}

fn render_video(study: &CaseStudy<'_>) -> Html {
    let Some(CaseVideo { source, url }) = study.video.as_ref() else {
        return Html::default();
    };

    let player = match source {
        VideoSource::YouTube | VideoSource::Drive => html! {
            <iframe
                src={url.clone()}
                title={format!("{} demo", study.title)}
                allow="autoplay; encrypted-media; picture-in-picture"
                allowfullscreen=true
            />
        },
        VideoSource::Local | VideoSource::External => html! {
            <video src={url.clone()} controls={true} playsinline=true preload="metadata" />
        },
    };

    html! {
        <section class="case-media">
            <h2>{"Demo"}</h2>
            <div class={classes!("media-frame", study.frame.class())}>
                {player}
            </div>
        </section>
    }
}

fn render_access(access: Access<'_>) -> Html {
    match access {
        Access::Public { live_url, usage } => html! {
            <>
                if !usage.is_empty() {
                    <section class="card case-usage">
                        <h2>{"How to Run"}</h2>
                        <ol>
                            { for usage.iter().map(|step| html! { <li key={step.clone()}>{step.clone()}</li> }) }
                        </ol>
                    </section>
                }
                if let Some(live_url) = live_url {
                    <a
                        class="button button-primary"
                        href={live_url.to_string()}
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        {"View Live Demo →"}
                    </a>
                }
            </>
        },
        Access::Confidential => html! {
            <aside class="card disclosure">
                <p class="disclosure-kicker">{"Disclosure"}</p>
                <p class="disclosure-title">{"Enterprise Confidentiality Context"}</p>
                <p>
                    {"Detailed architectural implementation, internal workflows, and system integrations are protected under a professional NDA agreement. This case study intentionally presents a high-level overview to demonstrate design thinking and system architecture principles."}
                </p>
            </aside>
        },
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="not-found container">
            <h1>{"404"}</h1>
            <p>{"This page could not be found."}</p>
            <a class="button button-primary" href={Route::Home.href()}>{"Back home"}</a>
        </section>
    }
}
