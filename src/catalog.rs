use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

const BUNDLED_PROJECTS: &str = include_str!("../data/projects.json");
const ARCHITECTURE_ARROWS: [&str; 2] = ["→", "->"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid project table: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("project #{index} has an empty slug")]
    EmptySlug { index: usize },
    #[error("duplicate project slug `{0}`")]
    DuplicateSlug(String),
    #[error("no project with slug `{0}`")]
    NotFound(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Mobile,
    Desktop,
    Api,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Api => "api",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaFrame {
    Browser,
    Phone,
    Window,
    Terminal,
    Plain,
}

impl MediaFrame {
    pub fn for_platform(platform: Option<Platform>) -> Self {
        match platform {
            Some(Platform::Web) => Self::Browser,
            Some(Platform::Mobile) => Self::Phone,
            Some(Platform::Desktop) => Self::Window,
            Some(Platform::Api) => Self::Terminal,
            None => Self::Plain,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Browser => "frame-browser",
            Self::Phone => "frame-phone",
            Self::Window => "frame-window",
            Self::Terminal => "frame-terminal",
            Self::Plain => "frame-plain",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoSource {
    Local,
    YouTube,
    Drive,
    External,
}

// Empty or absent values have no source.
pub fn classify_video(value: Option<&str>) -> Option<VideoSource> {
    let value = value.map(str::trim).filter(|value| !value.is_empty())?;

    let source = if value.contains("youtube.com") || value.contains("youtu.be") {
        VideoSource::YouTube
    } else if value.contains("drive.google.com") {
        VideoSource::Drive
    } else if value.starts_with('/') {
        VideoSource::Local
    } else {
        VideoSource::External
    };

    Some(source)
}

pub fn embed_url(source: VideoSource, value: &str) -> String {
    let value = value.trim();
    match source {
        VideoSource::YouTube => youtube_video_id(value)
            .map(|id| format!("https://www.youtube.com/embed/{id}"))
            .unwrap_or_else(|| value.to_string()),
        VideoSource::Drive => value
            .split_once("/view")
            .map(|(head, _)| format!("{head}/preview"))
            .unwrap_or_else(|| value.to_string()),
        VideoSource::Local | VideoSource::External => value.to_string(),
    }
}

fn youtube_video_id(value: &str) -> Option<&str> {
    let id = if let Some((_, rest)) = value.split_once("youtu.be/") {
        rest
    } else if let Some((_, rest)) = value.split_once("/embed/") {
        rest
    } else if let Some((_, rest)) = value.split_once("v=") {
        rest
    } else {
        return None;
    };

    let id = id.split(['?', '&', '#', '/']).next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

// Stray arrows never produce empty stages.
pub fn split_architecture(value: &str) -> Vec<&str> {
    let mut stages = vec![value];
    for arrow in ARCHITECTURE_ARROWS {
        stages = stages.into_iter().flat_map(|part| part.split(arrow)).collect();
    }

    stages
        .into_iter()
        .map(str::trim)
        .filter(|stage| !stage.is_empty())
        .collect()
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub slug: String,
    pub title: String,
    pub role: String,
    pub summary: String,
    #[serde(default)]
    pub platform: Option<Platform>,
    pub story: String,
    pub challenge: String,
    pub architecture: String,
    pub result: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub badge: Option<String>,
    pub is_public: bool,
    #[serde(default)]
    live_url: Option<String>,
    #[serde(default)]
    usage: Vec<String>,
    #[serde(default)]
    pub apk: Option<String>,
    #[serde(default)]
    pub github_frontend: Option<String>,
    #[serde(default)]
    pub github_backend: Option<String>,
    #[serde(default)]
    pub github_machine_learning: Vec<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access<'a> {
    Public {
        live_url: Option<&'a str>,
        usage: &'a [String],
    },
    Confidential,
}

impl ProjectRecord {
    // live_url and usage are withheld for non-public projects.
    pub fn access(&self) -> Access<'_> {
        if self.is_public {
            Access::Public {
                live_url: self.live_url.as_deref(),
                usage: &self.usage,
            }
        } else {
            Access::Confidential
        }
    }

    pub fn architecture_stages(&self) -> Vec<&str> {
        split_architecture(&self.architecture)
    }

    pub fn video_source(&self) -> Option<VideoSource> {
        classify_video(self.video.as_deref())
    }

    pub fn media_frame(&self) -> MediaFrame {
        MediaFrame::for_platform(self.platform)
    }

    pub fn case_study(&self) -> CaseStudy<'_> {
        CaseStudy::from_record(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseBody<'a> {
    Text(&'a str),
    Flow(Vec<&'a str>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseSection<'a> {
    pub title: &'static str,
    pub body: CaseBody<'a>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoLink<'a> {
    pub label: String,
    pub url: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseVideo {
    pub source: VideoSource,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseStudy<'a> {
    pub title: &'a str,
    pub role: &'a str,
    pub badge: Option<&'a str>,
    pub sections: Vec<CaseSection<'a>>,
    pub tech: &'a [String],
    pub repositories: Vec<RepoLink<'a>>,
    pub apk: Option<&'a str>,
    pub video: Option<CaseVideo>,
    pub frame: MediaFrame,
    pub note: Option<&'a str>,
    pub access: Access<'a>,
}

impl<'a> CaseStudy<'a> {
    pub fn from_record(record: &'a ProjectRecord) -> Self {
        let sections = vec![
            CaseSection {
                title: "Context & Story",
                body: CaseBody::Text(&record.story),
            },
            CaseSection {
                title: "Technical Challenge",
                body: CaseBody::Text(&record.challenge),
            },
            CaseSection {
                title: "Architecture Approach",
                body: CaseBody::Flow(record.architecture_stages()),
            },
            CaseSection {
                title: "Outcome & Impact",
                body: CaseBody::Text(&record.result),
            },
        ];

        let mut repositories = Vec::new();
        if let Some(url) = record.github_frontend.as_deref() {
            repositories.push(RepoLink {
                label: "Frontend".to_string(),
                url,
            });
        }
        if let Some(url) = record.github_backend.as_deref() {
            repositories.push(RepoLink {
                label: "Backend".to_string(),
                url,
            });
        }
        let ml_count = record.github_machine_learning.len();
        for (index, url) in record.github_machine_learning.iter().enumerate() {
            let label = if ml_count == 1 {
                "Machine Learning".to_string()
            } else {
                format!("Machine Learning {}", index + 1)
            };
            repositories.push(RepoLink { label, url });
        }

        let video = record
            .video
            .as_deref()
            .zip(record.video_source())
            .map(|(value, source)| CaseVideo {
                source,
                url: embed_url(source, value),
            });

        Self {
            title: &record.title,
            role: &record.role,
            badge: record.badge.as_deref(),
            sections,
            tech: &record.tech,
            repositories,
            apk: record.apk.as_deref(),
            video,
            frame: record.media_frame(),
            note: record.note.as_deref(),
            access: record.access(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProjectCatalog {
    records: Arc<[ProjectRecord]>,
}

impl PartialEq for ProjectCatalog {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records) || self.records == other.records
    }
}

impl ProjectCatalog {
    pub fn new(records: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, record) in records.iter().enumerate() {
            if record.slug.trim().is_empty() {
                return Err(CatalogError::EmptySlug { index });
            }
            if !seen.insert(record.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(record.slug.clone()));
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ProjectRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_PROJECTS)
    }

    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }

    // Case-sensitive.
    pub fn find(&self, slug: &str) -> Result<&ProjectRecord, CatalogError> {
        self.records
            .iter()
            .find(|record| record.slug == slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(slug: &str, is_public: bool, extra: &str) -> String {
        format!(
            r#"{{
                "slug": "{slug}",
                "title": "Title",
                "role": "Role",
                "summary": "Summary",
                "story": "Story",
                "challenge": "Challenge",
                "architecture": "A → B",
                "result": "Result",
                "isPublic": {is_public}
                {extra}
            }}"#
        )
    }

    fn catalog_of(records: &[String]) -> Result<ProjectCatalog, CatalogError> {
        ProjectCatalog::from_json(&format!("[{}]", records.join(",")))
    }

    #[test]
    fn bundled_catalog_has_unique_non_empty_slugs() {
        let catalog = ProjectCatalog::bundled().expect("bundled table parses");
        assert_eq!(catalog.len(), 9);

        let mut seen = HashSet::new();
        for slug in catalog.records().iter().map(|record| record.slug.as_str()) {
            assert!(!slug.is_empty());
            assert!(seen.insert(slug), "duplicate slug {slug}");
        }
    }

    #[test]
    fn find_returns_exact_record() {
        let catalog = ProjectCatalog::bundled().expect("bundled table parses");
        let record = catalog.find("hydrosmart").expect("known slug");

        assert_eq!(record.slug, "hydrosmart");
        assert_eq!(record.title, "HydroSmart Platform");
        assert_eq!(record.platform, Some(Platform::Web));
    }

    #[test]
    fn find_unknown_slug_is_not_found() {
        let catalog = ProjectCatalog::bundled().expect("bundled table parses");

        let error = catalog.find("does-not-exist").expect_err("unknown slug");
        assert!(matches!(error, CatalogError::NotFound(ref slug) if slug == "does-not-exist"));
        assert!(catalog.find("HydroSmart").is_err());
        assert!(catalog.find("").is_err());
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let result = catalog_of(&[record_json("same", true, ""), record_json("same", true, "")]);
        assert!(matches!(result, Err(CatalogError::DuplicateSlug(ref slug)) if slug == "same"));
    }

    #[test]
    fn empty_slugs_are_rejected() {
        let result = catalog_of(&[record_json("ok", true, ""), record_json("  ", true, "")]);
        assert!(matches!(result, Err(CatalogError::EmptySlug { index: 1 })));
    }

    #[test]
    fn malformed_table_is_reported() {
        assert!(matches!(
            ProjectCatalog::from_json("{ not json"),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            ProjectCatalog::from_json(r#"[{"slug": "x"}]"#),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn video_classification_covers_every_branch() {
        assert_eq!(classify_video(Some("https://youtu.be/x")), Some(VideoSource::YouTube));
        assert_eq!(
            classify_video(Some("https://www.youtube.com/watch?v=abc")),
            Some(VideoSource::YouTube)
        );
        assert_eq!(classify_video(Some("https://drive.google.com/x")), Some(VideoSource::Drive));
        assert_eq!(classify_video(Some("/videos/a.mp4")), Some(VideoSource::Local));
        assert_eq!(classify_video(Some("https://example.com/a.mp4")), Some(VideoSource::External));
        assert_eq!(classify_video(None), None);
        assert_eq!(classify_video(Some("")), None);
        assert_eq!(classify_video(Some("   ")), None);
    }

    #[test]
    fn video_classification_is_idempotent() {
        for value in ["https://youtu.be/x", "/videos/a.mp4", "https://example.com/a.mp4"] {
            assert_eq!(classify_video(Some(value)), classify_video(Some(value)));
        }
    }

    #[test]
    fn embed_urls_target_hosted_players() {
        assert_eq!(
            embed_url(VideoSource::YouTube, "https://youtu.be/Z7RJOZfvDFQ?t=3"),
            "https://www.youtube.com/embed/Z7RJOZfvDFQ"
        );
        assert_eq!(
            embed_url(VideoSource::YouTube, "https://www.youtube.com/watch?v=abc&list=1"),
            "https://www.youtube.com/embed/abc"
        );
        assert_eq!(
            embed_url(
                VideoSource::Drive,
                "https://drive.google.com/file/d/16Ite/view?usp=drive_link"
            ),
            "https://drive.google.com/file/d/16Ite/preview"
        );
        assert_eq!(embed_url(VideoSource::Local, "/videos/a.mp4"), "/videos/a.mp4");
    }

    #[test]
    fn architecture_splits_into_trimmed_stages() {
        assert_eq!(split_architecture("A → B → C"), vec!["A", "B", "C"]);
        assert_eq!(split_architecture("→ A → B →"), vec!["A", "B"]);
        assert_eq!(split_architecture("A →→ B"), vec!["A", "B"]);
        assert_eq!(split_architecture("A -> B → C"), vec!["A", "B", "C"]);
        assert!(split_architecture("").is_empty());
    }

    #[test]
    fn bundled_architectures_have_no_empty_stages() {
        let catalog = ProjectCatalog::bundled().expect("bundled table parses");
        for record in catalog.records() {
            let stages = record.architecture_stages();
            assert!(!stages.is_empty(), "{} has no stages", record.slug);
            assert!(stages.iter().all(|stage| !stage.is_empty()));
        }
    }

    #[test]
    fn confidential_record_never_exposes_live_url_or_usage() {
        let catalog = catalog_of(&[record_json(
            "secret",
            false,
            r#", "liveUrl": "https://internal.example", "usage": ["step"]"#,
        )]);
        let catalog = catalog.expect("valid record");
        let record = catalog.find("secret").expect("known slug");

        assert!(!record.is_public);
        assert_eq!(record.access(), Access::Confidential);
        assert_eq!(record.case_study().access, Access::Confidential);
    }

    #[test]
    fn public_record_exposes_live_url_and_usage() {
        let catalog = ProjectCatalog::bundled().expect("bundled table parses");
        let record = catalog.find("carein").expect("known slug");

        match record.access() {
            Access::Public { live_url, usage } => {
                assert_eq!(live_url, Some("https://frontend-ehealth-ten.vercel.app"));
                assert_eq!(usage.len(), 4);
            }
            Access::Confidential => panic!("carein is public"),
        }
    }

    #[test]
    fn case_study_collects_sections_links_and_media() {
        let catalog = ProjectCatalog::bundled().expect("bundled table parses");
        let study = catalog.find("hydrosmart").expect("known slug").case_study();

        let titles: Vec<_> = study.sections.iter().map(|section| section.title).collect();
        assert_eq!(
            titles,
            vec!["Context & Story", "Technical Challenge", "Architecture Approach", "Outcome & Impact"]
        );
        assert_eq!(
            study.sections[2].body,
            CaseBody::Flow(vec!["React Frontend", "Hapi API", "Database", "ML Engine"])
        );

        let labels: Vec<_> = study.repositories.iter().map(|link| link.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Frontend", "Backend", "Machine Learning 1", "Machine Learning 2"]
        );
        assert_eq!(study.frame, MediaFrame::Browser);
        assert_eq!(
            study.video,
            Some(CaseVideo {
                source: VideoSource::Local,
                url: "/videos/hydrosmart-demo.mov".to_string(),
            })
        );
    }

    #[test]
    fn media_frame_follows_platform() {
        assert_eq!(MediaFrame::for_platform(Some(Platform::Mobile)), MediaFrame::Phone);
        assert_eq!(MediaFrame::for_platform(Some(Platform::Api)), MediaFrame::Terminal);
        assert_eq!(MediaFrame::for_platform(None), MediaFrame::Plain);
    }
}
