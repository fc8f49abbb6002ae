const PROJECTS_PREFIX: &str = "/projects/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Project(String),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        match path {
            "" | "/" | "/index.html" => Self::Home,
            _ => path
                .strip_prefix(PROJECTS_PREFIX)
                .map(|rest| rest.strip_suffix('/').unwrap_or(rest))
                .filter(|slug| !slug.is_empty() && !slug.contains('/'))
                .map(|slug| Self::Project(slug.to_string()))
                .unwrap_or(Self::NotFound),
        }
    }

    pub fn href(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Project(slug) => format!("{PROJECTS_PREFIX}{slug}"),
            Self::NotFound => "/404".to_string(),
        }
    }

    pub fn section_href(id: &str) -> String {
        format!("/#{id}")
    }
}
