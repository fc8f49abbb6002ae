#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillGroup {
    Frontend,
    Backend,
    Data,
    Infra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub group: SkillGroup,
    pub links: &'static [&'static str],
}

pub const SKILLS: [Skill; 12] = [
    Skill { name: "React", group: SkillGroup::Frontend, links: &["Next.js"] },
    Skill { name: "Next.js", group: SkillGroup::Frontend, links: &["React"] },
    Skill { name: "Tailwind", group: SkillGroup::Frontend, links: &[] },
    Skill { name: "TypeScript", group: SkillGroup::Frontend, links: &["Node.js"] },
    Skill { name: "Node.js", group: SkillGroup::Backend, links: &["Express"] },
    Skill { name: "Express", group: SkillGroup::Backend, links: &["Node.js"] },
    Skill { name: "MySQL", group: SkillGroup::Data, links: &[] },
    Skill { name: "MongoDB", group: SkillGroup::Data, links: &[] },
    Skill { name: "MariaDB", group: SkillGroup::Data, links: &[] },
    Skill { name: "Docker", group: SkillGroup::Infra, links: &["Linux"] },
    Skill { name: "GCP", group: SkillGroup::Infra, links: &["Docker"] },
    Skill { name: "Linux", group: SkillGroup::Infra, links: &["Docker"] },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SkillFilter {
    #[default]
    All,
    Only(SkillGroup),
}

impl SkillFilter {
    pub const ALL: [SkillFilter; 5] = [
        SkillFilter::All,
        SkillFilter::Only(SkillGroup::Frontend),
        SkillFilter::Only(SkillGroup::Backend),
        SkillFilter::Only(SkillGroup::Data),
        SkillFilter::Only(SkillGroup::Infra),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(SkillGroup::Frontend) => "Frontend",
            Self::Only(SkillGroup::Backend) => "Backend",
            Self::Only(SkillGroup::Data) => "Data",
            Self::Only(SkillGroup::Infra) => "Infrastructure",
        }
    }

    pub fn admits(self, skill: &Skill) -> bool {
        match self {
            Self::All => true,
            Self::Only(group) => skill.group == group,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Highlight {
    None,
    Related,
    Active,
}

impl Highlight {
    pub fn class(self) -> &'static str {
        match self {
            Self::None => "skill",
            Self::Related => "skill skill-related",
            Self::Active => "skill skill-active",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillMap {
    skills: &'static [Skill],
    filter: SkillFilter,
    hovered: Option<&'static str>,
}

impl SkillMap {
    pub fn new(skills: &'static [Skill]) -> Self {
        Self {
            skills,
            filter: SkillFilter::All,
            hovered: None,
        }
    }

    pub fn filter(&self) -> SkillFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: SkillFilter) {
        self.filter = filter;
    }

    pub fn hover(&mut self, name: Option<&str>) {
        self.hovered = name.and_then(|name| {
            self.skills
                .iter()
                .find(|skill| skill.name == name)
                .map(|skill| skill.name)
        });
    }

    pub fn visible(&self) -> impl Iterator<Item = &Skill> + '_ {
        let filter = self.filter;
        self.skills.iter().filter(move |skill| filter.admits(skill))
    }

    // Directional: React relates Next.js, not the reverse.
    pub fn highlight(&self, name: &str) -> Highlight {
        let Some(hovered) = self.hovered else {
            return Highlight::None;
        };
        if hovered == name {
            return Highlight::Active;
        }

        let related = self
            .skills
            .iter()
            .find(|skill| skill.name == hovered)
            .is_some_and(|skill| skill.links.contains(&name));
        if related {
            Highlight::Related
        } else {
            Highlight::None
        }
    }
}

impl Default for SkillMap {
    fn default() -> Self {
        Self::new(&SKILLS)
    }
}
