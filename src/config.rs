use crate::motion::{interpolate, SpringConfig};
use crate::nav::NavConfig;
use crate::sections::TieBreak;
use crate::pointer::GlowStyle;
use crate::telemetry::LogLevel;
use crate::viewport::TrackSpan;

const DEFAULT_ROLE_INTERVAL_MS: u32 = 3_200;
const DEFAULT_COPY_REVERT_MS: u32 = 2_000;
const DEFAULT_COUNTER_DURATION_MS: u32 = 1_300;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const GLOW_COLOR: &str = "rgba(59,130,246,0.08)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollEffect {
    pub span: TrackSpan,
    pub scale_to: f64,
    pub opacity_to: f64,
}

impl ScrollEffect {
    pub fn scale(&self, progress: f64) -> f64 {
        interpolate(progress, (0.0, 1.0), (1.0, self.scale_to))
    }

    pub fn opacity(&self, progress: f64) -> f64 {
        interpolate(progress, (0.0, 1.0), (1.0, self.opacity_to))
    }

    pub fn style(&self, progress: f64) -> String {
        format!(
            "transform: scale({:.4}); opacity: {:.4};",
            self.scale(progress),
            self.opacity(progress)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionMotion {
    pub glow_spring: SpringConfig,
    pub glow: GlowStyle,
    pub scroll: Option<ScrollEffect>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroMotion {
    pub section: SectionMotion,
    pub tilt_degrees: f64,
    pub tilt_extent_px: f64,
    pub magnetic_strength: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteConfig {
    pub nav: NavConfig,
    pub role_interval_ms: u32,
    pub copy_revert_ms: u32,
    pub counter_duration_ms: u32,
    pub show_system_layers: bool,
    pub hero: HeroMotion,
    pub about: SectionMotion,
    pub skills: SectionMotion,
    pub projects: SectionMotion,
    pub project_tilt_degrees: f64,
    pub contact: SectionMotion,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            role_interval_ms: DEFAULT_ROLE_INTERVAL_MS,
            copy_revert_ms: DEFAULT_COPY_REVERT_MS,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            show_system_layers: false,
            hero: HeroMotion {
                section: SectionMotion {
                    glow_spring: SpringConfig::critical(60.0),
                    glow: GlowStyle {
                        radius_px: 700,
                        color: "rgba(59,130,246,0.15)",
                        fade_percent: 70,
                    },
                    scroll: Some(ScrollEffect {
                        span: TrackSpan::Leaving,
                        scale_to: 0.94,
                        opacity_to: 0.6,
                    }),
                },
                tilt_degrees: 7.0,
                tilt_extent_px: 200.0,
                magnetic_strength: 0.25,
            },
            about: SectionMotion {
                glow_spring: SpringConfig::critical(80.0),
                glow: glow(600),
                scroll: Some(ScrollEffect {
                    span: TrackSpan::Crossing,
                    scale_to: 0.97,
                    opacity_to: 1.0,
                }),
            },
            skills: SectionMotion {
                glow_spring: SpringConfig::critical(80.0),
                glow: glow(900),
                scroll: None,
            },
            projects: SectionMotion {
                glow_spring: SpringConfig::critical(70.0),
                glow: GlowStyle {
                    color: "rgba(59,130,246,0.07)",
                    ..glow(900)
                },
                scroll: Some(ScrollEffect {
                    span: TrackSpan::Crossing,
                    scale_to: 0.97,
                    opacity_to: 1.0,
                }),
            },
            project_tilt_degrees: 10.0,
            contact: SectionMotion {
                glow_spring: SpringConfig::critical(80.0),
                glow: glow(700),
                scroll: None,
            },
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    // Reads `log-level`, `section-tie-break` and `system-layers`; values that
    // do not parse leave the default in place.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup("log-level").and_then(|value| LogLevel::parse(&value)) {
            self.log_level = level;
        }
        if let Some(tie_break) = lookup("section-tie-break").and_then(|value| TieBreak::parse(&value)) {
            self.nav.tie_break = tie_break;
        }
        if let Some(show) = lookup("system-layers").and_then(|value| value.trim().parse::<bool>().ok()) {
            self.show_system_layers = show;
        }
        self
    }
}

fn glow(radius_px: u32) -> GlowStyle {
    GlowStyle {
        radius_px,
        color: GLOW_COLOR,
        fade_percent: 60,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use server_env::ServerConfig;

#[cfg(not(target_arch = "wasm32"))]
mod server_env {
    use crate::telemetry::LogLevel;
    use std::path::PathBuf;

    const DEFAULT_PORT: u64 = 8080;
    const PORT_BOUNDS: (u64, u64) = (1, 65_535);
    const DEFAULT_DIST_DIR: &str = "dist";

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct ServerConfig {
        pub port: u16,
        pub dist_dir: PathBuf,
        pub log_level: LogLevel,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                port: DEFAULT_PORT as u16,
                dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
                log_level: super::DEFAULT_LOG_LEVEL,
            }
        }
    }

    impl ServerConfig {
        pub fn from_env() -> Self {
            Self::from_lookup(|name| std::env::var(name).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
            let port = parse_u64_with_bounds(lookup("PORT"), DEFAULT_PORT, PORT_BOUNDS);
            let dist_dir = parse_non_empty_string(lookup("DIST_DIR"))
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
            let log_level = parse_non_empty_string(lookup("LOG_LEVEL"))
                .and_then(|value| LogLevel::parse(&value))
                .unwrap_or(super::DEFAULT_LOG_LEVEL);

            Self {
                port: u16::try_from(port).unwrap_or(DEFAULT_PORT as u16),
                dist_dir,
                log_level,
            }
        }

        pub fn index_path(&self) -> PathBuf {
            self.dist_dir.join("index.html")
        }
    }

    fn parse_u64_with_bounds(value: Option<String>, default: u64, bounds: (u64, u64)) -> u64 {
        value
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|value| (bounds.0..=bounds.1).contains(value))
            .unwrap_or(default)
    }

    fn parse_non_empty_string(value: Option<String>) -> Option<String> {
        value
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.role_interval_ms, 3_200);
        assert_eq!(config.copy_revert_ms, 2_000);
        assert_eq!(config.nav.nav_offset, 70.0);
        assert_eq!(config.nav.scrolled_threshold, 40.0);
        assert_eq!(config.hero.section.glow_spring, SpringConfig::critical(60.0));
        assert_eq!(config.projects.glow_spring, SpringConfig::critical(70.0));
        assert!(!config.show_system_layers);
    }

    #[test]
    fn mount_attributes_override_defaults() {
        let config = SiteConfig::default().with_overrides(|name| match name {
            "log-level" => Some("debug".to_string()),
            "section-tie-break" => Some(" Last-Reported ".to_string()),
            "system-layers" => Some("true".to_string()),
            _ => None,
        });

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.nav.tie_break, TieBreak::LastReported);
        assert!(config.show_system_layers);
    }

    #[test]
    fn unparsable_mount_attributes_keep_defaults() {
        let config = SiteConfig::default().with_overrides(|name| match name {
            "log-level" => Some("loud".to_string()),
            "section-tie-break" => Some("random".to_string()),
            "system-layers" => Some("yes".to_string()),
            _ => None,
        });

        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn hero_scroll_effect_shrinks_and_fades() {
        let effect = SiteConfig::default().hero.section.scroll.expect("hero has a scroll effect");

        assert_eq!(effect.scale(0.0), 1.0);
        assert!((effect.scale(1.0) - 0.94).abs() < 1e-9);
        assert!((effect.opacity(0.5) - 0.8).abs() < 1e-9);
        assert_eq!(effect.style(2.0), "transform: scale(0.9400); opacity: 0.6000;");
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod server {
        use super::super::ServerConfig;
        use crate::telemetry::LogLevel;
        use std::collections::HashMap;
        use std::path::PathBuf;

        fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
            let env: HashMap<String, String> = pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            ServerConfig::from_lookup(|name| env.get(name).cloned())
        }

        #[test]
        fn empty_environment_yields_defaults() {
            assert_eq!(config_from(&[]), ServerConfig::default());
        }

        #[test]
        fn valid_values_are_used() {
            let config = config_from(&[("PORT", " 3000 "), ("DIST_DIR", "public"), ("LOG_LEVEL", "DEBUG")]);

            assert_eq!(config.port, 3_000);
            assert_eq!(config.dist_dir, PathBuf::from("public"));
            assert_eq!(config.index_path(), PathBuf::from("public/index.html"));
            assert_eq!(config.log_level, LogLevel::Debug);
        }

        #[test]
        fn invalid_values_fall_back_to_defaults() {
            let config = config_from(&[("PORT", "70000"), ("DIST_DIR", "  "), ("LOG_LEVEL", "loud")]);
            assert_eq!(config, ServerConfig::default());

            assert_eq!(config_from(&[("PORT", "0")]).port, 8080);
            assert_eq!(config_from(&[("PORT", "abc")]).port, 8080);
        }
    }
}
