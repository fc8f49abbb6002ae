use crate::lifecycle::{Disposer, Mount};

// Margins are viewport-height fractions trimmed from the top and bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivationBand {
    pub top_margin: f64,
    pub bottom_margin: f64,
}

impl Default for ActivationBand {
    fn default() -> Self {
        Self {
            top_margin: 0.45,
            bottom_margin: 0.45,
        }
    }
}

impl ActivationBand {
    pub fn root_margin(&self) -> String {
        format!(
            "-{}% 0px -{}% 0px",
            percent(self.top_margin),
            percent(self.bottom_margin)
        )
    }

    pub fn bounds(&self, viewport_height: f64) -> (f64, f64) {
        let top = viewport_height * self.top_margin;
        let bottom = viewport_height * (1.0 - self.bottom_margin);
        (top, bottom.max(top))
    }

    pub fn center(&self, viewport_height: f64) -> f64 {
        let (top, bottom) = self.bounds(viewport_height);
        (top + bottom) / 2.0
    }
}

fn percent(fraction: f64) -> String {
    let value = (fraction.clamp(0.0, 1.0) * 100.0 * 100.0).round() / 100.0;
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    LastReported,
    // Top edge nearest the band center; ties go to the region listed first.
    #[default]
    ClosestToCenter,
}

impl TieBreak {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "last-reported" => Some(Self::LastReported),
            "closest-to-center" => Some(Self::ClosestToCenter),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
    // Relative to the viewport.
    pub top: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionBatch {
    pub viewport_height: f64,
    pub entries: Vec<IntersectionEntry>,
}

pub trait IntersectionSource {
    fn observe(
        &self,
        ids: &[String],
        band: ActivationBand,
        on_batch: Box<dyn FnMut(IntersectionBatch)>,
    ) -> Disposer;
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionObserver {
    ids: Vec<String>,
    band: ActivationBand,
    tie_break: TieBreak,
    active: Option<String>,
}

impl SectionObserver {
    pub fn new<I, S>(ids: I, band: ActivationBand, tie_break: TieBreak) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            band,
            tie_break,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    // Leaving the band never clears the active id.
    pub fn apply(&mut self, batch: &IntersectionBatch) -> bool {
        let candidates = batch
            .entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .filter_map(|entry| self.position_of(&entry.id).map(|index| (index, entry)));

        let chosen = match self.tie_break {
            TieBreak::LastReported => candidates.last(),
            TieBreak::ClosestToCenter => {
                let center = self.band.center(batch.viewport_height);
                candidates.min_by(|(left_index, left), (right_index, right)| {
                    let left_distance = (left.top - center).abs();
                    let right_distance = (right.top - center).abs();
                    left_distance
                        .total_cmp(&right_distance)
                        .then(left_index.cmp(right_index))
                })
            }
        };

        let Some((_, entry)) = chosen else {
            return false;
        };

        if self.active.as_deref() == Some(entry.id.as_str()) {
            return false;
        }

        self.active = Some(entry.id.clone());
        true
    }

    fn position_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|known| known == id)
    }

    pub fn attach(self, source: &dyn IntersectionSource, mut on_active: impl FnMut(&str) + 'static) -> Mount {
        let ids = self.ids.clone();
        let band = self.band;
        let mut observer = self;

        let mut mount = Mount::new();
        mount.hold(source.observe(
            &ids,
            band,
            Box::new(move |batch| {
                if observer.apply(&batch) {
                    if let Some(active) = observer.active() {
                        on_active(active);
                    }
                }
            }),
        ));
        mount
    }
}
