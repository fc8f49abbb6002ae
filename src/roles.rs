use crate::lifecycle::{Mount, Ticker};
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_ROLES: [&str; 3] = ["Full-Stack Engineer", "Backend Specialist", "Cloud Architect"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleCycler {
    roles: Vec<String>,
    index: usize,
}

impl RoleCycler {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.roles.get(self.index).map(String::as_str)
    }

    pub fn advance(&mut self) -> usize {
        if !self.roles.is_empty() {
            self.index = (self.index + 1) % self.roles.len();
        }
        self.index
    }

    // Lists with fewer than two entries never change and get no timer.
    pub fn attach(
        self,
        ticker: &dyn Ticker,
        period_ms: u32,
        mut on_change: impl FnMut(usize, &str) + 'static,
    ) -> Mount {
        let mut mount = Mount::new();
        if self.roles.len() < 2 {
            return mount;
        }

        let cycler = Rc::new(RefCell::new(self));
        mount.hold(ticker.every(
            period_ms,
            Box::new(move || {
                let mut cycler = cycler.borrow_mut();
                let index = cycler.advance();
                if let Some(role) = cycler.current() {
                    on_change(index, role);
                }
            }),
        ));
        mount
    }
}

impl Default for RoleCycler {
    fn default() -> Self {
        Self::new(DEFAULT_ROLES)
    }
}
