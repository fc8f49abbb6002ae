use std::cell::RefCell;
use std::rc::Rc;

pub struct Disposer {
    release: Option<Box<dyn FnOnce()>>,
}

impl Disposer {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn dispose(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.release_now();
    }
}

#[derive(Default)]
pub struct Mount {
    disposers: Vec<Disposer>,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&mut self, disposer: Disposer) {
        self.disposers.push(disposer);
    }

    // Most recent registration first.
    pub fn detach(mut self) {
        self.release_all();
    }

    pub fn into_disposer(self) -> Disposer {
        Disposer::new(move || self.detach())
    }

    fn release_all(&mut self) {
        while let Some(disposer) = self.disposers.pop() {
            disposer.dispose();
        }
    }
}

impl Drop for Mount {
    fn drop(&mut self) {
        self.release_all();
    }
}

pub trait Ticker {
    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Disposer;
    fn after(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Disposer;
}

// A tick returning false stops the loop. Stops always go through a timeout so
// the interval is never dropped from inside its own callback.
pub struct FrameLoop {
    ticker: Rc<dyn Ticker>,
    period_ms: u32,
    running: Option<Disposer>,
    wind_down: Option<Disposer>,
}

impl FrameLoop {
    pub fn new(ticker: Rc<dyn Ticker>, period_ms: u32) -> Self {
        Self {
            ticker,
            period_ms,
            running: None,
            wind_down: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn ensure_running(frames: &Rc<RefCell<Self>>, mut tick: impl FnMut() -> bool + 'static) {
        let weak = Rc::downgrade(frames);
        let mut this = frames.borrow_mut();
        this.wind_down = None;
        if this.running.is_some() {
            return;
        }

        let timer = this.ticker.every(
            this.period_ms,
            Box::new(move || {
                if tick() {
                    return;
                }
                if let Some(frames) = weak.upgrade() {
                    if frames.borrow().wind_down.is_none() {
                        FrameLoop::stop_after(&frames, 0);
                    }
                }
            }),
        );
        this.running = Some(timer);
    }

    pub fn stop_after(frames: &Rc<RefCell<Self>>, delay_ms: u32) {
        let weak = Rc::downgrade(frames);
        let ticker = Rc::clone(&frames.borrow().ticker);
        let timer = ticker.after(
            delay_ms,
            Box::new(move || {
                if let Some(frames) = weak.upgrade() {
                    let running = frames.borrow_mut().running.take();
                    drop(running);
                }
            }),
        );
        frames.borrow_mut().wind_down = Some(timer);
    }

    pub fn stop(&mut self) {
        self.running = None;
        self.wind_down = None;
    }
}
