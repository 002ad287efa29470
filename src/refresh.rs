/// User-triggered refresh of the classification data
///
/// States: Idle → Busy → Reporting(outcome) → CoolingDown → Idle
///
/// The button stays disabled from Busy until the cooldown timer fires. That
/// window is the only thing keeping two refreshes from overlapping.
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::host::HostPage;
use crate::loader::{DataLoader, LoadReason};
use crate::painter::Painter;
use crate::store::SharedStore;
use crate::watcher::MutationWatcher;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RefreshSettings {
    pub idle_label: String,
    /// Cycled on the button while a refresh is in flight
    pub busy_frames: Vec<String>,
    pub frame_interval_ms: u32,
    pub success_label: String,
    pub failure_label: String,
    /// How long the outcome label stays up
    pub status_ms: u32,
    /// How long until the button can be used again
    pub cooldown_ms: u32,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        RefreshSettings {
            idle_label: "Update data".to_string(),
            busy_frames: vec!["Updating..".to_string(), "Updating...".to_string()],
            frame_interval_ms: 300,
            success_label: "Data updated successfully ✅".to_string(),
            failure_label: "Failed to update data ❌".to_string(),
            status_ms: 5 * 1000,
            cooldown_ms: 120 * 1000,
        }
    }
}

/// The control that triggers a refresh
pub trait RefreshButton {
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
}

/// Interval and one-shot timers of the host event loop
pub trait Timers {
    type Interval;

    fn every(&self, ms: u32, callback: Box<dyn FnMut()>) -> Result<Self::Interval>;

    fn cancel(&self, interval: Self::Interval);

    fn once(&self, ms: u32, callback: Box<dyn FnOnce()>) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Updated,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Busy,
    Reporting(Outcome),
    CoolingDown,
}

struct Machine<B> {
    state: RefreshState,
    /// Bumped on every accepted trigger; timers armed by an older run are ignored
    generation: u64,
    frame: usize,
    button: B,
    settings: RefreshSettings,
}

impl<B: RefreshButton> Machine<B> {
    fn begin(&mut self) -> bool {
        if self.state != RefreshState::Idle {
            return false;
        }
        self.state = RefreshState::Busy;
        self.generation += 1;
        self.frame = 0;
        self.button.set_disabled(true);
        true
    }

    fn tick(&mut self) {
        if self.state != RefreshState::Busy || self.settings.busy_frames.is_empty() {
            return;
        }
        let frame = self.frame % self.settings.busy_frames.len();
        self.button.set_label(&self.settings.busy_frames[frame]);
        self.frame = (frame + 1) % self.settings.busy_frames.len();
    }

    fn settle(&mut self, outcome: Outcome) {
        self.state = RefreshState::Reporting(outcome);
        let label = match outcome {
            Outcome::Updated => &self.settings.success_label,
            Outcome::Failed => &self.settings.failure_label,
        };
        self.button.set_label(label);
    }

    fn status_elapsed(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.button.set_label(&self.settings.idle_label);
        if let RefreshState::Reporting(_) = self.state {
            self.state = RefreshState::CoolingDown;
        }
    }

    fn cooldown_elapsed(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.button.set_disabled(false);
        self.state = RefreshState::Idle;
    }
}

pub struct RefreshController<B, T> {
    machine: Rc<RefCell<Machine<B>>>,
    timers: T,
    store: SharedStore,
}

impl<B, T> RefreshController<B, T>
where
    B: RefreshButton + 'static,
    T: Timers,
{
    pub fn new(store: SharedStore, button: B, timers: T, settings: RefreshSettings) -> Self {
        button.set_label(&settings.idle_label);
        button.set_disabled(false);

        RefreshController {
            machine: Rc::new(RefCell::new(Machine {
                state: RefreshState::Idle,
                generation: 0,
                frame: 0,
                button,
                settings,
            })),
            timers,
            store,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.machine.borrow().state
    }

    /// Run one refresh. Returns `None` if one is already in progress or cooling down.
    pub async fn run<L, H, P>(&self, loader: &L, watcher: &MutationWatcher<H, P>) -> Option<Outcome>
    where
        L: DataLoader,
        H: HostPage,
        P: Painter<H::Node>,
    {
        if !self.machine.borrow_mut().begin() {
            debug!("Refresh trigger ignored in state {:?}", self.state());
            return None;
        }

        let animation = self.start_animation();
        let result = self.reload(loader, watcher).await;
        if let Some(interval) = animation {
            self.timers.cancel(interval);
        }

        let outcome = match result {
            Ok(repainted) => {
                info!("Classification data updated, {} elements repainted", repainted);
                Outcome::Updated
            }
            Err(e) => {
                error!("Update failed: {}", e);
                Outcome::Failed
            }
        };
        self.report(outcome);
        Some(outcome)
    }

    async fn reload<L, H, P>(&self, loader: &L, watcher: &MutationWatcher<H, P>) -> Result<usize>
    where
        L: DataLoader,
        H: HostPage,
        P: Painter<H::Node>,
    {
        let data = loader.load_classification_data(LoadReason::Update).await?;

        // Single synchronous swap; no mutation callback can run in between.
        self.store
            .borrow_mut()
            .replace(data.proven.as_slice(), data.disproven.as_slice());
        info!(
            "Loaded {} proven and {} disproven elements",
            data.proven.len(),
            data.disproven.len()
        );

        watcher.repaint_all()
    }

    fn start_animation(&self) -> Option<T::Interval> {
        let interval_ms = self.machine.borrow().settings.frame_interval_ms;
        let machine = Rc::clone(&self.machine);

        match self.timers.every(interval_ms, Box::new(move || machine.borrow_mut().tick())) {
            Ok(interval) => Some(interval),
            Err(e) => {
                warn!("Could not start busy animation: {}", e);
                None
            }
        }
    }

    /// Show the outcome, then arm the two independent one-shot timers
    fn report(&self, outcome: Outcome) {
        let (generation, status_ms, cooldown_ms) = {
            let mut machine = self.machine.borrow_mut();
            machine.settle(outcome);
            (machine.generation, machine.settings.status_ms, machine.settings.cooldown_ms)
        };

        let machine = Rc::clone(&self.machine);
        if let Err(e) = self.timers.once(status_ms, Box::new(move || machine.borrow_mut().status_elapsed(generation))) {
            warn!("Could not schedule label reset: {}", e);
            self.machine.borrow_mut().status_elapsed(generation);
        }

        let machine = Rc::clone(&self.machine);
        if let Err(e) = self.timers.once(cooldown_ms, Box::new(move || machine.borrow_mut().cooldown_elapsed(generation))) {
            warn!("Could not schedule re-enable: {}", e);
            self.machine.borrow_mut().cooldown_elapsed(generation);
        }
    }
}
