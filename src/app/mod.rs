//! Application module
//!
//! Owns the scheduler and the mounted form, and runs the terminal event loop:
//! draw, wait for input no longer than the next timer deadline, dispatch the key,
//! then fire whatever timers came due.

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::Result;
use crate::reactive::Scheduler;
use crate::ui::{FormAction, FormView};
use crate::validation::{ValidationEngine, ValidationRules};

/// Longest the loop blocks on input when no timer is pending
const IDLE_TICK: Duration = Duration::from_millis(250);

/// Main application struct
pub struct App {
    scheduler: Scheduler,
    view: FormView,
}

impl App {
    /// Create a new application on the wall clock
    pub fn new(rules: ValidationRules) -> Self {
        Self::with_scheduler(Scheduler::system(), rules)
    }

    pub fn with_scheduler(scheduler: Scheduler, rules: ValidationRules) -> Self {
        info!(?rules, "creating signup form");
        let engine = ValidationEngine::new(scheduler.clone(), rules);
        Self {
            scheduler,
            view: FormView::new(engine),
        }
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut FormView {
        &mut self.view
    }

    /// Run until the user quits. The form is unmounted on every exit path.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.view.mount();
        let result = self.event_loop(terminal);
        self.view.unmount();
        result
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.view.render(f))?;

            if event::poll(self.poll_timeout())? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = self.view.handle_key(key);
                        if self.dispatch(action) {
                            break;
                        }
                    }
                }
            }

            let fired = self.scheduler.run_due();
            if fired > 0 {
                debug!(fired, "timers fired");
            }
        }
        info!("signup form closed");
        Ok(())
    }

    /// Returns true when the loop should stop
    fn dispatch(&self, action: FormAction) -> bool {
        match action {
            FormAction::Continue => false,
            FormAction::Submit => {
                debug!("submit handled by form view");
                false
            }
            FormAction::Quit => true,
        }
    }

    /// How long to wait for input before timers need servicing
    fn poll_timeout(&self) -> Duration {
        match self.scheduler.next_deadline() {
            Some(deadline) => deadline
                .saturating_duration_since(self.scheduler.now())
                .min(IDLE_TICK),
            None => IDLE_TICK,
        }
    }
}
