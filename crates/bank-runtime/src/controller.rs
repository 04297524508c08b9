//! Session controller - the only owner of the ledger and the countdown

use bank_core::{Amount, BankResult, Countdown, Group, GroupName, InflationRate};
use bank_ledger::Ledger;
use bank_store::LedgerStore;
use bank_time::{CountdownTimer, Tick, TimerDisplay, TimerState};
use tracing::{debug, info, warn};

use crate::{LedgerSnapshot, Presenter, SessionConfig};

/// Point-in-time view of the whole session
#[derive(Clone, Debug, PartialEq)]
pub struct SessionStatus {
    pub timer_state: TimerState,
    pub display: TimerDisplay,
    pub rate: InflationRate,
    pub expiries: u64,
    pub groups: usize,
}

/// Session controller
///
/// Every operation either applies fully or returns an error with ledger and
/// timer untouched. Presenters are notified after each successful mutation.
pub struct SessionController {
    ledger: Ledger,
    timer: CountdownTimer,
    /// Rate applied on every expiry until reconfigured
    rate: InflationRate,
    store: Box<dyn LedgerStore>,
    presenter: Box<dyn Presenter>,
}

impl SessionController {
    /// Create a controller, loading the initial ledger from the store
    pub fn new(
        config: &SessionConfig,
        store: Box<dyn LedgerStore>,
        presenter: Box<dyn Presenter>,
    ) -> BankResult<Self> {
        let ledger = store.load()?;
        info!(groups = ledger.len(), "session ledger loaded");
        Ok(Self::with_ledger(ledger, config, store, presenter))
    }

    /// Create a controller around an existing ledger
    pub fn with_ledger(
        ledger: Ledger,
        config: &SessionConfig,
        store: Box<dyn LedgerStore>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let mut controller = SessionController {
            ledger,
            timer: CountdownTimer::with_config(&config.timer),
            rate: config.default_rate,
            store,
            presenter,
        };
        controller.notify_ledger();
        controller
    }

    /// Configure and start the inflation countdown
    ///
    /// `duration` is `MM:SS`; `None` resumes or restarts with the configured
    /// total. `rate` replaces the current rate only once the start succeeds.
    /// Returns the first evaluation, or [`Tick::Inactive`] if the countdown
    /// was already running.
    pub fn start_inflation_timer(
        &mut self,
        duration: Option<&str>,
        rate: Option<InflationRate>,
    ) -> BankResult<Tick> {
        let total = duration.map(Countdown::parse_nonzero).transpose()?;
        let rate = rate.unwrap_or(self.rate);

        let ledger = &mut self.ledger;
        let tick = self
            .timer
            .start(total, || Self::apply_inflation_now(ledger, rate))?;
        self.rate = rate;
        info!(rate = %rate, total = %self.timer.total(), "inflation timer started");

        self.after_tick(tick);
        Ok(tick)
    }

    /// Pause the countdown
    pub fn stop_inflation_timer(&mut self) {
        self.timer.stop();
        info!(remaining = self.timer.remaining(), "inflation timer stopped");
    }

    /// End the countdown and reset the display
    pub fn end_inflation_timer(&mut self) {
        let display = self.timer.end();
        info!("inflation timer ended");
        self.notify_timer(display);
    }

    /// One tick of the countdown; inflation runs inside it on expiry
    pub fn tick(&mut self) -> Tick {
        let rate = self.rate;
        let ledger = &mut self.ledger;
        let tick = self.timer.tick(|| Self::apply_inflation_now(ledger, rate));
        self.after_tick(tick);
        tick
    }

    pub fn add_group(&mut self, name: &str) -> BankResult<Group> {
        let name = GroupName::new(name)?;
        let group = self.ledger.add_group(name)?.clone();
        self.notify_ledger();
        Ok(group)
    }

    pub fn deposit(&mut self, name: &str, amount: Amount) -> BankResult<Group> {
        let group = self.ledger.deposit(name, amount)?.clone();
        self.notify_ledger();
        Ok(group)
    }

    pub fn withdraw(&mut self, name: &str, amount: Amount) -> BankResult<Group> {
        let group = self.ledger.withdraw(name, amount)?.clone();
        self.notify_ledger();
        Ok(group)
    }

    /// Write the ledger through the persistence collaborator
    pub fn save(&self) -> BankResult<()> {
        self.store.save(&self.ledger)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::of(&self.ledger)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            timer_state: self.timer.state(),
            display: self.timer.display(),
            rate: self.rate,
            expiries: self.timer.expiries(),
            groups: self.ledger.len(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn rate(&self) -> InflationRate {
        self.rate
    }

    /// Expiry callback: inflate every balance at the current rate
    fn apply_inflation_now(ledger: &mut Ledger, rate: InflationRate) {
        ledger.apply_inflation(rate);
        info!(rate = %rate, groups = ledger.len(), "inflation applied");
    }

    fn after_tick(&mut self, tick: Tick) {
        if let Some(display) = tick.display() {
            self.notify_timer(display);
        }
        if tick.expired() {
            if let Err(e) = self.presenter.render_inflation(self.rate) {
                warn!(error = %e, "presenter failed to show inflation");
            }
            self.notify_ledger();
        }
    }

    fn notify_ledger(&mut self) {
        let snapshot = LedgerSnapshot::of(&self.ledger);
        if let Err(e) = self.presenter.render_ledger(&snapshot) {
            warn!(error = %e, "presenter failed to render ledger");
        }
    }

    fn notify_timer(&mut self, display: TimerDisplay) {
        let shown = display.text();
        debug!(remaining = %shown, "timer display");
        if let Err(e) = self.presenter.render_timer(display) {
            warn!(error = %e, "presenter failed to render timer");
        }
    }
}
