//! Session task - serialises operator requests and countdown ticks
//!
//! The controller is moved into a single task. That task waits on either
//! the next tick of a fixed interval or the next request from a
//! [`SessionHandle`], and handles exactly one of them at a time, so a tick
//! and an operator edit can never interleave. Stopping the countdown only
//! flips its running flag; the interval keeps firing and those ticks
//! evaluate to nothing.

use std::time::Duration;

use bank_core::{Amount, BankError, BankResult, Group, InflationRate};
use bank_time::Tick;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{LedgerSnapshot, SessionController, SessionStatus};

type Reply<T> = oneshot::Sender<BankResult<T>>;

/// Requests accepted by the session task
#[derive(Debug)]
enum Request {
    AddGroup(String, Reply<Group>),
    Deposit(String, Amount, Reply<Group>),
    Withdraw(String, Amount, Reply<Group>),
    StartTimer(Option<String>, Option<InflationRate>, Reply<Tick>),
    StopTimer(Reply<()>),
    EndTimer(Reply<()>),
    Save(Reply<()>),
    Snapshot(Reply<LedgerSnapshot>),
    Status(Reply<SessionStatus>),
    Shutdown,
}

/// Cloneable handle to a running session
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::Sender<Request>,
}

impl SessionHandle {
    pub async fn add_group(&self, name: impl Into<String>) -> BankResult<Group> {
        let name = name.into();
        self.request(|reply| Request::AddGroup(name, reply)).await
    }

    pub async fn deposit(&self, name: impl Into<String>, amount: Amount) -> BankResult<Group> {
        let name = name.into();
        self.request(|reply| Request::Deposit(name, amount, reply)).await
    }

    pub async fn withdraw(&self, name: impl Into<String>, amount: Amount) -> BankResult<Group> {
        let name = name.into();
        self.request(|reply| Request::Withdraw(name, amount, reply)).await
    }

    /// Start the countdown; see [`SessionController::start_inflation_timer`]
    pub async fn start_timer(
        &self,
        duration: Option<String>,
        rate: Option<InflationRate>,
    ) -> BankResult<Tick> {
        self.request(|reply| Request::StartTimer(duration, rate, reply)).await
    }

    pub async fn stop_timer(&self) -> BankResult<()> {
        self.request(Request::StopTimer).await
    }

    pub async fn end_timer(&self) -> BankResult<()> {
        self.request(Request::EndTimer).await
    }

    pub async fn save(&self) -> BankResult<()> {
        self.request(Request::Save).await
    }

    pub async fn snapshot(&self) -> BankResult<LedgerSnapshot> {
        self.request(Request::Snapshot).await
    }

    pub async fn status(&self) -> BankResult<SessionStatus> {
        self.request(Request::Status).await
    }

    /// Ask the session task to finish; pending requests ahead of this one
    /// are still served
    pub async fn shutdown(&self) {
        // Already gone is as good as shut down
        let _ = self.tx.send(Request::Shutdown).await;
    }

    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Request) -> BankResult<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| BankError::SessionClosed)?;
        response.await.map_err(|_| BankError::SessionClosed)?
    }
}

/// Move the controller into its own task
///
/// The task ends on [`SessionHandle::shutdown`] or once every handle is
/// dropped, and yields the controller back.
pub fn spawn_session(
    controller: SessionController,
    tick_interval: Duration,
    buffer: usize,
) -> (SessionHandle, JoinHandle<SessionController>) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    let task = tokio::spawn(run_session(controller, rx, tick_interval));
    (SessionHandle { tx }, task)
}

async fn run_session(
    mut controller: SessionController,
    mut rx: mpsc::Receiver<Request>,
    tick_interval: Duration,
) -> SessionController {
    let mut ticker = time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;
    info!(?tick_interval, "session started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                controller.tick();
            }
            request = rx.recv() => {
                let Some(request) = request else {
                    debug!("all session handles dropped");
                    break;
                };
                match handle(&mut controller, request) {
                    Flow::Continue => {}
                    Flow::Rephase => ticker.reset(),
                    Flow::Shutdown => break,
                }
            }
        }
    }

    info!("session finished");
    controller
}

enum Flow {
    Continue,
    /// The countdown just started; the next tick is one full interval away
    Rephase,
    Shutdown,
}

fn handle(controller: &mut SessionController, request: Request) -> Flow {
    match request {
        Request::AddGroup(name, reply) => respond(reply, controller.add_group(&name)),
        Request::Deposit(name, amount, reply) => {
            respond(reply, controller.deposit(&name, amount))
        }
        Request::Withdraw(name, amount, reply) => {
            respond(reply, controller.withdraw(&name, amount))
        }
        Request::StartTimer(duration, rate, reply) => {
            let result = controller.start_inflation_timer(duration.as_deref(), rate);
            let started = matches!(result, Ok(tick) if tick != Tick::Inactive);
            respond(reply, result);
            if started {
                return Flow::Rephase;
            }
        }
        Request::StopTimer(reply) => {
            controller.stop_inflation_timer();
            respond(reply, Ok(()));
        }
        Request::EndTimer(reply) => {
            controller.end_inflation_timer();
            respond(reply, Ok(()));
        }
        Request::Save(reply) => respond(reply, controller.save()),
        Request::Snapshot(reply) => respond(reply, Ok(controller.snapshot())),
        Request::Status(reply) => respond(reply, Ok(controller.status())),
        Request::Shutdown => return Flow::Shutdown,
    }
    Flow::Continue
}

fn respond<T>(reply: Reply<T>, result: BankResult<T>) {
    if let Err(e) = &result {
        warn!(kind = e.kind(), error = %e, "request rejected");
    }
    if reply.send(result).is_err() {
        debug!("requester went away before the reply");
    }
}
