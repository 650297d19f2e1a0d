/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, warn};
use std::io;
use std::thread::{Builder, JoinHandle};
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::SimulationConfig;
use crate::dispatcher::Dispatcher;
use crate::shared::SystemStatus;

/***************************************/
/*               Enums                 */
/***************************************/
enum Event {
    Tick,
    Submit(Submission),
    Terminate,
}

struct Submission {
    origin: u8,
    dest: u8,
    weight: Option<f64>,
}

/**
 * Drives a `Dispatcher` at a fixed tick interval.
 *
 * The dispatcher is moved onto a dedicated thread for the length of the run,
 * so ticks are strictly serialized. Submissions made through the returned
 * `ClockHandle` are applied between ticks, and a status snapshot is sent
 * after every tick.
 *
 * # Fields
 * - `tick_interval`:   Wall-clock time between two ticks.
 */
pub struct Clock {
    tick_interval: Duration,
}

/**
 * Control side of a running simulation.
 *
 * # Fields
 * - `submit_tx`:       Forwards submissions to the clock thread.
 * - `terminate_tx`:    Asks the clock thread to stop after the current tick.
 * - `thread`:          The clock thread, returns the dispatcher when it ends.
 */
pub struct ClockHandle {
    submit_tx: cbc::Sender<Submission>,
    terminate_tx: cbc::Sender<()>,
    thread: JoinHandle<Dispatcher>,
}

impl Clock {
    pub fn new(config: &SimulationConfig) -> Clock {
        Clock {
            tick_interval: Duration::from_millis(config.tick_interval_ms.max(1)),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Starts ticking `dispatcher`. With `Some(n)` the run ends by itself after
    /// `n` ticks, with `None` it runs until `stop_simulation`.
    pub fn start_simulation(
        &self,
        dispatcher: Dispatcher,
        tick_count: Option<u64>,
    ) -> io::Result<(ClockHandle, cbc::Receiver<SystemStatus>)> {
        let (submit_tx, submit_rx) = cbc::unbounded::<Submission>();
        let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
        let (status_tx, status_rx) = cbc::unbounded::<SystemStatus>();

        let runner = ClockRunner {
            dispatcher,
            tick_count,
            ticker: cbc::tick(self.tick_interval),
            submit_rx,
            terminate_rx,
            status_tx,
        };

        let thread = Builder::new()
            .name("clock".into())
            .spawn(move || runner.run())?;

        info!(
            "Simulation started, interval {:?}, ticks {:?}",
            self.tick_interval, tick_count
        );

        Ok((
            ClockHandle {
                submit_tx,
                terminate_tx,
                thread,
            },
            status_rx,
        ))
    }
}

impl ClockHandle {
    /// Queues a request; it is validated by the dispatcher before the next tick.
    pub fn submit_request(&self, origin: u8, dest: u8, weight: f64) {
        self.send_submission(Submission {
            origin,
            dest,
            weight: Some(weight),
        });
    }

    /// Like `submit_request`, using the dispatcher's default weight.
    pub fn submit_default(&self, origin: u8, dest: u8) {
        self.send_submission(Submission {
            origin,
            dest,
            weight: None,
        });
    }

    /// Halts the clock and hands the dispatcher back.
    pub fn stop_simulation(self) -> Dispatcher {
        let _ = self.terminate_tx.send(());
        self.join()
    }

    /// Blocks until the tick budget is spent and hands the dispatcher back.
    /// Never returns for an unbounded run unless it is stopped elsewhere.
    pub fn wait(self) -> Dispatcher {
        self.join()
    }

    fn join(self) -> Dispatcher {
        match self.thread.join() {
            Ok(dispatcher) => dispatcher,
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    fn send_submission(&self, submission: Submission) {
        if self.submit_tx.send(submission).is_err() {
            warn!("Clock thread has stopped, submission dropped");
        }
    }
}

/***************************************/
/*            Clock thread             */
/***************************************/
struct ClockRunner {
    dispatcher: Dispatcher,
    tick_count: Option<u64>,
    ticker: cbc::Receiver<std::time::Instant>,
    submit_rx: cbc::Receiver<Submission>,
    terminate_rx: cbc::Receiver<()>,
    status_tx: cbc::Sender<SystemStatus>,
}

impl ClockRunner {
    fn run(mut self) -> Dispatcher {
        let mut ticks_done: u64 = 0;

        loop {
            if let Some(limit) = self.tick_count {
                if ticks_done >= limit {
                    break;
                }
            }

            match self.wait_for_event() {
                Event::Tick => {
                    let status = self.dispatcher.tick();
                    ticks_done += 1;
                    // Nobody listening is fine, the run carries on
                    let _ = self.status_tx.send(status);
                }
                Event::Submit(submission) => self.handle_submission(submission),
                Event::Terminate => break,
            }
        }

        // Submissions that arrived after the last tick still count
        while let Ok(submission) = self.submit_rx.try_recv() {
            self.handle_submission(submission);
        }

        info!("Simulation stopped after {} ticks", ticks_done);
        self.dispatcher
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.terminate_rx) -> _ => Event::Terminate,
            recv(self.submit_rx) -> submission => {
                match submission {
                    Ok(submission) => Event::Submit(submission),
                    Err(_) => Event::Terminate,
                }
            }
            recv(self.ticker) -> _ => Event::Tick,
        }
    }

    fn handle_submission(&mut self, submission: Submission) {
        let weight = submission
            .weight
            .unwrap_or_else(|| self.dispatcher.default_weight());
        // Rejections are logged by the dispatcher
        let _ = self
            .dispatcher
            .submit_request(submission.origin, submission.dest, weight);
    }
}
