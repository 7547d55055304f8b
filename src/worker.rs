use std::sync::mpsc::{self, Receiver, TryRecvError};

use tracing::{debug, error};

use crate::error::{FetchError, PickerError};

pub type FetchOutcome = Result<Vec<String>, FetchError>;

pub enum TaskPoll {
    Pending,
    Ready(Result<Vec<String>, PickerError>),
}

/// A single background fetch whose outcome is handed back once.
pub struct FetchTask {
    rx: Option<Receiver<FetchOutcome>>,
}

impl FetchTask {
    /// Runs `job` on its own thread. `wake` is called after the outcome has
    /// been sent so the UI thread can pick it up.
    pub fn spawn<F, W>(job: F, wake: W) -> Self
    where
        F: FnOnce() -> FetchOutcome + Send + 'static,
        W: Fn() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<FetchOutcome>();

        std::thread::spawn(move || {
            let outcome = job();
            if let Err(err) = &outcome {
                error!("Error fetching countries: {}", err);
            }
            if tx.send(outcome).is_err() {
                debug!("Fetch outcome dropped, receiver is gone");
            }
            wake();
        });

        Self { rx: Some(rx) }
    }

    /// Non-blocking. Yields `Ready` exactly once; `Pending` before and after.
    pub fn poll(&mut self) -> TaskPoll {
        let recv_result = match self.rx.as_ref() {
            Some(rx) => rx.try_recv(),
            None => return TaskPoll::Pending,
        };

        match recv_result {
            Ok(outcome) => {
                self.rx = None;
                TaskPoll::Ready(outcome.map_err(PickerError::from))
            }
            Err(TryRecvError::Empty) => TaskPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                TaskPoll::Ready(Err(PickerError::WorkerStopped))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.rx.is_none()
    }
}
