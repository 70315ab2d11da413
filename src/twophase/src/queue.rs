use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, select};
use log::{debug, warn};
use std::thread::{self, JoinHandle};

use crate::{
    error::ExhaustionError,
    moves::MoveSequence,
    scramble::scramble_with_rng,
    solver::SolveOptions,
    start, success,
};

/// Prefetches random-state scrambles on a background thread.
///
/// The worker blocks once `capacity` scrambles are waiting, and readers block
/// while the queue is empty. Dropping the queue asks the worker to stop and
/// waits for it; a search already in progress finishes first.
///
/// If a search exhausts its options the error is handed to the reader and the
/// worker exits, after which the queue yields nothing more.
#[derive(Debug)]
pub struct ScrambleQueue {
    scrambles: Receiver<Result<MoveSequence, ExhaustionError>>,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ScrambleQueue {
    #[must_use]
    pub fn new(capacity: usize, options: SolveOptions) -> Self {
        Self::with_rng(capacity, options, fastrand::Rng::new())
    }

    #[must_use]
    pub fn with_rng(capacity: usize, options: SolveOptions, rng: fastrand::Rng) -> Self {
        let (scramble_tx, scrambles) = bounded(capacity);
        let (stop_tx, stop_rx) = bounded(0);
        let worker = thread::spawn(move || produce(&scramble_tx, &stop_rx, &options, rng));
        Self {
            scrambles,
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        }
    }

    /// Block until a scramble is available. Only `None` once the worker has
    /// exited and everything it produced has been taken.
    pub fn next_scramble(&self) -> Option<Result<MoveSequence, ExhaustionError>> {
        self.scrambles.recv().ok()
    }

    /// Number of scrambles ready to be taken.
    #[must_use]
    pub fn ready(&self) -> usize {
        self.scrambles.len()
    }

    /// Stop the worker and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Disconnecting the stop channel wakes the worker
        drop(self.stop_tx.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Scramble worker panicked");
            }
            debug!(success!("Scramble worker stopped"));
        }
    }
}

impl Drop for ScrambleQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Iterator for ScrambleQueue {
    type Item = Result<MoveSequence, ExhaustionError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_scramble()
    }
}

fn produce(
    scramble_tx: &Sender<Result<MoveSequence, ExhaustionError>>,
    stop_rx: &Receiver<()>,
    options: &SolveOptions,
    mut rng: fastrand::Rng,
) {
    debug!(start!("Scramble worker started"));
    // Nothing is ever sent on the stop channel; it only disconnects
    while let Err(TryRecvError::Empty) = stop_rx.try_recv() {
        let scramble = scramble_with_rng(&mut rng, options);
        let failed = scramble.is_err();
        if let Err(e) = &scramble {
            warn!("Scramble worker giving up: {e}");
        }
        let stopped = select! {
            send(scramble_tx, scramble) -> sent => sent.is_err(),
            recv(stop_rx) -> _ => true,
        };
        if stopped || failed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cubie::CubieState, facelet};
    use std::time::Duration;

    #[test_log::test]
    fn test_queue_yields_valid_scrambles() {
        let queue =
            ScrambleQueue::with_rng(2, SolveOptions::default(), fastrand::Rng::with_seed(8));
        for scramble in queue.take(4) {
            let scramble = scramble.unwrap();
            let state = CubieState::SOLVED.apply_all(&scramble);
            assert!(facelet::verify(&state).is_ok());
            assert!(!state.is_solved());
        }
    }

    #[test_log::test]
    fn test_drop_while_full_does_not_hang() {
        let queue =
            ScrambleQueue::with_rng(1, SolveOptions::default(), fastrand::Rng::with_seed(9));
        // Wait for the worker to fill the queue and block on the next send
        while queue.ready() < 1 {
            thread::sleep(Duration::from_millis(5));
        }
        queue.stop();
    }

    #[test_log::test]
    fn test_zero_capacity_hands_off_directly() {
        let mut queue =
            ScrambleQueue::with_rng(0, SolveOptions::default(), fastrand::Rng::with_seed(10));
        assert!(queue.next().unwrap().is_ok());
        assert!(queue.next_scramble().unwrap().is_ok());
    }

    #[test_log::test]
    fn test_exhausted_search_ends_the_queue() {
        let options = SolveOptions {
            max_depth: 8,
            ..SolveOptions::default()
        };
        let queue = ScrambleQueue::with_rng(1, options, fastrand::Rng::with_seed(1));
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let reader = thread::spawn(move || {
            let results: Vec<_> = queue.collect();
            done_tx.send(results).unwrap();
        });
        let results = done_rx
            .recv_timeout(Duration::from_secs(60))
            .expect("queue kept blocking after a failed search");
        reader.join().unwrap();
        assert_eq!(results, vec![Err(ExhaustionError::DepthExhausted)]);
    }
}
