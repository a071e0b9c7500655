use std::{
    sync::{
        mpsc::{self, RecvTimeoutError, SyncSender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Represents a timer inside of the chip infrastructure, it counts down to zero by one on
/// every tick and stays there.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Counts down by one, saturating at zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// Runs a callback repeatedly at a fixed interval.
pub trait TimedWorker {
    fn new() -> Self;

    /// Will start running the callback every interval.
    fn start<T>(&mut self, callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static;

    /// Will stop running the callback, waits for the running call to finish.
    fn stop(&mut self);

    fn is_alive(&self) -> bool;
}

/// A [`TimedWorker`] running the callback on its own thread.
pub struct Worker {
    /// Contains the actual thread, that is running.
    thread: Option<JoinHandle<()>>,
    /// Contains the sync sender used to gracefully shutdown the thread.
    shutdown: Option<SyncSender<()>>,
    /// Counts the threads holding on to the worker (never more than 2).
    alive: Arc<()>,
}

impl TimedWorker for Worker {
    fn new() -> Self {
        Self {
            thread: None,
            shutdown: None,
            alive: Arc::new(()),
        }
    }

    /// Attention the worker assumes the callback finishes faster than the interval.
    fn start<T>(&mut self, mut callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static,
    {
        // a running worker is replaced
        self.stop();

        let (send, recv) = mpsc::sync_channel::<()>(1);
        let alive = self.alive.clone();
        let thread = thread::spawn(move || {
            let _alive = alive;
            let mut timeout = interval;
            loop {
                match recv.recv_timeout(timeout) {
                    Err(RecvTimeoutError::Timeout) => {
                        let start = Instant::now();

                        callback();

                        // make sure the next call happens at most one interval later
                        timeout = interval
                            .checked_sub(start.elapsed())
                            .unwrap_or(Duration::ZERO);
                    }
                    Ok(_) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        self.thread = Some(thread);
        self.shutdown = Some(send);
    }

    fn stop(&mut self) {
        // Sending fails if the thread is already gone, dropping the sender afterwards
        // disconnects the channel either way.
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.try_send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("The worker thread panicked.");
            }
        }
    }

    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.alive) > 1
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_timer_saturates() {
        let mut timer = Timer::new(2);
        timer.tick();
        assert_eq!(timer.get_value(), 1);
        timer.tick();
        assert_eq!(timer.get_value(), 0);
        timer.tick();
        assert_eq!(timer.get_value(), 0);
    }

    #[test]
    fn test_worker() {
        let counter = Arc::new(AtomicUsize::new(0));
        let ccounter = counter.clone();

        let mut worker = Worker::new();
        assert!(!worker.is_alive());

        worker.start(
            move || {
                ccounter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(5),
        );
        assert!(worker.is_alive());

        thread::sleep(Duration::from_millis(200));
        worker.stop();
        assert!(!worker.is_alive());

        let calls = counter.load(Ordering::SeqCst);
        assert!(calls > 0);

        // no calls after stopping
        thread::sleep(Duration::from_millis(50));
        assert_eq!(calls, counter.load(Ordering::SeqCst));
    }
}
