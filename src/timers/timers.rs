use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    calls: u64,
}

impl InnerTimer {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn start(&mut self) {
        self.start = Some(Instant::now());
        self.calls += 1;
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    fn suspend(&mut self) {
        //save current elapsed if this timer appears active
        if let Some(instant) = self.start {
            self.elapsed += instant.elapsed();
        }
    }

    fn resume(&mut self) {
        //just refresh start time to now if active
        if self.start.is_some() {
            self.start = Some(Instant::now());
        }
    }
}

/// A collection of named timers.
///
/// Timers are started and stopped in a stack discipline, so that
/// the innermost active timer is always the one stopped next.  Time
/// spent in nested timers is also counted by the timers enclosing them.
#[derive(Debug, Default, Clone)]
pub struct Timers {
    stack: Vec<&'static str>,
    timers: HashMap<&'static str, InnerTimer>,
}

impl Timers {
    pub fn reset_timer(&mut self, key: &'static str) {
        self.timers.entry(key).or_default().reset();
    }

    /// starts a timer with name `key` as the current timer
    pub fn start_as_current(&mut self, key: &'static str) {
        self.timers.entry(key).or_default().start();
        self.stack.push(key);
    }

    /// stops the current timer.
    pub fn stop_current(&mut self) {
        if let Some(key) = self.stack.pop() {
            if let Some(t) = self.timers.get_mut(key) {
                t.stop();
            }
        }
    }

    /// Suspend every active timer.   Used for `notimeit!`
    pub fn suspend(&mut self) {
        self.timers.values_mut().for_each(InnerTimer::suspend);
    }

    /// Resume every suspended timer.   Used for `notimeit!`
    pub fn resume(&mut self) {
        self.timers.values_mut().for_each(InnerTimer::resume);
    }

    /// Accumulated time for the timer `key`, zero if it has never run
    pub fn elapsed(&self, key: &str) -> Duration {
        self.timers
            .get(key)
            .map_or(Duration::ZERO, |t| t.elapsed)
    }

    /// Number of times the timer `key` has been started
    pub fn calls(&self, key: &str) -> u64 {
        self.timers.get(key).map_or(0, |t| t.calls)
    }

    pub fn print(&self, out: &mut dyn std::io::Write) -> std::io::Result<()> {
        let mut keys: Vec<_> = self.timers.keys().collect();
        keys.sort();
        for key in keys {
            let t = &self.timers[key];
            writeln!(out, "{:<16} : {:?} ({} calls)", key, t.elapsed, t.calls)?;
        }
        Ok(())
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;

#[test]
fn test_timers_nesting() {
    let mut timers = Timers::default();

    timeit! {timers => "outer"; {
        timeit!{timers => "inner"; {
            std::thread::sleep(Duration::from_millis(2));
        }}
        timeit!{timers => "inner"; {
            std::thread::sleep(Duration::from_millis(2));
        }}
    }}

    assert_eq!(timers.calls("inner"), 2);
    assert_eq!(timers.calls("outer"), 1);
    assert!(timers.elapsed("outer") >= timers.elapsed("inner"));
    assert!(timers.elapsed("inner") >= Duration::from_millis(4));
    assert_eq!(timers.elapsed("missing"), Duration::ZERO);

    timers.reset_timer("outer");
    assert_eq!(timers.elapsed("outer"), Duration::ZERO);
}
