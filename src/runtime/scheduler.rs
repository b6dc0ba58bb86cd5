use crate::runtime::event::AppEvent;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: &str = "search.debounce";
pub const DETAIL_GUARD: &str = "search.detail_guard";

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerCommand {
    EmitNow(AppEvent),
    /// Delivers `event` after `delay` unless the key is rescheduled or
    /// cancelled first. Only the latest schedule per key survives.
    Debounce {
        key: String,
        delay: Duration,
        event: AppEvent,
    },
    Cancel {
        key: String,
    },
}

impl SchedulerCommand {
    pub fn debounce(key: &str, delay: Duration, event: AppEvent) -> Self {
        Self::Debounce {
            key: key.to_string(),
            delay,
            event,
        }
    }

    pub fn cancel(key: &str) -> Self {
        Self::Cancel {
            key: key.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask {
    due_at: Instant,
    guard: Guard,
    event: AppEvent,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    ready: VecDeque<AppEvent>,
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::EmitNow(event) => {
                self.ready.push_back(event);
            }
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(&key);
                self.delayed.retain(|task| task.guard.key != key);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
                self.delayed.retain(|task| task.guard.key != key);
            }
        }
    }

    /// Pops the next event that is ready at `now`: queued events first, then
    /// due timers in deadline order.
    pub fn next_ready(&mut self, now: Instant) -> Option<AppEvent> {
        if let Some(event) = self.ready.pop_front() {
            return Some(event);
        }

        let (index, _) = self
            .delayed
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at <= now)
            .min_by_key(|(_, task)| task.due_at)?;
        let task = self.delayed.swap_remove(index);
        if self.task_is_valid(&task) {
            Some(task.event)
        } else {
            self.next_ready(now)
        }
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        if !self.ready.is_empty() {
            return Duration::ZERO;
        }

        let mut next = default_timeout;

        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }

        next
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.delayed.iter().map(|task| task.due_at).min()
    }

    pub fn is_scheduled(&self, key: &str) -> bool {
        self.delayed.iter().any(|task| task.guard.key == key)
    }

    pub fn is_idle(&self) -> bool {
        self.ready.is_empty() && self.delayed.is_empty()
    }

    fn task_is_valid(&self, task: &DelayedTask) -> bool {
        let current = *self.key_versions.get(&task.guard.key).unwrap_or(&0);
        current == task.guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
