//! Cooperative animation scheduler.
//!
//! The scheduler never sleeps. It holds a FIFO of display events, each
//! tagged with the generation of the run that produced it, and hands them to
//! the display one [`advance`](Scheduler::advance) at a time. When a pause
//! is due it returns the wait to the caller, which owns the timer.
//!
//! Visited events are followed by the configured delay; path events are
//! shown back to back. Events whose generation has been superseded are
//! dropped without being shown.

use std::collections::VecDeque;
use std::time::Duration;

use pathviz_core::{CellDisplay, CellId, Pos};

/// An event waiting to be shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnimEvent {
    Visited(Pos),
    Path(Pos),
}

#[derive(Debug)]
struct Scheduled {
    generation: u64,
    event: AnimEvent,
}

/// What one call to [`Scheduler::advance`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// An event was shown; call again after this long.
    Wait(Duration),
    /// Nothing of the current generation is left to show.
    Drained,
}

#[derive(Debug)]
pub struct Scheduler {
    queue: VecDeque<Scheduled>,
    generation: u64,
    delay: Duration,
}

impl Scheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            generation: 0,
            delay,
        }
    }

    /// Generation whose events are currently shown.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the pause after visited events; applies from the next pause.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Start a new generation. Everything queued so far becomes stale.
    pub fn supersede(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Queue `event` on behalf of run `generation`.
    pub fn push(&mut self, generation: u64, event: AnimEvent) {
        self.queue.push_back(Scheduled { generation, event });
    }

    /// Events of the current generation still waiting.
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|s| s.generation == self.generation)
            .count()
    }

    /// Show queued events until a pause is due or the queue runs dry.
    pub fn advance<D: CellDisplay + ?Sized>(&mut self, out: &mut D) -> Tick {
        while let Some(s) = self.queue.pop_front() {
            if s.generation != self.generation {
                log::trace!("dropping {:?} from superseded run {}", s.event, s.generation);
                continue;
            }
            match s.event {
                AnimEvent::Visited(p) => {
                    out.mark_visited(CellId(p));
                    return Tick::Wait(self.delay);
                }
                AnimEvent::Path(p) => out.mark_path(CellId(p)),
            }
        }
        Tick::Drained
    }
}
