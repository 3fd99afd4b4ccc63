//! The interactive session: one grid, one display, at most one run.
//!
//! A [`Session`] owns the current [`Grid`], the display sink, the animation
//! [`Scheduler`] and the active search. Front-ends feed clicks and commands
//! into it and call [`advance`](Session::advance) from their own timer.

use std::time::Duration;

use log::{debug, info, warn};

use pathviz_core::config::check_dims;
use pathviz_core::display::paint;
use pathviz_core::{
    CellDisplay, CellId, Dims, Grid, InputError, Pos, Toggle, VizConfig, WeightToggle,
};
use pathviz_paths::{Dijkstra, SearchEvent};

use crate::error::PersistenceError;
use crate::scheduler::{AnimEvent, Scheduler, Tick};
use crate::snapshot::{self, Snapshot};
use crate::store::SnapshotStore;

/// How a finished run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Found {
        /// Total weight of the shortest path.
        distance: u32,
        /// Cells strictly between start and end, from the end backwards.
        path: Vec<Pos>,
        /// Cells shown as visited.
        visited: usize,
    },
    /// Search exhausted. Not an error.
    NoPath { visited: usize },
}

/// What one call to [`Session::advance`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    /// A visited cell was shown; call again after this long.
    Wait(Duration),
    /// The run just ended. Reported exactly once per run.
    Finished(RunOutcome),
    /// No run is active.
    Idle,
}

#[derive(Debug)]
struct ActiveRun {
    generation: u64,
    search: Dijkstra,
    visited: usize,
    outcome: Option<RunOutcome>,
}

/// Process-wide visualizer state, passed explicitly instead of living in
/// globals.
#[derive(Debug)]
pub struct Session<D: CellDisplay> {
    grid: Grid,
    display: D,
    scheduler: Scheduler,
    run: Option<ActiveRun>,
}

impl<D: CellDisplay> Session<D> {
    /// Build a blank grid from `config` and paint it onto `display`.
    pub fn new(config: VizConfig, mut display: D) -> Result<Self, InputError> {
        config.validate()?;
        let grid = Grid::new(config.dims());
        paint(&grid, &mut display);
        debug!("session started with a {} grid", grid.dims());
        Ok(Self {
            grid,
            display,
            scheduler: Scheduler::new(config.delay()),
            run: None,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.grid.dims()
    }

    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.scheduler.delay()
    }

    /// Generation of the most recent run; bumped by every run, resize,
    /// reset and load.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.scheduler.generation()
    }

    /// Whether a run is searching or still has events to show.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    // -----------------------------------------------------------------------
    // Interaction API
    // -----------------------------------------------------------------------

    /// Advance the clicked cell along the wall / start / end chain.
    ///
    /// Allowed mid-run: a new wall is seen by the search as soon as it next
    /// expands a neighbor of that cell.
    pub fn primary_click(&mut self, p: Pos) -> Result<Toggle, InputError> {
        let toggle = self.grid.toggle_wall_or_role(p)?;
        let id = CellId(p);
        match toggle {
            Toggle::ClearedWall => self.display.clear_wall(id),
            Toggle::PlacedStart => self.display.mark_start(id),
            Toggle::PlacedEnd => self.display.mark_end(id),
            Toggle::PlacedWall => self.display.mark_wall(id),
            Toggle::Unchanged => {}
        }
        Ok(toggle)
    }

    /// Toggle the clicked cell between normal and heavy terrain.
    pub fn secondary_click(&mut self, p: Pos) -> Result<WeightToggle, InputError> {
        let toggle = self.grid.toggle_weight(p)?;
        let id = CellId(p);
        match toggle {
            WeightToggle::Weighted => self.display.mark_weighted(id),
            WeightToggle::Cleared => self.display.clear_weighted(id),
            WeightToggle::Unchanged => {}
        }
        Ok(toggle)
    }

    /// Replace the grid with a blank one of `dims`.
    ///
    /// Out-of-range dimensions leave the current grid untouched.
    pub fn resize(&mut self, dims: Dims) -> Result<(), InputError> {
        if let Err(e) = check_dims(dims) {
            warn!("resize rejected: {e}");
            return Err(e);
        }
        self.replace_grid(Grid::new(dims));
        Ok(())
    }

    /// Replace the grid with a blank one of the current size.
    pub fn reset(&mut self) {
        self.replace_grid(Grid::new(self.grid.dims()));
    }

    pub fn set_animation_delay(&mut self, delay: Duration) {
        debug!("animation delay set to {delay:?}");
        self.scheduler.set_delay(delay);
    }

    /// Start a search from the start cell to the end cell.
    ///
    /// A second run while one is in flight is rejected rather than
    /// restarted; callers wanting a restart should `reset` first. Returns
    /// the generation tagging the new run's events.
    pub fn run(&mut self) -> Result<u64, InputError> {
        if let Some(active) = &self.run {
            warn!("run rejected: run {} still in progress", active.generation);
            return Err(InputError::RunInProgress);
        }
        let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) else {
            warn!("run rejected: start or end not placed");
            return Err(InputError::MissingEndpoints);
        };
        let generation = self.scheduler.supersede();
        self.display.clear_search();
        self.run = Some(ActiveRun {
            generation,
            search: Dijkstra::new(self.grid.dims(), start, end),
            visited: 0,
            outcome: None,
        });
        debug!("run {generation} started: {start} -> {end}");
        Ok(generation)
    }

    /// Show the next batch of events.
    ///
    /// Each visited cell is followed by a [`Advance::Wait`]; once the search
    /// ends the path is shown in one go and [`Advance::Finished`] follows.
    pub fn advance(&mut self) -> Advance {
        loop {
            if let Tick::Wait(d) = self.scheduler.advance(&mut self.display) {
                return Advance::Wait(d);
            }
            let Some(active) = self.run.as_mut() else {
                return Advance::Idle;
            };
            match active.search.step(&self.grid) {
                Some(SearchEvent::Visited(p)) => {
                    active.visited += 1;
                    self.scheduler.push(active.generation, AnimEvent::Visited(p));
                }
                Some(SearchEvent::Found { distance }) => {
                    let path = active.search.path();
                    for &p in &path {
                        self.scheduler.push(active.generation, AnimEvent::Path(p));
                    }
                    active.outcome = Some(RunOutcome::Found {
                        distance,
                        path,
                        visited: active.visited,
                    });
                }
                Some(SearchEvent::Exhausted) => {
                    active.outcome = Some(RunOutcome::NoPath {
                        visited: active.visited,
                    });
                }
                None => {
                    let outcome = active.outcome.take().unwrap_or(RunOutcome::NoPath {
                        visited: active.visited,
                    });
                    info!("run {} finished: {}", active.generation, summary(&outcome));
                    self.run = None;
                    return Advance::Finished(outcome);
                }
            }
        }
    }

    /// Start a run and drive it to the end, ignoring every pause.
    pub fn run_to_completion(&mut self) -> Result<RunOutcome, InputError> {
        self.run()?;
        loop {
            match self.advance() {
                Advance::Wait(_) => {}
                Advance::Finished(outcome) => return Ok(outcome),
                Advance::Idle => {
                    return Ok(RunOutcome::NoPath { visited: 0 });
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Capture the durable state of the grid.
    pub fn save(&self) -> Snapshot {
        snapshot::serialize(&self.grid)
    }

    /// Restore a snapshot taken on a grid of the current size.
    ///
    /// On failure the current grid is left as it was.
    pub fn load(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let grid = match snapshot::deserialize(snapshot, self.grid.dims()) {
            Ok(g) => g,
            Err(e) => {
                warn!("load rejected: {e}");
                return Err(e);
            }
        };
        self.replace_grid(grid);
        debug!("loaded {} snapshot", snapshot.dims());
        Ok(())
    }

    pub fn save_to<S: SnapshotStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> Result<(), PersistenceError> {
        store.save(&self.save())
    }

    pub fn load_from<S: SnapshotStore + ?Sized>(
        &mut self,
        store: &S,
    ) -> Result<(), PersistenceError> {
        let snapshot = store.load()?;
        self.load(&snapshot)
    }

    /// Swap in `grid`, superseding any active run, and repaint.
    fn replace_grid(&mut self, grid: Grid) {
        if let Some(active) = self.run.take() {
            debug!("run {} superseded", active.generation);
        }
        self.scheduler.supersede();
        self.grid = grid;
        paint(&self.grid, &mut self.display);
        debug!("grid rebuilt at {}", self.grid.dims());
    }
}

fn summary(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Found {
            distance,
            path,
            visited,
        } => format!("distance {distance}, path {} cells, {visited} visited", path.len()),
        RunOutcome::NoPath { visited } => format!("no path, {visited} visited"),
    }
}
