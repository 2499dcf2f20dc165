//! Frame-quantized scheduling.
//!
//! A [`Loop`] turns accumulated milliseconds into discrete *counts*: with
//! `fps` counts per second each count lasts `1000 / fps` ms, and once the
//! accumulated time crosses the next count boundary the loop fires with the
//! new count index. After `count_per_period` counts the loop resets to count
//! 0, discarding any overshoot.
//!
//! [`LoopManager`] owns a list of loops and their callbacks and advances all
//! non-paused loops in registration order. Three scheduling flavours share
//! the same primitive:
//!
//! - [`LoopManager::repeat`] – periodic, wraps forever
//! - [`LoopManager::once`] – fires exactly `count_per_period` times, then is removed
//! - [`LoopManager::delay`] – a two-count `once` that runs its callback a
//!   single time, roughly `delay_ms` after registration
//!
//! # Fire policy
//!
//! By default a loop checks a single boundary per update, so a large `dt`
//! still fires at most once ([`FirePolicy::Single`]). [`FirePolicy::CatchUp`]
//! keeps firing until no further boundary has been crossed, or until the
//! loop's own callback queues its removal or pause.
//!
//! # Mutation from callbacks
//!
//! Callbacks receive a [`LoopTick`] carrying the count, the loop's own
//! [`LoopId`], the caller's context and a [`LoopCommands`] queue. Removing,
//! pausing, resuming or scheduling loops from inside a callback goes through
//! that queue and is applied once the current pass is over, so every loop
//! registered when the pass started is visited exactly once.
//!
//! # Example
//!
//! ```
//! use tileworld::resources::loopmanager::LoopManager;
//!
//! let mut loops: LoopManager<Vec<i32>> = LoopManager::new();
//! loops.repeat(1000.0, 3, |tick| tick.context.push(tick.count)).unwrap();
//!
//! let mut fired = Vec::new();
//! for _ in 0..4 {
//!     loops.update(1.5, &mut fired);
//! }
//! assert_eq!(fired, vec![0, 1, 2, 0]);
//! ```

use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::fmt;
use std::ops::ControlFlow;

/// Milliseconds in one second; `each_count_time = MS_PER_SECOND / fps`.
pub const MS_PER_SECOND: f32 = 1000.0;

/// Errors raised when a loop is created with an unusable rate.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum LoopError {
    #[error("fps must be a positive finite number, got {0}")]
    InvalidFps(f32),
    #[error("count_per_period must be at least 1, got {0}")]
    InvalidPeriod(i32),
    #[error("delay must be a positive finite number of milliseconds, got {0}")]
    InvalidDelay(f32),
}

/// Handle to a loop registered with a [`LoopManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(u64);

/// Whether a loop wraps forever or finishes after one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    #[default]
    Repeat,
    Once,
}

/// How many count boundaries a single update may cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FirePolicy {
    /// At most one fire per update, even if `dt` spans several counts.
    #[default]
    Single,
    /// Fire for every boundary crossed during the update.
    CatchUp,
}

/// Timing state of one loop.
///
/// `current_count` is `-1` until the first fire. [`Loop::update`] does not
/// look at the paused flag; skipping paused loops is the manager's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    fps: f32,
    count_per_period: i32,
    each_count_time: f32,
    elapsed_time: f32,
    current_count: i32,
    paused: bool,
    mode: LoopMode,
    policy: FirePolicy,
    finished: bool,
}

impl Loop {
    pub fn new(fps: f32, count_per_period: i32) -> Result<Self, LoopError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(LoopError::InvalidFps(fps));
        }
        if count_per_period < 1 {
            return Err(LoopError::InvalidPeriod(count_per_period));
        }
        Ok(Loop {
            fps,
            count_per_period,
            each_count_time: MS_PER_SECOND / fps,
            elapsed_time: 0.0,
            current_count: -1,
            paused: false,
            mode: LoopMode::Repeat,
            policy: FirePolicy::Single,
            finished: false,
        })
    }

    pub fn with_mode(mut self, mode: LoopMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: FirePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn count_per_period(&self) -> i32 {
        self.count_per_period
    }

    /// Length of one count in milliseconds.
    pub fn each_count_time(&self) -> f32 {
        self.each_count_time
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Last count fired, `-1` before the first one.
    pub fn current_count(&self) -> i32 {
        self.current_count
    }

    pub fn mode(&self) -> LoopMode {
        self.mode
    }

    pub fn policy(&self) -> FirePolicy {
        self.policy
    }

    pub fn is_idle(&self) -> bool {
        self.current_count == -1
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// A `Once` loop that has fired its last count.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Restart the period at count 0 with no accumulated time.
    pub fn reset(&mut self) {
        self.elapsed_time = 0.0;
        self.current_count = 0;
    }

    /// Accumulate `dt` milliseconds and report each fired count to `on_count`.
    ///
    /// Returns how many counts fired.
    pub fn update(&mut self, dt: f32, mut on_count: impl FnMut(i32)) -> usize {
        self.update_until(dt, |count| {
            on_count(count);
            ControlFlow::Continue(())
        })
    }

    /// Like [`Loop::update`], but `on_count` can stop a catch-up burst by
    /// returning [`ControlFlow::Break`]. Unfired time stays accumulated.
    pub fn update_until(
        &mut self,
        dt: f32,
        mut on_count: impl FnMut(i32) -> ControlFlow<()>,
    ) -> usize {
        self.elapsed_time += dt;
        let mut fired = 0;
        while let Some(count) = self.cross_boundary() {
            fired += 1;
            if on_count(count).is_break() || self.policy == FirePolicy::Single {
                break;
            }
        }
        fired
    }

    fn cross_boundary(&mut self) -> Option<i32> {
        if self.finished {
            return None;
        }
        let boundary = (self.current_count + 1) as f32 * self.each_count_time;
        if self.elapsed_time <= boundary {
            return None;
        }
        self.current_count += 1;
        if self.current_count >= self.count_per_period {
            self.reset();
        }
        if self.mode == LoopMode::Once && self.current_count == self.count_per_period - 1 {
            self.finished = true;
        }
        Some(self.current_count)
    }
}

/// Boxed loop callback.
pub type LoopCallback<C> = Box<dyn FnMut(&mut LoopTick<'_, C>)>;

/// What a loop callback sees when it fires.
pub struct LoopTick<'a, C> {
    /// The loop that fired.
    pub id: LoopId,
    /// Count index within the period.
    pub count: i32,
    pub context: &'a mut C,
    /// Deferred changes to the manager, applied after the current pass.
    pub commands: &'a mut LoopCommands<C>,
}

impl<C> LoopTick<'_, C> {
    /// Unregister the loop that is firing.
    pub fn remove_self(&mut self) {
        self.commands.remove(self.id);
    }
}

struct LoopEntry<C> {
    id: LoopId,
    timer: Loop,
    callback: LoopCallback<C>,
}

/// Queue of loop changes requested while the manager is mid-update.
pub struct LoopCommands<C> {
    next_id: u64,
    policy: FirePolicy,
    spawned: Vec<LoopEntry<C>>,
    removed: FxHashSet<LoopId>,
    toggled: Vec<(LoopId, bool)>,
}

impl<C> LoopCommands<C> {
    fn new(next_id: u64, policy: FirePolicy) -> Self {
        LoopCommands {
            next_id,
            policy,
            spawned: Vec::new(),
            removed: FxHashSet::default(),
            toggled: Vec::new(),
        }
    }

    pub fn remove(&mut self, id: LoopId) {
        self.removed.insert(id);
    }

    pub fn pause(&mut self, id: LoopId) {
        self.toggled.push((id, true));
    }

    pub fn resume(&mut self, id: LoopId) {
        self.toggled.push((id, false));
    }

    /// Whether `id` is queued for removal or its latest toggle is a pause.
    fn halts(&self, id: LoopId) -> bool {
        self.removed.contains(&id)
            || self
                .toggled
                .iter()
                .rev()
                .find(|(toggled, _)| *toggled == id)
                .is_some_and(|&(_, paused)| paused)
    }
}

impl<C: 'static> LoopCommands<C> {
    /// Schedule a periodic loop; it joins the manager after the current pass.
    pub fn repeat(
        &mut self,
        fps: f32,
        count_per_period: i32,
        callback: impl FnMut(&mut LoopTick<'_, C>) + 'static,
    ) -> Result<LoopId, LoopError> {
        let timer = Loop::new(fps, count_per_period)?;
        Ok(self.register(timer, Box::new(callback)))
    }

    /// Schedule a one-period loop; it joins the manager after the current pass.
    pub fn once(
        &mut self,
        fps: f32,
        count_per_period: i32,
        callback: impl FnMut(&mut LoopTick<'_, C>) + 'static,
    ) -> Result<LoopId, LoopError> {
        let timer = Loop::new(fps, count_per_period)?.with_mode(LoopMode::Once);
        Ok(self.register(timer, Box::new(callback)))
    }

    /// Schedule a delayed callback; the delay starts after the current pass.
    pub fn delay(
        &mut self,
        delay_ms: f32,
        callback: impl FnOnce(&mut LoopTick<'_, C>) + 'static,
    ) -> Result<LoopId, LoopError> {
        let timer = delay_timer(delay_ms)?;
        Ok(self.register(timer, delay_callback(callback)))
    }

    fn register(&mut self, timer: Loop, callback: LoopCallback<C>) -> LoopId {
        let id = LoopId(self.next_id);
        self.next_id += 1;
        self.spawned.push(LoopEntry {
            id,
            timer: timer.with_policy(self.policy),
            callback,
        });
        id
    }
}

fn delay_timer(delay_ms: f32) -> Result<Loop, LoopError> {
    if !(delay_ms.is_finite() && delay_ms > 0.0) {
        return Err(LoopError::InvalidDelay(delay_ms));
    }
    let timer = Loop::new(MS_PER_SECOND / delay_ms, 2)
        .map_err(|_| LoopError::InvalidDelay(delay_ms))?;
    Ok(timer.with_mode(LoopMode::Once))
}

// Count 0 fires on the first update; count 1 marks the end of the delay.
fn delay_callback<C: 'static>(
    callback: impl FnOnce(&mut LoopTick<'_, C>) + 'static,
) -> LoopCallback<C> {
    let mut callback = Some(callback);
    Box::new(move |tick: &mut LoopTick<'_, C>| {
        if tick.count == 1 {
            if let Some(callback) = callback.take() {
                callback(tick);
            }
        }
    })
}

/// Owner of a set of loops, advanced together by [`LoopManager::update`].
///
/// `C` is the context handed to every callback; use `()` when callbacks
/// capture everything they need.
pub struct LoopManager<C = ()> {
    loops: Vec<LoopEntry<C>>,
    next_id: u64,
    policy: FirePolicy,
}

impl<C: 'static> Default for LoopManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> LoopManager<C> {
    pub fn new() -> Self {
        Self::with_policy(FirePolicy::default())
    }

    /// Manager whose loops all use `policy`.
    pub fn with_policy(policy: FirePolicy) -> Self {
        LoopManager {
            loops: Vec::new(),
            next_id: 0,
            policy,
        }
    }

    pub fn policy(&self) -> FirePolicy {
        self.policy
    }

    /// Register a periodic loop that wraps every `count_per_period` counts.
    pub fn repeat(
        &mut self,
        fps: f32,
        count_per_period: i32,
        callback: impl FnMut(&mut LoopTick<'_, C>) + 'static,
    ) -> Result<LoopId, LoopError> {
        let timer = Loop::new(fps, count_per_period)?;
        Ok(self.register(timer, Box::new(callback)))
    }

    /// Register a loop that fires `count_per_period` times and then removes itself.
    pub fn once(
        &mut self,
        fps: f32,
        count_per_period: i32,
        callback: impl FnMut(&mut LoopTick<'_, C>) + 'static,
    ) -> Result<LoopId, LoopError> {
        let timer = Loop::new(fps, count_per_period)?.with_mode(LoopMode::Once);
        Ok(self.register(timer, Box::new(callback)))
    }

    /// Run `callback` once, after roughly `delay_ms` milliseconds of updates.
    pub fn delay(
        &mut self,
        delay_ms: f32,
        callback: impl FnOnce(&mut LoopTick<'_, C>) + 'static,
    ) -> Result<LoopId, LoopError> {
        let timer = delay_timer(delay_ms)?;
        Ok(self.register(timer, delay_callback(callback)))
    }

    /// Unregister a loop. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: LoopId) -> bool {
        let before = self.loops.len();
        self.loops.retain(|entry| entry.id != id);
        let removed = self.loops.len() != before;
        if removed {
            debug!("Removed loop {:?}", id);
        }
        removed
    }

    pub fn contains(&self, id: LoopId) -> bool {
        self.loops.iter().any(|entry| entry.id == id)
    }

    pub fn get(&self, id: LoopId) -> Option<&Loop> {
        self.loops
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.timer)
    }

    pub fn get_mut(&mut self, id: LoopId) -> Option<&mut Loop> {
        self.loops
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.timer)
    }

    /// Stop advancing a loop until [`LoopManager::resume`]. Returns `false` if unknown.
    pub fn pause(&mut self, id: LoopId) -> bool {
        self.get_mut(id).map(Loop::pause).is_some()
    }

    pub fn resume(&mut self, id: LoopId) -> bool {
        self.get_mut(id).map(Loop::resume).is_some()
    }

    /// Registered loops in update order.
    pub fn ids(&self) -> impl Iterator<Item = LoopId> + '_ {
        self.loops.iter().map(|entry| entry.id)
    }

    pub fn len(&self) -> usize {
        self.loops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn clear(&mut self) {
        self.loops.clear();
    }

    /// Advance every non-paused loop by `dt` milliseconds.
    ///
    /// Loops are visited in registration order. Changes queued through
    /// [`LoopCommands`] and finished `once` loops are applied after the pass.
    pub fn update(&mut self, dt: f32, context: &mut C) {
        let mut commands = LoopCommands::new(self.next_id, self.policy);
        for entry in self.loops.iter_mut() {
            if entry.timer.is_paused() {
                continue;
            }
            let LoopEntry {
                id,
                timer,
                callback,
            } = entry;
            let id = *id;
            timer.update_until(dt, |count| {
                trace!("Loop {:?} fired count {}", id, count);
                let mut tick = LoopTick {
                    id,
                    count,
                    context: &mut *context,
                    commands: &mut commands,
                };
                callback(&mut tick);
                if commands.halts(id) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
        }
        self.apply(commands);
    }

    fn register(&mut self, timer: Loop, callback: LoopCallback<C>) -> LoopId {
        let id = LoopId(self.next_id);
        self.next_id += 1;
        let timer = timer.with_policy(self.policy);
        debug!(
            "Registered loop {:?}: fps={}, count_per_period={}, mode={:?}",
            id,
            timer.fps(),
            timer.count_per_period(),
            timer.mode()
        );
        self.loops.push(LoopEntry {
            id,
            timer,
            callback,
        });
        id
    }

    fn apply(&mut self, commands: LoopCommands<C>) {
        let LoopCommands {
            next_id,
            spawned,
            removed,
            toggled,
            ..
        } = commands;
        self.next_id = next_id;
        for entry in &spawned {
            debug!(
                "Registered loop {:?} from callback: fps={}, count_per_period={}",
                entry.id,
                entry.timer.fps(),
                entry.timer.count_per_period()
            );
        }
        self.loops.extend(spawned);
        for (id, paused) in toggled {
            if paused {
                self.pause(id);
            } else {
                self.resume(id);
            }
        }
        self.loops.retain(|entry| {
            let keep = !entry.timer.is_finished() && !removed.contains(&entry.id);
            if !keep {
                debug!("Removed loop {:?}", entry.id);
            }
            keep
        });
    }
}

impl<C> fmt::Debug for LoopManager<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopManager")
            .field("policy", &self.policy)
            .field(
                "loops",
                &self
                    .loops
                    .iter()
                    .map(|entry| (entry.id, &entry.timer))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
