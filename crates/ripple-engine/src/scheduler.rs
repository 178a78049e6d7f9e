//! The step scheduler: one object that owns the grids and runs ticks.
//!
//! A tick runs, in order:
//!
//! 1. obstacle trails, when painting is armed, then the join walk
//! 2. the global phase advance
//! 3. the point source lay and the injection of the source map
//! 4. `steps_per_tick` leapfrog steps, each H then E with boundary
//!    correction and history capture
//! 5. the optional finiteness probe
//! 6. the published frame
//!
//! Commands are applied between ticks, never inside one.

use std::fmt;
use std::time::Instant;

use ripple_arena::{Dispatch, GridBufferStore};
use ripple_core::{
    Command, CommandPayload, IngressError, KernelError, MaterialMode, OutputChannel, Receipt,
    SolverConstants, StepError, TickId,
};
use ripple_propagators::{
    first_non_finite, BoundaryModule, FieldUpdateEngine, Frame, GeometryEditor, LeapfrogPhase,
    LineSource, PassContext, SourceInjector,
};
use ripple_space::{GridExtent, Segment, Shape};

use crate::config::{ConfigError, SolverConfig};
use crate::excitation::Excitation;
use crate::ingress::{CommandQueue, CommandSender};
use crate::metrics::TickMetrics;
use crate::obstacle::ObstacleSet;
use crate::state::{Control, SchedulerState};

// ── TickOutcome ─────────────────────────────────────────────────

/// What a call to [`StepScheduler::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// A tick ran and its frame was published.
    Ticked {
        /// Id of the tick.
        tick_id: TickId,
    },
    /// The elapsed time was out of bounds; nothing ran.
    Skipped {
        /// The rejected elapsed time in seconds.
        elapsed_secs: f64,
    },
    /// Never started.
    Idle,
    /// Paused with no single step pending.
    Paused,
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticked { tick_id } => write!(f, "ticked {tick_id}"),
            Self::Skipped { elapsed_secs } => write!(f, "skipped ({elapsed_secs} s elapsed)"),
            Self::Idle => write!(f, "idle"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// Result of a successful [`StepScheduler::advance`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Whether a tick ran.
    pub outcome: TickOutcome,
    /// Receipts for the commands drained from the channel before the tick.
    pub receipts: Vec<Receipt>,
}

// ── StepScheduler ───────────────────────────────────────────────

/// Owns every grid and sequences geometry edits, source injection,
/// leapfrog steps and output once per tick.
///
/// # Examples
///
/// ```
/// use ripple_core::CommandPayload;
/// use ripple_engine::{SchedulerState, SolverConfig, StepScheduler, TickOutcome};
///
/// let config = SolverConfig {
///     width: 32,
///     height: 32,
///     ..SolverConfig::default()
/// };
/// let mut scheduler = StepScheduler::new(config).unwrap();
/// assert!(scheduler.apply(CommandPayload::Start.into()).accepted);
/// assert_eq!(scheduler.state(), SchedulerState::Stepping);
/// let report = scheduler.advance(1.0 / 60.0).unwrap();
/// assert!(matches!(report.outcome, TickOutcome::Ticked { .. }));
/// ```
pub struct StepScheduler {
    config: SolverConfig,
    constants: SolverConstants,
    dispatch: Dispatch,
    store: GridBufferStore,
    engine: FieldUpdateEngine,
    geometry: GeometryEditor,
    sources: SourceInjector,
    obstacles: ObstacleSet,
    excitation: Excitation,
    mode: MaterialMode,
    channel: OutputChannel,
    state: SchedulerState,
    step_pending: bool,
    tick_id: TickId,
    frame: Frame,
    metrics: TickMetrics,
    ingress: CommandQueue,
}

impl StepScheduler {
    /// Validate `config`, allocate every grid and publish an all-zero frame.
    pub fn new(config: SolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let extent =
            GridExtent::new(config.width, config.height).map_err(|_| ConfigError::EmptyGrid {
                width: config.width,
                height: config.height,
            })?;
        let store = GridBufferStore::new(extent)?;
        let constants = config.constants();
        let dispatch = Dispatch::from_flag(config.parallel);

        log::info!(
            "scheduler ready: {}x{} grid, dx {:.4e} m, dt {:.4e} s, Courant {:.4}, \
             mur1 {:.5}, mur2 ({:.5}, {:.5}, {:.5}), {:?} boundary, {:?} dispatch",
            extent.width(),
            extent.height(),
            constants.dx,
            constants.dt,
            constants.courant_number(),
            constants.mur1,
            constants.mur2a,
            constants.mur2b,
            constants.mur2c,
            config.boundary_order,
            dispatch,
        );

        let mut frame = Frame::new(extent, OutputChannel::E);
        frame.capture(store.field(), OutputChannel::E, dispatch);

        Ok(Self {
            engine: FieldUpdateEngine::new(BoundaryModule::new(config.boundary_order)),
            geometry: GeometryEditor::new(),
            sources: SourceInjector::new(),
            obstacles: ObstacleSet::new(
                config.obstacle_centers,
                config.obstacle_reset_radius,
                config.min_radius,
            ),
            excitation: Excitation::new(&config),
            mode: MaterialMode::default(),
            channel: OutputChannel::E,
            state: SchedulerState::Idle,
            step_pending: false,
            tick_id: TickId::default(),
            metrics: TickMetrics {
                memory_bytes: store.memory_bytes(),
                ..TickMetrics::default()
            },
            ingress: CommandQueue::new(config.ingress_capacity),
            frame,
            store,
            constants,
            dispatch,
            config,
        })
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Configuration the scheduler was built from.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Derived coefficients.
    pub fn constants(&self) -> &SolverConstants {
        &self.constants
    }

    /// Current run state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Id of the last tick that ran; `TickId(0)` before the first.
    pub fn tick_id(&self) -> TickId {
        self.tick_id
    }

    /// Read-only view of every grid.
    pub fn store(&self) -> &GridBufferStore {
        &self.store
    }

    /// The most recently published frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Metrics of the most recent tick.
    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }

    /// Both obstacles.
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Point source settings and the phase clock.
    pub fn excitation(&self) -> &Excitation {
        &self.excitation
    }

    /// What the obstacles paint.
    pub fn material_mode(&self) -> MaterialMode {
        self.mode
    }

    /// Published channel.
    pub fn output_channel(&self) -> OutputChannel {
        self.channel
    }

    /// A handle that queues commands for the start of the next
    /// [`advance`](Self::advance).
    pub fn command_sender(&self) -> CommandSender {
        self.ingress.sender()
    }

    // ── Commands ────────────────────────────────────────────────

    /// Apply one command now, between ticks.
    pub fn apply(&mut self, command: Command) -> Receipt {
        self.apply_indexed(0, command)
    }

    /// Apply a batch in order; receipts carry each command's batch index.
    pub fn apply_batch(&mut self, commands: Vec<Command>) -> Vec<Receipt> {
        commands
            .into_iter()
            .enumerate()
            .map(|(i, c)| self.apply_indexed(i, c))
            .collect()
    }

    fn apply_indexed(&mut self, index: usize, command: Command) -> Receipt {
        let kind = command.payload.kind();
        if let Err(reason) = self.check(&command.payload) {
            self.metrics.commands_rejected += 1;
            log::debug!("command {kind} rejected: {reason}");
            return Receipt::rejected(index, reason);
        }
        self.execute(command.payload);
        self.metrics.commands_applied += 1;
        log::debug!("command {kind} applied, state {}", self.state);
        Receipt::accepted(index, Some(self.tick_id.next()))
    }

    fn check(&self, payload: &CommandPayload) -> Result<(), IngressError> {
        let finite = |ok: bool| {
            if ok {
                Ok(())
            } else {
                Err(IngressError::NonFiniteArgument)
            }
        };
        match payload {
            CommandPayload::MoveObstacle { obstacle, center } => {
                obstacle.slot().ok_or(IngressError::UnknownObstacle)?;
                finite(center.is_finite())
            }
            CommandPayload::ResizeObstacle { obstacle, radius } => {
                obstacle.slot().ok_or(IngressError::UnknownObstacle)?;
                finite(radius.is_finite())
            }
            CommandPayload::WriteRegion { rect, value, .. } => {
                self.store
                    .extent()
                    .check_rect(rect)
                    .map_err(|_| IngressError::InvalidRegion)?;
                finite(value.is_finite())
            }
            CommandPayload::MoveSource { position } => finite(position.is_finite()),
            CommandPayload::SetSourceAmplitude { amplitude } => finite(amplitude.is_finite()),
            CommandPayload::SetPhaseIncrement { increment } => finite(increment.is_finite()),
            _ => Ok(()),
        }
    }

    fn execute(&mut self, payload: CommandPayload) {
        let dispatch = self.dispatch;
        match payload {
            CommandPayload::Start => self.control(Control::Start),
            CommandPayload::Pause => self.control(Control::Pause),
            CommandPayload::TogglePause => self.control(Control::TogglePause),
            CommandPayload::StepOnce => self.control(Control::StepOnce),
            CommandPayload::Reset => self.reset(),

            CommandPayload::SetWriteEnabled { enabled } => {
                if enabled {
                    self.control(Control::ArmWrite);
                    if self.mode == MaterialMode::LineSource {
                        self.lay_line_source();
                    }
                } else {
                    self.control(Control::DisarmWrite);
                }
            }
            CommandPayload::SetMaterialMode { mode } => self.mode = mode,
            CommandPayload::MoveObstacle { obstacle, center } => {
                if let Some(slot) = obstacle.slot() {
                    self.obstacles.move_to(slot, center);
                }
            }
            CommandPayload::ResizeObstacle { obstacle, radius } => {
                if let Some(slot) = obstacle.slot() {
                    self.obstacles.resize(slot, radius);
                }
            }
            CommandPayload::ResetObstacles => {
                self.obstacles.reset_radii(self.config.obstacle_reset_radius)
            }
            CommandPayload::Join { toward_first } => {
                if self.mode == MaterialMode::LineSource {
                    log::debug!("join ignored in line-source mode");
                } else {
                    self.obstacles.start_join(toward_first);
                }
            }
            CommandPayload::ClearGeometry => {
                self.geometry.initialize_to_vacuum(&mut self.store, dispatch);
                self.control(Control::DisarmWrite);
            }
            CommandPayload::WriteRegion {
                rect,
                property,
                value,
            } => {
                self.geometry
                    .write_region(&mut self.store, &Shape::Rect(rect), property, value, dispatch);
            }

            CommandPayload::SetSourceActive { active } => self.excitation.set_active(active),
            CommandPayload::MoveSource { position } => self.excitation.move_to(position),
            CommandPayload::SetSourceAmplitude { amplitude } => {
                self.excitation.set_amplitude(amplitude);
            }
            CommandPayload::NudgeSourceAmplitude { steps } => {
                self.excitation.nudge_amplitude(steps)
            }
            CommandPayload::SetPersistence { persist } => self.excitation.set_persistence(persist),
            CommandPayload::ClearSources => self.clear_sources(),
            CommandPayload::LayBarSource => self.lay_bar_source(),
            CommandPayload::SetPhaseIncrement { increment } => {
                self.excitation.set_increment(increment);
            }
            CommandPayload::NudgePhaseIncrement { steps } => {
                self.excitation.nudge_increment(steps)
            }

            CommandPayload::SetOutputChannel { channel } => {
                self.channel = channel;
                self.frame.capture(self.store.field(), channel, dispatch);
            }
        }
    }

    fn control(&mut self, control: Control) {
        let t = self.state.transition(control);
        if t.next != self.state {
            log::debug!("state {} -> {} on {control:?}", self.state, t.next);
        }
        self.state = t.next;
        if t.single_step {
            self.step_pending = true;
        }
    }

    fn lay_line_source(&mut self) {
        let [a, b] = self.obstacles.all();
        let line = LineSource {
            segment: Segment::new(a.center(), b.center()),
            radius: self.excitation.radius(),
            amplitude: self.excitation.amplitude(),
        };
        self.sources.clear(self.store.accessory_mut(), self.dispatch);
        self.sources
            .lay_line_source(self.store.accessory_mut(), &line, self.dispatch);
        self.excitation.mark_line_laid();
    }

    fn lay_bar_source(&mut self) {
        let bar = self.excitation.bar_sources();
        for point in &bar {
            self.sources
                .update_persistent_map(self.store.accessory_mut(), point, 1.0, self.dispatch);
        }
        log::debug!("bar source laid with {} points", bar.len());
    }

    fn clear_sources(&mut self) {
        let mut silent = self.excitation.point_source();
        silent.amplitude = 0.0;
        self.sources
            .update_persistent_map(self.store.accessory_mut(), &silent, 0.0, self.dispatch);
        self.excitation.mark_cleared();
        log::debug!("source map cleared");
    }

    // ── Ticks ───────────────────────────────────────────────────

    /// Drain queued commands, then run one tick if the state allows it.
    ///
    /// `elapsed_secs` is the wall time since the previous call. Values
    /// above `max_elapsed_secs`, and NaN, skip the tick entirely; a
    /// pending single step stays pending.
    pub fn advance(&mut self, elapsed_secs: f64) -> Result<TickReport, StepError> {
        let receipts = self.apply_batch(self.ingress.drain());

        if !(elapsed_secs <= self.config.max_elapsed_secs) {
            self.metrics.skipped_ticks += 1;
            log::warn!(
                "tick skipped: {elapsed_secs} s elapsed exceeds {} s",
                self.config.max_elapsed_secs
            );
            return Ok(TickReport {
                outcome: TickOutcome::Skipped { elapsed_secs },
                receipts,
            });
        }

        let outcome = if self.state.is_running() || self.step_pending {
            let tick_id = self.tick()?;
            self.step_pending = false;
            TickOutcome::Ticked { tick_id }
        } else if self.state == SchedulerState::Idle {
            TickOutcome::Idle
        } else {
            TickOutcome::Paused
        };
        Ok(TickReport { outcome, receipts })
    }

    /// Run one tick regardless of the run state.
    pub fn tick(&mut self) -> Result<TickId, StepError> {
        let tick_start = Instant::now();
        let tick_id = self.tick_id.next();
        self.metrics.begin_tick(tick_id);
        let dispatch = self.dispatch;

        // 1. Geometry.
        let geometry_start = Instant::now();
        if self.state.writes_armed() {
            for trail in self.obstacles.trails(self.mode, self.config.dielectric_paint) {
                self.geometry.move_obstacle(
                    &mut self.store,
                    trail.old,
                    trail.new,
                    trail.property,
                    trail.value,
                    dispatch,
                );
            }
        }
        self.obstacles.commit();
        self.obstacles.step_join();
        self.metrics.geometry_us = geometry_start.elapsed().as_micros() as u64;

        // 2. Phase.
        let phase = self.excitation.advance_phase();

        // 3. Sources.
        let source_start = Instant::now();
        if self.excitation.is_active() {
            self.sources.update_persistent_map(
                self.store.accessory_mut(),
                &self.excitation.point_source(),
                self.excitation.persist(),
                dispatch,
            );
        }
        if self.excitation.injects() {
            let grids = self.store.split_mut();
            self.sources
                .apply_to_field(grids.field, grids.accessory, phase, dispatch)
                .map_err(|e| kernel_failed("apply_sources", e))?;
        }
        self.metrics.source_us = source_start.elapsed().as_micros() as u64;
        log::trace!("tick {tick_id}: geometry and sources done, phase {phase:.3}");

        // 4. Leapfrog steps.
        let ctx = PassContext::new(&self.constants, dispatch);
        for _ in 0..self.config.steps_per_tick {
            let mut grids = self.store.split_mut();

            let h_start = Instant::now();
            self.engine
                .h_update(&mut grids, &ctx)
                .map_err(|e| kernel_failed(LeapfrogPhase::HUpdate.name(), e))?;
            self.metrics.h_update_us += h_start.elapsed().as_micros() as u64;

            let e_start = Instant::now();
            self.engine
                .e_update(&mut grids, &ctx)
                .map_err(|e| kernel_failed(LeapfrogPhase::EUpdate.name(), e))?;
            self.metrics.e_update_us += e_start.elapsed().as_micros() as u64;
        }

        // 5. Finiteness probe.
        if self.config.check_finite {
            if let Some(i) = first_non_finite(self.store.field(), dispatch) {
                let (x, y) = self.store.extent().coords(i);
                self.metrics.non_finite_ticks += 1;
                log::warn!("non-finite field at cell ({x}, {y}) after tick {tick_id}");
            }
        }

        // 6. Output.
        let output_start = Instant::now();
        self.frame.capture(self.store.field(), self.channel, dispatch);
        self.metrics.output_us = output_start.elapsed().as_micros() as u64;

        self.tick_id = tick_id;
        self.metrics.memory_bytes = self.store.memory_bytes();
        self.metrics.total_us = tick_start.elapsed().as_micros() as u64;
        log::trace!("tick {tick_id} published in {} us", self.metrics.total_us);
        Ok(tick_id)
    }

    /// Zero the fields and history, clear the sources, restore vacuum.
    ///
    /// The run state, obstacles and source settings are kept. Repeating
    /// a reset with no tick in between changes nothing.
    pub fn reset(&mut self) {
        let dispatch = self.dispatch;
        self.engine.clear_fields(&mut self.store, dispatch);
        self.geometry.initialize_to_vacuum(&mut self.store, dispatch);
        self.sources.clear(self.store.accessory_mut(), dispatch);
        self.excitation.mark_cleared();
        self.obstacles.cancel_join();
        self.obstacles.commit();
        self.frame.capture(self.store.field(), self.channel, dispatch);
        log::info!("solver reset at tick {}", self.tick_id);
    }
}

impl fmt::Debug for StepScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepScheduler")
            .field("extent", &self.store.extent())
            .field("state", &self.state)
            .field("tick_id", &self.tick_id)
            .field("mode", &self.mode)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

fn kernel_failed(name: &str, reason: KernelError) -> StepError {
    StepError::KernelFailed {
        name: name.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::{CellRect, MaterialProperty, ObstacleId, Point2, PEC};

    fn small() -> StepScheduler {
        StepScheduler::new(SolverConfig {
            width: 32,
            height: 32,
            parallel: false,
            ..SolverConfig::default()
        })
        .unwrap()
    }

    fn cmd(payload: CommandPayload) -> Command {
        payload.into()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn invalid_config_is_rejected() {
        let err = StepScheduler::new(SolverConfig {
            width: 1,
            ..SolverConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::GridTooSmall { .. }));
    }

    #[test]
    fn starts_idle_with_zero_frame() {
        let mut s = small();
        assert_eq!(s.state(), SchedulerState::Idle);
        assert_eq!(s.frame().peak_abs(), 0.0);
        assert_eq!(s.advance(0.01).unwrap().outcome, TickOutcome::Idle);
        assert_eq!(s.tick_id(), TickId(0));
    }

    // ── Commands ────────────────────────────────────────────────

    #[test]
    fn rejects_unknown_obstacle_and_bad_numbers() {
        let mut s = small();
        let r = s.apply(cmd(CommandPayload::MoveObstacle {
            obstacle: ObstacleId(7),
            center: Point2::new(0.0, 0.0),
        }));
        assert_eq!(r.reason_code, Some(IngressError::UnknownObstacle));
        let r = s.apply(cmd(CommandPayload::SetSourceAmplitude {
            amplitude: f32::NAN,
        }));
        assert_eq!(r.reason_code, Some(IngressError::NonFiniteArgument));
        let r = s.apply(cmd(CommandPayload::WriteRegion {
            rect: CellRect::new(0, 0, 40, 4),
            property: MaterialProperty::MaterialFlag,
            value: PEC,
        }));
        assert_eq!(r.reason_code, Some(IngressError::InvalidRegion));
        assert_eq!(s.metrics().commands_rejected, 3);
    }

    #[test]
    fn batch_receipts_keep_indices() {
        let mut s = small();
        let receipts = s.apply_batch(vec![
            cmd(CommandPayload::Start),
            cmd(CommandPayload::ResizeObstacle {
                obstacle: ObstacleId(2),
                radius: 0.1,
            }),
            cmd(CommandPayload::Pause),
        ]);
        let idx: Vec<_> = receipts.iter().map(|r| (r.command_index, r.accepted)).collect();
        assert_eq!(idx, [(0, true), (1, false), (2, true)]);
        assert_eq!(receipts[0].applied_tick_id, Some(TickId(1)));
    }

    #[test]
    fn write_region_paints_immediately() {
        let mut s = small();
        let r = s.apply(cmd(CommandPayload::WriteRegion {
            rect: CellRect::new(4, 4, 6, 6),
            property: MaterialProperty::MaterialFlag,
            value: PEC,
        }));
        assert!(r.accepted);
        let view = s.store().field().read();
        assert!(view.at(5, 5).is_pec());
        assert!(!view.at(7, 5).is_pec());
    }

    #[test]
    fn output_channel_switch_republishes() {
        let mut s = small();
        s.apply(cmd(CommandPayload::SetOutputChannel {
            channel: OutputChannel::HMagnitude,
        }));
        assert_eq!(s.frame().channel(), OutputChannel::HMagnitude);
        assert_eq!(s.output_channel(), OutputChannel::HMagnitude);
    }

    #[test]
    fn join_is_ignored_in_line_source_mode() {
        let mut s = small();
        s.apply(cmd(CommandPayload::SetMaterialMode {
            mode: MaterialMode::LineSource,
        }));
        s.apply(cmd(CommandPayload::Join { toward_first: false }));
        assert!(s.obstacles().join().is_none());
        s.apply(cmd(CommandPayload::SetMaterialMode {
            mode: MaterialMode::Pec,
        }));
        s.apply(cmd(CommandPayload::Join { toward_first: false }));
        assert!(s.obstacles().join().is_some());
    }

    // ── Ticks ───────────────────────────────────────────────────

    #[test]
    fn oversized_elapsed_skips() {
        let mut s = small();
        s.apply(cmd(CommandPayload::Start));
        let r = s.advance(1.5).unwrap();
        assert_eq!(r.outcome, TickOutcome::Skipped { elapsed_secs: 1.5 });
        assert!(matches!(
            s.advance(f64::NAN).unwrap().outcome,
            TickOutcome::Skipped { .. }
        ));
        assert_eq!(s.metrics().skipped_ticks, 2);
        assert_eq!(s.tick_id(), TickId(0));
        assert!(matches!(
            s.advance(1.0).unwrap().outcome,
            TickOutcome::Ticked { .. }
        ));
    }

    #[test]
    fn step_once_runs_exactly_one_tick() {
        let mut s = small();
        s.apply(cmd(CommandPayload::StepOnce));
        assert_eq!(s.state(), SchedulerState::Paused { editing: false });
        assert_eq!(
            s.advance(0.01).unwrap().outcome,
            TickOutcome::Ticked { tick_id: TickId(1) }
        );
        assert_eq!(s.advance(0.01).unwrap().outcome, TickOutcome::Paused);
        assert_eq!(s.tick_id(), TickId(1));
    }

    #[test]
    fn step_once_survives_a_skipped_call() {
        let mut s = small();
        s.apply(cmd(CommandPayload::StepOnce));
        assert!(matches!(
            s.advance(10.0).unwrap().outcome,
            TickOutcome::Skipped { .. }
        ));
        assert!(matches!(
            s.advance(0.0).unwrap().outcome,
            TickOutcome::Ticked { .. }
        ));
    }

    #[test]
    fn queued_commands_apply_before_the_tick() {
        let mut s = small();
        let tx = s.command_sender();
        tx.submit(CommandPayload::SetSourceActive { active: true }).unwrap();
        // centre of cell (16, 16) on a 32x32 grid
        tx.submit(CommandPayload::MoveSource {
            position: Point2::new(0.03125, 0.03125),
        })
        .unwrap();
        tx.submit(CommandPayload::Start).unwrap();
        let report = s.advance(0.016).unwrap();
        assert_eq!(report.receipts.len(), 3);
        assert!(report.receipts.iter().all(|r| r.accepted));
        assert_eq!(report.outcome, TickOutcome::Ticked { tick_id: TickId(1) });
        assert!(s.store().accessory().read().at(16, 16).source_amplitude > 0.0);
        assert!(s.frame().peak_abs() > 0.0);
    }

    #[test]
    fn metrics_track_the_last_tick() {
        let mut s = small();
        s.tick().unwrap();
        s.tick().unwrap();
        let m = s.metrics();
        assert_eq!(m.tick_id, TickId(2));
        assert_eq!(m.memory_bytes, s.store().memory_bytes());
        assert!(m.total_us >= m.output_us);
    }

    #[test]
    fn armed_pec_mode_paints_writer_trail() {
        let mut s = small();
        s.apply(cmd(CommandPayload::SetWriteEnabled { enabled: true }));
        assert_eq!(s.state(), SchedulerState::Editing);
        s.tick().unwrap();
        let extent = s.store().extent();
        let writer = s.obstacles().all()[1].center();
        let eraser = s.obstacles().all()[0].center();
        let (wx, wy) = extent.cell_at(writer).unwrap();
        let (ex, ey) = extent.cell_at(eraser).unwrap();
        let view = s.store().field().read();
        assert!(view.at(wx, wy).is_pec());
        assert!(!view.at(ex, ey).is_pec());
    }

    #[test]
    fn line_source_mode_lays_segment_and_injects() {
        let mut s = small();
        s.apply(cmd(CommandPayload::SetMaterialMode {
            mode: MaterialMode::LineSource,
        }));
        s.apply(cmd(CommandPayload::SetWriteEnabled { enabled: true }));
        assert!(s.excitation().injects());
        let extent = s.store().extent();
        let (mx, my) = extent.cell_at(Point2::new(0.0, 0.2)).unwrap();
        assert!(s.store().accessory().read().at(mx, my).source_amplitude > 0.0);
        s.tick().unwrap();
        assert!(s.frame().peak_abs() > 0.0);
    }

    #[test]
    fn clear_sources_stops_injection() {
        let mut s = small();
        s.apply(cmd(CommandPayload::SetSourceActive { active: true }));
        s.tick().unwrap();
        s.apply(cmd(CommandPayload::SetSourceActive { active: false }));
        s.apply(cmd(CommandPayload::ClearSources));
        assert!(s
            .store()
            .accessory()
            .read()
            .cells()
            .iter()
            .all(|c| c.source_amplitude == 0.0));
        assert!(!s.excitation().injects());
    }

    #[test]
    fn bar_source_holds_a_row_and_injects() {
        let mut s = StepScheduler::new(SolverConfig {
            width: 128,
            height: 128,
            parallel: false,
            ..SolverConfig::default()
        })
        .unwrap();
        s.apply(cmd(CommandPayload::SetSourceAmplitude { amplitude: 1.5 }));
        assert!(s.apply(cmd(CommandPayload::LayBarSource)).accepted);
        let min = s.config().source_amplitude_range.min;
        assert_eq!(s.excitation().amplitude(), min);
        assert_eq!(s.excitation().persist(), 1.0);
        assert!(s.excitation().injects());
        let extent = s.store().extent();
        {
            let acc = s.store().accessory().read();
            for x in [-0.44f32, 0.0, 0.49] {
                let (cx, cy) = extent.cell_at(Point2::new(x, 0.8)).unwrap();
                assert!(acc.at(cx, cy).source_amplitude > 0.0, "x = {x}");
                assert!(acc.at(cx, cy).source_amplitude <= min);
            }
            let (cx, cy) = extent.cell_at(Point2::new(0.0, 0.0)).unwrap();
            assert_eq!(acc.at(cx, cy).source_amplitude, 0.0);
            let (cx, cy) = extent.cell_at(Point2::new(-0.8, 0.8)).unwrap();
            assert_eq!(acc.at(cx, cy).source_amplitude, 0.0);
        }
        s.tick().unwrap();
        s.tick().unwrap();
        assert!(s.frame().peak_abs() > 0.0);
    }

    #[test]
    fn reset_keeps_state_and_clears_grids() {
        let mut s = small();
        s.apply(cmd(CommandPayload::SetSourceActive { active: true }));
        s.apply(cmd(CommandPayload::Start));
        for _ in 0..5 {
            s.advance(0.016).unwrap();
        }
        s.apply(cmd(CommandPayload::Reset));
        assert_eq!(s.state(), SchedulerState::Stepping);
        assert_eq!(s.frame().peak_abs(), 0.0);
        assert!(s
            .store()
            .field()
            .read()
            .cells()
            .iter()
            .all(|c| c.ez == 0.0 && c.hx == 0.0 && c.hy == 0.0 && c.material == 1.0));
    }

    #[test]
    fn debug_names_state() {
        let s = small();
        assert!(format!("{s:?}").contains("Idle"));
    }
}
