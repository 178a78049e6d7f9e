//! Command, command payload, and receipt types for the scheduler ingress.

use crate::error::IngressError;
use crate::geom::{CellRect, Point2};
use crate::id::{ObstacleId, TickId};
use crate::mode::{MaterialMode, MaterialProperty, OutputChannel};

/// A command submitted to the scheduler.
///
/// Commands are applied in arrival order at the start of the next tick.
///
/// # Examples
///
/// ```
/// use ripple_core::{Command, CommandPayload, Point2};
///
/// let cmd = Command::new(CommandPayload::MoveSource {
///     position: Point2::new(0.25, -0.5),
/// });
/// assert_eq!(cmd.arrival_seq, 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// The operation to perform.
    pub payload: CommandPayload,
    /// Optional identifier of the submitting interaction source.
    pub source_id: Option<u64>,
    /// Monotonic arrival sequence number, set by the ingress queue.
    pub arrival_seq: u64,
}

impl Command {
    /// Wrap a payload with no source id and a zero arrival sequence.
    pub fn new(payload: CommandPayload) -> Self {
        Self {
            payload,
            source_id: None,
            arrival_seq: 0,
        }
    }
}

impl From<CommandPayload> for Command {
    fn from(payload: CommandPayload) -> Self {
        Self::new(payload)
    }
}

/// All command payloads.
///
/// Control variants drive the scheduler state; the remaining variants
/// edit geometry, the source, or the output selection.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandPayload {
    // --- control ---
    /// Start free-running from `Idle`, or resume from `Paused`.
    Start,
    /// Stop free-running; the fields are kept.
    Pause,
    /// Pause when running, resume when paused.
    TogglePause,
    /// Run exactly one tick and leave the scheduler paused.
    StepOnce,
    /// Zero every field grid, clear the sources, restore vacuum.
    Reset,

    // --- geometry ---
    /// Arm or disarm obstacle painting.
    SetWriteEnabled {
        /// `true` arms writes.
        enabled: bool,
    },
    /// Select what the obstacles paint.
    SetMaterialMode {
        /// The new paint mode.
        mode: MaterialMode,
    },
    /// Move an obstacle. The centre is clamped so the obstacle stays inside the domain.
    MoveObstacle {
        /// Which obstacle.
        obstacle: ObstacleId,
        /// New centre in normalized coordinates.
        center: Point2,
    },
    /// Resize an obstacle. The radius is clamped to the configured minimum.
    ResizeObstacle {
        /// Which obstacle.
        obstacle: ObstacleId,
        /// New radius in normalized units.
        radius: f32,
    },
    /// Restore both obstacle radii to their reset value.
    ResetObstacles,
    /// Glide one obstacle toward the other, painting along the way.
    Join {
        /// `true` moves the second obstacle toward the first.
        toward_first: bool,
    },
    /// Restore vacuum everywhere and disarm writes.
    ClearGeometry,
    /// Paint a rectangle of cells with a property value.
    WriteRegion {
        /// Inclusive cell bounds.
        rect: CellRect,
        /// Which property to write.
        property: MaterialProperty,
        /// Value to write.
        value: f32,
    },

    // --- source ---
    /// Enable or disable the interactive point source.
    SetSourceActive {
        /// `true` enables the source.
        active: bool,
    },
    /// Move the interactive point source.
    MoveSource {
        /// New position in normalized coordinates.
        position: Point2,
    },
    /// Set the source amplitude. Clamped to the configured range.
    SetSourceAmplitude {
        /// New amplitude.
        amplitude: f32,
    },
    /// Step the source amplitude by a signed number of nudge increments.
    NudgeSourceAmplitude {
        /// Signed increment count.
        steps: i32,
    },
    /// Keep previously laid sources when the source moves.
    SetPersistence {
        /// `true` holds old sources at full strength.
        persist: bool,
    },
    /// Clear every laid source, including line sources.
    ClearSources,
    /// Hold a horizontal bar of weak point sources near the top edge.
    ///
    /// Drops the amplitude to its minimum, forces persistence on and
    /// switches the point source on at the right end of the bar.
    LayBarSource,
    /// Set the per-tick phase increment. Clamped to the configured range.
    SetPhaseIncrement {
        /// Radians per tick.
        increment: f32,
    },
    /// Step the phase increment by a signed number of nudge increments.
    NudgePhaseIncrement {
        /// Signed increment count.
        steps: i32,
    },

    // --- output ---
    /// Select the published channel.
    SetOutputChannel {
        /// The new channel.
        channel: OutputChannel,
    },
}

impl CommandPayload {
    /// Short, stable name of this payload kind for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::TogglePause => "toggle_pause",
            Self::StepOnce => "step_once",
            Self::Reset => "reset",
            Self::SetWriteEnabled { .. } => "set_write_enabled",
            Self::SetMaterialMode { .. } => "set_material_mode",
            Self::MoveObstacle { .. } => "move_obstacle",
            Self::ResizeObstacle { .. } => "resize_obstacle",
            Self::ResetObstacles => "reset_obstacles",
            Self::Join { .. } => "join",
            Self::ClearGeometry => "clear_geometry",
            Self::WriteRegion { .. } => "write_region",
            Self::SetSourceActive { .. } => "set_source_active",
            Self::MoveSource { .. } => "move_source",
            Self::SetSourceAmplitude { .. } => "set_source_amplitude",
            Self::NudgeSourceAmplitude { .. } => "nudge_source_amplitude",
            Self::SetPersistence { .. } => "set_persistence",
            Self::ClearSources => "clear_sources",
            Self::LayBarSource => "lay_bar_source",
            Self::SetPhaseIncrement { .. } => "set_phase_increment",
            Self::NudgePhaseIncrement { .. } => "nudge_phase_increment",
            Self::SetOutputChannel { .. } => "set_output_channel",
        }
    }
}

/// Receipt returned for each applied or rejected command.
///
/// # Examples
///
/// ```
/// use ripple_core::{Receipt, TickId};
///
/// let receipt = Receipt {
///     accepted: true,
///     applied_tick_id: Some(TickId(5)),
///     reason_code: None,
///     command_index: 0,
/// };
/// assert!(receipt.accepted);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Whether the command was accepted.
    pub accepted: bool,
    /// The tick whose start applied the command, if any.
    pub applied_tick_id: Option<TickId>,
    /// The reason the command was rejected, if applicable.
    pub reason_code: Option<IngressError>,
    /// Index of this command within its batch.
    pub command_index: usize,
}

impl Receipt {
    /// An accepted receipt.
    pub fn accepted(command_index: usize, applied_tick_id: Option<TickId>) -> Self {
        Self {
            accepted: true,
            applied_tick_id,
            reason_code: None,
            command_index,
        }
    }

    /// A rejected receipt.
    pub fn rejected(command_index: usize, reason: IngressError) -> Self {
        Self {
            accepted: false,
            applied_tick_id: None,
            reason_code: Some(reason),
            command_index,
        }
    }
}
