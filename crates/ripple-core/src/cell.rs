//! Per-cell layouts stored in the grid buffer pairs.
//!
//! Each buffer pair stores one of these layouts per cell. Layouts are
//! small `Copy` records so kernels can read neighbours by value and
//! write a fresh record per cell into the staging buffer.

/// Material flag of a perfect electric conductor.
pub const PEC: f32 = 0.0;

/// Material flag of free space (or a dielectric).
pub const VACUUM: f32 = 1.0;

/// A fixed-width record stored once per grid cell.
///
/// `CHANNELS` is the number of scalar channels in the record and is used
/// for memory accounting and allocation diagnostics.
pub trait CellLayout: Copy + Default + Send + Sync + 'static {
    /// Number of scalar channels per cell.
    const CHANNELS: usize;
}

/// Primary field record: electric field, both magnetic components, and
/// the material flag.
///
/// `material` is `0.0` for a perfect conductor and `1.0` otherwise. The
/// E update multiplies by it, so a conducting cell always carries
/// `ez == 0.0` after an E update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldCell {
    /// Out-of-plane electric field.
    pub ez: f32,
    /// In-plane magnetic field, x component.
    pub hx: f32,
    /// In-plane magnetic field, y component.
    pub hy: f32,
    /// Material flag: [`PEC`] or [`VACUUM`].
    pub material: f32,
}

impl FieldCell {
    /// Whether this cell is a perfect conductor.
    pub fn is_pec(&self) -> bool {
        self.material == PEC
    }

    /// This cell with all field components cleared and the material kept.
    pub fn with_fields_cleared(self) -> Self {
        Self {
            ez: 0.0,
            hx: 0.0,
            hy: 0.0,
            material: self.material,
        }
    }
}

impl Default for FieldCell {
    fn default() -> Self {
        Self {
            ez: 0.0,
            hx: 0.0,
            hy: 0.0,
            material: VACUUM,
        }
    }
}

impl CellLayout for FieldCell {
    const CHANNELS: usize = 4;
}

/// Accessory record: the persistent source map and relative permittivity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccessoryCell {
    /// Source amplitude laid at this cell.
    pub source_amplitude: f32,
    /// Source phase offset. Stored for completeness; injection is
    /// monochromatic and does not read it.
    pub source_phase_offset: f32,
    /// Relative permittivity, `>= 1.0`.
    pub dielectric: f32,
}

impl AccessoryCell {
    /// This cell with the source channels cleared and permittivity kept.
    pub fn with_source_cleared(self) -> Self {
        Self {
            source_amplitude: 0.0,
            source_phase_offset: 0.0,
            dielectric: self.dielectric,
        }
    }
}

impl Default for AccessoryCell {
    fn default() -> Self {
        Self {
            source_amplitude: 0.0,
            source_phase_offset: 0.0,
            dielectric: 1.0,
        }
    }
}

impl CellLayout for AccessoryCell {
    const CHANNELS: usize = 3;
}

/// One-step-delayed copy of the primary field record.
///
/// Only `ez` is consumed (by the second-order absorbing boundary); the
/// magnetic components are kept so the history is a faithful snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HistoryCell {
    /// Electric field one step ago.
    pub ez: f32,
    /// Magnetic x component one step ago.
    pub hx: f32,
    /// Magnetic y component one step ago.
    pub hy: f32,
}

impl From<FieldCell> for HistoryCell {
    fn from(cell: FieldCell) -> Self {
        Self {
            ez: cell.ez,
            hx: cell.hx,
            hy: cell.hy,
        }
    }
}

impl CellLayout for HistoryCell {
    const CHANNELS: usize = 3;
}
