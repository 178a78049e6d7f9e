//! Painting conductors and dielectrics into the material grids.

use ripple_arena::{Dispatch, GridBufferStore};
use ripple_core::{MaterialProperty, VACUUM};
use ripple_space::{Circle, Footprint, Shape};

/// Writes material flags and permittivity.
///
/// Every write is a full-grid pass that copies untouched cells verbatim,
/// so cells outside the shape keep their exact previous bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometryEditor;

impl GeometryEditor {
    /// Create an editor.
    pub fn new() -> Self {
        Self
    }

    /// Set `property` to `value` on every cell covered by `shape`.
    pub fn write_region(
        &self,
        store: &mut GridBufferStore,
        shape: &Shape,
        property: MaterialProperty,
        value: f32,
        dispatch: Dispatch,
    ) {
        let extent = store.extent();
        match property {
            MaterialProperty::MaterialFlag => store.field_mut().pass(dispatch, |f, x, y| {
                let mut cell = f.at(x, y);
                if shape.covers(&extent, x, y) {
                    cell.material = value;
                }
                cell
            }),
            MaterialProperty::Dielectric => store.accessory_mut().pass(dispatch, |a, x, y| {
                let mut cell = a.at(x, y);
                if shape.covers(&extent, x, y) {
                    cell.dielectric = value;
                }
                cell
            }),
        }
    }

    /// Paint the union of an obstacle's old and new footprints.
    ///
    /// The union leaves no gap between frames when the obstacle moves
    /// faster than its own diameter. This never erases: only covered
    /// cells change, and they all take `paint`.
    pub fn move_obstacle(
        &self,
        store: &mut GridBufferStore,
        old: Circle,
        new: Circle,
        property: MaterialProperty,
        paint: f32,
        dispatch: Dispatch,
    ) {
        let shape = Shape::Footprint(Footprint::union(old, new));
        self.write_region(store, &shape, property, paint, dispatch);
    }

    /// Restore vacuum material and unit permittivity everywhere.
    pub fn initialize_to_vacuum(&self, store: &mut GridBufferStore, dispatch: Dispatch) {
        store.field_mut().pass(dispatch, |f, x, y| {
            let mut cell = f.at(x, y);
            cell.material = VACUUM;
            cell
        });
        store.accessory_mut().pass(dispatch, |a, x, y| {
            let mut cell = a.at(x, y);
            cell.dielectric = 1.0;
            cell
        });
        log::debug!("geometry restored to vacuum");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::{CellRect, Point2, PEC};
    use ripple_space::GridExtent;

    fn store(n: u32) -> GridBufferStore {
        GridBufferStore::new(GridExtent::new(n, n).unwrap()).unwrap()
    }

    #[test]
    fn rect_write_is_inclusive_and_exact() {
        let ed = GeometryEditor::new();
        let mut s = store(10);
        let rect = CellRect::new(2, 3, 6, 7);
        ed.write_region(
            &mut s,
            &Shape::Rect(rect),
            MaterialProperty::MaterialFlag,
            PEC,
            Dispatch::Sequential,
        );
        let view = s.field().read();
        for y in 0..10 {
            for x in 0..10 {
                let want = if rect.contains(x, y) { PEC } else { VACUUM };
                assert_eq!(view.at(x, y).material, want, "({x}, {y})");
            }
        }
    }

    #[test]
    fn dielectric_write_leaves_field_grid_alone() {
        let ed = GeometryEditor::new();
        let mut s = store(8);
        let before = s.field().read().cells().to_vec();
        ed.write_region(
            &mut s,
            &Shape::Rect(CellRect::new(0, 0, 7, 7)),
            MaterialProperty::Dielectric,
            3.0,
            Dispatch::Parallel,
        );
        assert_eq!(s.field().read().cells(), before.as_slice());
        assert!(s.accessory().read().cells().iter().all(|c| c.dielectric == 3.0));
    }

    #[test]
    fn move_obstacle_paints_both_ends() {
        let ed = GeometryEditor::new();
        let mut s = store(32);
        let old = Circle::new(Point2::new(-0.5, 0.0), 0.1);
        let new = Circle::new(Point2::new(0.5, 0.0), 0.1);
        ed.move_obstacle(
            &mut s,
            old,
            new,
            MaterialProperty::MaterialFlag,
            PEC,
            Dispatch::Sequential,
        );
        let extent = s.extent();
        let view = s.field().read();
        let (ox, oy) = extent.cell_at(old.center()).unwrap();
        let (nx, ny) = extent.cell_at(new.center()).unwrap();
        assert!(view.at(ox, oy).is_pec());
        assert!(view.at(nx, ny).is_pec());
        let (mx, my) = extent.cell_at(Point2::new(0.0, 0.0)).unwrap();
        assert!(!view.at(mx, my).is_pec());
    }

    #[test]
    fn vacuum_reset_keeps_fields() {
        let ed = GeometryEditor::new();
        let mut s = store(6);
        s.field_mut().pass(Dispatch::Sequential, |f, x, y| {
            let mut c = f.at(x, y);
            c.ez = 0.5;
            c.material = PEC;
            c
        });
        ed.initialize_to_vacuum(&mut s, Dispatch::Sequential);
        assert!(s
            .field()
            .read()
            .cells()
            .iter()
            .all(|c| c.material == VACUUM && c.ez == 0.5));
    }
}
