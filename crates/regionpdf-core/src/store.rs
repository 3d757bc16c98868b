//! Ordered region collection with change notification
//!
//! The store is the single owner of the region list for a document; the
//! capture layer and external callers (e.g. regions reloaded from the
//! backend) all mutate through it. Every mutation bumps a generation
//! counter and invokes the registered change callbacks, which is how the
//! overlay painter learns it must repaint.

use crate::naming::normalize_parameter_name;
use crate::region::Region;
use serde::{Deserialize, Serialize};

/// Sentinel accepted by [`RegionStore::delete`] meaning "clear all
/// regions". Retained for callers of the original index-based API;
/// new code should call [`RegionStore::clear_all`].
pub const CLEAR_ALL_INDEX: i32 = -1;

/// Fields merged into an existing region by [`RegionStore::update`].
/// Absent fields are left untouched; coordinates are never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPatch {
    pub parameter_name: Option<String>,
}

type ChangeCallback = Box<dyn Fn(&[Region])>;

/// Owner of the ordered region set. Insertion order is draw order:
/// later regions paint over earlier ones where they overlap.
#[derive(Default)]
pub struct RegionStore {
    regions: Vec<Region>,
    generation: u64,
    observers: Vec<ChangeCallback>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Monotonic mutation counter; a repaint reading the store compares
    /// this to decide whether its snapshot is current.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a callback invoked after every mutation with the new
    /// region list. Callbacks are owned by the rendering component; the
    /// store never exposes a global hook.
    pub fn on_change(&mut self, callback: impl Fn(&[Region]) + 'static) {
        self.observers.push(Box::new(callback));
    }

    /// Append a region. No de-duplication; order is insertion order.
    pub fn add(&mut self, region: Region) {
        self.regions.push(region);
        self.bump();
    }

    /// Remove one region by position. `CLEAR_ALL_INDEX` (-1) clears the
    /// whole set; other out-of-range indices are no-ops.
    pub fn delete(&mut self, index: i32) {
        if index == CLEAR_ALL_INDEX {
            self.clear_all();
            return;
        }
        let Ok(index) = usize::try_from(index) else {
            return;
        };
        if index < self.regions.len() {
            self.regions.remove(index);
            self.bump();
        }
    }

    /// Remove every region. Notifies even when already empty so a caller
    /// resetting the workflow always gets a repaint.
    pub fn clear_all(&mut self) {
        self.regions.clear();
        self.bump();
    }

    /// Merge a patch into the region at `index`. The parameter name is
    /// normalized on application.
    pub fn update(&mut self, index: usize, patch: &RegionPatch) {
        let Some(region) = self.regions.get_mut(index) else {
            return;
        };
        if let Some(label) = &patch.parameter_name {
            region.parameter_name = Some(normalize_parameter_name(label));
        }
        self.bump();
    }

    /// Replace the entire set, used when an external source (regions
    /// saved in a previous session) supersedes local state.
    pub fn set_all(&mut self, regions: Vec<Region>) {
        self.regions = regions;
        self.bump();
    }

    fn bump(&mut self) {
        self.generation += 1;
        for observer in &self.observers {
            observer(&self.regions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{DragGesture, Size};
    use crate::region::{CanvasGeometry, ZoomMode};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn region_at(x: f64, y: f64) -> Region {
        let gesture = DragGesture {
            start_x: x,
            start_y: y,
            end_x: x + 100.0,
            end_y: y + 50.0,
        };
        let canvas = CanvasGeometry {
            actual: Size::new(800.0, 600.0),
            display: Size::new(800.0, 600.0),
        };
        Region::from_gesture(
            gesture,
            1,
            canvas,
            Some(Size::new(612.0, 792.0)),
            ZoomMode::Scale(1.0),
        )
        .unwrap()
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = RegionStore::new();
        store.add(region_at(0.0, 0.0));
        store.add(region_at(50.0, 25.0));
        store.add(region_at(50.0, 25.0)); // duplicates allowed
        assert_eq!(store.len(), 3);
        assert_eq!(store.regions()[0].canvas_rect.x1, 0.0);
        assert_eq!(store.regions()[1].canvas_rect.x1, 50.0);
    }

    #[test]
    fn test_delete_by_index() {
        let mut store = RegionStore::new();
        store.add(region_at(0.0, 0.0));
        store.add(region_at(50.0, 25.0)); // overlaps the first
        store.delete(0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.regions()[0].canvas_rect.x1, 50.0);
    }

    #[test]
    fn test_delete_minus_one_clears_all() {
        for n in 1..=4 {
            let mut store = RegionStore::new();
            for i in 0..n {
                store.add(region_at(i as f64 * 10.0, 0.0));
            }
            store.delete(-1);
            assert!(store.is_empty(), "delete(-1) must empty a set of {}", n);
        }
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut store = RegionStore::new();
        store.add(region_at(0.0, 0.0));
        let generation = store.generation();
        store.delete(5);
        store.delete(-7);
        assert_eq!(store.len(), 1);
        assert_eq!(store.generation(), generation);
    }

    #[test]
    fn test_update_normalizes_name_and_keeps_coordinates() {
        let mut store = RegionStore::new();
        store.add(region_at(10.0, 20.0));
        let before = store.regions()[0].canvas_rect;

        store.update(
            0,
            &RegionPatch {
                parameter_name: Some("Patient Name".to_string()),
            },
        );

        let region = &store.regions()[0];
        assert_eq!(region.parameter_name.as_deref(), Some("patient_name"));
        assert_eq!(region.canvas_rect, before);
    }

    #[test]
    fn test_set_all_replaces_local_state() {
        let mut store = RegionStore::new();
        store.add(region_at(0.0, 0.0));
        store.add(region_at(10.0, 10.0));

        store.set_all(Vec::new());
        assert!(store.is_empty());

        store.set_all(vec![region_at(5.0, 5.0)]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_observers_see_every_mutation() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
        let mut store = RegionStore::new();
        let sink = Rc::clone(&seen);
        store.on_change(move |regions| sink.borrow_mut().push(regions.len()));

        store.add(region_at(0.0, 0.0));
        store.add(region_at(10.0, 10.0));
        store.update(
            0,
            &RegionPatch {
                parameter_name: Some("x".into()),
            },
        );
        store.delete(1);
        store.set_all(Vec::new());

        assert_eq!(*seen.borrow(), vec![1, 2, 2, 1, 0]);
    }

    #[test]
    fn test_noop_mutations_do_not_notify() {
        let count = Rc::new(RefCell::new(0));
        let mut store = RegionStore::new();
        let sink = Rc::clone(&count);
        store.on_change(move |_| *sink.borrow_mut() += 1);

        store.delete(3); // empty store, nothing to do
        store.update(0, &RegionPatch::default());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_generation_is_monotonic() {
        let mut store = RegionStore::new();
        let g0 = store.generation();
        store.add(region_at(0.0, 0.0));
        let g1 = store.generation();
        store.clear_all();
        let g2 = store.generation();
        assert!(g0 < g1 && g1 < g2);
    }
}
