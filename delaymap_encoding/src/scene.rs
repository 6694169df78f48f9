// Copyright 2025 the Delaymap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A retained mark set that diffs successive frames.
//!
//! Every selection change regenerates the full mark set; the scene turns that into the minimal
//! `Enter`/`Update`/`Exit` list, so redrawing an unchanged selection is a no-op.
//!
//! Paint order is not part of a mark, so resubmitting the same marks in another order produces
//! no diff. [`Scene::order_changed`] reports it instead; renderers that apply diffs
//! incrementally must re-read [`Scene::ordered`] when it is set.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::mark::{Mark, MarkDiff, MarkId};

#[derive(Clone, Debug)]
struct Slot {
    seq: usize,
    mark: Mark,
}

/// Retained marks keyed by [`MarkId`].
#[derive(Clone, Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Slot>,
    ticks: u64,
    order_changed: bool,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the mark set, returning what changed.
    ///
    /// Diffs for submitted marks follow submission order; exits follow id order. If an id is
    /// submitted twice in one tick, the last mark wins. A change in paint order alone yields no
    /// diff; see [`Scene::order_changed`].
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        self.ticks += 1;
        let before = paint_order(&self.marks);
        let mut diffs = Vec::new();
        let mut next: HashMap<MarkId, Slot> = HashMap::with_capacity(self.marks.len());

        for (seq, mark) in marks.into_iter().enumerate() {
            next.insert(mark.id, Slot { seq, mark });
        }

        let mut ordered: Vec<(&MarkId, &Slot)> = next.iter().collect();
        ordered.sort_by_key(|(_, slot)| slot.seq);
        for (id, slot) in ordered {
            let new = &slot.mark;
            match self.marks.get(id) {
                None => diffs.push(MarkDiff::Enter {
                    id: *id,
                    kind: new.kind(),
                    new: Box::new(new.clone()),
                }),
                Some(old) if old.mark != *new => diffs.push(MarkDiff::Update {
                    id: *id,
                    kind: new.kind(),
                    old: Box::new(old.mark.clone()),
                    new: Box::new(new.clone()),
                }),
                Some(_) => {}
            }
        }

        let mut exits: Vec<(MarkId, Slot)> = self
            .marks
            .drain()
            .filter(|(id, _)| !next.contains_key(id))
            .collect();
        exits.sort_by_key(|(id, _)| *id);
        for (id, slot) in exits {
            diffs.push(MarkDiff::Exit {
                id,
                kind: slot.mark.kind(),
                old: Box::new(slot.mark),
            });
        }

        self.marks = next;
        self.order_changed = paint_order(&self.marks) != before;
        diffs
    }

    /// Returns the current marks in paint order: by z-index, then by last submission order.
    pub fn ordered(&self) -> Vec<&Mark> {
        sorted_slots(&self.marks)
            .into_iter()
            .map(|slot| &slot.mark)
            .collect()
    }

    /// Whether the last tick changed the paint order of [`Scene::ordered`], including changes
    /// caused only by resubmitting marks in a different order.
    pub fn order_changed(&self) -> bool {
        self.order_changed
    }

    /// Looks up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id).map(|slot| &slot.mark)
    }

    /// Number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` when no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of ticks applied so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}

fn sorted_slots(marks: &HashMap<MarkId, Slot>) -> Vec<&Slot> {
    let mut slots: Vec<&Slot> = marks.values().collect();
    slots.sort_by_key(|slot| (slot.mark.z_index, slot.seq, slot.mark.id));
    slots
}

fn paint_order(marks: &HashMap<MarkId, Slot>) -> Vec<MarkId> {
    sorted_slots(marks)
        .into_iter()
        .map(|slot| slot.mark.id)
        .collect()
}
