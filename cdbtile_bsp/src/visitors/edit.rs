// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-footprint edits on a built tree.

use kurbo::Rect;

use crate::bsp::{Side, route};
use crate::footprint::{Footprint, Polygon};
use crate::types::FootprintId;
use crate::visitor::{BspVisitorMut, NodeMut, traverse_mut_within};

/// What an [`EditVisitor`] does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Route one footprint into the tree.
    Insert,
    /// Remove one footprint by identity.
    Remove,
    /// Drop the point footprints inside a window, at every leaf it reaches.
    PolygonRemove,
    /// Do nothing.
    #[default]
    NoMode,
}

#[derive(Debug)]
enum Edit<F> {
    Insert {
        pending: Option<F>,
        envelope: Option<Rect>,
    },
    Remove {
        id: FootprintId,
        envelope: Option<Rect>,
        removed: Option<F>,
    },
    PolygonRemove {
        window: Polygon,
        envelope: Option<Rect>,
        removed: usize,
    },
    NoMode,
}

/// Inserts or removes a single footprint, pruning by the target's envelope.
///
/// - Insert descends with the same routing rule the tree was built with: a
///   footprint straddling an internal node's split stays at that node,
///   anything else lands in the leaf it reaches. It never subdivides.
/// - Remove tries every visited node's own list and stops at the first hit.
/// - PolygonRemove drops contained points at every overlapping leaf.
///
/// A target or window without a valid envelope leaves the tree untouched.
#[derive(Debug)]
pub struct EditVisitor<F> {
    edit: Edit<F>,
    done: bool,
}

impl<F> Default for EditVisitor<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> EditVisitor<F> {
    /// A visitor in [`EditMode::NoMode`].
    pub fn new() -> Self {
        Self {
            edit: Edit::NoMode,
            done: false,
        }
    }

    /// Remove the footprint with identity `id`, searching nodes that `envelope`
    /// can reach.
    pub fn remove_id(id: FootprintId, envelope: Rect) -> Self {
        Self {
            edit: Edit::Remove {
                id,
                envelope: Some(envelope),
                removed: None,
            },
            done: false,
        }
    }

    /// Drop every point footprint inside or on `window`.
    pub fn polygon_remove(window: Polygon) -> Self {
        let envelope = window.envelope();
        Self {
            edit: Edit::PolygonRemove {
                window,
                envelope,
                removed: 0,
            },
            done: false,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> EditMode {
        match self.edit {
            Edit::Insert { .. } => EditMode::Insert,
            Edit::Remove { .. } => EditMode::Remove,
            Edit::PolygonRemove { .. } => EditMode::PolygonRemove,
            Edit::NoMode => EditMode::NoMode,
        }
    }

    /// True once an insert or single removal has happened.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The insert target if it was not placed.
    pub fn take_pending(&mut self) -> Option<F> {
        match &mut self.edit {
            Edit::Insert { pending, .. } => pending.take(),
            _ => None,
        }
    }

    /// The footprint handed back by a successful removal.
    pub fn take_removed(&mut self) -> Option<F> {
        match &mut self.edit {
            Edit::Remove { removed, .. } => removed.take(),
            _ => None,
        }
    }

    /// Number of footprints removed so far and not yet taken back.
    pub fn removed_count(&self) -> usize {
        match &self.edit {
            Edit::Remove { removed, .. } => usize::from(removed.is_some()),
            Edit::PolygonRemove { removed, .. } => *removed,
            _ => 0,
        }
    }
}

impl<F: Footprint> EditVisitor<F> {
    /// Insert `footprint`.
    pub fn insert(footprint: F) -> Self {
        let envelope = footprint.envelope();
        Self {
            edit: Edit::Insert {
                pending: Some(footprint),
                envelope,
            },
            done: false,
        }
    }

    /// Remove the footprint with the same identity as `target`.
    pub fn remove(target: &F) -> Self {
        Self {
            edit: Edit::Remove {
                id: target.id(),
                envelope: target.envelope(),
                removed: None,
            },
            done: false,
        }
    }

    fn insert_at(&mut self, mut node: NodeMut<'_, F>) {
        let side = match &self.edit {
            Edit::Insert {
                envelope: Some(env),
                ..
            } if !node.is_leaf() => route(node.axis(), node.split(), Some(*env)),
            Edit::Insert {
                envelope: Some(_), ..
            } => Side::Here,
            _ => return,
        };
        match side {
            Side::Here => {
                if let Edit::Insert { pending, .. } = &mut self.edit
                    && let Some(f) = pending.take()
                {
                    node.push(f);
                }
                self.done = true;
            }
            Side::Min => {
                if let Some(child) = node.min_child() {
                    self.visit_mut(child);
                }
            }
            Side::Max => {
                if let Some(child) = node.max_child() {
                    self.visit_mut(child);
                }
            }
        }
    }

    fn remove_at(&mut self, mut node: NodeMut<'_, F>) {
        let (id, env) = match &self.edit {
            Edit::Remove {
                id,
                envelope: Some(env),
                ..
            } => (*id, *env),
            _ => return,
        };
        if let Some(f) = node.remove_geometry(id) {
            if let Edit::Remove { removed, .. } = &mut self.edit {
                *removed = Some(f);
            }
            self.done = true;
            return;
        }
        traverse_mut_within(self, node, env);
    }

    fn polygon_remove_at(&mut self, mut node: NodeMut<'_, F>) {
        let Edit::PolygonRemove {
            window,
            envelope: Some(env),
            removed,
        } = &mut self.edit
        else {
            return;
        };
        if node.is_leaf() {
            *removed += node.remove_bounding_polygon(window);
            return;
        }
        let env = *env;
        traverse_mut_within(self, node, env);
    }
}

impl<F: Footprint> BspVisitorMut<F> for EditVisitor<F> {
    fn visiting_mut(&mut self, node: NodeMut<'_, F>) {
        if self.done {
            return;
        }
        match self.mode() {
            EditMode::Insert => self.insert_at(node),
            EditMode::Remove => self.remove_at(node),
            EditMode::PolygonRemove => self.polygon_remove_at(node),
            EditMode::NoMode => {}
        }
    }
}
