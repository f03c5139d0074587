// Copyright 2026 the Cdbtile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity-keyed envelope memoization and the build context used by
//! [`Bsp::generate_with`](crate::Bsp::generate_with).

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::footprint::Footprint;
use crate::types::FootprintId;

/// Memoized envelopes keyed by [`FootprintId`].
///
/// Malformed footprints are memoized too (as "no envelope") so they are not
/// re-examined on every lookup. Entries are never invalidated implicitly; call
/// [`remove`](Self::remove) when a footprint leaves the tree.
#[derive(Clone, Debug, Default)]
pub struct EnvelopeCache {
    entries: BTreeMap<FootprintId, Option<Rect>>,
}

impl EnvelopeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached envelope of `footprint`, computing it on first access.
    pub fn get_or_compute<F: Footprint>(&mut self, footprint: &F) -> Option<Rect> {
        self.lookup_or_compute(footprint).0
    }

    /// Like [`get_or_compute`](Self::get_or_compute), also reporting whether
    /// this call created the entry.
    fn lookup_or_compute<F: Footprint>(&mut self, footprint: &F) -> (Option<Rect>, bool) {
        let id = footprint.id();
        if let Some(env) = self.entries.get(&id) {
            return (*env, false);
        }
        let env = footprint.envelope();
        self.entries.insert(id, env);
        (env, true)
    }

    /// The cached entry for `id`, if present. The inner `None` marks a
    /// malformed footprint.
    pub fn get(&self, id: FootprintId) -> Option<Option<Rect>> {
        self.entries.get(&id).copied()
    }

    /// Drop the entry for `id`. Returns whether an entry existed.
    pub fn remove(&mut self, id: FootprintId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Scratch state threaded through one tree build.
///
/// The outermost caller decides whether the build owns the cache. An owning
/// context releases, on [`finish`](Self::finish), exactly the entries it
/// created; entries that were already present are left alone.
#[derive(Debug)]
pub struct BuildContext<'c> {
    envelopes: &'c mut EnvelopeCache,
    owns_cache: bool,
    created: Vec<FootprintId>,
}

impl<'c> BuildContext<'c> {
    /// A context that owns the cache for the duration of the build and
    /// releases what it added when the build finishes.
    pub fn owning(envelopes: &'c mut EnvelopeCache) -> Self {
        Self {
            envelopes,
            owns_cache: true,
            created: Vec::new(),
        }
    }

    /// A context that fills `envelopes` and leaves every entry in place,
    /// for callers that reuse envelopes after the build.
    pub fn shared(envelopes: &'c mut EnvelopeCache) -> Self {
        Self {
            envelopes,
            owns_cache: false,
            created: Vec::new(),
        }
    }

    /// Whether this context releases its entries on finish.
    pub fn owns_cache(&self) -> bool {
        self.owns_cache
    }

    /// Number of envelopes computed through this context so far.
    pub fn computed(&self) -> usize {
        self.created.len()
    }

    /// Envelope lookup used during the build.
    pub fn envelope<F: Footprint>(&mut self, footprint: &F) -> Option<Rect> {
        let (env, created) = self.envelopes.lookup_or_compute(footprint);
        if created {
            self.created.push(footprint.id());
        }
        env
    }

    /// End the build, releasing created entries when the context owns the cache.
    pub fn finish(mut self) {
        if self.owns_cache {
            for id in self.created.drain(..) {
                self.envelopes.remove(id);
            }
        }
    }
}
