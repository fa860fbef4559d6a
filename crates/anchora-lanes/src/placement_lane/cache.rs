// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use anchora_core::{Anchor, AnchorId, PlaneId, Posable, Pose, TrackingError};
use indexmap::IndexMap;

use super::PlacementError;

/// The number of live placements kept before the oldest one is evicted.
pub const DEFAULT_MAX_PLACEMENTS: usize = 16;

/// One placed object bound to the anchor that keeps it fixed in the world.
#[derive(Debug)]
pub struct PlacementEntry<A, O> {
    anchor: A,
    object: O,
    plane: PlaneId,
    pose: Pose,
}

impl<A: Anchor, O> PlacementEntry<A, O> {
    /// Returns the identity of the entry's anchor.
    #[inline]
    pub fn anchor_id(&self) -> AnchorId {
        self.anchor.id()
    }

    /// Returns the placed object.
    #[inline]
    pub fn object(&self) -> &O {
        &self.object
    }

    /// Returns the plane the object was placed on.
    #[inline]
    pub fn plane(&self) -> PlaneId {
        self.plane
    }

    /// Returns the last pose applied to the object.
    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }
}

/// A fixed-capacity cache of anchored objects with oldest-first eviction.
///
/// Entries are kept in insertion order; when the cache is full, the entry
/// inserted first is evicted to make room, regardless of how recently its pose
/// changed. Every entry owns exactly one anchor, and an anchor is always
/// detached before its entry leaves the map.
///
/// All mutating operations take `&mut self`. A host that shares the cache
/// between threads must wrap it in a single lock so that eviction, insertion,
/// and pose sync are serialized.
#[derive(Debug)]
pub struct PlacementCache<A, O> {
    entries: IndexMap<AnchorId, PlacementEntry<A, O>>,
    max_placements: usize,
}

impl<A: Anchor, O: Posable> Default for PlacementCache<A, O> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PLACEMENTS)
    }
}

impl<A: Anchor, O: Posable> PlacementCache<A, O> {
    /// Creates an empty cache holding at most `max_placements` entries.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(max_placements: usize) -> Self {
        if max_placements == 0 {
            log::warn!("PlacementCache: capacity of 0 requested, using 1");
        }
        let max_placements = max_placements.max(1);
        Self {
            entries: IndexMap::with_capacity(max_placements),
            max_placements,
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of live entries.
    #[inline]
    pub fn max_placements(&self) -> usize {
        self.max_placements
    }

    /// Returns `true` if an entry exists for `anchor`.
    #[inline]
    pub fn contains(&self, anchor: AnchorId) -> bool {
        self.entries.contains_key(&anchor)
    }

    /// Returns the entry for `anchor`, if any.
    #[inline]
    pub fn get(&self, anchor: AnchorId) -> Option<&PlacementEntry<A, O>> {
        self.entries.get(&anchor)
    }

    /// Places a new object on `plane` at `hit_pose`.
    ///
    /// The caller must already have checked that the hit lies inside the
    /// plane's polygon. If the cache is full, the oldest entry is evicted
    /// first. The anchor is then created with `create_anchor`; if that fails,
    /// nothing is inserted and the eviction stands. On success the object from
    /// `create_object` is moved to the anchor's current pose and inserted.
    ///
    /// `create_anchor` is expected to return an id not already cached. If it
    /// returns a cached id anyway, the existing entry is replaced where it
    /// stands in insertion order and its handle is not detached, since both
    /// handles name the same tracked anchor. As with a failed creation, a slot
    /// freed by eviction beforehand stays free.
    pub fn try_place<F, G>(
        &mut self,
        plane: PlaneId,
        hit_pose: &Pose,
        create_anchor: F,
        create_object: G,
    ) -> Result<&PlacementEntry<A, O>, PlacementError>
    where
        F: FnOnce(&Pose) -> Result<A, TrackingError>,
        G: FnOnce() -> O,
    {
        while self.entries.len() >= self.max_placements {
            if self.evict_oldest().is_none() {
                break;
            }
        }

        let anchor = create_anchor(hit_pose).map_err(|e| {
            log::warn!("PlacementCache: anchor creation on {} failed: {}", plane, e);
            PlacementError::from(e)
        })?;

        let id = anchor.id();
        let pose = anchor.pose();
        let mut object = create_object();
        object.apply_pose(&pose);

        let entry = PlacementEntry {
            anchor,
            object,
            plane,
            pose,
        };
        if let Some(index) = self.entries.get_index_of(&id) {
            log::warn!("PlacementCache: {} was already cached, replacing it in place", id);
            self.entries[index] = entry;
            return Ok(&self.entries[index]);
        }

        let (index, _) = self.entries.insert_full(id, entry);
        log::debug!(
            "PlacementCache: placed {} on {} ({}/{})",
            id,
            plane,
            self.entries.len(),
            self.max_placements
        );
        Ok(&self.entries[index])
    }

    /// Re-reads the pose of every cached anchor listed in `updated` and
    /// overwrites its object's transform. Unknown anchors are ignored.
    ///
    /// Returns the number of entries that were updated.
    pub fn sync_poses<I>(&mut self, updated: I) -> usize
    where
        I: IntoIterator<Item = AnchorId>,
    {
        let mut synced = 0;
        for id in updated {
            if let Some(entry) = self.entries.get_mut(&id) {
                let pose = entry.anchor.pose();
                entry.object.apply_pose(&pose);
                entry.pose = pose;
                synced += 1;
            }
        }
        synced
    }

    /// Returns the live entries for rendering. The order carries no meaning.
    pub fn entries(&self) -> impl Iterator<Item = &PlacementEntry<A, O>> + '_ {
        self.entries.values()
    }

    /// Detaches and removes the entry inserted first, returning its anchor id.
    pub fn evict_oldest(&mut self) -> Option<AnchorId> {
        let (&id, entry) = self.entries.first()?;
        entry.anchor.detach();
        self.entries.shift_remove_index(0);
        log::debug!("PlacementCache: evicted {} to stay within capacity", id);
        Some(id)
    }

    /// Detaches every anchor and empties the cache.
    pub fn clear(&mut self) {
        for entry in self.entries.values() {
            entry.anchor.detach();
        }
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            log::debug!("PlacementCache: cleared {} placements", count);
        }
    }
}
