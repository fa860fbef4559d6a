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

use std::fmt;

use super::{Pose, TrackingState};
use crate::math::Vec2;

/// A stable identifier for a tracked plane, preserved across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneId(pub u64);

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "plane#{}", self.0)
    }
}

/// The orientation class of a detected plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    /// A horizontal surface facing up, such as a floor or a table top.
    HorizontalUpwardFacing,
    /// A horizontal surface facing down, such as a ceiling.
    HorizontalDownwardFacing,
    /// A vertical surface, such as a wall.
    Vertical,
}

/// The boundary of a plane in the plane's local frame.
///
/// Each vertex is an `(x, z)` pair stored in a [`Vec2`] (`y` holds the local Z).
/// Winding is whatever the tracking subsystem supplied. The extents are the
/// sizes of the plane's bounding rectangle along its local X and Z axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackedPolygon {
    /// The ordered boundary vertices.
    pub vertices: Vec<Vec2>,
    /// The extent along the local X axis.
    pub extent_x: f32,
    /// The extent along the local Z axis.
    pub extent_z: f32,
}

impl TrackedPolygon {
    /// Creates a polygon from boundary vertices and extents.
    pub fn new(vertices: Vec<Vec2>, extent_x: f32, extent_z: f32) -> Self {
        Self {
            vertices,
            extent_x,
            extent_z,
        }
    }

    /// Creates a polygon from a flat `[x0, z0, x1, z1, ...]` buffer, the layout
    /// tracking backends commonly hand out. A trailing unpaired float is ignored.
    pub fn from_flat(coords: &[f32], extent_x: f32, extent_z: f32) -> Self {
        if coords.len() % 2 != 0 {
            log::warn!(
                "TrackedPolygon: odd coordinate count {}, dropping the last value",
                coords.len()
            );
        }
        let vertices = coords
            .chunks_exact(2)
            .map(|pair| Vec2::new(pair[0], pair[1]))
            .collect();
        Self::new(vertices, extent_x, extent_z)
    }

    /// Returns the number of boundary vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A snapshot of one plane as reported by the tracking subsystem this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedPlane {
    /// The plane's stable identity.
    pub id: PlaneId,
    /// The plane's orientation class.
    pub kind: PlaneKind,
    /// The current tracking state.
    pub tracking_state: TrackingState,
    /// Set when this plane has been merged into another plane.
    pub subsumed_by: Option<PlaneId>,
    /// The pose of the plane's local frame, centered on the plane.
    pub center_pose: Pose,
    /// The boundary polygon in the local frame.
    pub polygon: TrackedPolygon,
}

impl TrackedPlane {
    /// Returns `true` if the plane should still be visualized: it has not been
    /// merged into another plane and tracking has not permanently stopped.
    pub fn is_renderable(&self) -> bool {
        self.subsumed_by.is_none() && self.tracking_state != TrackingState::Stopped
    }
}

/// The kind of trackable a hit-test ray intersected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trackable {
    /// A detected plane.
    Plane(PlaneId),
    /// A sparse feature point, not a surface.
    Point,
}

/// One intersection returned by a hit-test, sorted nearest-first by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// What the ray hit.
    pub trackable: Trackable,
    /// The pose of the intersection point.
    pub pose: Pose,
    /// Whether the hit pose lies inside the hit plane's boundary polygon.
    /// Always `false` for non-plane trackables.
    pub inside_polygon: bool,
    /// The distance from the camera to the hit.
    pub distance: f32,
}

impl HitResult {
    /// Returns the plane this hit landed on, if it hit a plane inside its polygon.
    pub fn plane_inside_polygon(&self) -> Option<PlaneId> {
        match self.trackable {
            Trackable::Plane(id) if self.inside_polygon => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_pairs_coordinates() {
        let polygon = TrackedPolygon::from_flat(&[-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 9.0], 2.0, 2.0);
        assert_eq!(polygon.vertex_count(), 3);
        assert_eq!(polygon.vertices[1], Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_renderable_filters_subsumed_and_stopped() {
        let mut plane = TrackedPlane {
            id: PlaneId(1),
            kind: PlaneKind::HorizontalUpwardFacing,
            tracking_state: TrackingState::Tracking,
            subsumed_by: None,
            center_pose: Pose::IDENTITY,
            polygon: TrackedPolygon::default(),
        };
        assert!(plane.is_renderable());

        plane.tracking_state = TrackingState::Paused;
        assert!(plane.is_renderable());

        plane.tracking_state = TrackingState::Stopped;
        assert!(!plane.is_renderable());

        plane.tracking_state = TrackingState::Tracking;
        plane.subsumed_by = Some(PlaneId(2));
        assert!(!plane.is_renderable());
    }

    #[test]
    fn test_plane_inside_polygon_requires_plane_and_inside() {
        let mut hit = HitResult {
            trackable: Trackable::Plane(PlaneId(7)),
            pose: Pose::IDENTITY,
            inside_polygon: true,
            distance: 1.0,
        };
        assert_eq!(hit.plane_inside_polygon(), Some(PlaneId(7)));

        hit.inside_polygon = false;
        assert_eq!(hit.plane_inside_polygon(), None);

        hit.trackable = Trackable::Point;
        hit.inside_polygon = true;
        assert_eq!(hit.plane_inside_polygon(), None);
    }
}
