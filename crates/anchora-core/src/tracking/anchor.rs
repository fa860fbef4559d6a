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

use super::{HitResult, Pose, TrackedPlane, TrackingError, TrackingState};

/// The identity of an anchor, comparable and hashable independently of the
/// handle object that carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// An opaque capability handle to a pose kept fixed to the real world by the
/// tracking subsystem.
///
/// The core never owns the anchor's underlying resources; it reads the pose
/// and, when it is done with the anchor, asks the tracker to release it.
pub trait Anchor {
    /// Returns the anchor's stable identity.
    fn id(&self) -> AnchorId;

    /// Returns the anchor's current world pose.
    fn pose(&self) -> Pose;

    /// Tells the tracking subsystem to stop tracking this anchor.
    ///
    /// Detachment is best-effort: it returns nothing and callers never wait
    /// for or retry it.
    fn detach(&self);
}

/// The per-frame view of the spatial-tracking subsystem consumed by the core.
pub trait TrackingSession {
    /// The anchor handle type produced by [`TrackingSession::create_anchor`].
    type Anchor: Anchor;

    /// Returns the tracking state of the device camera for the current frame.
    fn camera_tracking_state(&self) -> TrackingState;

    /// Returns every plane the session knows about, including ones that are
    /// subsumed or no longer tracked.
    fn planes(&self) -> Vec<TrackedPlane>;

    /// Casts a ray through the screen point and returns intersections sorted
    /// nearest-first.
    fn hit_test(&self, screen_x: f32, screen_y: f32) -> Vec<HitResult>;

    /// Returns the anchors whose pose changed during the current frame.
    fn updated_anchors(&self) -> Vec<AnchorId>;

    /// Creates a new anchor fixed at `pose`.
    fn create_anchor(&mut self, pose: &Pose) -> Result<Self::Anchor, TrackingError>;
}
