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

//! A scripted tracking session: a floor that grows as the camera looks
//! around, a wall found later, and anchors that drift a little every frame.

use std::cell::Cell;
use std::rc::Rc;

use anchora_core::math::{Quaternion, Vec2, Vec3, FRAC_PI_2, TAU};
use anchora_core::tracking::{
    HitResult, PlaneKind, Trackable, TrackedPlane, TrackedPolygon, TrackingError, TrackingState,
};
use anchora_core::{Anchor, AnchorId, PlaneId, Pose, TrackingSession};

const FLOOR: PlaneId = PlaneId(1);
const WALL: PlaneId = PlaneId(2);

/// Frames before the camera starts tracking.
const WARMUP_FRAMES: u32 = 3;
/// Frame at which the wall is detected.
const WALL_FRAME: u32 = 12;

#[derive(Debug)]
pub struct SimulatedAnchor {
    id: AnchorId,
    pose: Rc<Cell<Pose>>,
    detached: Rc<Cell<bool>>,
}

impl Anchor for SimulatedAnchor {
    fn id(&self) -> AnchorId {
        self.id
    }

    fn pose(&self) -> Pose {
        self.pose.get()
    }

    fn detach(&self) {
        log::debug!("SimulatedSession: {} detached", self.id);
        self.detached.set(true);
    }
}

/// The session's side of an anchor handle.
struct LiveAnchor {
    id: AnchorId,
    pose: Rc<Cell<Pose>>,
    detached: Rc<Cell<bool>>,
}

#[derive(Default)]
pub struct SimulatedSession {
    frame: u32,
    next_anchor: u64,
    anchors: Vec<LiveAnchor>,
    updated: Vec<AnchorId>,
}

impl SimulatedSession {
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Advances to the next frame, forgets detached anchors and nudges every
    /// third remaining one.
    pub fn advance(&mut self) {
        self.frame += 1;
        self.updated.clear();
        self.anchors.retain(|anchor| !anchor.detached.get());
        for (i, anchor) in self.anchors.iter().enumerate() {
            if (self.frame as usize + i) % 3 == 0 {
                let mut p = anchor.pose.get();
                p.translation = p.translation + Vec3::new(0.002, 0.0, -0.001);
                anchor.pose.set(p);
                self.updated.push(anchor.id);
            }
        }
    }

    /// A roughly circular floor outline whose radius grows with time.
    fn floor_polygon(&self) -> TrackedPolygon {
        let radius = (0.3 + 0.08 * self.frame as f32).min(2.5);
        let sides = 8 + (self.frame as usize / 2).min(24);
        let vertices = (0..sides)
            .map(|i| {
                let angle = TAU * i as f32 / sides as f32;
                Vec2::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        TrackedPolygon::new(vertices, 2.0 * radius, 2.0 * radius)
    }
}

impl TrackingSession for SimulatedSession {
    type Anchor = SimulatedAnchor;

    fn camera_tracking_state(&self) -> TrackingState {
        if self.frame < WARMUP_FRAMES {
            TrackingState::Paused
        } else {
            TrackingState::Tracking
        }
    }

    fn planes(&self) -> Vec<TrackedPlane> {
        let mut planes = vec![TrackedPlane {
            id: FLOOR,
            kind: PlaneKind::HorizontalUpwardFacing,
            tracking_state: TrackingState::Tracking,
            subsumed_by: None,
            center_pose: Pose::from_translation(Vec3::new(0.0, -1.4, -1.5)),
            polygon: self.floor_polygon(),
        }];
        if self.frame >= WALL_FRAME {
            planes.push(TrackedPlane {
                id: WALL,
                kind: PlaneKind::Vertical,
                tracking_state: TrackingState::Tracking,
                subsumed_by: None,
                center_pose: Pose::new(
                    Vec3::new(0.0, 0.0, -3.0),
                    Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2),
                ),
                polygon: TrackedPolygon::from_flat(
                    &[-1.5, -1.0, 1.5, -1.0, 1.5, 1.0, -1.5, 1.0],
                    3.0,
                    2.0,
                ),
            });
        }
        planes
    }

    fn hit_test(&self, screen_x: f32, screen_y: f32) -> Vec<HitResult> {
        // Map the screen to a spot on the floor; the bottom half of the
        // screen lands inside it.
        let x = (screen_x / 1080.0 - 0.5) * 2.0;
        let z = -1.5 - (1.0 - screen_y / 1920.0);
        let inside_floor = screen_y > 960.0;
        vec![
            HitResult {
                trackable: Trackable::Point,
                pose: Pose::from_translation(Vec3::new(x, -1.0, z)),
                inside_polygon: false,
                distance: 0.8,
            },
            HitResult {
                trackable: Trackable::Plane(FLOOR),
                pose: Pose::from_components(x, -1.4, z, 0.0, 0.0, 0.0, 1.0),
                inside_polygon: inside_floor,
                distance: 1.6,
            },
        ]
    }

    fn updated_anchors(&self) -> Vec<AnchorId> {
        self.updated.clone()
    }

    fn create_anchor(&mut self, pose: &Pose) -> Result<SimulatedAnchor, TrackingError> {
        if !self.camera_tracking_state().is_tracking() {
            return Err(TrackingError::NotTracking);
        }
        self.next_anchor += 1;
        let id = AnchorId(self.next_anchor);
        let shared = Rc::new(Cell::new(*pose));
        let detached = Rc::new(Cell::new(false));
        self.anchors.push(LiveAnchor {
            id,
            pose: shared.clone(),
            detached: detached.clone(),
        });
        Ok(SimulatedAnchor {
            id,
            pose: shared,
            detached,
        })
    }
}
