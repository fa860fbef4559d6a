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

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use anchora_agents::scene_agent::{
    FrameStatus, ObjectFactory, SceneAgent, SceneConfig, ScreenTap,
};
use anchora_core::math::{Quaternion, Vec2, Vec3};
use anchora_core::tracking::{
    HitResult, PlaneKind, Trackable, TrackedPlane, TrackedPolygon, TrackingError, TrackingState,
};
use anchora_core::math::TAU;
use anchora_core::{Anchor, AnchorId, PlaneId, Pose, TrackingSession, Transform};
use anchora_lanes::plane_lane::MAX_BOUNDARY_VERTS;
use approx::assert_relative_eq;

// --- IN-MEMORY TRACKING SESSION FOR THESE TESTS ---

/// Anchor state shared between the fake session and the handles it gives out.
#[derive(Debug, Default)]
struct AnchorState {
    pose: Cell<Pose>,
    detached: Cell<bool>,
}

#[derive(Debug, Clone)]
struct FakeAnchor {
    id: AnchorId,
    state: Rc<AnchorState>,
}

impl Anchor for FakeAnchor {
    fn id(&self) -> AnchorId {
        self.id
    }
    fn pose(&self) -> Pose {
        self.state.pose.get()
    }
    fn detach(&self) {
        self.state.detached.set(true);
    }
}

#[derive(Default)]
struct FakeSession {
    camera: TrackingState,
    planes: Vec<TrackedPlane>,
    hits: Vec<HitResult>,
    updated: Vec<AnchorId>,
    anchor_error: Option<TrackingError>,
    anchors: HashMap<AnchorId, Rc<AnchorState>>,
    next_anchor: u64,
}

impl FakeSession {
    fn tracking() -> Self {
        Self {
            camera: TrackingState::Tracking,
            ..Default::default()
        }
    }

    /// Moves an anchor and reports it as updated for the next frame.
    fn move_anchor(&mut self, id: AnchorId, pose: Pose) {
        if let Some(state) = self.anchors.get(&id) {
            state.pose.set(pose);
            self.updated.push(id);
        }
    }

    fn is_detached(&self, id: AnchorId) -> bool {
        self.anchors.get(&id).is_some_and(|s| s.detached.get())
    }
}

impl TrackingSession for FakeSession {
    type Anchor = FakeAnchor;

    fn camera_tracking_state(&self) -> TrackingState {
        self.camera
    }

    fn planes(&self) -> Vec<TrackedPlane> {
        self.planes.clone()
    }

    fn hit_test(&self, _screen_x: f32, _screen_y: f32) -> Vec<HitResult> {
        self.hits.clone()
    }

    fn updated_anchors(&self) -> Vec<AnchorId> {
        self.updated.clone()
    }

    fn create_anchor(&mut self, pose: &Pose) -> Result<FakeAnchor, TrackingError> {
        if let Some(err) = &self.anchor_error {
            return Err(err.clone());
        }
        self.next_anchor += 1;
        let id = AnchorId(self.next_anchor);
        let state = Rc::new(AnchorState {
            pose: Cell::new(*pose),
            detached: Cell::new(false),
        });
        self.anchors.insert(id, state.clone());
        Ok(FakeAnchor { id, state })
    }
}

/// Counts the instances it creates.
struct CountingFactory {
    ready: bool,
    created: Rc<RefCell<usize>>,
}

impl ObjectFactory for CountingFactory {
    type Object = Transform;

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn create_instance(&mut self) -> Transform {
        *self.created.borrow_mut() += 1;
        Transform::identity()
    }
}

fn ready_factory() -> CountingFactory {
    CountingFactory {
        ready: true,
        created: Rc::new(RefCell::new(0)),
    }
}

fn rect_plane(id: u64, kind: PlaneKind, center: Vec3) -> TrackedPlane {
    TrackedPlane {
        id: PlaneId(id),
        kind,
        tracking_state: TrackingState::Tracking,
        subsumed_by: None,
        center_pose: Pose::from_translation(center),
        polygon: TrackedPolygon::new(
            vec![
                Vec2::new(-1.0, -0.5),
                Vec2::new(1.0, -0.5),
                Vec2::new(1.0, 0.5),
                Vec2::new(-1.0, 0.5),
            ],
            2.0,
            1.0,
        ),
    }
}

fn plane_hit(plane: u64, x: f32, inside: bool) -> HitResult {
    HitResult {
        trackable: Trackable::Plane(PlaneId(plane)),
        pose: Pose::from_translation(Vec3::new(x, 0.0, -1.0)),
        inside_polygon: inside,
        distance: 1.0 + x.abs(),
    }
}

type Agent = SceneAgent<FakeSession, CountingFactory>;

#[test]
fn test_status_progresses_and_latches() {
    // --- 1. ARRANGE ---
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::default();

    // --- 2. ACT & 3. ASSERT ---
    assert_eq!(agent.run_frame(&mut session, &[]).status, FrameStatus::NotTracking);

    session.camera = TrackingState::Tracking;
    session.planes = vec![rect_plane(1, PlaneKind::Vertical, Vec3::ZERO)];
    assert_eq!(
        agent.run_frame(&mut session, &[]).status,
        FrameStatus::SearchingForSurfaces,
        "A wall alone is not a surface to place on"
    );

    session
        .planes
        .push(rect_plane(2, PlaneKind::HorizontalUpwardFacing, Vec3::ZERO));
    assert_eq!(agent.run_frame(&mut session, &[]).status, FrameStatus::Ready);

    // The floor disappearing does not revert the status.
    session.planes.truncate(1);
    assert_eq!(agent.run_frame(&mut session, &[]).status, FrameStatus::Ready);

    // Losing the camera always reports not tracking.
    session.camera = TrackingState::Paused;
    assert_eq!(agent.run_frame(&mut session, &[]).status, FrameStatus::NotTracking);
}

#[test]
fn test_planes_are_filtered_meshed_and_placed_at_center() {
    // --- 1. ARRANGE ---
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::tracking();

    let live = rect_plane(1, PlaneKind::HorizontalUpwardFacing, Vec3::new(0.5, -1.2, -2.0));
    let mut merged = rect_plane(2, PlaneKind::HorizontalUpwardFacing, Vec3::ZERO);
    merged.subsumed_by = Some(PlaneId(1));
    let mut stopped = rect_plane(3, PlaneKind::Vertical, Vec3::ZERO);
    stopped.tracking_state = TrackingState::Stopped;
    let mut paused = rect_plane(4, PlaneKind::Vertical, Vec3::ZERO);
    paused.tracking_state = TrackingState::Paused;
    session.planes = vec![live, merged, stopped, paused];

    // --- 2. ACT ---
    let output = agent.run_frame(&mut session, &[]);

    // --- 3. ASSERT ---
    let ids: Vec<PlaneId> = output.planes.iter().map(|p| p.plane).collect();
    assert_eq!(ids, vec![PlaneId(1), PlaneId(4)]);

    let floor = &output.planes[0];
    assert_eq!(floor.mesh.boundary_vertex_count(), 4);
    assert_eq!(floor.mesh.indices.len(), 12);
    let translation = floor.model.translation();
    assert_relative_eq!(translation.x, 0.5);
    assert_relative_eq!(translation.y, -1.2);
    assert_relative_eq!(translation.z, -2.0);
}

#[test]
fn test_style_index_survives_other_planes_coming_and_going() {
    // --- 1. ARRANGE ---
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::tracking();
    session.planes = vec![
        rect_plane(10, PlaneKind::HorizontalUpwardFacing, Vec3::ZERO),
        rect_plane(20, PlaneKind::Vertical, Vec3::ZERO),
    ];
    let first = agent.run_frame(&mut session, &[]);

    // --- 2. ACT ---
    // Plane 10 goes away; plane 20 is now the first one reported.
    session.planes.remove(0);
    let second = agent.run_frame(&mut session, &[]);

    // --- 3. ASSERT ---
    assert_eq!(first.planes[1].style.style_index, 1);
    assert_eq!(second.planes[0].plane, PlaneId(20));
    assert_eq!(second.planes[0].style.style_index, 1);
    assert_eq!(second.planes[0].mesh.style_index, 1);
}

/// A circular outline of radius 1 with `sides` vertices.
fn circle_polygon(sides: usize) -> TrackedPolygon {
    let vertices = (0..sides)
        .map(|i| {
            let angle = TAU * i as f32 / sides as f32;
            Vec2::new(angle.cos(), angle.sin())
        })
        .collect();
    TrackedPolygon::new(vertices, 2.0, 2.0)
}

#[test]
fn test_oversized_plane_is_skipped_without_losing_others() {
    // --- 1. ARRANGE ---
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::tracking();
    let mut huge = rect_plane(1, PlaneKind::HorizontalUpwardFacing, Vec3::ZERO);
    huge.polygon = circle_polygon(MAX_BOUNDARY_VERTS + 1);
    let normal = rect_plane(2, PlaneKind::Vertical, Vec3::new(0.0, 0.0, -3.0));
    session.planes = vec![huge, normal];

    // --- 2. ACT ---
    let first = agent.run_frame(&mut session, &[]);

    // --- 3. ASSERT ---
    let ids: Vec<PlaneId> = first.planes.iter().map(|p| p.plane).collect();
    assert_eq!(ids, vec![PlaneId(2)], "Only the oversized plane is dropped");
    assert_eq!(first.planes[0].mesh.boundary_vertex_count(), 4);

    // --- 2. ACT ---
    // The tracker simplifies the outline; the plane is meshed again next frame.
    session.planes[0].polygon = circle_polygon(64);
    let second = agent.run_frame(&mut session, &[]);

    // --- 3. ASSERT ---
    let ids: Vec<PlaneId> = second.planes.iter().map(|p| p.plane).collect();
    assert_eq!(ids, vec![PlaneId(1), PlaneId(2)]);
    assert_eq!(second.planes[0].mesh.boundary_vertex_count(), 64);
    assert_eq!(second.planes[0].mesh.indices.len(), 3 * 64);
    assert_eq!(
        second.planes[0].style.style_index, 0,
        "The skipped frame still reserved the plane's style"
    );
}

#[test]
fn test_tap_places_object_on_first_inside_hit() {
    // --- 1. ARRANGE ---
    let factory = ready_factory();
    let created = factory.created.clone();
    let mut agent = Agent::with_defaults(factory);
    let mut session = FakeSession::tracking();
    session.planes = vec![rect_plane(1, PlaneKind::HorizontalUpwardFacing, Vec3::ZERO)];
    session.hits = vec![
        HitResult {
            trackable: Trackable::Point,
            pose: Pose::IDENTITY,
            inside_polygon: false,
            distance: 0.5,
        },
        plane_hit(1, 3.0, false),
        plane_hit(1, 0.25, true),
        plane_hit(2, 0.75, true),
    ];

    // --- 2. ACT ---
    let output = agent.run_frame(&mut session, &[ScreenTap::new(540.0, 960.0)]);

    // --- 3. ASSERT ---
    assert_eq!(output.placed, 1);
    assert_eq!(*created.borrow(), 1, "Only the first valid hit is used");
    let entry = agent.placements().next().expect("one placement expected");
    assert_eq!(entry.plane(), PlaneId(1));
    assert_relative_eq!(entry.object().translation.x, 0.25);
    assert_relative_eq!(entry.object().translation.z, -1.0);
}

#[test]
fn test_tap_missing_every_plane_places_nothing() {
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::tracking();
    session.hits = vec![plane_hit(1, 0.0, false)];

    let output = agent.run_frame(&mut session, &[ScreenTap::new(0.0, 0.0)]);

    assert_eq!(output.placed, 0);
    assert_eq!(output.failed_placements, 0);
    assert_eq!(agent.placement_count(), 0);
}

#[test]
fn test_seventeenth_tap_evicts_and_detaches_oldest() {
    // --- 1. ARRANGE ---
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::tracking();
    session.hits = vec![plane_hit(1, 0.0, true)];
    let tap = [ScreenTap::new(10.0, 10.0)];

    // --- 2. ACT ---
    for _ in 0..17 {
        agent.run_frame(&mut session, &tap);
        assert!(agent.placement_count() <= 16);
    }

    // --- 3. ASSERT ---
    assert_eq!(agent.placement_count(), 16);
    assert!(session.is_detached(AnchorId(1)));
    assert!(!session.is_detached(AnchorId(2)));
    let mut ids: Vec<u64> = agent.placements().map(|e| e.anchor_id().0).collect();
    ids.sort();
    assert_eq!(ids, (2..=17).collect::<Vec<_>>());
}

#[test]
fn test_anchor_failure_is_reported_and_nothing_is_placed() {
    // --- 1. ARRANGE ---
    let factory = ready_factory();
    let created = factory.created.clone();
    let mut agent = Agent::with_defaults(factory);
    let mut session = FakeSession::tracking();
    session.hits = vec![plane_hit(1, 0.0, true)];
    session.anchor_error = Some(TrackingError::NotTracking);

    // --- 2. ACT ---
    let output = agent.run_frame(&mut session, &[ScreenTap::new(1.0, 1.0)]);

    // --- 3. ASSERT ---
    assert_eq!(output.failed_placements, 1);
    assert_eq!(output.placed, 0);
    assert_eq!(agent.placement_count(), 0);
    assert_eq!(*created.borrow(), 0);
}

#[test]
fn test_placed_objects_follow_updated_anchors() {
    // --- 1. ARRANGE ---
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::tracking();
    session.hits = vec![plane_hit(1, 0.0, true)];
    agent.run_frame(&mut session, &[ScreenTap::new(0.0, 0.0)]);
    agent.run_frame(&mut session, &[ScreenTap::new(0.0, 0.0)]);

    let moved = Pose::new(
        Vec3::new(2.0, 0.1, -3.0),
        Quaternion::from_axis_angle(Vec3::Y, 0.75),
    );
    session.move_anchor(AnchorId(1), moved);
    session.updated.push(AnchorId(404));

    // --- 2. ACT ---
    let output = agent.run_frame(&mut session, &[]);

    // --- 3. ASSERT ---
    assert_eq!(output.synced, 1, "Unknown anchors are ignored");
    for entry in agent.placements() {
        if entry.anchor_id() == AnchorId(1) {
            assert_eq!(entry.object().translation, moved.translation);
            assert_eq!(entry.object().rotation, moved.rotation);
        } else {
            assert_relative_eq!(entry.object().translation.x, 0.0);
            assert_relative_eq!(entry.object().translation.z, -1.0);
        }
    }
}

#[test]
fn test_taps_dropped_while_factory_not_ready() {
    let factory = CountingFactory {
        ready: false,
        created: Rc::new(RefCell::new(0)),
    };
    let mut agent = Agent::with_defaults(factory);
    let mut session = FakeSession::tracking();
    session.hits = vec![plane_hit(1, 0.0, true)];

    let output = agent.run_frame(&mut session, &[ScreenTap::new(0.0, 0.0)]);

    assert_eq!(output.placed, 0);
    assert_eq!(session.next_anchor, 0, "No anchor should be requested");
}

#[test]
fn test_shutdown_detaches_everything() {
    let mut agent = Agent::with_defaults(ready_factory());
    let mut session = FakeSession::tracking();
    session.hits = vec![plane_hit(1, 0.0, true)];
    let taps = [ScreenTap::new(0.0, 0.0), ScreenTap::new(1.0, 1.0)];
    agent.run_frame(&mut session, &taps);
    assert_eq!(agent.placement_count(), 2);

    agent.shutdown();

    assert_eq!(agent.placement_count(), 0);
    assert!(session.is_detached(AnchorId(1)));
    assert!(session.is_detached(AnchorId(2)));
}

#[test]
fn test_agent_from_ron_config() {
    let config = SceneConfig::from_ron_str("(max_placements: 2)").unwrap();
    let mut agent = Agent::new(config, ready_factory()).unwrap();
    let mut session = FakeSession::tracking();
    session.hits = vec![plane_hit(1, 0.0, true)];

    for _ in 0..3 {
        agent.run_frame(&mut session, &[ScreenTap::new(0.0, 0.0)]);
    }

    assert_eq!(agent.config().max_placements, 2);
    assert_eq!(agent.placement_count(), 2);
    assert!(session.is_detached(AnchorId(1)));
}
