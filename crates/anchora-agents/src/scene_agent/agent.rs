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

//! Defines the SceneAgent, which drives the plane and placement lanes each frame.

use std::collections::HashMap;

use anchora_core::{
    math::Mat4,
    tracking::{PlaneKind, TrackedPlane},
    PlaneId, TrackingSession,
};
use anchora_lanes::{
    placement_lane::{PlacementCache, PlacementEntry},
    plane_lane::{BoundaryMeshBuilder, PlaneStyle},
};

use super::{
    ConfigError, FrameOutput, FrameStatus, ObjectFactory, PlaneRenderable, SceneConfig, ScreenTap,
};

/// The agent responsible for the AR scene of one tracking session.
///
/// Owns the mesh builder and the placement cache. All per-frame work happens
/// in [`SceneAgent::run_frame`], which takes `&mut self`, so a frame's
/// placement and pose sync never interleave with another frame's.
pub struct SceneAgent<S: TrackingSession, F: ObjectFactory> {
    config: SceneConfig,
    mesh_builder: BoundaryMeshBuilder,
    placements: PlacementCache<S::Anchor, F::Object>,
    factory: F,
    /// Style index assigned to each plane the first time it is seen. Dropped
    /// once the plane is reported stopped or subsumed.
    style_indices: HashMap<PlaneId, u32>,
    next_style_index: u32,
    /// Latched once an upward-facing plane has been tracked.
    surface_found: bool,
}

impl<S: TrackingSession, F: ObjectFactory> SceneAgent<S, F> {
    /// Creates an agent with the given config and object factory.
    pub fn new(config: SceneConfig, factory: F) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, factory))
    }

    /// Creates an agent with [`SceneConfig::default`].
    pub fn with_defaults(factory: F) -> Self {
        Self::from_validated(SceneConfig::default(), factory)
    }

    fn from_validated(config: SceneConfig, factory: F) -> Self {
        Self {
            mesh_builder: BoundaryMeshBuilder::new(
                config.fade_radius,
                config.initial_boundary_vertices,
            ),
            placements: PlacementCache::new(config.max_placements),
            factory,
            style_indices: HashMap::new(),
            next_style_index: 0,
            surface_found: false,
            config,
        }
    }

    /// Returns the active config.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Returns the object factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Returns the live placements for rendering.
    pub fn placements(&self) -> impl Iterator<Item = &PlacementEntry<S::Anchor, F::Object>> + '_ {
        self.placements.entries()
    }

    /// Returns the number of live placements.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Runs one frame against `session`.
    ///
    /// When the camera is not tracking, nothing is updated. Otherwise the
    /// planes are meshed, `taps` are turned into placements, and placed
    /// objects follow their anchors' updated poses.
    pub fn run_frame(&mut self, session: &mut S, taps: &[ScreenTap]) -> FrameOutput {
        if !session.camera_tracking_state().is_tracking() {
            return FrameOutput {
                status: FrameStatus::NotTracking,
                ..Default::default()
            };
        }

        let planes = session.planes();
        self.update_surface_status(&planes);

        let mut output = FrameOutput {
            status: if self.surface_found {
                FrameStatus::Ready
            } else {
                FrameStatus::SearchingForSurfaces
            },
            planes: self.build_plane_renderables(&planes),
            ..Default::default()
        };

        for tap in taps {
            match self.handle_tap(session, tap) {
                Some(true) => output.placed += 1,
                Some(false) => output.failed_placements += 1,
                None => {}
            }
        }

        output.synced = self.placements.sync_poses(session.updated_anchors());
        output
    }

    /// Detaches every anchor and empties the scene.
    pub fn shutdown(&mut self) {
        log::info!(
            "SceneAgent: shutting down, detaching {} placements",
            self.placements.len()
        );
        self.placements.clear();
    }

    fn update_surface_status(&mut self, planes: &[TrackedPlane]) {
        if self.surface_found {
            return;
        }
        if let Some(plane) = planes.iter().find(|p| {
            p.kind == PlaneKind::HorizontalUpwardFacing && p.tracking_state.is_tracking()
        }) {
            log::info!("SceneAgent: found first upward-facing surface {}", plane.id);
            self.surface_found = true;
        }
    }

    fn build_plane_renderables(&mut self, planes: &[TrackedPlane]) -> Vec<PlaneRenderable> {
        for plane in planes.iter().filter(|p| !p.is_renderable()) {
            if self.style_indices.remove(&plane.id).is_some() {
                log::debug!("SceneAgent: {} is gone, releasing its style", plane.id);
            }
        }

        let mut renderables = Vec::with_capacity(planes.len());
        for plane in planes.iter().filter(|p| p.is_renderable()) {
            let style_index = self.style_index_for(plane.id);
            match self.mesh_builder.build(&plane.polygon, style_index) {
                Ok(mesh) if mesh.is_empty() => {}
                Ok(mesh) => renderables.push(PlaneRenderable {
                    plane: plane.id,
                    mesh,
                    style: PlaneStyle::with_params(
                        style_index,
                        self.config.dots_per_meter,
                        self.config.grid_control,
                    ),
                    model: Mat4::from_translation(plane.center_pose.translation),
                }),
                Err(e) => {
                    log::warn!("SceneAgent: skipping {} this frame: {}", plane.id, e);
                }
            }
        }
        renderables
    }

    fn style_index_for(&mut self, plane: PlaneId) -> u32 {
        let next = &mut self.next_style_index;
        *self.style_indices.entry(plane).or_insert_with(|| {
            let index = *next;
            *next = next.wrapping_add(1);
            index
        })
    }

    /// Returns `None` if the tap was ignored, `Some(true)` if an object was
    /// placed and `Some(false)` if anchoring failed.
    fn handle_tap(&mut self, session: &mut S, tap: &ScreenTap) -> Option<bool> {
        if !self.factory.is_ready() {
            log::warn!("SceneAgent: object not ready, ignoring tap at ({}, {})", tap.x, tap.y);
            return None;
        }

        // Hits come nearest-first; only the closest hit inside a plane counts.
        let (plane, hit_pose) = session
            .hit_test(tap.x, tap.y)
            .into_iter()
            .find_map(|hit| hit.plane_inside_polygon().map(|plane| (plane, hit.pose)))?;

        let factory = &mut self.factory;
        let placed = self
            .placements
            .try_place(
                plane,
                &hit_pose,
                |pose| session.create_anchor(pose),
                || factory.create_instance(),
            )
            .is_ok();
        Some(placed)
    }
}
