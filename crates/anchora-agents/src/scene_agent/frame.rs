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

use anchora_core::{math::Mat4, PlaneId, Posable};
use anchora_lanes::plane_lane::{BoundaryMesh, PlaneStyle};

/// A touch on the screen, in the pixel coordinates the tracker hit-tests with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTap {
    /// Horizontal screen coordinate.
    pub x: f32,
    /// Vertical screen coordinate.
    pub y: f32,
}

impl ScreenTap {
    /// Creates a tap at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the host should tell the user about the scene this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameStatus {
    /// The camera lost tracking; nothing was updated.
    #[default]
    NotTracking,
    /// No upward-facing surface has been found yet.
    SearchingForSurfaces,
    /// At least one upward-facing surface has been found during the session.
    Ready,
}

/// One plane ready to be drawn.
#[derive(Debug, Clone)]
pub struct PlaneRenderable {
    /// The plane this mesh visualizes.
    pub plane: PlaneId,
    /// Boundary mesh in the plane's local frame.
    pub mesh: BoundaryMesh,
    /// Shader parameters for the plane.
    pub style: PlaneStyle,
    /// Model matrix placing the mesh at the plane's center.
    pub model: Mat4,
}

/// Everything the agent produced for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// The scene status for this frame.
    pub status: FrameStatus,
    /// Meshes for every live plane.
    pub planes: Vec<PlaneRenderable>,
    /// Objects placed from this frame's taps.
    pub placed: usize,
    /// Taps that hit a plane but could not be anchored.
    pub failed_placements: usize,
    /// Placed objects moved to a new anchor pose.
    pub synced: usize,
}

/// Produces the objects that get placed on tapped surfaces.
///
/// The factory may load its model asynchronously; taps arriving before it is
/// ready are dropped.
pub trait ObjectFactory {
    /// The object type handed to the placement cache.
    type Object: Posable;

    /// Returns `true` once instances can be created.
    fn is_ready(&self) -> bool {
        true
    }

    /// Creates a new instance of the placeable model.
    fn create_instance(&mut self) -> Self::Object;
}
