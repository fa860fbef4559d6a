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

//! # Anchora Lanes
//!
//! Hot-path pipelines run once per frame: procedural boundary meshes for
//! tracked planes, and the fixed-capacity cache of anchored objects.

#![warn(missing_docs)]

pub mod placement_lane;
pub mod plane_lane;

pub use placement_lane::{PlacementCache, PlacementEntry, PlacementError};
pub use plane_lane::{BoundaryMesh, BoundaryMeshBuilder, MeshBuildError, PlaneStyle};
