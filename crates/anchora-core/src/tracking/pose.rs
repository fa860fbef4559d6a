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

use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// A rigid pose reported by the tracking subsystem: a world-space translation
/// and a rotation quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position.
    pub translation: Vec3,
    /// World-space orientation.
    pub rotation: Quaternion,
}

impl Pose {
    /// The pose at the world origin with no rotation.
    pub const IDENTITY: Pose = Pose {
        translation: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
    };

    /// Creates a pose from a translation and a rotation.
    #[inline]
    pub const fn new(translation: Vec3, rotation: Quaternion) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Creates a pose with the given translation and no rotation.
    #[inline]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quaternion::IDENTITY)
    }

    /// Creates a pose from the raw `(tx, ty, tz)` and `(qx, qy, qz, qw)` components
    /// in the order tracking backends usually expose them.
    #[allow(clippy::too_many_arguments)]
    pub const fn from_components(
        tx: f32,
        ty: f32,
        tz: f32,
        qx: f32,
        qy: f32,
        qz: f32,
        qw: f32,
    ) -> Self {
        Self::new(Vec3::new(tx, ty, tz), Quaternion::new(qx, qy, qz, qw))
    }
}
