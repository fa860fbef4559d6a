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

use crate::math::{Mat4, Quaternion, Vec3};
use crate::tracking::Pose;

/// Anything whose world placement can be driven by a tracking [`Pose`].
///
/// Placed objects are opaque renderables owned by the asset layer; the core
/// only ever overwrites their translation and rotation through this trait.
pub trait Posable {
    /// Replaces the object's translation and rotation with those of `pose`.
    ///
    /// This is a full replace, never an interpolation.
    fn apply_pose(&mut self, pose: &Pose);
}

/// Describes an object's position, rotation, and scale in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The translation (position) of the object.
    pub translation: Vec3,
    /// The rotation of the object, represented as a quaternion.
    pub rotation: Quaternion,
    /// The scale of the object.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a new `Transform` with a given translation, rotation, and scale.
    pub fn new(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Creates a new identity `Transform`.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Calculates the model matrix in the standard `Scale -> Rotate -> Translate` order.
    pub fn to_mat4(&self) -> Mat4 {
        // T * R * S
        Mat4::from_translation(self.translation)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    /// Returns the identity `Transform`.
    fn default() -> Self {
        Self::identity()
    }
}

impl Posable for Transform {
    fn apply_pose(&mut self, pose: &Pose) {
        self.translation = pose.translation;
        self.rotation = pose.rotation;
    }
}
