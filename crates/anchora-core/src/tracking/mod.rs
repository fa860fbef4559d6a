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

//! Interface contracts with the external spatial-tracking subsystem.
//!
//! The tracking subsystem owns surface detection, pose estimation, and anchor
//! lifetimes. This module only describes what it hands to the core each frame
//! (planes, hit results, updated anchors) and the two calls the core makes back
//! into it (anchor creation and anchor detachment).

mod anchor;
mod error;
mod plane;
mod pose;

pub use anchor::*;
pub use error::*;
pub use plane::*;
pub use pose::*;

/// The tracking state of the camera, a plane, or an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackingState {
    /// Actively tracked; poses are current.
    Tracking,
    /// Temporarily lost; may resume later.
    #[default]
    Paused,
    /// No longer tracked and will never resume.
    Stopped,
}

impl TrackingState {
    /// Returns `true` if the state is [`TrackingState::Tracking`].
    #[inline]
    pub fn is_tracking(&self) -> bool {
        matches!(self, TrackingState::Tracking)
    }
}
