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

use thiserror::Error;

/// An error reported by the tracking subsystem when it cannot honor a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// The surface or camera the request depends on is not currently tracked.
    #[error("the tracking subsystem is not tracking the requested surface")]
    NotTracking,
    /// The tracking session is paused and cannot create new anchors.
    #[error("the tracking session is paused")]
    SessionPaused,
    /// The tracking subsystem ran out of anchor slots or other resources.
    #[error("the tracking subsystem has exhausted its resources: {0}")]
    ResourceExhausted(String),
}
