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

//! Placement lane - objects anchored to tracked surfaces.

mod cache;

pub use cache::*;

use anchora_core::TrackingError;
use thiserror::Error;

/// An error that abandons a single placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The tracking subsystem refused to create an anchor at the hit pose.
    #[error("failed to create anchor: {0}")]
    AnchorCreation(#[from] TrackingError),
}
