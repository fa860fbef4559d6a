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

//! Acts as the **[A]gent** for the AR scene.
//!
//! Each frame it reads the tracking session, rebuilds the boundary mesh of
//! every live plane through the plane lane, turns screen taps into anchored
//! objects through the placement lane, and moves already-placed objects to
//! their anchors' latest poses. The host renderer draws whatever the agent
//! hands back.

mod agent;
mod config;
mod frame;

pub use agent::*;
pub use config::*;
pub use frame::*;
