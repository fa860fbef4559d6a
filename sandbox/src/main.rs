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

// Anchora Sandbox
// Runs a scripted session through the scene agent and logs what a renderer would draw.

mod simulated;

use std::cell::Cell;
use std::rc::Rc;

use anchora_agents::scene_agent::{
    FrameStatus, ObjectFactory, SceneAgent, SceneConfig, ScreenTap,
};
use anchora_core::Transform;
use anyhow::{Context, Result};

use simulated::SimulatedSession;

const FRAME_COUNT: u32 = 48;
/// Frame at which the model finishes loading.
const MODEL_LOADED_FRAME: u32 = 6;

/// Hands out plain transforms once the (pretend) model has loaded.
struct ModelFactory {
    loaded: Rc<Cell<bool>>,
}

impl ObjectFactory for ModelFactory {
    type Object = Transform;

    fn is_ready(&self) -> bool {
        self.loaded.get()
    }

    fn create_instance(&mut self) -> Transform {
        Transform::identity()
    }
}

fn load_config() -> Result<SceneConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read scene config {path}"))?;
            let config = SceneConfig::from_ron_str(&text)
                .with_context(|| format!("invalid scene config {path}"))?;
            log::info!("Sandbox: loaded config from {}", path);
            Ok(config)
        }
        None => Ok(SceneConfig::default()),
    }
}

/// Two taps per frame on even frames, alternating between the top (a miss)
/// and the bottom (the floor) of the screen.
fn scripted_taps(frame: u32) -> Vec<ScreenTap> {
    if frame % 2 != 0 {
        return Vec::new();
    }
    let x = 120.0 + (frame % 9) as f32 * 100.0;
    vec![ScreenTap::new(x, 400.0), ScreenTap::new(x, 1500.0)]
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Sandbox: {:?}", config);

    let loaded = Rc::new(Cell::new(false));
    let factory = ModelFactory {
        loaded: loaded.clone(),
    };
    let mut agent = SceneAgent::new(config, factory)?;
    let mut session = SimulatedSession::default();
    let mut last_status = None;

    for _ in 0..FRAME_COUNT {
        if session.frame() == MODEL_LOADED_FRAME {
            loaded.set(true);
            log::info!("Sandbox: model loaded");
        }

        let taps = scripted_taps(session.frame());
        let output = agent.run_frame(&mut session, &taps);

        if last_status != Some(output.status) {
            match output.status {
                FrameStatus::NotTracking => log::info!("Sandbox: waiting for tracking..."),
                FrameStatus::SearchingForSurfaces => log::info!("Sandbox: searching for surfaces..."),
                FrameStatus::Ready => log::info!("Sandbox: surfaces found, tap to place"),
            }
            last_status = Some(output.status);
        }

        let index_total: usize = output.planes.iter().map(|p| p.mesh.indices.len()).sum();
        for renderable in &output.planes {
            let mesh = &renderable.mesh;
            log::trace!(
                "Sandbox: upload {} vertex={}B stride={} index={}B {:?}/{:?}",
                renderable.plane,
                mesh.vertex_bytes().len(),
                mesh.vertex_stride(),
                mesh.index_bytes().len(),
                mesh.primitive_topology(),
                mesh.index_format()
            );
        }
        log::debug!(
            "Sandbox: frame {} planes={} indices={} placed={} failed={} synced={} live={}",
            session.frame(),
            output.planes.len(),
            index_total,
            output.placed,
            output.failed_placements,
            output.synced,
            agent.placement_count()
        );

        session.advance();
    }

    for entry in agent.placements() {
        let t = entry.object().to_mat4().translation();
        log::info!(
            "Sandbox: {} on {} at ({:.3}, {:.3}, {:.3})",
            entry.anchor_id(),
            entry.plane(),
            t.x,
            t.y,
            t.z
        );
    }

    agent.shutdown();
    Ok(())
}
