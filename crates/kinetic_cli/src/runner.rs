//! Headless frame loop

use crate::config::KineticConfig;
use crate::demos::{Demo, SHAPE};
use anyhow::{Context, Result};
use kinetic_animation::{AnimationScheduler, FinalPosition};
use kinetic_core::{AnimatableValue, PropertyKey};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Scene values at one point in simulated time
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub index: u32,
    pub time: f32,
    pub values: Vec<(PropertyKey, AnimatableValue)>,
}

impl Frame {
    pub fn value(&self, key: PropertyKey) -> Option<AnimatableValue> {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }
}

/// Outcome of running a demo
#[derive(Debug)]
pub struct RunReport {
    pub demo: Demo,
    pub frames: Vec<Frame>,
    pub completion: Option<FinalPosition>,
    pub timed_out: bool,
}

/// Run a demo at the configured frame rate until it finishes
pub fn run(demo: Demo, config: &KineticConfig) -> Result<RunReport> {
    let playback = &config.playback;
    let shape = config.shape.snapshot(SHAPE)?;

    let mut plan = demo
        .plan(&shape)
        .with_context(|| format!("Failed to set up demo {}", demo.name()))?;

    let completion = Rc::new(Cell::new(None));
    let sink = completion.clone();
    plan.animator
        .add_completion(move |position| sink.set(Some(position)))?;

    let mut scheduler = AnimationScheduler::with_policy(config.scheduler.duplicate_policy.into());
    scheduler.set_target_fps(playback.fps);
    for (key, value) in shape.iter() {
        scheduler.scene_mut().set(key, value);
    }
    let id = scheduler.add(plan.animator)?;

    let dt = 1.0 / playback.fps as f32;
    let mut script = plan.script.into_iter().peekable();
    let mut frames = Vec::new();
    let mut index = 0u32;
    let mut timed_out = false;

    info!(demo = demo.name(), fps = playback.fps, "running demo");

    loop {
        let time = index as f32 * dt;

        // Half a frame of slack so steps land on the frame nearest their time
        while let Some(step) = script.next_if(|step| step.at <= time + dt * 0.5) {
            debug!(at = step.at, action = ?step.action, "applying scripted action");
            step.action
                .apply(&mut scheduler, id)
                .with_context(|| format!("Scripted action at {:.2}s failed", step.at))?;
        }

        if index > 0 {
            scheduler.tick(dt);
        }

        let finished = !scheduler.has_active_animations() && script.peek().is_none();
        if index % playback.sample_every == 0 || finished {
            frames.push(Frame {
                index,
                time,
                values: scheduler.scene().iter().collect(),
            });
        }

        if finished {
            break;
        }
        if time >= playback.max_duration {
            warn!(
                demo = demo.name(),
                max_duration = playback.max_duration,
                "demo did not finish in time"
            );
            timed_out = true;
            break;
        }
        index += 1;
    }

    let completion = completion.get();
    info!(demo = demo.name(), ?completion, frames = index, "demo finished");

    Ok(RunReport {
        demo,
        frames,
        completion,
        timed_out,
    })
}
