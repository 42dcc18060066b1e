//! Blaster scheduler
//!
//! Owns the command queue, the pending spawn specs and every live blaster.
//! One `update` per frame runs, in order: command queue head, spawn
//! materialization, blaster stepping, beam collision, reaping.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Rect};
use super::blaster::{Blaster, BlasterEvent, BlasterId, BlasterParams, roll_spawn_point};
use super::collision::blaster_hits_soul;
use super::soul::Soul;
use super::state::GameEvent;
use crate::audio::{AudioPolicy, CooldownAudioPolicy, SoundCue};
use crate::sanitize_dt;
use crate::tuning::{BeamTuning, BlasterTuning, Tuning};

/// One step of an attack script
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Block the queue until `duration_ms` has elapsed
    Wait { duration_ms: f32 },
    /// Queue a blaster (consumed immediately, never blocks)
    Spawn {
        pos: Vec2,
        angle: f32,
        open_delay_ms: f32,
        beam_ms: f32,
    },
}

impl Command {
    pub fn wait(duration_ms: f32) -> Self {
        Command::Wait { duration_ms }
    }

    pub fn spawn(pos: Vec2, angle: f32, open_delay_ms: f32, beam_ms: f32) -> Self {
        Command::Spawn {
            pos,
            angle,
            open_delay_ms,
            beam_ms,
        }
    }

    pub fn is_spawn(&self) -> bool {
        matches!(self, Command::Spawn { .. })
    }
}

/// A spawn spec waiting for (or bound to) its blaster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingSpawn {
    pub params: BlasterParams,
    /// Set once materialized; a spec spawns at most once
    pub blaster: Option<BlasterId>,
}

impl PendingSpawn {
    pub fn is_spawned(&self) -> bool {
        self.blaster.is_some()
    }
}

#[derive(Debug)]
pub struct Scheduler<A: AudioPolicy = CooldownAudioPolicy> {
    commands: VecDeque<Command>,
    /// Time accumulated against the head `Wait`
    wait_ms: f32,
    pending: Vec<PendingSpawn>,
    live: Vec<Blaster>,
    next_id: u32,
    clock_ms: f64,
    audio: A,
    blaster_tuning: BlasterTuning,
    beam_tuning: BeamTuning,
    keep_alive: Rect,
    beam_damage: u32,
}

impl<A: AudioPolicy> Scheduler<A> {
    pub fn new(tuning: &Tuning, arena: &Arena, audio: A) -> Self {
        Self {
            commands: VecDeque::new(),
            wait_ms: 0.0,
            pending: Vec::new(),
            live: Vec::new(),
            next_id: 1,
            clock_ms: 0.0,
            audio,
            blaster_tuning: tuning.blaster.clone(),
            beam_tuning: tuning.beam.clone(),
            keep_alive: arena.keep_alive_bounds(),
            beam_damage: tuning.scheduler.beam_damage,
        }
    }

    /// Replace the command queue
    pub fn sequence(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.commands = commands.into_iter().collect();
        self.wait_ms = 0.0;
    }

    /// Queue a blaster outside the command queue (materializes next update)
    pub fn spawn_blaster(&mut self, pos: Vec2, angle: f32, open_delay_ms: f32, beam_ms: f32) {
        self.pending.push(PendingSpawn {
            params: BlasterParams {
                target_pos: pos,
                target_angle: angle,
                open_delay_ms,
                beam_ms,
            },
            blaster: None,
        });
    }

    /// Drop every command, pending spec and live blaster
    pub fn clear(&mut self) {
        self.commands.clear();
        self.wait_ms = 0.0;
        self.pending.clear();
        self.live.clear();
    }

    /// Advance one frame
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        soul: &mut Soul,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) {
        let dt = sanitize_dt(dt);
        self.clock_ms += dt as f64;

        self.advance_commands(dt);
        self.materialize(rng, events);

        for blaster in &mut self.live {
            match blaster.update(dt) {
                Some(BlasterEvent::OpenStarted) => {
                    events.push(GameEvent::BlasterOpened {
                        id: blaster.id,
                        pos: blaster.pos,
                    });
                }
                Some(BlasterEvent::FireStarted) => {
                    events.push(GameEvent::BlasterFired {
                        id: blaster.id,
                        angle: blaster.target_angle,
                    });
                    self.audio.offer(SoundCue::Fire, self.clock_ms);
                }
                None => {}
            }
        }

        for blaster in &self.live {
            if blaster_hits_soul(blaster, soul) && soul.take_damage(self.beam_damage) {
                events.push(GameEvent::DamageApplied {
                    amount: self.beam_damage,
                    position: soul.pos,
                });
            }
        }

        self.reap();
    }

    /// Progress the queue head only
    fn advance_commands(&mut self, dt: f32) {
        let Some(&head) = self.commands.front() else {
            return;
        };

        match head {
            Command::Wait { duration_ms } => {
                self.wait_ms += dt;
                if self.wait_ms >= duration_ms {
                    self.wait_ms = 0.0;
                    self.commands.pop_front();
                }
            }
            Command::Spawn {
                pos,
                angle,
                open_delay_ms,
                beam_ms,
            } => {
                self.spawn_blaster(pos, angle, open_delay_ms, beam_ms);
                self.commands.pop_front();
            }
        }
    }

    /// Turn every unspawned spec into a live blaster
    fn materialize<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<GameEvent>) {
        for spec in self.pending.iter_mut().filter(|s| !s.is_spawned()) {
            let id = BlasterId(self.next_id);
            self.next_id += 1;

            let spawn = roll_spawn_point(&self.blaster_tuning.spawn_jitter, rng);
            let blaster = Blaster::new(
                id,
                spec.params,
                spawn,
                &self.blaster_tuning,
                &self.beam_tuning,
            );
            spec.blaster = Some(id);
            self.live.push(blaster);

            events.push(GameEvent::BlasterCharged {
                id,
                target: spec.params.target_pos,
            });
            self.audio.offer(SoundCue::Charge, self.clock_ms);
        }
    }

    /// Mark-and-compact: drop spent or escaped firing blasters and their specs
    fn reap(&mut self) {
        let keep_alive = self.keep_alive;
        let before = self.live.len();
        self.live.retain(|b| {
            let done = b.beam().is_some() && (b.is_spent() || b.is_out_of_bounds(&keep_alive));
            !done
        });

        if self.live.len() != before {
            log::trace!("Reaped {} blasters", before - self.live.len());
            let live = &self.live;
            self.pending.retain(|spec| match spec.blaster {
                None => true,
                Some(id) => live.iter().any(|b| b.id == id),
            });
        }
    }

    pub fn live(&self) -> &[Blaster] {
        &self.live
    }

    pub fn pending(&self) -> &[PendingSpawn] {
        &self.pending
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn head(&self) -> Option<&Command> {
        self.commands.front()
    }

    /// Nothing queued, pending or alive
    pub fn is_idle(&self) -> bool {
        self.commands.is_empty() && self.live.is_empty() && self.pending.iter().all(|s| s.is_spawned())
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Accepted sound cues since the last call
    pub fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        self.audio.drain()
    }
}
