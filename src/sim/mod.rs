//! Fireworks particle simulation.
//!
//! `Simulation` owns every live shell plus the queue of deferred launches and
//! advances them one animation frame per `tick`. It never touches the canvas:
//! each tick returns the draw commands for that frame, so the whole loop can be
//! driven deterministically from tests with a seeded RNG.

mod firework;
mod particle;

pub use firework::{Firework, Stage};
pub use particle::Particle;

use std::collections::VecDeque;
use std::ops::Range;

use crate::config::FireworksConfig;
use crate::render::{DrawCommand, Rgb};

pub(crate) fn sample(rng: &mut fastrand::Rng, range: &Range<f64>) -> f64 {
    range.start + rng.f64() * (range.end - range.start)
}

/// Launch times (ms, same clock as `tick`) waiting to fire, oldest first.
/// Entries cannot be cancelled once queued.
#[derive(Clone, Debug, Default)]
pub struct LaunchQueue {
    due: VecDeque<f64>,
}

impl LaunchQueue {
    pub fn schedule(&mut self, at_ms: f64) {
        let idx = self.due.partition_point(|&t| t <= at_ms);
        self.due.insert(idx, at_ms);
    }

    /// Pop every launch due at or before `now_ms`, returning how many fired.
    pub fn take_due(&mut self, now_ms: f64) -> usize {
        let n = self.due.partition_point(|&t| t <= now_ms);
        self.due.drain(..n);
        n
    }

    pub fn len(&self) -> usize {
        self.due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.due.iter().copied()
    }
}

pub struct Simulation {
    config: FireworksConfig,
    width: f64,
    height: f64,
    fireworks: Vec<Firework>,
    queue: LaunchQueue,
    rng: fastrand::Rng,
}

impl Simulation {
    pub fn new(config: FireworksConfig, width: f64, height: f64, seed: u64) -> Self {
        Self {
            config,
            width,
            height,
            fireworks: Vec::new(),
            queue: LaunchQueue::default(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn launch_queue(&self) -> &LaunchQueue {
        &self.queue
    }

    /// Fire one shell from the bottom edge. The spawn band is wider than the
    /// canvas so bursts also bloom in from the sides.
    pub fn launch_firework(&mut self) {
        let x = self.rng.f64() * self.width * 1.5 - self.width * 0.25;
        let target_y = self.rng.f64() * self.height / 2.0;
        let color = Rgb {
            r: self.rng.u8(..255),
            g: self.rng.u8(..255),
            b: self.rng.u8(..255),
        };
        self.fireworks.push(Firework::new(x, self.height, target_y, color));
    }

    /// Queue the celebration salvo: `burst_size` launches spaced
    /// `burst_interval_ms` apart, the first one at `now_ms`.
    pub fn schedule_burst(&mut self, now_ms: f64) {
        for i in 0..self.config.burst_size {
            self.queue.schedule(now_ms + i as f64 * self.config.burst_interval_ms);
        }
        log::info!(
            "scheduled {} fireworks over {} ms",
            self.config.burst_size,
            self.config.burst_size as f64 * self.config.burst_interval_ms
        );
    }

    /// Advance one animation frame and return what to paint.
    pub fn tick(&mut self, now_ms: f64) -> Vec<DrawCommand> {
        for _ in 0..self.queue.take_due(now_ms) {
            self.launch_firework();
        }

        let mut frame = Vec::with_capacity(1 + self.fireworks.len());
        frame.push(DrawCommand::FillRect {
            x: 0.0,
            y: 0.0,
            width: self.width,
            height: self.height,
            color: Rgb::BLACK.with_alpha(self.config.trail_alpha),
        });

        let active = std::mem::take(&mut self.fireworks);
        let mut survivors = Vec::with_capacity(active.len());
        for mut fw in active {
            fw.update(&self.config, &mut self.rng);
            fw.draw(&self.config, &mut frame);
            if !fw.is_spent() {
                survivors.push(fw);
            }
        }
        self.fireworks = survivors;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::new(FireworksConfig::default(), 800.0, 600.0, 1234)
    }

    #[test]
    fn launch_spawns_at_bottom_within_bounds() {
        let mut s = sim();
        for _ in 0..500 {
            s.launch_firework();
        }
        for fw in s.fireworks() {
            assert_eq!(fw.y, 600.0);
            assert!((-200.0..1000.0).contains(&fw.x), "x = {}", fw.x);
            assert!((0.0..300.0).contains(&fw.target_y), "target = {}", fw.target_y);
            assert!(fw.color.r < 255 && fw.color.g < 255 && fw.color.b < 255);
            assert!(!fw.is_exploded());
        }
    }

    #[test]
    fn burst_offsets_are_spaced_and_increasing() {
        let mut s = sim();
        s.schedule_burst(1_000.0);
        let offsets: Vec<f64> = s.launch_queue().iter().map(|t| t - 1_000.0).collect();
        let expected: Vec<f64> = (0..100).map(|i| i as f64 * 100.0).collect();
        assert_eq!(offsets, expected);
    }

    #[test]
    fn queued_launches_fire_when_due() {
        let mut s = sim();
        s.schedule_burst(0.0);
        s.tick(0.0);
        assert_eq!(s.fireworks().len(), 1);
        s.tick(250.0);
        assert_eq!(s.fireworks().len(), 3);
        assert_eq!(s.launch_queue().len(), 97);
        s.tick(10_000.0);
        assert!(s.launch_queue().is_empty());
        assert_eq!(s.fireworks().len(), 100);
    }

    #[test]
    fn overlapping_schedules_stay_ordered() {
        let mut q = LaunchQueue::default();
        q.schedule(300.0);
        q.schedule(100.0);
        q.schedule(200.0);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![100.0, 200.0, 300.0]);
        assert_eq!(q.take_due(200.0), 2);
        assert_eq!(q.iter().collect::<Vec<_>>(), vec![300.0]);
    }

    #[test]
    fn tick_starts_with_trail_overlay() {
        let mut s = sim();
        let frame = s.tick(0.0);
        assert_eq!(
            frame,
            vec![DrawCommand::FillRect {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0,
                color: Rgb::BLACK.with_alpha(0.1),
            }]
        );
    }

    #[test]
    fn fireworks_leave_only_after_all_particles_expire() {
        let mut s = sim();
        for _ in 0..20 {
            s.launch_firework();
        }
        let mut t = 0.0;
        while !s.fireworks().is_empty() {
            let before = s.fireworks().to_vec();
            s.tick(t);
            t += 16.0;
            // Anything that disappeared must have been one tick from spent.
            let removed = before.len() - s.fireworks().len();
            let about_to_expire = before
                .iter()
                .filter(|fw| fw.is_exploded() && fw.particles().iter().all(|p| p.life <= 1.0))
                .count();
            assert!(removed <= about_to_expire);
            assert!(t < 1_000_000.0, "simulation never drained");
        }
    }
}
