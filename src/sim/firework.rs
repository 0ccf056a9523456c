use std::f64::consts::TAU;

use super::{Particle, sample};
use crate::config::FireworksConfig;
use crate::render::{DrawCommand, Rgb};

/// Shell state. A shell never carries particles while ascending and never
/// moves once it has burst.
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    Ascending,
    Exploded(Vec<Particle>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Firework {
    pub x: f64,
    pub y: f64,
    pub target_y: f64,
    pub color: Rgb,
    pub stage: Stage,
}

impl Firework {
    pub fn new(x: f64, y: f64, target_y: f64, color: Rgb) -> Self {
        Self { x, y, target_y, color, stage: Stage::Ascending }
    }

    pub fn is_exploded(&self) -> bool {
        matches!(self.stage, Stage::Exploded(_))
    }

    pub fn particles(&self) -> &[Particle] {
        match &self.stage {
            Stage::Ascending => &[],
            Stage::Exploded(particles) => particles,
        }
    }

    /// Burst with every particle expired; the simulation drops it.
    pub fn is_spent(&self) -> bool {
        match &self.stage {
            Stage::Ascending => false,
            Stage::Exploded(particles) => particles.iter().all(|p| !p.is_alive()),
        }
    }

    pub fn update(&mut self, config: &FireworksConfig, rng: &mut fastrand::Rng) {
        match &mut self.stage {
            Stage::Ascending => {
                self.y -= config.ascent_speed;
                if self.y <= self.target_y {
                    self.stage = Stage::Exploded(self.burst(config, rng));
                }
            }
            Stage::Exploded(particles) => {
                for p in particles.iter_mut() {
                    p.update(config);
                }
            }
        }
    }

    pub fn draw(&self, config: &FireworksConfig, frame: &mut Vec<DrawCommand>) {
        match &self.stage {
            Stage::Ascending => frame.push(DrawCommand::Circle {
                x: self.x,
                y: self.y,
                radius: config.shell_radius,
                color: self.color.with_alpha(1.0),
            }),
            Stage::Exploded(particles) => {
                for p in particles {
                    p.draw(config, frame);
                }
            }
        }
    }

    // Evenly spaced directions, random speed per particle.
    fn burst(&self, config: &FireworksConfig, rng: &mut fastrand::Rng) -> Vec<Particle> {
        let n = config.particle_count;
        (0..n)
            .map(|i| {
                let angle = TAU * i as f64 / n as f64;
                let speed = sample(rng, &config.particle_speed);
                let life = sample(rng, &config.particle_lifetime);
                Particle::new(
                    self.x,
                    self.y,
                    angle.cos() * speed,
                    angle.sin() * speed,
                    self.color,
                    life,
                )
            })
            .collect()
    }
}
