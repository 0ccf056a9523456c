use crate::config::FireworksConfig;
use crate::render::{DrawCommand, Rgb};

/// A decaying fragment of an exploded shell.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: Rgb,
    /// Remaining ticks; the particle stops drawing once this is <= 0.
    pub life: f64,
    pub alpha: f64,
}

impl Particle {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, color: Rgb, life: f64) -> Self {
        Self { x, y, vx, vy, color, life, alpha: 1.0 }
    }

    pub fn update(&mut self, config: &FireworksConfig) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += config.gravity;
        self.alpha = (self.alpha - config.opacity_decay).max(0.0);
        self.life -= 1.0;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn draw(&self, config: &FireworksConfig, frame: &mut Vec<DrawCommand>) {
        if self.is_alive() && self.alpha > 0.0 {
            frame.push(DrawCommand::Circle {
                x: self.x,
                y: self.y,
                radius: config.particle_radius,
                color: self.color.with_alpha(self.alpha),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

    #[test]
    fn integrates_velocity_with_gravity() {
        let cfg = FireworksConfig::default();
        let mut p = Particle::new(10.0, 10.0, 1.0, -2.0, RED, 120.0);
        p.update(&cfg);
        assert_eq!((p.x, p.y), (11.0, 8.0));
        assert!((p.vy - (-2.0 + cfg.gravity)).abs() < 1e-12);
        assert_eq!(p.life, 119.0);
        assert!((p.alpha - 0.99).abs() < 1e-12);
    }

    #[test]
    fn opacity_never_goes_negative_or_up() {
        let cfg = FireworksConfig::default();
        let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, RED, 149.0);
        let mut last = p.alpha;
        for _ in 0..200 {
            p.update(&cfg);
            assert!(p.alpha <= last);
            assert!(p.alpha >= 0.0);
            last = p.alpha;
        }
        assert_eq!(p.alpha, 0.0);
    }

    fn ticks_until_expired(mut p: Particle, cfg: &FireworksConfig) -> Particle {
        while p.is_alive() {
            p.update(cfg);
        }
        p
    }

    #[test]
    fn shortest_lived_particle_is_transparent_when_it_expires() {
        let cfg = FireworksConfig::default();
        let p = Particle::new(0.0, 0.0, 1.0, 1.0, RED, cfg.particle_lifetime.start);
        let p = ticks_until_expired(p, &cfg);
        assert!(p.alpha <= 0.0, "alpha {} at expiry", p.alpha);
    }

    #[test]
    fn sampled_lifetimes_fade_out_before_expiry() {
        let cfg = FireworksConfig::default();
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..200 {
            let life = crate::sim::sample(&mut rng, &cfg.particle_lifetime);
            let p = ticks_until_expired(Particle::new(0.0, 0.0, 0.0, 0.0, RED, life), &cfg);
            assert!(p.alpha <= 0.0, "life {life} left alpha {}", p.alpha);
        }
    }

    #[test]
    fn expired_particle_is_not_drawn() {
        let cfg = FireworksConfig::default();
        let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, RED, 1.0);
        let mut frame = Vec::new();
        p.draw(&cfg, &mut frame);
        assert_eq!(frame.len(), 1);

        p.update(&cfg);
        assert!(!p.is_alive());
        frame.clear();
        p.draw(&cfg, &mut frame);
        assert!(frame.is_empty());
    }
}
