//! Confetti particle model
//!
//! Pure kinematics for the confetti effect. Nothing in here touches the DOM,
//! so seeding and stepping can be tested natively with a seeded RNG.

use rand::Rng;
use std::f64::consts::PI;

/// Number of particles seeded per run
pub const PARTICLE_COUNT: usize = 120;

/// Added to the vertical velocity every frame (px/frame²)
pub const GRAVITY: f64 = 0.02;

/// Subtracted from the opacity every frame
pub const FADE_PER_FRAME: f64 = 0.0008;

/// Fill colors, picked uniformly per particle
pub const PALETTE: [&str; 5] = ["#ffffff", "#cfd8ff", "#ffd1f1", "#d2fff6", "#fff2c7"];

/// Particles start this far above the top edge, plus up to 30% of the viewport height
const SPAWN_OFFSET: f64 = 20.0;
const SPAWN_BAND: f64 = 0.3;

/// Viewport dimensions in CSS pixels plus the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Backing buffer size in device pixels
    pub fn buffer_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio) as u32,
            (self.height * self.pixel_ratio) as u32,
        )
    }
}

/// A single confetti piece
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Piece width; the height is `1.6 * radius`
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub rotation: f64,
    pub spin: f64,
    pub color: &'static str,
    pub opacity: f64,
}

impl Particle {
    /// Seed one particle somewhere above the visible area
    pub fn seed<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Self {
        Self {
            x: rng.gen::<f64>() * viewport.width,
            y: -SPAWN_OFFSET - rng.gen::<f64>() * viewport.height * SPAWN_BAND,
            radius: 4.0 + rng.gen::<f64>() * 6.0,
            vy: 2.0 + rng.gen::<f64>() * 4.0,
            vx: -1.5 + rng.gen::<f64>() * 3.0,
            rotation: rng.gen::<f64>() * PI,
            spin: -0.1 + rng.gen::<f64>() * 0.2,
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
            opacity: 0.8 + rng.gen::<f64>() * 0.2,
        }
    }

    /// Advance one frame: move, spin, fall faster, fade
    pub fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.rotation += self.spin;
        self.vy += GRAVITY;
        self.opacity = (self.opacity - FADE_PER_FRAME).max(0.0);
    }

    /// Rectangle to fill in the particle's local (translated, rotated) frame
    ///
    /// Returns `(x, y, width, height)`.
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        let half = self.radius / 2.0;
        (-half, -half, self.radius, self.radius * 1.6)
    }
}

/// Seed a full batch of `PARTICLE_COUNT` particles
pub fn seed_batch<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|_| Particle::seed(rng, viewport))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0, 2.0)
    }

    #[test]
    fn test_batch_size() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(seed_batch(&mut rng, &viewport()).len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_seeded_ranges() {
        let vp = viewport();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for p in seed_batch(&mut rng, &vp) {
                assert!(p.y < 0.0, "y = {}", p.y);
                assert!(p.y <= -20.0 && p.y >= -20.0 - 0.3 * vp.height);
                assert!((0.0..vp.width).contains(&p.x));
                assert!((4.0..10.0).contains(&p.radius));
                assert!((2.0..6.0).contains(&p.vy));
                assert!((-1.5..1.5).contains(&p.vx));
                assert!((0.0..PI).contains(&p.rotation));
                assert!((-0.1..0.1).contains(&p.spin));
                assert!((0.8..1.0).contains(&p.opacity));
                assert!(PALETTE.contains(&p.color));
            }
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let vp = viewport();
        let a = seed_batch(&mut StdRng::seed_from_u64(42), &vp);
        let b = seed_batch(&mut StdRng::seed_from_u64(42), &vp);
        assert_eq!(a, b);
    }

    #[test]
    fn test_step_applies_gravity_and_fade() {
        let mut p = Particle {
            x: 10.0,
            y: -30.0,
            radius: 5.0,
            vx: 1.0,
            vy: 2.0,
            rotation: 0.0,
            spin: 0.05,
            color: PALETTE[0],
            opacity: 0.9,
        };
        p.step();
        assert_eq!(p.x, 11.0);
        assert_eq!(p.y, -28.0);
        assert!((p.rotation - 0.05).abs() < 1e-12);
        assert!((p.vy - 2.02).abs() < 1e-12);
        assert!((p.opacity - 0.8992).abs() < 1e-12);
    }

    #[test]
    fn test_opacity_floors_at_zero() {
        let mut p = Particle::seed(&mut StdRng::seed_from_u64(1), &viewport());
        p.opacity = 0.0005;
        p.step();
        assert_eq!(p.opacity, 0.0);
        p.step();
        assert_eq!(p.opacity, 0.0);
    }

    #[test]
    fn test_rect_dimensions() {
        let mut p = Particle::seed(&mut StdRng::seed_from_u64(3), &viewport());
        p.radius = 8.0;
        assert_eq!(p.rect(), (-4.0, -4.0, 8.0, 12.8));
    }

    #[test]
    fn test_buffer_size_scales_with_ratio() {
        assert_eq!(Viewport::new(800.0, 600.0, 2.0).buffer_size(), (1600, 1200));
        assert_eq!(Viewport::new(801.5, 600.0, 1.5).buffer_size(), (1202, 900));
    }

    #[test]
    fn test_missing_ratio_defaults_to_one() {
        assert_eq!(Viewport::new(800.0, 600.0, 0.0).pixel_ratio, 1.0);
        assert_eq!(Viewport::new(800.0, 600.0, f64::NAN).pixel_ratio, 1.0);
    }
}
