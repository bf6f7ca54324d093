//! Background decor: drifting clouds and the day/night sky

use glam::{Vec2, Vec3};
use rand::Rng;

use super::actor::Actor;
use crate::consts::{CLOUD_FALL_FACTOR, HALF_DAY_MS, SKY_BRIGHT, SKY_DARK};
use crate::settings::Settings;
use crate::{random_choice, random_range};

/// A decorative cloud. Drifts sideways, bounces off the sides, wraps vertically.
#[derive(Debug, Clone)]
pub struct Cloud {
    pub actor: Actor,
}

impl Cloud {
    pub fn spawn<R: Rng>(settings: &Settings, rng: &mut R) -> Option<Self> {
        let visual = random_choice(rng, &settings.cloud_assets)?.clone();
        let pos = Vec2::new(
            rng.random::<f32>() * settings.viewport_width,
            rng.random::<f32>() * settings.viewport_height,
        );
        let w = random_range(rng, 2.0, 3.0) * settings.cell_size;
        let mut actor = Actor::new(pos, Vec2::new(w, w * 0.7), visual);
        let direction = if rng.random::<f32>() > 0.5 { 1.0 } else { -1.0 };
        actor.vel.x = direction * random_range(rng, 0.4, 1.1) * settings.base_speed();
        Some(Self { actor })
    }

    /// Clouds always fall at a fixed fraction of the base speed
    pub fn set_fall_speed(&mut self, base_speed: f32) {
        self.actor.vel.y = base_speed * CLOUD_FALL_FACTOR;
    }

    pub fn advance(&mut self, last_ms: f64, now_ms: f64, viewport: Vec2) {
        self.actor.advance(last_ms, now_ms);
        // Off either side: head back toward the screen
        let a = &mut self.actor;
        if a.pos.x > viewport.x {
            a.vel.x = -a.vel.x.abs();
        } else if a.pos.x + a.size.x < 0.0 {
            a.vel.x = a.vel.x.abs();
        }
        if a.pos.y > viewport.y {
            a.pos.y = -a.size.y;
        }
    }
}

/// Create the session's clouds
pub fn spawn_clouds<R: Rng>(settings: &Settings, rng: &mut R) -> Vec<Cloud> {
    (0..settings.cloud_count)
        .filter_map(|_| Cloud::spawn(settings, rng))
        .collect()
}

/// Sky color (RGB 0-255) for the time since the session started.
///
/// Even half-days fade bright -> dark, odd half-days fade back.
pub fn sky_color(elapsed_ms: f64) -> Vec3 {
    let elapsed_ms = elapsed_ms.max(0.0);
    let half_days = (elapsed_ms / HALF_DAY_MS).floor() as u64;
    let time_of_day = (elapsed_ms % HALF_DAY_MS / HALF_DAY_MS) as f32;
    let brightness = if half_days % 2 == 0 {
        1.0 - time_of_day
    } else {
        time_of_day
    };
    let dark = Vec3::from_array(SKY_DARK);
    let bright = Vec3::from_array(SKY_BRIGHT);
    dark.lerp(bright, brightness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn close(a: Vec3, b: [f32; 3]) -> bool {
        (a - Vec3::from_array(b)).length() < 1e-3
    }

    #[test]
    fn test_sky_cycle() {
        assert!(close(sky_color(0.0), SKY_BRIGHT));
        assert!(close(sky_color(5000.0), [85.0, 125.5, 147.5]));
        assert!(close(sky_color(10_000.0), SKY_DARK));
        assert!(close(sky_color(15_000.0), [85.0, 125.5, 147.5]));
        assert!(close(sky_color(20_000.0), SKY_BRIGHT));
    }

    #[test]
    fn test_sky_is_continuous_at_half_day() {
        let before = sky_color(9_999.0);
        let after = sky_color(10_001.0);
        assert!((before - after).length() < 1.0);
    }

    #[test]
    fn test_clouds_spawn_within_viewport() {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let clouds = spawn_clouds(&settings, &mut rng);
        assert_eq!(clouds.len(), 5);
        for cloud in &clouds {
            let a = &cloud.actor;
            assert!(a.pos.x >= 0.0 && a.pos.x <= settings.viewport_width);
            assert!(a.size.x >= 240.0 && a.size.x <= 360.0);
            assert!((a.size.y - a.size.x * 0.7).abs() < 1e-3);
            assert!(a.vel.x.abs() >= 0.4 * 0.12 - 1e-6);
        }
    }

    #[test]
    fn test_cloud_wraps_and_bounces() {
        let settings = Settings::default();
        let viewport = Vec2::new(settings.viewport_width, settings.viewport_height);
        let mut rng = Pcg32::seed_from_u64(6);
        let mut cloud = Cloud::spawn(&settings, &mut rng).unwrap();

        cloud.actor.pos = Vec2::new(490.0, 730.0);
        cloud.actor.vel = Vec2::new(0.1, 0.1);
        cloud.advance(0.0, 10.0, viewport);
        assert_eq!(cloud.actor.pos.y, -cloud.actor.size.y);
        assert!(cloud.actor.vel.x < 0.0);
    }

    #[test]
    fn test_cloud_returns_after_long_frame() {
        let settings = Settings::default();
        let viewport = Vec2::new(settings.viewport_width, settings.viewport_height);
        let mut rng = Pcg32::seed_from_u64(6);
        let mut cloud = Cloud::spawn(&settings, &mut rng).unwrap();
        cloud.actor.pos = Vec2::new(470.0, 100.0);
        cloud.actor.vel = Vec2::new(0.1, 0.0);

        // One second in a single step overshoots the edge by far more than a 60 Hz frame
        cloud.advance(0.0, 1000.0, viewport);
        assert!(cloud.actor.pos.x > viewport.x);

        let mut now = 1000.0;
        for _ in 0..200 {
            cloud.advance(now, now + 16.0, viewport);
            now += 16.0;
        }
        let a = &cloud.actor;
        assert!(a.pos.x <= viewport.x && a.pos.x + a.size.x >= 0.0, "x = {}", a.pos.x);
    }

    #[test]
    fn test_cloud_off_left_heads_right() {
        let settings = Settings::default();
        let viewport = Vec2::new(settings.viewport_width, settings.viewport_height);
        let mut rng = Pcg32::seed_from_u64(7);
        let mut cloud = Cloud::spawn(&settings, &mut rng).unwrap();
        cloud.actor.pos = Vec2::new(-cloud.actor.size.x - 50.0, 100.0);
        cloud.actor.vel = Vec2::new(0.1, 0.0);

        // Already heading back; a second check must not turn it around again
        cloud.advance(0.0, 16.0, viewport);
        assert!(cloud.actor.vel.x > 0.0);
        cloud.advance(16.0, 32.0, viewport);
        assert!(cloud.actor.vel.x > 0.0);
    }
}
