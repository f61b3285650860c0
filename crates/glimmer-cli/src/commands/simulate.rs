//! Headless simulation command

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use glimmer_core::Vec3;
use glimmer_fireflies::{presets, DeviceProfile, DeviceTier, FireflyConfig, FireflySystem};
use glimmer_render::Camera;
use glimmer_runtime::{FrameContext, GameClock, SystemSchedule, MAX_FRAME_DELTA};
use log::{debug, info};

pub struct SimulateArgs {
    pub preset: Option<String>,
    pub config: Option<String>,
    pub tier: Option<String>,
    pub seed: Option<u32>,
    pub frames: u32,
    pub dt: f64,
    pub distance: f32,
    pub orbit_speed: f32,
}

/// Gentle rolling ground for headless runs
fn rolling_hills(x: f32, z: f32) -> Option<f32> {
    Some(0.6 * (x * 0.15).sin() + 0.4 * (z * 0.11).cos())
}

/// Deltas above the clock clamp would stretch the run, so reject them
fn check_frame_delta(dt: f64) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 || dt > MAX_FRAME_DELTA {
        bail!(
            "--dt must be in (0, {}] seconds, got {}",
            MAX_FRAME_DELTA,
            dt
        );
    }
    Ok(())
}

fn load_config(args: &SimulateArgs) -> Result<FireflyConfig> {
    let mut config = match (&args.preset, &args.config) {
        (_, Some(path)) => FireflyConfig::from_toml_file(Path::new(path))?,
        (Some(name), None) => presets::load(name)?,
        (None, None) => presets::load("forest")?,
    };

    if let Some(tier) = &args.tier {
        let tier = DeviceTier::parse(tier).ok_or_else(|| anyhow!("unknown device tier '{}'", tier))?;
        config.device = DeviceProfile::for_tier(tier);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

pub fn run(args: SimulateArgs) -> Result<()> {
    check_frame_delta(args.dt)?;
    let config = load_config(&args)?;

    let mut fireflies = FireflySystem::new();
    fireflies.initialize(&config, &rolling_hills)?;
    let (emitters, budget) = match fireflies.pool() {
        Some(pool) => (pool.len(), pool.light_budget()),
        None => bail!("firefly system failed to start"),
    };
    info!(
        "Simulating {} emitters with {} light(s) for {} frames",
        emitters, budget, args.frames
    );

    let mut schedule = SystemSchedule::new();
    schedule.register(fireflies);

    let mut clock = GameClock::new();
    let mut camera = Camera::new();
    let center = Vec3::new(0.0, 1.5, 0.0);

    let mut peak_lit = 0;
    let mut visible_sum = 0usize;
    let mut total = Duration::ZERO;
    let mut slowest = Duration::ZERO;

    for frame in 0..args.frames {
        clock.advance(args.dt);
        let yaw = (clock.animation_time as f32) * args.orbit_speed;
        camera.orbit(center, args.distance, yaw, 2.0);

        let ctx = FrameContext {
            dt: clock.delta_seconds(),
            camera: &camera,
        };
        schedule.update_all(&ctx)?;

        let stats = schedule
            .get::<FireflySystem>()
            .map(|f| f.last_stats())
            .ok_or_else(|| anyhow!("firefly system missing from schedule"))?;
        if stats.lit > budget {
            bail!("frame {}: {} lights lit over a budget of {}", frame, stats.lit, budget);
        }
        debug!(
            "frame {}: visible {} active {} lit {}",
            frame, stats.visible, stats.active, stats.lit
        );
        peak_lit = peak_lit.max(stats.lit);
        visible_sum += stats.visible;
        total += stats.elapsed;
        slowest = slowest.max(stats.elapsed);
    }

    let settled = schedule
        .get::<FireflySystem>()
        .map(|f| f.is_settled())
        .unwrap_or(true);

    let frames = args.frames.max(1);
    println!("Simulated {} frames ({:.1}s of animation)", args.frames, clock.animation_time);
    println!("  systems:        {}", schedule.names().join(", "));
    println!("  emitters:       {}", emitters);
    println!("  light budget:   {}", budget);
    println!("  peak lit:       {}", peak_lit);
    println!("  mean visible:   {:.1}", visible_sum as f64 / frames as f64);
    println!("  settled:        {}", settled);
    println!("  mean frame:     {:?}", total / frames);
    println!("  slowest frame:  {:?}", slowest);

    schedule.shutdown_all()?;
    Ok(())
}
