//! Fixed-size emitter pool, built once per environment activation

use glimmer_core::{EmitterId, GlimmerError, Result, Vec3};
use log::{info, warn};

use crate::config::FireflyConfig;
use crate::emitter::{ActivityState, Emitter, EmitterLight, Phase};
use crate::height::HeightQuery;
use crate::rand::GlowRng;

/// Every emitter of one firefly field plus the selection state shared by
/// the per-frame phases. The length never changes after creation.
pub struct EmitterPool {
    emitters: Vec<Emitter>,
    light_budget: usize,
    cull_radius: f32,
    /// Selected ids, nearest first. Rewritten by the selector every frame.
    active: Vec<EmitterId>,
    missing_heights: usize,
}

impl EmitterPool {
    /// Spawn emitters scattered over the configured disc, anchored on the
    /// terrain through `height`.
    pub fn initialize<H>(config: &FireflyConfig, height: &H) -> Result<Self>
    where
        H: HeightQuery + ?Sized,
    {
        config.validate()?;
        let resolved = config.resolve();
        let mut rng = GlowRng::new(config.seed);
        let mut missing = 0;

        let mut anchors = Vec::with_capacity(resolved.count);
        for _ in 0..resolved.count {
            let (x, z) = rng.point_in_disc(config.radius);
            let ground = match height.height_at(x, z) {
                Some(h) if h.is_finite() => h,
                _ => {
                    missing += 1;
                    0.0
                }
            };
            let lift = rng.range(config.height_range.min, config.height_range.max);
            anchors.push(Vec3::new(x, ground + lift, z));
        }

        if missing > 0 {
            warn!(
                "Height query had no answer for {missing} of {} emitters; anchored them at 0",
                resolved.count
            );
        }

        let mut pool = Self::build(&anchors, config, resolved.light_budget, &mut rng);
        pool.missing_heights = missing;
        info!(
            "Spawned {} emitters ({} dynamic lights, {:?} device)",
            pool.len(),
            pool.light_budget,
            config.device.tier
        );
        Ok(pool)
    }

    /// Spawn one emitter at each hand-placed anchor. The anchors are used
    /// as-is: no terrain query, no disc scatter, no height offset, and no
    /// device count scaling.
    pub fn from_anchors(anchors: &[Vec3], config: &FireflyConfig) -> Result<Self> {
        config.validate()?;
        if let Some(bad) = anchors.iter().position(|a| !a.is_finite()) {
            return Err(GlimmerError::InvalidConfig(format!(
                "anchor {bad} is not a finite position"
            )));
        }
        let resolved = config.resolve();
        let mut rng = GlowRng::new(config.seed);
        Ok(Self::build(anchors, config, resolved.light_budget, &mut rng))
    }

    fn build(
        anchors: &[Vec3],
        config: &FireflyConfig,
        light_budget: usize,
        rng: &mut GlowRng,
    ) -> Self {
        let tau = std::f32::consts::TAU;
        let emitters = anchors
            .iter()
            .enumerate()
            .map(|(i, &base)| {
                let color = config.colors[rng.index(config.colors.len())];
                let phase = Phase {
                    wander: rng.range(0.0, tau),
                    reach: rng.range(0.0, tau),
                    float: rng.range(0.0, tau),
                };
                let light = (light_budget > 0).then(|| {
                    EmitterLight::new(base, color, config.light_intensity, config.light_distance)
                });
                Emitter {
                    id: EmitterId::from_index(i),
                    base_position: base,
                    animated_position: base,
                    color,
                    phase,
                    light,
                    activity: ActivityState::default(),
                }
            })
            .collect();

        Self {
            emitters,
            light_budget,
            cull_radius: config.size,
            active: Vec::with_capacity(light_budget),
            missing_heights: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    pub fn emitters(&self) -> &[Emitter] {
        &self.emitters
    }

    pub fn emitters_mut(&mut self) -> &mut [Emitter] {
        &mut self.emitters
    }

    pub fn get(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.get(id.index())
    }

    /// Effective K after the device cap
    pub fn light_budget(&self) -> usize {
        self.light_budget
    }

    /// False in zero-light mode
    pub fn has_lights(&self) -> bool {
        self.light_budget > 0
    }

    /// Radius of the bounding sphere tested against the frustum
    pub fn cull_radius(&self) -> f32 {
        self.cull_radius
    }

    /// Ids chosen by the last selection, nearest first
    pub fn active(&self) -> &[EmitterId] {
        &self.active
    }

    /// Emitters whose height query came back empty at spawn
    pub fn missing_heights(&self) -> usize {
        self.missing_heights
    }

    /// Emitters whose light currently has nonzero intensity
    pub fn lit_count(&self) -> usize {
        self.emitters.iter().filter(|e| e.is_lit()).count()
    }

    /// Mark every light as part of the scene
    pub fn attach_lights(&mut self) {
        for light in self.emitters.iter_mut().filter_map(|e| e.light.as_mut()) {
            light.attached = true;
        }
    }

    /// Remove every light from the scene and zero it
    pub fn detach_lights(&mut self) {
        for e in &mut self.emitters {
            e.activity = ActivityState::default();
            if let Some(light) = e.light.as_mut() {
                light.attached = false;
                light.intensity = 0.0;
            }
        }
        self.active.clear();
    }

    /// Split borrow for the selector: emitters to flag, list to refill
    pub(crate) fn selection_parts(&mut self) -> (&mut [Emitter], &mut Vec<EmitterId>) {
        (&mut self.emitters, &mut self.active)
    }

    /// Split borrow for the fade controller: emitters to fade, priority order
    pub(crate) fn fade_parts(&mut self) -> (&mut [Emitter], &[EmitterId]) {
        (&mut self.emitters, &self.active)
    }
}
