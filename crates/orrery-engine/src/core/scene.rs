use std::collections::{HashMap, HashSet};

use crate::api::error::{OrreryError, OrreryResult};
use crate::assets::system_def::{BodyDef, SystemDef};
use crate::components::body::CelestialBody;
use crate::core::rng::PhaseRng;
use crate::systems::orbit;

/// Spin rates by tree depth when a definition gives none:
/// root, planets, then moons and anything deeper.
pub const DEFAULT_SPIN_RATES: [f64; 3] = [0.005, 0.01, 0.02];

/// Body registry: owns the orbital tree and a name index into it.
///
/// Topology is fixed after `build`. The index stores, for each name, the
/// chain of child indices leading to the body from the root.
pub struct Scene {
    root: CelestialBody,
    index: HashMap<String, Vec<usize>>,
    /// Names in root-first traversal order.
    order: Vec<String>,
    rejected: Vec<OrreryError>,
}

impl Scene {
    /// Build the registry from static definitions and resolve initial
    /// world positions.
    ///
    /// An invalid root fails the whole build. An invalid non-root body is
    /// excluded together with its moons; the reason is logged and kept in
    /// [`Scene::rejected`].
    pub fn build(def: &SystemDef) -> OrreryResult<Self> {
        validate_body(&def.root, true)?;

        let mut rng = PhaseRng::new(def.seed.unwrap_or(0));
        let mut seen = HashSet::new();
        let mut rejected = Vec::new();
        seen.insert(def.root.name.clone());

        let root = instantiate(&def.root, 0, &mut rng, &mut seen, &mut rejected);

        for err in &rejected {
            log::warn!("scene: skipping body: {err}");
        }

        let mut scene = Self {
            root,
            index: HashMap::new(),
            order: Vec::new(),
            rejected,
        };
        scene.rebuild_index();
        orbit::resolve(&mut scene);

        log::info!(
            "scene: built `{}` with {} bodies ({} rejected)",
            scene.root.name,
            scene.len(),
            scene.rejected.len()
        );
        Ok(scene)
    }

    fn rebuild_index(&mut self) {
        fn walk(
            body: &CelestialBody,
            path: &mut Vec<usize>,
            index: &mut HashMap<String, Vec<usize>>,
            order: &mut Vec<String>,
        ) {
            index.insert(body.name.clone(), path.clone());
            order.push(body.name.clone());
            for (i, moon) in body.moons.iter().enumerate() {
                path.push(i);
                walk(moon, path, index, order);
                path.pop();
            }
        }

        self.index.clear();
        self.order.clear();
        walk(&self.root, &mut Vec::new(), &mut self.index, &mut self.order);
    }

    /// The central body.
    pub fn root(&self) -> &CelestialBody {
        &self.root
    }

    /// Look up a body by name. A miss is a normal outcome.
    pub fn find_by_name(&self, name: &str) -> Option<&CelestialBody> {
        let path = self.index.get(name)?;
        let mut body = &self.root;
        for &i in path {
            body = body.moons.get(i)?;
        }
        Some(body)
    }

    /// Look up a body by name (mutable).
    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut CelestialBody> {
        let path = self.index.get(name)?;
        let mut body = &mut self.root;
        for &i in path {
            body = body.moons.get_mut(i)?;
        }
        Some(body)
    }

    /// Whether a body with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Visit every body depth-first, parent before children.
    /// The visitor also receives the body's depth (root = 0).
    pub fn for_each_body<'a>(&'a self, mut visitor: impl FnMut(&'a CelestialBody, usize)) {
        fn visit<'a, F: FnMut(&'a CelestialBody, usize)>(
            body: &'a CelestialBody,
            depth: usize,
            f: &mut F,
        ) {
            f(body, depth);
            for moon in &body.moons {
                visit(moon, depth + 1, f);
            }
        }
        visit(&self.root, 0, &mut visitor);
    }

    /// Visit every body mutably, parent before children. The visitor gets
    /// the parent's world position as already updated by this same pass
    /// (`None` for the root).
    pub fn for_each_body_mut(
        &mut self,
        mut visitor: impl FnMut(&mut CelestialBody, Option<glam::Vec3>),
    ) {
        fn visit<F: FnMut(&mut CelestialBody, Option<glam::Vec3>)>(
            body: &mut CelestialBody,
            parent: Option<glam::Vec3>,
            f: &mut F,
        ) {
            f(body, parent);
            let resolved = body.world_position;
            for moon in &mut body.moons {
                visit(moon, Some(resolved), f);
            }
        }
        visit(&mut self.root, None, &mut visitor);
    }

    /// All bodies in traversal order.
    pub fn bodies(&self) -> Vec<&CelestialBody> {
        let mut out = Vec::with_capacity(self.len());
        self.for_each_body(|body, _| out.push(body));
        out
    }

    /// Body names in traversal order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Set a body's orbital phase and re-resolve positions.
    /// Returns false if no body has this name or the phase is not finite.
    pub fn set_phase(&mut self, name: &str, phase: f64) -> bool {
        if !phase.is_finite() {
            log::warn!("scene: ignoring non-finite phase {phase} for `{name}`");
            return false;
        }
        let Some(body) = self.find_by_name_mut(name) else {
            return false;
        };
        body.phase = orbit::wrap_angle(phase);
        orbit::resolve(self);
        true
    }

    /// Definitions excluded at build time.
    pub fn rejected(&self) -> &[OrreryError] {
        &self.rejected
    }

    /// Number of bodies, root included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: a scene has at least its root.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn validate_body(def: &BodyDef, is_root: bool) -> OrreryResult<()> {
    if def.name.trim().is_empty() {
        return Err(OrreryError::invalid_body(&def.name, "name must not be empty"));
    }
    if !(def.radius.is_finite() && def.radius > 0.0) {
        return Err(OrreryError::invalid_body(
            &def.name,
            format!("radius must be positive, got {}", def.radius),
        ));
    }
    if let Some(phase) = def.phase {
        if !phase.is_finite() {
            return Err(OrreryError::invalid_body(&def.name, "phase must be finite"));
        }
    }
    if let Some(rate) = def.spin_rate {
        if !rate.is_finite() {
            return Err(OrreryError::invalid_body(&def.name, "spin rate must be finite"));
        }
    }
    if is_root {
        return Ok(());
    }
    if !(def.orbital_radius.is_finite() && def.orbital_radius > 0.0) {
        return Err(OrreryError::invalid_body(
            &def.name,
            format!("orbital radius must be positive, got {}", def.orbital_radius),
        ));
    }
    if !def.angular_speed.is_finite() || def.angular_speed == 0.0 {
        return Err(OrreryError::invalid_body(
            &def.name,
            format!("angular speed must be finite and non-zero, got {}", def.angular_speed),
        ));
    }
    Ok(())
}

fn instantiate(
    def: &BodyDef,
    depth: usize,
    rng: &mut PhaseRng,
    seen: &mut HashSet<String>,
    rejected: &mut Vec<OrreryError>,
) -> CelestialBody {
    let mut body = CelestialBody::new(def.name.clone(), def.radius);
    if depth > 0 {
        body.orbital_radius = def.orbital_radius;
        body.angular_speed = def.angular_speed;
    }
    body.color = def.color.clone();
    body.spin_rate = def
        .spin_rate
        .unwrap_or(DEFAULT_SPIN_RATES[depth.min(DEFAULT_SPIN_RATES.len() - 1)]);
    // One draw per definition, explicit phase or not, so each body's
    // scattered phase depends only on its place in the tree.
    let scattered = rng.next_phase();
    body.phase = orbit::wrap_angle(def.phase.unwrap_or(scattered));

    for moon in &def.moons {
        let verdict = validate_body(moon, false).and_then(|()| {
            if seen.insert(moon.name.clone()) {
                Ok(())
            } else {
                Err(OrreryError::DuplicateName(moon.name.clone()))
            }
        });
        if let Err(err) = verdict {
            // Consume the draws the subtree would have made.
            for _ in 0..subtree_len(moon) {
                rng.next_phase();
            }
            rejected.push(err);
            continue;
        }
        body.moons.push(instantiate(moon, depth + 1, rng, seen, rejected));
    }
    body
}

fn subtree_len(def: &BodyDef) -> usize {
    1 + def.moons.iter().map(subtree_len).sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn sample() -> SystemDef {
        SystemDef::new(
            BodyDef::new("Sun", 3.0)
                .with_moon(BodyDef::new("Mercury", 0.4).with_orbit(8.0, 0.04).with_phase(0.0))
                .with_moon(
                    BodyDef::new("Earth", 0.8)
                        .with_orbit(16.0, 0.02)
                        .with_phase(0.0)
                        .with_moon(BodyDef::new("Moon", 0.2).with_orbit(2.0, 0.1).with_phase(0.0)),
                ),
        )
    }

    #[test]
    fn build_and_find() {
        let scene = Scene::build(&sample()).unwrap();
        assert_eq!(scene.len(), 4);
        let moon = scene.find_by_name("Moon").unwrap();
        assert_eq!(moon.orbital_radius, 2.0);
        assert!(scene.find_by_name("Pluto").is_none());
        assert!(scene.rejected().is_empty());
    }

    #[test]
    fn traversal_is_root_first_depth_first() {
        let scene = Scene::build(&sample()).unwrap();
        let mut visited = Vec::new();
        scene.for_each_body(|body, depth| visited.push((body.name.as_str(), depth)));
        assert_eq!(
            visited,
            vec![("Sun", 0), ("Mercury", 1), ("Earth", 1), ("Moon", 2)]
        );
        assert_eq!(scene.names(), ["Sun", "Mercury", "Earth", "Moon"]);
    }

    #[test]
    fn build_resolves_initial_positions() {
        let scene = Scene::build(&sample()).unwrap();
        assert_eq!(scene.root().world_position(), Vec3::ZERO);
        let moon = scene.find_by_name("Moon").unwrap().world_position();
        assert!((moon - Vec3::new(18.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn invalid_body_is_dropped_with_its_moons() {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0)
                .with_moon(
                    BodyDef::new("Vulcan", 0.5)
                        .with_orbit(-4.0, 0.1)
                        .with_moon(BodyDef::new("Vulcan I", 0.1).with_orbit(1.0, 0.2)),
                )
                .with_moon(BodyDef::new("Mars", 0.6).with_orbit(20.0, 0.015)),
        );
        let scene = Scene::build(&def).unwrap();
        assert_eq!(scene.names(), ["Sun", "Mars"]);
        assert!(scene.find_by_name("Vulcan I").is_none());
        assert_eq!(scene.rejected().len(), 1);
        assert!(matches!(&scene.rejected()[0], OrreryError::InvalidBody { name, .. } if name == "Vulcan"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0)
                .with_moon(BodyDef::new("Io", 0.3).with_orbit(4.0, 0.05))
                .with_moon(BodyDef::new("Io", 0.3).with_orbit(5.0, 0.04)),
        );
        let scene = Scene::build(&def).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.rejected(), [OrreryError::DuplicateName("Io".into())]);
    }

    #[test]
    fn zero_angular_speed_is_rejected_for_orbiting_bodies() {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0).with_moon(BodyDef::new("Stuck", 0.5).with_orbit(4.0, 0.0)),
        );
        let scene = Scene::build(&def).unwrap();
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn retrograde_orbits_are_allowed() {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0).with_moon(BodyDef::new("Triton", 0.3).with_orbit(4.0, -0.05)),
        );
        let scene = Scene::build(&def).unwrap();
        assert!(scene.contains("Triton"));
    }

    #[test]
    fn invalid_root_fails_the_build() {
        let def = SystemDef::new(BodyDef::new("Sun", 0.0));
        assert!(Scene::build(&def).is_err());
    }

    #[test]
    fn spin_rate_defaults_by_depth() {
        let scene = Scene::build(&sample()).unwrap();
        assert_eq!(scene.root().spin_rate, 0.005);
        assert_eq!(scene.find_by_name("Earth").unwrap().spin_rate, 0.01);
        assert_eq!(scene.find_by_name("Moon").unwrap().spin_rate, 0.02);
    }

    #[test]
    fn seeded_phases_are_reproducible() {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0).with_moon(BodyDef::new("Mars", 0.6).with_orbit(20.0, 0.015)),
        )
        .with_seed(99);
        let a = Scene::build(&def).unwrap();
        let b = Scene::build(&def).unwrap();
        assert_eq!(
            a.find_by_name("Mars").unwrap().phase(),
            b.find_by_name("Mars").unwrap().phase()
        );
    }

    #[test]
    fn rejected_bodies_do_not_shift_seeded_phases() {
        let system = |vulcan_orbit: f32| {
            SystemDef::new(
                BodyDef::new("Sun", 3.0)
                    .with_moon(
                        BodyDef::new("Vulcan", 0.5)
                            .with_orbit(vulcan_orbit, 0.1)
                            .with_moon(BodyDef::new("Vulcan I", 0.1).with_orbit(1.0, 0.2)),
                    )
                    .with_moon(BodyDef::new("Io", 0.3).with_orbit(4.0, 0.05))
                    .with_moon(BodyDef::new("Io", 0.3).with_orbit(5.0, 0.04))
                    .with_moon(BodyDef::new("Mars", 0.6).with_orbit(20.0, 0.015)),
            )
            .with_seed(5)
        };
        let valid = Scene::build(&system(4.0)).unwrap();
        let pruned = Scene::build(&system(-4.0)).unwrap();
        assert_eq!(pruned.rejected().len(), 2);
        assert_eq!(
            valid.find_by_name("Mars").unwrap().phase(),
            pruned.find_by_name("Mars").unwrap().phase()
        );
    }

    #[test]
    fn set_phase_rejects_non_finite_values() {
        let mut scene = Scene::build(&sample()).unwrap();
        let before = scene.find_by_name("Moon").unwrap().world_position();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(!scene.set_phase("Earth", bad));
        }
        assert_eq!(scene.find_by_name("Earth").unwrap().phase(), 0.0);
        assert_eq!(scene.find_by_name("Moon").unwrap().world_position(), before);
        assert!(before.is_finite());
    }

    #[test]
    fn set_phase_moves_body_and_its_moons() {
        let mut scene = Scene::build(&sample()).unwrap();
        assert!(scene.set_phase("Earth", std::f64::consts::FRAC_PI_2));
        let earth = scene.find_by_name("Earth").unwrap().world_position();
        let moon = scene.find_by_name("Moon").unwrap().world_position();
        assert!((earth - Vec3::new(0.0, 0.0, 16.0)).length() < 1e-4);
        assert!((moon - Vec3::new(2.0, 0.0, 16.0)).length() < 1e-4);
        assert!(!scene.set_phase("Pluto", 1.0));
    }
}
