use crate::api::types::BodyVisual;
use crate::core::scene::Scene;
use crate::renderer::instance::{BodyInstance, SnapshotBuffer};

/// Rebuild the snapshot from the scene, one instance per body in traversal
/// order. The body named `selected`, if any, is flagged.
pub fn build_snapshot(scene: &Scene, selected: Option<&str>, buffer: &mut SnapshotBuffer) {
    buffer.clear();

    let mut index = 0usize;
    scene.for_each_body(|body, _| {
        let pos = body.world_position();
        buffer.push(BodyInstance {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            radius: body.radius,
            spin: body.spin() as f32,
            body_index: index as f32,
            selected: if selected == Some(body.name.as_str()) { 1.0 } else { 0.0 },
            _pad: 0.0,
        });
        index += 1;
    });
}

/// Static mesh parameters for every body, in snapshot order.
pub fn describe_bodies(scene: &Scene) -> Vec<BodyVisual> {
    let mut out = Vec::with_capacity(scene.len());
    scene.for_each_body(|body, depth| {
        out.push(BodyVisual {
            index: out.len(),
            name: body.name.clone(),
            radius: body.radius,
            orbital_radius: body.orbital_radius,
            color: body.color.clone(),
            depth,
        });
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::system_def::{BodyDef, SystemDef};

    #[test]
    fn snapshot_follows_traversal_and_flags_selection() {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0)
                .with_moon(BodyDef::new("Mercury", 0.4).with_orbit(8.0, 0.04).with_phase(0.0))
                .with_moon(BodyDef::new("Venus", 0.7).with_orbit(12.0, 0.03).with_phase(0.0)),
        );
        let scene = Scene::build(&def).unwrap();
        let mut buffer = SnapshotBuffer::new();

        build_snapshot(&scene, Some("Venus"), &mut buffer);

        assert_eq!(buffer.instance_count(), 3);
        let venus = buffer.instances[2];
        assert_eq!(venus.body_index, 2.0);
        assert_eq!(venus.selected, 1.0);
        assert!((venus.x - 12.0).abs() < 1e-5);
        assert_eq!(venus.radius, 0.7);
        assert_eq!(buffer.instances[0].selected, 0.0);
    }

    #[test]
    fn visuals_match_snapshot_indices() {
        let def = SystemDef::new(
            BodyDef::new("Sun", 3.0).with_color("#FFD700").with_moon(
                BodyDef::new("Earth", 0.8)
                    .with_orbit(16.0, 0.02)
                    .with_color("#6B93D6")
                    .with_moon(BodyDef::new("Moon", 0.2).with_orbit(2.0, 0.1)),
            ),
        );
        let scene = Scene::build(&def).unwrap();
        let visuals = describe_bodies(&scene);
        let mut buffer = SnapshotBuffer::new();
        build_snapshot(&scene, None, &mut buffer);

        assert_eq!(visuals.len(), 3);
        for (visual, instance) in visuals.iter().zip(&buffer.instances) {
            assert_eq!(visual.index as f32, instance.body_index);
        }
        assert_eq!(visuals[1].color, "#6B93D6");
        assert_eq!(visuals[2].depth, 2);
    }

    #[test]
    fn rebuild_replaces_previous_contents() {
        let scene = Scene::build(&SystemDef::new(BodyDef::new("Sun", 3.0))).unwrap();
        let mut buffer = SnapshotBuffer::new();
        build_snapshot(&scene, None, &mut buffer);
        build_snapshot(&scene, None, &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
    }
}
