//! Ribbon mesh generation tests.
//!
//! These tests verify that snaking a slider body progressively yields the
//! exact bytes of a direct build, on real curve shapes.

use glam::Vec2;
use glissade_geometry::{
    CurveKind, CurveSpec, FlattenScratch, RibbonMeshBuilder, RibbonOptions, RibbonVertex,
    SliderPath, ribbon_mesh,
};
use glissade_test_utils::{distance_to_polyline, fixtures};

fn build(kind: CurveKind, points: &[Vec2], length: f32) -> SliderPath {
    let spec = CurveSpec::from_points(kind, points.to_vec(), length);
    SliderPath::new(&spec, &mut FlattenScratch::new()).expect("valid curve")
}

fn sample_paths() -> Vec<SliderPath> {
    vec![
        build(CurveKind::Circular, &fixtures::HALF_CIRCLE, 100.0),
        build(CurveKind::Polynomial, &fixtures::CUBIC_HOOK, 0.0),
        build(CurveKind::Linear, &fixtures::zigzag(5, 60.0, 80.0), 0.0),
        build(CurveKind::CatmullRom, &fixtures::wander(5, 3), 0.0),
    ]
}

fn as_bytes(vertices: &[RibbonVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

// ====================
// Consistency
// ====================

#[test]
fn test_progressive_equals_direct() {
    for path in sample_paths() {
        let mut progressive = RibbonMeshBuilder::new(RibbonOptions::default());
        for step in 1..=60 {
            progressive.update(&path, step as f32 / 60.0);
        }

        let direct = ribbon_mesh(&path, 1.0, RibbonOptions::default());
        assert_eq!(
            as_bytes(progressive.vertices()),
            as_bytes(&direct),
            "{:?} path differs after snaking",
            path.kind()
        );
    }
}

#[test]
fn test_progressive_equals_direct_at_partial_completion() {
    for path in sample_paths() {
        let mut progressive = RibbonMeshBuilder::new(RibbonOptions::default());
        progressive.update(&path, 0.2);
        progressive.update(&path, 0.45);

        let direct = ribbon_mesh(&path, 0.45, RibbonOptions::default());
        assert_eq!(as_bytes(progressive.vertices()), as_bytes(&direct));
    }
}

#[test]
fn test_committed_prefix_survives_later_completions() {
    for path in sample_paths() {
        let mut early = RibbonMeshBuilder::new(RibbonOptions::default());
        early.update(&path, 0.5);
        let committed = early.committed_len();

        for later in [0.5, 0.75, 1.0] {
            let mesh = ribbon_mesh(&path, later, RibbonOptions::default());
            assert!(mesh.len() >= committed);
            assert_eq!(
                as_bytes(&mesh[..committed]),
                as_bytes(&early.vertices()[..committed]),
                "{:?} prefix changed at {later}",
                path.kind()
            );
        }
    }
}

// ====================
// Geometry
// ====================

#[test]
fn test_vertices_stay_within_radius_of_path() {
    let options = RibbonOptions::default();

    for path in sample_paths() {
        let mesh = ribbon_mesh(&path, 1.0, options);
        for vertex in &mesh {
            let p = Vec2::from(vertex.position);
            let distance = distance_to_polyline(p, path.points());
            assert!(
                distance <= options.radius + 1e-2,
                "{:?}: vertex {p:?} is {distance} from the path",
                path.kind()
            );
        }
    }
}

#[test]
fn test_end_cap_on_a_sample_faces_forward() {
    let options = RibbonOptions::default();
    let path = build(CurveKind::Linear, &fixtures::zigzag(5, 60.0, 80.0), 0.0);
    let cap = options.fan_steps(std::f32::consts::PI) * 3;
    let completions = path.completions();

    for index in 1..completions.len() - 1 {
        let mesh = ribbon_mesh(&path, completions[index], options);
        let end = path.points()[index];
        let direction = path.segments()[index - 1].direction;

        for vertex in &mesh[mesh.len() - cap..] {
            let ahead = (Vec2::from(vertex.position) - end).dot(direction);
            assert!(ahead >= -1e-3, "cap at sample {index} reaches back by {ahead}");
        }
    }
}

#[test]
fn test_mesh_grows_with_completion() {
    let path = build(CurveKind::Linear, &fixtures::zigzag(5, 60.0, 80.0), 0.0);
    let mut builder = RibbonMeshBuilder::new(RibbonOptions::default());

    let mut previous = 0;
    for step in 0..=10 {
        builder.update(&path, step as f32 / 10.0);
        assert!(builder.committed_len() >= previous);
        previous = builder.committed_len();
    }
    assert_eq!(builder.vertices().len() % 3, 0);
}

#[test]
fn test_stacked_path_mesh_is_translated() {
    let mut path = build(CurveKind::Polynomial, &fixtures::CUBIC_HOOK, 0.0);
    let before = ribbon_mesh(&path, 1.0, RibbonOptions::default());

    let offset = Vec2::new(-6.4, -6.4);
    path.apply_stack_offset(offset).expect("first stacking");
    let after = ribbon_mesh(&path, 1.0, RibbonOptions::default());

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        let moved = Vec2::from(a.position) + offset;
        assert!(moved.distance(Vec2::from(b.position)) < 1e-3);
        assert_eq!(a.edge, b.edge);
    }
}

// ====================
// Upload tracking
// ====================

#[test]
fn test_dirty_ranges_cover_every_change() {
    let path = build(CurveKind::Circular, &fixtures::HALF_CIRCLE, 100.0);
    let mut builder = RibbonMeshBuilder::new(RibbonOptions::default());

    // Mirror of the GPU buffer, patched with dirty ranges only
    let mut uploaded: Vec<RibbonVertex> = Vec::new();
    for step in 1..=20 {
        builder.update(&path, step as f32 / 20.0);
        uploaded.resize(builder.vertices().len(), RibbonVertex::default());
        for range in builder.take_dirty_ranges() {
            uploaded[range.clone()].copy_from_slice(&builder.vertices()[range]);
        }
        assert_eq!(as_bytes(&uploaded), as_bytes(builder.vertices()));
    }
}

#[test]
fn test_smaller_radius_has_finer_fans() {
    let wide = RibbonOptions::with_radius(64.0);
    let narrow = RibbonOptions::with_radius(8.0);

    assert!(wide.arc_step < narrow.arc_step);
    assert!(wide.fan_steps(std::f32::consts::PI) > narrow.fan_steps(std::f32::consts::PI));
}
