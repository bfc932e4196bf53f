//! Transform and TransformSystem tests
//!
//! Tests for:
//! - Transform TRS operations and dirty checking
//! - Euler angle round-trip conversions
//! - look_at orientation
//! - Hierarchical matrix propagation (full scene and subtree)

use glam::{Mat4, Quat, Vec3};
use myth_avatar::scene::camera::Camera;
use myth_avatar::scene::node::Node;
use myth_avatar::scene::scene::Scene;
use myth_avatar::scene::transform::Transform;
use myth_avatar::scene::NodeHandle;
use std::f32::consts::FRAC_PI_2;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

/// Builds a chain of `length` nodes, each translated +1 on X from its parent.
fn create_chain(length: usize) -> (Scene, Vec<NodeHandle>) {
    let mut scene = Scene::new();
    let mut handles = Vec::with_capacity(length);

    for i in 0..length {
        let mut node = Node::new();
        node.transform.position = Vec3::new(1.0, 0.0, 0.0);
        let handle = if i == 0 {
            scene.add_node(node)
        } else {
            scene.add_to_parent(node, handles[i - 1])
        };
        handles.push(handle);
    }

    (scene, handles)
}

fn world_position(scene: &Scene, handle: NodeHandle) -> Vec3 {
    scene
        .get_node(handle)
        .unwrap()
        .transform
        .world_matrix()
        .translation
        .into()
}

// ============================================================================
// Transform Unit Tests
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::ONE);
}

#[test]
fn transform_update_local_matrix_dirty_check() {
    let mut t = Transform::new();

    // First call always recomputes
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.position = Vec3::new(1.0, 2.0, 3.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.rotation = Quat::from_rotation_y(FRAC_PI_2);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());

    t.scale = Vec3::splat(2.0);
    assert!(t.update_local_matrix());
    assert!(!t.update_local_matrix());
}

#[test]
fn transform_local_matrix_reflects_trs() {
    let mut t = Transform::new();
    t.position = Vec3::new(10.0, 20.0, 30.0);
    t.scale = Vec3::splat(2.0);
    t.update_local_matrix();

    let mat = Mat4::from(*t.local_matrix());
    let translation = mat.w_axis.truncate();
    assert!(vec3_approx(translation, Vec3::new(10.0, 20.0, 30.0)));
}

#[test]
fn transform_from_trs() {
    let t = Transform::from_trs([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [2.0, 2.0, 2.0]);
    assert_eq!(t.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(t.rotation, Quat::IDENTITY);
    assert_eq!(t.scale, Vec3::splat(2.0));
}

#[test]
fn transform_euler_roundtrip() {
    let mut t = Transform::new();
    let (x, y, z) = (0.3, 0.7, 1.2);
    t.set_rotation_euler(x, y, z);

    let euler = t.rotation_euler();
    assert!(approx_eq(euler.x, x));
    assert!(approx_eq(euler.y, y));
    assert!(approx_eq(euler.z, z));
}

#[test]
fn transform_small_euler_angles_roundtrip() {
    // Idle-motion range: a few degrees per axis
    let mut t = Transform::new();
    let angles = Vec3::new(-4.5_f32.to_radians(), 3.2_f32.to_radians(), 2.9_f32.to_radians());
    t.set_rotation_euler(angles.x, angles.y, angles.z);
    assert!(vec3_approx(t.rotation_euler(), angles));
}

#[test]
fn transform_look_at_basic() {
    let mut t = Transform::new();
    t.look_at(Vec3::new(0.0, 0.0, -10.0), Vec3::Y);

    t.update_local_matrix();
    let mat = Mat4::from(*t.local_matrix());
    let forward = -mat.z_axis.truncate().normalize();
    assert!(vec3_approx(forward, Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn transform_look_at_collinear_up_noop() {
    let mut t = Transform::new();
    let original_rotation = t.rotation;
    // Target straight above with up = +Y is degenerate
    t.look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
    assert_eq!(t.rotation, original_rotation);
}

#[test]
fn transform_rewriting_same_value_is_not_a_change() {
    let mut t = Transform::new();
    t.position = Vec3::new(0.1, 0.2, 0.05);
    t.update_local_matrix();

    t.position = Vec3::new(0.1, 0.2, 0.05);
    assert!(!t.update_local_matrix());
}

#[test]
fn transform_mark_dirty_forces_update() {
    let mut t = Transform::new();
    t.update_local_matrix();
    assert!(!t.update_local_matrix());

    t.mark_dirty();
    assert!(t.update_local_matrix());
}

// ============================================================================
// Hierarchy Tests
// ============================================================================

#[test]
fn hierarchy_chain_world_positions() {
    let (mut scene, handles) = create_chain(5);

    scene.update_matrix_world();

    for (i, &handle) in handles.iter().enumerate() {
        let world_pos = world_position(&scene, handle);
        let expected_x = (i + 1) as f32;
        assert!(
            approx_eq(world_pos.x, expected_x),
            "Node {i}: expected x={expected_x}, got x={}",
            world_pos.x
        );
    }
}

#[test]
fn hierarchy_with_root_scale() {
    let (mut scene, handles) = create_chain(3);
    scene.get_node_mut(handles[0]).unwrap().transform.scale = Vec3::splat(1.5);

    scene.update_matrix_world();

    // root at x=1, children offsets scaled by 1.5
    let last = world_position(&scene, handles[2]);
    assert!(approx_eq(last.x, 1.0 + 1.5 + 1.5), "got {}", last.x);
}

#[test]
fn hierarchy_change_propagates_next_update() {
    let (mut scene, handles) = create_chain(3);
    scene.update_matrix_world();

    scene.get_node_mut(handles[0]).unwrap().transform.position = Vec3::new(0.0, -1.5, 0.0);
    scene.update_matrix_world();

    let last = world_position(&scene, handles[2]);
    assert!(vec3_approx(last, Vec3::new(2.0, -1.5, 0.0)));
}

#[test]
fn hierarchy_subtree_update() {
    let (mut scene, handles) = create_chain(5);
    scene.update_matrix_world();

    scene.get_node_mut(handles[2]).unwrap().transform.position = Vec3::new(10.0, 0.0, 0.0);
    scene.update_subtree(handles[2]);

    // parent(2) + 10
    assert!(approx_eq(world_position(&scene, handles[2]).x, 12.0));
    assert!(approx_eq(world_position(&scene, handles[3]).x, 13.0));
}

#[test]
fn hierarchy_camera_sync_on_update() {
    let mut scene = Scene::new();
    let cam = scene.add_camera(Camera::new_perspective(60.0, 1.0, 0.1, 100.0));
    scene.get_node_mut(cam).unwrap().transform.position = Vec3::new(0.0, 5.0, 10.0);

    scene.update_matrix_world();

    // The view matrix is the inverse of the camera world matrix
    let view = *scene.get_camera(cam).unwrap().view_matrix();
    let eye = view.inverse().w_axis.truncate();
    assert!(vec3_approx(eye, Vec3::new(0.0, 5.0, 10.0)));
}

#[test]
fn identity_hierarchy_produces_identity_world() {
    let mut scene = Scene::new();
    let root = scene.add_node(Node::new());
    let child = scene.add_to_parent(Node::new(), root);

    scene.update_matrix_world();

    assert!(vec3_approx(world_position(&scene, child), Vec3::ZERO));
}

#[test]
fn deeply_nested_hierarchy_no_stack_overflow() {
    let depth = 500;
    let (mut scene, handles) = create_chain(depth);

    scene.update_matrix_world();

    let last = world_position(&scene, *handles.last().unwrap());
    assert!(
        approx_eq(last.x, depth as f32),
        "expected {depth}, got {}",
        last.x
    );
}
