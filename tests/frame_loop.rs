use nalgebra_glm as glm;

use orbit_lab::Scene;
use orbit_lab::animation::{
    AxisAngle, BlendMode, Composition, CopyDirection, InterpolationMode, KeyRotation,
    axis_angle_to_euler, euler_to_axis_angle, euler_to_matrix, slerp_quaternion,
};
use orbit_lab::settings::Settings;

fn columns(m: &glm::Mat4) -> [[f32; 4]; 4] {
    std::array::from_fn(|c| std::array::from_fn(|r| m[(r, c)]))
}

fn assert_columns_near(a: &[[f32; 4]; 4], b: &[[f32; 4]; 4]) {
    for (ca, cb) in a.iter().zip(b) {
        for (x, y) in ca.iter().zip(cb) {
            assert!((x - y).abs() < 1e-4, "{a:?}\n{b:?}");
        }
    }
}

#[test]
fn three_second_loop_wraps_after_one_period() {
    let mut settings = Settings::default();
    settings.animation.mode = InterpolationMode::QuaternionInterpolated;
    settings.animation.blend = BlendMode::Spherical;
    let mut scene = Scene::new(&settings);
    scene
        .rotation_mut()
        .set_axis_angle(KeyRotation::Second, AxisAngle::from_degrees(glm::vec3(0.0, 1.0, 0.0), 120.0));

    // 180 frames of 1/60 s is one full period
    let mut halfway = None;
    for frame in 1..=180 {
        let u = scene.tick(1.0 / 60.0);
        if frame == 90 {
            halfway = Some(u);
        }
    }
    let t = scene.rotation().clock().t();
    assert!(t.min(1.0 - t) < 1e-3, "t={t}");

    let expected = glm::rotation(60.0_f32.to_radians(), &glm::vec3(0.0, 1.0, 0.0));
    assert_columns_near(&halfway.expect("frame 90").model, &columns(&expected));
}

#[test]
fn disabling_animation_freezes_the_model() {
    let mut scene = Scene::default();
    scene.rotation_mut().set_mode(InterpolationMode::EulerInterpolated);
    scene
        .rotation_mut()
        .set_euler(KeyRotation::Second, glm::vec3(0.0, 0.0, 1.0));
    scene.tick(0.9);
    scene.rotation_mut().clock_mut().set_animating(false);
    let frozen = scene.tick(0.0).model;
    for _ in 0..10 {
        assert_eq!(scene.tick(0.5).model, frozen);
    }
    assert!((scene.rotation().clock().t() - 0.3).abs() < 1e-5);
}

#[test]
fn orbiting_keeps_the_eye_on_the_sphere() {
    let mut scene = Scene::default();
    let camera = scene.camera_mut();
    camera.on_mouse_button(true);
    camera.on_cursor_moved((0.0, 0.0));
    for step in 1..200 {
        camera.on_cursor_moved((step as f64 * 7.0, (step as f64 * 3.0).sin() * 40.0));
    }
    camera.on_scroll(1.5);
    let c = camera.camera();
    assert!(c.latitude() > -90.0 && c.latitude() < 90.0);
    assert!((-180.0..=180.0).contains(&c.longitude()));
    let eye = c.eye_position();
    assert!((glm::length(&eye) - c.distance()).abs() < 1e-4);
}

#[test]
fn slerp_scenario_half_turn_about_y() {
    let q1 = glm::quat_identity();
    let q2 = glm::quat_angle_axis(std::f32::consts::PI, &glm::vec3(0.0, 1.0, 0.0));
    let half = slerp_quaternion(&q1, &q2, 0.5);
    let aa = orbit_lab::animation::quaternion_to_axis_angle(&half);
    assert!((aa.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    assert!((aa.axis() - glm::vec3(0.0, 1.0, 0.0)).norm() < 1e-4);
}

#[test]
fn conversions_agree_through_the_public_api() {
    let (x, y, z) = (0.7, -0.4, 2.2);
    let aa = euler_to_axis_angle(x, y, z);
    let back = axis_angle_to_euler(&aa.axis(), aa.angle);
    assert_columns_near(
        &columns(&euler_to_matrix(back.x, back.y, back.z)),
        &columns(&euler_to_matrix(x, y, z)),
    );
}

#[test]
fn scaled_model_reaches_the_normal_uniform() {
    let mut scene = Scene::default();
    let rotation = scene.rotation_mut();
    rotation.set_translation(glm::vec3(0.0, 1.0, 0.0));
    rotation.set_scale(glm::vec3(2.0, 1.0, 1.0));
    rotation.set_composition(Composition::TranslateRotateScale);
    let u = scene.uniforms();
    assert_eq!(u.model[3], [0.0, 1.0, 0.0, 1.0]);
    assert!((u.normal[0][0] - 0.5).abs() < 1e-6);
    assert!((u.normal[1][1] - 1.0).abs() < 1e-6);
}

#[test]
fn copying_a_tiny_euler_key_keeps_it() {
    let mut scene = Scene::default();
    let rotation = scene.rotation_mut();
    rotation.set_euler(KeyRotation::First, glm::vec3(0.0, 0.0, 5e-4));
    let euler_model = rotation.model_matrix();
    rotation.copy_configuration(CopyDirection::FromEuler);
    rotation.set_mode(InterpolationMode::Quaternion);
    let aa = rotation.axis_angle(KeyRotation::First);
    assert!((aa.angle - 5e-4).abs() < 1e-8, "angle={}", aa.angle);
    assert_columns_near(&columns(&rotation.model_matrix()), &columns(&euler_model));
}
