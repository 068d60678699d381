use super::*;

#[test]
fn tween_holds_start_during_delay_and_lands_on_target() {
    let tw = Tween::new(0.0f64, 10.0, 1.0, Ease::Linear).with_delay(0.5);
    assert_eq!(tw.sample(0.0), 0.0);
    assert_eq!(tw.sample(0.5), 0.0);
    assert!((tw.sample(1.0) - 5.0).abs() < 1e-9);
    assert_eq!(tw.sample(1.5), 10.0);
    assert_eq!(tw.sample(9.0), 10.0);
    assert!(tw.is_finished(1.5));
    assert!(!tw.is_finished(1.49));
}

#[test]
fn zero_duration_tween_jumps() {
    let tw = Tween::new(1.0f32, 2.0, 0.0, Ease::OutQuad);
    assert_eq!(tw.sample(0.001), 2.0);
}

#[test]
fn vec3_and_quat_interpolate() {
    let tw = Tween::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 2.0, Ease::Linear);
    assert!((tw.sample(1.0).z - 2.0).abs() < 1e-6);

    let q = Tween::new(
        Quat::IDENTITY,
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        1.0,
        Ease::Linear,
    );
    let mid = q.sample(0.5);
    let expected = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
    assert!(mid.angle_between(expected) < 1e-4);
}

#[test]
fn sequence_chains_steps() {
    let seq = TweenSequence::new(0.0f64)
        .with_delay(0.2)
        .then(1.0, 0.6, Ease::Linear)
        .then(-1.0, 1.2, Ease::Linear)
        .then(0.0, 0.6, Ease::Linear);
    assert!((seq.end_time() - 2.6).abs() < 1e-9);
    assert_eq!(seq.sample(0.1), 0.0);
    assert!((seq.sample(0.5) - 0.5).abs() < 1e-9);
    assert!((seq.sample(0.8) - 1.0).abs() < 1e-9);
    assert!((seq.sample(1.4) - 0.0).abs() < 1e-9);
    assert_eq!(seq.sample(3.0), 0.0);
    assert!(seq.is_finished(2.61));
    assert!(!seq.is_finished(2.5));
}
