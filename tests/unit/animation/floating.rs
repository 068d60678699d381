use super::*;

#[test]
fn stopped_animation_has_no_offset() {
    let mut f = FloatingAnimation::default();
    f.advance(1.0);
    assert_eq!(f.offset(), FloatOffset::default());
    assert!(!f.is_active());
}

#[test]
fn pause_freezes_phase() {
    let mut f = FloatingAnimation::default();
    f.start();
    f.advance(1.0);
    let before = f.offset();
    assert!(before.y > 0.0);

    f.pause();
    f.advance(0.7);
    assert_eq!(f.offset(), before);
    assert!(f.is_started());
    assert!(!f.is_active());
}

#[test]
fn scheduled_resume_fires_after_delay() {
    let mut f = FloatingAnimation::default();
    f.start();
    f.pause();
    f.schedule_resume(0.8);
    f.advance(0.5);
    assert!(!f.is_active());
    f.advance(0.31);
    assert!(f.is_active());
    assert_eq!(f.pending_resume(), None);
}

#[test]
fn pausing_again_cancels_pending_resume() {
    let mut f = FloatingAnimation::default();
    f.start();
    f.pause();
    f.schedule_resume(0.8);
    f.pause();
    f.advance(2.0);
    assert!(!f.is_active());
}
