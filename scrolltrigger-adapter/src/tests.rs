use crate::*;

use scrolltrigger::{ScrollBehavior, ScrollTarget, ScrollToOptions, ScrollTriggerOptions, SectionId};

fn controller() -> Controller {
    let sections: Vec<SectionId> = vec![0, 1, 2];
    let mut c = Controller::new(ScrollTriggerOptions::from_elements(sections));
    c.engine_mut().set_viewport_height(800);
    c.engine_mut()
        .measure_many((0..3).map(|i| (i, i as u64 * 1000, 1000)));
    c
}

fn smooth(offset: u64) -> ScrollTarget {
    ScrollTarget {
        offset,
        behavior: ScrollBehavior::Smooth,
    }
}

#[test]
fn smooth_scroll_glides_to_the_target() {
    let mut c = controller();
    c.set_glide_half_life_ms(50);

    // Line at 700: target = 2000 - 700.
    let target = c.scroll_to(2, ScrollToOptions::new(), 0);
    assert_eq!(target, Some(1300));
    assert!(c.is_gliding());

    let mut last = 0u64;
    for now in (0..=800).step_by(50) {
        if let Some(off) = c.tick(now) {
            assert!(off >= last, "glide moved backwards: {last} -> {off}");
            last = off;
        }
    }
    assert!(!c.is_gliding());
    assert_eq!(c.offset(), 1300);
    // The engine saw the glide as scroll events and updated en route.
    assert_eq!(c.engine().active_index(), Some(2));
}

#[test]
fn auto_scroll_jumps_immediately() {
    let mut c = controller();

    let target = c.scroll_to(
        2,
        ScrollToOptions::new().with_behavior(ScrollBehavior::Auto),
        0,
    );
    assert_eq!(target, Some(1300));
    assert!(!c.is_gliding());
    assert_eq!(c.offset(), 1300);

    c.tick(100);
    assert_eq!(c.engine().active_index(), Some(2));
}

#[test]
fn user_scroll_cancels_the_glide() {
    let mut c = controller();
    c.scroll_to(2, ScrollToOptions::new(), 0);
    c.tick(50);
    assert!(c.is_gliding());

    c.on_scroll(42, 60);
    assert!(!c.is_gliding());
    assert_eq!(c.offset(), 42);
    // The glide stays dead on later ticks.
    c.tick(500);
    assert_eq!(c.offset(), 42);
}

#[test]
fn new_command_retargets_an_active_glide() {
    let mut c = controller();
    c.set_glide_half_life_ms(50);
    c.scroll_to(2, ScrollToOptions::new(), 0);
    c.tick(200);
    assert!(c.is_gliding());

    // Redirect mid-flight; target for section 1 is 1000 - 700.
    let target = c.scroll_to(1, ScrollToOptions::new(), 200);
    assert_eq!(target, Some(300));
    assert!(c.is_gliding());

    for now in (200..=800).step_by(50) {
        c.tick(now);
    }
    assert!(!c.is_gliding());
    assert_eq!(c.offset(), 300);
    assert_eq!(c.engine().active_index(), Some(1));
}

#[test]
fn rejected_commands_leave_the_controller_alone() {
    let mut c = controller();
    assert_eq!(c.scroll_to(99, ScrollToOptions::new(), 0), None);
    assert_eq!(c.scroll_to_section(&99, ScrollToOptions::new(), 0), None);
    assert!(!c.is_gliding());
    assert_eq!(c.offset(), 0);
}

#[test]
fn resize_events_reach_the_engine() {
    let mut c = controller();
    c.on_resize(500, 0);
    assert_eq!(c.engine().viewport_height(), 500);
}

#[test]
fn glide_halves_the_remaining_distance() {
    let g = Glide::toward(100, smooth(500), 1000, 100);
    assert_eq!(g.target(), 500);
    assert_eq!(g.sample(0), 100); // before start
    assert_eq!(g.sample(1000), 100);
    assert_eq!(g.sample(1100), 300);
    assert_eq!(g.sample(1200), 400);
    assert_eq!(g.sample(1300), 450);
    assert!(!g.is_done(1300));
    // Sub-pixel remainder: snapped onto the target.
    assert!(g.is_done(2000));
    assert_eq!(g.sample(2000), 500);
}

#[test]
fn retarget_restarts_from_current_position() {
    let mut g = Glide::toward(0, smooth(800), 0, 100);
    assert_eq!(g.sample(100), 400);

    g.retarget(100, smooth(200));
    assert_eq!(g.target(), 200);
    // No jump at the moment of retargeting.
    assert_eq!(g.sample(100), 400);
    // The decay restarts from there toward the new target.
    assert_eq!(g.sample(200), 300);
}
