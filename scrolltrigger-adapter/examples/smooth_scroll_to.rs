// Example: execute a smooth scroll command and watch the glide land the
// section's top on its trigger line.
use scrolltrigger::{ScrollToOptions, ScrollTriggerOptions, SectionId};
use scrolltrigger_adapter::Controller;

fn main() {
    let sections: Vec<SectionId> = vec![0, 1, 2, 3];
    let mut c = Controller::new(ScrollTriggerOptions::from_elements(sections));
    c.engine_mut().set_viewport_height(800);
    c.engine_mut()
        .measure_many((0..4).map(|i| (i, i as u64 * 1500, 1500)));
    c.set_glide_half_life_ms(60);

    let target = c.scroll_to(3, ScrollToOptions::new(), 0);
    println!("target offset: {target:?}");

    for now in (0..=900).step_by(25) {
        if let Some(off) = c.tick(now) {
            println!("t={now:4}ms offset={off}");
        }
    }
    println!("active: {:?}", c.engine().active_index());
}
