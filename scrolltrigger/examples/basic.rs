// Example: track the active section while simulating a page scroll.
use scrolltrigger::{ChangeEvent, ScrollTrigger, ScrollTriggerOptions, SectionId};

fn main() {
    let sections: Vec<SectionId> = (0..4).collect();
    let mut t = ScrollTrigger::new(
        ScrollTriggerOptions::from_elements(sections).with_on_change(Some(
            |ev: &ChangeEvent<SectionId>| {
                println!(
                    "active: {:?} (was {:?}), section {:?}",
                    ev.index, ev.previous_index, ev.section
                );
            },
        )),
    );
    t.set_viewport_height(800);
    // Four sections stacked vertically, 1200px each.
    t.measure_many((0..4).map(|i| (i, i as u64 * 1200, 1200)));

    let mut now = 0u64;
    for y in (0..4800u64).step_by(400) {
        t.apply_scroll_event(y, now);
        now += 150;
        t.tick(now);
    }

    println!("final: {:?}", t.active_index());
    t.destroy();
}
