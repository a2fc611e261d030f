// Example: percentage offsets and per-section overrides track viewport size.
use scrolltrigger::{Offset, ScrollTrigger, ScrollTriggerOptions, SectionId};

fn main() {
    let sections: Vec<SectionId> = vec![0, 1, 2];
    let mut t = ScrollTrigger::new(
        ScrollTriggerOptions::from_elements(sections)
            // Trigger line at 25% of the viewport height, up from the bottom.
            .with_offset(Offset::Percent(25.0))
            // Section 1 pins its own line at 300px via an override marker.
            .with_offset_attr(Some(|e: &SectionId| {
                (*e == 1).then(|| "300".to_owned())
            })),
    );
    t.set_viewport_height(800);
    t.measure_many((0..3).map(|i| (i, i as u64 * 1000, 1000)));

    for i in 0..3 {
        println!(
            "section {i}: offset={:?} line={:?}",
            t.resolved_offset(i),
            t.trigger_line(i)
        );
    }

    // Percentage offsets attach a resize watcher; the lines follow.
    t.apply_resize_event(500, 0);
    t.tick(100);
    for i in 0..3 {
        println!(
            "after resize, section {i}: offset={:?} line={:?}",
            t.resolved_offset(i),
            t.trigger_line(i)
        );
    }
}
