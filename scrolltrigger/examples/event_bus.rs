// Example: consume change broadcasts without holding the engine.
use scrolltrigger::{CHANGE_EVENT, EventBus, ScrollTrigger, ScrollTriggerOptions, SectionId};

fn main() {
    let bus: EventBus<SectionId> = EventBus::new();
    let id = bus.subscribe(CHANGE_EVENT, |ev| {
        println!("nav listener: index -> {:?}", ev.index);
    });

    let sections: Vec<SectionId> = vec![0, 1, 2];
    let mut t = ScrollTrigger::new(
        ScrollTriggerOptions::from_elements(sections).with_bus(Some(bus.clone())),
    );
    t.set_viewport_height(800);
    t.measure_many((0..3).map(|i| (i, i as u64 * 1000, 1000)));

    t.apply_scroll_event(1500, 0);
    t.tick(100);

    // Bus subscriptions outlive the engine.
    t.destroy();
    bus.unsubscribe(id);
}
