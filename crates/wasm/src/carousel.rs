use std::rc::Rc;

use folio_core::carousel::{NavStep, PointerInput};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Event, PointerEvent};

use crate::dom;
use crate::host::Page;

fn pointer_input(page: &Page, event: &PointerEvent) -> PointerInput {
    let selectors = &page.config.selectors;
    let (from_interactive, card) = page.rail.as_ref().map_or((false, None), |rail| {
        (
            dom::from_descendant(event, &rail.element, &selectors.interactive),
            dom::enclosing_index(event, &selectors.card, &rail.cards),
        )
    });
    PointerInput {
        pointer_id: event.pointer_id(),
        x: f64::from(event.client_x()),
        from_interactive,
        card,
    }
}

/// Wire drag, scroll, resize, arrow and card listeners, then mark the
/// initially centered card.
///
/// The rail captures the pointer on pointer-down, which retargets the
/// resulting click to the rail. Card clicks are therefore read from the
/// rail and resolved against the card pressed at pointer-down.
pub(crate) fn install(page: &Rc<Page>) {
    let Some(rail) = &page.rail else {
        return;
    };

    let p = Rc::clone(page);
    page.listen(EventListener::new(&rail.element, "pointerdown", move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let input = pointer_input(&p, event);
        let scroll = p.rail_scroll();
        let commands = p.carousel.borrow_mut().begin_drag(&input, scroll);
        p.apply(commands);
    }));

    let p = Rc::clone(page);
    page.listen(EventListener::new(&rail.element, "pointermove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<PointerEvent>() else {
            return;
        };
        let input = pointer_input(&p, event);
        let commands = p.carousel.borrow_mut().continue_drag(&input);
        p.apply(commands);
    }));

    for kind in ["pointerup", "pointercancel", "pointerleave"] {
        let p = Rc::clone(page);
        page.listen(EventListener::new(&rail.element, kind, move |event: &Event| {
            let Some(event) = event.dyn_ref::<PointerEvent>() else {
                return;
            };
            let commands = p.carousel.borrow_mut().end_drag(event.pointer_id());
            p.apply(commands);
        }));
    }

    let p = Rc::clone(page);
    page.listen(EventListener::new(&rail.element, "scroll", move |_| {
        let commands = p.carousel.borrow_mut().on_scroll();
        p.apply(commands);
    }));

    let p = Rc::clone(page);
    page.listen(EventListener::new(&page.window, "resize", move |_| {
        let layout = p.measure_rail();
        let commands = p.carousel.borrow_mut().on_resize(&layout);
        p.apply(commands);
    }));

    for (button, step) in [(&rail.prev, NavStep::Prev), (&rail.next, NavStep::Next)] {
        let Some(button) = button else {
            continue;
        };
        let p = Rc::clone(page);
        page.listen(EventListener::new(button, "click", move |_| {
            let commands = p.carousel.borrow_mut().navigate(step);
            p.apply(commands);
        }));
    }

    let p = Rc::clone(page);
    let rail_el = rail.element.clone();
    page.listen(EventListener::new(&rail.element, "click", move |event: &Event| {
        let from_interactive =
            dom::from_descendant(event, &rail_el, &p.config.selectors.interactive);
        let commands = p.carousel.borrow_mut().rail_clicked(from_interactive);
        p.apply(commands);
    }));

    let layout = page.measure_rail();
    let commands = page.carousel.borrow_mut().recompute_active_card(&layout);
    page.apply(commands);
}
