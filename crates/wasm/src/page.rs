use std::rc::Rc;

use folio_core::page::{EmailToggle, ProjectDetails, VisibilityEntry, anchor, parallax, timeline};
use folio_protocol::{HostCommand, Point};
use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, MouseEvent,
};

use crate::dom;
use crate::error::{DomError, js_message};
use crate::host::{Observer, Page};

/// In-page `#fragment` links scroll smoothly instead of jumping.
pub(crate) fn install_anchors(page: &Rc<Page>) -> Result<(), DomError> {
    for link in dom::query_all(&page.document, &page.config.selectors.anchor)? {
        let p = Rc::clone(page);
        let el = link.clone();
        page.listen(EventListener::new_with_options(
            &link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let href = el.get_attribute("href").unwrap_or_default();
                if let Some(command) = anchor::follow(&href) {
                    event.prevent_default();
                    p.apply(vec![command]);
                }
            },
        ));
    }
    Ok(())
}

/// Detail triggers, close button, backdrop clicks and the Escape key.
pub(crate) fn install_overlay(page: &Rc<Page>) -> Result<(), DomError> {
    let Some(overlay) = &page.overlay else {
        return Ok(());
    };

    for trigger in dom::query_all(&page.document, &page.config.selectors.detail_trigger)? {
        let p = Rc::clone(page);
        let el = trigger.clone();
        page.listen(EventListener::new(&trigger, "click", move |_| {
            let details = ProjectDetails::from_attributes(
                el.get_attribute("data-title"),
                el.get_attribute("data-summary"),
                el.get_attribute("data-target"),
            );
            let commands = p.overlay_state.borrow_mut().open(details);
            p.apply(commands);
        }));
    }

    if let Some(close) = &overlay.close {
        let p = Rc::clone(page);
        page.listen(EventListener::new(close, "click", move |_| {
            let commands = p.overlay_state.borrow_mut().close();
            p.apply(commands);
        }));
    }

    let p = Rc::clone(page);
    let root = overlay.root.clone();
    page.listen(EventListener::new(&overlay.root, "click", move |event: &Event| {
        let on_backdrop = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .is_some_and(|t| t == root);
        let commands = p.overlay_state.borrow_mut().backdrop_clicked(on_backdrop);
        p.apply(commands);
    }));

    let p = Rc::clone(page);
    page.listen(EventListener::new(&page.document, "keydown", move |event: &Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let commands = p.overlay_state.borrow_mut().key_pressed(&event.key());
        p.apply(commands);
    }));
    Ok(())
}

/// One-shot reveal of `.reveal` elements. Without IntersectionObserver
/// support everything is revealed up front.
pub(crate) fn install_reveal(page: &Rc<Page>) {
    if page.reveal_targets.is_empty() {
        return;
    }

    let p = Rc::clone(page);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let entries: Vec<VisibilityEntry> = entries
                .iter()
                .filter_map(|e| e.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    let target = entry.target();
                    let index = p.reveal_targets.iter().position(|el| *el == target)?;
                    Some(VisibilityEntry {
                        index,
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                })
                .collect();
            let commands = p.reveal.borrow_mut().on_intersection(&entries);
            p.apply(commands);
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(page.reveal.borrow().threshold()));
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for el in &page.reveal_targets {
                observer.observe(el);
            }
            *page.observer.borrow_mut() = Some(Observer::new(observer, callback));
        }
        Err(err) => {
            tracing::warn!(error = %js_message(&err), "IntersectionObserver unavailable; revealing all");
            let commands = (0..page.reveal_targets.len())
                .map(|index| HostCommand::MarkRevealed { index })
                .collect();
            page.apply(commands);
        }
    }
}

/// Timeline nodes jump to their `data-target` section.
pub(crate) fn install_timeline(page: &Rc<Page>) -> Result<(), DomError> {
    for node in dom::query_all(&page.document, &page.config.selectors.timeline_node)? {
        let p = Rc::clone(page);
        let el = node.clone();
        page.listen(EventListener::new(&node, "click", move |_| {
            let target = el.get_attribute("data-target");
            if let Some(command) = timeline::node_clicked(target.as_deref()) {
                p.apply(vec![command]);
            }
        }));
    }
    Ok(())
}

pub(crate) fn install_parallax(page: &Rc<Page>) {
    if page.parallax_layer.is_none() {
        return;
    }
    let p = Rc::clone(page);
    page.listen(EventListener::new(&page.document, "pointermove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        let viewport = dom::viewport_rect(&p.window);
        let command = parallax::on_pointer_move(pointer, viewport, p.config.parallax_strength);
        p.apply(vec![command]);
    }));
}

pub(crate) fn install_email(page: &Rc<Page>) {
    let Some(email) = &page.email else {
        return;
    };
    if page.email_state.borrow().is_none() {
        tracing::debug!("email slot lacks data-user/data-domain; toggle disabled");
        return;
    }
    let p = Rc::clone(page);
    page.listen(EventListener::new(&email.toggle, "click", move |_| {
        let command = p.email_state.borrow_mut().as_mut().map(EmailToggle::toggle);
        if let Some(command) = command {
            p.apply(vec![command]);
        }
    }));
}
