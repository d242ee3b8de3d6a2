use std::cell::RefCell;
use std::rc::Rc;

use folio_core::carousel::{Card, CarouselController, RailLayout};
use folio_core::config::PageConfig;
use folio_core::page::{DetailOverlay, EmailToggle, RevealTracker};
use folio_protocol::{HostCommand, ScrollBehavior};
use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, ScrollLogicalPosition, Window,
};

use crate::dom;
use crate::error::DomError;

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

pub(crate) struct Rail {
    pub element: Element,
    pub cards: Vec<Element>,
    pub prev: Option<Element>,
    pub next: Option<Element>,
}

pub(crate) struct OverlayElements {
    pub root: Element,
    pub title: Element,
    pub summary: Element,
    pub link: Element,
    pub close: Option<Element>,
}

pub(crate) struct EmailElements {
    pub toggle: Element,
    pub text: Element,
}

pub(crate) struct Observer {
    pub observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    pub fn new(
        observer: IntersectionObserver,
        callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
    ) -> Self {
        Self {
            observer,
            _callback: callback,
        }
    }
}

/// Every element and state machine bound on the page, plus the listeners
/// that keep them alive.
pub(crate) struct Page {
    pub config: PageConfig,
    pub window: Window,
    pub document: Document,
    pub rail: Option<Rail>,
    pub carousel: RefCell<CarouselController>,
    frame: RefCell<Option<(u64, AnimationFrame)>>,
    pub overlay: Option<OverlayElements>,
    pub overlay_state: RefCell<DetailOverlay>,
    pub reveal_targets: Vec<Element>,
    pub reveal: RefCell<RevealTracker>,
    pub observer: RefCell<Option<Observer>>,
    pub parallax_layer: Option<HtmlElement>,
    pub email: Option<EmailElements>,
    pub email_state: RefCell<Option<EmailToggle>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Page {
    pub fn bind(config: PageConfig, window: Window, document: Document) -> Result<Rc<Self>, DomError> {
        let sel = &config.selectors;

        let rail = match dom::query(&document, &sel.rail)? {
            Some(element) => {
                let cards = dom::query_all(&document, &sel.card)?
                    .into_iter()
                    .filter(|card| element.contains(Some(&**card)))
                    .collect();
                Some(Rail {
                    element,
                    cards,
                    prev: dom::query(&document, &sel.prev)?,
                    next: dom::query(&document, &sel.next)?,
                })
            }
            None => None,
        };
        let cards = rail
            .as_ref()
            .map(|r| {
                r.cards
                    .iter()
                    .map(|c| Card::new(c.get_attribute("data-target")))
                    .collect()
            })
            .unwrap_or_default();
        let carousel = CarouselController::new(cards, config.carousel.clone());

        let overlay = match (
            dom::query(&document, &sel.overlay)?,
            dom::query(&document, &sel.overlay_title)?,
            dom::query(&document, &sel.overlay_summary)?,
            dom::query(&document, &sel.overlay_link)?,
        ) {
            (Some(root), Some(title), Some(summary), Some(link)) => Some(OverlayElements {
                root,
                title,
                summary,
                link,
                close: dom::query(&document, &sel.overlay_close)?,
            }),
            _ => None,
        };

        let reveal_targets = dom::query_all(&document, &sel.reveal)?;
        let reveal = RevealTracker::new(reveal_targets.len(), config.reveal_threshold);

        let parallax_layer = dom::query(&document, &sel.parallax_layer)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let email = match (
            dom::query(&document, &sel.email_toggle)?,
            dom::query(&document, &sel.email_text)?,
        ) {
            (Some(toggle), Some(text)) => Some(EmailElements { toggle, text }),
            _ => None,
        };
        let email_state = email.as_ref().and_then(|e| {
            let user = e.text.get_attribute("data-user")?;
            let domain = e.text.get_attribute("data-domain")?;
            let label = e.text.text_content().unwrap_or_default();
            Some(EmailToggle::new(user, domain, label))
        });

        tracing::debug!(
            cards = rail.as_ref().map_or(0, |r| r.cards.len()),
            overlay = overlay.is_some(),
            reveal = reveal_targets.len(),
            parallax = parallax_layer.is_some(),
            email = email_state.is_some(),
            "page bound"
        );

        Ok(Rc::new(Self {
            config,
            window,
            document,
            rail,
            carousel: RefCell::new(carousel),
            frame: RefCell::new(None),
            overlay,
            overlay_state: RefCell::new(DetailOverlay::default()),
            reveal_targets,
            reveal: RefCell::new(reveal),
            observer: RefCell::new(None),
            parallax_layer,
            email,
            email_state: RefCell::new(email_state),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    pub fn listen(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Drop every listener, pending frame and observer. Breaks the
    /// `Rc<Page>` cycles held by listener closures.
    pub fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        self.frame.borrow_mut().take();
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.observer.disconnect();
        }
    }

    pub fn measure_rail(&self) -> RailLayout {
        match &self.rail {
            Some(rail) => RailLayout::new(
                dom::rect_of(&rail.element),
                rail.cards.iter().map(dom::rect_of).collect(),
            ),
            None => RailLayout::default(),
        }
    }

    pub fn rail_scroll(&self) -> f64 {
        self.rail
            .as_ref()
            .map_or(0.0, |r| r.element.scroll_left() as f64)
    }

    /// Apply commands in order. Commands that refer to absent elements are
    /// skipped.
    pub fn apply(self: &Rc<Self>, commands: Vec<HostCommand>) {
        for command in commands {
            self.apply_one(command);
        }
    }

    fn apply_one(self: &Rc<Self>, command: HostCommand) {
        let classes = &self.config.classes;
        match command {
            HostCommand::SetRailScroll { offset } => {
                if let Some(rail) = &self.rail {
                    dom::scroll_left_to(&rail.element, offset, ScrollBehavior::Instant);
                }
            }
            HostCommand::SetRailDragging { dragging } => {
                if let Some(rail) = &self.rail {
                    dom::set_class(&rail.element, &classes.dragging, dragging);
                }
            }
            HostCommand::CapturePointer { pointer_id } => {
                if let Some(rail) = &self.rail
                    && rail.element.set_pointer_capture(pointer_id).is_err()
                {
                    tracing::debug!(pointer_id, "pointer capture refused");
                }
            }
            HostCommand::ReleasePointerCapture { pointer_id } => {
                if let Some(rail) = &self.rail
                    && rail.element.has_pointer_capture(pointer_id)
                    && rail.element.release_pointer_capture(pointer_id).is_err()
                {
                    tracing::debug!(pointer_id, "pointer release refused");
                }
            }
            HostCommand::SetCardActive { index, active } => {
                if let Some(card) = self.rail.as_ref().and_then(|r| r.cards.get(index)) {
                    dom::set_class(card, &classes.active_card, active);
                }
            }
            HostCommand::CenterCard { index, behavior } => {
                if let Some(card) = self.rail.as_ref().and_then(|r| r.cards.get(index)) {
                    dom::scroll_into_view(
                        card,
                        behavior,
                        ScrollLogicalPosition::Nearest,
                        ScrollLogicalPosition::Center,
                    );
                }
            }
            HostCommand::RequestFrame { id } => {
                let page = Rc::clone(self);
                let handle = request_animation_frame(move |_| page.frame_fired(id));
                // Replacing the handle cancels whatever was still pending.
                *self.frame.borrow_mut() = Some((id, handle));
            }
            HostCommand::CancelFrame { id } => {
                let mut frame = self.frame.borrow_mut();
                if frame.as_ref().is_some_and(|(pending, _)| *pending == id) {
                    frame.take();
                }
            }
            HostCommand::ScrollToSection { id } => match self.document.get_element_by_id(&id) {
                Some(section) => dom::scroll_into_view(
                    &section,
                    ScrollBehavior::Smooth,
                    ScrollLogicalPosition::Start,
                    ScrollLogicalPosition::Nearest,
                ),
                None => tracing::debug!(%id, "section not found"),
            },
            HostCommand::SetOverlayContent {
                title,
                summary,
                href,
            } => {
                if let Some(overlay) = &self.overlay {
                    overlay.title.set_text_content(Some(&title));
                    overlay.summary.set_text_content(Some(&summary));
                    dom::set_attr(&overlay.link, "href", &href);
                }
            }
            HostCommand::ShowOverlay => self.set_overlay_visible(true),
            HostCommand::HideOverlay => self.set_overlay_visible(false),
            HostCommand::FocusOverlayConfirm => {
                if let Some(overlay) = &self.overlay {
                    dom::focus(&overlay.link);
                }
            }
            HostCommand::MarkRevealed { index } => {
                if let Some(el) = self.reveal_targets.get(index) {
                    dom::set_class(el, &classes.revealed, true);
                }
            }
            HostCommand::StopObserving { index } => {
                if let (Some(el), Some(observer)) =
                    (self.reveal_targets.get(index), self.observer.borrow().as_ref())
                {
                    observer.observer.unobserve(el);
                }
            }
            HostCommand::SetParallax { offset } => {
                if let Some(layer) = &self.parallax_layer {
                    let transform = format!("translate3d({:.2}px, {:.2}px, 0)", offset.x, offset.y);
                    dom::set_style(layer, "transform", &transform);
                }
            }
            HostCommand::SetEmailText { text, revealed } => {
                if let Some(email) = &self.email {
                    email.text.set_text_content(Some(&text));
                    dom::set_attr(&email.toggle, "aria-expanded", bool_attr(revealed));
                }
            }
        }
    }

    fn set_overlay_visible(&self, visible: bool) {
        let Some(overlay) = &self.overlay else {
            return;
        };
        dom::set_class(&overlay.root, &self.config.classes.overlay_hidden, !visible);
        dom::set_attr(&overlay.root, "aria-hidden", bool_attr(!visible));
    }

    fn frame_fired(self: &Rc<Self>, id: u64) {
        self.frame.borrow_mut().take();
        let layout = self.measure_rail();
        let commands = self.carousel.borrow_mut().on_frame(id, &layout);
        self.apply(commands);
    }
}
