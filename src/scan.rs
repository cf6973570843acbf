// Finds zoomable images in the host page and wires their activation triggers.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, Event, HtmlImageElement, MouseEvent};

use crate::error::ZoomError;
use crate::state::{ImageId, Size};
use crate::util::{clog, cwarn};

pub type OnActivate = Rc<dyn Fn(ImageId, Size)>;

type Listener = Closure<dyn FnMut(Event)>;

const TRIGGERS: [&str; 2] = ["click", "touchstart"];

/// What an activation listener does with the event it receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Ignore,
    Activate,
    /// Touch: stop the browser's own scroll/zoom first.
    BlockAndActivate,
}

pub fn trigger_for(event_type: &str, button: Option<i16>) -> Trigger {
    match event_type {
        "click" if button.unwrap_or(0) == 0 => Trigger::Activate,
        "touchstart" => Trigger::BlockAndActivate,
        _ => Trigger::Ignore,
    }
}

/// The canvas can only draw from `<img>` elements.
pub fn is_zoomable(node_name: &str) -> bool {
    node_name.eq_ignore_ascii_case("img")
}

/// Images found by [`initialize`] plus their listeners. Dropping it detaches
/// every listener.
pub struct Registration {
    images: Vec<HtmlImageElement>,
    listeners: Vec<(HtmlImageElement, &'static str, Listener)>,
}

impl Registration {
    pub fn images(&self) -> &[HtmlImageElement] {
        &self.images
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        for (img, kind, cb) in &self.listeners {
            let _ = img.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref());
        }
    }
}

pub fn natural_size(img: &HtmlImageElement) -> Size {
    Size::new(img.natural_width() as f64, img.natural_height() as f64)
}

fn activation_listener(img: &HtmlImageElement, id: ImageId, on_activate: &OnActivate) -> Listener {
    let img = img.clone();
    let on_activate = on_activate.clone();
    Closure::wrap(Box::new(move |e: Event| {
        let button = e.dyn_ref::<MouseEvent>().map(MouseEvent::button);
        match trigger_for(&e.type_(), button) {
            Trigger::Ignore => {}
            Trigger::Activate => on_activate(id, natural_size(&img)),
            Trigger::BlockAndActivate => {
                e.prevent_default();
                on_activate(id, natural_size(&img));
            }
        }
    }) as Box<dyn FnMut(_)>)
}

pub fn initialize(
    document: &Document,
    selector: &str,
    on_activate: OnActivate,
) -> Result<Registration, ZoomError> {
    let nodes = document.query_selector_all(selector)?;
    let mut reg = Registration {
        images: Vec::new(),
        listeners: Vec::new(),
    };
    // Non-passive so touchstart can call preventDefault.
    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let name = node.node_name();
        let img = match node.dyn_into::<HtmlImageElement>() {
            Ok(img) if is_zoomable(&name) => img,
            _ => {
                cwarn(&format!("`{selector}` matched <{name}>, skipping"));
                continue;
            }
        };
        let id = ImageId(reg.images.len());
        img.style().set_property("cursor", "pointer")?;
        for kind in TRIGGERS {
            let cb = activation_listener(&img, id, &on_activate);
            img.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                cb.as_ref().unchecked_ref(),
                &opts,
            )?;
            reg.listeners.push((img.clone(), kind, cb));
        }
        reg.images.push(img);
    }
    clog(&format!("attached to {} image(s) matching `{selector}`", reg.images.len()));
    Ok(reg)
}
