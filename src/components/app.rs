use std::rc::Rc;

use web_sys::HtmlImageElement;
use yew::prelude::*;

use super::zoom_overlay::ZoomOverlay;
use crate::config::ZoomConfig;
use crate::error::ZoomError;
use crate::model::{ZoomAction, ZoomState};
use crate::scan::{self, Registration};
use crate::state::Environment;
use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: Rc<ZoomConfig>,
}

// Scan the page; each activation samples the environment right then.
fn attach(
    selector: &str,
    dispatcher: UseReducerDispatcher<ZoomState>,
) -> Result<Registration, ZoomError> {
    let window = web_sys::window().ok_or(ZoomError::NoWindow)?;
    let document = window.document().ok_or(ZoomError::NoDocument)?;
    let on_activate: scan::OnActivate = Rc::new(move |image, natural| {
        dispatcher.dispatch(ZoomAction::Activate {
            image,
            natural,
            env: Environment::read(&window),
        });
    });
    scan::initialize(&document, selector, on_activate)
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let state = use_reducer({
        let config = props.config.clone();
        move || ZoomState::new(config)
    });
    let images = use_state(|| Rc::new(Vec::<HtmlImageElement>::new()));

    {
        let dispatcher = state.dispatcher();
        let images = images.clone();
        let selector = props.config.selector.clone();
        use_effect_with((), move |_| {
            let registration = match attach(&selector, dispatcher) {
                Ok(reg) => {
                    images.set(Rc::new(reg.images().to_vec()));
                    Some(reg)
                }
                Err(e) => {
                    cwarn(&format!("could not attach to `{selector}`: {e}"));
                    None
                }
            };
            move || drop(registration)
        });
    }

    let Some(session) = state.session.clone() else {
        return html! {};
    };
    let Some(image) = images.get(session.image.0).cloned() else {
        return html! {};
    };
    html! {
        <ZoomOverlay
            {session}
            {image}
            backdrop={AttrValue::from(state.config.backdrop.clone())}
            dispatcher={state.dispatcher()}
        />
    }
}
