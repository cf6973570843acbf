use std::rc::Rc;

mod components;
mod config;
mod error;
mod model;
mod scan;
mod state;
mod util;

use components::{App, AppProps};
use config::ZoomConfig;
use error::ZoomError;
use util::{cwarn, set_debug};

const ROOT_ID: &str = "tiny-zoom-root";

fn run() -> Result<(), ZoomError> {
    let window = web_sys::window().ok_or(ZoomError::NoWindow)?;
    let document = window.document().ok_or(ZoomError::NoDocument)?;
    let config = ZoomConfig::from_document(&document).unwrap_or_else(|e| {
        cwarn(&format!("{e}; using defaults"));
        ZoomConfig::default()
    });
    set_debug(config.debug);

    let body = document.body().ok_or(ZoomError::NoBody)?;
    let host = document.create_element("div")?;
    host.set_id(ROOT_ID);
    body.append_child(&host)?;

    yew::Renderer::<App>::with_root_and_props(
        host,
        AppProps {
            config: Rc::new(config),
        },
    )
    .render();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        cwarn(&format!("not started: {e}"));
    }
}
