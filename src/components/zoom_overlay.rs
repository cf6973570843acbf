use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Node,
    WheelEvent,
};
use yew::prelude::*;

use crate::error::ZoomError;
use crate::model::{ZoomAction, ZoomState};
use crate::state::{Point, ZoomSession};
use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomOverlayProps {
    pub session: ZoomSession,
    pub image: HtmlImageElement,
    pub backdrop: AttrValue,
    pub dispatcher: UseReducerDispatcher<ZoomState>,
}

/// Clears the surface and draws the whole image at native resolution; the
/// CSS transform does the visual zoom.
fn redraw(
    canvas: &HtmlCanvasElement,
    image: &HtmlImageElement,
    session: &ZoomSession,
) -> Result<(), ZoomError> {
    let (w, h) = (session.surface.width as u32, session.surface.height as u32);
    if canvas.width() != w {
        canvas.set_width(w);
    }
    if canvas.height() != h {
        canvas.set_height(h);
    }
    let ctx = canvas
        .get_context("2d")?
        .ok_or(ZoomError::NoContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ZoomError::NoContext)?;
    let (rx, ry) = session.render_ratio();
    ctx.set_transform(rx, 0.0, 0.0, ry, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, session.natural.width, session.natural.height);
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        image,
        0.0,
        0.0,
        session.natural.width,
        session.natural.height,
    )?;
    Ok(())
}

#[function_component]
pub fn ZoomOverlay(props: &ZoomOverlayProps) -> Html {
    let backdrop_ref = use_node_ref();
    let canvas_ref = use_node_ref();

    // Redraw whenever the surface or the zoom level changes
    {
        let canvas_ref = canvas_ref.clone();
        let image = props.image.clone();
        let session = props.session.clone();
        use_effect_with((session.scale, session.surface), move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if let Err(e) = redraw(&canvas, &image, &session) {
                    cwarn(&format!("redraw failed: {e}"));
                }
            }
            || ()
        });
    }

    // Attached by hand: wheel listeners must not be passive, and a release
    // anywhere in the window has to end a drag.
    {
        let canvas_ref = canvas_ref.clone();
        let backdrop_ref = backdrop_ref.clone();
        let dispatcher = props.dispatcher.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            let backdrop = backdrop_ref.cast::<web_sys::HtmlElement>();
            let opts = AddEventListenerOptions::new();
            opts.set_passive(false);

            let surface_wheel_cb = {
                let dispatcher = dispatcher.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    dispatcher.dispatch(ZoomAction::Wheel {
                        delta_y: e.delta_y(),
                    });
                }) as Box<dyn FnMut(_)>)
            };
            let mouseup_cb = Closure::wrap(Box::new(move |e: MouseEvent| {
                if e.button() == 0 {
                    dispatcher.dispatch(ZoomAction::Release);
                }
            }) as Box<dyn FnMut(_)>);
            // Keep the page underneath from scrolling while the overlay is up.
            let backdrop_wheel_cb = {
                let backdrop = backdrop.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    let on_backdrop = match (&backdrop, e.target()) {
                        (Some(b), Some(t)) => b.unchecked_ref::<web_sys::EventTarget>() == &t,
                        _ => false,
                    };
                    if on_backdrop {
                        e.prevent_default();
                    }
                }) as Box<dyn FnMut(_)>)
            };

            if let Some(canvas) = &canvas {
                if let Err(e) = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                    "wheel",
                    surface_wheel_cb.as_ref().unchecked_ref(),
                    &opts,
                ) {
                    cwarn(&format!("wheel zoom unavailable: {}", ZoomError::from(e)));
                }
            }
            if let Some(backdrop) = &backdrop {
                if let Err(e) = backdrop.add_event_listener_with_callback_and_add_event_listener_options(
                    "wheel",
                    backdrop_wheel_cb.as_ref().unchecked_ref(),
                    &opts,
                ) {
                    cwarn(&format!("page scroll not blocked: {}", ZoomError::from(e)));
                }
            }
            if let Some(window) = &window {
                if let Err(e) = window
                    .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                {
                    cwarn(&format!("drag release not tracked: {}", ZoomError::from(e)));
                }
            }
            move || {
                if let Some(window) = &window {
                    let _ = window.remove_event_listener_with_callback(
                        "mouseup",
                        mouseup_cb.as_ref().unchecked_ref(),
                    );
                }
                if let Some(canvas) = &canvas {
                    let _ = canvas.remove_event_listener_with_callback(
                        "wheel",
                        surface_wheel_cb.as_ref().unchecked_ref(),
                    );
                }
                if let Some(backdrop) = &backdrop {
                    let _ = backdrop.remove_event_listener_with_callback(
                        "wheel",
                        backdrop_wheel_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let onmousedown = {
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |e: MouseEvent| {
            if e.button() == 0 {
                dispatcher.dispatch(ZoomAction::Press {
                    at: Point::new(e.client_x() as f64, e.client_y() as f64),
                });
            }
        })
    };
    let onmousemove = {
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |e: MouseEvent| {
            dispatcher.dispatch(ZoomAction::Move {
                at: Point::new(e.client_x() as f64, e.client_y() as f64),
                primary_held: e.buttons() & 1 == 1,
            });
        })
    };
    let ondblclick = {
        let dispatcher = props.dispatcher.clone();
        Callback::from(move |e: MouseEvent| {
            dispatcher.dispatch(ZoomAction::DoubleClick {
                shift: e.shift_key(),
            });
        })
    };
    // Clicks on the canvas bubble up here too.
    let onclick = {
        let dispatcher = props.dispatcher.clone();
        let backdrop_ref = backdrop_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            dispatcher.dispatch(ZoomAction::Click {
                on_backdrop: target.is_some() && target == backdrop_ref.get(),
            });
        })
    };

    let s = &props.session;
    let backdrop_style = format!(
        "position:fixed; top:0; left:0; width:100vw; height:100vh; z-index:10000; overflow:hidden; background:{};",
        props.backdrop
    );
    let canvas_style = format!(
        "position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; transform:scale({}); transform-origin:center center; cursor:move;",
        s.position.x, s.position.y, s.natural.width, s.natural.height, s.scale
    );
    html! {
        <div ref={backdrop_ref} class="fullscreen-image" style={backdrop_style} {onclick}>
            <canvas
                ref={canvas_ref}
                style={canvas_style}
                {onmousedown}
                {onmousemove}
                {ondblclick}
            />
        </div>
    }
}
