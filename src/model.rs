//! Widget state: Idle (no overlay) or Active (one zoom session).
//! All gestures go through [`ZoomAction`] so the reducer is the only place
//! the session changes.

use std::rc::Rc;
use yew::Reducible;

use crate::config::ZoomConfig;
use crate::state::{Environment, ImageId, Point, Size, ZoomSession};
use crate::util::clog;

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomState {
    pub config: Rc<ZoomConfig>,
    pub session: Option<ZoomSession>,
}

impl ZoomState {
    pub fn new(config: Rc<ZoomConfig>) -> Self {
        Self {
            config,
            session: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ZoomAction {
    Activate {
        image: ImageId,
        natural: Size,
        env: Environment,
    },
    /// Click anywhere in the overlay; only a click on the backdrop itself closes it.
    Click { on_backdrop: bool },
    Wheel { delta_y: f64 },
    Press { at: Point },
    /// `primary_held` is false when the button came up somewhere we never saw.
    Move { at: Point, primary_held: bool },
    Release,
    DoubleClick { shift: bool },
}

impl Reducible for ZoomState {
    type Action = ZoomAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ZoomAction::*;
        let cfg = self.config.clone();
        let next = match (self.session.clone(), action) {
            (None, Activate { image, natural, env }) => {
                let s = ZoomSession::open(image, natural, env, &cfg);
                clog(&format!(
                    "open image {} ({}x{}) at scale {:.3}",
                    image.0, natural.width, natural.height, s.scale
                ));
                s
            }
            (Some(cur), Activate { image, .. }) => {
                clog(&format!(
                    "ignoring image {} while image {} is open",
                    image.0, cur.image.0
                ));
                return self;
            }
            (Some(cur), Click { on_backdrop }) => {
                if cur.panned {
                    cur.settle_click()
                } else if on_backdrop {
                    clog(&format!("close image {}", cur.image.0));
                    return Rc::new(Self {
                        config: cfg,
                        session: None,
                    });
                } else {
                    return self;
                }
            }
            (Some(cur), Wheel { delta_y }) => cur.wheel(delta_y, &cfg),
            (Some(cur), Press { at }) => cur.press(at),
            (Some(cur), Move { at, primary_held }) => {
                if !cur.dragging {
                    return self;
                }
                if !primary_held {
                    // no mouseup reached us, so no click will either
                    cur.release().settle_click()
                } else {
                    cur.drag_to(at)
                }
            }
            (Some(cur), Release) => {
                if !cur.dragging {
                    return self;
                }
                cur.release()
            }
            (Some(cur), DoubleClick { shift }) => cur.double_click(shift, &cfg),
            // Gestures with no open overlay
            (None, _) => return self,
        };
        Rc::new(Self {
            config: cfg,
            session: Some(next),
        })
    }
}
