// Per-activation zoom session. Every gesture is a pure transition that
// returns the next snapshot.

use super::viewport::{Environment, Point, Size, centered, fit_scale, surface_size};
use crate::config::ZoomConfig;

/// Index into the registry of images found by the scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct ZoomSession {
    pub image: ImageId,
    /// Natural image size; also the canvas CSS size.
    pub natural: Size,
    /// Canvas backing store in device pixels.
    pub surface: Size,
    pub scale: f64,
    /// Canvas left/top in viewport pixels.
    pub position: Point,
    pub drag_origin: Point,
    pub dragging: bool,
    /// Set once a drag actually moves the surface; the click that ends the
    /// drag must not count as a backdrop click.
    pub panned: bool,
}

impl ZoomSession {
    pub fn open(image: ImageId, natural: Size, env: Environment, cfg: &ZoomConfig) -> Self {
        let scale = fit_scale(natural, env.viewport, cfg.fit_margin, cfg.fit_ratio);
        Self {
            image,
            natural,
            surface: surface_size(natural, env.viewport, env.pixel_ratio, cfg.surface_cap),
            scale: if scale > 0.0 { scale } else { 1.0 },
            position: centered(natural, env.viewport),
            drag_origin: Point::default(),
            dragging: false,
            panned: false,
        }
    }

    /// Context scale that maps natural image pixels onto the backing store.
    pub fn render_ratio(&self) -> (f64, f64) {
        let axis = |surface: f64, natural: f64| if natural > 0.0 { surface / natural } else { 1.0 };
        (
            axis(self.surface.width, self.natural.width),
            axis(self.surface.height, self.natural.height),
        )
    }

    pub fn zoom(&self, factor: f64) -> Self {
        Self {
            scale: self.scale * factor,
            ..self.clone()
        }
    }

    pub fn wheel(&self, delta_y: f64, cfg: &ZoomConfig) -> Self {
        self.zoom(if delta_y > 0.0 { cfg.wheel_out } else { cfg.wheel_in })
    }

    pub fn double_click(&self, shift: bool, cfg: &ZoomConfig) -> Self {
        self.zoom(if shift { cfg.dblclick_out } else { cfg.dblclick_in })
    }

    pub fn press(&self, at: Point) -> Self {
        Self {
            drag_origin: Point::new(at.x - self.position.x, at.y - self.position.y),
            dragging: true,
            panned: false,
            ..self.clone()
        }
    }

    pub fn drag_to(&self, at: Point) -> Self {
        if !self.dragging {
            return self.clone();
        }
        let position = Point::new(at.x - self.drag_origin.x, at.y - self.drag_origin.y);
        Self {
            panned: self.panned || position != self.position,
            position,
            ..self.clone()
        }
    }

    pub fn release(&self) -> Self {
        Self {
            dragging: false,
            ..self.clone()
        }
    }

    /// Click that follows a pan; swallowed so it does not close the overlay.
    pub fn settle_click(&self) -> Self {
        Self {
            panned: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment {
        Environment::new(Size::new(1000.0, 800.0), 1.0)
    }

    fn small() -> ZoomSession {
        ZoomSession::open(ImageId(0), Size::new(400.0, 300.0), env(), &ZoomConfig::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn open_small_image() {
        let s = small();
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.position, Point::new(300.0, 250.0));
        assert!(!s.dragging);
        assert_eq!(s.surface, Size::new(400.0, 300.0));
    }

    #[test]
    fn open_large_image_shrinks() {
        let s = ZoomSession::open(
            ImageId(3),
            Size::new(2000.0, 1500.0),
            env(),
            &ZoomConfig::default(),
        );
        assert!(close(s.scale, 0.45));
        assert_eq!(s.position, Point::new(-500.0, -350.0));
        assert_eq!(s.image, ImageId(3));
    }

    #[test]
    fn high_density_surface_and_ratio() {
        let env = Environment::new(Size::new(1000.0, 800.0), 2.0);
        let s = ZoomSession::open(ImageId(0), Size::new(400.0, 300.0), env, &ZoomConfig::default());
        assert_eq!(s.surface, Size::new(800.0, 600.0));
        assert_eq!(s.render_ratio(), (2.0, 2.0));
    }

    #[test]
    fn zero_size_image_is_degenerate_not_panicking() {
        let s = ZoomSession::open(ImageId(0), Size::new(0.0, 0.0), env(), &ZoomConfig::default());
        assert_eq!(s.surface, Size::new(0.0, 0.0));
        assert_eq!(s.scale, 1.0);
        assert_eq!(s.render_ratio(), (1.0, 1.0));
    }

    #[test]
    fn wheel_steps_multiply() {
        let cfg = ZoomConfig::default();
        let s = small().wheel(120.0, &cfg);
        assert!(close(s.scale, 0.9));
        let s = s.wheel(-120.0, &cfg).wheel(-1.0, &cfg);
        assert!(close(s.scale, 0.9 * 1.1 * 1.1));
        // zero delta counts as scrolling up
        assert!(close(small().wheel(0.0, &cfg).scale, 1.1));
    }

    #[test]
    fn wheel_is_not_clamped() {
        let cfg = ZoomConfig::default();
        let mut s = small();
        for _ in 0..100 {
            s = s.wheel(1.0, &cfg);
        }
        assert!(s.scale > 0.0);
        assert!(close(s.scale, 0.9_f64.powi(100)));
    }

    #[test]
    fn double_click_doubles_or_halves() {
        let cfg = ZoomConfig::default();
        let s = small().zoom(0.75);
        assert!(close(s.double_click(false, &cfg).scale, 1.5));
        assert!(close(s.double_click(true, &cfg).scale, 0.375));
    }

    #[test]
    fn drag_follows_pointer_until_release() {
        let s = small().press(Point::new(350.0, 260.0));
        assert!(s.dragging);
        assert_eq!(s.drag_origin, Point::new(50.0, 10.0));
        let s = s.drag_to(Point::new(400.0, 300.0));
        assert_eq!(s.position, Point::new(350.0, 290.0));
        let s = s.drag_to(Point::new(10.0, 20.0));
        assert_eq!(s.position, Point::new(-40.0, 10.0));
        let s = s.release();
        assert!(!s.dragging);
        let s = s.drag_to(Point::new(900.0, 900.0));
        assert_eq!(s.position, Point::new(-40.0, 10.0));
    }

    #[test]
    fn pan_is_flagged_until_settled() {
        let s = small().press(Point::new(310.0, 260.0));
        assert!(!s.panned);
        let s = s.drag_to(Point::new(310.0, 260.0));
        assert!(!s.panned);
        let s = s.drag_to(Point::new(320.0, 260.0)).release();
        assert!(s.panned);
        assert!(!s.settle_click().panned);
        assert!(!s.press(Point::new(0.0, 0.0)).panned);
    }

    #[test]
    fn move_without_press_does_nothing() {
        let s = small();
        assert_eq!(s.drag_to(Point::new(5.0, 5.0)), s);
    }

    #[test]
    fn transitions_leave_original_untouched() {
        let s = small();
        let _ = s.zoom(3.0).press(Point::new(1.0, 1.0));
        assert_eq!(s, small());
    }
}
