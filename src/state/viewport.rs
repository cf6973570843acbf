// Viewport geometry: sizes, device scale, fit-to-viewport math.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Display properties sampled once when an image is activated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub viewport: Size,
    pub pixel_ratio: f64,
}

impl Environment {
    pub fn new(viewport: Size, pixel_ratio: f64) -> Self {
        Self {
            viewport,
            pixel_ratio: device_scale(pixel_ratio),
        }
    }

    /// Reads viewport size and pixel ratio from the live window.
    pub fn read(window: &web_sys::Window) -> Self {
        let (doc_w, doc_h) = window
            .document()
            .and_then(|d| d.document_element())
            .map(|el| (el.client_width() as f64, el.client_height() as f64))
            .unwrap_or((0.0, 0.0));
        let win_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let win_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Self::new(
            viewport_extent((doc_w, doc_h), (win_w, win_h)),
            window.device_pixel_ratio(),
        )
    }
}

/// Pixel ratio to render with; anything unusable becomes 1.
pub fn device_scale(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 { raw } else { 1.0 }
}

/// Browsers disagree on which of these is right, so take the larger.
pub fn viewport_extent(document: (f64, f64), window: (f64, f64)) -> Size {
    Size::new(
        document.0.max(window.0).max(0.0),
        document.1.max(window.1).max(0.0),
    )
}

/// Shrink ratio for one axis. 1 when the image fits with `margin` to spare.
pub fn overscale_axis(image: f64, viewport: f64, margin: f64, ratio: f64) -> f64 {
    if viewport <= 0.0 || image <= 0.0 {
        return 1.0;
    }
    if image * margin > viewport {
        ratio * (viewport / image)
    } else {
        1.0
    }
}

/// Initial scale that fits `image` inside `viewport`, never above 1.
pub fn fit_scale(image: Size, viewport: Size, margin: f64, ratio: f64) -> f64 {
    let w = overscale_axis(image.width, viewport.width, margin, ratio);
    let h = overscale_axis(image.height, viewport.height, margin, ratio);
    1.0_f64.min(w).min(h)
}

/// Top-left corner that centers `size` (unscaled) in `viewport`.
pub fn centered(size: Size, viewport: Size) -> Point {
    Point::new(
        viewport.width / 2.0 - size.width / 2.0,
        viewport.height / 2.0 - size.height / 2.0,
    )
}

/// Canvas backing-store size in device pixels, capped to a share of the viewport.
pub fn surface_size(image: Size, viewport: Size, pixel_ratio: f64, cap: f64) -> Size {
    let cap_axis = |natural: f64, view: f64| {
        let wanted = natural * pixel_ratio;
        let limit = view * cap * pixel_ratio;
        let px = if limit > 0.0 { wanted.min(limit) } else { wanted };
        px.round().max(0.0)
    };
    Size::new(
        cap_axis(image.width, viewport.width),
        cap_axis(image.height, viewport.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn small_image_is_not_shrunk() {
        let s = fit_scale(Size::new(400.0, 300.0), Size::new(1000.0, 800.0), 1.1, 0.9);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn large_image_takes_tighter_axis() {
        let img = Size::new(2000.0, 1500.0);
        let view = Size::new(1000.0, 800.0);
        assert!(close(overscale_axis(img.width, view.width, 1.1, 0.9), 0.45));
        assert!(close(overscale_axis(img.height, view.height, 1.1, 0.9), 0.48));
        assert!(close(fit_scale(img, view, 1.1, 0.9), 0.45));
    }

    #[test]
    fn margin_triggers_shrink_just_below_viewport() {
        // 950 * 1.1 = 1045 > 1000
        let s = overscale_axis(950.0, 1000.0, 1.1, 0.9);
        assert!(close(s, 0.9 * 1000.0 / 950.0));
        // 900 * 1.1 = 990 fits
        assert_eq!(overscale_axis(900.0, 1000.0, 1.1, 0.9), 1.0);
    }

    #[test]
    fn only_one_axis_overflowing() {
        let s = fit_scale(Size::new(300.0, 1600.0), Size::new(1000.0, 800.0), 1.1, 0.9);
        assert!(close(s, 0.45));
    }

    #[test]
    fn zero_viewport_does_not_shrink() {
        assert_eq!(overscale_axis(500.0, 0.0, 1.1, 0.9), 1.0);
    }

    #[test]
    fn device_scale_falls_back_to_one() {
        assert_eq!(device_scale(2.0), 2.0);
        assert_eq!(device_scale(0.0), 1.0);
        assert_eq!(device_scale(-1.5), 1.0);
        assert_eq!(device_scale(f64::NAN), 1.0);
        assert_eq!(Environment::new(Size::new(10.0, 10.0), f64::INFINITY).pixel_ratio, 1.0);
    }

    #[test]
    fn viewport_uses_larger_reading() {
        let v = viewport_extent((1000.0, 0.0), (985.0, 760.0));
        assert_eq!(v, Size::new(1000.0, 760.0));
    }

    #[test]
    fn centering_uses_natural_size() {
        let p = centered(Size::new(2000.0, 1500.0), Size::new(1000.0, 800.0));
        assert_eq!(p, Point::new(-500.0, -350.0));
        let p = centered(Size::new(400.0, 300.0), Size::new(1000.0, 800.0));
        assert_eq!(p, Point::new(300.0, 250.0));
    }

    #[test]
    fn surface_is_capped_in_device_pixels() {
        let view = Size::new(1000.0, 800.0);
        let s = surface_size(Size::new(400.0, 300.0), view, 2.0, 0.85);
        assert_eq!(s, Size::new(800.0, 600.0));
        let s = surface_size(Size::new(2000.0, 1500.0), view, 2.0, 0.85);
        assert_eq!(s, Size::new(1700.0, 1360.0));
        assert!(s.width <= view.width * 0.85 * 2.0);
        assert!(s.height <= view.height * 0.85 * 2.0);
    }
}
