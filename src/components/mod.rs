pub mod app;
pub mod zoom_overlay;

pub use app::{App, AppProps};
