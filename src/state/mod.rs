pub mod session;
pub mod viewport;

pub use session::{ImageId, ZoomSession};
pub use viewport::{Environment, Point, Size};
