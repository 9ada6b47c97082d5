//! Input mini-languages: geometry, colors, durations and notification text

mod color;
mod cursor;
mod dimension;
mod duration;
mod notification;

pub use color::{Color, parse_color};
pub use dimension::parse_dimension;
pub use duration::parse_duration;
pub use notification::{Notification, parse_notification};
