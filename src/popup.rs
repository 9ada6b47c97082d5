//! Presentation driver: measure, lay out, draw and wait for dismissal

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::config::Config;
use crate::error::PopupError;
use crate::font::FontStyle;
use crate::layout::{Bounds, Layout, Size, resolve_position};
use crate::parse::{Color, Notification};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input reported by the windowing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Click(MouseButton),
    /// Window closed by the system (Alt+F4, session end)
    Closed,
}

/// How the popup went away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dismissal {
    Timeout,
    LeftClick,
    RightClick,
    Closed,
}

impl Dismissal {
    pub fn exit_code(self) -> u8 {
        match self {
            Dismissal::RightClick => 1,
            Dismissal::Timeout | Dismissal::LeftClick | Dismissal::Closed => 0,
        }
    }

    /// Map one input event; `None` = keep waiting
    pub fn from_event(event: InputEvent) -> Option<Self> {
        match event {
            InputEvent::Click(MouseButton::Left) => Some(Dismissal::LeftClick),
            InputEvent::Click(MouseButton::Right) => Some(Dismissal::RightClick),
            InputEvent::Click(MouseButton::Middle) => None,
            InputEvent::Closed => Some(Dismissal::Closed),
        }
    }
}

/// Windowing capabilities the popup needs
pub trait Display {
    /// Usable area of the primary monitor
    fn work_area(&self) -> Bounds;

    /// Extent of (possibly multi-line) `text`
    fn measure_text(&mut self, text: &str, style: FontStyle) -> Size;

    /// Borderless, topmost window at `frame` (screen coordinates)
    fn create_window(&mut self, frame: Bounds, opacity: u8) -> Result<(), PopupError>;

    /// Fill a window-local rectangle
    fn fill_rect(&mut self, rect: Bounds, color: Color);

    /// Draw text left-aligned in `frame`, clipped to `clip`
    fn draw_text(&mut self, text: &str, frame: Bounds, clip: Bounds, style: FontStyle, color: Color);

    /// Show the frame and pace the loop
    fn present(&mut self);

    /// Next pending input, non-blocking
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Measure + lay out the notification
pub fn layout<D: Display>(display: &mut D, config: &Config, notification: &Notification) -> Layout {
    let title = if notification.title.is_empty() {
        Size::default()
    } else {
        display.measure_text(&notification.title, FontStyle::Bold)
    };
    let body = if notification.body.is_empty() {
        Size::default()
    } else {
        display.measure_text(&notification.body, FontStyle::Regular)
    };
    Layout::compute(title, body, config.size, config.border_width)
}

/// Fill border + background, then title (bold) above body (regular)
fn draw<D: Display>(display: &mut D, config: &Config, notification: &Notification, layout: &Layout) {
    display.fill_rect(layout.border_box, config.border_color);
    display.fill_rect(layout.padding_box, config.background);
    if !notification.title.is_empty() {
        display.draw_text(
            &notification.title,
            layout.title_box,
            layout.clip(),
            FontStyle::Bold,
            config.foreground,
        );
    }
    if !notification.body.is_empty() {
        display.draw_text(
            &notification.body,
            layout.body_box,
            layout.clip(),
            FontStyle::Regular,
            config.foreground,
        );
    }
}

fn timed_out(start: Instant, duration: Option<Duration>) -> bool {
    duration.is_some_and(|d| start.elapsed() >= d)
}

/// Poll until a click, close or timeout
pub fn wait<D: Display>(display: &mut D, duration: Option<Duration>) -> Dismissal {
    let start = Instant::now();
    loop {
        display.present();

        while let Some(event) = display.poll_event() {
            trace!(?event, "input");
            if let Some(dismissal) = Dismissal::from_event(event) {
                return dismissal;
            }
        }

        if timed_out(start, duration) {
            return Dismissal::Timeout;
        }
    }
}

/// Show the notification and block until it is dismissed
pub fn show<D: Display>(
    display: &mut D,
    config: &Config,
    notification: &Notification,
) -> Result<Dismissal, PopupError> {
    let layout = layout(display, config, notification);
    let size = layout.border_box.size();
    let work_area = display.work_area();
    let (x, y) = resolve_position(config.position, size, &work_area);
    debug!(?layout, ?work_area, "Layout computed");

    display.create_window(
        Bounds::new(x, y, size.width, size.height),
        config.background.a,
    )?;
    draw(display, config, notification, &layout);
    info!(x, y, width = size.width, height = size.height, "Popup shown");

    let dismissal = wait(display, config.duration);
    info!(?dismissal, "Popup dismissed");
    Ok(dismissal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontSource;
    use crate::layout::{Position, SizeMode};
    use std::collections::VecDeque;

    /// Recorded draw call
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Window(Bounds, u8),
        Fill(Bounds, Color),
        Text(String, Bounds, FontStyle, Color),
    }

    /// Fake backend: fixed glyph metrics, scripted events per frame
    struct FakeDisplay {
        work_area: Bounds,
        frames: VecDeque<Vec<InputEvent>>,
        pending: VecDeque<InputEvent>,
        calls: Vec<Call>,
        presented: usize,
        frame_time: Duration,
    }

    impl FakeDisplay {
        fn new(frames: Vec<Vec<InputEvent>>) -> Self {
            Self {
                work_area: Bounds::new(0, 0, 1920, 1080),
                frames: frames.into(),
                pending: VecDeque::new(),
                calls: Vec::new(),
                presented: 0,
                frame_time: Duration::ZERO,
            }
        }
    }

    impl Display for FakeDisplay {
        fn work_area(&self) -> Bounds {
            self.work_area
        }

        // 10px per char, 20px per line; bold is wider
        fn measure_text(&mut self, text: &str, style: FontStyle) -> Size {
            let advance = match style {
                FontStyle::Regular => 10,
                FontStyle::Bold => 12,
            };
            let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
            Size::new(width * advance, text.lines().count() as i32 * 20)
        }

        fn create_window(&mut self, frame: Bounds, opacity: u8) -> Result<(), PopupError> {
            self.calls.push(Call::Window(frame, opacity));
            Ok(())
        }

        fn fill_rect(&mut self, rect: Bounds, color: Color) {
            self.calls.push(Call::Fill(rect, color));
        }

        fn draw_text(&mut self, text: &str, frame: Bounds, _clip: Bounds, style: FontStyle, color: Color) {
            self.calls.push(Call::Text(text.to_string(), frame, style, color));
        }

        fn present(&mut self) {
            self.presented += 1;
            if let Some(events) = self.frames.pop_front() {
                self.pending.extend(events);
            }
            if !self.frame_time.is_zero() {
                std::thread::sleep(self.frame_time);
            }
        }

        fn poll_event(&mut self) -> Option<InputEvent> {
            self.pending.pop_front()
        }
    }

    fn config(duration: Option<Duration>) -> Config {
        Config {
            size: SizeMode::Auto,
            position: Position { x: 20, y: 20 },
            font: FontSource::Default,
            font_size: 30.0,
            duration,
            background: Color::BLACK,
            foreground: Color::WHITE,
            border_color: Color::rgb(0xff, 0, 0),
            border_width: 4,
            completion: "done".to_string(),
        }
    }

    fn notification(title: &str, body: &str) -> Notification {
        Notification {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    // ========== Dismissal Tests ==========

    #[test]
    fn test_exit_codes() {
        assert_eq!(Dismissal::Timeout.exit_code(), 0);
        assert_eq!(Dismissal::LeftClick.exit_code(), 0);
        assert_eq!(Dismissal::RightClick.exit_code(), 1);
        assert_eq!(Dismissal::Closed.exit_code(), 0);
    }

    #[test]
    fn test_from_event() {
        assert_eq!(
            Dismissal::from_event(InputEvent::Click(MouseButton::Left)),
            Some(Dismissal::LeftClick)
        );
        assert_eq!(
            Dismissal::from_event(InputEvent::Click(MouseButton::Right)),
            Some(Dismissal::RightClick)
        );
        assert_eq!(Dismissal::from_event(InputEvent::Click(MouseButton::Middle)), None);
        assert_eq!(
            Dismissal::from_event(InputEvent::Closed),
            Some(Dismissal::Closed)
        );
    }

    // ========== Poll Loop Tests ==========

    #[test]
    fn test_left_click_dismisses() {
        let mut display = FakeDisplay::new(vec![vec![], vec![], vec![InputEvent::Click(MouseButton::Left)]]);
        assert_eq!(wait(&mut display, None), Dismissal::LeftClick);
        assert_eq!(display.presented, 3);
    }

    #[test]
    fn test_right_click_dismisses() {
        let mut display = FakeDisplay::new(vec![vec![InputEvent::Click(MouseButton::Right)]]);
        assert_eq!(wait(&mut display, None), Dismissal::RightClick);
    }

    #[test]
    fn test_middle_click_ignored() {
        let mut display = FakeDisplay::new(vec![vec![
            InputEvent::Click(MouseButton::Middle),
            InputEvent::Click(MouseButton::Right),
        ]]);
        assert_eq!(wait(&mut display, None), Dismissal::RightClick);
    }

    #[test]
    fn test_closed() {
        let mut display = FakeDisplay::new(vec![vec![InputEvent::Closed]]);
        assert_eq!(wait(&mut display, None), Dismissal::Closed);
    }

    #[test]
    fn test_timeout() {
        let mut display = FakeDisplay::new(vec![]);
        display.frame_time = Duration::from_millis(2);
        let start = Instant::now();
        assert_eq!(
            wait(&mut display, Some(Duration::from_millis(10))),
            Dismissal::Timeout
        );
        assert!(start.elapsed() >= Duration::from_millis(10));
        assert!(display.presented >= 2);
    }

    #[test]
    fn test_click_before_timeout() {
        let mut display = FakeDisplay::new(vec![vec![InputEvent::Click(MouseButton::Left)]]);
        assert_eq!(
            wait(&mut display, Some(Duration::from_secs(60))),
            Dismissal::LeftClick
        );
    }

    // ========== Show Tests ==========

    #[test]
    fn test_show_draw_order() {
        let mut display = FakeDisplay::new(vec![vec![InputEvent::Click(MouseButton::Left)]]);
        let cfg = config(None);
        let dismissal = show(&mut display, &cfg, &notification("Hi", "Body text")).unwrap();
        assert_eq!(dismissal, Dismissal::LeftClick);

        // title 24x20, body 90x20 → text 90x40, window 90+28 x 40+28
        let layout = Layout::compute(Size::new(24, 20), Size::new(90, 20), SizeMode::Auto, 4);
        assert_eq!(
            display.calls,
            vec![
                Call::Window(Bounds::new(20, 20, 118, 68), 0xff),
                Call::Fill(layout.border_box, Color::rgb(0xff, 0, 0)),
                Call::Fill(layout.padding_box, Color::BLACK),
                Call::Text("Hi".into(), layout.title_box, FontStyle::Bold, Color::WHITE),
                Call::Text("Body text".into(), layout.body_box, FontStyle::Regular, Color::WHITE),
            ]
        );
    }

    #[test]
    fn test_show_without_title() {
        let mut display = FakeDisplay::new(vec![vec![InputEvent::Click(MouseButton::Right)]]);
        let dismissal = show(&mut display, &config(None), &notification("", "Body")).unwrap();
        assert_eq!(dismissal.exit_code(), 1);
        assert!(!display
            .calls
            .iter()
            .any(|c| matches!(c, Call::Text(_, _, FontStyle::Bold, _))));
    }

    #[test]
    fn test_show_negative_position() {
        let mut display = FakeDisplay::new(vec![vec![InputEvent::Closed]]);
        let mut cfg = config(None);
        cfg.position = Position { x: -20, y: -20 };
        cfg.size = SizeMode::Fixed {
            width: 300,
            height: 100,
        };
        show(&mut display, &cfg, &notification("T", "B")).unwrap();
        assert_eq!(
            display.calls[0],
            Call::Window(Bounds::new(1920 - 20 - 300, 1080 - 20 - 100, 300, 100), 0xff)
        );
    }

    #[test]
    fn test_show_translucent_background() {
        let mut display = FakeDisplay::new(vec![vec![InputEvent::Closed]]);
        let mut cfg = config(None);
        cfg.background = Color {
            a: 0x80,
            ..Color::BLACK
        };
        show(&mut display, &cfg, &notification("", "B")).unwrap();
        assert!(matches!(display.calls[0], Call::Window(_, 0x80)));
    }

    #[test]
    fn test_layout_multiline_body() {
        let mut display = FakeDisplay::new(vec![]);
        let layout = layout(&mut display, &config(None), &notification("", "one\nthree"));
        assert_eq!(layout.body_box.size(), Size::new(50, 40));
        assert_eq!(layout.title_box.height, 0);
    }
}
