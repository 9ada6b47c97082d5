//! Layout: text box → padding box → border box, and screen placement

/// Space between text and border in auto-size mode
pub const PADDING: i32 = 10;

/// Text box never gets shorter than this
pub const MIN_TEXT_HEIGHT: i32 = 40;

/// Extent of measured text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Requested screen offset. Negative = from the far edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// How the window size is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    /// Fit the measured text plus padding and border
    Auto,
    /// Exact outer size; text is centered and clipped
    Fixed { width: i32, height: i32 },
}

/// Rectangle (position + size), y grows downwards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shrink by `by` on every side (never below zero size)
    pub fn inset(&self, by: i32) -> Self {
        Self {
            x: self.x + by,
            y: self.y + by,
            width: (self.width - 2 * by).max(0),
            height: (self.height - 2 * by).max(0),
        }
    }

    /// Box of `size` sharing this box's center
    pub fn centered(&self, size: Size) -> Self {
        Self {
            x: self.x + (self.width - size.width) / 2,
            y: self.y + (self.height - size.height) / 2,
            width: size.width,
            height: size.height,
        }
    }
}

/// Window-local boxes, outermost first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub border_box: Bounds,
    pub padding_box: Bounds,
    pub text_box: Bounds,
    pub title_box: Bounds,
    pub body_box: Bounds,
}

impl Layout {
    /// Lay out a bold title line above the body.
    ///
    /// The text box spans the wider of both texts and their summed height
    /// (at least [`MIN_TEXT_HEIGHT`]); the text itself sits centered in it.
    pub fn compute(title: Size, body: Size, mode: SizeMode, border_width: i32) -> Self {
        let content = Size::new(
            title.width.max(body.width),
            title.height + body.height,
        );
        let text = Size::new(content.width, content.height.max(MIN_TEXT_HEIGHT));

        let (border_box, padding_box, text_box) = match mode {
            SizeMode::Auto => {
                let inner = border_width + PADDING;
                let border_box = Bounds::new(
                    0,
                    0,
                    text.width + 2 * inner,
                    text.height + 2 * inner,
                );
                let padding_box = border_box.inset(border_width);
                (border_box, padding_box, Bounds::new(inner, inner, text.width, text.height))
            }
            SizeMode::Fixed { width, height } => {
                let border_box = Bounds::new(0, 0, width, height);
                let padding_box = border_box.inset(border_width);
                (border_box, padding_box, padding_box.centered(text))
            }
        };

        let content_box = text_box.centered(content);
        let title_box = Bounds::new(content_box.x, content_box.y, content.width, title.height);
        let body_box = Bounds::new(
            content_box.x,
            content_box.y + title.height,
            content.width,
            body.height,
        );

        Self {
            border_box,
            padding_box,
            text_box,
            title_box,
            body_box,
        }
    }

    /// Drawing outside this box is clipped
    pub fn clip(&self) -> Bounds {
        self.padding_box
    }
}

/// Screen origin for a window of `size` inside `work_area`.
///
/// Non-negative offsets count from the left/top edge, negative offsets place
/// the window's right/bottom edge that far from the work area's far edge.
pub fn resolve_position(position: Position, size: Size, work_area: &Bounds) -> (i32, i32) {
    let x = if position.x < 0 {
        work_area
            .right()
            .saturating_add(position.x)
            .saturating_sub(size.width)
    } else {
        work_area.x.saturating_add(position.x)
    };
    let y = if position.y < 0 {
        work_area
            .bottom()
            .saturating_add(position.y)
            .saturating_sub(size.height)
    } else {
        work_area.y.saturating_add(position.y)
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Bounds Tests ==========

    #[test]
    fn test_bounds_edges() {
        let b = Bounds::new(10, 20, 100, 50);
        assert_eq!(b.right(), 110);
        assert_eq!(b.bottom(), 70);
        assert_eq!(b.size(), Size::new(100, 50));
    }

    #[test]
    fn test_inset() {
        let b = Bounds::new(0, 0, 100, 50).inset(4);
        assert_eq!(b, Bounds::new(4, 4, 92, 42));
    }

    #[test]
    fn test_inset_never_negative() {
        let b = Bounds::new(0, 0, 6, 6).inset(4);
        assert_eq!(b.size(), Size::new(0, 0));
    }

    #[test]
    fn test_centered() {
        let b = Bounds::new(0, 0, 100, 50).centered(Size::new(20, 10));
        assert_eq!(b, Bounds::new(40, 20, 20, 10));
    }

    #[test]
    fn test_centered_larger_overflows() {
        let b = Bounds::new(0, 0, 100, 50).centered(Size::new(140, 50));
        assert_eq!(b, Bounds::new(-20, 0, 140, 50));
    }

    // ========== Auto Layout Tests ==========

    #[test]
    fn test_auto_layout() {
        let layout = Layout::compute(Size::new(80, 30), Size::new(120, 60), SizeMode::Auto, 4);
        // text 120x90, padding 10, border 4
        assert_eq!(layout.text_box, Bounds::new(14, 14, 120, 90));
        assert_eq!(layout.padding_box, Bounds::new(4, 4, 140, 110));
        assert_eq!(layout.border_box, Bounds::new(0, 0, 148, 118));
        assert_eq!(layout.title_box, Bounds::new(14, 14, 120, 30));
        assert_eq!(layout.body_box, Bounds::new(14, 44, 120, 60));
    }

    #[test]
    fn test_auto_layout_min_height() {
        let layout = Layout::compute(Size::default(), Size::new(50, 16), SizeMode::Auto, 4);
        assert_eq!(layout.text_box.height, MIN_TEXT_HEIGHT);
        assert_eq!(layout.border_box.height, MIN_TEXT_HEIGHT + 2 * (PADDING + 4));
        // short text is vertically centered in the stretched box
        assert_eq!(layout.body_box, Bounds::new(14, 14 + 12, 50, 16));
        assert_eq!(layout.title_box.height, 0);
    }

    #[test]
    fn test_auto_layout_no_border() {
        let layout = Layout::compute(Size::new(10, 40), Size::default(), SizeMode::Auto, 0);
        assert_eq!(layout.border_box, layout.padding_box);
        assert_eq!(layout.border_box, Bounds::new(0, 0, 30, 60));
    }

    // ========== Fixed Layout Tests ==========

    #[test]
    fn test_fixed_layout_centers_text() {
        let mode = SizeMode::Fixed {
            width: 300,
            height: 100,
        };
        let layout = Layout::compute(Size::new(60, 20), Size::new(100, 30), mode, 4);
        assert_eq!(layout.border_box, Bounds::new(0, 0, 300, 100));
        assert_eq!(layout.padding_box, Bounds::new(4, 4, 292, 92));
        assert_eq!(layout.text_box, Bounds::new(100, 25, 100, 50));
        assert_eq!(layout.clip(), layout.padding_box);
    }

    #[test]
    fn test_fixed_layout_overflowing_text() {
        let mode = SizeMode::Fixed {
            width: 100,
            height: 60,
        };
        let layout = Layout::compute(Size::default(), Size::new(200, 80), mode, 2);
        assert_eq!(layout.border_box.size(), Size::new(100, 60));
        // text box spills past the padding box on every side, clip keeps it inside
        assert_eq!(layout.text_box, Bounds::new(-50, -10, 200, 80));
        assert_eq!(layout.clip(), Bounds::new(2, 2, 96, 56));
    }

    // ========== Position Tests ==========

    #[test]
    fn test_resolve_position_positive() {
        let area = Bounds::new(0, 0, 1920, 1080);
        let pos = resolve_position(Position { x: 20, y: 20 }, Size::new(200, 100), &area);
        assert_eq!(pos, (20, 20));
    }

    #[test]
    fn test_resolve_position_negative() {
        let area = Bounds::new(0, 0, 1920, 1080);
        let pos = resolve_position(Position { x: -20, y: -20 }, Size::new(200, 100), &area);
        assert_eq!(pos, (1920 - 20 - 200, 1080 - 20 - 100));
    }

    #[test]
    fn test_resolve_position_offset_monitor() {
        // secondary monitor left of primary, taskbar at top
        let area = Bounds::new(-1280, 40, 1280, 984);
        let pos = resolve_position(Position { x: 10, y: -10 }, Size::new(100, 50), &area);
        assert_eq!(pos, (-1270, 40 + 984 - 10 - 50));
    }

    #[test]
    fn test_resolve_position_saturates() {
        let area = Bounds::new(0, 0, 1920, 1080);
        let pos = resolve_position(
            Position {
                x: i32::MIN,
                y: i32::MAX,
            },
            Size::new(i32::MAX, 100),
            &area,
        );
        assert_eq!(pos, (i32::MIN, i32::MAX));
    }
}
