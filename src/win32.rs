//! GDI backend: borderless topmost popup, private fonts, message polling

use std::ffi::c_void;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, warn};
use windows::Win32::Foundation::{
    COLORREF, HANDLE, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM,
};
use windows::Win32::Graphics::Dwm::DwmFlush;
use windows::Win32::Graphics::Gdi::{
    AddFontMemResourceEx, CLEARTYPE_QUALITY, CreateCompatibleDC, CreateFontIndirectW,
    CreateSolidBrush, DEFAULT_CHARSET, DT_CALCRECT, DT_EXPANDTABS, DT_LEFT, DT_NOCLIP,
    DT_NOPREFIX, DeleteDC, DeleteObject, DrawTextW, FillRect, GetDC, GetMonitorInfoW,
    GetTextFaceW, HDC, HFONT, IntersectClipRect, LOGFONTW, MONITOR_DEFAULTTOPRIMARY,
    MONITORINFO, MonitorFromPoint, ReleaseDC, RemoveFontMemResourceEx, RestoreDC, SaveDC,
    SelectObject, SetBkMode, SetTextColor, TRANSPARENT, ValidateRect,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetSystemMetrics,
    IDC_ARROW, IsWindow, LWA_ALPHA, LoadCursorW, MSG, PM_REMOVE, PeekMessageW, PostQuitMessage,
    RegisterClassW, SM_CXSCREEN, SM_CYSCREEN, SW_SHOWNOACTIVATE, SetLayeredWindowAttributes,
    ShowWindow, TranslateMessage, UnregisterClassW, WM_DESTROY, WM_LBUTTONDOWN, WM_MBUTTONDOWN,
    WM_PAINT, WM_QUIT, WM_RBUTTONDOWN, WNDCLASSW, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_POPUP,
};
use windows::core::{PCWSTR, w};

use crate::error::PopupError;
use crate::font::{FontFace, FontSet, FontStyle};
use crate::layout::{Bounds, Size};
use crate::parse::Color;
use crate::popup::{Display, InputEvent, MouseButton};

const CLASS_NAME: PCWSTR = w!("NotifyPopup");
const WINDOW_TITLE: PCWSTR = w!("notify");

/// Set by the window procedure, cleared after repainting
static NEEDS_PAINT: AtomicBool = AtomicBool::new(false);

/// Win32 RECT → Bounds
pub fn from_rect(rect: &RECT) -> Bounds {
    Bounds::new(
        rect.left,
        rect.top,
        rect.right - rect.left,
        rect.bottom - rect.top,
    )
}

/// Bounds → Win32 RECT
pub fn to_rect(bounds: Bounds) -> RECT {
    RECT {
        left: bounds.x,
        top: bounds.y,
        right: bounds.right(),
        bottom: bounds.bottom(),
    }
}

/// 0x00BBGGRR; GDI ignores alpha
pub fn colorref(color: Color) -> COLORREF {
    COLORREF(color.r as u32 | (color.g as u32) << 8 | (color.b as u32) << 16)
}

fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Recorded drawing, replayed on every repaint
enum DrawCmd {
    Fill {
        rect: RECT,
        color: COLORREF,
    },
    Text {
        text: Vec<u16>,
        frame: RECT,
        clip: RECT,
        style: FontStyle,
        color: COLORREF,
    },
}

/// Window procedure: paint requests are deferred to `present`
unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_PAINT => {
                NEEDS_PAINT.store(true, Ordering::SeqCst);
                let _ = ValidateRect(Some(hwnd), None);
                LRESULT(0)
            }
            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

/// Frame sync: wait for VSync, fall back to ~60 Hz sleep
fn frame_sync() {
    unsafe {
        if DwmFlush().is_err() {
            std::thread::sleep(Duration::from_millis(16));
        }
    }
}

/// GDI-backed [`Display`]
pub struct GdiDisplay {
    instance: HINSTANCE,
    hwnd: Option<HWND>,
    /// Off-screen DC for text measurement
    measure_dc: HDC,
    regular: HFONT,
    bold: HFONT,
    private_fonts: Vec<HANDLE>,
    commands: Vec<DrawCmd>,
}

impl GdiDisplay {
    /// Register the window class and instantiate both faces
    pub fn new(fonts: &FontSet) -> Result<Self, PopupError> {
        let instance: HINSTANCE = unsafe { GetModuleHandleW(None) }
            .map_err(|_| PopupError::RegisterClass)?
            .into();

        let class = WNDCLASSW {
            lpfnWndProc: Some(wnd_proc),
            hInstance: instance,
            lpszClassName: CLASS_NAME,
            hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
            ..Default::default()
        };
        if unsafe { RegisterClassW(&class) } == 0 {
            return Err(PopupError::RegisterClass);
        }

        let mut display = Self {
            instance,
            hwnd: None,
            measure_dc: unsafe { CreateCompatibleDC(None) },
            regular: HFONT::default(),
            bold: HFONT::default(),
            private_fonts: Vec::new(),
            commands: Vec::new(),
        };
        display.regular = display.create_font(fonts.face(FontStyle::Regular), fonts.size)?;
        display.bold = display.create_font(fonts.face(FontStyle::Bold), fonts.size)?;
        Ok(display)
    }

    /// Register private font data (if any), then let GDI match the family
    fn create_font(&mut self, face: &FontFace, size: f64) -> Result<HFONT, PopupError> {
        if let Some(data) = &face.data {
            let mut installed = 0u32;
            let handle = unsafe {
                AddFontMemResourceEx(
                    data.as_ptr() as *const c_void,
                    data.len() as u32,
                    None,
                    &mut installed,
                )
            };
            if handle.is_invalid() || installed == 0 {
                return Err(PopupError::PrivateFont {
                    family: face.family.clone(),
                });
            }
            self.private_fonts.push(handle);
        }

        let mut logfont = LOGFONTW {
            // negative height = character height in pixels
            lfHeight: -(size.round() as i32),
            lfWeight: face.style.weight(),
            lfCharSet: DEFAULT_CHARSET,
            lfQuality: CLEARTYPE_QUALITY,
            ..Default::default()
        };
        let name = to_wide(&face.family);
        let len = name.len().min(logfont.lfFaceName.len() - 1);
        logfont.lfFaceName[..len].copy_from_slice(&name[..len]);

        let font = unsafe { CreateFontIndirectW(&logfont) };
        if font.is_invalid() {
            return Err(PopupError::CreateFont {
                family: face.family.clone(),
            });
        }

        // Font mapper substitutes silently; report it
        let matched = self.face_name(font);
        if !matched.eq_ignore_ascii_case(&face.family) {
            warn!(requested = %face.family, matched = %matched, "Font substituted");
        } else {
            debug!(family = %matched, style = ?face.style, "Font created");
        }
        Ok(font)
    }

    fn face_name(&self, font: HFONT) -> String {
        let mut buf = [0u16; 64];
        let len = unsafe {
            let previous = SelectObject(self.measure_dc, font.into());
            let len = GetTextFaceW(self.measure_dc, Some(&mut buf[..]));
            SelectObject(self.measure_dc, previous);
            len
        };
        // count includes the terminating null
        let len = (len.max(1) as usize - 1).min(buf.len());
        String::from_utf16_lossy(&buf[..len])
    }

    fn font(&self, style: FontStyle) -> HFONT {
        match style {
            FontStyle::Regular => self.regular,
            FontStyle::Bold => self.bold,
        }
    }

    /// Replay recorded drawing onto the window
    fn paint(&self, hwnd: HWND) {
        unsafe {
            let hdc = GetDC(Some(hwnd));
            if hdc.is_invalid() {
                return;
            }
            for cmd in &self.commands {
                match cmd {
                    DrawCmd::Fill { rect, color } => {
                        let brush = CreateSolidBrush(*color);
                        FillRect(hdc, rect, brush);
                        let _ = DeleteObject(brush.into());
                    }
                    DrawCmd::Text {
                        text,
                        frame,
                        clip,
                        style,
                        color,
                    } => {
                        let saved = SaveDC(hdc);
                        IntersectClipRect(hdc, clip.left, clip.top, clip.right, clip.bottom);
                        SelectObject(hdc, self.font(*style).into());
                        SetTextColor(hdc, *color);
                        SetBkMode(hdc, TRANSPARENT);
                        let mut text = text.clone();
                        let mut frame = *frame;
                        DrawTextW(
                            hdc,
                            &mut text,
                            &mut frame,
                            DT_LEFT | DT_NOPREFIX | DT_EXPANDTABS | DT_NOCLIP,
                        );
                        let _ = RestoreDC(hdc, saved);
                    }
                }
            }
            ReleaseDC(Some(hwnd), hdc);
        }
    }
}

impl Display for GdiDisplay {
    fn work_area(&self) -> Bounds {
        let monitor = unsafe { MonitorFromPoint(POINT { x: 0, y: 0 }, MONITOR_DEFAULTTOPRIMARY) };
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        if unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
            from_rect(&info.rcWork)
        } else {
            warn!("GetMonitorInfo failed, using screen metrics");
            let (width, height) =
                unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
            Bounds::new(0, 0, width, height)
        }
    }

    fn measure_text(&mut self, text: &str, style: FontStyle) -> Size {
        let mut wide = to_wide(text);
        let mut rect = RECT::default();
        unsafe {
            let previous = SelectObject(self.measure_dc, self.font(style).into());
            DrawTextW(
                self.measure_dc,
                &mut wide,
                &mut rect,
                DT_CALCRECT | DT_LEFT | DT_NOPREFIX | DT_EXPANDTABS,
            );
            SelectObject(self.measure_dc, previous);
        }
        from_rect(&rect).size()
    }

    fn create_window(&mut self, frame: Bounds, opacity: u8) -> Result<(), PopupError> {
        let mut ex_style = WS_EX_TOPMOST | WS_EX_TOOLWINDOW;
        if opacity != 0xff {
            ex_style |= WS_EX_LAYERED;
        }

        let hwnd = unsafe {
            CreateWindowExW(
                ex_style,
                CLASS_NAME,
                WINDOW_TITLE,
                WS_POPUP,
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                None,
                None,
                Some(self.instance),
                None,
            )
        }
        .map_err(|e| PopupError::CreateWindow(e.to_string()))?;

        if opacity != 0xff
            && let Err(e) = unsafe { SetLayeredWindowAttributes(hwnd, COLORREF(0), opacity, LWA_ALPHA) }
        {
            warn!("SetLayeredWindowAttributes failed: {e}");
        }

        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        }
        self.hwnd = Some(hwnd);
        NEEDS_PAINT.store(true, Ordering::SeqCst);
        debug!(hwnd = ?hwnd, ?frame, opacity, "Window created");
        Ok(())
    }

    fn fill_rect(&mut self, rect: Bounds, color: Color) {
        self.commands.push(DrawCmd::Fill {
            rect: to_rect(rect),
            color: colorref(color),
        });
        NEEDS_PAINT.store(true, Ordering::SeqCst);
    }

    fn draw_text(&mut self, text: &str, frame: Bounds, clip: Bounds, style: FontStyle, color: Color) {
        self.commands.push(DrawCmd::Text {
            text: to_wide(text),
            frame: to_rect(frame),
            clip: to_rect(clip),
            style,
            color: colorref(color),
        });
        NEEDS_PAINT.store(true, Ordering::SeqCst);
    }

    fn present(&mut self) {
        if let Some(hwnd) = self.hwnd
            && NEEDS_PAINT.swap(false, Ordering::SeqCst)
        {
            self.paint(hwnd);
        }
        frame_sync();
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        let mut msg = MSG::default();
        while unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE) }.as_bool() {
            match msg.message {
                WM_QUIT => return Some(InputEvent::Closed),
                WM_LBUTTONDOWN => return Some(InputEvent::Click(MouseButton::Left)),
                WM_RBUTTONDOWN => return Some(InputEvent::Click(MouseButton::Right)),
                WM_MBUTTONDOWN => return Some(InputEvent::Click(MouseButton::Middle)),
                _ => unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                },
            }
        }
        None
    }
}

impl Drop for GdiDisplay {
    fn drop(&mut self) {
        unsafe {
            if let Some(hwnd) = self.hwnd.take()
                && IsWindow(Some(hwnd)).as_bool()
            {
                let _ = DestroyWindow(hwnd);
            }
            for font in [self.regular, self.bold] {
                if !font.is_invalid() {
                    let _ = DeleteObject(font.into());
                }
            }
            for handle in self.private_fonts.drain(..) {
                let _ = RemoveFontMemResourceEx(handle);
            }
            let _ = DeleteDC(self.measure_dc);
            let _ = UnregisterClassW(CLASS_NAME, Some(self.instance));
        }
    }
}
