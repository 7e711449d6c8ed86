//! Zoom navigation state machine.
//!
//! The navigator owns the viewport bounds, the iteration cap, and the zoom
//! depth. Input handling is not its concern: callers turn whatever events
//! they receive into [`Command`] values and feed them to
//! [`Navigator::apply`], which mutates the state and reports what the driver
//! has to do next as a [`Transition`].

use tracing::{debug, info};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::viewport::Viewport;

/// Default iteration cap for a fresh session.
pub const DEFAULT_ITERATION_CAP: u32 = 753;

/// Symbol recorded in the history for a zoom-out.
pub const ZOOM_OUT_SYMBOL: char = 'O';

// ---------------------------------------------------------------------------
// Quadrants
// ---------------------------------------------------------------------------

/// One cell of the 3×3 grid a zoom-in can target.
///
/// Each cell spans half the current width and height; "top" is the `ymax`
/// side of the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopCenter,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Clone, Copy)]
enum Span {
    Low,
    Middle,
    High,
}

impl Span {
    /// Half-size sub-interval of `[lo, hi]`.
    fn narrow(self, lo: f64, hi: f64) -> (f64, f64) {
        let mid = (lo + hi) / 2.0;
        match self {
            Span::Low => (lo, mid),
            Span::Middle => ((lo + mid) / 2.0, (mid + hi) / 2.0),
            Span::High => (mid, hi),
        }
    }

    /// Pixel offset of the overlay square along this axis.
    fn offset(self, dim: u32) -> u32 {
        match self {
            Span::Low => 0,
            Span::Middle => (dim + 1) / 4,
            Span::High => dim.saturating_sub(1) / 2,
        }
    }
}

impl Quadrant {
    pub const ALL: [Quadrant; 9] = [
        Quadrant::TopLeft,
        Quadrant::TopCenter,
        Quadrant::TopRight,
        Quadrant::MidLeft,
        Quadrant::Center,
        Quadrant::MidRight,
        Quadrant::BottomLeft,
        Quadrant::BottomCenter,
        Quadrant::BottomRight,
    ];

    /// History symbol for this quadrant.
    pub fn symbol(self) -> char {
        match self {
            Quadrant::TopLeft => 'W',
            Quadrant::TopCenter => 'X',
            Quadrant::TopRight => 'C',
            Quadrant::MidLeft => 'Q',
            Quadrant::Center => 'S',
            Quadrant::MidRight => 'D',
            Quadrant::BottomLeft => 'A',
            Quadrant::BottomCenter => 'Z',
            Quadrant::BottomRight => 'E',
        }
    }

    /// Inverse of [`symbol`](Self::symbol), case-insensitive.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let symbol = symbol.to_ascii_uppercase();
        Self::ALL.into_iter().find(|q| q.symbol() == symbol)
    }

    fn spans(self) -> (Span, Span) {
        match self {
            Quadrant::TopLeft => (Span::Low, Span::High),
            Quadrant::TopCenter => (Span::Middle, Span::High),
            Quadrant::TopRight => (Span::High, Span::High),
            Quadrant::MidLeft => (Span::Low, Span::Middle),
            Quadrant::Center => (Span::Middle, Span::Middle),
            Quadrant::MidRight => (Span::High, Span::Middle),
            Quadrant::BottomLeft => (Span::Low, Span::Low),
            Quadrant::BottomCenter => (Span::Middle, Span::Low),
            Quadrant::BottomRight => (Span::High, Span::Low),
        }
    }

    /// The sub-region of `viewport` this quadrant selects.
    pub fn narrow(self, viewport: &Viewport) -> Viewport {
        let (sx, sy) = self.spans();
        let (xmin, xmax) = sx.narrow(viewport.xmin, viewport.xmax);
        let (ymin, ymax) = sy.narrow(viewport.ymin, viewport.ymax);
        Viewport {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// The square outlining this quadrant in a `dim × dim` frame.
    pub fn overlay(self, dim: u32) -> Overlay {
        let (sx, sy) = self.spans();
        Overlay {
            x: sx.offset(dim),
            y: sy.offset(dim),
            side: (dim + 1) / 2,
        }
    }
}

/// Pixel-space square marking the region about to be zoomed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    /// Pixel x of the top-left corner.
    pub x: u32,
    /// Pixel y of the top-left corner.
    pub y: u32,
    /// Side length in pixels.
    pub side: u32,
}

// ---------------------------------------------------------------------------
// Commands and transitions
// ---------------------------------------------------------------------------

/// A navigation command, independent of how it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Zoom(Quadrant),
    ZoomOut,
    SetIterationCap(u32),
    IncrementCap,
    DecrementCap,
    SaveFrame,
    Quit,
}

impl Command {
    /// The symbol this command leaves in the history, for spatial commands.
    pub fn history_symbol(&self) -> Option<char> {
        match self {
            Command::Zoom(q) => Some(q.symbol()),
            Command::ZoomOut => Some(ZOOM_OUT_SYMBOL),
            _ => None,
        }
    }

    /// Parse one history symbol back into its spatial command.
    pub fn from_history_symbol(symbol: char) -> Option<Self> {
        if symbol.eq_ignore_ascii_case(&ZOOM_OUT_SYMBOL) {
            return Some(Command::ZoomOut);
        }
        Quadrant::from_symbol(symbol).map(Command::Zoom)
    }
}

/// What the driver must do after a command was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Bounds or cap changed: recompute the whole frame. `focus` is the
    /// quadrant a zoom-in picked, so the driver can outline it first.
    Recompute { focus: Option<Quadrant> },
    /// Persist the current frame; nothing changed.
    Save,
    /// Terminal state.
    Quit,
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// The zoom state: bounds, iteration cap, zoom depth, and command history.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    viewport: Viewport,
    iteration_cap: u32,
    zoom_depth: i32,
    history: String,
}

impl Navigator {
    pub fn new(viewport: Viewport, iteration_cap: u32) -> Self {
        Self {
            viewport,
            iteration_cap,
            zoom_depth: 0,
            history: String::new(),
        }
    }

    /// Rebuild a navigator by re-applying a recorded history string.
    ///
    /// Only spatial symbols are accepted; replay is silent (no per-step
    /// diagnostics) and ends at the same bounds and depth as the session
    /// that produced `sequence`.
    pub fn replay(start: Viewport, iteration_cap: u32, sequence: &str) -> crate::Result<Self> {
        let mut nav = Self::new(start, iteration_cap);
        for symbol in sequence.chars().filter(|c| !c.is_whitespace()) {
            let command =
                Command::from_history_symbol(symbol).ok_or(CoreError::UnknownCommand(symbol))?;
            nav.step(command);
        }
        debug!(
            sequence,
            zoom_depth = nav.zoom_depth,
            "Replayed command history"
        );
        Ok(nav)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn iteration_cap(&self) -> u32 {
        self.iteration_cap
    }

    pub fn zoom_depth(&self) -> i32 {
        self.zoom_depth
    }

    /// Applied spatial commands, oldest first.
    pub fn history(&self) -> &str {
        &self.history
    }

    /// Apply one command and report what the driver must do next.
    pub fn apply(&mut self, command: Command) -> Transition {
        let zoom_center = self.viewport.center();
        let transition = self.step(command);
        if command.history_symbol().is_some() {
            info!(
                "Zoom = {}\t{:.17e} , {:.17e}",
                self.zoom_depth, zoom_center.re, zoom_center.im
            );
        }
        transition
    }

    fn step(&mut self, command: Command) -> Transition {
        match command {
            Command::Zoom(quadrant) => {
                self.viewport = quadrant.narrow(&self.viewport);
                self.zoom_depth += 1;
                self.history.push(quadrant.symbol());
                Transition::Recompute {
                    focus: Some(quadrant),
                }
            }
            Command::ZoomOut => {
                self.viewport = self.viewport.zoomed_out();
                self.zoom_depth -= 1;
                self.history.push(ZOOM_OUT_SYMBOL);
                Transition::Recompute { focus: None }
            }
            Command::SetIterationCap(cap) => {
                self.iteration_cap = cap;
                debug!(iteration_cap = cap, "Iteration cap set");
                Transition::Recompute { focus: None }
            }
            Command::IncrementCap => {
                self.iteration_cap = self.iteration_cap.saturating_add(1);
                debug!(iteration_cap = self.iteration_cap, "Iteration cap raised");
                Transition::Recompute { focus: None }
            }
            Command::DecrementCap => {
                if self.iteration_cap > 1 {
                    self.iteration_cap -= 1;
                }
                debug!(iteration_cap = self.iteration_cap, "Iteration cap lowered");
                Transition::Recompute { focus: None }
            }
            Command::SaveFrame => Transition::Save,
            Command::Quit => Transition::Quit,
        }
    }

    /// Plane coordinates of the current view centre.
    pub fn center(&self) -> Complex {
        self.viewport.center()
    }
}

/// Permissive parse of a typed iteration cap.
///
/// Leading whitespace and a `+` sign are accepted, parsing stops at the first
/// non-digit, and anything unparsable (no digits, a minus sign, overflow)
/// yields 0.
pub fn parse_iteration_cap(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> Navigator {
        Navigator::new(Viewport::MANDELBROT, DEFAULT_ITERATION_CAP)
    }

    #[test]
    fn center_zoom_scenario() {
        let mut n = nav();
        let t = n.apply(Command::Zoom(Quadrant::Center));
        assert_eq!(
            t,
            Transition::Recompute {
                focus: Some(Quadrant::Center)
            }
        );
        assert_eq!(
            *n.viewport(),
            Viewport::new(-1.0, 0.0, -0.5, 0.5).unwrap()
        );
        assert_eq!(n.zoom_depth(), 1);
        assert_eq!(n.iteration_cap(), 753);
        assert_eq!(n.history(), "S");
    }

    #[test]
    fn corner_quadrants_keep_their_corner() {
        let vp = Viewport::MANDELBROT;
        let tl = Quadrant::TopLeft.narrow(&vp);
        assert_eq!((tl.xmin, tl.xmax, tl.ymin, tl.ymax), (-1.5, -0.5, 0.0, 1.0));
        let br = Quadrant::BottomRight.narrow(&vp);
        assert_eq!((br.xmin, br.xmax, br.ymin, br.ymax), (-0.5, 0.5, -1.0, 0.0));
        let mr = Quadrant::MidRight.narrow(&vp);
        assert_eq!((mr.xmin, mr.xmax, mr.ymin, mr.ymax), (-0.5, 0.5, -0.5, 0.5));
        let bc = Quadrant::BottomCenter.narrow(&vp);
        assert_eq!((bc.xmin, bc.xmax, bc.ymin, bc.ymax), (-1.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn every_quadrant_halves_the_extent() {
        for q in Quadrant::ALL {
            let z = q.narrow(&Viewport::JULIA);
            assert_eq!(z.width(), 2.0, "{q:?}");
            assert_eq!(z.height(), 2.0, "{q:?}");
            assert!(z.xmin >= -2.0 && z.xmax <= 2.0 && z.ymin >= -2.0 && z.ymax <= 2.0);
        }
    }

    #[test]
    fn center_zoom_then_zoom_out_restores_bounds() {
        let mut n = nav();
        let before = *n.viewport();
        n.apply(Command::Zoom(Quadrant::Center));
        n.apply(Command::ZoomOut);
        assert_eq!(*n.viewport(), before);
        assert_eq!(n.zoom_depth(), 0);
        assert_eq!(n.history(), "SO");
    }

    #[test]
    fn zoom_out_restores_extent_after_any_quadrant() {
        for q in Quadrant::ALL {
            let mut n = nav();
            n.apply(Command::Zoom(q));
            n.apply(Command::ZoomOut);
            assert_eq!(n.viewport().width(), 2.0, "{q:?}");
            assert_eq!(n.viewport().height(), 2.0, "{q:?}");
            // The zoom-out is centred on the picked quadrant.
            assert_eq!(n.center(), q.narrow(&Viewport::MANDELBROT).center());
        }
    }

    #[test]
    fn zoom_depth_counts_in_minus_out() {
        let mut n = nav();
        let commands = [
            Command::ZoomOut,
            Command::Zoom(Quadrant::TopLeft),
            Command::IncrementCap,
            Command::Zoom(Quadrant::BottomRight),
            Command::ZoomOut,
            Command::Zoom(Quadrant::MidLeft),
            Command::SaveFrame,
            Command::ZoomOut,
            Command::ZoomOut,
            Command::Zoom(Quadrant::Center),
        ];
        for c in commands {
            n.apply(c);
        }
        // 4 zoom-ins, 4 zoom-outs.
        assert_eq!(n.zoom_depth(), 0);
        assert_eq!(n.history(), "OWEOQOOS");
    }

    #[test]
    fn decrement_floors_at_one() {
        let mut n = Navigator::new(Viewport::MANDELBROT, 3);
        for _ in 0..10 {
            assert_eq!(
                n.apply(Command::DecrementCap),
                Transition::Recompute { focus: None }
            );
        }
        assert_eq!(n.iteration_cap(), 1);
        n.apply(Command::IncrementCap);
        assert_eq!(n.iteration_cap(), 2);
    }

    #[test]
    fn zero_cap_is_accepted_and_never_decremented() {
        let mut n = nav();
        n.apply(Command::SetIterationCap(parse_iteration_cap("abc")));
        assert_eq!(n.iteration_cap(), 0);
        n.apply(Command::DecrementCap);
        assert_eq!(n.iteration_cap(), 0);
        n.apply(Command::IncrementCap);
        assert_eq!(n.iteration_cap(), 1);
    }

    #[test]
    fn cap_changes_leave_bounds_and_history_alone() {
        let mut n = nav();
        n.apply(Command::SetIterationCap(2000));
        n.apply(Command::IncrementCap);
        assert_eq!(n.iteration_cap(), 2001);
        assert_eq!(*n.viewport(), Viewport::MANDELBROT);
        assert_eq!(n.zoom_depth(), 0);
        assert!(n.history().is_empty());
    }

    #[test]
    fn save_and_quit_change_nothing() {
        let mut n = nav();
        let before = n.clone();
        assert_eq!(n.apply(Command::SaveFrame), Transition::Save);
        assert_eq!(n.apply(Command::Quit), Transition::Quit);
        assert_eq!(n, before);
    }

    #[test]
    fn overlay_positions_for_reference_frame() {
        // 801 px: side 401, rect2 = 400, rect4 = 200.
        let expected = [
            (Quadrant::TopLeft, 0, 400),
            (Quadrant::TopCenter, 200, 400),
            (Quadrant::TopRight, 400, 400),
            (Quadrant::MidLeft, 0, 200),
            (Quadrant::Center, 200, 200),
            (Quadrant::MidRight, 400, 200),
            (Quadrant::BottomLeft, 0, 0),
            (Quadrant::BottomCenter, 200, 0),
            (Quadrant::BottomRight, 400, 0),
        ];
        for (q, x, y) in expected {
            assert_eq!(q.overlay(801), Overlay { x, y, side: 401 }, "{q:?}");
        }
    }

    #[test]
    fn overlay_stays_inside_frame() {
        for dim in [2, 3, 4, 10, 64, 800, 801] {
            for q in Quadrant::ALL {
                let o = q.overlay(dim);
                assert!(o.x + o.side <= dim, "{q:?} at {dim}");
                assert!(o.y + o.side <= dim, "{q:?} at {dim}");
            }
        }
    }

    #[test]
    fn symbols_round_trip() {
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::from_symbol(q.symbol()), Some(q));
            assert_eq!(
                Quadrant::from_symbol(q.symbol().to_ascii_lowercase()),
                Some(q)
            );
        }
        assert_eq!(Command::from_history_symbol('o'), Some(Command::ZoomOut));
        assert_eq!(Command::from_history_symbol('M'), None);
    }

    #[test]
    fn replay_matches_interactive_session() {
        let mut live = nav();
        for c in "WXSOEDQ".chars() {
            live.apply(Command::from_history_symbol(c).unwrap());
        }
        let replayed = Navigator::replay(Viewport::MANDELBROT, 753, live.history()).unwrap();
        assert_eq!(replayed, live);
    }

    #[test]
    fn replay_rejects_unknown_symbols() {
        let err = Navigator::replay(Viewport::MANDELBROT, 753, "WS?").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCommand('?')));
    }

    #[test]
    fn parse_iteration_cap_is_permissive() {
        assert_eq!(parse_iteration_cap("1500\n"), 1500);
        assert_eq!(parse_iteration_cap("  42abc"), 42);
        assert_eq!(parse_iteration_cap("+7"), 7);
        assert_eq!(parse_iteration_cap(""), 0);
        assert_eq!(parse_iteration_cap("lots"), 0);
        assert_eq!(parse_iteration_cap("-5"), 0);
        assert_eq!(parse_iteration_cap("99999999999"), 0);
    }
}
