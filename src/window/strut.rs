use crate::window::layout::Rect;

/// A dock's declared edge reservation, parsed from `_NET_WM_STRUT_PARTIAL`
/// (12 cardinals, with per-edge start/end spans) or `_NET_WM_STRUT`
/// (4 cardinals, full-edge semantics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strut {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
    /// (start, end) along the y axis for the left edge, if partial.
    pub left_span: Option<(i32, i32)>,
    pub right_span: Option<(i32, i32)>,
    /// (start, end) along the x axis for the top edge, if partial.
    pub top_span: Option<(i32, i32)>,
    pub bottom_span: Option<(i32, i32)>,
}

// CARD32 values can exceed i32::MAX; saturate so a hostile or buggy
// property never turns into a negative reservation.
fn card(v: u32) -> i32 {
    v.min(i32::MAX as u32) as i32
}

impl Strut {
    pub fn from_cardinals(values: &[u32]) -> Option<Strut> {
        fn span(start: u32, end: u32) -> Option<(i32, i32)> {
            (end > start).then_some((card(start), card(end)))
        }
        match values {
            [left, right, top, bottom] => Some(Strut {
                left: card(*left),
                right: card(*right),
                top: card(*top),
                bottom: card(*bottom),
                ..Strut::default()
            }),
            [left, right, top, bottom, ls, le, rs, re, ts, te, bs, be] => Some(Strut {
                left: card(*left),
                right: card(*right),
                top: card(*top),
                bottom: card(*bottom),
                left_span: span(*ls, *le),
                right_span: span(*rs, *re),
                top_span: span(*ts, *te),
                bottom_span: span(*bs, *be),
            }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

/// Screen space currently reserved by docks, per edge. Derived state:
/// always recomputed from the full dock set, never mutated directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reserved {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Reserved {
    /// Per-edge maximum over all current dock struts.
    pub fn compute<'a, I>(struts: I) -> Reserved
    where
        I: IntoIterator<Item = &'a Strut>,
    {
        let mut r = Reserved::default();
        for s in struts {
            r.left = r.left.max(s.left);
            r.right = r.right.max(s.right);
            r.top = r.top.max(s.top);
            r.bottom = r.bottom.max(s.bottom);
        }
        r
    }
}

/// Derives a dock's own rectangle from its strut. Exactly one edge is
/// expected to be non-zero; precedence when several are is top, then
/// bottom, then left, then right. A partial span clips the perpendicular
/// extent; without one the dock spans the full edge minus the reservations
/// on the two perpendicular edges. Returns None for an all-zero strut.
pub fn dock_geometry(
    strut: &Strut,
    screen_w: i32,
    screen_h: i32,
    reserved: &Reserved,
) -> Option<Rect> {
    let r = if strut.top > 0 {
        let (x0, x1) = strut
            .top_span
            .unwrap_or((reserved.left, screen_w - reserved.right));
        Rect::new(x0, 0, x1 - x0, strut.top)
    } else if strut.bottom > 0 {
        let (x0, x1) = strut
            .bottom_span
            .unwrap_or((reserved.left, screen_w - reserved.right));
        Rect::new(x0, screen_h - strut.bottom, x1 - x0, strut.bottom)
    } else if strut.left > 0 {
        let (y0, y1) = strut
            .left_span
            .unwrap_or((reserved.top, screen_h - reserved.bottom));
        Rect::new(0, y0, strut.left, y1 - y0)
    } else if strut.right > 0 {
        let (y0, y1) = strut
            .right_span
            .unwrap_or((reserved.top, screen_h - reserved.bottom));
        Rect::new(screen_w - strut.right, y0, strut.right, y1 - y0)
    } else {
        return None;
    };
    Some(clamp_to_screen(r, screen_w, screen_h))
}

fn clamp_to_screen(mut r: Rect, screen_w: i32, screen_h: i32) -> Rect {
    r.x = r.x.clamp(0, (screen_w - 1).max(0));
    r.y = r.y.clamp(0, (screen_h - 1).max(0));
    r.w = r.w.clamp(1, screen_w - r.x);
    r.h = r.h.clamp(1, screen_h - r.y);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn top_strut(px: i32) -> Strut {
        Strut {
            top: px,
            ..Strut::default()
        }
    }

    #[test]
    fn parses_basic_and_partial_struts() {
        let basic = Strut::from_cardinals(&[0, 0, 30, 0]).unwrap();
        assert_eq!(basic.top, 30);
        assert_eq!(basic.top_span, None);

        let partial =
            Strut::from_cardinals(&[0, 0, 30, 0, 0, 0, 0, 0, 100, 700, 0, 0]).unwrap();
        assert_eq!(partial.top, 30);
        assert_eq!(partial.top_span, Some((100, 700)));
        assert_eq!(partial.bottom_span, None);

        assert_eq!(Strut::from_cardinals(&[1, 2, 3]), None);
    }

    #[test]
    fn oversized_cardinals_saturate_instead_of_wrapping() {
        let s = Strut::from_cardinals(&[u32::MAX, 0, 0, 0]).unwrap();
        assert_eq!(s.left, i32::MAX);

        let s =
            Strut::from_cardinals(&[0, 0, 30, 0, 0, 0, 0, 0, 0, u32::MAX, 0, 0]).unwrap();
        let (start, end) = s.top_span.unwrap();
        assert!(start >= 0 && end > 0);
        let r = Reserved::compute([s].iter());
        assert!(r.left >= 0 && r.right >= 0 && r.top >= 0 && r.bottom >= 0);
    }

    #[test]
    fn reserved_is_per_edge_maximum() {
        let struts = [
            top_strut(30),
            top_strut(20),
            Strut {
                bottom: 24,
                ..Strut::default()
            },
        ];
        let r = Reserved::compute(struts.iter());
        assert_eq!(
            r,
            Reserved {
                left: 0,
                right: 0,
                top: 30,
                bottom: 24
            }
        );
    }

    #[test]
    fn adding_a_dock_never_decreases_an_edge() {
        let mut struts = vec![top_strut(30)];
        let before = Reserved::compute(struts.iter());
        struts.push(top_strut(10));
        let after = Reserved::compute(struts.iter());
        assert!(after.top >= before.top);
    }

    #[test]
    fn removing_largest_dock_falls_back_to_next() {
        let struts = vec![top_strut(30), top_strut(20)];
        assert_eq!(Reserved::compute(struts.iter()).top, 30);
        assert_eq!(Reserved::compute(struts[1..].iter()).top, 20);
        assert_eq!(Reserved::compute([].iter()).top, 0);
    }

    #[test]
    fn top_dock_geometry_spans_full_width_without_span() {
        let r = dock_geometry(&top_strut(30), 800, 600, &Reserved::default()).unwrap();
        assert_eq!(r, Rect::new(0, 0, 800, 30));
    }

    #[test]
    fn top_dock_geometry_is_clipped_to_partial_span() {
        let strut = Strut {
            top: 30,
            top_span: Some((100, 700)),
            ..Strut::default()
        };
        let r = dock_geometry(&strut, 800, 600, &Reserved::default()).unwrap();
        assert_eq!(r, Rect::new(100, 0, 600, 30));
    }

    #[test]
    fn edge_precedence_top_over_bottom_over_left_over_right() {
        let both = Strut {
            top: 30,
            bottom: 40,
            ..Strut::default()
        };
        let r = dock_geometry(&both, 800, 600, &Reserved::default()).unwrap();
        assert_eq!(r.y, 0);
        assert_eq!(r.h, 30);

        let side = Strut {
            left: 50,
            right: 60,
            ..Strut::default()
        };
        let r = dock_geometry(&side, 800, 600, &Reserved::default()).unwrap();
        assert_eq!(r.x, 0);
        assert_eq!(r.w, 50);
    }

    #[test]
    fn side_dock_avoids_horizontal_reservations() {
        let reserved = Reserved {
            top: 30,
            bottom: 24,
            ..Reserved::default()
        };
        let strut = Strut {
            left: 48,
            ..Strut::default()
        };
        let r = dock_geometry(&strut, 800, 600, &reserved).unwrap();
        assert_eq!(r, Rect::new(0, 30, 48, 600 - 30 - 24));
    }

    #[test]
    fn dock_geometry_is_clamped_inside_the_screen() {
        let strut = Strut {
            bottom: 100,
            bottom_span: Some((600, 1200)),
            ..Strut::default()
        };
        let r = dock_geometry(&strut, 800, 600, &Reserved::default()).unwrap();
        assert!(r.x >= 0 && r.right() <= 800);
        assert!(r.y >= 0 && r.bottom() <= 600);
        assert!(r.w > 0 && r.h > 0);

        assert_eq!(dock_geometry(&Strut::default(), 800, 600, &Reserved::default()), None);
    }
}
