use serde::Deserialize;

use crate::window::strut::Reserved;

/// Screen-space rectangle. Width/height are kept signed so intermediate
/// layout math can go negative before clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    MasterStack,
    Dwindle,
}

impl LayoutKind {
    pub fn other(self) -> LayoutKind {
        match self {
            LayoutKind::MasterStack => LayoutKind::Dwindle,
            LayoutKind::Dwindle => LayoutKind::MasterStack,
        }
    }
}

/// Knobs shared by both tiling algorithms.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    /// Percent of the area given to the master column / dwindle head.
    pub master_factor: i32,
    /// Gap between windows, also used as the outer gap.
    pub gap: i32,
    /// X border width, drawn outside the window on every edge.
    pub border: i32,
    pub min_width: i32,
    pub min_height: i32,
}

/// The rectangle tiled windows may occupy: the screen minus dock
/// reservations, minus the outer gap and border on every side.
pub fn available_area(screen_w: i32, screen_h: i32, reserved: &Reserved, p: &LayoutParams) -> Rect {
    let outer = p.gap + p.border;
    Rect {
        x: reserved.left + outer,
        y: reserved.top + outer,
        w: (screen_w - reserved.left - reserved.right - 2 * outer).max(p.min_width),
        h: (screen_h - reserved.top - reserved.bottom - 2 * outer).max(p.min_height),
    }
}

/// Computes one rectangle per window, in window order. Pure: repeated calls
/// with the same inputs give the same output.
pub fn arrange(kind: LayoutKind, area: Rect, count: usize, p: &LayoutParams) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    match kind {
        LayoutKind::MasterStack => master_stack(area, count, p),
        LayoutKind::Dwindle => {
            let mut out = Vec::with_capacity(count);
            dwindle(&mut out, area, count, true, p);
            out
        }
    }
}

/// The X border is drawn outside the window, so each cell loses 2*border
/// per axis. The origin stays put.
fn inset(r: Rect, border: i32) -> Rect {
    Rect {
        x: r.x,
        y: r.y,
        w: (r.w - 2 * border).max(1),
        h: (r.h - 2 * border).max(1),
    }
}

/// One master column on the left sized by master_factor, the rest stacked
/// in equal-height rows on the right. The integer-division remainder goes
/// to the last row.
fn master_stack(area: Rect, count: usize, p: &LayoutParams) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    if count == 1 {
        out.push(inset(area, p.border));
        return out;
    }

    let master_w = (area.w * p.master_factor / 100).max(p.min_width);
    let stack_w = (area.w - master_w - p.gap).max(p.min_width);
    let stack_count = (count - 1) as i32;

    let total_gap = (stack_count - 1) * p.gap;
    let each_h = (area.h - total_gap) / stack_count;

    out.push(inset(Rect::new(area.x, area.y, master_w, area.h), p.border));

    for i in 0..stack_count {
        let y = area.y + i * (each_h + p.gap);
        let h = if i == stack_count - 1 {
            area.h - (each_h + p.gap) * (stack_count - 1)
        } else {
            each_h
        };
        out.push(inset(
            Rect::new(area.x + master_w + p.gap, y, stack_w, h),
            p.border,
        ));
    }
    out
}

/// Recursive spiral split: the head window takes a master_factor fraction
/// of the current rectangle, the remainder recurses with the split axis
/// flipped (vertical, then horizontal, then vertical, ...). The split point
/// shrinks when either half would fall below the minimum size.
fn dwindle(out: &mut Vec<Rect>, area: Rect, count: usize, vertical: bool, p: &LayoutParams) {
    if count == 1 {
        out.push(inset(area, p.border));
        return;
    }

    if vertical {
        let mut head = area.w * p.master_factor / 100;
        if area.w - head - p.gap < p.min_width {
            head = area.w - p.min_width - p.gap;
        }
        head = head.max(p.min_width);
        let rest_w = (area.w - head - p.gap).max(1);

        out.push(inset(Rect::new(area.x, area.y, head, area.h), p.border));
        dwindle(
            out,
            Rect::new(area.x + head + p.gap, area.y, rest_w, area.h),
            count - 1,
            false,
            p,
        );
    } else {
        let mut head = area.h * p.master_factor / 100;
        if area.h - head - p.gap < p.min_height {
            head = area.h - p.min_height - p.gap;
        }
        head = head.max(p.min_height);
        let rest_h = (area.h - head - p.gap).max(1);

        out.push(inset(Rect::new(area.x, area.y, area.w, head), p.border));
        dwindle(
            out,
            Rect::new(area.x, area.y + head + p.gap, area.w, rest_h),
            count - 1,
            true,
            p,
        );
    }
}
