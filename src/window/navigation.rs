use crate::window::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

/// Length of the intersection of [a1, a2) and [b1, b2).
fn overlap_len(a1: i32, a2: i32, b1: i32, b2: i32) -> i32 {
    (a2.min(b2) - a1.max(b1)).max(0)
}

/// Sway/i3-style directional scoring. Candidates in the requested
/// half-plane always beat those outside it; among them, any perpendicular
/// overlap dominates, then the primary-axis edge gap, then the
/// perpendicular center distance. With no half-plane candidate at all the
/// nearest center wins. Lower is better.
fn score(current: Rect, candidate: Rect, dir: Direction) -> i64 {
    let (ccx, ccy) = current.center();
    let (acx, acy) = candidate.center();

    let (in_dir, primary, overlap, secondary) = match dir {
        Direction::Left => {
            let overlap = overlap_len(candidate.y, candidate.bottom(), current.y, current.bottom());
            let (in_dir, primary) = if candidate.right() <= current.x {
                (true, (current.x - candidate.right()) as i64)
            } else if overlap > 0 && candidate.x < current.x {
                (true, 0)
            } else {
                (false, 0)
            };
            let secondary = if overlap > 0 { 0 } else { (acy - ccy).abs() as i64 };
            (in_dir, primary, overlap, secondary)
        }
        Direction::Right => {
            let overlap = overlap_len(candidate.y, candidate.bottom(), current.y, current.bottom());
            let (in_dir, primary) = if candidate.x >= current.right() {
                (true, (candidate.x - current.right()) as i64)
            } else if overlap > 0 && candidate.right() > current.right() {
                (true, 0)
            } else {
                (false, 0)
            };
            let secondary = if overlap > 0 { 0 } else { (acy - ccy).abs() as i64 };
            (in_dir, primary, overlap, secondary)
        }
        Direction::Up => {
            let overlap = overlap_len(candidate.x, candidate.right(), current.x, current.right());
            let (in_dir, primary) = if candidate.bottom() <= current.y {
                (true, (current.y - candidate.bottom()) as i64)
            } else if overlap > 0 && candidate.y < current.y {
                (true, 0)
            } else {
                (false, 0)
            };
            let secondary = if overlap > 0 { 0 } else { (acx - ccx).abs() as i64 };
            (in_dir, primary, overlap, secondary)
        }
        Direction::Down => {
            let overlap = overlap_len(candidate.x, candidate.right(), current.x, current.right());
            let (in_dir, primary) = if candidate.y >= current.bottom() {
                (true, (candidate.y - current.bottom()) as i64)
            } else if overlap > 0 && candidate.bottom() > current.bottom() {
                (true, 0)
            } else {
                (false, 0)
            };
            let secondary = if overlap > 0 { 0 } else { (acx - ccx).abs() as i64 };
            (in_dir, primary, overlap, secondary)
        }
    };

    if in_dir {
        let mut s = primary * 100_000 + secondary * 100;
        s -= 1_000_000_000;
        if overlap > 0 {
            s -= 500_000_000;
        }
        s
    } else {
        let dx = (acx - ccx) as i64;
        let dy = (acy - ccy) as i64;
        dx * dx + dy * dy
    }
}

/// Picks the best candidate in the given direction from `current`. Pure
/// query; ties go to the earliest candidate in iteration (registry) order.
/// Returns None only when there are no candidates at all.
pub fn find_neighbor<K, I>(current: Rect, dir: Direction, candidates: I) -> Option<K>
where
    I: IntoIterator<Item = (K, Rect)>,
{
    let mut best: Option<(K, i64)> = None;
    for (id, rect) in candidates {
        let s = score(current, rect, dir);
        if best.as_ref().map_or(true, |(_, b)| s < *b) {
            best = Some((id, s));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2 grid of 100x100 windows with a small gap
    const TL: Rect = Rect { x: 0, y: 0, w: 100, h: 100 };
    const TR: Rect = Rect { x: 110, y: 0, w: 100, h: 100 };
    const BL: Rect = Rect { x: 0, y: 110, w: 100, h: 100 };
    const BR: Rect = Rect { x: 110, y: 110, w: 100, h: 100 };

    fn grid_without(me: char) -> Vec<(char, Rect)> {
        [('a', TL), ('b', TR), ('c', BL), ('d', BR)]
            .into_iter()
            .filter(|(k, _)| *k != me)
            .collect()
    }

    #[test]
    fn grid_right_from_top_left() {
        assert_eq!(find_neighbor(TL, Direction::Right, grid_without('a')), Some('b'));
    }

    #[test]
    fn grid_down_from_top_left() {
        assert_eq!(find_neighbor(TL, Direction::Down, grid_without('a')), Some('c'));
    }

    #[test]
    fn grid_left_and_up_from_bottom_right() {
        assert_eq!(find_neighbor(BR, Direction::Left, grid_without('d')), Some('c'));
        assert_eq!(find_neighbor(BR, Direction::Up, grid_without('d')), Some('b'));
    }

    #[test]
    fn no_candidates_returns_none() {
        let empty: Vec<(char, Rect)> = Vec::new();
        assert_eq!(find_neighbor(TL, Direction::Right, empty), None);
    }

    #[test]
    fn falls_back_to_nearest_center_outside_half_plane() {
        // both candidates are to the right; asking for "left" falls back
        // to center distance
        let near = Rect::new(150, 0, 100, 100);
        let far = Rect::new(400, 0, 100, 100);
        let got = find_neighbor(TL, Direction::Left, vec![('f', far), ('n', near)]);
        assert_eq!(got, Some('n'));
    }

    #[test]
    fn overlapping_candidate_beats_distant_aligned_one() {
        // candidate sharing a row with `current` wins over one far below
        let cur = Rect::new(200, 200, 100, 100);
        let aligned = Rect::new(0, 200, 100, 100);
        let offset = Rect::new(50, 500, 100, 100);
        let got = find_neighbor(cur, Direction::Left, vec![('o', offset), ('a', aligned)]);
        assert_eq!(got, Some('a'));
    }

    #[test]
    fn ties_go_to_first_in_order() {
        let cur = Rect::new(200, 0, 100, 100);
        let twin = Rect::new(0, 0, 100, 100);
        let got = find_neighbor(cur, Direction::Left, vec![('1', twin), ('2', twin)]);
        assert_eq!(got, Some('1'));
    }
}
