use crate::window::client::{Client, Workspace};
use crate::window::layout::{arrange, available_area, LayoutKind, LayoutParams, Rect};
use crate::window::navigation::{find_neighbor, Direction};
use crate::window::registry::{ClientId, ClientRegistry};
use crate::window::strut::Reserved;
use crate::window::WORKSPACE_COUNT;

#[derive(Debug, Clone, Copy)]
pub struct WorkspaceState {
    pub layout: LayoutKind,
    pub tiling: bool,
}

/// All mutable window-manager state, with no connection handle in sight:
/// every decision (who gets focus, which rectangles tiling assigns, where a
/// cycle lands) is answerable here without an X server, which is what makes
/// the core testable. The manager applies the answers as X requests.
pub struct WmState {
    pub registry: ClientRegistry,
    pub workspaces: [WorkspaceState; WORKSPACE_COUNT],
    pub current: usize,
    pub focused: Option<ClientId>,
    pub cycling: bool,
    pub cycle_anchor: Option<ClientId>,
    pub reserved: Reserved,
}

impl WmState {
    pub fn new(default_layout: LayoutKind, default_tiling: bool) -> Self {
        Self {
            registry: ClientRegistry::new(),
            workspaces: [WorkspaceState {
                layout: default_layout,
                tiling: default_tiling,
            }; WORKSPACE_COUNT],
            current: 0,
            focused: None,
            cycling: false,
            cycle_anchor: None,
            reserved: Reserved::default(),
        }
    }

    pub fn focused_client(&self) -> Option<&Client> {
        self.focused.and_then(|id| self.registry.get(id))
    }

    /// Re-derives the reserved edges from the current dock set.
    pub fn recompute_reserved(&mut self) {
        let struts: Vec<_> = self
            .registry
            .docks()
            .filter_map(|(_, c)| c.strut)
            .collect();
        self.reserved = Reserved::compute(struts.iter());
    }

    /// Ascending workspace indices that hold at least one (non-dock) client.
    pub fn occupied(&self) -> Vec<usize> {
        (0..WORKSPACE_COUNT)
            .filter(|&ws| self.registry.first_on(ws).is_some())
            .collect()
    }

    /// Target geometry for every tiled client of a workspace, in registry
    /// order. Empty when the workspace is floating or has no clients.
    pub fn tiled(
        &self,
        ws: usize,
        screen_w: i32,
        screen_h: i32,
        p: &LayoutParams,
    ) -> Vec<(ClientId, Rect)> {
        if ws >= WORKSPACE_COUNT || !self.workspaces[ws].tiling {
            return Vec::new();
        }
        let ids = self.registry.on_workspace(ws);
        let area = available_area(screen_w, screen_h, &self.reserved, p);
        let rects = arrange(self.workspaces[ws].layout, area, ids.len(), p);
        ids.into_iter().zip(rects).collect()
    }

    /// Best neighbor of the focused client in the given direction. Falls
    /// back to the first client on the current workspace when nothing is
    /// focused. None with fewer than two eligible clients.
    pub fn neighbor(&self, dir: Direction) -> Option<ClientId> {
        let from = match self.focused_client() {
            Some(c) if c.workspace == Workspace::Index(self.current) => self.focused?,
            _ => self.registry.first_on(self.current)?,
        };
        let current_rect = self.registry.get(from)?.rect;
        let candidates = self
            .registry
            .on_workspace(self.current)
            .into_iter()
            .filter(|&id| id != from)
            .filter_map(|id| Some((id, self.registry.get(id)?.rect)));
        find_neighbor(current_rect, dir, candidates)
    }

    /// Makes `ws` the current workspace and focuses its first client in
    /// registry order (or nothing when the workspace is empty).
    pub fn switch_to(&mut self, ws: usize) -> Option<ClientId> {
        if ws >= WORKSPACE_COUNT {
            return None;
        }
        self.current = ws;
        self.focused = self.registry.first_on(ws);
        self.focused
    }

    /// Reassigns the focused client to `ws` and moves focus to the first
    /// remaining client on the current workspace, keeping the focused
    /// client on the visible workspace. Returns the moved client; None
    /// when nothing is focused, the target is out of range, or the client
    /// is already there.
    pub fn move_focused_to(&mut self, ws: usize) -> Option<ClientId> {
        if ws >= WORKSPACE_COUNT {
            return None;
        }
        let id = self.focused?;
        let client = self.registry.get_mut(id)?;
        if client.workspace == Workspace::Index(ws) {
            return None;
        }
        client.workspace = Workspace::Index(ws);
        if ws != self.current {
            self.focused = self.registry.first_on(self.current);
        }
        Some(id)
    }

    pub fn start_cycle(&mut self) {
        if self.registry.is_empty() {
            return;
        }
        self.cycling = true;
        self.cycle_anchor = self.focused;
    }

    pub fn stop_cycle(&mut self) {
        self.cycling = false;
        self.cycle_anchor = None;
    }

    /// Next client on the current workspace in registry order, wrapping at
    /// the ends. None when not cycling or when no other client is eligible.
    pub fn cycle_next(&mut self, forward: bool) -> Option<ClientId> {
        if !self.cycling {
            return None;
        }
        let order = self.registry.order();
        if order.is_empty() {
            return None;
        }
        let len = order.len();
        let start = self
            .focused
            .and_then(|id| order.iter().position(|&o| o == id))
            .unwrap_or(0);

        let mut pos = start;
        for _ in 0..len {
            pos = if forward {
                (pos + 1) % len
            } else {
                (pos + len - 1) % len
            };
            let id = order[pos];
            if Some(id) == self.focused {
                continue;
            }
            let Some(c) = self.registry.get(id) else {
                continue;
            };
            if !c.is_dock && c.workspace == Workspace::Index(self.current) {
                return Some(id);
            }
        }
        None
    }

    pub fn set_layout(&mut self, ws: usize, layout: LayoutKind) {
        if ws < WORKSPACE_COUNT {
            self.workspaces[ws].layout = layout;
        }
    }

    pub fn set_layout_for_all(&mut self, layout: LayoutKind) {
        for ws in &mut self.workspaces {
            ws.layout = layout;
        }
    }

    pub fn set_mode(&mut self, ws: usize, tiling: bool) {
        if ws < WORKSPACE_COUNT {
            self.workspaces[ws].tiling = tiling;
        }
    }

    pub fn set_mode_for_all(&mut self, tiling: bool) {
        for ws in &mut self.workspaces {
            ws.tiling = tiling;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::client::Client;
    use crate::window::strut::Strut;

    fn state() -> WmState {
        WmState::new(LayoutKind::MasterStack, true)
    }

    fn add(state: &mut WmState, window: u32, ws: usize) -> ClientId {
        state.registry.add(Client::new(
            window,
            Rect::new(0, 0, 100, 100),
            Workspace::Index(ws),
        ))
    }

    fn params() -> LayoutParams {
        LayoutParams {
            master_factor: 60,
            gap: 8,
            border: 2,
            min_width: 32,
            min_height: 24,
        }
    }

    #[test]
    fn cycle_skips_other_workspaces_and_wraps() {
        let mut s = state();
        let a = add(&mut s, 1, 0);
        let _other = add(&mut s, 2, 1);
        let b = add(&mut s, 3, 0);
        s.focused = Some(b);

        s.start_cycle();
        assert!(s.cycling);
        assert_eq!(s.cycle_next(true), Some(a));
        s.focused = Some(a);
        // wraps back around, skipping the workspace-1 client
        assert_eq!(s.cycle_next(true), Some(b));
        s.stop_cycle();
        assert!(!s.cycling);
        assert_eq!(s.cycle_anchor, None);
    }

    #[test]
    fn cycle_with_one_eligible_client_is_a_noop() {
        let mut s = state();
        let a = add(&mut s, 1, 0);
        let _elsewhere = add(&mut s, 2, 4);
        s.focused = Some(a);
        s.start_cycle();
        assert_eq!(s.cycle_next(true), None);
        assert_eq!(s.cycle_next(false), None);
    }

    #[test]
    fn cycle_requires_start() {
        let mut s = state();
        add(&mut s, 1, 0);
        add(&mut s, 2, 0);
        assert_eq!(s.cycle_next(true), None);
    }

    #[test]
    fn cycle_backward_walks_the_other_way() {
        let mut s = state();
        let a = add(&mut s, 1, 0);
        let b = add(&mut s, 2, 0);
        let c = add(&mut s, 3, 0);
        // order: c, b, a
        s.focused = Some(b);
        s.start_cycle();
        assert_eq!(s.cycle_next(false), Some(c));
        assert_eq!(s.cycle_next(true), Some(a));
    }

    #[test]
    fn occupied_lists_ascending_nonempty_workspaces() {
        let mut s = state();
        add(&mut s, 1, 4);
        add(&mut s, 2, 0);
        add(&mut s, 3, 4);
        s.registry.add(Client::dock(
            9,
            Rect::new(0, 0, 800, 30),
            Strut {
                top: 30,
                ..Strut::default()
            },
        ));
        assert_eq!(s.occupied(), vec![0, 4]);
    }

    #[test]
    fn reserved_follows_dock_set() {
        let mut s = state();
        let dock = s.registry.add(Client::dock(
            9,
            Rect::new(0, 0, 800, 30),
            Strut {
                top: 30,
                ..Strut::default()
            },
        ));
        s.recompute_reserved();
        assert_eq!(s.reserved.top, 30);
        s.registry.remove(dock);
        s.recompute_reserved();
        assert_eq!(s.reserved, Reserved::default());
    }

    #[test]
    fn tiled_accounts_for_top_strut() {
        let mut s = state();
        add(&mut s, 1, 0);
        s.registry.add(Client::dock(
            9,
            Rect::new(0, 0, 800, 30),
            Strut {
                top: 30,
                ..Strut::default()
            },
        ));
        s.recompute_reserved();

        let p = params();
        let tiled = s.tiled(0, 800, 600, &p);
        assert_eq!(tiled.len(), 1);
        let rect = tiled[0].1;
        assert_eq!(rect.y, 30 + p.gap + p.border);
        assert_eq!(rect.h, 600 - 30 - 2 * (p.gap + p.border) - 2 * p.border);
    }

    #[test]
    fn tiled_is_empty_for_floating_workspaces() {
        let mut s = WmState::new(LayoutKind::MasterStack, false);
        add(&mut s, 1, 0);
        assert!(s.tiled(0, 800, 600, &params()).is_empty());
    }

    #[test]
    fn switch_picks_first_client_in_registry_order() {
        let mut s = state();
        let _a = add(&mut s, 1, 1);
        let b = add(&mut s, 2, 1);
        // order: b, a (most recent first)
        assert_eq!(s.switch_to(1), Some(b));
        assert_eq!(s.current, 1);
        assert_eq!(s.focused, Some(b));

        // an empty workspace clears focus
        assert_eq!(s.switch_to(2), None);
        assert_eq!(s.focused, None);

        assert_eq!(s.switch_to(99), None);
        assert_eq!(s.current, 2);
    }

    #[test]
    fn move_focused_refocuses_on_the_visible_workspace() {
        let mut s = state();
        let a = add(&mut s, 1, 0);
        let b = add(&mut s, 2, 0);
        s.focused = Some(b);

        assert_eq!(s.move_focused_to(4), Some(b));
        assert_eq!(s.registry.get(b).unwrap().workspace, Workspace::Index(4));
        // focus stays on the visible workspace
        assert_eq!(s.focused, Some(a));

        assert_eq!(s.move_focused_to(4), Some(a));
        assert_eq!(s.focused, None);
    }

    #[test]
    fn move_focused_to_same_or_invalid_workspace_is_a_noop() {
        let mut s = state();
        let a = add(&mut s, 1, 0);
        s.focused = Some(a);
        assert_eq!(s.move_focused_to(0), None);
        assert_eq!(s.move_focused_to(99), None);
        assert_eq!(s.focused, Some(a));
        assert_eq!(s.registry.get(a).unwrap().workspace, Workspace::Index(0));
    }

    #[test]
    fn neighbor_requires_two_eligible_clients() {
        let mut s = state();
        let a = add(&mut s, 1, 0);
        s.focused = Some(a);
        assert_eq!(s.neighbor(Direction::Right), None);

        let b = add(&mut s, 2, 0);
        s.registry.get_mut(b).unwrap().rect = Rect::new(200, 0, 100, 100);
        assert_eq!(s.neighbor(Direction::Right), Some(b));
    }
}
