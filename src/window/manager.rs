use anyhow::Result;
use tracing::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    AtomEnum, ChangeWindowAttributesAux, ClientMessageData, ClientMessageEvent,
    ConfigureRequestEvent, ConfigureWindowAux, ConnectionExt, EventMask, GrabMode, GrabStatus,
    InputFocus, ModMask, PropMode, StackMode, Window, CLIENT_MESSAGE_EVENT,
};
use x11rb::protocol::Event;
use x11rb::wrapper::ConnectionExt as _;

use crate::core::config::Config;
use crate::core::context::Context;
use crate::window::client::{workspace_in_range, Client, Workspace};
use crate::window::cursors::Cursors;
use crate::window::keys::{self, Action, KeyboardMap};
use crate::window::layout::Rect;
use crate::window::navigation::Direction;
use crate::window::registry::ClientId;
use crate::window::spawn;
use crate::window::state::WmState;
use crate::window::status::StatusFiles;
use crate::window::strut::{dock_geometry, Strut};
use crate::window::WORKSPACE_COUNT;

/// Interactive move/resize, expressed as a state machine driven by the
/// ordinary event dispatch rather than a nested blocking loop.
#[derive(Debug, Clone, Copy)]
enum DragState {
    Idle,
    Moving {
        client: ClientId,
        start_root: (i16, i16),
        orig: Rect,
    },
    Resizing {
        client: ClientId,
        start_root: (i16, i16),
        orig: Rect,
    },
}

pub struct WindowManager {
    ctx: Context,
    config: Config,
    state: WmState,
    status: StatusFiles,
    keymap: KeyboardMap,
    cursors: Cursors,
    drag: DragState,
    border_focus_pixel: u32,
    border_unfocus_pixel: u32,
    running: bool,
}

impl WindowManager {
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let keymap = KeyboardMap::query(&ctx.conn)?;
        let cursors = Cursors::new(&ctx.conn)?;
        let border_focus_pixel = ctx.alloc_color(&config.border_focus_color);
        let border_unfocus_pixel = ctx.alloc_color(&config.border_unfocus_color);
        let state = WmState::new(config.default_layout, config.default_tiling);
        Ok(Self {
            ctx,
            config,
            state,
            status: StatusFiles::new(),
            keymap,
            cursors,
            drag: DragState::Idle,
            border_focus_pixel,
            border_unfocus_pixel,
            running: true,
        })
    }

    pub fn grab_bindings(&self) -> Result<()> {
        keys::grab_keys(&self.ctx.conn, self.ctx.root, &self.keymap)?;
        keys::grab_buttons(&self.ctx.conn, self.ctx.root)?;
        Ok(())
    }

    fn screen_size(&self) -> (i32, i32) {
        (
            self.ctx.screen_width as i32,
            self.ctx.screen_height as i32,
        )
    }

    /// Adopts windows that already exist when the manager starts.
    pub fn scan_windows(&mut self) -> Result<()> {
        let tree = self.ctx.conn.query_tree(self.ctx.root)?.reply()?;
        info!("scanning {} existing windows", tree.children.len());
        for &win in &tree.children {
            let attrs = self.ctx.conn.get_window_attributes(win)?.reply();
            if let Ok(attrs) = attrs {
                if !attrs.override_redirect {
                    let _ = self.manage_window(win);
                }
            }
        }
        Ok(())
    }

    /// Initial tiling pass plus status files, once scanning is done.
    pub fn startup_sync(&mut self) -> Result<()> {
        self.retile_all_tiling();
        self.status.write_focused(self.state.current);
        self.status.write_occupied(&self.state.occupied());
        self.ctx.conn.flush()?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        while self.running {
            self.ctx.conn.flush()?;
            let event = self.ctx.conn.wait_for_event()?;
            if let Err(e) = self.handle_event(event) {
                warn!("event handler error: {e:#}");
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::MapRequest(e) => self.manage_window(e.window)?,
            Event::DestroyNotify(e) => self.unmanage_window(e.window),
            // the manager unmaps windows itself on workspace switches, so
            // UnmapNotify carries no lifecycle meaning here
            Event::UnmapNotify(_) => {}
            Event::ConfigureRequest(e) => self.handle_configure_request(e),
            Event::EnterNotify(e) => {
                if let Some(id) = self.state.registry.find_window(e.event) {
                    self.focus(id);
                }
            }
            Event::MotionNotify(e) => match self.drag {
                DragState::Idle => self.focus_window_at_pointer(),
                _ => self.handle_drag_motion(e.root_x, e.root_y),
            },
            Event::ButtonPress(e) => self.handle_button_press(e.child, e.detail, e.root_x, e.root_y),
            Event::ButtonRelease(_) => self.handle_button_release(),
            Event::KeyPress(e) => {
                self.handle_key_press(self.keymap.keysym(e.detail), u16::from(e.state))
            }
            Event::KeyRelease(e) => {
                if self.keymap.keysym(e.detail) == keys::XK_TAB {
                    self.state.stop_cycle();
                }
            }
            Event::ClientMessage(e) => self.handle_client_message(e.window, e.type_, e.data.as_data32()),
            Event::PropertyNotify(e) => {
                if e.atom == self.ctx.atoms._NET_WM_STRUT
                    || e.atom == self.ctx.atoms._NET_WM_STRUT_PARTIAL
                {
                    self.handle_strut_change(e.window);
                }
            }
            Event::Error(e) => {
                // an operation raced a dying window; drop it and move on
                warn!("X error: {e:?}");
            }
            _ => {}
        }
        Ok(())
    }

    // --- manage / unmanage ---

    pub fn manage_window(&mut self, win: Window) -> Result<()> {
        if win == self.ctx.root || self.state.registry.find_window(win).is_some() {
            return Ok(());
        }

        let attrs = self.ctx.conn.get_window_attributes(win)?.reply().ok();
        let override_redirect = attrs.map(|a| a.override_redirect).unwrap_or(false);

        let strut = self.read_strut(win);
        let is_dock =
            self.window_type_is_dock(win) || strut.map_or(false, |s| !s.is_empty());
        if override_redirect && !is_dock {
            return Ok(());
        }
        if is_dock {
            self.manage_dock(win, strut.unwrap_or_default());
            return Ok(());
        }

        let geom = self.ctx.conn.get_geometry(win)?.reply().ok();
        let (mut w, mut h) = match geom {
            Some(g) => (g.width as i32, g.height as i32),
            // attribute/geometry queries can race the window's death
            None => (400, 300),
        };
        self.clamp_size(&mut w, &mut h);

        let (sw, sh) = self.screen_size();
        let rect = Rect::new((sw - w) / 2, (sh - h) / 2, w, h);

        let _ = self.ctx.conn.change_window_attributes(
            win,
            &ChangeWindowAttributesAux::new()
                .event_mask(
                    EventMask::ENTER_WINDOW
                        | EventMask::FOCUS_CHANGE
                        | EventMask::PROPERTY_CHANGE
                        | EventMask::STRUCTURE_NOTIFY,
                )
                .border_pixel(self.border_unfocus_pixel),
        );
        self.apply_rect(win, rect);

        let ws = self.state.current;
        let id = self
            .state
            .registry
            .add(Client::new(win, rect, Workspace::Index(ws)));
        debug!("managing window {win} on workspace {ws}");

        let _ = self.ctx.conn.map_window(win);
        self.status.write_occupied(&self.state.occupied());
        self.apply_focus(id);
        self.retile(ws);
        Ok(())
    }

    fn manage_dock(&mut self, win: Window, strut: Strut) {
        let (sw, sh) = self.screen_size();
        let rect = dock_geometry(&strut, sw, sh, &self.state.reserved)
            .or_else(|| {
                let g = self.ctx.conn.get_geometry(win).ok()?.reply().ok()?;
                Some(Rect::new(g.x as i32, g.y as i32, g.width as i32, g.height as i32))
            })
            .unwrap_or(Rect::new(0, 0, sw, 1));

        debug!("managing dock {win} at {rect:?}");
        let _ = self.ctx.conn.change_window_attributes(
            win,
            &ChangeWindowAttributesAux::new().event_mask(
                EventMask::PROPERTY_CHANGE | EventMask::STRUCTURE_NOTIFY,
            ),
        );
        let _ = self.ctx.conn.configure_window(
            win,
            &ConfigureWindowAux::new().border_width(0),
        );
        self.apply_rect(win, rect);
        let _ = self.ctx.conn.change_property32(
            PropMode::REPLACE,
            win,
            self.ctx.atoms._NET_WM_STATE,
            AtomEnum::ATOM,
            &[self.ctx.atoms._NET_WM_STATE_ABOVE],
        );
        let _ = self.ctx.conn.map_window(win);

        self.state.registry.add(Client::dock(win, rect, strut));
        self.state.recompute_reserved();
        self.update_workarea();
        self.retile_all_tiling();
        self.raise_docks();
    }

    pub fn unmanage_window(&mut self, win: Window) {
        let Some(id) = self.state.registry.find_window(win) else {
            return;
        };
        let Some(client) = self.state.registry.remove(id) else {
            return;
        };
        debug!("unmanaging window {win}");

        if client.is_dock {
            self.state.recompute_reserved();
            self.update_workarea();
            self.retile_all_tiling();
            return;
        }

        self.status.write_occupied(&self.state.occupied());

        if self.state.focused == Some(id) {
            self.state.focused = None;
            if let Some(next) = self.state.registry.first_on(self.state.current) {
                self.apply_focus(next);
            } else {
                self.update_borders();
                self.status.write_focused(self.state.current);
            }
        }

        if let Some(ws) = client.workspace.index() {
            self.retile(ws);
        }
    }

    // --- focus ---

    /// Guarded focus: a no-op for docks, clients on other workspaces, and
    /// the already-focused client.
    fn focus(&mut self, id: ClientId) {
        let Some(client) = self.state.registry.get(id) else {
            return;
        };
        if client.is_dock || client.workspace != Workspace::Index(self.state.current) {
            return;
        }
        if self.state.focused == Some(id) {
            return;
        }
        self.apply_focus(id);
    }

    /// Unconditional focus side effects: raise, input focus, border pass,
    /// then re-raise every dock so no normal window can obscure one.
    fn apply_focus(&mut self, id: ClientId) {
        let Some(client) = self.state.registry.get(id) else {
            return;
        };
        let win = client.window;
        self.state.focused = Some(id);

        let _ = self.ctx.conn.configure_window(
            win,
            &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
        );
        let _ = self
            .ctx
            .conn
            .set_input_focus(InputFocus::POINTER_ROOT, win, x11rb::CURRENT_TIME);
        let _ = self.ctx.conn.change_property32(
            PropMode::REPLACE,
            self.ctx.root,
            self.ctx.atoms._NET_ACTIVE_WINDOW,
            AtomEnum::WINDOW,
            &[win],
        );
        self.update_borders();
        self.raise_docks();
        self.status.write_focused(self.state.current);
    }

    fn update_borders(&mut self) {
        let current = self.state.current;
        let focused = self.state.focused;
        for (id, client) in self.state.registry.iter_ordered() {
            if client.is_dock {
                continue;
            }
            if client.workspace != Workspace::Index(current) {
                let _ = self.ctx.conn.configure_window(
                    client.window,
                    &ConfigureWindowAux::new().border_width(0),
                );
                continue;
            }
            let (width, pixel) = if focused == Some(id) {
                (self.config.border_focus_width, self.border_focus_pixel)
            } else {
                (self.config.border_unfocus_width, self.border_unfocus_pixel)
            };
            let _ = self.ctx.conn.configure_window(
                client.window,
                &ConfigureWindowAux::new().border_width(width),
            );
            let _ = self.ctx.conn.change_window_attributes(
                client.window,
                &ChangeWindowAttributesAux::new().border_pixel(pixel),
            );
        }
    }

    fn raise_docks(&mut self) {
        for (_, dock) in self.state.registry.docks() {
            let _ = self.ctx.conn.configure_window(
                dock.window,
                &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
            );
        }
    }

    fn focus_window_at_pointer(&mut self) {
        let Ok(cookie) = self.ctx.conn.query_pointer(self.ctx.root) else {
            return;
        };
        let Ok(reply) = cookie.reply() else {
            return;
        };
        if let Some(id) = self.state.registry.find_window(reply.child) {
            self.focus(id);
        }
    }

    // --- tiling ---

    fn retile(&mut self, ws: usize) {
        let (sw, sh) = self.screen_size();
        let placements = self
            .state
            .tiled(ws, sw, sh, &self.config.layout_params());
        for (id, rect) in placements {
            self.set_client_rect(id, rect);
        }
    }

    fn retile_all_tiling(&mut self) {
        for ws in 0..WORKSPACE_COUNT {
            self.retile(ws);
        }
    }

    fn set_client_rect(&mut self, id: ClientId, rect: Rect) {
        let Some(client) = self.state.registry.get_mut(id) else {
            return;
        };
        client.rect = rect;
        let win = client.window;
        self.apply_rect(win, rect);
    }

    fn apply_rect(&self, win: Window, rect: Rect) {
        let _ = self.ctx.conn.configure_window(
            win,
            &ConfigureWindowAux::new()
                .x(rect.x)
                .y(rect.y)
                .width(rect.w.max(1) as u32)
                .height(rect.h.max(1) as u32),
        );
    }

    // --- workspaces ---

    pub fn switch_workspace(&mut self, ws: usize) {
        if !workspace_in_range(ws) || ws == self.state.current {
            return;
        }
        info!("switching to workspace {}", ws + 1);
        let next = self.state.switch_to(ws);

        for (_, client) in self.state.registry.iter_ordered() {
            if client.is_dock {
                continue;
            }
            if client.workspace.is_visible_on(ws) {
                let _ = self.ctx.conn.map_window(client.window);
            } else {
                let _ = self.ctx.conn.unmap_window(client.window);
            }
        }

        let _ = self.ctx.conn.change_property32(
            PropMode::REPLACE,
            self.ctx.root,
            self.ctx.atoms._NET_CURRENT_DESKTOP,
            AtomEnum::CARDINAL,
            &[ws as u32],
        );

        self.retile(ws);
        if let Some(next) = next {
            self.apply_focus(next);
        } else {
            self.update_borders();
            self.status.write_focused(ws);
        }
        self.status.write_occupied(&self.state.occupied());
    }

    pub fn move_focused_to(&mut self, ws: usize) {
        let current = self.state.current;
        let Some(moved) = self.state.move_focused_to(ws) else {
            return;
        };

        if ws != current {
            if let Some(client) = self.state.registry.get(moved) {
                let _ = self.ctx.conn.unmap_window(client.window);
            }
        }
        self.status.write_occupied(&self.state.occupied());
        self.retile(ws);
        self.retile(current);

        if ws != current {
            if let Some(next) = self.state.focused {
                self.apply_focus(next);
            } else {
                self.update_borders();
                self.status.write_focused(current);
            }
        }
    }

    fn toggle_tiling(&mut self, all: bool) {
        if all {
            let tiling = !self.state.workspaces[0].tiling;
            self.state.set_mode_for_all(tiling);
            self.retile_all_tiling();
        } else {
            let ws = self.state.current;
            let tiling = !self.state.workspaces[ws].tiling;
            self.state.set_mode(ws, tiling);
            self.retile(ws);
        }
    }

    fn toggle_layout(&mut self, all: bool) {
        if all {
            let layout = self.state.workspaces[0].layout.other();
            self.state.set_layout_for_all(layout);
            self.retile_all_tiling();
        } else {
            let ws = self.state.current;
            let layout = self.state.workspaces[ws].layout.other();
            self.state.set_layout(ws, layout);
            self.retile(ws);
        }
    }

    // --- actions ---

    fn handle_key_press(&mut self, keysym: u32, state: u16) {
        let clean = state & !(u16::from(ModMask::LOCK) | u16::from(ModMask::M2));
        let main_mods = u16::from(ModMask::M4) | u16::from(ModMask::M1);
        if clean & main_mods == 0 {
            return;
        }
        let shift = state & u16::from(ModMask::SHIFT) != 0;
        let Some(action) = keys::action_for(keysym, shift) else {
            return;
        };
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::SpawnTerminal => spawn::spawn(&self.config.terminal),
            Action::SpawnLauncher => spawn::spawn(&self.config.launcher),
            Action::CloseFocused => {
                if let Some(client) = self.state.focused_client() {
                    self.send_delete(client.window);
                }
            }
            Action::ToggleFullscreen => self.toggle_fullscreen(),
            Action::Cycle { forward } => {
                if !self.state.cycling {
                    self.state.start_cycle();
                }
                if let Some(next) = self.state.cycle_next(forward) {
                    self.apply_focus(next);
                }
            }
            Action::ToggleTiling { all } => self.toggle_tiling(all),
            Action::ToggleLayout { all } => self.toggle_layout(all),
            Action::FocusDir(dir) => {
                if let Some(id) = self.state.neighbor(dir) {
                    self.focus(id);
                }
            }
            Action::SwapDir(dir) => self.swap_in_direction(dir),
            Action::SwitchWorkspace(ws) => self.switch_workspace(ws),
            Action::MoveToWorkspace(ws) => self.move_focused_to(ws),
            Action::Quit => {
                info!("exit requested");
                self.running = false;
            }
        }
    }

    /// Exchanges the focused client's order position with its neighbor.
    /// Order matters here: retile first, then re-assert focus on the moved
    /// client, then borders, so the server never shows a half-applied swap.
    fn swap_in_direction(&mut self, dir: Direction) {
        let Some(focused) = self.state.focused else {
            return;
        };
        let Some(neighbor) = self.state.neighbor(dir) else {
            return;
        };
        if !self.state.registry.swap_order(focused, neighbor) {
            return;
        }
        self.retile(self.state.current);
        self.apply_focus(focused);
        self.status.write_occupied(&self.state.occupied());
    }

    fn toggle_fullscreen(&mut self) {
        let Some(id) = self.state.focused else {
            return;
        };
        let (sw, sh) = self.screen_size();
        let Some(client) = self.state.registry.get(id) else {
            return;
        };
        let full = Rect::new(0, 0, sw, sh);
        let rect = if client.rect == full {
            let w = sw * 2 / 3;
            let h = sh * 2 / 3;
            Rect::new((sw - w) / 2, (sh - h) / 2, w, h)
        } else {
            full
        };
        self.set_client_rect(id, rect);
    }

    fn send_delete(&self, win: Window) {
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: win,
            type_: self.ctx.atoms.WM_PROTOCOLS,
            data: ClientMessageData::from([
                self.ctx.atoms.WM_DELETE_WINDOW,
                x11rb::CURRENT_TIME,
                0,
                0,
                0,
            ]),
        };
        let _ = self
            .ctx
            .conn
            .send_event(false, win, EventMask::NO_EVENT, event);
    }

    // --- pointer drags ---

    fn handle_button_press(&mut self, child: Window, button: u8, root_x: i16, root_y: i16) {
        let Some(id) = self.state.registry.find_window(child) else {
            return;
        };
        self.focus(id);
        let Some(client) = self.state.registry.get(id) else {
            return;
        };
        if client.is_dock {
            return;
        }
        let orig = client.rect;

        let (next, cursor) = match button {
            1 => (
                DragState::Moving {
                    client: id,
                    start_root: (root_x, root_y),
                    orig,
                },
                self.cursors.move_,
            ),
            3 => (
                DragState::Resizing {
                    client: id,
                    start_root: (root_x, root_y),
                    orig,
                },
                self.cursors.resize,
            ),
            _ => return,
        };

        let grabbed = self
            .ctx
            .conn
            .grab_pointer(
                false,
                self.ctx.root,
                EventMask::POINTER_MOTION | EventMask::BUTTON_RELEASE,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
                x11rb::NONE,
                cursor,
                x11rb::CURRENT_TIME,
            )
            .ok()
            .and_then(|c| c.reply().ok());
        if grabbed.map_or(false, |r| r.status == GrabStatus::SUCCESS) {
            self.drag = next;
        }
    }

    fn handle_drag_motion(&mut self, root_x: i16, root_y: i16) {
        match self.drag {
            DragState::Idle => {}
            DragState::Moving {
                client,
                start_root,
                orig,
            } => {
                let dx = (root_x - start_root.0) as i32;
                let dy = (root_y - start_root.1) as i32;
                self.set_client_rect(
                    client,
                    Rect::new(orig.x + dx, orig.y + dy, orig.w, orig.h),
                );
            }
            DragState::Resizing {
                client,
                start_root,
                orig,
            } => {
                let dx = (root_x - start_root.0) as i32;
                let dy = (root_y - start_root.1) as i32;
                let w = (orig.w + dx).max(self.config.min_width);
                let h = (orig.h + dy).max(self.config.min_height);
                self.set_client_rect(client, Rect::new(orig.x, orig.y, w, h));
            }
        }
    }

    fn handle_button_release(&mut self) {
        if !matches!(self.drag, DragState::Idle) {
            let _ = self.ctx.conn.ungrab_pointer(x11rb::CURRENT_TIME);
            self.drag = DragState::Idle;
        }
    }

    // --- protocol plumbing ---

    fn handle_configure_request(&mut self, e: ConfigureRequestEvent) {
        if let Some(id) = self.state.registry.find_window(e.window) {
            if self.state.registry.get(id).map(|c| c.is_dock).unwrap_or(false) {
                // docks do not get to pick their own geometry
                if let Some(rect) = self.state.registry.get(id).map(|c| c.rect) {
                    self.apply_rect(e.window, rect);
                }
                return;
            }
        }

        let aux = ConfigureWindowAux::from_configure_request(&e);
        let _ = self.ctx.conn.configure_window(e.window, &aux);

        // reconcile our record with whatever the server ended up with
        if let Some(id) = self.state.registry.find_window(e.window) {
            if let Some(geom) = self
                .ctx
                .conn
                .get_geometry(e.window)
                .ok()
                .and_then(|c| c.reply().ok())
            {
                let mut w = geom.width as i32;
                let mut h = geom.height as i32;
                self.clamp_size(&mut w, &mut h);
                if let Some(client) = self.state.registry.get_mut(id) {
                    client.rect = Rect::new(geom.x as i32, geom.y as i32, w, h);
                }
            }
        }
    }

    fn handle_client_message(&mut self, window: Window, type_: u32, data: [u32; 5]) {
        if type_ == self.ctx.atoms.WM_PROTOCOLS && data[0] == self.ctx.atoms.WM_DELETE_WINDOW {
            self.unmanage_window(window);
        } else if type_ == self.ctx.atoms._NET_CURRENT_DESKTOP {
            self.switch_workspace(data[0] as usize);
        } else if type_ == self.ctx.atoms._NET_ACTIVE_WINDOW {
            if let Some(id) = self.state.registry.find_window(window) {
                self.focus(id);
            }
        }
    }

    fn handle_strut_change(&mut self, window: Window) {
        let Some(id) = self.state.registry.find_window(window) else {
            return;
        };
        if !self.state.registry.get(id).map(|c| c.is_dock).unwrap_or(false) {
            return;
        }
        let strut = self.read_strut(window).unwrap_or_default();
        let (sw, sh) = self.screen_size();
        let rect = dock_geometry(&strut, sw, sh, &self.state.reserved);
        if let Some(client) = self.state.registry.get_mut(id) {
            client.strut = Some(strut);
            if let Some(rect) = rect {
                client.rect = rect;
            }
        }
        if let Some(rect) = rect {
            self.apply_rect(window, rect);
        }
        self.state.recompute_reserved();
        self.update_workarea();
        self.retile_all_tiling();
    }

    fn update_workarea(&self) {
        let (sw, sh) = self.screen_size();
        let r = &self.state.reserved;
        let workarea = [
            r.left as u32,
            r.top as u32,
            (sw - r.left - r.right).max(1) as u32,
            (sh - r.top - r.bottom).max(1) as u32,
        ];
        let _ = self.ctx.conn.change_property32(
            PropMode::REPLACE,
            self.ctx.root,
            self.ctx.atoms._NET_WORKAREA,
            AtomEnum::CARDINAL,
            &workarea,
        );
    }

    // --- property readers ---

    fn window_type_is_dock(&self, win: Window) -> bool {
        let reply = self
            .ctx
            .conn
            .get_property(
                false,
                win,
                self.ctx.atoms._NET_WM_WINDOW_TYPE,
                AtomEnum::ATOM,
                0,
                32,
            )
            .ok()
            .and_then(|c| c.reply().ok());
        // an unreadable property means "not a dock"
        let Some(prop) = reply else {
            return false;
        };
        prop.value32()
            .map(|mut atoms| atoms.any(|a| a == self.ctx.atoms._NET_WM_WINDOW_TYPE_DOCK))
            .unwrap_or(false)
    }

    fn read_strut(&self, win: Window) -> Option<Strut> {
        for (atom, len) in [
            (self.ctx.atoms._NET_WM_STRUT_PARTIAL, 12),
            (self.ctx.atoms._NET_WM_STRUT, 4),
        ] {
            let reply = self
                .ctx
                .conn
                .get_property(false, win, atom, AtomEnum::CARDINAL, 0, len)
                .ok()
                .and_then(|c| c.reply().ok());
            if let Some(prop) = reply {
                if let Some(values) = prop.value32() {
                    let values: Vec<u32> = values.collect();
                    if let Some(strut) = Strut::from_cardinals(&values) {
                        return Some(strut);
                    }
                }
            }
        }
        None
    }

    fn clamp_size(&self, w: &mut i32, h: &mut i32) {
        let (sw, sh) = self.screen_size();
        *w = (*w).clamp(self.config.min_width, sw * 95 / 100);
        *h = (*h).clamp(self.config.min_height, sh * 95 / 100);
    }
}
