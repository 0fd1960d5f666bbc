use anyhow::Result;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    ButtonIndex, ConnectionExt, EventMask, GrabMode, Keycode, ModMask, Window,
};

use crate::window::navigation::Direction;
use crate::window::WORKSPACE_COUNT;

// Keysym values from X11/keysymdef.h; latin-1 keysyms equal their codepoint.
pub const XK_RETURN: u32 = 0xff0d;
pub const XK_TAB: u32 = 0xff09;
pub const XK_SPACE: u32 = 0x20;
pub const XK_LEFT: u32 = 0xff51;
pub const XK_UP: u32 = 0xff52;
pub const XK_RIGHT: u32 = 0xff53;
pub const XK_DOWN: u32 = 0xff54;
pub const XK_A: u32 = 0x61;
pub const XK_D: u32 = 0x64;
pub const XK_E: u32 = 0x65;
pub const XK_F: u32 = 0x66;
pub const XK_H: u32 = 0x68;
pub const XK_J: u32 = 0x6a;
pub const XK_K: u32 = 0x6b;
pub const XK_L: u32 = 0x6c;
pub const XK_Q: u32 = 0x71;
pub const XK_T: u32 = 0x74;
pub const XK_1: u32 = 0x31;
pub const XK_9: u32 = 0x39;

// AZERTY top row, aliased to workspaces 1-9.
const FRENCH_TOP_ROW: [u32; WORKSPACE_COUNT] = [
    0x26, // ampersand
    0xe9, // eacute
    0x22, // quotedbl
    0x27, // apostrophe
    0x28, // parenleft
    0x2d, // minus
    0xe8, // egrave
    0x5f, // underscore
    0xe7, // ccedilla
];

/// What a grabbed key combination asks the manager to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SpawnTerminal,
    SpawnLauncher,
    CloseFocused,
    ToggleFullscreen,
    Cycle { forward: bool },
    ToggleTiling { all: bool },
    ToggleLayout { all: bool },
    FocusDir(Direction),
    SwapDir(Direction),
    SwitchWorkspace(usize),
    MoveToWorkspace(usize),
    Quit,
}

pub fn keysym_to_workspace(keysym: u32) -> Option<usize> {
    if (XK_1..=XK_9).contains(&keysym) {
        return Some((keysym - XK_1) as usize);
    }
    FRENCH_TOP_ROW.iter().position(|&k| k == keysym)
}

fn keysym_to_direction(keysym: u32) -> Option<Direction> {
    match keysym {
        XK_H | XK_LEFT => Some(Direction::Left),
        XK_J | XK_DOWN => Some(Direction::Down),
        XK_K | XK_UP => Some(Direction::Up),
        XK_L | XK_RIGHT => Some(Direction::Right),
        _ => None,
    }
}

/// Maps a pressed keysym (with the main modifier already verified by the
/// grab) plus the shift state to an action.
pub fn action_for(keysym: u32, shift: bool) -> Option<Action> {
    if keysym == XK_Q || keysym == XK_A {
        return Some(Action::CloseFocused);
    }
    if keysym == XK_TAB {
        return Some(Action::Cycle { forward: !shift });
    }
    if keysym == XK_T {
        return Some(Action::ToggleTiling { all: shift });
    }
    if keysym == XK_SPACE {
        return Some(Action::ToggleLayout { all: shift });
    }
    if let Some(dir) = keysym_to_direction(keysym) {
        return Some(if shift {
            Action::SwapDir(dir)
        } else {
            Action::FocusDir(dir)
        });
    }
    if let Some(ws) = keysym_to_workspace(keysym) {
        return Some(if shift {
            Action::MoveToWorkspace(ws)
        } else {
            Action::SwitchWorkspace(ws)
        });
    }
    if shift && keysym == XK_E {
        return Some(Action::Quit);
    }
    if !shift {
        match keysym {
            XK_RETURN => return Some(Action::SpawnTerminal),
            XK_D => return Some(Action::SpawnLauncher),
            XK_F => return Some(Action::ToggleFullscreen),
            _ => {}
        }
    }
    None
}

/// Keycode/keysym translation table, fetched once at startup.
pub struct KeyboardMap {
    first_keycode: Keycode,
    keysyms_per_keycode: u8,
    keysyms: Vec<u32>,
}

impl KeyboardMap {
    pub fn query(conn: &impl Connection) -> Result<Self> {
        let setup = conn.setup();
        let first = setup.min_keycode;
        let count = setup.max_keycode - first + 1;
        let reply = conn.get_keyboard_mapping(first, count)?.reply()?;
        Ok(Self {
            first_keycode: first,
            keysyms_per_keycode: reply.keysyms_per_keycode,
            keysyms: reply.keysyms,
        })
    }

    /// Unshifted keysym for a keycode (column 0), 0 when unmapped.
    pub fn keysym(&self, keycode: Keycode) -> u32 {
        let idx = (keycode.saturating_sub(self.first_keycode)) as usize
            * self.keysyms_per_keycode as usize;
        self.keysyms.get(idx).copied().unwrap_or(0)
    }

    pub fn keycode(&self, keysym: u32) -> Option<Keycode> {
        let per = self.keysyms_per_keycode as usize;
        if per == 0 {
            return None;
        }
        // prefer an unshifted (column 0) match
        for col in 0..per {
            for (i, chunk) in self.keysyms.chunks(per).enumerate() {
                if chunk.get(col) == Some(&keysym) {
                    return Some(self.first_keycode + i as Keycode);
                }
            }
        }
        None
    }
}

/// Both Super and Alt act as the main modifier.
pub const MAIN_MODS: [ModMask; 2] = [ModMask::M4, ModMask::M1];

fn bound_keysyms() -> Vec<u32> {
    let mut syms = vec![
        XK_RETURN, XK_D, XK_F, XK_TAB, XK_SPACE, XK_T, XK_H, XK_J, XK_K, XK_L, XK_LEFT, XK_DOWN,
        XK_UP, XK_RIGHT, XK_Q, XK_A, XK_E,
    ];
    syms.extend((0..WORKSPACE_COUNT as u32).map(|i| XK_1 + i));
    syms.extend(FRENCH_TOP_ROW);
    syms
}

pub fn grab_keys(conn: &impl Connection, root: Window, map: &KeyboardMap) -> Result<()> {
    // Lock/NumLock combinations are grabbed alongside every binding so the
    // bindings keep working with those toggled on.
    let ignored = [
        ModMask::default(),
        ModMask::LOCK,
        ModMask::M2,
        ModMask::LOCK | ModMask::M2,
    ];
    let shifts = [ModMask::default(), ModMask::SHIFT];
    for keysym in bound_keysyms() {
        let Some(keycode) = map.keycode(keysym) else {
            continue;
        };
        for base in MAIN_MODS {
            for extra in ignored {
                for shift in shifts {
                    conn.grab_key(
                        true,
                        root,
                        base | extra | shift,
                        keycode,
                        GrabMode::ASYNC,
                        GrabMode::ASYNC,
                    )?;
                }
            }
        }
    }
    Ok(())
}

pub fn grab_buttons(conn: &impl Connection, root: Window) -> Result<()> {
    for base in MAIN_MODS {
        for button in [ButtonIndex::M1, ButtonIndex::M3] {
            conn.grab_button(
                true,
                root,
                EventMask::BUTTON_PRESS,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
                x11rb::NONE,
                x11rb::NONE,
                button,
                base,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_and_azerty_row_map_to_workspaces() {
        assert_eq!(keysym_to_workspace(XK_1), Some(0));
        assert_eq!(keysym_to_workspace(XK_9), Some(8));
        assert_eq!(keysym_to_workspace(0x26), Some(0)); // ampersand
        assert_eq!(keysym_to_workspace(0xe7), Some(8)); // ccedilla
        assert_eq!(keysym_to_workspace(XK_F), None);
    }

    #[test]
    fn shift_flips_focus_to_swap_and_switch_to_move() {
        assert_eq!(action_for(XK_H, false), Some(Action::FocusDir(Direction::Left)));
        assert_eq!(action_for(XK_H, true), Some(Action::SwapDir(Direction::Left)));
        assert_eq!(action_for(XK_1, false), Some(Action::SwitchWorkspace(0)));
        assert_eq!(action_for(XK_1, true), Some(Action::MoveToWorkspace(0)));
        assert_eq!(action_for(XK_DOWN, false), Some(Action::FocusDir(Direction::Down)));
    }

    #[test]
    fn close_and_cycle_bindings() {
        assert_eq!(action_for(XK_Q, false), Some(Action::CloseFocused));
        assert_eq!(action_for(XK_A, true), Some(Action::CloseFocused));
        assert_eq!(action_for(XK_TAB, false), Some(Action::Cycle { forward: true }));
        assert_eq!(action_for(XK_TAB, true), Some(Action::Cycle { forward: false }));
        assert_eq!(action_for(XK_T, true), Some(Action::ToggleTiling { all: true }));
        assert_eq!(action_for(XK_SPACE, false), Some(Action::ToggleLayout { all: false }));
        assert_eq!(action_for(XK_SPACE, true), Some(Action::ToggleLayout { all: true }));
        assert_eq!(action_for(XK_E, true), Some(Action::Quit));
        assert_eq!(action_for(XK_E, false), None);
    }

    #[test]
    fn keycode_prefers_unshifted_column() {
        let map = KeyboardMap {
            first_keycode: 8,
            keysyms_per_keycode: 2,
            // keycode 8: [a, q], keycode 9: [q, a]
            keysyms: vec![XK_A, XK_Q, XK_Q, XK_A],
        };
        assert_eq!(map.keycode(XK_Q), Some(9));
        assert_eq!(map.keycode(XK_A), Some(8));
        assert_eq!(map.keysym(9), XK_Q);
        assert_eq!(map.keycode(XK_RETURN), None);
    }

    #[test]
    fn empty_keyboard_map_resolves_nothing() {
        let map = KeyboardMap {
            first_keycode: 8,
            keysyms_per_keycode: 0,
            keysyms: Vec::new(),
        };
        assert_eq!(map.keycode(XK_RETURN), None);
        assert_eq!(map.keysym(10), 0);
    }
}
