use x11rb::protocol::xproto::Window;

use crate::window::layout::Rect;
use crate::window::strut::Strut;
use crate::window::WORKSPACE_COUNT;

/// Which workspace a client belongs to. Docks are global: visible on every
/// workspace and excluded from tiling, focus navigation, and swapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workspace {
    Index(usize),
    Global,
}

impl Workspace {
    pub fn index(self) -> Option<usize> {
        match self {
            Workspace::Index(i) => Some(i),
            Workspace::Global => None,
        }
    }

    pub fn is_visible_on(self, current: usize) -> bool {
        match self {
            Workspace::Index(i) => i == current,
            Workspace::Global => true,
        }
    }
}

pub fn workspace_in_range(ws: usize) -> bool {
    ws < WORKSPACE_COUNT
}

/// One managed window.
#[derive(Debug, Clone)]
pub struct Client {
    pub window: Window,
    pub rect: Rect,
    pub workspace: Workspace,
    pub is_dock: bool,
    pub strut: Option<Strut>,
}

impl Client {
    pub fn new(window: Window, rect: Rect, workspace: Workspace) -> Self {
        Self {
            window,
            rect,
            workspace,
            is_dock: false,
            strut: None,
        }
    }

    pub fn dock(window: Window, rect: Rect, strut: Strut) -> Self {
        Self {
            window,
            rect,
            workspace: Workspace::Global,
            is_dock: true,
            strut: Some(strut),
        }
    }
}
