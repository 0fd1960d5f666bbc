use anyhow::Result;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    ChangeWindowAttributesAux, Colormap, ConnectionExt, EventMask, Window,
};
use x11rb::rust_connection::RustConnection;
use tracing::warn;

use crate::core::error::StartupError;
use crate::ewmh::atoms::AtomCollection;

/// Everything needed to talk to the X server: the connection, the screen
/// we manage, and the interned atoms.
pub struct Context {
    pub conn: RustConnection,
    pub screen_num: usize,
    pub root: Window,
    pub atoms: AtomCollection,
    pub screen_width: u16,
    pub screen_height: u16,
    pub default_colormap: Colormap,
    pub black_pixel: u32,
}

impl Context {
    pub fn new() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;
        let default_colormap = screen.default_colormap;
        let black_pixel = screen.black_pixel;

        let atoms = AtomCollection::new(&conn)?.reply()?;

        Ok(Self {
            conn,
            screen_num,
            root,
            atoms,
            screen_width,
            screen_height,
            default_colormap,
            black_pixel,
        })
    }

    /// Claims substructure redirection on the root window. Only one client
    /// may hold it; a BadAccess here means another WM is running.
    pub fn select_wm_inputs(&self) -> Result<()> {
        let values = ChangeWindowAttributesAux::new().event_mask(
            EventMask::SUBSTRUCTURE_REDIRECT
                | EventMask::SUBSTRUCTURE_NOTIFY
                | EventMask::BUTTON_PRESS
                | EventMask::ENTER_WINDOW
                | EventMask::POINTER_MOTION
                | EventMask::KEY_RELEASE,
        );
        self.conn
            .change_window_attributes(self.root, &values)?
            .check()
            .map_err(|_| StartupError::WmAlreadyRunning)?;
        Ok(())
    }

    /// Resolves a named color in the default colormap, falling back to
    /// black on failure.
    pub fn alloc_color(&self, name: &str) -> u32 {
        let reply = self
            .conn
            .alloc_named_color(self.default_colormap, name.as_bytes())
            .ok()
            .and_then(|cookie| cookie.reply().ok());
        match reply {
            Some(r) => r.pixel,
            None => {
                warn!("could not allocate color {name:?}, using black");
                self.black_pixel
            }
        }
    }
}
