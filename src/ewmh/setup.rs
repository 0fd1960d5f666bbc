use anyhow::Result;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{AtomEnum, ConnectionExt, CreateWindowAux, PropMode, WindowClass};
use x11rb::wrapper::ConnectionExt as _;

use crate::core::context::Context;
use crate::window::WORKSPACE_COUNT;

/// Advertises EWMH support: creates the supporting-WM-check window and
/// publishes `_NET_SUPPORTED` plus the initial desktop properties on the
/// root.
pub fn setup_hints(ctx: &Context) -> Result<()> {
    let check_win = ctx.conn.generate_id()?;
    ctx.conn.create_window(
        x11rb::COPY_DEPTH_FROM_PARENT,
        check_win,
        ctx.root,
        -1,
        -1,
        1,
        1,
        0,
        WindowClass::INPUT_OUTPUT,
        0,
        &CreateWindowAux::new(),
    )?;

    ctx.conn.change_property32(
        PropMode::REPLACE,
        check_win,
        ctx.atoms._NET_SUPPORTING_WM_CHECK,
        AtomEnum::WINDOW,
        &[check_win],
    )?;
    ctx.conn.change_property8(
        PropMode::REPLACE,
        check_win,
        ctx.atoms._NET_WM_NAME,
        ctx.atoms.UTF8_STRING,
        b"driftwm",
    )?;
    ctx.conn.change_property32(
        PropMode::REPLACE,
        ctx.root,
        ctx.atoms._NET_SUPPORTING_WM_CHECK,
        AtomEnum::WINDOW,
        &[check_win],
    )?;

    let supported = [
        ctx.atoms._NET_SUPPORTED,
        ctx.atoms._NET_SUPPORTING_WM_CHECK,
        ctx.atoms._NET_WM_NAME,
        ctx.atoms._NET_NUMBER_OF_DESKTOPS,
        ctx.atoms._NET_CURRENT_DESKTOP,
        ctx.atoms._NET_ACTIVE_WINDOW,
        ctx.atoms._NET_WM_WINDOW_TYPE,
        ctx.atoms._NET_WM_WINDOW_TYPE_NORMAL,
        ctx.atoms._NET_WM_WINDOW_TYPE_DOCK,
        ctx.atoms._NET_WM_STATE,
        ctx.atoms._NET_WM_STATE_ABOVE,
        ctx.atoms._NET_WM_STRUT,
        ctx.atoms._NET_WM_STRUT_PARTIAL,
        ctx.atoms._NET_WORKAREA,
    ];
    ctx.conn.change_property32(
        PropMode::REPLACE,
        ctx.root,
        ctx.atoms._NET_SUPPORTED,
        AtomEnum::ATOM,
        &supported,
    )?;

    ctx.conn.change_property32(
        PropMode::REPLACE,
        ctx.root,
        ctx.atoms._NET_NUMBER_OF_DESKTOPS,
        AtomEnum::CARDINAL,
        &[WORKSPACE_COUNT as u32],
    )?;
    ctx.conn.change_property32(
        PropMode::REPLACE,
        ctx.root,
        ctx.atoms._NET_CURRENT_DESKTOP,
        AtomEnum::CARDINAL,
        &[0],
    )?;

    Ok(())
}
