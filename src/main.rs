mod core;
mod ewmh;
mod window;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt, CreateWindowAux, EventMask, WindowClass};

use crate::core::config::Config;
use crate::core::context::Context;
use crate::core::error::StartupError;
use crate::window::manager::WindowManager;
use crate::window::spawn;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Replace the existing window manager
    #[arg(long)]
    replace: bool,

    /// Path to an alternate configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// ICCCM 2.8 manager selection on WM_S{screen}. Owning it is what makes
/// `--replace` meaningful to other managers.
fn acquire_wm_selection(ctx: &Context, replace: bool) -> anyhow::Result<()> {
    let atom_name = format!("WM_S{}", ctx.screen_num);
    let wm_sn_atom = ctx
        .conn
        .intern_atom(false, atom_name.as_bytes())?
        .reply()?
        .atom;

    let owner = ctx.conn.get_selection_owner(wm_sn_atom)?.reply()?.owner;
    if owner != x11rb::NONE {
        if !replace {
            return Err(StartupError::SelectionOwned(atom_name).into());
        }
        info!("another manager owns {atom_name} (window {owner}), replacing");
    }

    // an unmapped input-only window owns the selection for our lifetime
    let selection_win = ctx.conn.generate_id()?;
    ctx.conn.create_window(
        x11rb::COPY_DEPTH_FROM_PARENT,
        selection_win,
        ctx.root,
        -1,
        -1,
        1,
        1,
        0,
        WindowClass::INPUT_ONLY,
        x11rb::COPY_FROM_PARENT,
        &CreateWindowAux::new().event_mask(EventMask::STRUCTURE_NOTIFY),
    )?;
    ctx.conn
        .set_selection_owner(selection_win, wm_sn_atom, x11rb::CURRENT_TIME)?;

    let new_owner = ctx.conn.get_selection_owner(wm_sn_atom)?.reply()?.owner;
    if new_owner != selection_win {
        return Err(StartupError::SelectionRefused(atom_name).into());
    }

    info!("acquired manager selection {atom_name}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref());

    info!("starting driftwm");

    let ctx = match Context::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("failed to connect to X server: {e}");
            return Err(e);
        }
    };
    info!("screen {} root {}", ctx.screen_num, ctx.root);

    if let Err(e) = acquire_wm_selection(&ctx, args.replace) {
        error!("{e}");
        return Err(e);
    }
    ctx.select_wm_inputs()?;
    crate::ewmh::setup::setup_hints(&ctx)?;

    let mut wm = WindowManager::new(ctx, config)?;
    wm.grab_bindings()?;
    wm.scan_windows()?;
    wm.startup_sync()?;
    spawn::autolaunch();

    // keep running across non-fatal X errors; only a dead connection ends us
    loop {
        match wm.run() {
            Ok(()) => break,
            Err(e) => {
                let msg = format!("{e}");
                if msg.contains("closed the connection")
                    || msg.contains("broken pipe")
                    || msg.contains("I/O error")
                {
                    error!("X server disconnected: {e}");
                    return Err(e);
                }
                error!("event loop error (continuing): {e}");
                std::thread::sleep(std::time::Duration::from_millis(100));
            }
        }
    }

    Ok(())
}
