use anyhow::Result;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt, Cursor};

// Glyph indices into the standard X "cursor" font.
const XC_FLEUR: u16 = 52;
const XC_SIZING: u16 = 120;

/// The two grab cursors used during interactive move/resize.
pub struct Cursors {
    pub move_: Cursor,
    pub resize: Cursor,
}

impl Cursors {
    pub fn new(conn: &impl Connection) -> Result<Self> {
        let font = conn.generate_id()?;
        conn.open_font(font, b"cursor")?;
        let move_ = create_glyph(conn, font, XC_FLEUR)?;
        let resize = create_glyph(conn, font, XC_SIZING)?;
        conn.close_font(font)?;
        Ok(Self { move_, resize })
    }
}

fn create_glyph(conn: &impl Connection, font: u32, glyph: u16) -> Result<Cursor> {
    let cursor = conn.generate_id()?;
    conn.create_glyph_cursor(
        cursor,
        font,
        font,
        glyph,
        glyph + 1,
        0,
        0,
        0,
        u16::MAX,
        u16::MAX,
        u16::MAX,
    )?;
    Ok(cursor)
}
