/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. `paint` draws the world through `FieldCanvas` into the `front` buffer
///   2. HUD, message bar, help bar and overlays are composed around it
///   3. Each cell is compared with the `back` buffer (previous frame)
///   4. Only changed cells are emitted, batched with `queue!`, one flush
///   5. Swap front/back
///
/// One grid cell is two terminal columns by one row.

use std::io::{self, BufWriter, Write};
use std::ops::Range;

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::color::Rgb;
use crate::sim::world::{Phase, WorldState};
use super::paint::{self, Surface};
use super::prompt::NameInput;

// ── TermCell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct TermCell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl TermCell {
    /// Everything outside the field. Also used for `Clear`, so row gaps on
    /// VTE terminals match the cells.
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: TermCell = TermCell { ch: ' ', fg: Color::White, bg: TermCell::BASE_BG };

    /// Never equal to a real cell: forces a full repaint.
    const INVALID: TermCell = TermCell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        let bg = if bg == Color::Reset { Self::BASE_BG } else { bg };
        TermCell { ch, fg, bg }
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── FrameBuffer: a 2D grid of TermCells ──

#[derive(Debug)]
struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<TermCell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![TermCell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![TermCell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(TermCell::BLANK);
    }

    fn invalidate(&mut self) {
        self.cells.fill(TermCell::INVALID);
    }

    fn set(&mut self, x: usize, y: usize, cell: TermCell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> TermCell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            TermCell::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, TermCell::new(ch, fg, bg));
        }
    }

    fn fill(&mut self, x: usize, y: usize, w: usize, h: usize, bg: Color) {
        for row in y..y + h {
            for col in x..x + w {
                self.set(col, row, TermCell::new(' ', Color::White, bg));
            }
        }
    }
}

// ── FieldCanvas: the raster surface the painter draws on ──

const CELL_W: usize = 2;

const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
const MAP_COL: usize = 0;

struct FieldCanvas<'a> {
    buf: &'a mut FrameBuffer,
    cell_size: i32,
    col0: usize,
    row0: usize,
}

impl FieldCanvas<'_> {
    /// Grid cells touched by a rect in surface units.
    fn span(&self, x: i32, y: i32, w: i32, h: i32) -> (Range<i32>, Range<i32>) {
        if w <= 0 || h <= 0 {
            return (0..0, 0..0);
        }
        let cs = self.cell_size;
        (
            x.div_euclid(cs)..(x + w - 1).div_euclid(cs) + 1,
            y.div_euclid(cs)..(y + h - 1).div_euclid(cs) + 1,
        )
    }

    fn put(&mut self, gx: i32, gy: i32, left: TermCell, right: TermCell) {
        if gx < 0 || gy < 0 { return; }
        let col = self.col0 + gx as usize * CELL_W;
        let row = self.row0 + gy as usize;
        self.buf.set(col, row, left);
        self.buf.set(col + 1, row, right);
    }
}

impl Surface for FieldCanvas<'_> {
    fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let bg = to_color(Rgb::WHITE);
        let blank = TermCell::new(' ', Color::White, bg);
        let (cols, rows) = self.span(x, y, w, h);
        for gy in rows {
            for gx in cols.clone() {
                self.put(gx, gy, blank, blank);
            }
        }
    }

    /// The inset square shows as a full block plus a left half block: the
    /// white sliver on the right is the gap between neighbours.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb) {
        let fg = to_color(color);
        let bg = to_color(Rgb::WHITE);
        let (cols, rows) = self.span(x, y, w, h);
        for gy in rows {
            for gx in cols.clone() {
                self.put(gx, gy, TermCell::new('█', fg, bg), TermCell::new('▌', fg, bg));
            }
        }
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(TermCell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        self.back.invalidate();
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &WorldState, prompt: &NameInput) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            self.back.invalidate();
            queue!(self.writer, SetBackgroundColor(TermCell::BASE_BG), Clear(ClearType::All))?;
        }

        if self.last_phase != Some(world.phase) {
            self.back.invalidate();
            self.last_phase = Some(world.phase);
        }

        self.front.clear();
        self.compose_hud(world);
        paint::paint(world, &mut FieldCanvas {
            buf: &mut self.front,
            cell_size: world.field.cell_size,
            col0: MAP_COL,
            row0: MAP_ROW,
        });
        self.compose_bars(world);

        if prompt.is_open() {
            self.compose_prompt(world, prompt);
        } else if world.paused {
            self.compose_pause_overlay(world);
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = TermCell::BASE_BG;
        let mut cursor_at: Option<(usize, usize)> = None;

        // Explicit colors, not ResetColor: the terminal default may differ
        // from BASE_BG.
        queue!(self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(TermCell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    continue;
                }

                if cursor_at != Some((x, y)) {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                }
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }
                queue!(self.writer, Print(cell.ch))?;
                cursor_at = Some((x + 1, y));
            }
        }

        self.writer.flush()
    }

    // ── Compose ──

    fn field_size(w: &WorldState) -> (usize, usize) {
        (
            w.field.cols().max(0) as usize * CELL_W,
            w.field.rows().max(0) as usize,
        )
    }

    fn compose_hud(&mut self, w: &WorldState) {
        let hud_bg = Color::Rgb { r: 20, g: 20, b: 60 };
        self.front.fill(0, HUD_ROW, self.front.width, 1, hud_bg);
        let hud = format!(" {}   Name: {}", w.score_line(), w.name);
        self.front.put_str(0, HUD_ROW, &hud, Color::White, hud_bg);
    }

    fn compose_bars(&mut self, w: &WorldState) {
        let (cols, rows) = Self::field_size(w);

        let msg_row = MAP_ROW + rows + 1;
        if !w.message.is_empty() {
            let bar = Color::Rgb { r: 200, g: 180, b: 50 };
            self.front.fill(0, msg_row, cols, 1, bar);
            self.front.put_str(0, msg_row, &format!(" ◈ {} ", w.message), Color::Black, bar);
        }

        let help_row = MAP_ROW + rows + 3;
        let help = if w.phase == Phase::Won {
            " Enter: New run  N: Name  Q: Quit"
        } else {
            " ←↑↓→/WASD: Steer  P: Pause  N: Name  Q: Quit"
        };
        self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
    }

    /// A dark box centered on the field; returns its top-left corner.
    fn compose_box(&mut self, w: &WorldState, box_w: usize, box_h: usize) -> (usize, usize) {
        let (cols, rows) = Self::field_size(w);
        let box_w = box_w.min(cols);
        let box_h = box_h.min(rows);
        let x = MAP_COL + cols.saturating_sub(box_w) / 2;
        let y = MAP_ROW + rows.saturating_sub(box_h) / 2;
        self.front.fill(x, y, box_w, box_h, Color::Rgb { r: 40, g: 40, b: 40 });
        (x, y)
    }

    fn compose_pause_overlay(&mut self, w: &WorldState) {
        let dim = Color::Rgb { r: 40, g: 40, b: 40 };
        let hdr = Color::Rgb { r: 255, g: 220, b: 50 };
        let key_c = Color::Rgb { r: 100, g: 200, b: 255 };

        let (x, y) = self.compose_box(w, 36, 6);
        self.front.put_str(x + 13, y + 1, "PAUSED", hdr, dim);
        self.front.put_str(x + 2, y + 3, "P / Enter / arrow   Play", key_c, dim);
        self.front.put_str(x + 2, y + 4, "N                   Name", key_c, dim);
    }

    fn compose_prompt(&mut self, w: &WorldState, prompt: &NameInput) {
        let dim = Color::Rgb { r: 40, g: 40, b: 40 };
        let hdr = Color::Rgb { r: 255, g: 220, b: 50 };
        let desc_c = Color::Rgb { r: 180, g: 180, b: 180 };

        let (x, y) = self.compose_box(w, 36, 7);
        let title = format!("Your name (up to {} letters)", prompt.max_len());
        self.front.put_str(x + 2, y + 1, &title, hdr, dim);

        let field_bg = Color::Rgb { r: 70, g: 70, b: 90 };
        self.front.fill(x + 2, y + 3, prompt.max_len() + 2, 1, field_bg);
        self.front.put_str(x + 3, y + 3, &format!("{}_", prompt.text()), Color::White, field_bg);

        self.front.put_str(x + 2, y + 5, "Enter: OK   Esc: Cancel", desc_c, dim);
    }
}
