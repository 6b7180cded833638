use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use log::{info, warn};
use maze_game::{generate_seeded, Cell, Coord, Dir, Game};
use rand::Rng;
use std::fs::File;
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

const DEFAULT_ROWS: usize = 21;
const DEFAULT_COLS: usize = 21;
const MAX_SIDE: usize = 1001;
const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Goal,
    Hint,
    Wall,
    Empty,
}

#[derive(Clone, Copy, PartialEq)]
struct Tile {
    glyph: Glyph,
    color: Color,
}

struct Settings {
    rows: usize,
    cols: usize,
    seed: Option<u64>,
}

struct Renderer {
    last: Vec<Tile>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            last: vec![
                Tile {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                rows * cols
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn main() -> io::Result<()> {
    init_logging();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

/// Logs go to `MAZE_LOG_FILE` only; the terminal is owned by the board.
fn init_logging() {
    let Ok(path) = std::env::var("MAZE_LOG_FILE") else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(err) => eprintln!("cannot open log file {}: {}", path, err),
    }
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let settings = read_settings();
    let mut maze_index = 0u64;
    let mut game = new_game(&settings, maze_index)?;
    let mut renderer = Renderer::new(settings.rows, settings.cols);

    loop {
        render(stdout, &game, &mut renderer)?;

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('n') => {
                    maze_index += 1;
                    game = new_game(&settings, maze_index)?;
                    renderer.needs_full = true;
                }
                KeyCode::Char('p') => {
                    if let Err(err) = game.toggle_hint() {
                        warn!("hint unavailable: {}", err);
                    }
                }
                code => {
                    if let Some(dir) = dir_for_key(code) {
                        game.try_move(dir);
                    }
                }
            },
            Event::Resize(_, _) => renderer.needs_full = true,
            _ => {}
        }
    }
}

fn read_settings() -> Settings {
    let rows = env_usize("MAZE_ROWS").map(clamp_side).unwrap_or(DEFAULT_ROWS);
    let cols = env_usize("MAZE_COLS").map(clamp_side).unwrap_or(DEFAULT_COLS);
    let seed = std::env::var("MAZE_SEED")
        .ok()
        .and_then(|v| v.parse::<u64>().ok());
    Settings { rows, cols, seed }
}

fn clamp_side(side: usize) -> usize {
    side.min(MAX_SIDE)
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|v| v.parse::<usize>().ok())
}

fn new_game(settings: &Settings, maze_index: u64) -> io::Result<Game> {
    let seed = match settings.seed {
        Some(base) => base.wrapping_add(maze_index),
        None => rand::thread_rng().gen(),
    };
    info!(
        "maze #{} ({}x{}) seed {}",
        maze_index, settings.rows, settings.cols, seed
    );
    let grid = generate_seeded(settings.rows, settings.cols, seed)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    Ok(Game::new(grid))
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}

fn render(stdout: &mut Stdout, game: &Game, renderer: &mut Renderer) -> io::Result<()> {
    let rows = game.grid().rows();
    let cols = game.grid().cols();
    let term = terminal::size()?;

    stdout.queue(MoveTo(0, 0))?;
    let Some((origin_x, origin_y)) = board_origin(term, rows, cols) else {
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(Print(too_small_message(term, rows, cols)))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    };

    if (origin_x, origin_y) != (renderer.origin_x, renderer.origin_y) {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let (hud, hud_color) = hud_line(game);
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(hud_color))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for (pos, _) in game.grid().iter() {
        let tile = tile_for(game, pos);
        let idx = pos.row * cols + pos.col;
        if renderer.needs_full || tile != renderer.last[idx] {
            renderer.last[idx] = tile;
            draw_tile(stdout, renderer, pos, tile)?;
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

/// Board footprint in terminal cells: `CELL_W` columns per cell, plus the HUD
/// line and one spare row. `None` when it cannot be addressed by the terminal.
fn board_size(rows: usize, cols: usize) -> Option<(u16, u16)> {
    let w = u16::try_from(cols.checked_mul(CELL_W)?).ok()?;
    let h = u16::try_from(rows.checked_add(2)?).ok()?;
    Some((w, h))
}

/// Top-left corner of the centered board, below the HUD line.
fn board_origin((term_w, term_h): (u16, u16), rows: usize, cols: usize) -> Option<(u16, u16)> {
    let (w, h) = board_size(rows, cols)?;
    if term_w < w || term_h < h {
        return None;
    }
    Some(((term_w - w) / 2, (term_h - h) / 2 + 1))
}

fn too_small_message((term_w, term_h): (u16, u16), rows: usize, cols: usize) -> String {
    match board_size(rows, cols) {
        Some((w, h)) => format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            w, h, term_w, term_h
        ),
        None => format!("A {}x{} maze does not fit any terminal.", rows, cols),
    }
}

fn hud_line(game: &Game) -> (String, Color) {
    if game.is_won() {
        (
            format!("You win in {} moves!  (n new maze, q quit)", game.moves()),
            Color::Green,
        )
    } else {
        (
            format!(
                "Moves: {}  Hint: {}  (arrows/hjkl move, p path, n new, q quit)",
                game.moves(),
                hint_label(game)
            ),
            Color::White,
        )
    }
}

fn hint_label(game: &Game) -> String {
    match game.hint() {
        None => "off".to_string(),
        Some(path) if path.is_empty() => "no route".to_string(),
        Some(path) => format!("{} steps", path.steps()),
    }
}

fn tile_for(game: &Game, pos: Coord) -> Tile {
    if pos == game.player() {
        return Tile {
            glyph: Glyph::Player,
            color: Color::Blue,
        };
    }
    if pos == game.goal() {
        return Tile {
            glyph: Glyph::Goal,
            color: Color::Red,
        };
    }
    if game.hint().map_or(false, |path| path.contains(pos)) {
        return Tile {
            glyph: Glyph::Hint,
            color: Color::Yellow,
        };
    }
    match game.grid().get(pos) {
        Some(Cell::Open) => Tile {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
        _ => Tile {
            glyph: Glyph::Wall,
            color: Color::DarkGrey,
        },
    }
}

fn draw_tile(stdout: &mut Stdout, renderer: &Renderer, pos: Coord, tile: Tile) -> io::Result<()> {
    let text = match tile.glyph {
        Glyph::Player => "●",
        Glyph::Goal => "◎",
        Glyph::Hint => "· ",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
    };
    // `board_origin` has checked that the whole board fits in u16 coordinates.
    let x_pos = renderer.origin_x + (pos.col * CELL_W) as u16;
    let y_pos = renderer.origin_y + pos.row as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(tile.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
