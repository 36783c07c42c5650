use twotris::core::{Engine, EngineConfig, Game, GameSnapshot, Grid, Piece, ShapeKind, SimpleRng};
use twotris::term::{FrameBuffer, GameView, Rgb, Viewport};
use twotris::types::{ColorId, Command, FlowState};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            all.push(fb.get(x, y).map_or(' ', |g| g.ch));
        }
        all.push('\n');
    }
    all
}

/// Playing snapshot with both pieces hanging above the board.
fn playing_snapshot(grid: Grid) -> GameSnapshot {
    let config = EngineConfig::default();
    let left = Piece::new(ShapeKind::O, ColorId::Red, 1, -5);
    let right = Piece::new(ShapeKind::O, ColorId::Blue, 6, -5);
    let engine = Engine::from_parts(config, grid, left, right, SimpleRng::new(1));
    GameSnapshot {
        flow: FlowState::Playing,
        episode_id: 1,
        engine: Some(engine.snapshot()),
    }
}

#[test]
fn term_view_renders_border_corners() {
    let snap = playing_snapshot(Grid::new(20, 10));
    let view = GameView::default();

    // With cell_w=2 and cell_h=1 the 10x20 board plus border is 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).map(|g| g.ch), Some('┌'));
    assert_eq!(fb.get(21, 0).map(|g| g.ch), Some('┐'));
    assert_eq!(fb.get(0, 21).map(|g| g.ch), Some('└'));
    assert_eq!(fb.get(21, 21).map(|g| g.ch), Some('┘'));
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut grid = Grid::new(20, 10);
    grid.set(0, 19, Some(ColorId::Green));
    let snap = playing_snapshot(grid);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let glyph = fb.get(x, y0).expect("inside viewport");
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg.g, 255);
    }
    assert_eq!(fb.get(x0 + 2, y0).map(|g| g.ch), Some('·'));
}

#[test]
fn term_view_draws_both_pieces() {
    let mut game = Game::new(EngineConfig::default().with_seed(5));
    game.frame(16, &[Command::Start]);
    let snap = game.snapshot();
    let engine = snap.engine.clone().expect("playing");

    // The 22x22 board fills the viewport exactly.
    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    for piece in [&engine.left, &engine.right] {
        for (x, y) in piece.cells() {
            let glyph = fb.get(1 + x as u16 * 2, 1 + y as u16).expect("on board");
            assert_eq!(glyph.ch, '█');
            assert_eq!(glyph.style.fg, Rgb::from(piece.color));
        }
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = playing_snapshot(Grid::new(20, 10));
    if let Some(engine) = snap.engine.as_mut() {
        engine.score = 1234;
        engine.multiplier = 3;
        engine.power_active = true;
        engine.power_remaining_ms = 4_200;
    }

    let all = screen_text(&GameView::default().render(&snap, Viewport::new(60, 22)));
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("MULTIPLIER"));
    assert!(all.contains("x3"));
    assert!(all.contains("5s"));
}

#[test]
fn term_view_centers_board_on_tall_viewports() {
    let snap = playing_snapshot(Grid::new(20, 10));
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4
    assert_eq!(fb.get(0, 4).map(|g| g.ch), Some('┌'));
}

#[test]
fn term_view_shows_menu_and_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(60, 24);

    let menu = screen_text(&view.render(&GameSnapshot::default(), vp));
    assert!(menu.contains("T W O T R I S"));
    assert!(menu.contains("ENTER  start"));

    let mut snap = playing_snapshot(Grid::new(20, 10));
    assert!(!screen_text(&view.render(&snap, vp)).contains("PAUSED"));

    snap.flow = FlowState::Paused;
    assert!(screen_text(&view.render(&snap, vp)).contains("PAUSED"));

    snap.flow = FlowState::GameOver;
    let over = screen_text(&view.render(&snap, vp));
    assert!(over.contains("GAME OVER"));
    assert!(over.contains("ENTER restart"));
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = playing_snapshot(Grid::new(20, 10));
    let view = GameView::default();
    let mut fb = FrameBuffer::new(1, 1);

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    assert_eq!(fb, view.render(&snap, Viewport::new(40, 24)));
}
