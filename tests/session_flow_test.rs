//! End-to-end session behavior: move application, scoring, lifecycle.

use tictactoe_engine::{Mark, Mode, MoveError, Outcome, Position, Score, SeatKind, Session, Square};

fn multiplayer() -> Session {
    Session::new(Mode::Multiplayer, "Ann", "Ben")
}

fn play_x_win(session: &mut Session) {
    // X takes the top row; O answers in the middle row.
    for index in [0, 4, 1, 5, 2] {
        session.play(index).expect("legal move");
    }
}

#[test]
fn test_x_wins_top_row_and_scores() {
    let mut session = multiplayer();
    play_x_win(&mut session);

    assert_eq!(session.outcome(), Some(Outcome::Winner(Mark::X)));
    assert_eq!(session.score().wins(Mark::X), 1);
    assert_eq!(session.score().wins(Mark::O), 0);
    // The turn does not flip on a terminal move.
    assert_eq!(session.to_move(), Mark::X);
}

#[test]
fn test_terminal_session_rejects_moves() {
    let mut session = multiplayer();
    play_x_win(&mut session);
    let before = session.snapshot();

    assert_eq!(session.play(8), Err(MoveError::GameOver));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_occupied_square_rejected_without_turn_flip() {
    let mut session = multiplayer();
    session.play(0).expect("legal move");
    let before = session.snapshot();

    assert_eq!(
        session.play(0),
        Err(MoveError::SquareOccupied(Position::TopLeft))
    );
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.to_move(), Mark::O);
}

#[test]
fn test_turns_alternate_until_terminal() {
    let mut session = multiplayer();
    let expected = [Mark::X, Mark::O, Mark::X, Mark::O, Mark::X];
    for (index, mark) in [0, 4, 1, 5, 2].into_iter().zip(expected) {
        assert_eq!(session.to_move(), mark);
        session.play(index).expect("legal move");
    }
}

#[test]
fn test_draw_leaves_score_unchanged() {
    let mut session = multiplayer();
    // Fills the board as X O X / X O O / O X X - no line for either mark.
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        session.play(index).expect("legal move");
    }

    assert_eq!(session.outcome(), Some(Outcome::Draw));
    assert_eq!(session.score(), Score::default());
}

#[test]
fn test_o_win_scores_for_o() {
    let mut session = multiplayer();
    // O completes the middle row while X wanders.
    for index in [0, 3, 1, 4, 8, 5] {
        session.play(index).expect("legal move");
    }

    assert_eq!(session.outcome(), Some(Outcome::Winner(Mark::O)));
    assert_eq!(session.score().wins(Mark::O), 1);
    assert_eq!(session.score().wins(Mark::X), 0);
}

#[test]
fn test_restart_preserves_score_and_names() {
    let mut session = multiplayer();
    play_x_win(&mut session);
    session.restart();

    assert_eq!(session.outcome(), None);
    assert_eq!(session.to_move(), Mark::X);
    assert_eq!(session.mode(), Mode::Multiplayer);
    assert_eq!(session.name_of(Mark::X), "Ann");
    assert_eq!(session.name_of(Mark::O), "Ben");
    assert_eq!(session.score().wins(Mark::X), 1);
    for index in 0..9 {
        assert_eq!(session.cell_at(index), Ok(Square::Empty));
    }
}

#[test]
fn test_score_accumulates_across_games() {
    let mut session = multiplayer();
    for _ in 0..2 {
        play_x_win(&mut session);
        session.restart();
    }

    assert_eq!(session.score().wins(Mark::X), 2);
    assert_eq!(session.score().wins(Mark::O), 0);
}

#[test]
fn test_change_mode_zeroes_score() {
    let mut session = multiplayer();
    play_x_win(&mut session);
    session.change_mode(Mode::SinglePlayer, "Ann", "Computer");

    assert_eq!(session.score(), Score::default());
    assert_eq!(session.mode(), Mode::SinglePlayer);
    assert_eq!(session.seat(Mark::O).kind, SeatKind::Computer);
    assert_eq!(session.name_of(Mark::O), "Computer");
    assert_eq!(session.outcome(), None);
    assert_eq!(session.to_move(), Mark::X);
}
