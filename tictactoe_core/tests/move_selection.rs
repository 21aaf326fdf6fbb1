#[cfg(test)]
mod tests {
    use tictactoe_core::{
        select_move, select_move_for, select_move_with_stats, Algorithm, Board, EngineError,
        GameResult, Player, SearchConfig,
    };

    fn config() -> SearchConfig {
        SearchConfig::default()
            .with_simulations(2000)
            .with_seed(2024)
    }

    fn from_wire(cells: [Option<&str>; 9]) -> Board {
        Board::from_symbols(&cells).unwrap()
    }

    #[test]
    fn test_finished_boards_have_no_legal_moves() {
        let cases = [
            ("XXX/OO./...", GameResult::XWins),
            ("XX./OOO/X..", GameResult::OWins),
            ("XOX/XOO/OXX", GameResult::Draw),
        ];
        for (board, expected) in cases {
            let board: Board = board.parse().unwrap();
            for algorithm in Algorithm::ALL {
                let err = select_move(&board, board.to_move(), algorithm.name(), &config())
                    .unwrap_err();
                assert_eq!(err, EngineError::NoLegalMoves { result: expected });
            }
        }
    }

    #[test]
    fn test_unknown_algorithm() {
        let board = Board::new();
        for name in ["", "random", "minimaxx", "alpha beta"] {
            let err = select_move(&board, Player::X, name, &config()).unwrap_err();
            assert_eq!(err, EngineError::UnknownAlgorithm(name.to_string()));
            assert_eq!(err.kind(), "UnknownAlgorithm");
        }
    }

    #[test]
    fn test_invalid_boards_are_rejected_on_parse() {
        // O moved twice before X's second mark
        let err = Board::from_symbols(&[
            Some("O"),
            Some("O"),
            None,
            Some("X"),
            None,
            None,
            None,
            None,
            None,
        ])
        .unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoard { .. }));

        let err = Board::from_symbols(&[Some("X"); 3]).unwrap_err();
        assert!(err.to_string().contains("expected 9 cells"));
    }

    #[test]
    fn test_wrong_player_is_rejected() {
        let board = from_wire([Some("X"), None, None, None, None, None, None, None, None]);
        let err = select_move(&board, Player::X, "minimax", &config()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoard { .. }));
    }

    #[test]
    fn test_wire_board_win_and_block() {
        let win = from_wire([
            Some("X"),
            Some("X"),
            None,
            Some("O"),
            Some("O"),
            None,
            None,
            None,
            None,
        ]);
        let block = from_wire([
            Some("O"),
            Some("O"),
            None,
            None,
            Some("X"),
            None,
            None,
            None,
            Some("X"),
        ]);
        for algorithm in Algorithm::ALL {
            let (mv, _) = select_move_for(&win, algorithm.name(), &config()).unwrap();
            assert_eq!(mv.position, 2, "{algorithm} win");
            let (mv, _) = select_move_for(&block, algorithm.name(), &config()).unwrap();
            assert_eq!(mv.position, 2, "{algorithm} block");
        }
    }

    #[test]
    fn test_selected_cell_is_always_empty() {
        let board: Board = "X.O/.X./O..".parse().unwrap();
        for algorithm in Algorithm::ALL {
            let mv = select_move(&board, Player::X, algorithm.name(), &config()).unwrap();
            assert_eq!(board.get(mv.position), Some(tictactoe_core::Cell::Empty));
        }
    }

    #[test]
    fn test_stats_are_reported() {
        let board = Board::new();
        let (_, stats) = select_move_with_stats(&board, Player::X, "mcts", &config()).unwrap();
        assert_eq!(stats.simulations, 2000);
        assert!(stats.nodes > 1);
        assert!(stats.depth >= 1);

        let (_, stats) = select_move_with_stats(&board, Player::X, "ids", &config()).unwrap();
        assert_eq!(stats.depth, 9);
        assert_eq!(stats.simulations, 0);
    }
}
