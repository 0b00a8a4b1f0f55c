//! 随机对局的性质测试

use draughts::{
    Board, CapturePolicy, MatchPhase, MatchState, MoveGenerator, RuleConfig, RuleViolation, Side,
    Square,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn manual_config(policy: CapturePolicy) -> RuleConfig {
    RuleConfig {
        capture_policy: policy,
        auto_reset: false,
        ..RuleConfig::default()
    }
}

fn policy_strategy() -> impl Strategy<Value = CapturePolicy> {
    prop_oneof![Just(CapturePolicy::AnyCapture), Just(CapturePolicy::LongestChain)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// 合法走法总能执行，且起点总是走子方的棋子
    #[test]
    fn prop_legal_moves_always_apply(seed in any::<u64>(), plies in 1..=120usize, policy in policy_strategy()) {
        let mut game = MatchState::with_config(manual_config(policy)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..plies {
            let moves = game.legal_moves();
            if moves.is_empty() {
                prop_assert!(game.is_game_over());
                break;
            }

            for mv in &moves {
                prop_assert!(game.board().piece_at(mv.from.x as i32, mv.from.y as i32).unwrap().belongs_to(game.current_turn()));
            }
            if let Some(pos) = game.must_continue() {
                prop_assert!(moves.iter().all(|mv| mv.from == pos));
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            let result = game.apply_move(mv);
            prop_assert!(
                !matches!(result, Err(RuleViolation::IllegalMove { .. })),
                "generated move {} rejected", mv
            );
            prop_assert!(result.is_ok());
        }
    }

    /// 有吃必吃：存在吃子走法时，合法走法全部是吃子走法
    #[test]
    fn prop_mandatory_capture(seed in any::<u64>(), plies in 1..=80usize) {
        let mut game = MatchState::with_config(manual_config(CapturePolicy::AnyCapture)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..plies {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }

            let side = game.current_turn();
            let captures = MoveGenerator::capture_moves(game.board(), side);
            if !captures.is_empty() {
                for mv in &moves {
                    prop_assert!(!MoveGenerator::captured_squares(game.board(), *mv).is_empty());
                }
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            game.apply_move(mv).unwrap();
        }
    }

    /// 吃子清空被吃的格子，得分按兵 1 王 3 累加
    #[test]
    fn prop_capture_scoring(seed in any::<u64>(), plies in 1..=150usize) {
        let mut game = MatchState::with_config(manual_config(CapturePolicy::AnyCapture)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..plies {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }

            let mover = game.current_turn();
            let before = game.score(mover);
            let mv = moves[rng.gen_range(0..moves.len())];
            let jumped = MoveGenerator::captured_squares(game.board(), mv);
            let expected: u32 = jumped
                .iter()
                .map(|pos| game.board().piece_at(pos.x as i32, pos.y as i32).unwrap().points())
                .sum();

            let outcome = game.apply_move(mv).unwrap();
            prop_assert_eq!(outcome.points, expected);
            prop_assert_eq!(outcome.captured.len(), jumped.len());
            prop_assert_eq!(game.score(mover), before + expected);
            for pos in jumped {
                prop_assert_eq!(game.board().piece_at(pos.x as i32, pos.y as i32), Ok(Square::Empty));
            }
        }
    }

    /// 连吃结束后不会有未升变的兵停在升变行
    #[test]
    fn prop_no_pending_promotion(seed in any::<u64>(), plies in 1..=200usize) {
        let mut game = MatchState::with_config(manual_config(CapturePolicy::AnyCapture)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..plies {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            game.apply_move(mv).unwrap();

            if game.must_continue().is_none() {
                let board = game.board();
                for x in 0..board.width() as i32 {
                    prop_assert_ne!(board.piece_at(x, 0).unwrap(), Square::WhiteMan);
                    prop_assert_ne!(board.piece_at(x, board.height() as i32 - 1).unwrap(), Square::BlackMan);
                }
            }
        }
    }
}

#[test]
fn side_without_pieces_has_no_moves() {
    let mut board = Board::empty(12, 12).unwrap();
    board.set_piece(5, 5, Square::WhiteKing).unwrap();

    for policy in [CapturePolicy::AnyCapture, CapturePolicy::LongestChain] {
        assert!(MoveGenerator::legal_moves(&board, Side::Black, policy).is_empty());
    }
}

#[test]
fn elimination_ends_and_resets_match() {
    let board: Board = "
        ............
        ............
        ............
        ............
        ....b.......
        ...w........
        ............
        ............
        ............
        ............
        ............
        ............
    "
    .parse()
    .unwrap();

    let mut game = MatchState::from_board(board, Side::White, manual_config(CapturePolicy::AnyCapture)).unwrap();
    let moves = game.legal_moves();
    assert_eq!(moves.len(), 1);

    let outcome = game.apply_move(moves[0]).unwrap();
    assert_eq!(outcome.winner, Some(Side::White));
    assert_eq!(game.phase(), MatchPhase::GameOver { winner: Side::White });

    game.reset();
    assert_eq!(game.board(), &Board::standard());
    assert_eq!(game.score(Side::White), 0);
    assert_eq!(game.score(Side::Black), 0);
    assert_eq!(game.current_turn(), Side::White);
}

#[test]
fn new_match_helper() {
    let game = draughts::new_match(10, 10).unwrap();
    assert_eq!(game.board().width(), 10);
    assert_eq!(game.piece_count(Side::White), 20);
    assert!(draughts::new_match(10, 9).is_err());
}
