use backgammon::{
    backgammon::{Dice, Game, IdSequence, Roll},
    config::SimulationConfig,
    simulation::{check_invariants, play_game},
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn doubles_grant_four_moves(d1 in 1u8..=6, d2 in 1u8..=6) {
        let roll = Roll::new(d1, d2);
        if d1 == d2 {
            prop_assert_eq!(&*roll.distances, &[d1; 4][..]);
        } else {
            prop_assert_eq!(&*roll.distances, &[d1, d2][..]);
        }
    }

    #[test]
    fn dice_stay_in_range_and_replay(seed in any::<u64>()) {
        let mut a = Dice::with_seed(seed);
        let mut b = Dice::with_seed(seed);
        for _ in 0..20 {
            let roll = a.roll();
            prop_assert!((1..=6).contains(&roll.d1));
            prop_assert!((1..=6).contains(&roll.d2));
            prop_assert_eq!(roll, b.roll());
        }
    }

    #[test]
    fn every_legal_move_is_accepted(seed in any::<u64>(), plies in 0usize..40) {
        let mut ids = IdSequence::new();
        let mut game = Game::with_seed(ids.player("W"), ids.player("B"), 0, seed).unwrap();
        game.reset_standard_layout();
        game.roll().unwrap();
        for ply in 0..plies {
            let legal = game.legal_moves();
            let Some(&half_move) = legal.get(ply % legal.len().max(1)) else {
                game.end_turn();
                game.roll().unwrap();
                continue;
            };
            let before = game.available_moves().len();
            let applied = game.move_checker(half_move.from, half_move.to).unwrap();
            prop_assert_eq!(applied.half_move, half_move);
            prop_assert!(applied.turn_ended || game.available_moves().len() + 1 == before);
            prop_assert!(check_invariants(&game).is_ok());
            if applied.turn_ended {
                game.roll().unwrap();
            }
        }
    }
}

#[test]
fn simulated_games_keep_every_checker() {
    let config = SimulationConfig { games: 1, max_turns: 500, ..SimulationConfig::default() };
    for seed in 0..16 {
        let record = play_game(&config, seed).unwrap();
        assert!(record.turns <= 500);
    }
}
