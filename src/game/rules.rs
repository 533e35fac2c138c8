//! Pure state transitions: spawn, merge, remove
//!
//! Each rule validates everything first and only then mutates, so a refused
//! operation never leaves a partial change behind.

use super::catalog::Catalog;
use super::error::GameError;
use super::state::{GameState, Piece};
use crate::tuning::Tuning;

/// Result of hatching an egg
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawned {
    pub index: usize,
    pub piece: Piece,
    /// First time this breed was hatched
    pub new_discovery: bool,
    /// Bones granted for the discovery (0 if not new)
    pub bonus: u64,
}

/// Result of a successful merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub result_index: usize,
    pub piece: Piece,
    pub new_discovery: bool,
    pub reward: u64,
}

impl Merged {
    pub fn new_level(&self) -> u8 {
        self.piece.level()
    }
}

/// Result of a paid removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub index: usize,
    pub piece: Piece,
    pub cost: u64,
}

/// Hatch a level-1 `breed` into the lowest free slot
pub fn spawn(
    state: &mut GameState,
    tuning: &Tuning,
    catalog: &Catalog,
    breed: &str,
) -> Result<Spawned, GameError> {
    if !catalog.contains(breed) {
        return Err(GameError::UnknownBreed(breed.to_string()));
    }
    state.wallet.ensure_bones(tuning.egg_price)?;
    let index = state.board.first_empty().ok_or(GameError::NoFreeSlot)?;

    state.wallet.spend_bones(tuning.egg_price)?;
    let piece = Piece::new(breed, 1);
    state.board.put(index, piece.clone());

    let new_discovery = state.discovered.record(breed, 1);
    let bonus = if new_discovery {
        tuning.discovery_bonus
    } else {
        0
    };
    state.wallet.earn_bones(bonus);

    Ok(Spawned {
        index,
        piece,
        new_discovery,
        bonus,
    })
}

/// Check whether slots `a` and `b` can merge, without touching the state.
///
/// Checks run in a fixed order and the first failure wins:
/// occupancy, same slot, breed, level, max level, free space.
pub fn check_merge(
    state: &GameState,
    tuning: &Tuning,
    a: usize,
    b: usize,
) -> Result<Piece, GameError> {
    let first = state.board.get(a).ok_or(GameError::SlotEmpty { index: a })?;
    let second = state.board.get(b).ok_or(GameError::SlotEmpty { index: b })?;
    if a == b {
        return Err(GameError::SameSlot);
    }
    if first.breed() != second.breed() {
        return Err(GameError::BreedMismatch);
    }
    if first.level() != second.level() {
        return Err(GameError::LevelMismatch);
    }
    if first.level() >= tuning.max_level {
        return Err(GameError::MaxLevelReached);
    }
    if !state.board.has_empty() {
        return Err(GameError::NoFreeSlot);
    }
    Ok(first.promoted())
}

/// Merge two equal pieces into one of the next level
pub fn merge(
    state: &mut GameState,
    tuning: &Tuning,
    a: usize,
    b: usize,
) -> Result<Merged, GameError> {
    let piece = check_merge(state, tuning, a, b)?;
    let reward = tuning.merge_reward(piece.level());
    // Lowest empty index once both sources are cleared
    let result_index = state
        .board
        .first_empty()
        .map_or(a.min(b), |free| free.min(a).min(b));

    state.board.take(a);
    state.board.take(b);
    state.board.put(result_index, piece.clone());

    let new_discovery = state.discovered.record(piece.breed(), piece.level());
    state.wallet.earn_bones(reward);

    Ok(Merged {
        result_index,
        piece,
        new_discovery,
        reward,
    })
}

/// Pay to delete the piece at `index`
pub fn remove(state: &mut GameState, tuning: &Tuning, index: usize) -> Result<Removed, GameError> {
    if !state.board.is_occupied(index) {
        return Err(GameError::SlotEmpty { index });
    }
    state.wallet.spend_bones(tuning.removal_price)?;
    let piece = state
        .board
        .take(index)
        .ok_or(GameError::SlotEmpty { index })?;

    Ok(Removed {
        index,
        piece,
        cost: tuning.removal_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BREEDS: [&str; 3] = ["corgi", "pug", "husky"];

    fn setup(pieces: &[(usize, &str, u8)]) -> GameState {
        let mut state = GameState::default();
        for &(i, breed, level) in pieces {
            state.board.put(i, Piece::new(breed, level));
        }
        state
    }

    fn full_board(state: &mut GameState) {
        for i in 0..state.board.len() {
            if !state.board.is_occupied(i) {
                state.board.put(i, Piece::new(BREEDS[i % 3], 1));
            }
        }
    }

    #[test]
    fn test_spawn_scenario_then_merge() {
        let tuning = Tuning::default();
        let catalog = Catalog::default();
        let mut state = GameState::default();

        let first = spawn(&mut state, &tuning, &catalog, "corgi").unwrap();
        assert_eq!(first.index, 0);
        assert!(first.new_discovery);
        assert_eq!(first.bonus, 5);

        let second = spawn(&mut state, &tuning, &catalog, "corgi").unwrap();
        assert_eq!(second.index, 1);
        assert!(!second.new_discovery);
        assert_eq!(state.wallet.bones, 85);
        assert!(state.discovered.contains_key("corgi_1"));

        let merged = merge(&mut state, &tuning, 0, 1).unwrap();
        assert_eq!(merged.result_index, 0);
        assert_eq!(merged.new_level(), 2);
        assert_eq!(merged.reward, 20);
        assert_eq!(state.board.get(0), Some(&Piece::new("corgi", 2)));
        assert!(!state.board.is_occupied(1));
        assert_eq!(state.wallet.bones, 105);
        assert!(state.discovered.contains_key("corgi_2"));
    }

    #[test]
    fn test_spawn_insufficient_funds() {
        let tuning = Tuning::default();
        let mut state = GameState::default();
        state.wallet.bones = 9;
        let before = state.clone();
        let err = spawn(&mut state, &tuning, &Catalog::default(), "pug").unwrap_err();
        assert!(matches!(err, GameError::InsufficientFunds { needed: 10, available: 9 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_spawn_unknown_breed() {
        let mut state = GameState::default();
        let err = spawn(&mut state, &Tuning::default(), &Catalog::default(), "poodle").unwrap_err();
        assert_eq!(err, GameError::UnknownBreed("poodle".to_string()));
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_merge_check_order() {
        let tuning = Tuning::default();
        // Empty slot wins over everything else
        let state = setup(&[(0, "corgi", 1)]);
        assert_eq!(
            check_merge(&state, &tuning, 0, 5),
            Err(GameError::SlotEmpty { index: 5 })
        );
        assert_eq!(check_merge(&state, &tuning, 0, 0), Err(GameError::SameSlot));

        // Breed checked before level
        let state = setup(&[(0, "corgi", 1), (1, "pug", 2)]);
        assert_eq!(check_merge(&state, &tuning, 0, 1), Err(GameError::BreedMismatch));

        let state = setup(&[(0, "corgi", 1), (1, "corgi", 2)]);
        assert_eq!(check_merge(&state, &tuning, 0, 1), Err(GameError::LevelMismatch));

        // Max level checked before free space
        let mut state = setup(&[(0, "corgi", 5), (1, "corgi", 5)]);
        full_board(&mut state);
        assert_eq!(check_merge(&state, &tuning, 0, 1), Err(GameError::MaxLevelReached));
    }

    #[test]
    fn test_merge_full_board_keeps_sources() {
        let tuning = Tuning::default();
        let mut state = setup(&[(4, "husky", 2), (9, "husky", 2)]);
        full_board(&mut state);
        let before = state.clone();

        assert_eq!(merge(&mut state, &tuning, 4, 9), Err(GameError::NoFreeSlot));
        assert_eq!(state, before);
    }

    #[test]
    fn test_merge_result_goes_to_lowest_empty() {
        let tuning = Tuning::default();
        // Slot 2 is empty and lower than both sources
        let state_pieces = [(0, "pug", 1), (1, "pug", 1), (5, "corgi", 3), (7, "corgi", 3)];
        let mut state = setup(&state_pieces);
        let merged = merge(&mut state, &tuning, 7, 5).unwrap();
        assert_eq!(merged.result_index, 2);
        assert_eq!(state.board.get(2), Some(&Piece::new("corgi", 4)));
        assert!(!state.board.is_occupied(5));
        assert!(!state.board.is_occupied(7));
        assert_eq!(merged.reward, 40);
    }

    #[test]
    fn test_merge_with_huge_reward_saturates() {
        let tuning = Tuning {
            reward_per_level: u64::MAX,
            ..Default::default()
        };
        let mut state = setup(&[(0, "corgi", 1), (1, "corgi", 1)]);
        let merged = merge(&mut state, &tuning, 0, 1).unwrap();
        assert_eq!(merged.reward, u64::MAX);
        assert_eq!(state.wallet.bones, u64::MAX);
        assert_eq!(state.board.get(0), Some(&Piece::new("corgi", 2)));
        assert!(!state.board.is_occupied(1));
    }

    #[test]
    fn test_remove() {
        let tuning = Tuning::default();
        let mut state = setup(&[(3, "labrador", 4)]);

        assert_eq!(
            remove(&mut state, &tuning, 2),
            Err(GameError::SlotEmpty { index: 2 })
        );

        let removed = remove(&mut state, &tuning, 3).unwrap();
        assert_eq!(removed.piece, Piece::new("labrador", 4));
        assert_eq!(state.wallet.bones, 95);
        assert!(!state.board.is_occupied(3));
    }

    #[test]
    fn test_remove_insufficient_funds() {
        let tuning = Tuning::default();
        let mut state = setup(&[(3, "labrador", 4)]);
        state.wallet.bones = 4;
        let before = state.clone();
        assert!(matches!(
            remove(&mut state, &tuning, 3),
            Err(GameError::InsufficientFunds { .. })
        ));
        assert_eq!(state, before);
    }

    fn board_strategy() -> impl Strategy<Value = Vec<Option<(usize, u8)>>> {
        prop::collection::vec(prop::option::of((0usize..3, 1u8..=5)), 16)
    }

    fn state_from(slots: &[Option<(usize, u8)>]) -> GameState {
        let mut state = GameState::default();
        for (i, slot) in slots.iter().enumerate() {
            if let Some((b, l)) = slot {
                state.board.put(i, Piece::new(BREEDS[*b], *l));
            }
        }
        state
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

        #[test]
        fn breed_mismatch_never_mutates(
            slots in board_strategy(),
            a in 0usize..16,
            b in 0usize..16,
            la in 1u8..=5,
            lb in 1u8..=5,
        ) {
            prop_assume!(a != b);
            let tuning = Tuning::default();
            let mut state = state_from(&slots);
            state.board.put(a, Piece::new("corgi", la));
            state.board.put(b, Piece::new("pug", lb));
            let before = state.clone();

            prop_assert_eq!(merge(&mut state, &tuning, a, b), Err(GameError::BreedMismatch));
            prop_assert_eq!(state, before);
        }

        #[test]
        fn merge_produces_one_promoted_piece(
            slots in board_strategy(),
            a in 0usize..16,
            b in 0usize..16,
            free in 0usize..16,
            breed in 0usize..3,
            level in 1u8..5,
        ) {
            prop_assume!(a != b && free != a && free != b);
            let tuning = Tuning::default();
            let mut state = state_from(&slots);
            state.board.take(free);
            state.board.put(a, Piece::new(BREEDS[breed], level));
            state.board.put(b, Piece::new(BREEDS[breed], level));
            let before = state.clone();

            let merged = merge(&mut state, &tuning, a, b).unwrap();
            let expected = Piece::new(BREEDS[breed], level + 1);

            // Exactly one new promoted piece, everything else untouched
            prop_assert_eq!(state.board.get(merged.result_index), Some(&expected));
            for i in 0..16 {
                if i == merged.result_index {
                    continue;
                }
                if i == a || i == b {
                    prop_assert!(!state.board.is_occupied(i));
                } else {
                    prop_assert_eq!(state.board.get(i), before.board.get(i));
                }
            }
            prop_assert_eq!(merged.result_index, before.board.first_empty().unwrap().min(a.min(b)));
            prop_assert_eq!(
                state.wallet.bones,
                before.wallet.bones + tuning.reward_per_level * u64::from(level + 1)
            );
            prop_assert!(state.discovered.contains(BREEDS[breed], level + 1));
        }

        #[test]
        fn max_level_merge_never_mutates(
            slots in board_strategy(),
            a in 0usize..16,
            b in 0usize..16,
            breed in 0usize..3,
        ) {
            prop_assume!(a != b);
            let tuning = Tuning::default();
            let mut state = state_from(&slots);
            state.board.put(a, Piece::new(BREEDS[breed], tuning.max_level));
            state.board.put(b, Piece::new(BREEDS[breed], tuning.max_level));
            let before = state.clone();

            prop_assert_eq!(merge(&mut state, &tuning, a, b), Err(GameError::MaxLevelReached));
            prop_assert_eq!(state, before);
        }

        #[test]
        fn spawn_on_full_board_keeps_wallet(slots in board_strategy(), bones in 0u64..1000) {
            let tuning = Tuning::default();
            let mut state = state_from(&slots);
            full_board(&mut state);
            state.wallet.bones = bones.max(tuning.egg_price);
            let before = state.clone();

            prop_assert_eq!(
                spawn(&mut state, &tuning, &Catalog::default(), "corgi"),
                Err(GameError::NoFreeSlot)
            );
            prop_assert_eq!(state, before);
        }

        #[test]
        fn spawn_without_bones_keeps_board(slots in board_strategy(), bones in 0u64..10) {
            let tuning = Tuning::default();
            let mut state = state_from(&slots);
            state.wallet.bones = bones;
            let before = state.clone();

            let result = spawn(&mut state, &tuning, &Catalog::default(), "husky");
            let is_insufficient = matches!(result, Err(GameError::InsufficientFunds { .. }));
            prop_assert!(is_insufficient);
            prop_assert_eq!(state, before);
        }
    }
}
