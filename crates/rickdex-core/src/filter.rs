//! Client-side post-filter for criteria the API does not support

use crate::api::Character;

/// Keeps characters appearing in at least `min_episodes` episodes, in their
/// original order.
pub fn filter_by_min_episodes(characters: Vec<Character>, min_episodes: u32) -> Vec<Character> {
    characters
        .into_iter()
        .filter(|c| c.episode_count() >= min_episodes as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn character(id: u64, episodes: Option<usize>) -> Character {
        Character {
            id,
            name: format!("Character {}", id),
            status: "Alive".into(),
            species: "Human".into(),
            image: format!("https://rickandmortyapi.com/api/character/avatar/{}.jpeg", id),
            episode: episodes.map(|n| {
                (1..=n)
                    .map(|e| format!("https://rickandmortyapi.com/api/episode/{}", e))
                    .collect()
            }),
        }
    }

    #[test]
    fn test_threshold_keeps_order() {
        let input = vec![character(1, Some(1)), character(2, Some(5)), character(3, Some(20))];
        let ids: Vec<u64> = filter_by_min_episodes(input, 5).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_missing_episode_list_counts_as_zero() {
        let input = vec![character(1, None), character(2, Some(0))];
        assert_eq!(filter_by_min_episodes(input.clone(), 0).len(), 2);
        assert!(filter_by_min_episodes(input, 1).is_empty());
    }

    proptest! {
        #[test]
        fn prop_idempotent_and_monotonic(
            counts in proptest::collection::vec(proptest::option::of(0usize..40), 0..20),
            low in 0u32..50,
            delta in 0u32..50,
        ) {
            let input: Vec<Character> = counts
                .iter()
                .enumerate()
                .map(|(i, n)| character(i as u64, *n))
                .collect();

            let once = filter_by_min_episodes(input.clone(), low);
            let twice = filter_by_min_episodes(once.clone(), low);
            prop_assert_eq!(&once, &twice);

            let higher = filter_by_min_episodes(input, low + delta);
            prop_assert!(higher.len() <= once.len());
        }
    }
}
