use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};

use crate::types::EpisodeTableRow;

pub const EPISODE_URI_PREFIX: &str = "spotify:episode:";

pub fn episode_uri(episode_id: &str) -> String {
    format!("{}{}", EPISODE_URI_PREFIX, episode_id)
}

/// Shuffles the episodes in place with the thread-local generator.
pub fn shuffle_episodes(episodes: &mut [String]) {
    shuffle_episodes_with(episodes, &mut rand::rng());
}

/// Fisher-Yates shuffle; every permutation is equally likely.
pub fn shuffle_episodes_with<R: Rng + ?Sized>(episodes: &mut [String], rng: &mut R) {
    episodes.shuffle(rng);
}

pub fn has_duplicate_episodes(episodes: &[String]) -> bool {
    let mut seen = HashSet::new();
    !episodes.iter().all(|id| seen.insert(id.as_str()))
}

pub fn episode_table_rows(episodes: &[String]) -> Vec<EpisodeTableRow> {
    episodes
        .iter()
        .enumerate()
        .map(|(i, id)| EpisodeTableRow {
            position: i + 1,
            episode: id.clone(),
            uri: episode_uri(id),
        })
        .collect()
}
