use tabled::Table;

use crate::{info, types::Credentials, utils, warning};

pub fn print_episode_list(credentials: &Credentials) {
    info!(
        "Configured episode IDs for podcast {}:",
        credentials.podcast_id
    );
    let table = Table::new(utils::episode_table_rows(&credentials.episode_ids));
    println!("{}", table);

    if utils::has_duplicate_episodes(&credentials.episode_ids) {
        warning!("The episode list contains duplicates; they are played once per entry.");
    }
}
