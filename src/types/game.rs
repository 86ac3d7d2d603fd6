//! Canonical game names
//!
//! Participants may type game names in any case; they are normalized to the
//! spelling in [`VALID_GAMES`] when a match exists.

/// Games the club organizes teams for
pub const VALID_GAMES: &[&str] = &[
    "Valorant",
    "Dota",
    "FIFA",
    "Basketball",
    "Badminton",
    "CSGO",
    "League of Legends",
    "Overwatch",
];

/// Find the canonical spelling of a game, ignoring case and surrounding whitespace
pub fn canonical_game(game: &str) -> Option<&'static str> {
    let wanted = game.trim();
    VALID_GAMES
        .iter()
        .copied()
        .find(|g| g.eq_ignore_ascii_case(wanted))
}

/// Normalize a game name, leaving it untouched when it is not in the table
pub fn normalize_game_name(game: &str) -> String {
    canonical_game(game)
        .map(str::to_string)
        .unwrap_or_else(|| game.to_string())
}

/// Whether a game name matches an entry in the table
pub fn is_valid_game(game: &str) -> bool {
    canonical_game(game).is_some()
}
