//! Pre-allocation checks

/// Check a team size against the pool size.
///
/// Returns every violation found; an empty list means the request is valid.
pub fn validate_team_size(team_size: usize, participant_count: usize) -> Vec<String> {
    let mut errors = Vec::new();

    if team_size == 0 {
        errors.push("Team size must be positive".to_string());
    }
    if participant_count < team_size {
        errors.push(format!(
            "Not enough participants ({}) for team size {}",
            participant_count, team_size
        ));
    }

    errors
}
