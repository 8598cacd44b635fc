use super::types::{NormalizedResult, PointsAward};

/// Points for the zero-based finishing position `pos`.
///
/// First place earns `max_points`, each following place one less, with a
/// floor of 1 so every counted runner scores.
pub fn points_for_position(pos: usize, max_points: u32) -> u32 {
    let pos = u32::try_from(pos).unwrap_or(u32::MAX);
    max_points.saturating_sub(pos).max(1)
}

/// Turn an ordered event result list into per-runner points.
pub fn assign_points(ordered: &[NormalizedResult], max_points: u32) -> Vec<PointsAward> {
    ordered
        .iter()
        .enumerate()
        .map(|(pos, result)| PointsAward {
            name: result.name.clone(),
            points: points_for_position(pos, max_points),
        })
        .collect()
}
