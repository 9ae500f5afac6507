use std::cmp::Ordering;

use crate::ir::RelationRecord;

/// Keeps relations at or above `min_confidence`, strongest first, capped at
/// `max_count`.
///
/// Ties on confidence fall back to `updated_at` compared as plain strings,
/// newest first. Timestamps are never parsed, so malformed values still get
/// a stable position.
pub fn rank_relations(
    relations: &[RelationRecord],
    min_confidence: f32,
    max_count: usize,
) -> Vec<&RelationRecord> {
    let mut kept: Vec<&RelationRecord> = relations
        .iter()
        .filter(|relation| relation.confidence_score() >= min_confidence)
        .collect();

    // Stable sort: equal keys keep their input order.
    kept.sort_by(|a, b| {
        b.confidence_score()
            .partial_cmp(&a.confidence_score())
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
    kept.truncate(max_count);
    kept
}
