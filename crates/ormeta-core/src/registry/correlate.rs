//! The correlation pass.

use super::inheritance::ancestor_chain;
use super::registry::Declarations;
use crate::metadata::{Fragment, Target};
use serde::Serialize;

/// Summary of one correlation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorrelationReport {
    /// Pass number, starting at 1.
    pub pass: u32,
    /// Entities visited.
    pub entities: usize,
    /// Column attachments made (a column may attach to several entities).
    pub attached_columns: usize,
    /// Index attachments made.
    pub attached_indices: usize,
    /// Unique constraint attachments made.
    pub attached_uniques: usize,
    /// Columns whose target is in no entity's chain.
    pub unattached_columns: usize,
    /// Indices whose target is in no entity's chain.
    pub unattached_indices: usize,
    /// Unique constraints whose target is in no entity's chain.
    pub unattached_uniques: usize,
}

/// Attach every registered fragment to the entities whose chain contains its target.
///
/// Entities are visited in registration order. Within each fragment kind the
/// attached fragments keep registration order. Nothing is cleared first, so a
/// second pass appends the same fragments again.
pub(crate) fn correlate(declarations: &mut Declarations, pass: u32) -> CorrelationReport {
    let types = &declarations.types;
    let columns = &declarations.columns;
    let indices = &declarations.indices;
    let uniques = &declarations.uniques;
    let entities = &mut declarations.entities;

    let mut report = CorrelationReport {
        pass,
        entities: entities.len(),
        ..Default::default()
    };

    let mut column_hits = vec![false; columns.len()];
    let mut index_hits = vec![false; indices.len()];
    let mut unique_hits = vec![false; uniques.len()];

    for entity in entities.iter_mut() {
        let chain = ancestor_chain(types, entity.target);

        let attached = matching(uniques, &chain, &mut unique_hits);
        report.attached_uniques += attached.len();
        entity.uniques.extend(attached);

        let attached = matching(columns, &chain, &mut column_hits);
        report.attached_columns += attached.len();
        for mut column in attached {
            column.build(entity.id);
            entity.columns.push(column);
        }

        let attached = matching(indices, &chain, &mut index_hits);
        report.attached_indices += attached.len();
        entity.indices.extend(attached);
    }

    report.unattached_columns = misses(&column_hits);
    report.unattached_indices = misses(&index_hits);
    report.unattached_uniques = misses(&unique_hits);
    report
}

fn matching<F>(fragments: &[F], chain: &[Target], hits: &mut [bool]) -> Vec<F>
where
    F: Fragment + Clone,
{
    fragments
        .iter()
        .zip(hits.iter_mut())
        .filter(|(fragment, _)| chain.contains(&fragment.target()))
        .map(|(fragment, hit)| {
            *hit = true;
            fragment.clone()
        })
        .collect()
}

fn misses(hits: &[bool]) -> usize {
    hits.iter().filter(|hit| !**hit).count()
}
