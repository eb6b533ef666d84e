//! Order-preserving partitioning of annotations into update-sized batches.

use crate::annotation::Annotation;

/// The check-run API accepts at most 50 annotations per update call.
pub const MAX_PER_UPDATE: usize = 50;

/// One contiguous slice of the annotation sequence, with its running
/// cumulative count.
#[derive(Debug, Clone, Copy)]
pub struct Batch<'a> {
    pub annotations: &'a [Annotation],
    pub cumulative: usize,
    pub total: usize,
}

impl Batch<'_> {
    pub fn is_last(&self) -> bool {
        self.cumulative == self.total
    }
}

/// Partition the full sequence into batches of at most [`MAX_PER_UPDATE`].
/// Concatenating the batches in order reconstructs the input exactly.
pub fn schedule(annotations: &[Annotation]) -> Vec<Batch<'_>> {
    schedule_with_cap(annotations, MAX_PER_UPDATE)
}

fn schedule_with_cap(annotations: &[Annotation], cap: usize) -> Vec<Batch<'_>> {
    let total = annotations.len();
    let mut cumulative = 0;
    annotations
        .chunks(cap)
        .map(|chunk| {
            cumulative += chunk.len();
            Batch {
                annotations: chunk,
                cumulative,
                total,
            }
        })
        .collect()
}
