//! Tracking of vertex ranges that changed since the last upload.

use std::ops::Range;

/// Sorted, non-overlapping vertex ranges waiting to be uploaded.
///
/// Overlapping and adjacent ranges are merged as they are marked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyRanges {
    ranges: Vec<Range<usize>>,
}

impl DirtyRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `start..end` as changed. Empty ranges are ignored.
    pub fn mark_dirty(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }

        // First range that ends at or after `start` may touch the new one
        let first = self.ranges.partition_point(|r| r.end < start);
        let mut merged = start..end;
        let mut last = first;

        while let Some(range) = self.ranges.get(last) {
            if range.start > merged.end {
                break;
            }
            merged.start = merged.start.min(range.start);
            merged.end = merged.end.max(range.end);
            last += 1;
        }

        self.ranges.splice(first..last, std::iter::once(merged));
    }

    /// Drop everything at or past `len`, for buffers that shrank.
    pub fn truncate(&mut self, len: usize) {
        self.ranges.retain(|r| r.start < len);
        if let Some(range) = self.ranges.last_mut() {
            range.end = range.end.min(len);
        }
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Return the pending ranges and forget them.
    pub fn take(&mut self) -> Vec<Range<usize>> {
        std::mem::take(&mut self.ranges)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }
}
