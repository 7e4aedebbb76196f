// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::ike::{
    collaborators::Sa,
    segment::{Segment, SegmentInner},
};

const MAX_TABLE_SIZE: usize = 1 << 30;

fn round_up_pow2_clamped(configured: usize, max: usize) -> usize {
    // Clamp before rounding: `next_power_of_two` panics on overflow for
    // any input above `1 << (usize::BITS - 1)`, which a configured size
    // near `usize::MAX` would otherwise hit.
    configured.max(1).min(max).next_power_of_two()
}

/// Open-chained hash table sharded into a power-of-two number of segments.
///
/// Rows are hashed by `init_spi` alone (see [`Table::row_of`]); a row `r`
/// belongs to segment `r & segment_mask`. Within a segment, row `r`'s
/// entries live at index `r >> segment_bits` of that segment's row list —
/// i.e. segment `s` owns global rows `s, s + segment_count, s +
/// 2*segment_count, ...`, which is also the order [`crate::ike::enumerator::Enumerator`]
/// walks them in.
pub struct Table<S: Sa> {
    pub segments: Vec<Segment<S>>,
    pub table_size: usize,
    pub segment_count: usize,
    pub table_mask: usize,
    pub segment_mask: usize,
    segment_bits: u32,
}

impl<S: Sa> Table<S> {
    pub fn new(configured_table_size: usize, configured_segment_count: usize) -> Self {
        let table_size = round_up_pow2_clamped(configured_table_size, MAX_TABLE_SIZE);
        let segment_count = round_up_pow2_clamped(configured_segment_count, table_size);
        let rows_per_segment = table_size / segment_count;

        let segments = (0..segment_count)
            .map(|_| Segment::new(SegmentInner::new(rows_per_segment)))
            .collect();

        Table {
            segments,
            table_size,
            segment_count,
            table_mask: table_size - 1,
            segment_mask: segment_count - 1,
            segment_bits: segment_count.trailing_zeros(),
        }
    }

    /// Hashes by `init_spi` alone — deliberately ignoring `resp_spi` and
    /// `is_initiator` so an entry's row never moves once the responder SPI
    /// becomes known.
    pub fn row_of(&self, init_spi: u64) -> usize {
        (init_spi as usize) & self.table_mask
    }

    pub fn segment_of(&self, row: usize) -> usize {
        row & self.segment_mask
    }

    /// Index of row `row` within its owning segment's row list.
    pub fn slot_of(&self, row: usize) -> usize {
        row >> self.segment_bits
    }

    pub fn rows_per_segment(&self) -> usize {
        self.table_size / self.segment_count
    }
}
