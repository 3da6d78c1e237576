use serde::{Deserialize, Serialize};

/// The grid is always 6 columns wide; rows grow without bound.
pub const GRID_COLS: u32 = 6;

/// Geometry record for one slot. `i` is the stringified *positional* index
/// of the slot — not a stable identity — and is renumbered on every splice.
/// Field names match the wire schema exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl LayoutItem {
    /// Row-major default placement for the slot at `idx`: one cell wide,
    /// one tall, filling left-to-right then top-to-bottom.
    pub fn at_index(idx: usize) -> Self {
        let n = idx as u32;
        LayoutItem {
            i: idx.to_string(),
            x: n % GRID_COLS,
            y: n / GRID_COLS,
            w: 1,
            h: 1,
        }
    }
}

/// The wire form of a whole session: exactly what goes into the address
/// fragment and into a saved profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub streams: Vec<String>,
    #[serde(default)]
    pub layout: Vec<LayoutItem>,
}

/// Owns the authoritative `(streams, layout)` pair.
///
/// Invariants held after every operation:
/// - `streams.len() == layout.len()`
/// - each `layout[k].i == k.to_string()` after any splice or restore
#[derive(Debug, Default)]
pub struct GridStore {
    streams: Vec<String>,
    layout: Vec<LayoutItem>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    pub fn layout(&self) -> &[LayoutItem] {
        &self.layout
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            streams: self.streams.clone(),
            layout: self.layout.clone(),
        }
    }

    /// Replace the whole state from a decoded snapshot, repairing anything a
    /// permissive decode let through: the layout is truncated or padded with
    /// default placements to match the stream count, and ids are renumbered.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.streams = snapshot.streams;
        self.layout = snapshot.layout;
        self.layout.truncate(self.streams.len());
        while self.layout.len() < self.streams.len() {
            self.layout.push(LayoutItem::at_index(self.layout.len()));
        }
        self.renumber();
    }

    /// Append an empty slot with its row-major default placement.
    /// No collision check — the rendering widget resolves overlaps.
    pub fn add_cell(&mut self) {
        let n = self.streams.len();
        self.streams.push(String::new());
        self.layout.push(LayoutItem::at_index(n));
    }

    /// Replace the raw input of one slot; geometry is untouched.
    pub fn update_stream(&mut self, idx: usize, raw: &str) {
        if let Some(slot) = self.streams.get_mut(idx) {
            *slot = raw.to_string();
        }
    }

    /// Remove a slot from both sequences, then renumber every remaining
    /// item's `i` to its new positional index. The renumbering is what keeps
    /// the rendering widget's identity scheme valid after a splice.
    pub fn delete_cell(&mut self, idx: usize) {
        if idx >= self.streams.len() {
            return;
        }
        self.streams.remove(idx);
        self.layout.remove(idx);
        self.renumber();
    }

    /// Wholesale geometry replace, used when the rendering widget reports a
    /// drag or resize outcome. Streams are untouched.
    pub fn set_layout(&mut self, layout: Vec<LayoutItem>) {
        self.layout = layout;
    }

    /// Auto-arrange: recompute every item from scratch with the same
    /// row-major formula as `add_cell`, discarding custom positions/sizes.
    pub fn reset_layout_only(&mut self) {
        self.layout = (0..self.streams.len()).map(LayoutItem::at_index).collect();
    }

    /// Empty both sequences.
    pub fn reset_all(&mut self) {
        self.streams.clear();
        self.layout.clear();
    }

    /// Nudge one item by a cell in each axis. `x` is clamped to the fixed
    /// column range; `y` only has a floor — vertical growth is unbounded.
    pub fn move_item(&mut self, idx: usize, dx: i32, dy: i32) {
        if let Some(item) = self.layout.get_mut(idx) {
            item.x = offset_clamped(item.x, dx, 0, GRID_COLS - 1);
            item.y = offset_floor(item.y, dy, 0);
        }
    }

    /// Grow or shrink one item. `w` is clamped to the column count; `h`
    /// only has a floor of one row.
    pub fn resize_item(&mut self, idx: usize, dw: i32, dh: i32) {
        if let Some(item) = self.layout.get_mut(idx) {
            item.w = offset_clamped(item.w, dw, 1, GRID_COLS);
            item.h = offset_floor(item.h, dh, 1);
        }
    }

    fn renumber(&mut self) {
        for (k, item) in self.layout.iter_mut().enumerate() {
            item.i = k.to_string();
        }
    }
}

fn offset_clamped(value: u32, delta: i32, min: u32, max: u32) -> u32 {
    (i64::from(value) + i64::from(delta)).clamp(i64::from(min), i64::from(max)) as u32
}

fn offset_floor(value: u32, delta: i32, min: u32) -> u32 {
    (i64::from(value) + i64::from(delta)).max(i64::from(min)) as u32
}
