use crate::highlight::Highlight;

/// Capacity a line grows to on its first insertion.
pub const DEFAULT_LINE_CAPACITY: usize = 16;

/// A single line of text: raw bytes plus their display classification.
///
/// The classification array is a cache owned by the highlighter. Any
/// mutation of the bytes marks it stale, and a stale line reports an empty
/// classification until it is recomputed.
#[derive(Debug, Clone, Default)]
pub struct Line {
    bytes: Vec<u8>,
    highlight: Vec<Highlight>,
    highlight_valid: bool,
    continues_block_comment: bool,
}

impl Line {
    /// Create an empty line.
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            highlight: Vec::new(),
            highlight_valid: false,
            continues_block_comment: false,
        }
    }

    /// Create a line holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut line = Self::new();
        line.set_from(bytes);
        line
    }

    /// Number of bytes in the line.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Currently reserved capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Insert `value` before `pos`. Positions past the end insert at the end.
    pub fn insert_byte(&mut self, pos: usize, value: u8) {
        let pos = pos.min(self.bytes.len());
        self.reserve_for(self.bytes.len() + 1);
        self.bytes.insert(pos, value);
        self.invalidate();
    }

    /// Remove and return the byte at `pos`, or `None` when `pos` is past the end.
    pub fn delete_byte(&mut self, pos: usize) -> Option<u8> {
        if pos >= self.bytes.len() {
            return None;
        }
        let removed = self.bytes.remove(pos);
        self.invalidate();
        Some(removed)
    }

    /// Append `bytes` to the end of the line.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.reserve_for(self.bytes.len() + bytes.len());
        self.bytes.extend_from_slice(bytes);
        self.invalidate();
    }

    /// Replace the whole content of the line.
    pub fn set_from(&mut self, bytes: &[u8]) {
        self.bytes.clear();
        self.reserve_for(bytes.len());
        self.bytes.extend_from_slice(bytes);
        self.invalidate();
    }

    /// Shorten the line to `len` bytes. Longer lengths are ignored.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.bytes.len() {
            return;
        }
        self.bytes.truncate(len);
        self.invalidate();
    }

    /// Split the line at `at`, returning everything from `at` onward as a new line.
    ///
    /// The tail inherits the exit state, since the row below was scanned
    /// from it.
    pub fn split_off(&mut self, at: usize) -> Self {
        let at = at.min(self.bytes.len());
        let mut tail = Self::from_bytes(&self.bytes[at..]);
        tail.continues_block_comment = self.continues_block_comment;
        self.truncate(at);
        tail
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.invalidate();
    }

    /// Per-byte classification, or an empty slice while the line is stale.
    pub fn classification(&self) -> &[Highlight] {
        if self.highlight_valid {
            &self.highlight
        } else {
            &[]
        }
    }

    /// Classification of the byte at `pos`, `Normal` when unknown.
    pub fn class_at(&self, pos: usize) -> Highlight {
        self.classification()
            .get(pos)
            .copied()
            .unwrap_or_default()
    }

    /// Whether the classification is current with the bytes.
    pub const fn is_highlighted(&self) -> bool {
        self.highlight_valid
    }

    /// Whether the line ends inside an unterminated block comment.
    pub const fn continues_block_comment(&self) -> bool {
        self.continues_block_comment
    }

    /// Recompute the classification with `scan`, which fills the slice it is
    /// given (pre-set to `Normal`) and returns the line's exit state.
    ///
    /// Returns `true` when the exit state differs from the previous one.
    pub(crate) fn rehighlight(
        &mut self,
        scan: impl FnOnce(&[u8], &mut [Highlight]) -> bool,
    ) -> bool {
        self.highlight.clear();
        self.highlight.resize(self.bytes.len(), Highlight::Normal);
        let open = scan(&self.bytes, &mut self.highlight);
        let changed = open != self.continues_block_comment;
        self.continues_block_comment = open;
        self.highlight_valid = true;
        changed
    }

    /// Overwrite the recorded exit state without rescanning.
    pub(crate) const fn set_continues_block_comment(&mut self, open: bool) {
        self.continues_block_comment = open;
    }

    /// Drop the classification entirely, including the exit state.
    pub(crate) fn reset_highlight(&mut self) {
        self.highlight.clear();
        self.highlight_valid = false;
        self.continues_block_comment = false;
    }

    const fn invalidate(&mut self) {
        self.highlight_valid = false;
    }

    // Capacity doubles from DEFAULT_LINE_CAPACITY until it covers `needed`.
    fn reserve_for(&mut self, needed: usize) {
        let capacity = self.bytes.capacity();
        if needed <= capacity {
            return;
        }
        let mut target = capacity.max(DEFAULT_LINE_CAPACITY);
        while target < needed {
            target *= 2;
        }
        self.bytes.reserve_exact(target - self.bytes.len());
    }
}
