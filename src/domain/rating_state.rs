//! Star rating input state: a committed value plus a non-committal hover preview.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingState {
    star_count: usize,
    committed: usize,
    hovered: Option<usize>,
}

impl RatingState {
    pub fn new(star_count: usize, committed: usize) -> Self {
        Self {
            star_count,
            committed: committed.min(star_count),
            hovered: None,
        }
    }

    /// Stored rating, 0 when nothing was chosen yet.
    pub fn committed(&self) -> usize {
        self.committed
    }

    /// Commits star `index` (0-based). Returns the stored value.
    pub fn click(&mut self, index: usize) -> Option<usize> {
        if index >= self.star_count {
            return None;
        }

        self.committed = index + 1;
        self.hovered = None;
        Some(self.committed)
    }

    pub fn hover(&mut self, index: usize) {
        if index < self.star_count {
            self.hovered = Some(index);
        }
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    /// Solid star: part of the committed rating.
    pub fn is_filled(&self, index: usize) -> bool {
        index < self.committed
    }

    /// Highlighted star: committed, or covered by the hover preview.
    pub fn is_active(&self, index: usize) -> bool {
        self.is_filled(index) || self.hovered.is_some_and(|hovered| index <= hovered)
    }

    pub fn active_count(&self) -> usize {
        (0..self.star_count)
            .filter(|index| self.is_active(*index))
            .count()
    }
}
