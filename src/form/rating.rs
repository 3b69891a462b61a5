/// Star rating widget state
///
/// The committed rating is a typed field. The hidden form value that gets
/// submitted is derived from it and never read back.

/// Number of stars in the widget
pub const STAR_COUNT: u8 = 5;

/// Visual state of a single star
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StarState {
    /// Part of the committed rating
    pub active: bool,
    /// Part of the hover preview
    pub hover: bool,
}

/// Committed rating plus the transient hover preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rating {
    committed: u8,
    hover: u8,
}

impl Rating {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a rating of `n` stars (clamped to the star count)
    pub fn set_rating(&mut self, n: u8) {
        let n = n.min(STAR_COUNT);
        self.committed = n;
    }

    /// Preview `n` stars under the pointer without committing
    pub fn highlight_stars(&mut self, n: u8) {
        self.hover = n.min(STAR_COUNT);
    }

    /// Pointer left the widget: drop the preview, redraw the committed stars
    pub fn reset_highlight(&mut self) {
        self.hover = 0;
    }

    /// Clear the rating after a successful submission
    pub fn reset_rating(&mut self) {
        self.committed = 0;
        self.hover = 0;
    }

    /// Committed value, 0 when unset
    pub fn value(&self) -> u8 {
        self.committed
    }

    pub fn is_set(&self) -> bool {
        self.committed > 0
    }

    /// Value of the hidden rating input: empty when unset
    pub fn hidden_value(&self) -> String {
        if self.is_set() {
            self.committed.to_string()
        } else {
            String::new()
        }
    }

    /// State of star `index` (1-indexed)
    pub fn star(&self, index: u8) -> StarState {
        StarState {
            active: index <= self.committed,
            hover: index <= self.hover,
        }
    }

    /// States of all stars, first to last
    pub fn stars(&self) -> impl Iterator<Item = StarState> + '_ {
        (1..=STAR_COUNT).map(|index| self.star(index))
    }
}
