use crate::model::{BudgetRange, MAX_BUDGET, MIN_BUDGET, Thumb};

/// Where the budget track was last drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderGeometry {
    pub row: u16,
    pub left: u16,
    pub width: u16,
}

impl SliderGeometry {
    fn span(&self) -> u32 {
        self.width.saturating_sub(1).max(1) as u32
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        row == self.row && column >= self.left && column < self.left + self.width
    }

    /// Track column (relative to `left`) for a budget value
    pub fn value_to_col(&self, value: u32) -> u16 {
        let value = value.clamp(MIN_BUDGET, MAX_BUDGET) - MIN_BUDGET;
        let range = MAX_BUDGET - MIN_BUDGET;
        ((value * self.span() + range / 2) / range) as u16
    }

    /// Budget value under a screen column (not step-aligned)
    pub fn col_to_value(&self, column: u16) -> u32 {
        let rel = column.saturating_sub(self.left).min(self.width.saturating_sub(1)) as u32;
        let range = MAX_BUDGET - MIN_BUDGET;
        MIN_BUDGET + (rel * range + self.span() / 2) / self.span()
    }

    /// The thumb closest to a screen column; ties go to the max thumb
    /// when the click is right of it, so overlapping thumbs stay reachable.
    pub fn nearest_thumb(&self, column: u16, budget: BudgetRange) -> Thumb {
        let rel = column.saturating_sub(self.left) as i32;
        let min_col = self.value_to_col(budget.min) as i32;
        let max_col = self.value_to_col(budget.max) as i32;
        let to_min = (rel - min_col).abs();
        let to_max = (rel - max_col).abs();
        if to_min < to_max || (to_min == to_max && rel < max_col) {
            Thumb::Min
        } else {
            Thumb::Max
        }
    }
}

/// An in-progress mouse drag of one budget thumb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetDrag {
    pub thumb: Thumb,
}

impl BudgetDrag {
    /// Grab the thumb nearest to the pointer and jump it there
    pub fn start(geometry: &SliderGeometry, column: u16, budget: BudgetRange) -> (BudgetDrag, BudgetRange) {
        let thumb = geometry.nearest_thumb(column, budget);
        let drag = BudgetDrag { thumb };
        let updated = drag.update(geometry, column, budget);
        (drag, updated)
    }

    /// Budget after moving the pointer to `column`
    pub fn update(&self, geometry: &SliderGeometry, column: u16, budget: BudgetRange) -> BudgetRange {
        let value = geometry.col_to_value(column);
        match self.thumb {
            Thumb::Min => budget.adjust(value, budget.max, Thumb::Min),
            Thumb::Max => budget.adjust(budget.min, value, Thumb::Max),
        }
    }
}
