/// How a frontend should draw a cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RenderClass {
    Head,
    Body,
    Fruit,
    Empty,
}

impl RenderClass {
    /// Plain-text glyph for this class.
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            Self::Head => 'O',
            Self::Body => '#',
            Self::Fruit => '*',
            Self::Empty => ' ',
        }
    }
}

/// One board square.
///
/// Zero is empty, a positive value is a body segment that vanishes after that
/// many ticks, and a negative value is a fruit whose magnitude is its weight.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Cell {
    pub value: i32,
}

impl Cell {
    pub const EMPTY: Self = Self { value: 0 };

    /// A body segment that survives `ticks` more decay passes.
    #[must_use]
    pub fn body(ticks: i32) -> Self {
        Self { value: ticks }
    }

    #[must_use]
    pub fn fruit(weight: i32) -> Self {
        Self { value: -weight }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.value == 0
    }

    #[must_use]
    pub fn is_body(self) -> bool {
        self.value > 0
    }

    #[must_use]
    pub fn is_fruit(self) -> bool {
        self.value < 0
    }

    /// Lowers the value by `amount` unless that would take it below zero.
    pub fn decrement(&mut self, amount: i32) {
        if self.value >= amount {
            self.value -= amount;
        }
    }

    /// Classifies the cell against the current snake length.
    #[must_use]
    pub fn render_class(self, length: i32) -> RenderClass {
        if self.value == length {
            RenderClass::Head
        } else if self.value > 0 {
            RenderClass::Body
        } else if self.value < 0 {
            RenderClass::Fruit
        } else {
            RenderClass::Empty
        }
    }
}
