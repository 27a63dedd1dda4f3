use std::cmp::Ordering;

/// Condition code, set by `CMP`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flag {
    Equal = 0b001,
    Greater = 0b010,
    Less = 0b100,
    /// No comparison has run yet
    #[default]
    Uninit = 0b000,
}

impl Flag {
    pub fn is_equal(self) -> bool {
        self == Flag::Equal
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

impl From<Ordering> for Flag {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Flag::Less,
            Ordering::Equal => Flag::Equal,
            Ordering::Greater => Flag::Greater,
        }
    }
}
