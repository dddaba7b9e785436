use core::fmt;

/// A scale-relative pitch selection handed to a layer's `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Degree(pub u8);

impl Degree {
    pub const fn new(degree: u8) -> Self {
        Self(degree)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<u8> for Degree {
    fn from(degree: u8) -> Self {
        Self(degree)
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
