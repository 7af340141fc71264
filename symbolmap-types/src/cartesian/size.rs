use num_traits::{FromPrimitive, NumCast};
use serde::{Deserialize, Serialize};

/// Size of a rectangular area, e.g. a viewport in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size<Num: num_traits::Num + PartialOrd + Copy + PartialEq = f64> {
    width: Num,
    height: Num,
}

impl<Num: num_traits::Num + FromPrimitive + PartialOrd + Copy + NumCast> Size<Num> {
    /// Creates a new size.
    pub fn new(width: Num, height: Num) -> Self {
        Self { width, height }
    }

    /// Width.
    pub fn width(&self) -> Num {
        self.width
    }

    /// Half of the width.
    pub fn half_width(&self) -> Num {
        self.width / (Num::one() + Num::one())
    }

    /// Height.
    pub fn height(&self) -> Num {
        self.height
    }

    /// Half of the height.
    pub fn half_height(&self) -> Num {
        self.height / (Num::one() + Num::one())
    }

    /// Returns true if either of the dimensions is zero.
    pub fn is_zero(&self) -> bool {
        self.width.is_zero() || self.height.is_zero()
    }

    /// Converts the size into a different numeric type. Returns `None` if a dimension cannot be represented by the
    /// target type.
    pub fn cast<T: num_traits::Num + FromPrimitive + PartialOrd + Copy + NumCast>(&self) -> Option<Size<T>> {
        Some(Size {
            width: NumCast::from(self.width)?,
            height: NumCast::from(self.height)?,
        })
    }
}
