use serde::{Deserialize, Serialize};

use crate::impls::contour::Contour;

/// A set of contours.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MultiContour<P> {
    /// Inner contours.
    pub parts: Vec<Contour<P>>,
}

impl<P> From<Vec<Contour<P>>> for MultiContour<P> {
    fn from(parts: Vec<Contour<P>>) -> Self {
        Self { parts }
    }
}

impl<P> MultiContour<P> {
    /// Returns reference to the inner contours.
    pub fn parts(&self) -> &[Contour<P>] {
        &self.parts
    }
}

impl<P> crate::multi_contour::MultiContour for MultiContour<P> {
    type Contour = Contour<P>;

    fn contours(&self) -> impl Iterator<Item = &'_ Self::Contour> {
        self.parts.iter()
    }
}
