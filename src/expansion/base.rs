use super::{
    compress, estimate, expansion_signum, fast_expansion_sum_zeroelim, is_nonoverlapping_sorted,
    is_sorted_by_magnitude, scale_expansion_with, scale_expansion_zeroelim, two_diff, two_product,
};
use crate::bounds::bounds;

/// Exact value represented as a nonoverlapping expansion of `f64` components
/// stored in increasing magnitude order.
///
/// Zero is the empty expansion. Values are immutable once built; every
/// arithmetic operation returns a fresh expansion.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Expansion {
    components: Vec<f64>,
}

impl Expansion {
    /// Returns the zero value.
    pub fn zero() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Creates an expansion from a single `f64`.
    pub fn from_f64(value: f64) -> Self {
        debug_assert!(!value.is_nan(), "NaN components are not supported");
        if value == 0.0 {
            Self::zero()
        } else {
            Self {
                components: vec![value],
            }
        }
    }

    /// Exact difference `a - b`, at most two components.
    pub fn difference(a: f64, b: f64) -> Self {
        let (diff, tail) = two_diff(a, b);
        Self::from_components(vec![tail, diff])
    }

    /// Exact product `a * b`, at most two components.
    pub fn product(a: f64, b: f64) -> Self {
        let (product, tail) = two_product(a, b);
        Self::from_components(vec![tail, product])
    }

    /// Returns the approximate value, the ordinary sum of all components.
    pub fn estimate(&self) -> f64 {
        estimate(&self.components)
    }

    /// Returns the largest component, which carries the sign of the value.
    pub fn most_significant(&self) -> f64 {
        self.components.last().copied().unwrap_or(0.0)
    }

    /// Returns -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        expansion_signum(&self.components)
    }

    /// Exposes the underlying components, smallest first.
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Number of nonzero components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Reports whether there are no components, which is the case exactly
    /// when the value is zero.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Reports whether the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns an equal expansion with its components renormalized, usually
    /// shorter than `self`.
    pub fn compress(&self) -> Self {
        let mut components = vec![0.0; self.components.len()];
        let len = compress(&self.components, &mut components);
        components.truncate(len);
        Self::from_components(components)
    }

    /// Adds another expansion, returning the exact sum.
    pub fn add_expansion(&self, rhs: &Self) -> Self {
        let mut components = vec![0.0; self.len() + rhs.len()];
        let len = fast_expansion_sum_zeroelim(&self.components, &rhs.components, &mut components);
        components.truncate(len);
        Self::from_components(components)
    }

    /// Multiplies by a scalar, returning the exact product.
    pub fn scale(&self, factor: f64) -> Self {
        let mut components = vec![0.0; 2 * self.len()];
        let len = scale_expansion_zeroelim(&self.components, factor, &mut components);
        components.truncate(len);
        Self::from_components(components)
    }

    /// Multiplies by another expansion, returning the exact product.
    ///
    /// Scales `self` by each component of `rhs` and accumulates the partial
    /// products; the result has at most `2 * self.len() * rhs.len()`
    /// components.
    pub fn mul_expansion(&self, rhs: &Self) -> Self {
        if self.len() < rhs.len() {
            return rhs.mul_expansion(self);
        }

        let splitter = bounds().splitter;
        let mut scaled = vec![0.0; 2 * self.len()];
        let mut accumulator = Vec::with_capacity(2 * self.len() * rhs.len());
        let mut sum = Vec::with_capacity(2 * self.len() * rhs.len());
        for &factor in &rhs.components {
            let scaled_len = scale_expansion_with(&self.components, factor, splitter, &mut scaled);
            sum.resize(accumulator.len() + scaled_len, 0.0);
            let len = fast_expansion_sum_zeroelim(&accumulator, &scaled[..scaled_len], &mut sum);
            sum.truncate(len);
            std::mem::swap(&mut accumulator, &mut sum);
        }
        Self::from_components(accumulator)
    }

    /// Negates every component.
    pub fn negate(&self) -> Self {
        Self {
            components: self.components.iter().map(|&component| -component).collect(),
        }
    }

    /// Ensures the internal expansion satisfies required invariants.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        for &component in &self.components {
            if !component.is_finite() {
                return Err("Expansion component must be finite");
            }
            if component == 0.0 {
                return Err("Expansion must not store zero components");
            }
        }
        if !is_sorted_by_magnitude(&self.components) {
            return Err("Expansion components must be sorted by increasing magnitude");
        }
        if !is_nonoverlapping_sorted(&self.components) {
            return Err("Expansion components must be nonoverlapping");
        }
        Ok(())
    }

    fn from_components(mut components: Vec<f64>) -> Self {
        components.retain(|c| *c != 0.0);
        let result = Self { components };
        debug_assert!(result.check_invariants().is_ok());
        result
    }

    #[cfg(test)]
    pub(crate) fn from_raw_components(components: Vec<f64>) -> Self {
        Self { components }
    }
}

impl From<f64> for Expansion {
    fn from(value: f64) -> Self {
        Expansion::from_f64(value)
    }
}
