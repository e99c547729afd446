//! Robust geometric predicates built on adaptive precision floating-point
//! arithmetic.
//!
//! The predicates return a value whose sign is always correct, even for nearly
//! degenerate inputs, as long as the coordinates stay within the
//! [range](#range) where no intermediate result overflows or underflows. Most
//! calls finish with a single floating-point determinant guarded by an error
//! bound; inconclusive cases escalate through progressively more exact stages
//! until the sign is certain.
//!
//! # Quick Start
//!
//! ```rust
//! use geompreds::{Coord, GeometryPredicateResult, orient2d};
//!
//! let a = Coord::new(0.0, 0.0);
//! let b = Coord::new(1.0, 0.0);
//! let c = Coord::new(0.5, 1.0);
//!
//! match GeometryPredicateResult::from(orient2d(&a, &b, &c)) {
//!     GeometryPredicateResult::Positive => println!("c is left of ab"),
//!     GeometryPredicateResult::Negative => println!("c is right of ab"),
//!     GeometryPredicateResult::Zero => println!("c is on line ab"),
//! }
//! ```
//!
//! Exact sums and products are available through [`Expansion`]:
//!
//! ```rust
//! use geompreds::Expansion;
//!
//! let big = Expansion::from(1.0e16);
//! let sum = &(&big + &Expansion::from(1.0)) - &big;
//! assert_eq!(sum.estimate(), 1.0);
//! ```
//!
//! # Available Predicates
//!
//! - [`orient2d`]: Orientation of a point relative to a directed line
//! - [`orient3d`]: Orientation of a point relative to an oriented plane
//! - [`incircle`]: Test if a point lies inside the circumcircle of a triangle
//! - [`insphere`]: Test if a point lies inside the circumsphere of a tetrahedron
//!
//! Each has a `_fast` variant (plain floating point, no guarantee), an
//! `_exact` variant (exact arithmetic throughout) and a `try_` variant that
//! rejects non-finite coordinates.
//!
//! # Range
//!
//! The sign is exact as long as no intermediate product, including the
//! roundoff terms carried by the exact stages, overflows or falls into the
//! subnormal range. Inputs whose nonzero coordinates and nonzero coordinate
//! differences all lie between `2^-100` and `2^100` in magnitude are always
//! safe. Far outside that window the predicates are out of contract: a
//! nondegenerate input can come back as zero, or with the wrong sign.
//!
//! # Initialization
//!
//! The error bounds are derived from the machine epsilon the first time any
//! predicate runs. Call [`initialize`] up front to pay that cost eagerly.

pub mod bounds;
pub mod expansion;
mod geometry;

pub use bounds::{ErrorBounds, StageBounds, bounds, initialize};
pub use expansion::Expansion;
pub use geometry::{
    Coord, Coord3, GeometryPredicateResult, NonFiniteInput, incircle, incircle_exact,
    incircle_fast, insphere, insphere_exact, insphere_fast, orient2d, orient2d_exact,
    orient2d_fast, orient3d, orient3d_exact, orient3d_fast, try_incircle, try_insphere,
    try_orient2d, try_orient3d,
};
