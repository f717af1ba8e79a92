//! Pure 2-D geometry primitives
//!
//! Everything here is stateless value math: points rounded to a fixed
//! precision, implicit lines `ax + by + c = 0`, and half-planes (a line plus
//! a side predicate). The simulation builds obstacle boundaries out of these.

pub mod halfplane;
pub mod line;
pub mod point;

pub use halfplane::{HalfPlane, Side};
pub use line::{Line, SlopeIntercept};
pub use point::Point;
