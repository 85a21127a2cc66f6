//! Angle quantities and the thin wrappers used to move between `uom` and bare
//! floats.

pub mod todo;

pub use uom;
pub use uom::si::Quantity;
pub use uom::si::f64::Angle;

mod units {
  pub use uom::si::angle::{degree, radian, revolution};
}

pub use units::{degree, radian};

// Making values from float literals seems to be very long-winded, so provide
// some pithily-named convenience constructors.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f64) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(deg    Angle      degree);
wrap!(rad    Angle      radian);
wrap!(turn   Angle  revolution);

// Reverse direction of the above.
pub fn deg_   (x: Angle) -> f64 { x.get::<units::degree>() }
pub fn radian_(x: Angle) -> f64 { x.get::<units::radian>() }
pub fn turn_  (x: Angle) -> f64 { x.get::<units::revolution>() }

/// Cosine and sine of `angle`, in that order.
pub fn cos_sin(angle: Angle) -> (f64, f64) {
  let (sin, cos) = radian_(angle).sin_cos();
  (cos, sin)
}

#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}
