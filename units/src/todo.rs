/// Quantities which are simply type aliases for floats rather than having an
/// implementation as a `uom` `Quantity`.
///
/// They live in tight inner loops or in sparse-matrix storage where the
/// `uom` wrappers get in the way, but we still want some clues in the source
/// as to what they represent.

pub type Weightf32     = f32;
pub type Intensityf32  = f32;
pub type Coordinatef64 = f64; // TODO uom Length in pixel units
