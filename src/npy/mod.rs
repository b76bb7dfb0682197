//! Reading and writing NumPy `.npy` files.
//!
//! The [header](Header) is parsed without touching the array data, which is enough to
//! decide what to do with a file. Arrays are loaded with
//! [ndarray-npy](https://docs.rs/ndarray-npy) into an [NpyArray] of the element type
//! named by the header.
use itertools::Itertools;

mod any;
mod header;
mod types;

pub use any::*;
pub use header::*;
pub use types::*;

/// Format a shape the way NumPy prints it: `(1060, 400, 400)`, `(7,)` or `()`.
pub fn fmt_shape(shape: &[usize]) -> String {
    match shape {
        [n] => format!("({n},)"),
        _ => format!("({})", shape.iter().join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes() {
        assert_eq!(fmt_shape(&[1060, 400, 400]), "(1060, 400, 400)");
        assert_eq!(fmt_shape(&[7]), "(7,)");
        assert_eq!(fmt_shape(&[]), "()");
    }
}
