use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::{ArrayD, Axis, Slice};
use ndarray_npy::{ReadNpyExt, WritableElement, WriteNpyExt};

use super::{Datatype, Header};

/// An array loaded from a `.npy` file, in any of the supported element types.
#[derive(Debug, Clone, PartialEq)]
pub enum NpyArray {
    Bool(ArrayD<bool>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
}

macro_rules! each {
    ($self: expr, $a: ident => $e: expr) => {
        match $self {
            NpyArray::Bool($a) => $e,
            NpyArray::I8($a) => $e,
            NpyArray::I16($a) => $e,
            NpyArray::I32($a) => $e,
            NpyArray::I64($a) => $e,
            NpyArray::U8($a) => $e,
            NpyArray::U16($a) => $e,
            NpyArray::U32($a) => $e,
            NpyArray::U64($a) => $e,
            NpyArray::F32($a) => $e,
            NpyArray::F64($a) => $e,
        }
    };
}

macro_rules! impl_from_array {
    ($t: ty : $variant: ident) => {
        impl From<ArrayD<$t>> for NpyArray {
            fn from(a: ArrayD<$t>) -> Self {
                Self::$variant(a)
            }
        }
    };
}

impl_from_array!(bool: Bool);
impl_from_array!(i8: I8);
impl_from_array!(i16: I16);
impl_from_array!(i32: I32);
impl_from_array!(i64: I64);
impl_from_array!(u8: U8);
impl_from_array!(u16: U16);
impl_from_array!(u32: U32);
impl_from_array!(u64: U64);
impl_from_array!(f32: F32);
impl_from_array!(f64: F64);

impl NpyArray {
    /// Load the whole array at `path`, using `header` to pick the element type.
    pub fn read<P>(path: P, header: &Header) -> Result<NpyArray, anyhow::Error>
    where
        P: AsRef<Path>,
    {
        use Datatype::*;

        let r = BufReader::new(fs::File::open(path)?);

        Ok(match header.dtype {
            Bool => NpyArray::Bool(ArrayD::read_npy(r)?),
            Int(1) => NpyArray::I8(ArrayD::read_npy(r)?),
            Int(2) => NpyArray::I16(ArrayD::read_npy(r)?),
            Int(4) => NpyArray::I32(ArrayD::read_npy(r)?),
            Int(8) => NpyArray::I64(ArrayD::read_npy(r)?),
            UInt(1) => NpyArray::U8(ArrayD::read_npy(r)?),
            UInt(2) => NpyArray::U16(ArrayD::read_npy(r)?),
            UInt(4) => NpyArray::U32(ArrayD::read_npy(r)?),
            UInt(8) => NpyArray::U64(ArrayD::read_npy(r)?),
            Float(4) => NpyArray::F32(ArrayD::read_npy(r)?),
            Float(8) => NpyArray::F64(ArrayD::read_npy(r)?),
            _ => bail!("unsupported element type: {}", header.descr),
        })
    }

    pub fn shape(&self) -> &[usize] {
        each!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        each!(self, a => a.ndim())
    }

    /// Write the first `n` entries along the first axis to `path`, without copying the
    /// retained part of the array. Returns the shape written.
    pub fn write_leading<P>(&self, n: usize, path: P) -> Result<Vec<usize>, anyhow::Error>
    where
        P: AsRef<Path>,
    {
        ensure!(self.ndim() > 0, "cannot slice a zero-dimensional array");
        ensure!(
            n <= self.shape()[0],
            "cannot take {n} entries from an axis of length {}",
            self.shape()[0]
        );

        each!(self, a => write_leading(a, n, path.as_ref()))
    }
}

fn write_leading<T>(a: &ArrayD<T>, n: usize, path: &Path) -> Result<Vec<usize>, anyhow::Error>
where
    T: WritableElement,
{
    let view = a.slice_axis(Axis(0), Slice::from(..n));

    let mut w = BufWriter::new(fs::File::create(path)?);
    view.write_npy(&mut w)?;
    w.flush()?;

    Ok(view.shape().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{s, Array3, ShapeBuilder};

    fn cube(n: usize) -> Array3<f32> {
        Array3::from_shape_fn((n, 3, 4), |(i, j, k)| (i * 100 + j * 10 + k) as f32)
    }

    fn roundtrip(a: &NpyArray, n: usize) -> NpyArray {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("cube.npy");

        let shape = a.write_leading(n, &p).unwrap();
        let h = Header::from_path(&p).unwrap();
        assert_eq!(h.shape, shape);

        NpyArray::read(&p, &h).unwrap()
    }

    #[test]
    fn leading_c_order() {
        let a = NpyArray::from(cube(10).into_dyn());
        let l = roundtrip(&a, 4);

        assert_eq!(l.shape(), [4, 3, 4]);
        assert_eq!(l, NpyArray::from(cube(10).slice(s![..4, .., ..]).to_owned().into_dyn()));
    }

    #[test]
    fn leading_fortran_order() {
        let c = cube(6);
        let mut f = Array3::<f32>::zeros((6, 3, 4).f());
        f.assign(&c);

        let l = roundtrip(&NpyArray::from(f.into_dyn()), 2);
        assert_eq!(l, NpyArray::from(cube(2).into_dyn()));
    }

    #[test]
    fn leading_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("cube.npy");

        let a = NpyArray::from(cube(3).into_dyn());
        assert!(a.write_leading(3, &p).is_ok());
        assert!(a.write_leading(4, &p).is_err());
        assert_eq!(a.write_leading(0, &p).unwrap(), [0, 3, 4]);

        let h = Header::from_path(&p).unwrap();
        assert_eq!(h.dtype, Datatype::Float(4));
        assert_eq!(h.shape, [0, 3, 4]);
    }

    #[test]
    fn read_unsupported_type() {
        let h = Header::parse("{'descr': '<c8', 'fortran_order': False, 'shape': (2, 2, 2)}")
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("c.npy");
        fs::write(&p, b"").unwrap();

        assert!(NpyArray::read(&p, &h).is_err());
    }
}
