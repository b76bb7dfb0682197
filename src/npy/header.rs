//! The `.npy` preamble: magic string, format version and the header dictionary.
//!
//! The header dictionary is a Python literal, e.g.:
//!
//! ```text
//! {'descr': '<f4', 'fortran_order': False, 'shape': (1060, 400, 400), }
//! ```
//!
//! It is parsed with [py_literal](https://docs.rs/py_literal), the same way `ndarray-npy`
//! reads it.
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;
use byteorder::{LittleEndian, ReadBytesExt};
use py_literal::Value;

use super::types::{Datatype, Order};

pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Format version (major, minor).
    pub version: (u8, u8),
    /// The `descr` field as written, or the literal text for structured types.
    pub descr: String,
    pub dtype: Datatype,
    /// `None` for single byte, structured and opaque types.
    pub order: Option<Order>,
    pub fortran_order: bool,
    pub shape: Vec<usize>,
    /// Offset in bytes of the array data from the start of the file.
    pub data_offset: u64,
}

impl Header {
    /// Read the header of the `.npy` file at `path`.
    pub fn from_path<P>(path: P) -> Result<Header, anyhow::Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let f = fs::File::open(path)?;
        Header::read(&mut BufReader::new(f))
            .with_context(|| format!("reading npy header of {}", path.display()))
    }

    /// Read a header from the start of a `.npy` stream. The reader is left positioned at
    /// the start of the array data.
    pub fn read<R: Read>(r: &mut R) -> Result<Header, anyhow::Error> {
        let mut magic = [0u8; 6];
        r.read_exact(&mut magic)?;
        ensure!(&magic == MAGIC, "not a npy file (bad magic string)");

        let major = r.read_u8()?;
        let minor = r.read_u8()?;

        let (hlen, prelude) = match major {
            1 => (r.read_u16::<LittleEndian>()? as usize, 10),
            2 | 3 => (r.read_u32::<LittleEndian>()? as usize, 12),
            v => bail!("unsupported npy format version: {v}.{minor}"),
        };

        let mut buf = vec![0u8; hlen];
        r.read_exact(&mut buf)?;

        let text = if major == 3 {
            String::from_utf8(buf).context("header is not valid utf-8")?
        } else {
            // latin1
            buf.iter().map(|&b| b as char).collect()
        };

        let mut header = Header::parse(&text)?;
        header.version = (major, minor);
        header.data_offset = (prelude + hlen) as u64;

        Ok(header)
    }

    /// Parse the header dictionary.
    pub fn parse(text: &str) -> Result<Header, anyhow::Error> {
        let dict = match text
            .trim()
            .parse::<Value>()
            .map_err(|e| anyhow!("invalid header dictionary: {e}"))?
        {
            Value::Dict(d) => d,
            v => bail!("header is not a dictionary: {v}"),
        };

        let get = |key: &str| {
            dict.iter()
                .find(|(k, _)| matches!(k, Value::String(s) if s == key))
                .map(|(_, v)| v)
                .ok_or_else(|| anyhow!("missing key in header: {key:?}"))
        };

        let (descr, order, dtype) = match get("descr")? {
            Value::String(s) => match Datatype::parse(s) {
                Ok((order, dtype)) => (s.clone(), order, dtype),
                Err(e) => {
                    debug!("opaque element type {s:?}: {e}");
                    (s.clone(), None, Datatype::Opaque)
                }
            },
            v @ Value::List(_) => (v.to_string(), None, Datatype::Structured),
            v => bail!("invalid descr: {v}"),
        };

        let fortran_order = match get("fortran_order")? {
            Value::Boolean(b) => *b,
            v => bail!("invalid fortran_order: {v}"),
        };

        let shape = match get("shape")? {
            Value::Tuple(dims) => dims
                .iter()
                .map(|d| match d {
                    Value::Integer(n) => usize::try_from(n)
                        .map_err(|_| anyhow!("invalid dimension in shape: {n}")),
                    v => Err(anyhow!("invalid dimension in shape: {v}")),
                })
                .collect::<Result<Vec<_>, _>>()?,
            v => bail!("invalid shape: {v}"),
        };

        Ok(Header {
            version: (1, 0),
            descr,
            dtype,
            order,
            fortran_order,
            shape,
            data_offset: 0,
        })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    pub fn size(&self) -> Result<usize, anyhow::Error> {
        self.shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| anyhow!("shape overflows: {:?}", self.shape))
    }

    /// Length in bytes of the array data, `None` if the element size is not known.
    pub fn data_len(&self) -> Result<Option<u64>, anyhow::Error> {
        let size = self.size()?;

        self.dtype
            .dsize()
            .map(|sz| {
                (size as u64)
                    .checked_mul(sz as u64)
                    .ok_or_else(|| anyhow!("shape overflows: {:?}", self.shape))
            })
            .transpose()
    }

    /// Check that a file of `file_len` bytes is large enough to hold the array data.
    pub fn check_len(&self, file_len: u64) -> Result<(), anyhow::Error> {
        if let Some(len) = self.data_len()? {
            let expected = self
                .data_offset
                .checked_add(len)
                .ok_or_else(|| anyhow!("shape overflows: {:?}", self.shape))?;
            ensure!(
                file_len >= expected,
                "file is truncated: expected {expected} bytes, found {file_len}"
            );
        }

        Ok(())
    }
}
