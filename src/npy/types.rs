/// Byte order of the elements in a `.npy` file.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Order {
    BE,
    LE,
}

impl Order {
    pub fn native() -> Order {
        if cfg!(target_endian = "big") {
            Order::BE
        } else {
            Order::LE
        }
    }
}

/// Element type of a `.npy` array, decoded from the `descr` field of the header.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Datatype {
    Bool,
    UInt(usize),
    Int(usize),
    Float(usize),
    Complex(usize),
    /// Fixed width byte string (`S`), size in bytes.
    Bytes(usize),
    /// Fixed width UCS4 string (`U`), size in characters.
    Unicode(usize),
    /// Any other simple type code, with its size in bytes. A unit such as the `[ns]` of
    /// `<M8[ns]` is not kept.
    Custom(char, usize),
    /// Structured (record) dtype: `descr` is a list, element size is not derived.
    Structured,
    /// A `descr` that could not be decoded. Such arrays can still be copied.
    Opaque,
}

impl Datatype {
    /// Size of one element in bytes, `None` for structured and opaque types.
    pub fn dsize(&self) -> Option<usize> {
        use Datatype::*;

        match self {
            Bool => Some(1),
            UInt(sz) | Int(sz) | Float(sz) | Complex(sz) | Bytes(sz) | Custom(_, sz) => {
                Some(*sz)
            }
            Unicode(n) => n.checked_mul(4),
            Structured | Opaque => None,
        }
    }

    /// Parse a simple type string such as `<f4`, `|b1`, `>i8` or `<M8[ns]`.
    ///
    /// Returns the byte order (`None` when not applicable, e.g. for single bytes) and the
    /// data type.
    pub fn parse(descr: &str) -> Result<(Option<Order>, Datatype), anyhow::Error> {
        let mut chars = descr.chars();

        let (order, rest) = match chars.next() {
            Some('<') => (Some(Order::LE), chars.as_str()),
            Some('>') => (Some(Order::BE), chars.as_str()),
            Some('=') => (Some(Order::native()), chars.as_str()),
            Some('|') => (None, chars.as_str()),
            Some(_) => (None, descr),
            None => bail!("empty dtype descriptor"),
        };

        // datetime64 and timedelta64 carry a unit: `<M8[ns]`, `<m8[s]`.
        let rest = match rest.split_once('[') {
            Some((rest, unit)) => {
                ensure!(unit.ends_with(']'), "invalid unit in descriptor: {descr:?}");
                rest
            }
            None => rest,
        };

        let mut chars = rest.chars();
        let kind = chars
            .next()
            .ok_or_else(|| anyhow!("missing type code in descriptor: {descr:?}"))?;
        let size: usize = chars
            .as_str()
            .parse()
            .map_err(|_| anyhow!("invalid size in descriptor: {descr:?}"))?;

        let dtype = match kind {
            'b' => {
                ensure!(size == 1, "invalid bool size in descriptor: {descr:?}");
                Datatype::Bool
            }
            'u' => Datatype::UInt(size),
            'i' => Datatype::Int(size),
            'f' => Datatype::Float(size),
            'c' => Datatype::Complex(size),
            'S' | 'a' => Datatype::Bytes(size),
            'U' => {
                ensure!(size.checked_mul(4).is_some(), "invalid size in descriptor: {descr:?}");
                Datatype::Unicode(size)
            }
            k => Datatype::Custom(k, size),
        };

        // Single byte types are written with `|`, but `<u1` is just as valid.
        let order = match dtype.dsize() {
            Some(1) => None,
            _ => order,
        };

        Ok((order, dtype))
    }
}
