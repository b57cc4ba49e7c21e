//! Minimal netCDF classic-format reader and writer.
//!
//! Covers what a PALM static driver needs: fixed-size variables of the six
//! classic types, variable and global attributes. Files are written as CDF-1;
//! CDF-2 (64-bit offset) files are accepted on read. Record (unlimited)
//! variables are rejected. All values are big-endian.

use std::io::{self, Write};

const MAGIC: &[u8; 3] = b"CDF";

const NC_DIMENSION: u32 = 0x0A;
const NC_VARIABLE: u32 = 0x0B;
const NC_ATTRIBUTE: u32 = 0x0C;

/// On-disk format variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    /// CDF-1, 32-bit data offsets
    #[default]
    Classic,
    /// CDF-2, 64-bit data offsets
    Offset64,
}

impl Version {
    fn byte(self) -> u8 {
        match self {
            Version::Classic => 1,
            Version::Offset64 => 2,
        }
    }
}

/// External data types of the classic format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NcType {
    Byte,
    Char,
    Short,
    Int,
    Float,
    Double,
}

impl NcType {
    fn code(self) -> u32 {
        match self {
            NcType::Byte => 1,
            NcType::Char => 2,
            NcType::Short => 3,
            NcType::Int => 4,
            NcType::Float => 5,
            NcType::Double => 6,
        }
    }

    fn from_code(code: u32) -> io::Result<Self> {
        match code {
            1 => Ok(NcType::Byte),
            2 => Ok(NcType::Char),
            3 => Ok(NcType::Short),
            4 => Ok(NcType::Int),
            5 => Ok(NcType::Float),
            6 => Ok(NcType::Double),
            _ => Err(invalid(format!("Unknown nc_type: {}", code))),
        }
    }

    /// Size of one element in bytes
    pub fn size(self) -> usize {
        match self {
            NcType::Byte | NcType::Char => 1,
            NcType::Short => 2,
            NcType::Int | NcType::Float => 4,
            NcType::Double => 8,
        }
    }
}

/// A typed array of values
#[derive(Debug, Clone, PartialEq)]
pub enum NcValues {
    Byte(Vec<i8>),
    Char(Vec<u8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl NcValues {
    /// Text attribute value
    pub fn text(s: &str) -> Self {
        NcValues::Char(s.as_bytes().to_vec())
    }

    pub fn nc_type(&self) -> NcType {
        match self {
            NcValues::Byte(_) => NcType::Byte,
            NcValues::Char(_) => NcType::Char,
            NcValues::Short(_) => NcType::Short,
            NcValues::Int(_) => NcType::Int,
            NcValues::Float(_) => NcType::Float,
            NcValues::Double(_) => NcType::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NcValues::Byte(v) => v.len(),
            NcValues::Char(v) => v.len(),
            NcValues::Short(v) => v.len(),
            NcValues::Int(v) => v.len(),
            NcValues::Float(v) => v.len(),
            NcValues::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Char values as a string, trailing NULs stripped
    pub fn as_text(&self) -> Option<String> {
        match self {
            NcValues::Char(bytes) => {
                let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
                Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
            }
            _ => None,
        }
    }

    /// Numeric value at `index`, widened to f64. None for text.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        match self {
            NcValues::Byte(v) => v.get(index).map(|&x| x as f64),
            NcValues::Char(_) => None,
            NcValues::Short(v) => v.get(index).map(|&x| x as f64),
            NcValues::Int(v) => v.get(index).map(|&x| x as f64),
            NcValues::Float(v) => v.get(index).map(|&x| x as f64),
            NcValues::Double(v) => v.get(index).copied(),
        }
    }

    /// All numeric values widened to f64. Empty for text.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match self {
            NcValues::Byte(v) => v.iter().map(|&x| x as f64).collect(),
            NcValues::Char(_) => Vec::new(),
            NcValues::Short(v) => v.iter().map(|&x| x as f64).collect(),
            NcValues::Int(v) => v.iter().map(|&x| x as f64).collect(),
            NcValues::Float(v) => v.iter().map(|&x| x as f64).collect(),
            NcValues::Double(v) => v.clone(),
        }
    }

    fn byte_len(&self) -> usize {
        self.len() * self.nc_type().size()
    }

    fn write_be(&self, writer: &mut impl Write) -> io::Result<()> {
        let mut buf = Vec::with_capacity(self.byte_len());
        match self {
            NcValues::Byte(v) => buf.extend(v.iter().map(|&x| x as u8)),
            NcValues::Char(v) => buf.extend_from_slice(v),
            NcValues::Short(v) => v.iter().for_each(|x| buf.extend_from_slice(&x.to_be_bytes())),
            NcValues::Int(v) => v.iter().for_each(|x| buf.extend_from_slice(&x.to_be_bytes())),
            NcValues::Float(v) => v.iter().for_each(|x| buf.extend_from_slice(&x.to_be_bytes())),
            NcValues::Double(v) => v.iter().for_each(|x| buf.extend_from_slice(&x.to_be_bytes())),
        }
        writer.write_all(&buf)
    }

    fn read_be(bytes: &[u8], nc_type: NcType) -> Self {
        match nc_type {
            NcType::Byte => NcValues::Byte(bytes.iter().map(|&b| b as i8).collect()),
            NcType::Char => NcValues::Char(bytes.to_vec()),
            NcType::Short => NcValues::Short(
                bytes.chunks_exact(2).map(|c| i16::from_be_bytes([c[0], c[1]])).collect(),
            ),
            NcType::Int => NcValues::Int(
                bytes.chunks_exact(4).map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]])).collect(),
            ),
            NcType::Float => NcValues::Float(
                bytes.chunks_exact(4).map(|c| f32::from_be_bytes([c[0], c[1], c[2], c[3]])).collect(),
            ),
            NcType::Double => NcValues::Double(
                bytes
                    .chunks_exact(8)
                    .map(|c| f64::from_be_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                    .collect(),
            ),
        }
    }
}

/// Named dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    /// Zero marks the record dimension
    pub len: usize,
}

/// Named attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub values: NcValues,
}

/// Variable with its data held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Indices into the dataset's dimensions, slowest-varying first
    pub dim_ids: Vec<usize>,
    pub attrs: Vec<Attribute>,
    pub values: NcValues,
}

impl Variable {
    /// Set or replace an attribute
    pub fn set_attribute(&mut self, name: &str, values: NcValues) -> &mut Self {
        set_attr(&mut self.attrs, name, values);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&NcValues> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.values)
    }

    /// `_FillValue` widened to f64, if declared
    pub fn fill_value(&self) -> Option<f64> {
        self.attribute("_FillValue").and_then(|v| v.get_f64(0))
    }
}

/// In-memory netCDF dataset
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub version: Version,
    dims: Vec<Dimension>,
    attrs: Vec<Attribute>,
    vars: Vec<Variable>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dimension, returning its id
    pub fn add_dimension(&mut self, name: &str, len: usize) -> usize {
        self.dims.push(Dimension {
            name: name.to_string(),
            len,
        });
        self.dims.len() - 1
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dims.iter().find(|d| d.name == name)
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dims
    }

    /// Set or replace a global attribute
    pub fn set_attribute(&mut self, name: &str, values: NcValues) -> &mut Self {
        set_attr(&mut self.attrs, name, values);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&NcValues> {
        self.attrs.iter().find(|a| a.name == name).map(|a| &a.values)
    }

    /// Add a variable over the named dimensions. The value count must match their product.
    pub fn add_variable(&mut self, name: &str, dims: &[&str], values: NcValues) -> io::Result<&mut Variable> {
        let dim_ids = dims
            .iter()
            .map(|dim| {
                self.dims
                    .iter()
                    .position(|d| d.name == *dim)
                    .ok_or_else(|| invalid(format!("Unknown dimension '{}' for variable '{}'", dim, name)))
            })
            .collect::<io::Result<Vec<_>>>()?;

        let expected: usize = dim_ids.iter().map(|&id| self.dims[id].len).product();
        if values.len() != expected {
            return Err(invalid(format!(
                "Variable '{}' has {} values, dimensions require {}",
                name,
                values.len(),
                expected
            )));
        }

        self.vars.push(Variable {
            name: name.to_string(),
            dim_ids,
            attrs: Vec::new(),
            values,
        });
        let last = self.vars.len() - 1;
        Ok(&mut self.vars[last])
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.vars.iter().find(|v| v.name == name)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.vars
    }

    /// Serialize to netCDF classic bytes
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let vsizes: Vec<usize> = self
            .vars
            .iter()
            .map(|v| v.values.byte_len() + padding(v.values.byte_len()))
            .collect();

        // Header length does not depend on the offset values, only on their width
        let mut header = Vec::new();
        self.write_header(&mut header, &vec![0; self.vars.len()], &vsizes)?;

        let mut begins = Vec::with_capacity(self.vars.len());
        let mut offset = header.len() as u64;
        for &vsize in &vsizes {
            begins.push(offset);
            offset += vsize as u64;
        }
        if self.version == Version::Classic && begins.last().is_some_and(|&b| b > u32::MAX as u64) {
            return Err(invalid("Data too large for CDF-1 offsets".to_string()));
        }

        let mut out = Vec::with_capacity(offset as usize);
        self.write_header(&mut out, &begins, &vsizes)?;
        for var in &self.vars {
            var.values.write_be(&mut out)?;
            out.write_all(&[0u8; 3][..padding(var.values.byte_len())])?;
        }
        Ok(out)
    }

    /// Parse netCDF classic bytes
    pub fn from_bytes(data: &[u8]) -> io::Result<Self> {
        let mut reader = Reader::new(data);

        let magic = reader.take(3)?;
        if magic != MAGIC {
            return Err(invalid("Invalid magic bytes".to_string()));
        }
        let version = match reader.take(1)?[0] {
            1 => Version::Classic,
            2 => Version::Offset64,
            v => return Err(invalid(format!("Unsupported netCDF version byte: {}", v))),
        };

        let _numrecs = reader.u32()?;

        // Dimensions
        let mut dims = Vec::new();
        let count = reader.list_header(NC_DIMENSION)?;
        for _ in 0..count {
            let name = reader.name()?;
            let len = reader.u32()? as usize;
            dims.push(Dimension { name, len });
        }

        let attrs = reader.attr_list()?;

        // Variable headers, then data by offset
        let mut vars = Vec::new();
        let count = reader.list_header(NC_VARIABLE)?;
        for _ in 0..count {
            let name = reader.name()?;
            let ndims = reader.u32()? as usize;
            let mut dim_ids = Vec::with_capacity(ndims.min(16));
            for _ in 0..ndims {
                let id = reader.u32()? as usize;
                if id >= dims.len() {
                    return Err(invalid(format!("Variable '{}' references unknown dimension {}", name, id)));
                }
                dim_ids.push(id);
            }
            let var_attrs = reader.attr_list()?;
            let nc_type = NcType::from_code(reader.u32()?)?;
            let _vsize = reader.u32()?;
            let begin = match version {
                Version::Classic => reader.u32()? as u64,
                Version::Offset64 => reader.u64()?,
            };

            if dim_ids.iter().any(|&id| dims[id].len == 0) {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("Record variable '{}' is not supported", name),
                ));
            }

            let byte_len = dim_ids
                .iter()
                .try_fold(nc_type.size(), |acc, &id| acc.checked_mul(dims[id].len))
                .ok_or_else(|| invalid(format!("Variable '{}' is too large", name)))?;
            let start = usize::try_from(begin)
                .map_err(|_| invalid(format!("Variable '{}' offset out of range", name)))?;
            let bytes = start
                .checked_add(byte_len)
                .and_then(|end| data.get(start..end))
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("Data for variable '{}' runs past end of file", name),
                    )
                })?;

            vars.push(Variable {
                name,
                dim_ids,
                attrs: var_attrs,
                values: NcValues::read_be(bytes, nc_type),
            });
        }

        Ok(Self {
            version,
            dims,
            attrs,
            vars,
        })
    }

    fn write_header(&self, writer: &mut impl Write, begins: &[u64], vsizes: &[usize]) -> io::Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_all(&[self.version.byte()])?;
        write_u32(writer, 0)?; // numrecs

        if self.dims.is_empty() {
            write_absent(writer)?;
        } else {
            write_u32(writer, NC_DIMENSION)?;
            write_u32(writer, self.dims.len() as u32)?;
            for dim in &self.dims {
                write_name(writer, &dim.name)?;
                write_u32(writer, dim.len as u32)?;
            }
        }

        write_attr_list(writer, &self.attrs)?;

        if self.vars.is_empty() {
            write_absent(writer)?;
        } else {
            write_u32(writer, NC_VARIABLE)?;
            write_u32(writer, self.vars.len() as u32)?;
            for ((var, &begin), &vsize) in self.vars.iter().zip(begins).zip(vsizes) {
                write_name(writer, &var.name)?;
                write_u32(writer, var.dim_ids.len() as u32)?;
                for &id in &var.dim_ids {
                    write_u32(writer, id as u32)?;
                }
                write_attr_list(writer, &var.attrs)?;
                write_u32(writer, var.values.nc_type().code())?;
                write_u32(writer, u32::try_from(vsize).unwrap_or(u32::MAX))?;
                match self.version {
                    Version::Classic => write_u32(writer, begin as u32)?,
                    Version::Offset64 => writer.write_all(&begin.to_be_bytes())?,
                }
            }
        }
        Ok(())
    }
}

fn set_attr(attrs: &mut Vec<Attribute>, name: &str, values: NcValues) {
    match attrs.iter_mut().find(|a| a.name == name) {
        Some(existing) => existing.values = values,
        None => attrs.push(Attribute {
            name: name.to_string(),
            values,
        }),
    }
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

fn invalid(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

fn write_u32(writer: &mut impl Write, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_be_bytes())
}

fn write_absent(writer: &mut impl Write) -> io::Result<()> {
    write_u32(writer, 0)?;
    write_u32(writer, 0)
}

fn write_name(writer: &mut impl Write, name: &str) -> io::Result<()> {
    write_u32(writer, name.len() as u32)?;
    writer.write_all(name.as_bytes())?;
    writer.write_all(&[0u8; 3][..padding(name.len())])
}

fn write_attr_list(writer: &mut impl Write, attrs: &[Attribute]) -> io::Result<()> {
    if attrs.is_empty() {
        return write_absent(writer);
    }
    write_u32(writer, NC_ATTRIBUTE)?;
    write_u32(writer, attrs.len() as u32)?;
    for attr in attrs {
        write_name(writer, &attr.name)?;
        write_u32(writer, attr.values.nc_type().code())?;
        write_u32(writer, attr.values.len() as u32)?;
        attr.values.write_be(writer)?;
        writer.write_all(&[0u8; 3][..padding(attr.values.byte_len())])?;
    }
    Ok(())
}

/// Bounds-checked big-endian cursor over the header
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> io::Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "Truncated netCDF header"))?;
        let data = self.data;
        let slice = &data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self) -> io::Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> io::Result<u64> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    fn name(&mut self) -> io::Result<String> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        self.take(padding(len))?;
        String::from_utf8(bytes.to_vec()).map_err(|e| invalid(format!("Invalid name: {}", e)))
    }

    /// Element count of a tagged list; zero for ABSENT
    fn list_header(&mut self, tag: u32) -> io::Result<usize> {
        let found = self.u32()?;
        let count = self.u32()? as usize;
        match found {
            0 if count == 0 => Ok(0),
            t if t == tag => Ok(count),
            t => Err(invalid(format!("Expected list tag {:#x}, found {:#x}", tag, t))),
        }
    }

    fn attr_list(&mut self) -> io::Result<Vec<Attribute>> {
        let count = self.list_header(NC_ATTRIBUTE)?;
        let mut attrs = Vec::new();
        for _ in 0..count {
            let name = self.name()?;
            let nc_type = NcType::from_code(self.u32()?)?;
            let nelems = self.u32()? as usize;
            let byte_len = nelems
                .checked_mul(nc_type.size())
                .ok_or_else(|| invalid(format!("Attribute '{}' is too large", name)))?;
            let bytes = self.take(byte_len)?;
            self.take(padding(byte_len))?;
            attrs.push(Attribute {
                name,
                values: NcValues::read_be(bytes, nc_type),
            });
        }
        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut ds = Dataset::new();
        ds.add_dimension("x", 3);
        ds.add_dimension("y", 2);
        ds.set_attribute("title", NcValues::text("Test"));
        ds.set_attribute("origin_lat", NcValues::Double(vec![52.5]));
        ds.add_variable("flags", &["y", "x"], NcValues::Byte(vec![1, -127, 3, 4, 5, -1]))
            .unwrap()
            .set_attribute("_FillValue", NcValues::Byte(vec![-127]))
            .set_attribute("long_name", NcValues::text("flags"));
        ds.add_variable("x", &["x"], NcValues::Float(vec![0.5, 1.5, 2.5]))
            .unwrap()
            .set_attribute("axis", NcValues::text("X"));
        ds
    }

    #[test]
    fn test_header_layout() {
        let bytes = sample().to_bytes().unwrap();
        assert_eq!(&bytes[0..4], b"CDF\x01");
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]); // numrecs
        assert_eq!(&bytes[8..12], &NC_DIMENSION.to_be_bytes());
        assert_eq!(&bytes[12..16], &2u32.to_be_bytes());
        // dimension "x": name length 1, padded to 4
        assert_eq!(&bytes[16..20], &1u32.to_be_bytes());
        assert_eq!(&bytes[20..24], b"x\0\0\0");
        assert_eq!(&bytes[24..28], &3u32.to_be_bytes());
        assert_eq!(bytes.len() % 4, 0);
    }

    #[test]
    fn test_roundtrip() {
        let ds = sample();
        let parsed = Dataset::from_bytes(&ds.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, ds);

        let flags = parsed.variable("flags").unwrap();
        assert_eq!(flags.fill_value(), Some(-127.0));
        assert_eq!(flags.values.get_f64(1), Some(-127.0));
        assert_eq!(parsed.attribute("title").unwrap().as_text().as_deref(), Some("Test"));
        assert_eq!(parsed.dimension("y").unwrap().len, 2);
    }

    #[test]
    fn test_offset64_roundtrip() {
        let mut ds = sample();
        ds.version = Version::Offset64;
        let bytes = ds.to_bytes().unwrap();
        assert_eq!(bytes[3], 2);
        assert_eq!(Dataset::from_bytes(&bytes).unwrap(), ds);
    }

    #[test]
    fn test_value_count_checked() {
        let mut ds = Dataset::new();
        ds.add_dimension("x", 4);
        let err = ds.add_variable("v", &["x"], NcValues::Int(vec![1, 2])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(ds.add_variable("v", &["z"], NcValues::Int(vec![])).is_err());
    }

    #[test]
    fn test_bad_magic() {
        let err = Dataset::from_bytes(b"HDF\x01\0\0\0\0").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_truncated() {
        let bytes = sample().to_bytes().unwrap();
        let err = Dataset::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        assert!(Dataset::from_bytes(&bytes[..20]).is_err());
    }

    #[test]
    fn test_oversized_variable_rejected() {
        // One dimension of u32::MAX cells, used three times by a byte variable
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"CDF\x01");
        for word in [0, NC_DIMENSION, 1, 1] {
            bytes.extend_from_slice(&u32::to_be_bytes(word));
        }
        bytes.extend_from_slice(b"d\0\0\0");
        bytes.extend_from_slice(&u32::MAX.to_be_bytes());
        for word in [0, 0, NC_VARIABLE, 1, 1] {
            bytes.extend_from_slice(&u32::to_be_bytes(word));
        }
        bytes.extend_from_slice(b"v\0\0\0");
        for word in [3, 0, 0, 0, 0, 0, 1, 0, 100] {
            bytes.extend_from_slice(&u32::to_be_bytes(word));
        }

        let err = Dataset::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_record_variable_rejected() {
        let mut ds = Dataset::new();
        ds.add_dimension("time", 0);
        ds.add_variable("t", &["time"], NcValues::Double(vec![])).unwrap();
        let bytes = ds.to_bytes().unwrap();
        let err = Dataset::from_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new();
        let bytes = ds.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + 4 + 8 * 3);
        assert_eq!(Dataset::from_bytes(&bytes).unwrap(), ds);
    }

    #[test]
    fn test_text_strips_nul() {
        let v = NcValues::Char(b"abc\0\0".to_vec());
        assert_eq!(v.as_text().as_deref(), Some("abc"));
        assert_eq!(NcValues::Int(vec![1]).as_text(), None);
    }
}
