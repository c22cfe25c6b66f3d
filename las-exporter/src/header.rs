use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use terrain_core::bounds::Bounds;
use terrain_core::quantize::SCALE;

use crate::record::PointFormat;

pub const FILE_SIGNATURE: &[u8; 4] = b"LASF";
pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 2;
pub const SYSTEM_IDENTIFIER: &str = "SYSTEM_XYZ";
pub const GRID_GENERATING_SOFTWARE: &str = "ASCTOOLS GENERATOR";
pub const SURVEY_GENERATING_SOFTWARE: &str = "LSS2LAS GENERATOR";

/// Fixed creation date stamped into every file. Using a constant instead of
/// the wall clock keeps repeated runs byte-identical.
pub const FILE_CREATION_DAY: u16 = 300;
pub const FILE_CREATION_YEAR: u16 = 2024;

/// Size of the LAS 1.2 public header; also the offset to the first point
/// record, since no variable-length records are emitted.
pub const HEADER_SIZE: u16 = 227;

/// LAS 1.2 public header, produced twice per encode: once as a placeholder
/// with zero count and a zero bounding box, once finalized from the
/// accumulator state.
#[derive(Debug, Clone)]
pub struct Header {
    pub generating_software: &'static str,
    pub format: PointFormat,
    pub num_point_records: u32,
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Header {
    pub fn placeholder(format: PointFormat, generating_software: &'static str) -> Self {
        Self {
            generating_software,
            format,
            num_point_records: 0,
            min: [0.0; 3],
            max: [0.0; 3],
        }
    }

    /// Final header from the accumulator state. An empty bounds (zero
    /// accepted points) keeps the placeholder's zero box.
    pub fn finalized(
        format: PointFormat,
        generating_software: &'static str,
        num_point_records: u32,
        bounds: &Bounds,
    ) -> Self {
        let (min, max) = if bounds.is_empty() {
            ([0.0; 3], [0.0; 3])
        } else {
            (bounds.min, bounds.max)
        };
        Self {
            generating_software,
            format,
            num_point_records,
            min,
            max,
        }
    }

    /// Serialize all 227 bytes, little-endian, packed.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(FILE_SIGNATURE)?;
        writer.write_u16::<LittleEndian>(0)?; // file source id
        writer.write_u16::<LittleEndian>(0)?; // global encoding
        writer.write_u32::<LittleEndian>(0)?; // project id (GUID, unused)
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_u16::<LittleEndian>(0)?;
        writer.write_all(&[0u8; 8])?;
        writer.write_u8(VERSION_MAJOR)?;
        writer.write_u8(VERSION_MINOR)?;
        writer.write_all(&fixed_width::<32>(SYSTEM_IDENTIFIER))?;
        writer.write_all(&fixed_width::<32>(self.generating_software))?;
        writer.write_u16::<LittleEndian>(FILE_CREATION_DAY)?;
        writer.write_u16::<LittleEndian>(FILE_CREATION_YEAR)?;
        writer.write_u16::<LittleEndian>(HEADER_SIZE)?;
        writer.write_u32::<LittleEndian>(u32::from(HEADER_SIZE))?; // offset to point data
        writer.write_u32::<LittleEndian>(0)?; // variable length records
        writer.write_u8(self.format.format_id())?;
        writer.write_u16::<LittleEndian>(self.format.record_length())?;
        writer.write_u32::<LittleEndian>(self.num_point_records)?;
        for _ in 0..5 {
            writer.write_u32::<LittleEndian>(0)?; // points by return
        }
        for _ in 0..3 {
            writer.write_f64::<LittleEndian>(SCALE)?;
        }
        for _ in 0..3 {
            writer.write_f64::<LittleEndian>(0.0)?; // offsets
        }
        for axis in 0..3 {
            writer.write_f64::<LittleEndian>(self.max[axis])?;
            writer.write_f64::<LittleEndian>(self.min[axis])?;
        }
        Ok(())
    }
}

fn fixed_width<const N: usize>(text: &str) -> [u8; N] {
    let mut buffer = [0u8; N];
    let bytes = text.as_bytes();
    let len = bytes.len().min(N);
    buffer[..len].copy_from_slice(&bytes[..len]);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    use byteorder::ByteOrder as _;

    #[test]
    fn placeholder_serializes_to_exactly_header_size() {
        let header = Header::placeholder(PointFormat::NoColor, GRID_GENERATING_SOFTWARE);
        let mut buffer = Vec::new();
        header.write_to(&mut buffer).unwrap();
        assert_eq!(buffer.len(), usize::from(HEADER_SIZE));

        assert_eq!(&buffer[0..4], FILE_SIGNATURE);
        assert_eq!(buffer[24], VERSION_MAJOR);
        assert_eq!(buffer[25], VERSION_MINOR);
        assert_eq!(LittleEndian::read_u16(&buffer[94..96]), HEADER_SIZE);
        assert_eq!(
            LittleEndian::read_u32(&buffer[96..100]),
            u32::from(HEADER_SIZE)
        );
        assert_eq!(LittleEndian::read_u32(&buffer[107..111]), 0);
    }

    #[test]
    fn finalized_copies_count_and_bounds() {
        let mut bounds = Bounds::new();
        bounds.update(0.0, 1.0, 1.0);
        bounds.update(1.0, 2.0, 4.0);

        let header = Header::finalized(PointFormat::Color, SURVEY_GENERATING_SOFTWARE, 3, &bounds);
        let mut buffer = Vec::new();
        header.write_to(&mut buffer).unwrap();

        assert_eq!(buffer[104], 2); // point data format id
        assert_eq!(LittleEndian::read_u16(&buffer[105..107]), 26);
        assert_eq!(LittleEndian::read_u32(&buffer[107..111]), 3);

        // scale block, then offsets, then max/min interleaved per axis
        assert_eq!(LittleEndian::read_f64(&buffer[131..139]), SCALE);
        assert_eq!(LittleEndian::read_f64(&buffer[155..163]), 0.0);
        assert_eq!(LittleEndian::read_f64(&buffer[179..187]), 1.0); // max x
        assert_eq!(LittleEndian::read_f64(&buffer[187..195]), 0.0); // min x
        assert_eq!(LittleEndian::read_f64(&buffer[211..219]), 4.0); // max z
        assert_eq!(LittleEndian::read_f64(&buffer[219..227]), 1.0); // min z
    }

    #[test]
    fn empty_bounds_keep_the_zero_box() {
        let header = Header::finalized(
            PointFormat::NoColor,
            GRID_GENERATING_SOFTWARE,
            0,
            &Bounds::new(),
        );
        assert_eq!(header.min, [0.0; 3]);
        assert_eq!(header.max, [0.0; 3]);
    }

    #[test]
    fn generating_software_is_zero_padded() {
        let padded = fixed_width::<32>(GRID_GENERATING_SOFTWARE);
        assert_eq!(&padded[..18], GRID_GENERATING_SOFTWARE.as_bytes());
        assert!(padded[18..].iter().all(|&b| b == 0));
    }
}
