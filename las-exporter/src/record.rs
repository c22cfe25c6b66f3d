use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use terrain_core::colormap::Color;

/// Point record layout, selected once at configuration time.
///
/// `NoColor` is LAS point data format 0 (20 bytes); `Color` is format 2,
/// which appends a 16-bit RGB triple (26 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    NoColor,
    Color,
}

impl PointFormat {
    pub fn format_id(&self) -> u8 {
        match self {
            PointFormat::NoColor => 0,
            PointFormat::Color => 2,
        }
    }

    pub fn record_length(&self) -> u16 {
        match self {
            PointFormat::NoColor => 20,
            PointFormat::Color => 26,
        }
    }
}

// Synthetic attributes stamped on every record.
const INTENSITY: u16 = 100;
const RETURN_NUMBER: u8 = 1;
const NUMBER_OF_RETURNS: u8 = 1;
const CLASSIFICATION_GROUND: u8 = 2;
const SCAN_ANGLE_RANK: i8 = 0;
const USER_DATA: u8 = 0;
const POINT_SOURCE_ID: u16 = 1;

/// One fixed-size point record: quantized coordinates, synthetic
/// attributes, and (for format 2) a color.
#[derive(Debug, Clone, Copy)]
pub struct PointRecord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: Option<Color>,
}

impl PointRecord {
    pub fn new(x: i32, y: i32, z: i32, color: Option<Color>) -> Self {
        Self { x, y, z, color }
    }

    /// Return number (bits 0-2), number of returns (bits 3-5), scan
    /// direction (bit 6) and edge of flight line (bit 7), packed by
    /// shift/mask so the layout never depends on the host.
    fn flags() -> u8 {
        (RETURN_NUMBER & 0x07) | ((NUMBER_OF_RETURNS & 0x07) << 3)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(self.x)?;
        writer.write_i32::<LittleEndian>(self.y)?;
        writer.write_i32::<LittleEndian>(self.z)?;
        writer.write_u16::<LittleEndian>(INTENSITY)?;
        writer.write_u8(Self::flags())?;
        writer.write_u8(CLASSIFICATION_GROUND)?;
        writer.write_i8(SCAN_ANGLE_RANK)?;
        writer.write_u8(USER_DATA)?;
        writer.write_u16::<LittleEndian>(POINT_SOURCE_ID)?;
        if let Some(color) = self.color {
            writer.write_u16::<LittleEndian>(color.r)?;
            writer.write_u16::<LittleEndian>(color.g)?;
            writer.write_u16::<LittleEndian>(color.b)?;
        }
        Ok(())
    }
}
