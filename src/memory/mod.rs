pub mod combine;
pub mod rx_core;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Base address of the AMC carrier core. Its register map is supplied by the
/// carrier firmware libraries and is only exposed here as a raw window.
pub const CARRIER_CORE_BASE: u64 = 0x0000_0000;

/// Base address of the application region holding the message receivers
pub const APPLICATION_BASE: u64 = 0x8000_0000;

/// Distance between two consecutive per-lane receiver cores
pub const RX_CORE_STRIDE: u64 = 0x1000_0000;

/// Number of per-lane receiver cores in the application
pub const RX_CORE_COUNT: usize = 4;

/// Offset of the combine block, relative to [`APPLICATION_BASE`]
pub const COMBINE_OFFSET: u64 = 0x4000_0000;

/// Every bus transaction is a whole number of 32-bit words on a word boundary
pub const WORD_SIZE: u32 = 4;

/// Widest field a single element access can carry
pub const MAX_FIELD_BITS: u16 = 128;

/// Largest transfer needed for a single field element: a 128-bit value plus
/// the worst-case byte shift inside its first word.
pub const MAX_FIELD_BYTES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl Access {
    pub const fn is_readable(self) -> bool {
        matches!(self, Access::ReadOnly | Access::ReadWrite)
    }

    pub const fn is_writable(self) -> bool {
        matches!(self, Access::WriteOnly | Access::ReadWrite)
    }
}

/// Message receiver lane. Selects one of the per-lane cores and indexes the
/// per-lane arrays of the combine block.
#[derive(Debug, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Lane {
    Lane0 = 0,
    Lane1 = 1,
    Lane2 = 2,
    Lane3 = 3,
}

impl Lane {
    pub const ALL: [Lane; RX_CORE_COUNT] = [Lane::Lane0, Lane::Lane1, Lane::Lane2, Lane::Lane3];

    /// Absolute base address of this lane's receiver core
    pub fn rx_core_base(self) -> u64 {
        APPLICATION_BASE + RX_CORE_STRIDE * u8::from(self) as u64
    }
}

/// Absolute base address of the combine block
pub const fn combine_base() -> u64 {
    APPLICATION_BASE + COMBINE_OFFSET
}

/// Alarm severity attached to each BSA value
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Severity {
    #[default]
    NoAlarm = 0,
    Minor = 1,
    Major = 2,
    Invalid = 3,
}

impl Severity {
    /// Decodes the 2-bit severity field, ignoring any higher bits
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Severity::NoAlarm,
            1 => Severity::Minor,
            2 => Severity::Major,
            _ => Severity::Invalid,
        }
    }
}

/// Little-endian register payload as it travels over the bus
pub trait RawValue: Copy {
    const BYTES: usize;

    fn from_le_slice(bytes: &[u8]) -> Self;

    fn write_le_slice(self, bytes: &mut [u8]);
}

macro_rules! impl_raw_value {
    ($($int:ty),*) => {
        $(
            impl RawValue for $int {
                const BYTES: usize = core::mem::size_of::<$int>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; core::mem::size_of::<$int>()];
                    buf.copy_from_slice(&bytes[..Self::BYTES]);
                    Self::from_le_bytes(buf)
                }

                fn write_le_slice(self, bytes: &mut [u8]) {
                    bytes[..Self::BYTES].copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_raw_value!(u32, u64, u128);

/// Represents a register that has a single unique location in its device window
pub trait Register {
    type Raw: RawValue;

    const OFFSET: u32;
    const ACCESS: Access;
}

/// Represents a register whose structure is reused at several locations
pub trait RepeatedRegister {
    type Raw: RawValue;
    type Index: Copy;

    const ACCESS: Access;

    fn get_offset_for(index: Self::Index) -> u32;
}

/// Marker for registers the firmware lets us read
pub trait Readable {}

/// Marker for registers the firmware lets us write
pub trait Writable {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArrayShape {
    pub count: u16,
    pub stride: u32,
}

/// Declaration of one named register field inside a device window.
///
/// Offsets are byte offsets. A field that does not start on a word boundary
/// (e.g. `CPllLock` at `0x401`) lives inside the word below it, shifted up by
/// eight bits per byte of misalignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub description: &'static str,
    pub offset: u32,
    pub bit_size: u16,
    pub access: Access,
    pub array: Option<ArrayShape>,
    /// Poll interval in seconds, `None` for fields that are never polled
    pub poll_interval: Option<u8>,
    pub units: Option<&'static str>,
}

impl Field {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        offset: u32,
        bit_size: u16,
        access: Access,
    ) -> Self {
        Self {
            name,
            description,
            offset,
            bit_size,
            access,
            array: None,
            poll_interval: None,
            units: None,
        }
    }

    pub const fn array(self, count: u16, stride: u32) -> Self {
        Self {
            array: Some(ArrayShape { count, stride }),
            ..self
        }
    }

    pub const fn poll(self, seconds: u8) -> Self {
        Self {
            poll_interval: Some(seconds),
            ..self
        }
    }

    pub const fn units(self, units: &'static str) -> Self {
        Self {
            units: Some(units),
            ..self
        }
    }

    pub const fn element_count(&self) -> u16 {
        match self.array {
            Some(shape) => shape.count,
            None => 1,
        }
    }

    pub const fn is_readable(&self) -> bool {
        self.access.is_readable()
    }

    pub const fn is_writable(&self) -> bool {
        self.access.is_writable()
    }

    pub const fn is_polled(&self) -> bool {
        self.poll_interval.is_some()
    }

    /// Mask covering `bit_size` low bits
    pub const fn mask(&self) -> u128 {
        if self.bit_size >= 128 {
            u128::MAX
        } else {
            (1u128 << self.bit_size) - 1
        }
    }

    /// Byte offset of array element `index`, `None` when out of range
    pub fn element_offset(&self, index: u16) -> Option<u32> {
        if index >= self.element_count() {
            return None;
        }

        let stride = self.array.map_or(0, |shape| shape.stride);

        Some(self.offset + index as u32 * stride)
    }

    /// Offset of the word holding the first bit of element `index`
    pub fn word_offset(&self, index: u16) -> Option<u32> {
        self.element_offset(index)
            .map(|offset| offset & !(WORD_SIZE - 1))
    }

    /// Position of the element's least significant bit within its word
    pub fn bit_shift(&self, index: u16) -> Option<u32> {
        self.element_offset(index)
            .map(|offset| (offset & (WORD_SIZE - 1)) * 8)
    }

    /// Number of bytes that must be transferred to reach the whole element
    pub fn access_len(&self, index: u16) -> Option<usize> {
        let shift = self.bit_shift(index)?;
        let bits = shift + self.bit_size as u32;

        Some((bits.div_ceil(32) * WORD_SIZE) as usize)
    }
}

/// Looks a field up by its exact name
pub fn find(map: &'static [Field], name: &str) -> Option<&'static Field> {
    map.iter().find(|field| field.name == name)
}

/// Reads `bits` bits starting at bit `shift` of a little-endian byte buffer
pub(crate) fn extract_bits(bytes: &[u8], shift: u32, bits: u16) -> u128 {
    let mut value = 0u128;

    for bit in 0..bits as u32 {
        let pos = shift + bit;

        if (bytes[(pos / 8) as usize] >> (pos % 8)) & 1 == 1 {
            value |= 1u128 << bit;
        }
    }

    value
}

/// Writes the low `bits` bits of `value` at bit `shift`, leaving the rest alone
pub(crate) fn insert_bits(bytes: &mut [u8], shift: u32, bits: u16, value: u128) {
    for bit in 0..bits as u32 {
        let pos = shift + bit;
        let byte = &mut bytes[(pos / 8) as usize];
        let mask = 1u8 << (pos % 8);

        if (value >> bit) & 1 == 1 {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}
