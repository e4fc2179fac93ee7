use crate::logging::{log_debug, log_error};
use crate::memory::{
    extract_bits, insert_bits, Field, RawValue, Readable, Register, RepeatedRegister, Writable,
    MAX_FIELD_BITS, MAX_FIELD_BYTES, WORD_SIZE,
};
use crate::transport::MemoryBus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The bus failed to complete a read
    BusRead,
    /// The bus failed to complete a write
    BusWrite,
    /// Tried to write a read-only field (holds the field offset)
    ReadOnly(u32),
    /// Tried to read a write-only field (holds the field offset)
    WriteOnly(u32),
    /// Array element index past the end of the field
    IndexOutOfRange(u16),
    /// Value has bits set above the field width (holds the width)
    ValueTooWide(u16),
    /// Access not aligned to, or not a multiple of, a 32-bit word
    UnalignedAccess(u32),
    /// Field width is zero or does not fit a single transfer (holds the width)
    FieldTooWide(u16),
    /// Link did not come up within the allotted attempts
    LinkTimeout,
}

/// A device's slice of the address space: a bus plus a base address.
///
/// All offsets passed in are relative to `base`.
pub struct RegisterWindow<'a, B> {
    bus: &'a mut B,
    base: u64,
}

#[cfg_attr(not(feature = "async"), maybe_async::maybe_async)]
impl<'a, B> RegisterWindow<'a, B>
where
    B: MemoryBus,
{
    pub fn new(bus: &'a mut B, base: u64) -> Self {
        Self { bus, base }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    /* Generic register ops with mapping */

    pub async fn modify_register<R, F>(&mut self, transform: F) -> Result<(), Error>
    where
        R: Register + Readable + Writable + From<<R as Register>::Raw>,
        <R as Register>::Raw: From<R>,
        F: FnOnce(R) -> R,
    {
        let register = self.read_register::<R>().await?;

        self.write_register::<R>(transform(register)).await
    }

    pub async fn read_register<R>(&mut self) -> Result<R, Error>
    where
        R: Register + Readable + From<<R as Register>::Raw>,
    {
        self.read_raw::<R::Raw>(R::OFFSET).await.map(R::from)
    }

    pub async fn write_register<R>(&mut self, value: R) -> Result<(), Error>
    where
        R: Register + Writable,
        <R as Register>::Raw: From<R>,
    {
        let raw: <R as Register>::Raw = value.into();

        self.write_raw(R::OFFSET, raw).await
    }

    pub async fn read_repeated_register<R>(&mut self, index: R::Index) -> Result<R, Error>
    where
        R: RepeatedRegister + Readable + From<<R as RepeatedRegister>::Raw>,
    {
        let offset = R::get_offset_for(index);

        self.read_raw::<R::Raw>(offset).await.map(R::from)
    }

    pub async fn write_repeated_register<R>(
        &mut self,
        index: R::Index,
        value: R,
    ) -> Result<(), Error>
    where
        R: RepeatedRegister + Writable,
        <R as RepeatedRegister>::Raw: From<R>,
    {
        let offset = R::get_offset_for(index);

        let raw: <R as RepeatedRegister>::Raw = value.into();

        self.write_raw(offset, raw).await
    }

    /* Field ops driven by the declaration tables */

    /// Reads element `index` of `field`, right-aligned
    pub async fn read_field(&mut self, field: &Field, index: u16) -> Result<u128, Error> {
        if !field.is_readable() {
            return Err(Error::WriteOnly(field.offset));
        }

        let (word, shift, len) = Self::locate(field, index)?;

        let mut buf = [0u8; MAX_FIELD_BYTES];
        self.read_block(word, &mut buf[..len]).await?;

        Ok(extract_bits(&buf[..len], shift, field.bit_size))
    }

    /// Writes element `index` of `field`.
    ///
    /// Fields that share their word with other bits are read-modify-written
    /// when readable; write-only fields go out with every other bit cleared.
    pub async fn write_field(&mut self, field: &Field, index: u16, value: u128) -> Result<(), Error> {
        if !field.is_writable() {
            return Err(Error::ReadOnly(field.offset));
        }

        let (word, shift, len) = Self::locate(field, index)?;

        if value & !field.mask() != 0 {
            return Err(Error::ValueTooWide(field.bit_size));
        }

        let mut buf = [0u8; MAX_FIELD_BYTES];
        let whole_words = shift == 0 && field.bit_size as usize == len * 8;

        if field.is_readable() && !whole_words {
            self.read_block(word, &mut buf[..len]).await?;
        }

        insert_bits(&mut buf[..len], shift, field.bit_size, value);

        self.write_block(word, &buf[..len]).await
    }

    fn locate(field: &Field, index: u16) -> Result<(u32, u32, usize), Error> {
        let too_wide = Error::FieldTooWide(field.bit_size);

        if field.bit_size == 0 || field.bit_size > MAX_FIELD_BITS {
            return Err(too_wide);
        }

        let out_of_range = Error::IndexOutOfRange(index);

        let word = field.word_offset(index).ok_or(out_of_range)?;
        let shift = field.bit_shift(index).ok_or(out_of_range)?;
        let len = field.access_len(index).ok_or(out_of_range)?;

        if len > MAX_FIELD_BYTES {
            return Err(too_wide);
        }

        Ok((word, shift, len))
    }

    /* Raw ops (minimal type checking) */

    async fn read_raw<T: RawValue>(&mut self, offset: u32) -> Result<T, Error> {
        let mut buf = [0u8; MAX_FIELD_BYTES];
        self.read_block(offset, &mut buf[..T::BYTES]).await?;

        Ok(T::from_le_slice(&buf))
    }

    async fn write_raw<T: RawValue>(&mut self, offset: u32, value: T) -> Result<(), Error> {
        let mut buf = [0u8; MAX_FIELD_BYTES];
        value.write_le_slice(&mut buf);

        self.write_block(offset, &buf[..T::BYTES]).await
    }

    /// Reads whole words starting at `offset`
    pub async fn read_block(&mut self, offset: u32, data: &mut [u8]) -> Result<(), Error> {
        check_alignment(offset, data.len())?;

        let address = self.base + offset as u64;
        log_debug!("read {} bytes at {:#x}", data.len(), address);

        self.bus.read(address, data).await.map_err(|_| {
            log_error!("bus read at {:#x} failed", address);
            Error::BusRead
        })
    }

    /// Writes whole words starting at `offset`
    pub async fn write_block(&mut self, offset: u32, data: &[u8]) -> Result<(), Error> {
        check_alignment(offset, data.len())?;

        let address = self.base + offset as u64;
        log_debug!("write {} bytes at {:#x}", data.len(), address);

        self.bus.write(address, data).await.map_err(|_| {
            log_error!("bus write at {:#x} failed", address);
            Error::BusWrite
        })
    }
}

fn check_alignment(offset: u32, len: usize) -> Result<(), Error> {
    if offset % WORD_SIZE != 0 || len % WORD_SIZE as usize != 0 || len == 0 {
        return Err(Error::UnalignedAccess(offset));
    }

    Ok(())
}
