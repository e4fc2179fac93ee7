macro_rules! impl_to_from_raw {
    ($ident:ident, $raw:ty) => {
        impl From<$ident> for $raw {
            fn from(reg: $ident) -> Self {
                reg.0
            }
        }

        impl From<$raw> for $ident {
            fn from(int: $raw) -> Self {
                Self(int)
            }
        }
    };
}

macro_rules! access_mode {
    (RO) => {
        $crate::memory::Access::ReadOnly
    };
    (WO) => {
        $crate::memory::Access::WriteOnly
    };
    (RW) => {
        $crate::memory::Access::ReadWrite
    };
}

macro_rules! impl_access {
    ($ident:ident, RO) => {
        impl $crate::memory::Readable for $ident {}
    };
    ($ident:ident, WO) => {
        impl $crate::memory::Writable for $ident {}
    };
    ($ident:ident, RW) => {
        impl $crate::memory::Readable for $ident {}
        impl $crate::memory::Writable for $ident {}
    };
}

macro_rules! impl_register {
    ($ident:ident, $raw:ty, $offset:expr, $mode:ident) => {
        impl $crate::memory::Register for $ident {
            type Raw = $raw;
            const OFFSET: u32 = $offset;
            const ACCESS: $crate::memory::Access = $crate::access_mode!($mode);
        }

        $crate::impl_access!($ident, $mode);
    };
}

macro_rules! impl_repeated_register {
    ($ident:ident, $raw:ty, $index:ty, $mode:ident, $base:expr, $stride:expr) => {
        impl $crate::memory::RepeatedRegister for $ident {
            type Raw = $raw;
            type Index = $index;
            const ACCESS: $crate::memory::Access = $crate::access_mode!($mode);

            fn get_offset_for(index: Self::Index) -> u32 {
                $base + u8::from(index) as u32 * $stride
            }
        }

        $crate::impl_access!($ident, $mode);
    };
}

/// Strobe bits self-clear in firmware, so the only useful write is a 1.
macro_rules! strobe {
        ($register_name:ident, $trigger_name:ident) => {
            concat_idents::concat_idents!(get_name = _, $register_name {
                pub fn $register_name(&self) -> bool {
                    self.get_name()
                }
            });

            concat_idents::concat_idents!(set_value_name = _set_, $register_name,  {
                pub fn $trigger_name(&mut self) {
                    self.set_value_name(true)
                }
            });
        };
    }

pub(crate) use access_mode;
pub(crate) use impl_access;
pub(crate) use impl_register;
pub(crate) use impl_repeated_register;
pub(crate) use impl_to_from_raw;
pub(crate) use strobe;
