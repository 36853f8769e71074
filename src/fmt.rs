//! Logging macros for the library.
//!
//! On the RP2350 these forward to `defmt` (the firmware links `defmt-rtt`). On the
//! host they compile to nothing, so tests do not need a global logger. Arguments are
//! still borrowed on the host to keep "unused variable" warnings away.

#![allow(unused_macros)]

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(target_arch = "arm"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(not(target_arch = "arm"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(target_arch = "arm")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(not(target_arch = "arm"))]
        let _ = ($( & $x ),*);
    }};
}
