// Logging shims. `log` wins when both backends are enabled; with neither,
// the macros compile away so the tick path carries no formatting code.

#[cfg(feature = "log")]
macro_rules! ecg_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! ecg_trace {
    ($($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! ecg_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! ecg_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! ecg_debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! ecg_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! ecg_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! ecg_info {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! ecg_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! ecg_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(all(feature = "defmt", not(feature = "log")))]
macro_rules! ecg_warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! ecg_warn {
    ($($arg:tt)*) => {};
}
