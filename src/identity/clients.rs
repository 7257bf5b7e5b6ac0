mod device_code;

#[cfg(test)]
mod fake;

pub use self::device_code::*;

#[cfg(test)]
pub use self::fake::*;
