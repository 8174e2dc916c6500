// Adapters layer: concrete implementations of domain ports for external libraries.

pub mod phonenumber_util;

pub use phonenumber_util::LibPhoneNumberUtil;
