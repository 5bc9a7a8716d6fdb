//! Built-in transforms.

pub mod debug;
pub mod encrypt;
pub mod zip;

pub use debug::DebugTransform;
#[cfg(feature = "encryption")]
pub use encrypt::EncryptTransform;
#[cfg(feature = "compression")]
pub use zip::ZipTransform;
