//! Urchin property-based testing library.
//!
//! This is the main entry point for urchin, providing a convenient API for
//! property-based testing with integrated shrinking in Rust.
//!
//! ```
//! use urchin::*;
//!
//! let prop = for_all(Gen::integral(Range::linear(0, 100)), |&x| (0..=100).contains(&x));
//! assert!(prop.check(&Config::default()).is_ok());
//! ```

pub use urchin_core::*;
