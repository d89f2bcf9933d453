//! Mediascout-Common: Shared types, errors, and helpers.
//!
//! This crate provides common functionality used across mediascout:
//!
//! - **Provider Types**: The [`ProviderKey`] enum naming each upstream adapter
//! - **Error Handling**: Common error type and result alias for provider calls
//! - **Text Utilities**: Year extraction, comma-segment slicing, truncation
//! - **Rating Utilities**: Rescaling of provider-native scores onto 0-5
//!
//! # Examples
//!
//! ```
//! use mediascout_common::{ProviderKey, Error, Result};
//! use mediascout_common::rating::rescale_ten_point;
//!
//! let key: ProviderKey = "place".parse().unwrap();
//! assert_eq!(key, ProviderKey::Place);
//!
//! assert_eq!(rescale_ten_point(Some(8.0)), Some(4.0));
//! assert_eq!(rescale_ten_point(Some(0.0)), None);
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_configured("game"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod rating;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
