//! Sports data provider abstractions and implementations.
//!
//! This module contains:
//! - The `SportsDataProvider` trait that all provider families implement
//! - Concrete provider implementations (Statshub, Fieldpass)
//!
//! Providers are variants behind one shared capability interface: callers
//! never branch on a provider name, they invoke the same four operations on
//! whatever adapter the registry bound. Adapters differ only in endpoints
//! and payload decoding.

mod traits;

pub mod fieldpass;
pub mod statshub;

pub use fieldpass::FieldpassProvider;
pub use statshub::StatshubProvider;
pub use traits::SportsDataProvider;
