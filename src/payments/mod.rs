//! Donation packs paid through an external crypto payment provider.

pub mod desk;
pub mod gateway;
pub mod types;

pub use desk::{credit_pack, PaymentDesk};
pub use gateway::{CryptoPayClient, PaymentGateway};
pub use types::*;
