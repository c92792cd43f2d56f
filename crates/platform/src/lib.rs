//! Atlas Platform - blockchain adapters.
//!
//! Each supported chain implements [`Platform`] and normalizes its node's
//! payloads into the canonical records of `atlas_core`:
//!
//! - [`algorand`] - payments only, no staking
//! - [`cosmos`] - bank transfers, validators with computed annual reward,
//!   active and unbonding delegations
//!
//! Platforms are looked up by coin handle through [`PlatformRegistry`].

pub mod algorand;
pub mod cosmos;
pub mod directory;
pub mod errors;
pub mod registry;
mod traits;

pub use algorand::AlgorandPlatform;
pub use cosmos::CosmosPlatform;
pub use directory::{LiveValidatorDirectory, ValidatorDirectory};
pub use errors::PlatformError;
pub use registry::PlatformRegistry;
pub use traits::Platform;
