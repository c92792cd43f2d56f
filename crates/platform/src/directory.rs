//! Validator lookup used when normalizing delegations.

use async_trait::async_trait;

use atlas_core::ValidatorMap;

use crate::errors::PlatformError;
use crate::traits::Platform;

/// Source of the validator set a delegation is resolved against.
#[async_trait]
pub trait ValidatorDirectory: Send + Sync {
    async fn validators_map(&self, platform: &dyn Platform) -> Result<ValidatorMap, PlatformError>;
}

/// Directory that asks the platform for its current validators on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveValidatorDirectory;

#[async_trait]
impl ValidatorDirectory for LiveValidatorDirectory {
    async fn validators_map(&self, platform: &dyn Platform) -> Result<ValidatorMap, PlatformError> {
        let validators = platform
            .get_validators()
            .await
            .map_err(|e| PlatformError::Directory {
                platform: platform.coin().handle,
                source: Box::new(e),
            })?;

        Ok(validators.into_iter().map(|v| (v.id.clone(), v)).collect())
    }
}
