use std::collections::HashMap;

use alloy::providers::DynProvider;

use crate::{error::SdkError, types::ChainId};

/// Capability handing out connected providers per chain.
///
/// Injected into [`crate::client::PerpClient`] so tests can substitute
/// a connector that refuses to dial out, proving that cache-served
/// paths perform no chain access.
pub trait ChainConnector: Send + Sync {
    fn provider(&self, chain_id: ChainId) -> Result<DynProvider, SdkError>;
}

/// Connector over a prebuilt set of providers.
///
/// An empty connector fails every lookup with
/// [`SdkError::UnknownChain`], which makes it the fail-closed
/// substitute used in tests.
#[derive(Clone, Debug, Default)]
pub struct StaticConnector {
    providers: HashMap<ChainId, DynProvider>,
}

impl StaticConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, chain_id: ChainId, provider: DynProvider) -> Self {
        self.providers.insert(chain_id, provider);
        self
    }
}

impl ChainConnector for StaticConnector {
    fn provider(&self, chain_id: ChainId) -> Result<DynProvider, SdkError> {
        self.providers
            .get(&chain_id)
            .cloned()
            .ok_or(SdkError::UnknownChain(chain_id))
    }
}
