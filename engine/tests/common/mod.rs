#![allow(dead_code)]

use std::sync::Arc;

use aurum_engine::{EngineConfig, EngineContext};
use aurum_nullables::{
    MemoryAssetRecordStore, MemoryMintRegistry, NullLedgerClient, NullMetadataFetcher,
};
use aurum_signer::SigningAuthority;
use aurum_types::OwnerAddress;

pub type TestContext = EngineContext<NullLedgerClient, NullMetadataFetcher>;

pub const OPERATOR_SEED: [u8; 32] = [7u8; 32];

pub fn operator_address() -> OwnerAddress {
    SigningAuthority::from_seed(&OPERATOR_SEED).owner_address()
}

pub struct TestHarness {
    pub ledger: Arc<NullLedgerClient>,
    pub metadata: Arc<NullMetadataFetcher>,
    pub ctx: TestContext,
}

pub fn harness() -> TestHarness {
    harness_with_config(EngineConfig::default())
}

pub fn harness_with_config(config: EngineConfig) -> TestHarness {
    let ledger = Arc::new(NullLedgerClient::new());
    let metadata = Arc::new(NullMetadataFetcher::new());
    let ctx = EngineContext::new(
        ledger.clone(),
        Arc::new(SigningAuthority::from_seed(&OPERATOR_SEED)),
        Arc::new(MemoryMintRegistry::new()),
        Arc::new(MemoryAssetRecordStore::new()),
        metadata.clone(),
        config,
    );
    TestHarness {
        ledger,
        metadata,
        ctx,
    }
}
