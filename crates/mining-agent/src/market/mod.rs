//! Market data: the snapshot model and the gateway that produces it

pub mod gateway;
pub mod snapshot;

pub use gateway::{MarketDataGateway, MarketDataSource, normalize_symbol};
pub use snapshot::{
    FieldKind, FieldValue, MarketData, MarketSnapshot, NOT_AVAILABLE, ProviderQuote,
    SNAPSHOT_FIELD_COUNT, SnapshotField,
};
