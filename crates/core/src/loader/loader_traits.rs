use nbp_fx_market_data::{MarketDataError, NbpRatesTable};

/// Receives the outcome of every resource load.
pub trait LoaderListener: Send + Sync {
    /// A resource was fetched and decoded successfully.
    fn new_data_loaded(&self, resource_id: &str, tables: Vec<NbpRatesTable>);

    /// A resource could not be loaded from the feed nor from its backup.
    fn load_failed(&self, resource_id: &str, error: &MarketDataError);
}
