//! High-level client: one method per OSCU operation.
//!
//! Every call validates its payload against the operation's schema first, so
//! malformed requests are rejected without touching the network.
use crate::dispatcher::RequestDispatcher;
use crate::headers::BusinessHeaders;
use crate::operation::Operation;
use crate::registry::EndpointRegistry;
use etims_auth::TokenManager;
use etims_config::Config;
use etims_schema::{SchemaName, Validator};
use etims_store::FileTokenCache;
use etims_types::payload::{
    BranchCustomer, BranchInsurance, BranchUser, CustomerSearchRequest, ImportItemUpdate,
    InitInfoRequest, Item, ItemComposition, LastRequest, Purchase, SalesTransaction, StockMaster,
    StockMovement,
};
use etims_types::{EtimsError, EtimsResponse, Result, TokenCache};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub struct EtimsClient {
    dispatcher: RequestDispatcher,
    validator: Validator,
}

impl EtimsClient {
    /// Builds a client from configuration, caching tokens on disk under
    /// [`Config::cache_dir`].
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Config`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config, Arc::new(FileTokenCache::new(config.cache_dir())))
    }

    /// Builds a client from configuration with a caller-supplied token cache.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &Config, cache: Arc<dyn TokenCache>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| EtimsError::Config(format!("failed to build HTTP client: {e}")))?;
        let auth = Arc::new(TokenManager::from_config(config, http.clone(), cache));
        let dispatcher = RequestDispatcher::new(
            http,
            &config.api_base_url(),
            EndpointRegistry::oscu(),
            Arc::new(BusinessHeaders::from(&config.business)),
            auth,
        );
        Ok(Self::from_dispatcher(dispatcher))
    }

    /// Wraps a dispatcher assembled by the caller, e.g. with a custom
    /// registry or header policy.
    #[must_use]
    pub fn from_dispatcher(dispatcher: RequestDispatcher) -> Self {
        Self {
            dispatcher,
            validator: Validator::new(),
        }
    }

    #[must_use]
    pub fn auth(&self) -> &TokenManager {
        self.dispatcher.auth()
    }

    #[must_use]
    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    /// Validates `data` against `schema` without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Validation`] listing every violated field.
    pub fn validate(&self, data: Value, schema: SchemaName) -> Result<Value> {
        self.validator.validate(data, schema)
    }

    /// Validates `data` for `op` and sends it.
    ///
    /// # Errors
    ///
    /// Any [`EtimsError`]; validation failures are raised before the network.
    pub async fn call(&self, op: Operation, data: Value) -> Result<EtimsResponse> {
        let data = self.validator.validate(data, op.schema())?;
        tracing::debug!(operation = %op, "payload validated");
        self.dispatcher.send(Method::POST, op.name(), &data).await
    }

    /// [`call`](Self::call) by upstream operation name.
    ///
    /// # Errors
    ///
    /// Returns [`EtimsError::Config`] for an unknown name, otherwise as [`call`](Self::call).
    pub async fn call_named(&self, name: &str, data: Value) -> Result<EtimsResponse> {
        let op: Operation = name.parse()?;
        self.call(op, data).await
    }

    async fn send<T: Serialize>(&self, op: Operation, payload: &T) -> Result<EtimsResponse> {
        self.call(op, serde_json::to_value(payload)?).await
    }

    // ── Initialization & reference data ──────────────────────────────────────

    /// Initializes the device; the response carries the `cmcKey` used on all
    /// later calls (see [`EtimsResponse::cmc_key`]).
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_init_osdc_info(&self, req: &InitInfoRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectInitOsdcInfo, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_code_list(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectCodeList, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_item_classes(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectItemClsList, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_notices(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectNoticeList, req).await
    }

    // ── Customers & branches ─────────────────────────────────────────────────

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_customer(&self, req: &CustomerSearchRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectCustomer, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_branches(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectBhfList, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_branch_customer(&self, req: &BranchCustomer) -> Result<EtimsResponse> {
        self.send(Operation::SaveBhfCustomer, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_branch_user(&self, req: &BranchUser) -> Result<EtimsResponse> {
        self.send(Operation::SaveBhfUser, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_branch_insurance(&self, req: &BranchInsurance) -> Result<EtimsResponse> {
        self.send(Operation::SaveBhfInsurance, req).await
    }

    // ── Items ────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_items(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectItemList, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_item(&self, req: &Item) -> Result<EtimsResponse> {
        self.send(Operation::SaveItem, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_item_composition(&self, req: &ItemComposition) -> Result<EtimsResponse> {
        self.send(Operation::SaveItemComposition, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_imported_items(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectImportItemList, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn update_imported_item(&self, req: &ImportItemUpdate) -> Result<EtimsResponse> {
        self.send(Operation::UpdateImportItem, req).await
    }

    // ── Sales & purchases ────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_sales_transaction(&self, req: &SalesTransaction) -> Result<EtimsResponse> {
        self.send(Operation::SaveTrnsSalesOsdc, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_purchases(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectTrnsPurchaseSalesList, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_purchase(&self, req: &Purchase) -> Result<EtimsResponse> {
        self.send(Operation::InsertTrnsPurchase, req).await
    }

    // ── Stock ────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn select_stock_movements(&self, req: &LastRequest) -> Result<EtimsResponse> {
        self.send(Operation::SelectStockMoveList, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_stock_movement(&self, req: &StockMovement) -> Result<EtimsResponse> {
        self.send(Operation::InsertStockIo, req).await
    }

    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub async fn save_stock_master(&self, req: &StockMaster) -> Result<EtimsResponse> {
        self.send(Operation::SaveStockMaster, req).await
    }
}
