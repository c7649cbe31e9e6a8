//! HTTP client for the toncenter JSON API

use crate::config::ToncenterConfig;
use crate::error::{Error, Result};
use crate::subscribe::spawn_transaction_poller;
use crate::wire::{
    convert_transaction, encode_hash, AddressInformation, ApiEnvelope, MasterchainInfo,
};
use async_trait::async_trait;
use observer_core::{
    AccountAddress, AccountState, ChainHead, Coins, LedgerClient, Transaction, TxLocator, TxStream,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::info;

/// Toncenter API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct ToncenterClient {
    http: Client,
    config: ToncenterConfig,
}

impl ToncenterClient {
    /// Create a client from configuration
    pub fn new(config: ToncenterConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub(crate) fn config(&self) -> &ToncenterConfig {
        &self.config
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), method);
        let mut request = self.http.get(&url).query(query);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("X-API-Key", api_key);
        }

        let envelope: ApiEnvelope<T> = request.send().await?.json().await?;
        if !envelope.ok {
            return Err(Error::Api {
                code: envelope.code.unwrap_or_default(),
                message: envelope
                    .error
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        envelope
            .result
            .ok_or_else(|| Error::Decode("missing result".to_string()))
    }

    pub(crate) async fn masterchain_info(&self) -> Result<MasterchainInfo> {
        self.call("getMasterchainInfo", &[]).await
    }

    pub(crate) async fn address_information(&self, account: &str) -> Result<AddressInformation> {
        self.call("getAddressInformation", &[("address", account.to_string())])
            .await
    }

    pub(crate) async fn transactions_page(
        &self,
        account: &str,
        limit: usize,
        from: Option<&TxLocator>,
    ) -> Result<Vec<crate::wire::RawTransaction>> {
        let mut query = vec![
            ("address", account.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(locator) = from {
            query.push(("lt", locator.lt.to_string()));
            query.push(("hash", encode_hash(&locator.hash)));
        }
        self.call("getTransactions", &query).await
    }
}

#[async_trait]
impl LedgerClient for ToncenterClient {
    async fn chain_head(&self) -> observer_core::Result<ChainHead> {
        let info = self
            .masterchain_info()
            .await
            .map_err(|e| observer_core::Error::ChainHead(e.to_string()))?;
        Ok(ChainHead {
            seqno: info.last.seqno,
        })
    }

    async fn wait_for_block(&self, seqno: u32) -> observer_core::Result<ChainHead> {
        for _ in 0..self.config.readiness_attempts {
            let info = self
                .masterchain_info()
                .await
                .map_err(|e| observer_core::Error::BlockNotReady(e.to_string()))?;
            if info.last.seqno >= seqno {
                return Ok(ChainHead {
                    seqno: info.last.seqno,
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
        Err(observer_core::Error::BlockNotReady(format!(
            "block {seqno} not seen after {} polls",
            self.config.readiness_attempts
        )))
    }

    async fn account_state(
        &self,
        _head: &ChainHead,
        account: &AccountAddress,
    ) -> observer_core::Result<AccountState> {
        let info = self
            .address_information(account.as_str())
            .await
            .map_err(|e| observer_core::Error::AccountState(e.to_string()))?;
        let balance = Coins::from_dec_str(&info.balance)
            .map_err(|e| observer_core::Error::AccountState(e.to_string()))?;
        let last_tx = info
            .last_transaction_id
            .to_locator()
            .map_err(|e| observer_core::Error::AccountState(e.to_string()))?;
        Ok(AccountState { balance, last_tx })
    }

    async fn subscribe_transactions(
        &self,
        account: &AccountAddress,
        from: TxLocator,
    ) -> observer_core::Result<TxStream> {
        // probe connectivity once so an unreachable endpoint fails the run
        // instead of silently polling forever
        self.masterchain_info()
            .await
            .map_err(|e| observer_core::Error::Subscribe(e.to_string()))?;

        info!(account = %account, lt = from.lt, "✅ transaction poller starting");
        Ok(spawn_transaction_poller(
            self.clone(),
            account.clone(),
            from,
        ))
    }

    async fn list_transactions(
        &self,
        account: &AccountAddress,
        page_size: usize,
        from: TxLocator,
    ) -> observer_core::Result<Vec<Transaction>> {
        let page = self
            .transactions_page(account.as_str(), page_size, Some(&from))
            .await
            .map_err(|e| observer_core::Error::Listing(e.to_string()))?;
        page.into_iter()
            .map(|raw| {
                convert_transaction(raw)
                    .map_err(|e| observer_core::Error::Listing(e.to_string()))
            })
            .collect()
    }
}
