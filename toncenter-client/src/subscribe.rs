//! Polling-based live subscription
//!
//! The HTTP API has no push channel, so the subscription is realized by a
//! spawned task that polls the account's last-transaction locator and drains
//! everything newer than the cursor. Delivery preserves the subscription
//! contract: ascending logical time, exclusive of the seed locator. Poll
//! failures are transient: logged and retried on the next cycle, with the
//! cursor untouched so nothing is lost or re-delivered.

use crate::client::ToncenterClient;
use crate::wire::convert_transaction;
use observer_core::{AccountAddress, Transaction, TxLocator, TxStream};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub(crate) fn spawn_transaction_poller(
    client: ToncenterClient,
    account: AccountAddress,
    seed: TxLocator,
) -> TxStream {
    let (sender, receiver) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut cursor = seed;
        loop {
            tokio::time::sleep(client.config().poll_interval).await;
            if sender.is_closed() {
                debug!(account = %account, "subscriber dropped, poller stopping");
                return;
            }

            let info = match client.address_information(account.as_str()).await {
                Ok(info) => info,
                Err(e) => {
                    warn!(account = %account, error = %e, "account poll failed");
                    continue;
                }
            };
            let newest = match info.last_transaction_id.to_locator() {
                Ok(Some(locator)) if locator.lt > cursor.lt => locator,
                Ok(_) => continue,
                Err(e) => {
                    warn!(account = %account, error = %e, "account state not decoded");
                    continue;
                }
            };

            match drain_since(&client, &account, newest, cursor.lt).await {
                Ok(fresh) => {
                    for tx in fresh {
                        let locator = tx.locator();
                        if sender.send(tx).is_err() {
                            return;
                        }
                        cursor = locator;
                    }
                }
                Err(e) => {
                    // cursor untouched: the whole range is retried next cycle
                    warn!(account = %account, error = %e, "transaction drain failed");
                }
            }
        }
    });

    receiver
}

/// Walk pages backward from `newest` until at or below `floor_lt`, returning
/// the collected transactions in ascending logical-time order.
async fn drain_since(
    client: &ToncenterClient,
    account: &AccountAddress,
    newest: TxLocator,
    floor_lt: u64,
) -> crate::error::Result<Vec<Transaction>> {
    let page_size = client.config().fetch_page_size;
    let mut fresh: Vec<Transaction> = Vec::new();
    let mut from = newest;
    let mut boundary: Option<u64> = None;

    loop {
        let page = client
            .transactions_page(account.as_str(), page_size, Some(&from))
            .await?;
        if page.is_empty() {
            break;
        }

        let page_len = page.len();
        let mut reached_floor = false;
        let mut oldest: Option<TxLocator> = None;
        for raw in page {
            let tx = convert_transaction(raw)?;
            let locator = tx.locator();
            if oldest.map_or(true, |o| locator.lt < o.lt) {
                oldest = Some(locator);
            }
            // the page boundary transaction repeats on the next page
            if boundary.is_some_and(|b| tx.lt >= b) {
                continue;
            }
            if tx.lt <= floor_lt {
                reached_floor = true;
                continue;
            }
            fresh.push(tx);
        }

        let Some(oldest) = oldest else { break };
        if reached_floor || page_len < page_size {
            break;
        }
        boundary = Some(oldest.lt);
        from = oldest;
    }

    fresh.sort_by_key(|tx| tx.lt);
    Ok(fresh)
}
