//! Property-based tests for classification invariants
//!
//! These tests use proptest to verify:
//! - Amount display is an exact decimal expansion (lossless round trip)
//! - The BUY leg is exactly the sum of internal outbound values
//! - Destination order and count are preserved, zero-value messages included
//! - SELL rendering appears iff the inbound message is internal with value

use chrono::Utc;
use observer_core::{
    classify, render_notice, Coins, MessageKind, OutboundMessages, PlainStyle, Transaction,
    TxHash, TxMessage,
};
use proptest::prelude::*;

/// Parse a rendered TON amount back into nanotons
fn nano_from_display(display: &str) -> u128 {
    match display.split_once('.') {
        None => display.parse::<u128>().unwrap() * 1_000_000_000,
        Some((whole, frac)) => {
            let padded = format!("{frac:0<9}");
            whole.parse::<u128>().unwrap() * 1_000_000_000 + padded.parse::<u128>().unwrap()
        }
    }
}

fn outbound_strategy() -> impl Strategy<Value = Vec<(bool, u64, String)>> {
    prop::collection::vec(
        (any::<bool>(), 0u64..=10_000_000_000_000, "[A-Za-z0-9]{8}"),
        0..8,
    )
}

fn tx_with_outbound(outbound: &[(bool, u64, String)]) -> Transaction {
    let messages = outbound
        .iter()
        .map(|(is_internal, nano, destination)| TxMessage {
            kind: if *is_internal {
                MessageKind::Internal
            } else {
                MessageKind::ExternalOut
            },
            source: "Treasury".to_string(),
            destination: destination.clone(),
            value: if *is_internal {
                Coins::from_nano(*nano)
            } else {
                Coins::zero()
            },
        })
        .collect();
    Transaction {
        lt: 1,
        hash: TxHash::new([1; 32]),
        timestamp: Utc::now(),
        inbound: None,
        outbound: OutboundMessages::Decoded(messages),
    }
}

proptest! {
    #[test]
    fn prop_coins_display_is_lossless(nano in any::<u128>()) {
        let display = Coins::from_nano(nano).to_string();
        prop_assert_eq!(nano_from_display(&display), nano);
    }

    #[test]
    fn prop_coins_display_has_no_trailing_zero_fraction(nano in any::<u64>()) {
        let display = Coins::from_nano(nano).to_string();
        if let Some((_, frac)) = display.split_once('.') {
            prop_assert!(!frac.is_empty());
            prop_assert!(!frac.ends_with('0'));
        }
    }

    #[test]
    fn prop_buy_amount_is_sum_of_internal_values(outbound in outbound_strategy()) {
        let tx = tx_with_outbound(&outbound);
        let classification = classify(&tx).unwrap();

        let expected: u128 = outbound
            .iter()
            .filter(|(is_internal, _, _)| *is_internal)
            .map(|(_, nano, _)| *nano as u128)
            .sum();

        match classification.buy {
            Some(buy) => {
                prop_assert!(expected > 0);
                prop_assert_eq!(buy.amount, Coins::from_nano(expected));
            }
            None => prop_assert_eq!(expected, 0),
        }
    }

    #[test]
    fn prop_buy_lists_every_destination_in_order(outbound in outbound_strategy()) {
        let tx = tx_with_outbound(&outbound);
        let classification = classify(&tx).unwrap();

        if let Some(buy) = classification.buy {
            let expected: Vec<&String> =
                outbound.iter().map(|(_, _, destination)| destination).collect();
            prop_assert_eq!(buy.destinations.len(), expected.len());
            for (got, want) in buy.destinations.iter().zip(expected) {
                prop_assert_eq!(got, want);
            }
        }
    }

    #[test]
    fn prop_sell_rendered_iff_internal_inbound_value(
        nano in any::<u64>(),
        is_internal in any::<bool>(),
    ) {
        let tx = Transaction {
            lt: 1,
            hash: TxHash::new([1; 32]),
            timestamp: Utc::now(),
            inbound: Some(TxMessage {
                kind: if is_internal {
                    MessageKind::Internal
                } else {
                    MessageKind::ExternalIn
                },
                source: "Src1".to_string(),
                destination: "Treasury".to_string(),
                value: Coins::from_nano(nano),
            }),
            outbound: OutboundMessages::default(),
        };

        let notice = render_notice(&tx, &PlainStyle);
        let expect_sell = is_internal && nano != 0;
        prop_assert_eq!(notice.text.contains("TOKEN SELL"), expect_sell);
        if expect_sell {
            let display = Coins::from_nano(nano).to_string();
            let needle = format!("{} TON", display);
            prop_assert!(notice.text.contains(&needle));
            prop_assert!(notice.text.contains("Src1"));
        }
    }
}
