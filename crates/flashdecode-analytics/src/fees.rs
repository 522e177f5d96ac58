//! Gas fees paid by flash-loan transactions.

use flashdecode_core::record::TransactionRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Wei per native token.
const WEI_DECIMALS: u32 = 18;

/// Fee totals for one network, in native token units and in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeMetrics {
    pub network: String,
    pub transactions: u64,
    pub total_fee_paid: Decimal,
    pub average_fee_paid: Decimal,
    pub total_fee_paid_usd: Decimal,
    pub average_fee_paid_usd: Decimal,
}

/// `gas_used * gas_price` converted from wei to native units.
/// `None` if the price does not fit a 96-bit decimal or the product overflows.
pub fn fee_paid(record: &TransactionRecord) -> Option<Decimal> {
    let price = i128::try_from(record.gas_price).ok()?;
    let price = Decimal::try_from_i128_with_scale(price, WEI_DECIMALS).ok()?;
    price.checked_mul(Decimal::from(record.gas_used))
}

/// Fee metrics over the successful flash-loan records of `network`.
/// `None` when the network has no such records.
pub fn fee_metrics(
    records: &[TransactionRecord],
    network: &str,
    native_price_usd: Decimal,
) -> Option<FeeMetrics> {
    let mut total = Decimal::ZERO;
    let mut transactions = 0u64;
    for record in records
        .iter()
        .filter(|r| r.network == network && r.is_flash_loan() && r.succeeded())
    {
        match fee_paid(record).and_then(|fee| total.checked_add(fee)) {
            Some(sum) => {
                total = sum;
                transactions += 1;
            }
            None => warn!(tx = %record.hash, "fee out of range, skipping"),
        }
    }

    if transactions == 0 {
        warn!(network, "no flash-loan transactions found");
        return None;
    }

    let average = total / Decimal::from(transactions);
    let metrics = FeeMetrics {
        network: network.to_string(),
        transactions,
        total_fee_paid: total,
        average_fee_paid: average,
        total_fee_paid_usd: total * native_price_usd,
        average_fee_paid_usd: average * native_price_usd,
    };
    info!(
        network,
        total = %metrics.total_fee_paid,
        total_usd = %metrics.total_fee_paid_usd,
        "fee metrics computed"
    );
    Some(metrics)
}
