//! Per-expiry chain statistics and underlying-level analysis.

use super::contract::OptionContract;
use crate::pricing::OptionType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated statistics for one `(underlying, expiry)` group.
///
/// Derived entirely from the contracts in the group; recomputed whenever the
/// contracts change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSummary {
    /// The underlying asset symbol.
    pub underlying: String,
    /// The expiry shared by every contract in the group.
    pub expiry_date: NaiveDate,
    /// Number of calls.
    pub total_calls: usize,
    /// Number of puts.
    pub total_puts: usize,
    /// Volume across calls and puts.
    pub total_volume: u64,
    /// Open interest across calls and puts.
    pub total_open_interest: u64,
    /// Symbol of the call with the highest volume, empty if there are no calls.
    pub max_volume_call: String,
    /// Symbol of the put with the highest volume, empty if there are no puts.
    pub max_volume_put: String,
    /// Symbol of the call with the highest open interest.
    pub max_oi_call: String,
    /// Symbol of the put with the highest open interest.
    pub max_oi_put: String,
    /// Mean call IV, 0 without calls.
    pub avg_iv_calls: f64,
    /// Mean put IV, 0 without puts.
    pub avg_iv_puts: f64,
    /// `avg_iv_puts - avg_iv_calls`, 0 without calls.
    pub iv_skew: f64,
    /// Lowest strike.
    pub strike_range_min: f64,
    /// Highest strike.
    pub strike_range_max: f64,
    /// Strike closest to spot.
    pub atm_strike: f64,
    /// Put volume over call volume, 0 without call volume.
    pub pcr_volume: f64,
    /// Put open interest over call open interest, 0 without call open interest.
    pub pcr_oi: f64,
    /// Days to expiry of the group.
    pub days_to_expiry: u32,
}

impl ChainSummary {
    /// Total number of contracts in the group.
    #[must_use]
    pub const fn total_contracts(&self) -> usize {
        self.total_calls + self.total_puts
    }
}

impl std::fmt::Display for ChainSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}d): {} calls, {} puts, vol {}, OI {}, PCR {:.2}, skew {:+.4}, ATM {:.2}",
            self.underlying,
            self.expiry_date,
            self.days_to_expiry,
            self.total_calls,
            self.total_puts,
            self.total_volume,
            self.total_open_interest,
            self.pcr_volume,
            self.iv_skew,
            self.atm_strike
        )
    }
}

/// Summarizes a chain into one [`ChainSummary`] per `(underlying, expiry)`,
/// ordered by underlying then expiry.
///
/// `spot_price` is used only to pick the ATM strike. Empty sides produce zero
/// averages, zero ratios and empty identifiers rather than errors.
#[must_use]
pub fn summarize_chain(contracts: &[OptionContract], spot_price: f64) -> Vec<ChainSummary> {
    let mut groups: BTreeMap<(&str, NaiveDate), Vec<&OptionContract>> = BTreeMap::new();
    for contract in contracts {
        groups
            .entry((contract.underlying.as_str(), contract.expiry_date))
            .or_default()
            .push(contract);
    }

    groups
        .into_iter()
        .map(|((underlying, expiry), group)| summarize_group(underlying, expiry, &group, spot_price))
        .collect()
}

fn summarize_group(
    underlying: &str,
    expiry_date: NaiveDate,
    group: &[&OptionContract],
    spot_price: f64,
) -> ChainSummary {
    let (calls, puts): (Vec<&OptionContract>, Vec<&OptionContract>) =
        group.iter().copied().partition(|c| c.is_call());

    let call_volume: u64 = calls.iter().map(|c| c.volume).sum();
    let put_volume: u64 = puts.iter().map(|c| c.volume).sum();
    let call_oi: u64 = calls.iter().map(|c| c.open_interest).sum();
    let put_oi: u64 = puts.iter().map(|c| c.open_interest).sum();

    let avg_iv_calls = mean_iv(&calls);
    let avg_iv_puts = mean_iv(&puts);
    let iv_skew = if avg_iv_calls > 0.0 {
        avg_iv_puts - avg_iv_calls
    } else {
        0.0
    };

    let strikes = calls.iter().chain(puts.iter()).map(|c| c.strike);
    let strike_range_min = strikes.clone().reduce(f64::min).unwrap_or(0.0);
    let strike_range_max = strikes.clone().reduce(f64::max).unwrap_or(0.0);
    let atm_strike = strikes
        .min_by(|a, b| (a - spot_price).abs().total_cmp(&(b - spot_price).abs()))
        .unwrap_or(spot_price);

    let days_to_expiry = calls
        .first()
        .or_else(|| puts.first())
        .map_or(0, |c| c.days_to_expiry);

    ChainSummary {
        underlying: underlying.to_string(),
        expiry_date,
        total_calls: calls.len(),
        total_puts: puts.len(),
        total_volume: call_volume + put_volume,
        total_open_interest: call_oi + put_oi,
        max_volume_call: first_max_symbol(&calls, |c| c.volume),
        max_volume_put: first_max_symbol(&puts, |c| c.volume),
        max_oi_call: first_max_symbol(&calls, |c| c.open_interest),
        max_oi_put: first_max_symbol(&puts, |c| c.open_interest),
        avg_iv_calls,
        avg_iv_puts,
        iv_skew,
        strike_range_min,
        strike_range_max,
        atm_strike,
        pcr_volume: ratio(put_volume, call_volume),
        pcr_oi: ratio(put_oi, call_oi),
        days_to_expiry,
    }
}

fn mean_iv(contracts: &[&OptionContract]) -> f64 {
    if contracts.is_empty() {
        return 0.0;
    }
    contracts.iter().map(|c| c.implied_volatility).sum::<f64>() / contracts.len() as f64
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

/// First contract reaching the maximum of `key`, in input order.
fn first_max<'a>(
    contracts: &[&'a OptionContract],
    key: impl Fn(&OptionContract) -> u64,
) -> Option<&'a OptionContract> {
    contracts
        .iter()
        .copied()
        .reduce(|best, c| if key(c) > key(best) { c } else { best })
}

fn first_max_symbol(contracts: &[&OptionContract], key: impl Fn(&OptionContract) -> u64) -> String {
    first_max(contracts, key)
        .map(|c| c.symbol.clone())
        .unwrap_or_default()
}

/// The most traded contract of an underlying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopContract {
    /// Contract symbol.
    pub symbol: String,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: f64,
    /// Traded volume.
    pub volume: u64,
}

/// Underlying-level totals across all expiries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainAnalysis {
    /// The underlying asset symbol.
    pub underlying: String,
    /// Number of contracts.
    pub total_options: usize,
    /// Number of calls.
    pub total_calls: usize,
    /// Number of puts.
    pub total_puts: usize,
    /// Volume across all contracts.
    pub total_volume: u64,
    /// Open interest across all contracts.
    pub total_open_interest: u64,
    /// Mean implied volatility across all contracts.
    pub avg_iv: f64,
    /// First contract with the highest volume.
    pub max_volume_option: TopContract,
}

/// Analyzes all contracts of one underlying. Returns `None` for an empty
/// slice.
#[must_use]
pub fn analyze_chain(underlying: &str, contracts: &[OptionContract]) -> Option<ChainAnalysis> {
    let refs: Vec<&OptionContract> = contracts.iter().collect();
    let top = first_max(&refs, |c| c.volume)?;
    let total_calls = contracts.iter().filter(|c| c.is_call()).count();

    Some(ChainAnalysis {
        underlying: underlying.to_string(),
        total_options: contracts.len(),
        total_calls,
        total_puts: contracts.len() - total_calls,
        total_volume: contracts.iter().map(|c| c.volume).sum(),
        total_open_interest: contracts.iter().map(|c| c.open_interest).sum(),
        avg_iv: mean_iv(&refs),
        max_volume_option: TopContract {
            symbol: top.symbol.clone(),
            option_type: top.option_type,
            strike: top.strike,
            volume: top.volume,
        },
    })
}
