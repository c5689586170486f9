//! Hedge time series, PnL summary and CSV export.

use std::io::Write;

use super::error::HedgeError;

/// One rebalancing step of the hedging simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeRecord {
    /// Grid index of the step.
    pub step: usize,
    /// Time of the step in years.
    pub time: f64,
    /// Product value from the realised state.
    pub product_value: f64,
    /// Per-asset delta of the product.
    pub delta: Vec<f64>,
    /// Hedge position after rebalancing (`-delta`).
    pub position: Vec<f64>,
    /// Realised normalised levels at the step.
    pub levels: Vec<f64>,
    /// Cash after rebalancing and accrual to the next step.
    pub cash: f64,
    /// Hedge value at the current levels.
    pub hedge_value: f64,
    /// Hedge value at the next step's levels, same position and cash.
    pub hedge_value_next: f64,
    /// Product value at the next step; `None` on the last step.
    pub product_value_next: Option<f64>,
    /// Product value change over the step.
    pub pnl_product: Option<f64>,
    /// Hedge value change over the step.
    pub pnl_hedge: f64,
    /// `pnl_product + pnl_hedge`.
    pub pnl_total: Option<f64>,
}

/// Summary statistics of the per-step total PnL.
///
/// Only steps with a defined total PnL are included.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PnlSummary {
    /// Number of steps with a defined total PnL.
    pub steps: usize,
    /// Sum of total PnL over the run.
    pub final_cumulative_pnl: f64,
    /// Mean per-step total PnL.
    pub mean_pnl: f64,
    /// Sample standard deviation of per-step total PnL.
    pub std_pnl: f64,
    /// Worst (lowest) per-step total PnL.
    pub worst_pnl: f64,
    /// Best (highest) per-step total PnL.
    pub best_pnl: f64,
}

/// Time-indexed output of a hedging simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeReport {
    n_assets: usize,
    records: Vec<HedgeRecord>,
}

impl HedgeReport {
    /// Builds a report from raw step records, filling in the next product
    /// value and the product and total PnL of every step but the last.
    pub fn new(n_assets: usize, mut records: Vec<HedgeRecord>) -> Self {
        for i in 1..records.len() {
            let next = records[i].product_value;
            let record = &mut records[i - 1];
            let pnl_product = next - record.product_value;

            record.product_value_next = Some(next);
            record.pnl_product = Some(pnl_product);
            record.pnl_total = Some(pnl_product + record.pnl_hedge);
        }
        Self { n_assets, records }
    }

    /// Number of assets hedged.
    #[inline]
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Step records in time order.
    #[inline]
    pub fn records(&self) -> &[HedgeRecord] {
        &self.records
    }

    /// Number of recorded steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no step was recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Running sum of total PnL over the steps where it is defined.
    pub fn cumulative_pnl(&self) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.pnl_total)
            .scan(0.0, |acc, pnl| {
                *acc += pnl;
                Some(*acc)
            })
            .collect()
    }

    /// Summary statistics of per-step total PnL.
    ///
    /// All fields are zero when no step has a defined total PnL.
    pub fn summary(&self) -> PnlSummary {
        let pnl: Vec<f64> = self.records.iter().filter_map(|r| r.pnl_total).collect();
        if pnl.is_empty() {
            return PnlSummary {
                steps: 0,
                final_cumulative_pnl: 0.0,
                mean_pnl: 0.0,
                std_pnl: 0.0,
                worst_pnl: 0.0,
                best_pnl: 0.0,
            };
        }

        let n = pnl.len() as f64;
        let total: f64 = pnl.iter().sum();
        let mean = total / n;
        let std_pnl = if pnl.len() > 1 {
            (pnl.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        PnlSummary {
            steps: pnl.len(),
            final_cumulative_pnl: total,
            mean_pnl: mean,
            std_pnl,
            worst_pnl: pnl.iter().copied().fold(f64::INFINITY, f64::min),
            best_pnl: pnl.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Writes the time series as CSV, one row per step.
    ///
    /// Columns: `t_idx, time, v_product, delta_i..., q_i..., cash, s_i...,
    /// hedge_value, hedge_value_next, v_product_next, pnl_product, pnl_hedge,
    /// pnl_total, cum_pnl`. Undefined values on the last step are empty.
    ///
    /// # Errors
    ///
    /// Returns `HedgeError::Csv` or `HedgeError::Io` if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), HedgeError> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = vec!["t_idx".to_string(), "time".into(), "v_product".into()];
        header.extend((0..self.n_assets).map(|i| format!("delta_{i}")));
        header.extend((0..self.n_assets).map(|i| format!("q_{i}")));
        header.push("cash".into());
        header.extend((0..self.n_assets).map(|i| format!("s_{i}")));
        header.extend(
            [
                "hedge_value",
                "hedge_value_next",
                "v_product_next",
                "pnl_product",
                "pnl_hedge",
                "pnl_total",
                "cum_pnl",
            ]
            .map(String::from),
        );
        csv.write_record(&header)?;

        let optional = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        let mut cum_pnl = 0.0;

        for record in &self.records {
            let mut row = vec![
                record.step.to_string(),
                record.time.to_string(),
                record.product_value.to_string(),
            ];
            row.extend(record.delta.iter().map(f64::to_string));
            row.extend(record.position.iter().map(f64::to_string));
            row.push(record.cash.to_string());
            row.extend(record.levels.iter().map(f64::to_string));
            row.push(record.hedge_value.to_string());
            row.push(record.hedge_value_next.to_string());
            row.push(optional(record.product_value_next));
            row.push(optional(record.pnl_product));
            row.push(record.pnl_hedge.to_string());
            row.push(optional(record.pnl_total));
            row.push(optional(record.pnl_total.map(|pnl| {
                cum_pnl += pnl;
                cum_pnl
            })));

            csv.write_record(&row)?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(step: usize, product_value: f64, pnl_hedge: f64) -> HedgeRecord {
        HedgeRecord {
            step,
            time: step as f64 * 0.1,
            product_value,
            delta: vec![0.5, 0.25],
            position: vec![-0.5, -0.25],
            levels: vec![1.0, 1.0],
            cash: 0.75,
            hedge_value: 0.0,
            hedge_value_next: pnl_hedge,
            product_value_next: None,
            pnl_product: None,
            pnl_hedge,
            pnl_total: None,
        }
    }

    fn report() -> HedgeReport {
        HedgeReport::new(
            2,
            vec![record(0, 100.0, -1.0), record(1, 101.5, 0.5), record(2, 101.0, 0.2)],
        )
    }

    #[test]
    fn test_derived_pnl_columns() {
        let report = report();
        let rows = report.records();

        assert_eq!(rows[0].product_value_next, Some(101.5));
        assert_eq!(rows[0].pnl_product, Some(1.5));
        assert_eq!(rows[0].pnl_total, Some(0.5));
        assert_eq!(rows[1].pnl_total, Some(-0.5 + 0.5));

        // Last step has no next product value
        assert_eq!(rows[2].product_value_next, None);
        assert_eq!(rows[2].pnl_total, None);
        assert_eq!(rows[2].pnl_hedge, 0.2);
    }

    #[test]
    fn test_cumulative_pnl() {
        let cum = report().cumulative_pnl();
        assert_eq!(cum.len(), 2);
        assert_relative_eq!(cum[0], 0.5);
        assert_relative_eq!(cum[1], 0.5);
    }

    #[test]
    fn test_summary() {
        let s = report().summary();
        assert_eq!(s.steps, 2);
        assert_relative_eq!(s.final_cumulative_pnl, 0.5);
        assert_relative_eq!(s.mean_pnl, 0.25);
        assert_relative_eq!(s.worst_pnl, 0.0);
        assert_relative_eq!(s.best_pnl, 0.5);
        assert_relative_eq!(s.std_pnl, (0.125_f64).sqrt());
    }

    #[test]
    fn test_summary_of_empty_report() {
        let s = HedgeReport::new(2, vec![]).summary();
        assert_eq!(s.steps, 0);
        assert_eq!(s.final_cumulative_pnl, 0.0);
    }

    #[test]
    fn test_write_csv() {
        let mut buffer = Vec::new();
        report().write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "t_idx,time,v_product,delta_0,delta_1,q_0,q_1,cash,s_0,s_1,\
             hedge_value,hedge_value_next,v_product_next,pnl_product,pnl_hedge,pnl_total,cum_pnl"
        );
        assert!(lines[1].starts_with("0,0,100,0.5,0.25,-0.5,-0.25,0.75,1,1,"));
        assert!(lines[3].ends_with(",,,0.2,,"));
    }
}
