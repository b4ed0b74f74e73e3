//! Summary statistics (count, mean, population standard deviation)
//! over a series of decimal percentages, here the per-country average
//! gap values of one decile.

use std::borrow::Cow;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::table_view::{ColumnFormatting, Highlight, TableViewRow, Unit};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum StatsError {
    #[error("no inputs given")]
    NoInputs,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub num_values: usize,
    /// Exact decimal sum of the inputs
    pub sum: Decimal,
    /// sum/n, exact decimal
    pub mean: Decimal,
    /// Mean squared difference from the mean, with divisor n, not
    /// n-1: the input set is the full population of countries with
    /// known data, not a sample to infer from.
    pub variance: f64,
}

impl Stats {
    /// sqrt(variance). f64 is fine here, the exactness argument for
    /// decimals is about the summing and dividing, not the final
    /// root.
    pub fn population_sd(&self) -> f64 {
        self.variance.sqrt()
    }

    pub fn from_values(vals: &[Decimal]) -> Result<Self, StatsError> {
        let num_values = vals.len();
        if num_values == 0 {
            return Err(StatsError::NoInputs);
        }

        let sum: Decimal = vals.iter().copied().sum();
        let mean = sum / Decimal::from(num_values as u64);

        let variance = {
            let mean = mean
                .to_f64()
                .expect("percentage values are far inside the f64 range");
            let sum_squared_error: f64 = vals
                .iter()
                .map(|v| {
                    let d = v
                        .to_f64()
                        .expect("percentage values are far inside the f64 range")
                        - mean;
                    d * d
                })
                .sum();
            sum_squared_error / num_values as f64
        };

        Ok(Stats {
            num_values,
            sum,
            mean,
            variance,
        })
    }
}

impl TableViewRow<()> for Stats {
    fn table_view_header(_: ()) -> Box<dyn AsRef<[(Cow<'static, str>, Unit, ColumnFormatting)]>> {
        let cols: Vec<(Cow<'static, str>, Unit, ColumnFormatting)> = vec![
            ("n".into(), Unit::Count, ColumnFormatting::Number),
            ("mean".into(), Unit::Percent, ColumnFormatting::Number),
            ("SD".into(), Unit::Percent, ColumnFormatting::Number),
        ];
        Box::new(cols)
    }

    fn table_view_row(&self, out: &mut Vec<(Cow<str>, Highlight)>) {
        let Self {
            num_values,
            sum: _,
            mean,
            // population_sd() instead
            variance: _,
        } = self;

        out.push((num_values.to_string().into(), Highlight::Neutral));
        out.push((
            mean.round_dp(4).normalize().to_string().into(),
            Highlight::Neutral,
        ));
        out.push((
            format!("{:.4}", self.population_sd()).into(),
            Highlight::Neutral,
        ));
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn t_single_value() -> Result<()> {
        let stats = Stats::from_values(&[dec!(13.25)])?;
        assert_eq!(stats.num_values, 1);
        assert_eq!(stats.mean, dec!(13.25));
        assert_eq!(stats.population_sd(), 0.);
        Ok(())
    }

    #[test]
    fn t_reference_example() -> Result<()> {
        // The classic population SD reference set
        let vals: Vec<Decimal> = [2u64, 4, 4, 4, 5, 5, 7, 9]
            .iter()
            .map(|v| Decimal::from(*v))
            .collect();
        let stats = Stats::from_values(&vals)?;
        assert_eq!(stats.num_values, 8);
        assert_eq!(stats.sum, dec!(40));
        assert_eq!(stats.mean, dec!(5));
        assert_eq!(stats.variance, 4.);
        assert_eq!(stats.population_sd(), 2.);
        Ok(())
    }

    #[test]
    fn t_population_not_sample_divisor() -> Result<()> {
        // With divisor n-1 this would be 0.5; population variance is
        // smaller.
        let stats = Stats::from_values(&[dec!(1), dec!(2)])?;
        assert_eq!(stats.mean, dec!(1.5));
        assert_eq!(stats.variance, 0.25);
        Ok(())
    }

    #[test]
    fn t_negative_values() -> Result<()> {
        let stats = Stats::from_values(&[dec!(-2), dec!(2)])?;
        assert_eq!(stats.mean, dec!(0));
        assert_eq!(stats.population_sd(), 2.);
        Ok(())
    }

    #[test]
    fn t_empty_input() {
        assert_eq!(Stats::from_values(&[]).unwrap_err(), StatsError::NoInputs);
    }
}
