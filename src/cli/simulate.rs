//! Simulate-job command: score a caller-supplied demand vector.

use super::{derive_or_explain, print_json};
use crate::app::AppContext;
use anyhow::{bail, Context, Result};
use psyche_calc::{Drive, DriveVector};
use psyche_core::simulate_custom_job;

pub async fn run(ctx: &AppContext, user: &str, demand: &str) -> Result<()> {
    let demand = parse_demand(demand)?;
    let Some(outcome) = derive_or_explain(ctx, user).await else {
        return Ok(());
    };
    let Some(record) = outcome.record() else {
        return Ok(());
    };

    print_json(&simulate_custom_job(&record.vectors, &record.flow, &demand))
}

/// Parse `"e,a,d,p,c,af,v"` into a demand vector (values are clamped).
pub(crate) fn parse_demand(input: &str) -> Result<DriveVector> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != Drive::COUNT {
        bail!(
            "expected {} comma-separated demands, got {}",
            Drive::COUNT,
            parts.len()
        );
    }

    let mut values = [0.0; Drive::COUNT];
    for (slot, (drive, part)) in values.iter_mut().zip(Drive::ALL.iter().zip(&parts)) {
        let value = part
            .parse::<f64>()
            .with_context(|| format!("invalid {} demand: {part:?}", drive.as_str()))?;
        if value.is_nan() {
            bail!("invalid {} demand: {part:?}", drive.as_str());
        }
        *slot = value;
    }
    Ok(DriveVector::from_array(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demand() {
        let demand = parse_demand("1, 2,3,4,5,0,2.5").unwrap();
        assert_eq!(demand.get(Drive::Exploration), 1.0);
        assert_eq!(demand.get(Drive::Care), 5.0);
        assert_eq!(demand.get(Drive::Value), 2.5);
    }

    #[test]
    fn test_parse_demand_clamps() {
        let demand = parse_demand("9,0,0,0,0,0,-1").unwrap();
        assert_eq!(demand.get(Drive::Exploration), 5.0);
        assert_eq!(demand.get(Drive::Value), 0.0);
    }

    #[test]
    fn test_parse_demand_infinity_is_max() {
        let demand = parse_demand("inf,0,0,0,0,0,-inf").unwrap();
        assert_eq!(demand.get(Drive::Exploration), 5.0);
        assert_eq!(demand.get(Drive::Value), 0.0);
    }

    #[test]
    fn test_parse_demand_rejects_bad_input() {
        assert!(parse_demand("1,2,3").is_err());
        assert!(parse_demand("1,2,3,4,5,6,x").is_err());
        assert!(parse_demand("NaN,0,0,0,0,0,0").is_err());
    }
}
