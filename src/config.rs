// src/config.rs
//
//! The sync plan: which bucket/product, which days and hours, where the
//! local mirror lives. Every field is required and checked up front;
//! nothing here carries a hidden default.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::calendar::DataHour;

/// Runtime parameters for one sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub bucket: String,     // source bucket, e.g. "noaa-goes16"
    pub product: String,    // product prefix under the bucket, e.g. "GLM-L2-LCFA"
    pub year: u16,
    pub month: u8,
    pub start_day: u8,      // inclusive
    pub end_day: u8,        // inclusive, >= start_day
    pub start_hour: u8,     // inclusive
    pub end_hour: u8,       // inclusive, >= start_hour, <= 23
    pub base_path: PathBuf, // local directory the mirror is rooted at
}

impl SyncConfig {
    /// Check every field before any network or filesystem work happens.
    ///
    /// Each day in the range must be a real calendar day of `year`/`month`,
    /// so a plan like Sept 1-31 fails here rather than partway through.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            bail!("bucket must not be empty");
        }
        if self.product.is_empty() {
            bail!("product must not be empty");
        }
        if self.base_path.as_os_str().is_empty() {
            bail!("base path must not be empty");
        }
        if self.start_day > self.end_day {
            bail!(
                "day range is reversed: start {} > end {}",
                self.start_day,
                self.end_day
            );
        }
        if self.start_hour > self.end_hour {
            bail!(
                "hour range is reversed: start {} > end {}",
                self.start_hour,
                self.end_hour
            );
        }
        if self.end_hour > 23 {
            bail!("end hour {} out of range (expected 0-23)", self.end_hour);
        }
        for day in self.start_day..=self.end_day {
            DataHour::new(self.year, self.month, day, self.start_hour).with_context(|| {
                format!(
                    "day {} is not a valid date in {:04}-{:02}",
                    day, self.year, self.month
                )
            })?;
        }
        Ok(())
    }

    /// Expand the plan into every (day, hour) it covers, in calendar order.
    pub fn hours(&self) -> Result<Vec<DataHour>> {
        let mut plan = Vec::new();
        for day in self.start_day..=self.end_day {
            for hour in self.start_hour..=self.end_hour {
                plan.push(DataHour::new(self.year, self.month, day, hour)?);
            }
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn august_config() -> SyncConfig {
        SyncConfig {
            bucket: "noaa-goes16".to_string(),
            product: "GLM-L2-LCFA".to_string(),
            year: 2020,
            month: 8,
            start_day: 14,
            end_day: 15,
            start_hour: 0,
            end_hour: 23,
            base_path: PathBuf::from("/tmp/glm"),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        august_config().validate().unwrap();
    }

    #[test]
    fn test_hours_covers_full_plan_in_order() {
        let plan = august_config().hours().unwrap();
        assert_eq!(plan.len(), 2 * 24);
        assert_eq!(plan[0], DataHour::new(2020, 8, 14, 0).unwrap());
        assert_eq!(plan[23], DataHour::new(2020, 8, 14, 23).unwrap());
        assert_eq!(plan[24], DataHour::new(2020, 8, 15, 0).unwrap());
        assert_eq!(plan[47], DataHour::new(2020, 8, 15, 23).unwrap());
    }

    #[test]
    fn test_rejects_empty_base_path() {
        let mut cfg = august_config();
        cfg.base_path = PathBuf::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_bucket() {
        let mut cfg = august_config();
        cfg.bucket = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_reversed_day_range() {
        let mut cfg = august_config();
        cfg.start_day = 15;
        cfg.end_day = 14;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_reversed_hour_range() {
        let mut cfg = august_config();
        cfg.start_hour = 12;
        cfg.end_hour = 6;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_hour_24() {
        let mut cfg = august_config();
        cfg.end_hour = 24;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_day_31_in_a_30_day_month() {
        let mut cfg = august_config();
        cfg.month = 9;
        cfg.start_day = 30;
        cfg.end_day = 31;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_month_13() {
        let mut cfg = august_config();
        cfg.month = 13;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_single_day_single_hour_plan() {
        let mut cfg = august_config();
        cfg.end_day = 14;
        cfg.start_hour = 5;
        cfg.end_hour = 5;
        cfg.validate().unwrap();
        let plan = cfg.hours().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0], DataHour::new(2020, 8, 14, 5).unwrap());
    }
}
