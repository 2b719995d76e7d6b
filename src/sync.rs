// src/sync.rs
//
//! The sync engine: derive the hour prefix, list it, mirror what is missing.
//!
//! Transfers are strictly sequential and there is no retry layer. The first
//! failed listing or copy aborts the run; everything already on disk stays,
//! and a re-run skips it, so re-running *is* the recovery mechanism.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

use crate::calendar::DataHour;
use crate::config::SyncConfig;
use crate::constants::LOCAL_DATA_DIR;
use crate::s3_client::block_on;
use crate::store::{ObjectSource, S3ObjectSource};

/// Remote prefix for one hour of one product:
/// `<product>/<year>/<day-of-year>/<hour>/`, every field fixed width.
/// The trailing slash keeps hour `01` from matching hours `10`-`19`.
pub fn hour_prefix(product: &str, hour: DataHour) -> String {
    format!(
        "{}/{:04}/{}/{:02}/",
        product,
        hour.year(),
        hour.day_of_year(),
        hour.hour()
    )
}

/// Where `key` lands below `base`: the bucket becomes the first mirrored
/// directory and the key's own path is kept as-is, so the local tree reads
/// `<base>/data/<bucket>/<key>`. Empty, `.` and `..` segments are dropped,
/// so a key can only descend below the base.
pub fn local_target_path(base: &Path, bucket: &str, key: &str) -> PathBuf {
    let mut path = base.join(LOCAL_DATA_DIR).join(bucket);
    for segment in key
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
    {
        path.push(segment);
    }
    path
}

/// Tally of one run. `downloaded + skipped == listed` once a run completes;
/// `bytes` counts only what was actually copied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    pub listed: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub bytes: u64,
}

impl SyncOutcome {
    fn absorb(&mut self, other: SyncOutcome) {
        self.listed += other.listed;
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.bytes += other.bytes;
    }
}

/// Mirror every object of one hour through `source`, in listing order.
///
/// Directories are created per object, so an empty listing touches the
/// filesystem not at all. A file that already exists is skipped on its path
/// alone; contents are never compared. The progress index is the position in
/// the listing, 1-based, which also covers the corner where two listed keys
/// map to one local path: the first write wins and the second is a skip.
pub async fn sync_hour_objects<S: ObjectSource + ?Sized>(
    source: &S,
    cfg: &SyncConfig,
    hour: DataHour,
) -> Result<SyncOutcome> {
    let prefix = hour_prefix(&cfg.product, hour);
    debug!("listing s3://{}/{}", cfg.bucket, prefix);
    let keys = source.list(&prefix).await?;
    let total = keys.len();
    info!("{}: {} object(s) under s3://{}/{}", hour, total, cfg.bucket, prefix);

    let mut outcome = SyncOutcome {
        listed: total,
        ..SyncOutcome::default()
    };
    for (idx, key) in keys.iter().enumerate() {
        // Skip "directories" which are objects that end with a slash
        if key.ends_with('/') {
            outcome.skipped += 1;
            continue;
        }
        let target = local_target_path(&cfg.base_path, &cfg.bucket, key);
        if let Some(dir) = target.parent() {
            if !dir.exists() {
                info!("creating directory {}", dir.display());
                fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
        }
        if target.exists() {
            debug!("already present, skipping s3://{}/{}", cfg.bucket, key);
            outcome.skipped += 1;
            continue;
        }
        info!("downloading {}/{}: s3://{}/{}", idx + 1, total, cfg.bucket, key);
        outcome.bytes += source.fetch(key, &target).await?;
        outcome.downloaded += 1;
    }
    info!(
        "{}: {} downloaded, {} already present",
        hour, outcome.downloaded, outcome.skipped
    );
    Ok(outcome)
}

/// Run the whole plan through `source`, hour by hour in calendar order.
///
/// Validates the config before touching anything. The first failing hour
/// stops the run; hours after it are never listed.
pub async fn sync_plan_objects<S: ObjectSource + ?Sized>(
    source: &S,
    cfg: &SyncConfig,
) -> Result<SyncOutcome> {
    cfg.validate()?;
    let plan = cfg.hours()?;
    info!(
        "syncing {} hour(s) of {} from s3://{} into {}",
        plan.len(),
        cfg.product,
        cfg.bucket,
        cfg.base_path.display()
    );
    let mut total = SyncOutcome::default();
    for hour in plan {
        total.absorb(sync_hour_objects(source, cfg, hour).await?);
    }
    Ok(total)
}

/// Mirror one hour from the real bucket, blocking until done.
pub fn sync_hour(cfg: &SyncConfig, hour: DataHour) -> Result<SyncOutcome> {
    let source = S3ObjectSource::open(&cfg.bucket)?;
    block_on(sync_hour_objects(&source, cfg, hour))
}

/// Run the whole configured plan against the real bucket, blocking until done.
pub fn sync_all(cfg: &SyncConfig) -> Result<SyncOutcome> {
    cfg.validate()?;
    let source = S3ObjectSource::open(&cfg.bucket)?;
    let result = block_on(sync_plan_objects(&source, cfg));
    match &result {
        Ok(outcome) => info!(
            "finished: {} object(s) listed, {} downloaded ({} bytes), {} already present",
            outcome.listed, outcome.downloaded, outcome.bytes, outcome.skipped
        ),
        Err(e) => error!("sync aborted: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_prefix_is_fixed_width() {
        let h = DataHour::new(2020, 8, 14, 0).unwrap();
        assert_eq!(hour_prefix("GLM-L2-LCFA", h), "GLM-L2-LCFA/2020/227/00/");
    }

    #[test]
    fn test_hour_prefix_pads_single_digit_hour() {
        let h = DataHour::new(2020, 1, 1, 7).unwrap();
        assert_eq!(hour_prefix("GLM-L2-LCFA", h), "GLM-L2-LCFA/2020/001/07/");
    }

    #[test]
    fn test_hour_prefix_trailing_slash_fences_hours() {
        let h = DataHour::new(2020, 8, 14, 1).unwrap();
        let prefix = hour_prefix("GLM-L2-LCFA", h);
        assert!(prefix.ends_with("/01/"));
        assert!(!"GLM-L2-LCFA/2020/227/10/some_file.nc".starts_with(&prefix));
    }

    #[test]
    fn test_local_target_path_mirrors_remote_layout() {
        let p = local_target_path(
            Path::new("/mirror"),
            "noaa-goes16",
            "GLM-L2-LCFA/2020/227/00/OR_GLM-L2-LCFA_G16_s2020227.nc",
        );
        assert_eq!(
            p,
            PathBuf::from(
                "/mirror/data/noaa-goes16/GLM-L2-LCFA/2020/227/00/OR_GLM-L2-LCFA_G16_s2020227.nc"
            )
        );
    }

    #[test]
    fn test_local_target_path_drops_empty_segments() {
        let p = local_target_path(Path::new("/mirror"), "b", "a//c.nc");
        assert_eq!(p, PathBuf::from("/mirror/data/b/a/c.nc"));
    }

    #[test]
    fn test_local_target_path_never_escapes_base() {
        let p = local_target_path(Path::new("/mirror"), "b", "../../etc/passwd");
        assert_eq!(p, PathBuf::from("/mirror/data/b/etc/passwd"));
        let q = local_target_path(Path::new("/mirror"), "b", "a/./../c.nc");
        assert_eq!(q, PathBuf::from("/mirror/data/b/a/c.nc"));
    }

    #[test]
    fn test_outcome_absorb_sums_fields() {
        let mut a = SyncOutcome {
            listed: 3,
            downloaded: 2,
            skipped: 1,
            bytes: 10,
        };
        a.absorb(SyncOutcome {
            listed: 5,
            downloaded: 0,
            skipped: 5,
            bytes: 0,
        });
        assert_eq!(
            a,
            SyncOutcome {
                listed: 8,
                downloaded: 2,
                skipped: 6,
                bytes: 10
            }
        );
    }
}
