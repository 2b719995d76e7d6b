// src/constants.rs
//
// Centralized constants for glmsync to avoid hardcoded values throughout the codebase

/// Public archive bucket holding the GOES-16 products
pub const DEFAULT_BUCKET: &str = "noaa-goes16";

/// GLM Level-2 Lightning Cluster-Filter Algorithm product
pub const DEFAULT_PRODUCT: &str = "GLM-L2-LCFA";

/// Region the public archive is served from
pub const DEFAULT_REGION: &str = "us-east-1";

/// Directory component the local mirror is rooted under, below the base path
pub const LOCAL_DATA_DIR: &str = "data";

/// Environment variable overriding the archive region
pub const ENV_AWS_REGION: &str = "AWS_REGION";

/// Environment variable pointing at an S3-compatible endpoint
/// Example: AWS_ENDPOINT_URL=http://localhost:9000
pub const ENV_AWS_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
