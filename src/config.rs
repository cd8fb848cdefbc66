use std::time::Duration;

use tracing::trace;

/// How the points returned for the sample window are reduced to a single
/// utilization value.
///
/// The backend returns one point per node in the pool; the reduction has to
/// be deterministic so two runs over the same window scale the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleReduction {
    /// Greatest value observed in the window (default)
    #[default]
    Max,

    /// Most recent point in the window
    Latest,

    /// Arithmetic mean over all points in the window
    Mean,
}

/// Scaling policy for a single resource pool.
///
/// Constructed once at startup and read-only for the process lifetime.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ScalingPolicy {
    /// Smallest size the pool may be shrunk to
    #[serde(default = "default_min_size")]
    pub min_size: u32,

    /// Largest size the pool may be grown to
    #[serde(default = "default_max_size")]
    pub max_size: u32,

    /// Utilization below this triggers a scale-down
    #[serde(default = "default_scale_down_threshold")]
    pub scale_down_threshold: f64,

    /// Utilization above this triggers a scale-up
    #[serde(default = "default_scale_up_threshold")]
    pub scale_up_threshold: f64,

    /// Nodes added or removed per resize
    #[serde(default = "default_step")]
    pub step: u32,

    /// Seconds between evaluation cycles
    #[serde(default = "default_evaluation_period")]
    pub evaluation_period_secs: u64,

    /// Lookback window for the metric query, in seconds
    #[serde(default = "default_sample_window")]
    pub sample_window_secs: u64,

    /// Reduction applied to the points in the sample window
    #[serde(default)]
    pub reduction: SampleReduction,

    /// Minimum seconds between consecutive resizes (0 = disabled)
    #[serde(default)]
    pub dwell_secs: u64,
}

impl ScalingPolicy {
    /// Check the policy invariants.
    ///
    /// Violations are startup-time errors; the scheduler must never run
    /// with a policy that can produce out-of-bounds targets.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_size < 1 {
            anyhow::bail!("min_size must be at least 1");
        }
        if self.max_size < self.min_size {
            anyhow::bail!(
                "max_size ({}) must not be smaller than min_size ({})",
                self.max_size,
                self.min_size
            );
        }
        if !(0.0..=1.0).contains(&self.scale_down_threshold)
            || !(0.0..=1.0).contains(&self.scale_up_threshold)
        {
            anyhow::bail!("thresholds must lie within [0.0, 1.0]");
        }
        if self.scale_down_threshold >= self.scale_up_threshold {
            anyhow::bail!(
                "scale_down_threshold ({}) must be below scale_up_threshold ({})",
                self.scale_down_threshold,
                self.scale_up_threshold
            );
        }
        if self.step < 1 {
            anyhow::bail!("step must be at least 1");
        }
        if self.evaluation_period_secs == 0 {
            anyhow::bail!("evaluation_period_secs must be greater than zero");
        }
        if self.sample_window_secs == 0 {
            anyhow::bail!("sample_window_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn evaluation_period(&self) -> Duration {
        Duration::from_secs(self.evaluation_period_secs)
    }

    pub fn sample_window(&self) -> Duration {
        Duration::from_secs(self.sample_window_secs)
    }

    /// Dwell gate between consecutive resizes, if enabled.
    pub fn dwell(&self) -> Option<Duration> {
        (self.dwell_secs > 0).then(|| Duration::from_secs(self.dwell_secs))
    }
}

impl Default for ScalingPolicy {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_size: default_max_size(),
            scale_down_threshold: default_scale_down_threshold(),
            scale_up_threshold: default_scale_up_threshold(),
            step: default_step(),
            evaluation_period_secs: default_evaluation_period(),
            sample_window_secs: default_sample_window(),
            reduction: SampleReduction::default(),
            dwell_secs: 0,
        }
    }
}

/// Monitoring backend endpoint configuration
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "crate::util::get_monitor_url")]
    pub url: String,

    /// Optional shared secret sent as `X-MONITORING-SECRET`
    #[serde(default = "crate::util::get_monitor_secret")]
    pub secret: Option<String>,

    /// Name of the utilization metric to sample
    #[serde(default = "default_metric")]
    pub metric: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            url: crate::util::get_monitor_url(),
            secret: crate::util::get_monitor_secret(),
            metric: default_metric(),
        }
    }
}

/// Resource pool controller endpoint configuration
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PoolConfig {
    #[serde(default = "crate::util::get_pool_url")]
    pub url: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            url: crate::util::get_pool_url(),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub pool: PoolConfig,

    #[serde(default)]
    pub policy: ScalingPolicy,

    /// Bound on every backend request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            pool: PoolConfig::default(),
            policy: ScalingPolicy::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_min_size() -> u32 {
    1
}

fn default_max_size() -> u32 {
    10
}

fn default_scale_down_threshold() -> f64 {
    0.5
}

fn default_scale_up_threshold() -> f64 {
    0.7
}

fn default_step() -> u32 {
    1
}

fn default_evaluation_period() -> u64 {
    600
}

fn default_sample_window() -> u64 {
    600
}

fn default_metric() -> String {
    String::from("cluster/cpu_load")
}

fn default_request_timeout() -> u64 {
    30
}

pub fn read_config_file(path: &str) -> anyhow::Result<Config> {
    let file_content = std::fs::read_to_string(path)?;
    serde_json::from_str(&file_content)
        .map_err(|_| anyhow::anyhow!("Invalid configuration file provided!"))
        .inspect(|config: &Config| trace!("loaded config: {config:?}"))
}
