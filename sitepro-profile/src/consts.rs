/// Default half-width of the profiling window, in bp.
pub const DEFAULT_SPAN: i64 = 1000;

/// Default bin width, in bp.
pub const DEFAULT_RESOLUTION: i64 = 50;

/// Two sided 95% quantile of the standard normal distribution.
pub const Z_95: f64 = 1.96;

/// Appended to a pair label to name its dump file.
pub const DUMP_SUFFIX: &str = "_dump.txt";

/// Prefix of the run name when none is given.
pub const DEFAULT_NAME_PREFIX: &str = "sitepro";

/// Line colours of the R plot, interpolated when there are several profiles.
pub const PLOT_COLORS: [&str; 4] = ["#C8524D", "#BDD791", "#447CBE", "#775A9C"];
