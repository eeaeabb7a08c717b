/*!
Configuration of a [Problem](crate::problem::Problem).

All tunables governing the search live in [Config], built from named, bounded
[ConfigOption] fields so a caller gets a clear error surface (via `name`/`min`/`max`) rather
than silently out-of-range behavior.
*/

mod config_option;
pub use config_option::ConfigOption;

/// The limits governing a single [solve](crate::problem::Problem::solve) attempt.
#[derive(Clone, Debug)]
pub struct Config {
    /// Independent random restarts attempted before reporting [Unknown](crate::types::err::SolveError::Unknown).
    pub max_tries: ConfigOption<u32>,

    /// Flips attempted per try before the try is abandoned and a fresh restart begins.
    pub max_flips: ConfigOption<u32>,

    /// Probability, on each step, of taking a uniformly random walk flip rather than the
    /// greedy (most-improving) flip.
    pub noise: ConfigOption<f64>,

    /// Wall-clock budget for the whole solve, checked every [timeout_check_interval](Config::timeout_check_interval).
    /// `0` means unbounded.
    pub timeout_ms: ConfigOption<u64>,

    /// How many flips elapse between wall-clock checks.
    pub timeout_check_interval: ConfigOption<u32>,

    /// Default probability of an atom starting `true` on a fresh assignment, used when an
    /// atom is created without an explicit bias.
    pub default_bias: ConfigOption<f64>,

    /// Flips spent improving the objective after feasibility is first reached, per try.
    pub optimization_budget: ConfigOption<u32>,

    /// The seed for the deterministic random stream; see [crate::generic::rng].
    pub seed: u64,
}

impl Default for Config {
    /// Small, deterministic defaults suitable for tests and for the kind of content-generation
    /// problems (a few hundred atoms) catsat targets.
    fn default() -> Self {
        Self {
            max_tries: ConfigOption::new("max_tries", 1, u32::MAX, 20),
            max_flips: ConfigOption::new("max_flips", 1, u32::MAX, 10_000),
            noise: ConfigOption::new("noise", 0.0, 1.0, 0.5),
            timeout_ms: ConfigOption::new("timeout_ms", 0, u64::MAX, 0),
            timeout_check_interval: ConfigOption::new("timeout_check_interval", 1, u32::MAX, 256),
            default_bias: ConfigOption::new("default_bias", 0.0, 1.0, 0.5),
            optimization_budget: ConfigOption::new("optimization_budget", 0, u32::MAX, 1_000),
            seed: 0,
        }
    }
}
