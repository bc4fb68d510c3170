use clap::Parser;
use dispatch_core::config::DEFAULT_TIE_EPSILON;
use dispatch_core::DispatchConfig;

#[derive(Debug, Parser)]
#[command(
    name = "dispatch_console",
    about = "Operator console for the ride dispatch engine",
    long_about = "Register drivers, queue ride requests, dispatch the nearest driver\n\
                  and complete rides from an interactive menu. Nothing is persisted."
)]
pub struct Cli {
    /// First id handed out for drivers, riders and rides
    #[arg(long, default_value_t = 1, env = "DISPATCH_ID_BASE")]
    pub id_base: u64,
    /// Distances closer than this are tied and resolved by rating
    #[arg(
        long,
        default_value_t = DEFAULT_TIE_EPSILON,
        value_parser = parse_tie_epsilon
    )]
    pub tie_epsilon: f64,
    /// Maximum number of registered drivers
    #[arg(long)]
    pub max_drivers: Option<usize>,
    /// Maximum number of riders waiting in the queue
    #[arg(long)]
    pub max_waiting_riders: Option<usize>,
    /// Maximum number of rides in the ledger
    #[arg(long)]
    pub max_rides: Option<usize>,
    /// Apply the 50 driver / 50 rider / 100 ride bounds of the original tables
    #[arg(long)]
    pub legacy_limits: bool,
    /// Print listings as JSON lines
    #[arg(long)]
    pub json: bool,
    /// Raise log verbosity on stderr (repeatable); ignored when RUST_LOG is set
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Explicit bounds override the legacy preset.
    pub fn dispatch_config(&self) -> DispatchConfig {
        let base = if self.legacy_limits {
            DispatchConfig::legacy_limits()
        } else {
            DispatchConfig::default()
        };
        let mut config = base
            .with_id_base(self.id_base)
            .with_tie_epsilon(self.tie_epsilon);
        if let Some(max) = self.max_drivers {
            config = config.with_max_drivers(max);
        }
        if let Some(max) = self.max_waiting_riders {
            config = config.with_max_waiting_riders(max);
        }
        if let Some(max) = self.max_rides {
            config = config.with_max_rides(max);
        }
        config
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Accepts finite, non-negative values only.
fn parse_tie_epsilon(raw: &str) -> Result<f64, String> {
    let value = raw.parse::<f64>().map_err(|err| err.to_string())?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("tie epsilon must be finite and non-negative, got {raw}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unbounded() {
        let cli = Cli::parse_from(["dispatch_console"]);
        let config = cli.dispatch_config();
        assert_eq!(config, DispatchConfig::default());
        assert!(!cli.json);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn explicit_bound_overrides_legacy_preset() {
        let cli = Cli::parse_from([
            "dispatch_console",
            "--legacy-limits",
            "--max-rides",
            "3",
            "--id-base",
            "10",
            "-vv",
        ]);
        let config = cli.dispatch_config();
        assert_eq!(config.max_drivers, Some(50));
        assert_eq!(config.max_waiting_riders, Some(50));
        assert_eq!(config.max_rides, Some(3));
        assert_eq!(config.id_base, 10);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn tie_epsilon_must_be_finite_and_non_negative() {
        for bad in ["-1", "NaN", "inf", "wide"] {
            let parsed = Cli::try_parse_from(["dispatch_console", "--tie-epsilon", bad]);
            assert!(parsed.is_err(), "accepted --tie-epsilon {bad}");
        }
        let cli = Cli::parse_from(["dispatch_console", "--tie-epsilon", "0"]);
        assert_eq!(cli.dispatch_config().tie_epsilon, 0.0);
    }
}
