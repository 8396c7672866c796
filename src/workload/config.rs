use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};

use crate::workload::consts::{DEFAULT_CONSUMERS, DEFAULT_ITEMS_PER_PRODUCER, DEFAULT_PRODUCERS, DEFAULT_START_DELAY};

/// How consumer threads take items off the deque.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ConsumeMode {
    /// spin on `pop_front`
    Poll,
    /// block in `wait_pop_front` without a timeout
    Wait,
    /// block in `wait_pop_front` with a short timeout, re-checking the done counter
    Timed,
}

impl FromStr for ConsumeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poll" => Ok(Self::Poll),
            "wait" => Ok(Self::Wait),
            "timed" => Ok(Self::Timed),
            other => bail!("unknown consume mode `{}`, expected poll, wait or timed", other),
        }
    }
}

impl fmt::Display for ConsumeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Poll => "poll",
            Self::Wait => "wait",
            Self::Timed => "timed",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug)]
pub struct DrillConfig {
    pub producers: usize,
    /// each producer pushes `1..=items_per_producer`, then its sentinel
    pub items_per_producer: i64,
    pub consumers: usize,
    pub mode: ConsumeMode,
    pub start_delay: Duration,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            producers: DEFAULT_PRODUCERS,
            items_per_producer: DEFAULT_ITEMS_PER_PRODUCER,
            consumers: DEFAULT_CONSUMERS,
            mode: ConsumeMode::Wait,
            start_delay: DEFAULT_START_DELAY,
        }
    }
}

impl DrillConfig {
    /// Positional arguments: `[producers] [items_per_producer] [consumers] [mode] [start_delay_ms]`.
    /// Missing trailing arguments keep their defaults.
    pub fn from_args<I, S>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        for (index, arg) in args.into_iter().enumerate() {
            let arg = arg.as_ref();
            match index {
                0 => config.producers = arg.parse().with_context(|| format!("invalid producers `{}`", arg))?,
                1 => config.items_per_producer = arg.parse().with_context(|| format!("invalid items_per_producer `{}`", arg))?,
                2 => config.consumers = arg.parse().with_context(|| format!("invalid consumers `{}`", arg))?,
                3 => config.mode = arg.parse()?,
                4 => {
                    let ms: u64 = arg.parse().with_context(|| format!("invalid start_delay_ms `{}`", arg))?;
                    config.start_delay = Duration::from_millis(ms);
                }
                _ => bail!("unexpected argument `{}`", arg),
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.producers == 0 {
            bail!("producers must be at least 1");
        }
        if self.consumers == 0 {
            bail!("consumers must be at least 1");
        }
        if self.items_per_producer < 0 {
            bail!("items_per_producer must not be negative");
        }
        Ok(())
    }

    /// Sum every consumer should report once all sentinels are seen.
    pub fn expected_total(&self) -> i64 {
        let k = self.items_per_producer;
        self.producers as i64 * (k * (k + 1) / 2)
    }

    pub fn expected_items(&self) -> usize {
        self.producers * self.items_per_producer as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_drill_scenario() {
        let config = DrillConfig::from_args(Vec::<String>::new()).unwrap();
        assert_eq!(config.producers, 100);
        assert_eq!(config.items_per_producer, 100);
        assert_eq!(config.consumers, 1);
        assert_eq!(config.mode, ConsumeMode::Wait);
        assert_eq!(config.expected_total(), 505000);
        assert_eq!(config.expected_items(), 10000);
    }

    #[test]
    fn positional_args() {
        let config = DrillConfig::from_args(["4", "10", "3", "Timed", "0"]).unwrap();
        assert_eq!(config.producers, 4);
        assert_eq!(config.items_per_producer, 10);
        assert_eq!(config.consumers, 3);
        assert_eq!(config.mode, ConsumeMode::Timed);
        assert_eq!(config.start_delay, Duration::ZERO);
        assert_eq!(config.expected_total(), 220);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(DrillConfig::from_args(["x"]).is_err());
        assert!(DrillConfig::from_args(["0"]).is_err());
        assert!(DrillConfig::from_args(["1", "1", "0"]).is_err());
        assert!(DrillConfig::from_args(["1", "1", "1", "spin"]).is_err());
        assert!(DrillConfig::from_args(["1", "1", "1", "poll", "5", "extra"]).is_err());
    }

    #[test]
    fn mode_round_trips_through_display() {
        for mode in [ConsumeMode::Poll, ConsumeMode::Wait, ConsumeMode::Timed] {
            assert_eq!(mode.to_string().parse::<ConsumeMode>().unwrap(), mode);
        }
    }
}
