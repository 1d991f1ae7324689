use clap::Parser;

use crate::settings::{
    ClickSettings, JitterSettings, DEFAULT_MAX_CLICKS, DEFAULT_MAX_WAIT_MS, DEFAULT_MIN_CLICKS,
    DEFAULT_MIN_WAIT_MS,
};

/// Clicks at random intervals and nudges the cursor every few clicks.
#[derive(Parser, Debug)]
#[command(name = "jitter-clicker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Minimum wait between clicks (ms)
    #[arg(long, default_value_t = DEFAULT_MIN_WAIT_MS)]
    pub min_wait: u64,

    /// Maximum wait between clicks (ms)
    #[arg(long, default_value_t = DEFAULT_MAX_WAIT_MS)]
    pub max_wait: u64,

    /// Minimum clicks before the cursor is nudged
    #[arg(long, default_value_t = DEFAULT_MIN_CLICKS)]
    pub min_clicks: u32,

    /// Maximum clicks before the cursor is nudged
    #[arg(long, default_value_t = DEFAULT_MAX_CLICKS)]
    pub max_clicks: u32,

    /// How far (px) the cursor may wander from its center
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(i32).range(1..))]
    pub radius: i32,

    /// Run without a window, starting immediately
    #[arg(long)]
    pub headless: bool,

    /// Stop a headless run after this many seconds
    #[arg(long, requires = "headless")]
    pub duration: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn settings(&self) -> ClickSettings {
        ClickSettings {
            min_wait_ms: self.min_wait,
            max_wait_ms: self.max_wait,
            min_clicks: self.min_clicks,
            max_clicks: self.max_clicks,
        }
    }

    pub fn jitter(&self) -> JitterSettings {
        JitterSettings { radius: self.radius, ..JitterSettings::default() }
    }
}
