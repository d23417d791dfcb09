//! Exchange session clock
//!
//! Classifies an instant into a trading session using a fixed UTC offset.
//! Exchange holidays and DST changes are not modelled.

use crate::config::SessionConfig;
use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Utc, Weekday};
use std::fmt;

/// Trading session at an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    PreMarket,
    Open,
    AfterHours,
    Closed,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Session::PreMarket => write!(f, "pre-market"),
            Session::Open => write!(f, "open"),
            Session::AfterHours => write!(f, "after-hours"),
            Session::Closed => write!(f, "closed"),
        }
    }
}

/// Session clock for one exchange
#[derive(Debug, Clone)]
pub struct MarketClock {
    offset: FixedOffset,
    pre_market_open: NaiveTime,
    open: NaiveTime,
    close: NaiveTime,
    after_hours_close: NaiveTime,
}

impl MarketClock {
    /// Build from configuration; fails on an out-of-range offset
    pub fn from_config(config: &SessionConfig) -> anyhow::Result<Self> {
        let offset = config
            .utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!("Invalid UTC offset: {} hours", config.utc_offset_hours)
            })?;

        Ok(Self {
            offset,
            pre_market_open: config.pre_market_open,
            open: config.open,
            close: config.close,
            after_hours_close: config.after_hours_close,
        })
    }

    /// Local exchange time for a UTC instant
    pub fn local_time(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset)
    }

    /// Session at a UTC instant
    pub fn session_at(&self, at: DateTime<Utc>) -> Session {
        let local = self.local_time(at);
        if matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return Session::Closed;
        }

        let time = local.time();
        if time >= self.open && time < self.close {
            Session::Open
        } else if time >= self.pre_market_open && time < self.open {
            Session::PreMarket
        } else if time >= self.close && time < self.after_hours_close {
            Session::AfterHours
        } else {
            Session::Closed
        }
    }

    /// Session right now
    pub fn session_now(&self) -> Session {
        self.session_at(Utc::now())
    }
}
