//! Zone Stats Table
//!
//! Fixed 14-zone table of shot attempts and makes. Percentages are derived on
//! every read and never stored, so they cannot drift from the counts.
//!
//! Wire form (JSON): an object keyed by every zone label, in zone order:
//! `{"MID_L": {"attempts": 3, "makes": 1, "fg_pct": 0.333..}, ...}`.
//! `fg_pct` is `null` for a zone with no attempts and is ignored on input.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::court::Zone;
use crate::error::StatsError;

/// Makes / attempts for one zone (or any group of zones).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "ShotLineWire")]
pub struct ShotLine {
    pub attempts: u32,
    pub makes: u32,
}

#[derive(Serialize)]
struct ShotLineWire {
    attempts: u32,
    makes: u32,
    fg_pct: Option<f64>,
}

impl From<ShotLine> for ShotLineWire {
    fn from(line: ShotLine) -> Self {
        Self {
            attempts: line.attempts,
            makes: line.makes,
            fg_pct: line.percentage(),
        }
    }
}

impl ShotLine {
    pub fn new(attempts: u32, makes: u32) -> Self {
        Self { attempts, makes }
    }

    /// makes / attempts in [0, 1]; `None` when there are no attempts.
    pub fn percentage(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(self.makes as f64 / self.attempts as f64)
        }
    }

    pub fn misses(&self) -> u32 {
        self.attempts.saturating_sub(self.makes)
    }

    pub fn record(&mut self, made: bool) {
        self.attempts = self.attempts.saturating_add(1);
        if made {
            self.makes = self.makes.saturating_add(1);
        }
    }

    pub fn add(&mut self, other: &ShotLine) {
        self.attempts = self.attempts.saturating_add(other.attempts);
        self.makes = self.makes.saturating_add(other.makes);
    }

    pub fn is_consistent(&self) -> bool {
        self.makes <= self.attempts
    }
}

/// Shot attempts and makes for all 14 zones, indexed by [`Zone::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "BTreeMap<String, ShotLine>")]
pub struct ZoneStatsTable {
    lines: [ShotLine; Zone::COUNT],
}

impl ZoneStatsTable {
    /// All zones at zero attempts (every percentage undefined).
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one attempt in `zone`, and one make if `made`.
    pub fn record_attempt(&mut self, zone: Zone, made: bool) {
        self.lines[zone.index()].record(made);
    }

    /// Add every zone of `other` into this table.
    pub fn merge(&mut self, other: &ZoneStatsTable) {
        for (line, theirs) in self.lines.iter_mut().zip(other.lines.iter()) {
            line.add(theirs);
        }
    }

    /// Value-returning form of [`merge`](Self::merge).
    pub fn merged(&self, other: &ZoneStatsTable) -> ZoneStatsTable {
        let mut out = *self;
        out.merge(other);
        out
    }

    pub fn line(&self, zone: Zone) -> ShotLine {
        self.lines[zone.index()]
    }

    pub fn attempts(&self, zone: Zone) -> u32 {
        self.lines[zone.index()].attempts
    }

    pub fn makes(&self, zone: Zone) -> u32 {
        self.lines[zone.index()].makes
    }

    /// Field-goal percentage for `zone`; `None` when it has no attempts.
    pub fn percentage(&self, zone: Zone) -> Option<f64> {
        self.lines[zone.index()].percentage()
    }

    /// Zones and lines in zone order.
    pub fn iter(&self) -> impl Iterator<Item = (Zone, ShotLine)> + '_ {
        Zone::ALL.iter().map(move |&zone| (zone, self.lines[zone.index()]))
    }

    /// Sum over the zones matching `filter`.
    pub fn sum_where(&self, filter: impl Fn(Zone) -> bool) -> ShotLine {
        let mut total = ShotLine::default();
        for (zone, line) in self.iter() {
            if filter(zone) {
                total.add(&line);
            }
        }
        total
    }

    pub fn field_goals(&self) -> ShotLine {
        self.sum_where(|_| true)
    }

    pub fn threes(&self) -> ShotLine {
        self.sum_where(|zone| zone.is_three())
    }

    pub fn twos(&self) -> ShotLine {
        self.sum_where(|zone| !zone.is_three())
    }

    pub fn total_attempts(&self) -> u32 {
        self.field_goals().attempts
    }

    pub fn total_makes(&self) -> u32 {
        self.field_goals().makes
    }

    /// Points produced by the made shots in this table.
    pub fn points(&self) -> u32 {
        self.iter()
            .map(|(zone, line)| line.makes * zone.shot_value())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.attempts == 0)
    }
}

impl Serialize for ZoneStatsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Zone::COUNT))?;
        for (zone, line) in self.iter() {
            map.serialize_entry(zone.label(), &line)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, ShotLine>> for ZoneStatsTable {
    type Error = StatsError;

    /// Build a table from its wire form. Every zone must be present and
    /// consistent; missing zones are never filled with defaults.
    fn try_from(raw: BTreeMap<String, ShotLine>) -> Result<Self, StatsError> {
        for key in raw.keys() {
            key.parse::<Zone>()?;
        }

        let missing: Vec<&'static str> = Zone::ALL
            .iter()
            .filter(|zone| !raw.contains_key(zone.label()))
            .map(|zone| zone.label())
            .collect();
        if !missing.is_empty() {
            return Err(StatsError::IncompleteZoneTable { missing });
        }

        let mut table = ZoneStatsTable::new();
        for zone in Zone::ALL {
            let line = raw[zone.label()];
            if !line.is_consistent() {
                return Err(StatsError::InconsistentZoneLine {
                    zone,
                    makes: line.makes,
                    attempts: line.attempts,
                });
            }
            table.lines[zone.index()] = line;
        }
        Ok(table)
    }
}
