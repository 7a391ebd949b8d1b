//! JSON-lines gameplay event log.
//!
//! One object per line, tagged by `event`:
//!
//! ```text
//! {"frame":0,"event":"level_started","level":1,"score":0}
//! {"frame":42,"event":"collected","level":1,"kind":"coin","x":3,"y":2,"points":2,"score":2}
//! {"frame":97,"event":"player_won","level":1,"score":2}
//! ```
//!
//! The first failed write disables the log for the rest of the session.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::LevelEvent;
use crate::session::{FrameReport, LevelStart};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    LevelStarted {
        level: u32,
        score: u32,
    },
    Collected {
        level: u32,
        kind: &'static str,
        x: i32,
        y: i32,
        points: u32,
        score: u32,
    },
    PlayerDied {
        level: u32,
        score: u32,
    },
    PlayerWon {
        level: u32,
        score: u32,
    },
    Failed {
        level: u32,
    },
    Complete {
        level: u32,
        score: u32,
    },
}

impl EventRecord {
    pub fn from_level_event(event: &LevelEvent, level: u32, score: u32) -> Self {
        match *event {
            LevelEvent::Collected(item) => EventRecord::Collected {
                level,
                kind: item.kind.as_str(),
                x: item.x,
                y: item.y,
                points: item.points,
                score,
            },
            LevelEvent::PlayerDied => EventRecord::PlayerDied { level, score },
            LevelEvent::PlayerWon => EventRecord::PlayerWon { level, score },
            LevelEvent::Failed => EventRecord::Failed { level },
            LevelEvent::Complete => EventRecord::Complete { level, score },
        }
    }
}

impl From<LevelStart> for EventRecord {
    fn from(value: LevelStart) -> Self {
        EventRecord::LevelStarted {
            level: value.level,
            score: value.score,
        }
    }
}

#[derive(Serialize)]
struct Line<'a> {
    frame: u64,
    #[serde(flatten)]
    record: &'a EventRecord,
}

pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl EventLog {
    /// Append to the file at `path`, or log nothing when `path` is `None`.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::disabled());
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, frame: u64, record: &EventRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &Line { frame, record }).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
        }
    }

    /// Record every event of one session update, then any level (re)start.
    pub fn record_frame(&mut self, frame: u64, report: &FrameReport) {
        for event in &report.events {
            let record = EventRecord::from_level_event(event, report.level_number, report.score);
            self.record(frame, &record);
        }
        if let Some(start) = report.started {
            self.record(frame, &start.into());
        }
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}
