//! Hand-record journal.
//!
//! The engine fills a [`HandRecord`] while a hand is played; [`HandLogger`]
//! appends finished records to a JSONL journal, one hand per line with `\n`
//! endings, and [`read_journal`] loads them back.

use std::fs::{create_dir_all, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::PlayerAction;
use crate::round::Round;

/// One accepted action, tagged with the street it was taken on.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: usize,
    pub round: Round,
    pub action: PlayerAction,
}

/// Immutable history of one hand, ready for storage.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// `YYYYMMDD-NNNNNN`
    pub hand_id: String,
    /// Seed of this hand's deck shuffle
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    /// Final table message, e.g. `"alice wins 90"`
    pub result: Option<String>,
    /// RFC 3339, stamped when the record is journaled
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

/// Who won at showdown and with what.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<usize>,
    /// Winning category name, or a split note
    #[serde(default)]
    pub notes: Option<String>,
}

impl HandRecord {
    pub fn new(hand_id: String, seed: Option<u64>) -> Self {
        Self {
            hand_id,
            seed,
            actions: Vec::new(),
            board: Vec::new(),
            result: None,
            ts: None,
            showdown: None,
        }
    }

    /// Whether any action was taken on `round`.
    pub fn reached(&self, round: Round) -> bool {
        self.actions.iter().any(|a| a.round == round)
    }
}

/// ```
/// assert_eq!(holdem_engine::logger::format_hand_id("20250102", 7), "20250102-000007");
/// ```
pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{yyyymmdd}-{seq:06}")
}

fn today() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

/// JSONL journal writer. Each [`HandLogger::write`] emits one line and
/// flushes, so a crash loses at most the hand in flight.
pub struct HandLogger {
    sink: Option<Box<dyn Write + Send>>,
    date: String,
    seq: u32,
    written: u64,
}

impl std::fmt::Debug for HandLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandLogger")
            .field("date", &self.date)
            .field("seq", &self.seq)
            .field("written", &self.written)
            .finish_non_exhaustive()
    }
}

impl HandLogger {
    /// Creates (or truncates) the journal file, making parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self::to_writer(BufWriter::new(file)))
    }

    /// Journals into any writer, e.g. a socket or an in-memory buffer.
    pub fn to_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Some(Box::new(writer)),
            date: today(),
            seq: 0,
            written: 0,
        }
    }

    /// Id generator with a fixed date and no output.
    pub fn detached(date: &str) -> Self {
        Self {
            sink: None,
            date: date.to_string(),
            seq: 0,
            written: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    /// Records journaled so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Appends `record`, stamping `ts` when the engine left it empty.
    pub fn write(&mut self, record: &HandRecord) -> io::Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        let line = if record.ts.is_some() {
            serde_json::to_string(record)
        } else {
            let mut stamped = record.clone();
            stamped.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
            serde_json::to_string(&stamped)
        }
        .map_err(io::Error::other)?;
        sink.write_all(line.as_bytes())?;
        sink.write_all(b"\n")?;
        sink.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Loads every record of a journal. Blank lines are skipped; a malformed
/// line fails with [`io::ErrorKind::InvalidData`] naming its line number.
pub fn read_journal<P: AsRef<Path>>(path: P) -> io::Result<Vec<HandRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("line {}: {}", idx + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}
