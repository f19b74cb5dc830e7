//! Binary artifact format for a solved tablebase (§6): a magic number and
//! format version, followed by one fixed-width record per stored position.
//! Loading is `O(N)` in the number of records; the artifact is
//! self-describing, so a version mismatch is detected and rejected before
//! any record is decoded.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chess::core::Color;
use crate::chess::position::{Move, Position};
use crate::error::PersistenceError;
use crate::tablebase::store::{Entry, Store, Value};

/// Identifies a file as a tablebase artifact before any record is decoded.
pub const MAGIC: u32 = 0x4b52_4b31; // "KRK1" as four ASCII bytes, read big-endian.

/// Format version this build writes and expects to read.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk representation of one solved position: `{wk, wr, bk, stm}` plus
/// its value and move, matching the record layout in §6.
#[derive(Serialize, Deserialize)]
struct Record {
    wk: u8,
    wr: u8,
    bk: u8,
    stm: u8,
    /// `d` for `Mate(d)`, `-1` for `Draw`.
    value: i16,
    /// `(from << 6) | to`, or the sentinel `0xFFFF` when no move is stored.
    best_move: u16,
}

const NO_MOVE: u16 = 0xFFFF;

impl Record {
    fn encode(position: &Position, entry: &Entry) -> Self {
        let value = match entry.value {
            Value::Mate(d) => i16::try_from(d).expect("distance to mate fits in i16"),
            Value::Draw => -1,
        };
        let best_move = entry.best_move.map_or(NO_MOVE, Move::encode);
        Self {
            wk: position.white_king(),
            wr: position.white_rook(),
            bk: position.black_king(),
            stm: match position.side_to_move() {
                Color::White => 0,
                Color::Black => 1,
            },
            value,
            best_move,
        }
    }

    fn decode(self) -> Result<(Position, Entry), PersistenceError> {
        let stm = match self.stm {
            0 => Color::White,
            1 => Color::Black,
            other => return Err(PersistenceError::Corrupt(format!("invalid side-to-move byte {other}"))),
        };
        let position = Position::new(self.wk, self.wr, self.bk, stm)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;
        let best_move = if self.best_move == NO_MOVE { None } else { Some(Move::decode(self.best_move)) };
        let value = if self.value < 0 {
            if best_move.is_some() {
                return Err(PersistenceError::Corrupt("a draw record must not carry a move".into()));
            }
            Value::Draw
        } else {
            Value::Mate(u16::try_from(self.value).expect("non-negative i16 fits in u16"))
        };
        Ok((position, Entry { value, best_move }))
    }
}

/// Serializes `store` to `path`, writing to a temporary file in the same
/// directory and renaming it into place so readers never observe a
/// partially-written artifact.
///
/// # Errors
///
/// Returns [`PersistenceError`] on I/O failure or if a record cannot be
/// encoded.
pub fn save(store: &Store, path: &Path) -> Result<(), PersistenceError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let temp_path = dir.join(format!(
        ".{}.tmp",
        path.file_name().map_or_else(|| "tablebase".to_string(), |n| n.to_string_lossy().into_owned())
    ));

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&MAGIC.to_le_bytes())?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
        writer.write_all(&(store.len() as u64).to_le_bytes())?;
        for (position, entry) in store.iter() {
            let record = Record::encode(position, entry);
            bincode::serialize_into(&mut writer, &record)?;
        }
        writer.flush()?;
    }
    std::fs::rename(&temp_path, path)?;
    Ok(())
}

/// Loads a tablebase artifact previously written by [`save`].
///
/// # Errors
///
/// Returns [`PersistenceError::BadMagic`] if the file does not start with
/// the expected magic number, [`PersistenceError::VersionMismatch`] if it
/// was written by an incompatible format version, and
/// [`PersistenceError::Corrupt`] or [`PersistenceError::Io`] if the file is
/// truncated or otherwise unreadable.
pub fn load(path: &Path) -> Result<Store, PersistenceError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; 4];
    reader.read_exact(&mut header)?;
    if u32::from_le_bytes(header) != MAGIC {
        return Err(PersistenceError::BadMagic);
    }

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let version = u32::from_le_bytes(version_bytes);
    if version != FORMAT_VERSION {
        return Err(PersistenceError::VersionMismatch { found: version, expected: FORMAT_VERSION });
    }

    let mut count_bytes = [0u8; 8];
    reader.read_exact(&mut count_bytes)?;
    let count = u64::from_le_bytes(count_bytes);

    let mut store = Store::with_capacity(count as usize);
    for _ in 0..count {
        let record: Record = bincode::deserialize_from(&mut reader)?;
        let (position, entry) = record.decode()?;
        store.insert(position, entry);
    }
    Ok(store)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chess::core::square;

    fn sample_store() -> Store {
        let mut store = Store::new();
        let mate0 = Position::new(square(0, 0), square(4, 4), square(2, 0), Color::Black).unwrap();
        store.insert(mate0, Entry::mate_in_zero());
        let drawn = Position::new(square(0, 0), square(4, 4), square(4, 6), Color::White).unwrap();
        store.insert(drawn, Entry::draw());
        let mate3 = Position::new(square(4, 0), square(0, 0), square(4, 7), Color::White).unwrap();
        let best_move: Move = "a1a7".parse().unwrap();
        store.insert(mate3, Entry::mate(3, best_move));
        store
    }

    #[test]
    fn round_trip_is_bit_equivalent() {
        let dir = std::env::temp_dir().join(format!("krk-persistence-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("round_trip.krk");

        let original = sample_store();
        save(&original, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.len(), original.len());
        for (position, entry) in original.iter() {
            assert_eq!(loaded.get(position), Some(entry));
        }
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_bad_magic() {
        let dir = std::env::temp_dir().join(format!("krk-persistence-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad_magic.krk");
        std::fs::write(&path, [0u8; 16]).unwrap();
        assert!(matches!(load(&path), Err(PersistenceError::BadMagic)));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn rejects_future_version() {
        let dir = std::env::temp_dir().join(format!("krk-persistence-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("future_version.krk");
        let mut bytes = MAGIC.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(FORMAT_VERSION + 1).to_le_bytes());
        bytes.extend_from_slice(&0u64.to_le_bytes());
        std::fs::write(&path, bytes).unwrap();
        assert!(matches!(
            load(&path),
            Err(PersistenceError::VersionMismatch { found, expected }) if found == FORMAT_VERSION + 1 && expected == FORMAT_VERSION
        ));
        let _ = std::fs::remove_file(&path);
    }
}
