use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::model::Event;

/// Bytes around each payload: the length prefix and the trailing checksum.
const FRAME_OVERHEAD: u64 = 8;

fn write_frame(out: &mut impl Write, event: &Event) -> io::Result<()> {
    let payload =
        bincode::serialize(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(&(payload.len() as u32).to_le_bytes())?;
    out.write_all(&payload)?;
    out.write_all(&crc32fast::hash(&payload).to_le_bytes())
}

/// Fill `buf`, or report `false` if the file ends first.
fn read_full(input: &mut impl Read, buf: &mut [u8]) -> io::Result<bool> {
    match input.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Next intact event, or `None` at end of file or at the first damaged frame.
fn read_frame(input: &mut impl Read) -> io::Result<Option<(Event, u64)>> {
    let mut word = [0u8; 4];
    if !read_full(input, &mut word)? {
        return Ok(None);
    }
    let mut payload = vec![0u8; u32::from_le_bytes(word) as usize];
    if !read_full(input, &mut payload)? || !read_full(input, &mut word)? {
        return Ok(None);
    }
    if u32::from_le_bytes(word) != crc32fast::hash(&payload) {
        return Ok(None);
    }
    Ok(bincode::deserialize::<Event>(&payload)
        .ok()
        .map(|event| (event, payload.len() as u64 + FRAME_OVERHEAD)))
}

/// Events recovered from disk plus the byte length of the intact prefix.
#[derive(Debug, Default)]
pub struct Replay {
    pub events: Vec<Event>,
    pub valid_len: u64,
}

/// Append-only event log, one frame per event:
/// `[u32 le: payload len][bincode Event][u32 le: crc32 of payload]`.
///
/// Only obtainable through `recover`, so appends always follow an intact prefix.
pub struct Wal {
    writer: BufWriter<File>,
    path: PathBuf,
    appends: u64,
}

impl Wal {
    /// Read back every intact event, cut off anything after them, and open
    /// the file for appending.
    pub fn recover(path: &Path) -> io::Result<(Vec<Event>, Self)> {
        let replay = Self::replay(path)?;
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?;
        let on_disk = file.metadata()?.len();
        if on_disk > replay.valid_len {
            tracing::warn!(
                "WAL {}: dropping {} damaged trailing bytes",
                path.display(),
                on_disk - replay.valid_len
            );
            file.set_len(replay.valid_len)?;
        }
        drop(file);

        let file = OpenOptions::new().append(true).open(path)?;
        let wal = Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            appends: 0,
        };
        Ok((replay.events, wal))
    }

    /// Durable single append.
    #[cfg(test)]
    pub fn append(&mut self, event: &Event) -> io::Result<()> {
        self.append_buffered(event)?;
        self.flush_sync()
    }

    /// Buffer a frame; nothing reaches disk until `flush_sync`.
    pub fn append_buffered(&mut self, event: &Event) -> io::Result<()> {
        write_frame(&mut self.writer, event)?;
        self.appends += 1;
        Ok(())
    }

    pub fn flush_sync(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Frames appended through this handle.
    pub fn appends(&self) -> u64 {
        self.appends
    }

    /// Decode the log from the start. A missing file is an empty log.
    pub fn replay(path: &Path) -> io::Result<Replay> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Replay::default()),
            Err(e) => return Err(e),
        };
        let mut input = BufReader::new(file);
        let mut replay = Replay::default();
        while let Some((event, frame_len)) = read_frame(&mut input)? {
            replay.events.push(event);
            replay.valid_len += frame_len;
        }
        Ok(replay)
    }
}
