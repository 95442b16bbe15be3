//! Shared line cursor over an input stream: many workers pull, each line goes to exactly one.

use log::warn;
use std::io::BufRead;
use std::sync::{Mutex, PoisonError};

struct Cursor<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
    lines_read: usize,
    read_error: Option<String>,
}

/// Lazy, single-pass sequence of lines. Every [`next_line`](Self::next_line) holds the
/// cursor lock for one read, so concurrent pullers never see the same line twice.
pub struct LineSource<R> {
    cursor: Mutex<Cursor<R>>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            cursor: Mutex::new(Cursor {
                reader,
                buf: Vec::new(),
                done: false,
                lines_read: 0,
                read_error: None,
            }),
        }
    }

    /// Next line without its terminator (`\n` or `\r\n`), or `None` once the stream ends.
    /// A read error ends the sequence; see [`read_error`](Self::read_error).
    pub fn next_line(&self) -> Option<String> {
        let mut cur = self.cursor.lock().unwrap_or_else(PoisonError::into_inner);
        if cur.done {
            return None;
        }
        let Cursor { reader, buf, .. } = &mut *cur;
        buf.clear();
        match reader.read_until(b'\n', buf) {
            Ok(0) => {
                cur.done = true;
                None
            }
            Ok(_) => {
                let mut bytes = cur.buf.as_slice();
                if let Some(rest) = bytes.strip_suffix(b"\n") {
                    bytes = rest;
                }
                if let Some(rest) = bytes.strip_suffix(b"\r") {
                    bytes = rest;
                }
                let line = String::from_utf8_lossy(bytes).into_owned();
                cur.lines_read += 1;
                Some(line)
            }
            Err(e) => {
                warn!("Stopped reading input after {} lines: {}", cur.lines_read, e);
                cur.done = true;
                cur.read_error = Some(e.to_string());
                None
            }
        }
    }

    /// Lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lines_read
    }

    /// The error that ended the sequence early, if any.
    pub fn read_error(&self) -> Option<String> {
        self.cursor
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read_error
            .clone()
    }
}

impl<R: BufRead> Iterator for &LineSource<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_line()
    }
}
