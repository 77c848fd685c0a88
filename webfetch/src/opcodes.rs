//! Structural walk over a pickle opcode stream.
//!
//! The value decoder cannot evaluate every stream: a container rebuilt from
//! an unresolved class (`collections.defaultdict`, `OrderedDict`, pandas
//! frames) is an object it has no model for, and the items pushed into it
//! afterwards fail to apply. Such a stream is still well formed. Walking
//! the opcodes to `STOP` tells a valid but unmodeled pickle apart from a
//! truncated or non-pickle body.

/// How many argument bytes follow an opcode.
#[derive(Debug, Clone, Copy)]
enum Arg {
    Bare,
    /// Newline-terminated text.
    Line,
    /// Two newline-terminated lines (module and name).
    TwoLines,
    Fixed(usize),
    /// Little-endian length of `n` bytes, then that many bytes.
    Counted(usize),
}

const STOP: u8 = b'.';

fn arg_of(opcode: u8) -> Option<Arg> {
    let arg = match opcode {
        // Protocol 0 and 1
        b'(' | b'.' | b'0' | b'1' | b'2' | b'N' | b'Q' | b'R' | b'a' | b'b' | b'd' | b'e'
        | b'}' | b']' | b'l' | b'o' | b's' | b't' | b')' | b'u' => Arg::Bare,
        b'F' | b'I' | b'L' | b'P' | b'S' | b'V' | b'g' | b'p' => Arg::Line,
        b'c' | b'i' => Arg::TwoLines,
        b'K' | b'h' | b'q' => Arg::Fixed(1),
        b'M' => Arg::Fixed(2),
        b'J' | b'j' | b'r' => Arg::Fixed(4),
        b'G' => Arg::Fixed(8),
        b'U' | b'C' => Arg::Counted(1),
        b'T' | b'X' | b'B' => Arg::Counted(4),
        // Protocol 2
        0x80 | 0x82 => Arg::Fixed(1),
        0x83 => Arg::Fixed(2),
        0x84 => Arg::Fixed(4),
        0x81 | 0x85..=0x89 => Arg::Bare,
        0x8a => Arg::Counted(1),
        0x8b => Arg::Counted(4),
        // Protocol 4
        0x8c => Arg::Counted(1),
        0x8d | 0x8e => Arg::Counted(8),
        0x8f..=0x94 => Arg::Bare,
        // FRAME: the size is skipped, the framed opcodes are walked in place.
        0x95 => Arg::Fixed(8),
        // Protocol 5
        0x96 => Arg::Counted(8),
        0x97 | 0x98 => Arg::Bare,
        _ => return None,
    };
    Some(arg)
}

/// Walk opcodes from the start of `body` to the first `STOP`.
///
/// Returns the number of opcodes seen, `STOP` included, or a description of
/// the first structural problem.
pub(crate) fn walk_to_stop(body: &[u8]) -> Result<usize, String> {
    let mut pos = 0;
    let mut count = 0;

    while let Some(&opcode) = body.get(pos) {
        let at = pos;
        pos += 1;
        count += 1;

        if opcode == STOP {
            return Ok(count);
        }

        let arg = arg_of(opcode)
            .ok_or_else(|| format!("unknown opcode 0x{opcode:02x} at offset {at}"))?;
        pos = match arg {
            Arg::Bare => pos,
            Arg::Line => skip_line(body, pos, at)?,
            Arg::TwoLines => skip_line(body, skip_line(body, pos, at)?, at)?,
            Arg::Fixed(n) => take(body, pos, n, at)?,
            Arg::Counted(n) => {
                let end = take(body, pos, n, at)?;
                let len = read_len(&body[pos..end]);
                let len = usize::try_from(len)
                    .map_err(|_| format!("length out of range at offset {at}"))?;
                take(body, end, len, at)?
            }
        };
    }

    Err(format!("no STOP opcode after {count} opcodes"))
}

fn take(body: &[u8], pos: usize, n: usize, at: usize) -> Result<usize, String> {
    pos.checked_add(n)
        .filter(|end| *end <= body.len())
        .ok_or_else(|| format!("truncated argument at offset {at}"))
}

fn skip_line(body: &[u8], pos: usize, at: usize) -> Result<usize, String> {
    body.get(pos..)
        .and_then(|rest| rest.iter().position(|b| *b == b'\n'))
        .map(|newline| pos + newline + 1)
        .ok_or_else(|| format!("unterminated line argument at offset {at}"))
}

fn read_len(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0_u64, |acc, b| (acc << 8) | u64::from(*b))
}
