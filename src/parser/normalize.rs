//! Terminal escape stripping and destructive input correction.
//!
//! Raw `script(1)` transcripts carry everything the terminal saw: color
//! codes, title-setting sequences, backspaces, carriage-return rewrites.
//! This module reduces that to the text a human actually ended up looking
//! at. It is deliberately not a terminal emulator: sequences it does not
//! recognize pass through untouched.

/// Escape character introducing OSC/CSI sequences.
const ESC: char = '\x1b';
/// Bell character, terminates OSC sequences.
const BEL: char = '\x07';
/// Backspace, deletes the previously accumulated character.
const BS: char = '\x08';

/// What became of an escape sequence the scanner tried to consume.
enum EscapeOutcome {
    /// A well-formed sequence; all of its characters are dropped.
    Consumed,
    /// The sequence never completed. `literal` holds everything consumed so
    /// far (introducer included) to be re-emitted verbatim; `reprocess` is
    /// the character that broke the sequence, fed back through the main
    /// loop so it can still start a fresh sequence or act as a control.
    Malformed {
        literal: String,
        reprocess: Option<char>,
    },
}

/// Strip terminal escape sequences and apply destructive corrections.
///
/// **Algorithm** (single pass, pure function):
/// 1. `ESC ]` opens an OSC sequence, dropped through its BEL or `ESC \`
///    terminator. OSC payloads never span lines; a newline or end of input
///    before the terminator means malformed.
/// 2. `ESC [` opens a CSI sequence: parameter bytes (`0`-`?`), then
///    intermediate bytes (space-`/`), then one final byte (`@`-`~`), all
///    dropped. `ESC` plus a single byte in `@`-`Z` or `\`-`_` is likewise
///    dropped.
/// 3. A backspace deletes the previously accumulated character (no-op on
///    an empty buffer).
/// 4. `\r\n` collapses to `\n`; a lone `\r` discards the current
///    unterminated line, so rewritten progress lines keep only their final
///    state.
///
/// Malformed sequences are left intact rather than guessed at: leaking an
/// escape artifact into the output beats corrupting real content.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    let mut pushback: Option<char> = None;

    loop {
        let ch = match pushback.take().or_else(|| chars.next()) {
            Some(ch) => ch,
            None => break,
        };

        match ch {
            ESC => match consume_escape(&mut chars) {
                EscapeOutcome::Consumed => {}
                EscapeOutcome::Malformed { literal, reprocess } => {
                    out.push_str(&literal);
                    pushback = reprocess;
                }
            },
            BS => {
                out.pop();
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                    out.push('\n');
                } else {
                    let line_start = out.rfind('\n').map(|i| i + 1).unwrap_or(0);
                    out.truncate(line_start);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Consume the remainder of an escape sequence after its `ESC` introducer.
fn consume_escape(chars: &mut std::iter::Peekable<std::str::Chars>) -> EscapeOutcome {
    match chars.next() {
        Some('[') => consume_csi(chars),
        Some(']') => consume_osc(chars),
        Some(ch) if matches!(ch, '@'..='Z' | '\\'..='_') => EscapeOutcome::Consumed,
        Some(ch) => EscapeOutcome::Malformed {
            literal: ESC.to_string(),
            reprocess: Some(ch),
        },
        None => EscapeOutcome::Malformed {
            literal: ESC.to_string(),
            reprocess: None,
        },
    }
}

/// Consume a CSI sequence body: parameters, intermediates, one final byte.
fn consume_csi(chars: &mut std::iter::Peekable<std::str::Chars>) -> EscapeOutcome {
    let mut buf = String::from("\x1b[");

    while let Some(&ch) = chars.peek() {
        if matches!(ch, '0'..='?') {
            buf.push(ch);
            chars.next();
        } else {
            break;
        }
    }
    while let Some(&ch) = chars.peek() {
        if matches!(ch, ' '..='/') {
            buf.push(ch);
            chars.next();
        } else {
            break;
        }
    }

    match chars.next() {
        Some(ch) if matches!(ch, '@'..='~') => EscapeOutcome::Consumed,
        Some(ch) => EscapeOutcome::Malformed {
            literal: buf,
            reprocess: Some(ch),
        },
        None => EscapeOutcome::Malformed {
            literal: buf,
            reprocess: None,
        },
    }
}

/// Consume an OSC sequence body up to its BEL or `ESC \` terminator.
fn consume_osc(chars: &mut std::iter::Peekable<std::str::Chars>) -> EscapeOutcome {
    let mut buf = String::from("\x1b]");

    loop {
        match chars.next() {
            Some(BEL) => return EscapeOutcome::Consumed,
            Some(ESC) => {
                if chars.peek() == Some(&'\\') {
                    chars.next();
                    return EscapeOutcome::Consumed;
                }
                // An ESC that is not part of the terminator is payload.
                buf.push(ESC);
            }
            Some('\n') => {
                return EscapeOutcome::Malformed {
                    literal: buf,
                    reprocess: Some('\n'),
                }
            }
            Some(ch) => buf.push(ch),
            None => {
                return EscapeOutcome::Malformed {
                    literal: buf,
                    reprocess: None,
                }
            }
        }
    }
}
