//! Prompt-detecting line segmenter.
//!
//! Walks normalized transcript text line by line and groups it into
//! alternating command/output emissions. The state machine is deliberately
//! tiny: either no command is open yet, or one is open and non-prompt
//! lines accumulate as its pending output.
//!
//! Prompt detection is a heuristic, not a protocol. It trades recall for
//! precision: a terminator character (`$`, `#`, `%`) only counts when
//! followed by whitespace, so a stripped `100%` progress line stays
//! output, while the trailing space a shell prints after its bare prompt
//! is exactly the evidence needed to close the final command. The cost is
//! known and accepted: an unrecognized custom prompt is swallowed into
//! the previous command's output, and output that happens to contain
//! `token$ text` splits spuriously. No further shell-specific formats are
//! guessed.

/// Characters that can end a shell prompt.
const PROMPT_TERMINATORS: [char; 3] = ['$', '#', '%'];

/// Segmenter state between lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SegmentState {
    /// Nothing recognized yet; non-prompt lines are pre-session noise.
    #[default]
    AwaitingCommand,
    /// A prompt opened a command; non-prompt lines buffer as its output.
    InCommand {
        command: String,
        output: Vec<String>,
    },
}

/// One segmentation result, not yet timestamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Command(String),
    Output(String),
}

impl SegmentState {
    /// Advance the machine by one line.
    ///
    /// Pure transition function: the only inputs are the current state and
    /// the line, the only outputs are the next state and the emissions the
    /// line triggered (at most a command/output pair on a prompt match).
    pub fn step(self, line: &str) -> (SegmentState, Vec<Emission>) {
        if line.trim().is_empty() {
            return (self, Vec::new());
        }

        match detect_prompt(line) {
            Some(rest) => {
                let emitted = self.flush();
                let text = rest.trim();
                let command = if text.is_empty() {
                    // Bare Enter at the prompt: keep it visible as a space.
                    " ".to_string()
                } else {
                    text.to_string()
                };
                (
                    SegmentState::InCommand {
                        command,
                        output: Vec::new(),
                    },
                    emitted,
                )
            }
            None => match self {
                SegmentState::AwaitingCommand => (SegmentState::AwaitingCommand, Vec::new()),
                SegmentState::InCommand { command, mut output } => {
                    output.push(line.trim().to_string());
                    (SegmentState::InCommand { command, output }, Vec::new())
                }
            },
        }
    }

    /// Close the machine at end of input, flushing any open command.
    pub fn finish(self) -> Vec<Emission> {
        self.flush()
    }

    fn flush(self) -> Vec<Emission> {
        match self {
            SegmentState::AwaitingCommand => Vec::new(),
            SegmentState::InCommand { command, output } => {
                let mut emitted = vec![Emission::Command(command)];
                if !output.is_empty() {
                    emitted.push(Emission::Output(output.join("\n").trim().to_string()));
                }
                emitted
            }
        }
    }
}

/// Segment normalized text into an ordered emission sequence.
pub fn segment(text: &str) -> Vec<Emission> {
    let mut state = SegmentState::default();
    let mut emissions = Vec::new();

    for line in text.lines() {
        let (next, emitted) = state.step(line);
        state = next;
        emissions.extend(emitted);
    }
    emissions.extend(state.finish());

    emissions
}

/// Test a line for a shell prompt; returns the command remainder.
///
/// Runs on the line with leading whitespace removed but trailing
/// whitespace intact. Primary pattern: a run of path/host-like token
/// characters, optional whitespace, a terminator, then at least one
/// whitespace character (the first such terminator wins). Secondary
/// pattern: the line starts with a terminator plus whitespace, for
/// minimal `$ ` style prompts. The returned remainder still carries its
/// surrounding whitespace; callers trim.
pub fn detect_prompt(line: &str) -> Option<&str> {
    let line = line.trim_start();
    primary_prompt(line).or_else(|| simple_prompt(line))
}

/// Path/host-like characters that may appear in a prompt before the
/// terminator (`user@host:~/dir`).
fn is_token_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '.' | '~' | '/' | '@' | ':' | '-')
}

fn primary_prompt(line: &str) -> Option<&str> {
    let mut prev_nonspace_is_token = false;
    let mut iter = line.char_indices().peekable();

    while let Some((idx, ch)) = iter.next() {
        if PROMPT_TERMINATORS.contains(&ch) && prev_nonspace_is_token {
            if let Some(&(_, next)) = iter.peek() {
                if next.is_whitespace() {
                    return Some(&line[idx + ch.len_utf8()..]);
                }
            }
        }
        if !ch.is_whitespace() {
            prev_nonspace_is_token = is_token_char(ch);
        }
    }

    None
}

fn simple_prompt(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    let second = chars.next()?;

    if PROMPT_TERMINATORS.contains(&first) && second.is_whitespace() {
        Some(&line[first.len_utf8()..])
    } else {
        None
    }
}
