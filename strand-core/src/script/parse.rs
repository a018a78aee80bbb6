//! Directive parsing for one active section.
//!
//! The parser is a line classifier feeding a block accumulator: ambience
//! commands collect into a pending list until the next narrator text
//! absorbs them, and the first player-command marker ends response-queue
//! population for the section. A section is always "intro lines, then
//! player-keyword menu", never interleaved.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

/// A side-effect directive embedded in the script, decoupled from
/// narrator text, e.g. `` `[Audio: waves.ogg]` ``.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbienceCommand {
    /// Recognized prefix before the colon, e.g. `Audio`.
    pub kind: String,
    /// Resource named after the prefix, e.g. a file to play.
    pub argument: String,
}

/// The payload of one narrator response: a line to display or a jump to
/// another script section. A jump never shares a slot with text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseLine {
    Text(String),
    Jump(String),
}

/// One deliverable unit: ambience cues fire, then the line is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarratorResponse {
    pub line: ResponseLine,
    pub ambience: Vec<AmbienceCommand>,
}

impl NarratorResponse {
    pub fn text(line: impl Into<String>, ambience: Vec<AmbienceCommand>) -> Self {
        Self {
            line: ResponseLine::Text(line.into()),
            ambience,
        }
    }

    pub fn jump(target: impl Into<String>) -> Self {
        Self {
            line: ResponseLine::Jump(target.into()),
            ambience: Vec::new(),
        }
    }
}

/// Output of [`parse_section`]: the ordered default queue and the
/// keyword response table, rebuilt together on every progress change.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedSection {
    pub queue: VecDeque<NarratorResponse>,
    pub table: HashMap<String, Vec<NarratorResponse>>,
}

/// Shape of a single script line.
#[derive(Debug, PartialEq, Eq)]
enum LineShape<'a> {
    Ambience { kind: &'a str, argument: &'a str },
    Command { keyword: &'a str, jump: Option<&'a str> },
    Text(&'a str),
}

/// Classify one non-blank line.
///
/// Command markers are a single backtick-delimited line; anything that
/// does not match a marker shape is narrator text verbatim (inline markup
/// is the renderer's concern, not ours).
fn classify_line(line: &str) -> LineShape<'_> {
    let marker = line
        .trim_end()
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'));
    let Some(marker) = marker else {
        return LineShape::Text(line);
    };

    if let Some(body) = marker.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        let (kind, argument) = match body.split_once(':') {
            Some((kind, argument)) => (kind.trim(), argument.trim()),
            None => (body.trim(), ""),
        };
        return LineShape::Ambience { kind, argument };
    }

    if let Some(body) = marker.strip_prefix('(') {
        if let Some(close) = body.rfind(')') {
            let keyword = &body[..close];
            let rest = body[close + 1..].trim();
            if rest.is_empty() {
                return LineShape::Command {
                    keyword,
                    jump: None,
                };
            }
            if let Some(target) = rest.strip_prefix('>') {
                let target = target.trim();
                if !target.is_empty() {
                    return LineShape::Command {
                        keyword,
                        jump: Some(target),
                    };
                }
            }
        }
    }

    LineShape::Text(line)
}

/// Accumulates classified lines into a [`ParsedSection`].
#[derive(Default)]
struct SectionParser {
    queue: VecDeque<NarratorResponse>,
    table: HashMap<String, Vec<NarratorResponse>>,
    pending_ambience: Vec<AmbienceCommand>,
    narration: Vec<String>,
    current_keyword: Option<String>,
    // A jump directive is the sole response for its keyword; further
    // lines are ignored until the next command marker.
    keyword_jumped: bool,
}

impl SectionParser {
    fn line(&mut self, line: &str) {
        match classify_line(line) {
            LineShape::Text(text) => self.narration.push(text.to_string()),
            LineShape::Ambience { kind, argument } => {
                self.flush_narration();
                self.pending_ambience.push(AmbienceCommand {
                    kind: kind.to_string(),
                    argument: argument.to_string(),
                });
            }
            LineShape::Command { keyword, jump } => {
                self.flush_narration();
                // Lower-cased on build; lookups lower-case the input.
                let keyword = keyword.to_lowercase();
                match jump {
                    Some(target) => {
                        self.table
                            .insert(keyword.clone(), vec![NarratorResponse::jump(target)]);
                        self.keyword_jumped = true;
                    }
                    None => {
                        // A repeated keyword replaces the earlier list entirely.
                        self.table.insert(keyword.clone(), Vec::new());
                        self.keyword_jumped = false;
                    }
                }
                self.current_keyword = Some(keyword);
            }
        }
    }

    /// Emit the accumulated narration run as one response, absorbing any
    /// pending ambience commands.
    fn flush_narration(&mut self) {
        if self.narration.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.narration).join("\n");
        let ambience = std::mem::take(&mut self.pending_ambience);
        let response = NarratorResponse::text(text, ambience);

        match &self.current_keyword {
            None => self.queue.push_back(response),
            Some(keyword) if !self.keyword_jumped => {
                // Entry exists since the command marker inserted it.
                if let Some(responses) = self.table.get_mut(keyword) {
                    responses.push(response);
                }
            }
            Some(keyword) => {
                debug!(%keyword, "narration after a jump directive is ignored");
            }
        }
    }

    fn finish(mut self) -> ParsedSection {
        self.flush_narration();
        if !self.pending_ambience.is_empty() {
            // No narrator line absorbed them before the section ended.
            debug!(
                dropped = self.pending_ambience.len(),
                "ambience commands without a following narrator line are dropped"
            );
        }
        ParsedSection {
            queue: self.queue,
            table: self.table,
        }
    }
}

/// Parse one section body into its response queue and keyword table.
///
/// Never fails: unrecognized content is narrator text by definition.
pub fn parse_section(body: &str) -> ParsedSection {
    let mut parser = SectionParser::default();
    for raw in body.lines() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            parser.flush_narration();
        } else {
            parser.line(line);
        }
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_line_shapes() {
        assert_eq!(
            classify_line("`[Audio: waves.ogg]`"),
            LineShape::Ambience {
                kind: "Audio",
                argument: "waves.ogg"
            }
        );
        assert_eq!(
            classify_line("`(inspect compass)`"),
            LineShape::Command {
                keyword: "inspect compass",
                jump: None
            }
        );
        assert_eq!(
            classify_line("`(go north) > forest`"),
            LineShape::Command {
                keyword: "go north",
                jump: Some("forest")
            }
        );
        assert_eq!(
            classify_line("The tide hisses."),
            LineShape::Text("The tide hisses.")
        );
    }

    #[test]
    fn plain_lines_fill_the_queue() {
        let parsed = parse_section("Hello.\n\nWorld.\n");
        assert_eq!(parsed.queue.len(), 2);
        assert!(parsed.table.is_empty());
        assert_eq!(
            parsed.queue[0],
            NarratorResponse::text("Hello.", Vec::new())
        );
        assert_eq!(
            parsed.queue[1],
            NarratorResponse::text("World.", Vec::new())
        );
    }

    #[test]
    fn multi_line_block_is_one_response() {
        let parsed = parse_section("First line\nsecond line.\n\nNext.\n");
        assert_eq!(parsed.queue.len(), 2);
        assert_eq!(
            parsed.queue[0].line,
            ResponseLine::Text("First line\nsecond line.".to_string())
        );
    }

    #[test]
    fn ambience_attaches_to_following_text() {
        let parsed = parse_section("`[Audio: waves.ogg]`\nThe waves crash.\n");
        assert_eq!(parsed.queue.len(), 1);
        assert_eq!(
            parsed.queue[0].ambience,
            vec![AmbienceCommand {
                kind: "Audio".to_string(),
                argument: "waves.ogg".to_string()
            }]
        );
        assert_eq!(
            parsed.queue[0].line,
            ResponseLine::Text("The waves crash.".to_string())
        );
    }

    #[test]
    fn trailing_ambience_is_dropped() {
        let parsed = parse_section("Hello.\n\n`[Audio: waves.ogg]`\n");
        assert_eq!(parsed.queue.len(), 1);
        assert!(parsed.queue[0].ambience.is_empty());
    }

    #[test]
    fn first_keyword_ends_queue_population() {
        let body = "Intro line.\n\n`(look)`\nYou see sand.\n\nMore sand.\n";
        let parsed = parse_section(body);
        assert_eq!(parsed.queue.len(), 1);
        assert_eq!(
            parsed.queue[0].line,
            ResponseLine::Text("Intro line.".to_string())
        );
        // Everything after the marker belongs to the keyword.
        assert_eq!(parsed.table["look"].len(), 2);
        assert_eq!(
            parsed.table["look"][0].line,
            ResponseLine::Text("You see sand.".to_string())
        );
    }

    #[test]
    fn no_directive_lands_in_both_structures() {
        let body = "Intro.\n\n`(look)`\nYou see sand.\n";
        let parsed = parse_section(body);
        let queued: Vec<_> = parsed.queue.iter().collect();
        for responses in parsed.table.values() {
            for response in responses {
                assert!(!queued.contains(&response));
            }
        }
    }

    #[test]
    fn jump_directive_is_sole_response() {
        let body = "`(rest) > rested`\nThis line is dead content.\n";
        let parsed = parse_section(body);
        assert_eq!(
            parsed.table["rest"],
            vec![NarratorResponse::jump("rested")]
        );
    }

    #[test]
    fn keywords_are_lowercased() {
        let parsed = parse_section("`(Look)`\nSand.\n");
        assert!(parsed.table.contains_key("look"));
    }

    #[test]
    fn later_keyword_block_replaces_earlier() {
        let body = "`(look)`\nOld text.\n\n`(look)`\nNew text.\n";
        let parsed = parse_section(body);
        assert_eq!(parsed.table["look"].len(), 1);
        assert_eq!(
            parsed.table["look"][0].line,
            ResponseLine::Text("New text.".to_string())
        );
    }
}
