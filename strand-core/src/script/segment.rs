//! Section segmentation.
//!
//! Splits a script document into sections keyed by progress id. A heading
//! is a line starting with `# `; the remainder of that line is the id and
//! the body runs up to the next heading.

use std::collections::HashMap;

use crate::error::ScriptError;

/// Split `document` into progress-id keyed section bodies.
///
/// Text before the first heading is ignored. Fails with
/// [`ScriptError::MalformedScript`] if no heading exists at all, and with
/// [`ScriptError::DuplicateProgressId`] when two headings share an id,
/// since a progress jump must resolve to exactly one section.
pub fn segment(document: &str) -> Result<HashMap<String, String>, ScriptError> {
    let mut sections: HashMap<String, String> = HashMap::new();
    let mut current: Option<(String, String)> = None;

    for raw in document.lines() {
        // Scripts written in external editors may carry CRLF line endings.
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some(heading) = line.strip_prefix("# ") {
            if let Some((id, body)) = current.take() {
                sections.insert(id, body);
            }
            let id = heading.trim().to_string();
            if sections.contains_key(&id) {
                return Err(ScriptError::DuplicateProgressId(id));
            }
            current = Some((id, String::new()));
        } else if let Some((_, body)) = current.as_mut() {
            body.push_str(line);
            body.push('\n');
        }
    }

    if let Some((id, body)) = current.take() {
        sections.insert(id, body);
    }

    if sections.is_empty() {
        return Err(ScriptError::MalformedScript);
    }
    Ok(sections)
}

/// Locate the body of the section whose id equals `progress`.
///
/// Missing sections are fatal: they indicate a script/code mismatch, so
/// the error is surfaced rather than retried.
pub fn active_section(document: &str, progress: &str) -> Result<String, ScriptError> {
    let mut sections = segment(document)?;
    sections
        .remove(progress)
        .ok_or_else(|| ScriptError::UnknownProgressState(progress.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_every_heading() {
        let doc = "# beginning\nHello.\n# forest\nTrees.\n\n# end\n";
        let sections = segment(doc).unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections["beginning"], "Hello.\n");
        assert_eq!(sections["forest"], "Trees.\n\n");
        assert_eq!(sections["end"], "");
    }

    #[test]
    fn active_section_round_trips() {
        let doc = "# beginning\nHello.\n# forest\nTrees.\n";
        assert_eq!(active_section(doc, "beginning").unwrap(), "Hello.\n");
        assert_eq!(active_section(doc, "forest").unwrap(), "Trees.\n");
    }

    #[test]
    fn handles_crlf_documents() {
        let doc = "# beginning\r\nHello.\r\nWorld.\r\n";
        assert_eq!(active_section(doc, "beginning").unwrap(), "Hello.\nWorld.\n");
    }

    #[test]
    fn ignores_preamble_before_first_heading() {
        let doc = "Author notes.\n\n# beginning\nHello.\n";
        let sections = segment(doc).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections["beginning"], "Hello.\n");
    }

    #[test]
    fn no_heading_is_malformed() {
        assert!(matches!(
            segment("just some text\n"),
            Err(ScriptError::MalformedScript)
        ));
    }

    #[test]
    fn duplicate_heading_is_rejected() {
        let doc = "# beginning\nA.\n# beginning\nB.\n";
        assert!(matches!(
            segment(doc),
            Err(ScriptError::DuplicateProgressId(id)) if id == "beginning"
        ));
    }

    #[test]
    fn unknown_progress_id_is_fatal() {
        let doc = "# beginning\nHello.\n";
        assert!(matches!(
            active_section(doc, "cellar"),
            Err(ScriptError::UnknownProgressState(id)) if id == "cellar"
        ));
    }
}
