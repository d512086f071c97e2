//! Section-level editing of the markdown service catalog.
//!
//! The catalog is a flat markdown document where each service owns one
//! level-3 section. A section spans from its `### {name}` heading line to
//! the next `### ` heading, else to a horizontal-rule line (`---`), else to
//! end-of-document. Boundary search and mutation are separate functions so
//! that replacement always happens at the computed offsets, never by
//! re-finding section text.

const DEFAULT_DESCRIPTION: &str = "Service description not provided";
const DEFAULT_WHY_SELECTED: &str = "Selection reason not provided";
const DEFAULT_MAINTAINER: &str = "Maintainer not specified";
const DEFAULT_URL: &str = "#";

/// Metadata rendered into a catalog section. Unset fields render the
/// documented placeholder text.
#[derive(Debug, Clone, Default)]
pub struct ServiceRecord {
    pub url: Option<String>,
    pub description: Option<String>,
    pub why_selected: Option<String>,
    pub maintainer: Option<String>,
}

/// Render the fixed-shape section block for a service, newline-terminated.
pub fn render_section(name: &str, record: &ServiceRecord) -> String {
    format!(
        "### {name}\n- Use Case: {}\n- Why Selected: {}\n- Maintainer: {}\n- Links: [Service URL]({})\n",
        record.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION),
        record.why_selected.as_deref().unwrap_or(DEFAULT_WHY_SELECTED),
        record.maintainer.as_deref().unwrap_or(DEFAULT_MAINTAINER),
        record.url.as_deref().unwrap_or(DEFAULT_URL),
    )
}

/// Locate the byte range `[start, end)` of the section for `name`.
///
/// The heading must match as a whole line (trailing whitespace tolerated);
/// a substring match would confuse `### Foo` with `### Foobar`.
pub fn find_section_bounds(doc: &str, name: &str) -> Option<(usize, usize)> {
    let heading = format!("### {name}");
    let mut offset = 0;
    let mut start: Option<usize> = None;

    for line in doc.split_inclusive('\n') {
        let trimmed = line.trim_end();
        match start {
            None => {
                if trimmed == heading {
                    start = Some(offset);
                }
            }
            Some(begin) => {
                if line.starts_with("### ") || trimmed == "---" {
                    return Some((begin, offset));
                }
            }
        }
        offset += line.len();
    }

    start.map(|begin| (begin, doc.len()))
}

/// Replace the byte range `[start, end)` of `doc` with `replacement`.
pub fn splice(doc: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(doc.len() - (end - start) + replacement.len());
    out.push_str(&doc[..start]);
    out.push_str(replacement);
    out.push_str(&doc[end..]);
    out
}

/// Insert a new section for `name`, or `None` if the heading already exists.
///
/// The block lands immediately before a trailing `---` marker line when the
/// document has one, keeping the marker as the final line; otherwise it is
/// appended at end-of-document.
pub fn add_section(doc: &str, name: &str, record: &ServiceRecord) -> Option<String> {
    if find_section_bounds(doc, name).is_some() {
        return None;
    }

    let block = format!("{}\n", render_section(name, record));

    if let Some(marker_at) = trailing_marker_offset(doc) {
        return Some(splice(doc, marker_at, marker_at, &block));
    }

    let mut out = doc.to_string();
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&block);
    Some(out)
}

/// Overwrite the full section for `name` with a freshly rendered block, or
/// `None` if no such heading exists. This is a whole-section replace: lines
/// added by hand inside the old section are discarded.
pub fn update_section(doc: &str, name: &str, record: &ServiceRecord) -> Option<String> {
    let (start, end) = find_section_bounds(doc, name)?;
    let block = format!("{}\n", render_section(name, record));
    Some(splice(doc, start, end, &block))
}

/// Delete the section for `name`, or `None` if no such heading exists.
pub fn remove_section(doc: &str, name: &str) -> Option<String> {
    let (start, end) = find_section_bounds(doc, name)?;
    Some(splice(doc, start, end, ""))
}

fn trailing_marker_offset(doc: &str) -> Option<usize> {
    doc.ends_with("---\n").then(|| doc.len() - "---\n".len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, description: &str) -> ServiceRecord {
        ServiceRecord {
            url: Some(url.to_string()),
            description: Some(description.to_string()),
            ..ServiceRecord::default()
        }
    }

    fn section_count(doc: &str) -> usize {
        doc.lines().filter(|l| l.starts_with("### ")).count()
    }

    #[test]
    fn add_before_trailing_marker() {
        let doc = "### Foo\n- Use Case: A\n---\n";
        let out = add_section(doc, "Bar", &record("https://bar", "B")).unwrap();
        assert_eq!(
            out,
            "### Foo\n- Use Case: A\n\
             ### Bar\n- Use Case: B\n\
             - Why Selected: Selection reason not provided\n\
             - Maintainer: Maintainer not specified\n\
             - Links: [Service URL](https://bar)\n\n---\n"
        );
    }

    #[test]
    fn add_appends_without_marker() {
        let doc = "### Foo\n- Use Case: A\n";
        let out = add_section(doc, "Bar", &record("https://bar", "B")).unwrap();
        assert!(out.starts_with("### Foo\n- Use Case: A\n### Bar\n"));
        assert!(out.ends_with("- Links: [Service URL](https://bar)\n\n"));
        assert_eq!(section_count(&out), 2);
    }

    #[test]
    fn add_renders_placeholder_defaults() {
        let out = add_section("", "Solo", &ServiceRecord::default()).unwrap();
        assert_eq!(
            out,
            "### Solo\n\
             - Use Case: Service description not provided\n\
             - Why Selected: Selection reason not provided\n\
             - Maintainer: Maintainer not specified\n\
             - Links: [Service URL](#)\n\n"
        );
    }

    #[test]
    fn add_refuses_existing_heading() {
        let doc = "### Foo\n- Use Case: A\n---\n";
        assert!(add_section(doc, "Foo", &record("https://foo", "A")).is_none());
    }

    #[test]
    fn add_does_not_confuse_heading_prefixes() {
        let doc = "### Foobar\n- Use Case: A\n---\n";
        let out = add_section(doc, "Foo", &record("https://foo", "F")).unwrap();
        assert_eq!(section_count(&out), 2);
        assert!(out.ends_with("---\n"));
    }

    #[test]
    fn update_replaces_only_the_named_section() {
        let doc = "### Foo\n- Use Case: A\n---\n";
        let out = update_section(
            doc,
            "Foo",
            &ServiceRecord {
                description: Some("Changed".to_string()),
                ..ServiceRecord::default()
            },
        )
        .unwrap();
        assert_eq!(
            out,
            "### Foo\n- Use Case: Changed\n\
             - Why Selected: Selection reason not provided\n\
             - Maintainer: Maintainer not specified\n\
             - Links: [Service URL](#)\n\n---\n"
        );
    }

    #[test]
    fn update_leaves_sibling_sections_untouched() {
        let doc = "### Foo\n- Use Case: A\n### Bar\n- Use Case: B\n---\n";
        let out = update_section(doc, "Foo", &record("https://foo", "New")).unwrap();
        assert_eq!(section_count(&out), 2);
        assert!(out.contains("### Bar\n- Use Case: B\n"));
        assert!(out.contains("- Use Case: New\n"));
        assert!(out.ends_with("---\n"));
    }

    #[test]
    fn update_missing_section_is_none() {
        assert!(update_section("### Foo\n---\n", "Bar", &ServiceRecord::default()).is_none());
    }

    #[test]
    fn update_discards_hand_added_lines() {
        let doc = "### Foo\n- Use Case: A\n- Note: kept by hand\n---\n";
        let out = update_section(doc, "Foo", &record("https://foo", "A")).unwrap();
        assert!(!out.contains("kept by hand"));
    }

    #[test]
    fn remove_deletes_exactly_one_section() {
        let doc = "### Foo\n- Use Case: A\n### Bar\n- Use Case: B\n---\n";
        let out = remove_section(doc, "Foo").unwrap();
        assert_eq!(out, "### Bar\n- Use Case: B\n---\n");
        assert_eq!(section_count(&out), 1);
    }

    #[test]
    fn remove_last_section_without_marker() {
        let doc = "### Foo\n- Use Case: A\n### Bar\n- Use Case: B\n";
        let out = remove_section(doc, "Bar").unwrap();
        assert_eq!(out, "### Foo\n- Use Case: A\n");
    }

    #[test]
    fn remove_missing_section_is_none() {
        assert!(remove_section("### Foo\n---\n", "Bar").is_none());
    }

    #[test]
    fn bounds_stop_at_next_heading() {
        let doc = "### Foo\nbody\n### Bar\nbody\n";
        let (start, end) = find_section_bounds(doc, "Foo").unwrap();
        assert_eq!(&doc[start..end], "### Foo\nbody\n");
    }

    #[test]
    fn bounds_stop_at_marker_line() {
        let doc = "intro\n### Foo\nbody\n---\ntrailing\n";
        let (start, end) = find_section_bounds(doc, "Foo").unwrap();
        assert_eq!(&doc[start..end], "### Foo\nbody\n");
    }

    #[test]
    fn bounds_run_to_end_of_document() {
        let doc = "### Foo\nbody";
        let (start, end) = find_section_bounds(doc, "Foo").unwrap();
        assert_eq!((start, end), (0, doc.len()));
    }

    #[test]
    fn bounds_tolerate_trailing_whitespace_on_heading() {
        let doc = "### Foo  \nbody\n";
        assert!(find_section_bounds(doc, "Foo").is_some());
    }

    #[test]
    fn duplicated_body_text_does_not_misplace_the_edit() {
        // Two sections with identical bodies: the splice must hit the first
        // section's offsets, not re-find the body text elsewhere.
        let doc = "### Foo\n- Use Case: same\n### Bar\n- Use Case: same\n---\n";
        let out = update_section(doc, "Foo", &record("https://foo", "different")).unwrap();
        assert!(out.contains("### Bar\n- Use Case: same\n"));
        assert!(out.contains("### Foo\n- Use Case: different\n"));
    }

    #[test]
    fn splice_is_pure_replacement() {
        assert_eq!(splice("abcdef", 2, 4, "XY"), "abXYef");
        assert_eq!(splice("abcdef", 3, 3, "-"), "abc-def");
        assert_eq!(splice("abcdef", 0, 6, ""), "");
    }
}
