// ABOUTME: Derives output paths and frontmatter headers from page properties
// ABOUTME: Category and title become slugs under the notes directory

use crate::convert::flatten;
use crate::model::Page;
use crate::Result;
use std::path::PathBuf;

pub const NOTES_DIR: &str = "notes";

pub const TITLE_PROPERTY: &str = "Title";
pub const CATEGORY_PROPERTY: &str = "Category";
pub const TAGS_PROPERTY: &str = "Tags";
pub const SUMMARY_PROPERTY: &str = "Summary";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Relative to the output root, e.g. `notes/deep-dives/my_note.md`.
    pub path: PathBuf,
    pub header: String,
}

pub fn resolve(page: &Page) -> Result<ResolvedPage> {
    let title = flatten(page.required_title(TITLE_PROPERTY)?);
    let category = page.required_select(CATEGORY_PROPERTY)?;
    let tags = page.multi_select(TAGS_PROPERTY);
    let summary = flatten(page.rich_text(SUMMARY_PROPERTY));

    let path = PathBuf::from(NOTES_DIR)
        .join(category_slug(category))
        .join(format!("{}.md", title_slug(&title)));

    let header = format!(
        "---\ntitle: \"{}\"\ncategory: \"{}\"\ntags: {}\nlast_updated: \"{}\"\nsummary: \"{}\"\n---\n\n",
        title,
        category,
        tag_list(&tags),
        page.last_edited_time,
        summary
    );

    Ok(ResolvedPage { path, header })
}

pub fn category_slug(category: &str) -> String {
    category.replace(' ', "-").to_lowercase()
}

pub fn title_slug(title: &str) -> String {
    title.replace(' ', "_").to_lowercase()
}

/// Renders tags as a bracketed list of quoted strings, e.g. `['a', 'b']`.
pub fn tag_list(tags: &[&str]) -> String {
    let quoted: Vec<String> = tags.iter().map(|t| quote_tag(t)).collect();
    format!("[{}]", quoted.join(", "))
}

// Single quotes unless the tag itself contains one and no double quote.
fn quote_tag(tag: &str) -> String {
    let quote = if tag.contains('\'') && !tag.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(tag.len() + 2);
    out.push(quote);
    for c in tag.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
