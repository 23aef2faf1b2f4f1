//! Case-insensitive substring search across cheatsheets.
//!
//! Matching walks each cheatsheet in a fixed precedence: the cheatsheet
//! name, then every section title, then every block (content or title) of
//! that section. Block matches carry a snippet of the surrounding content.
//! All positions are character offsets, so snippets never split a UTF-8
//! sequence.

use serde::{Deserialize, Serialize};

use crate::types::{Block, BlockType, Cheatsheet};

/// Queries shorter than this many characters match nothing.
pub const MIN_QUERY_CHARS: usize = 2;
/// Characters of context kept on each side of a snippet match.
pub const SNIPPET_CONTEXT_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// One place where the query occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// Id of the cheatsheet containing the match.
    pub cheatsheet_id: String,
    /// Name of that cheatsheet.
    pub cheatsheet_name: String,
    /// Where inside the cheatsheet the match sits.
    #[serde(flatten)]
    pub location: MatchLocation,
    /// The matched name or title, or a content snippet for blocks.
    #[serde(rename = "match")]
    pub text: String,
}

/// Kind of element that matched, tagged as `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MatchLocation {
    /// The cheatsheet name matched.
    Cheatsheet,
    /// A section title matched.
    Section {
        /// Title of the section.
        section_title: String,
    },
    /// A block's content or title matched.
    Block {
        /// Title of the owning section.
        section_title: String,
        /// Type of the block.
        block_type: BlockType,
        /// Title of the block, if any.
        block_title: Option<String>,
    },
}

/// Search `cheatsheets` for `query`, ignoring case.
///
/// Returns an empty list when the query has fewer than two characters.
///
/// ```rust
/// use cheatsheet_core::{Cheatsheet, MatchLocation, search};
///
/// let sheets = [Cheatsheet::new("Go Basics")];
/// let matches = search(&sheets, "go");
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].location, MatchLocation::Cheatsheet);
/// assert_eq!(matches[0].text, "Go Basics");
/// ```
pub fn search<'a, I>(cheatsheets: I, query: &str) -> Vec<SearchMatch>
where
    I: IntoIterator<Item = &'a Cheatsheet>,
{
    let Some(needle) = Needle::new(query) else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    for sheet in cheatsheets {
        let found = |location, text| SearchMatch {
            cheatsheet_id: sheet.id().to_string(),
            cheatsheet_name: sheet.name().to_string(),
            location,
            text,
        };

        if needle.find_in(sheet.name()).is_some() {
            matches.push(found(MatchLocation::Cheatsheet, sheet.name().to_string()));
        }

        for section in sheet.sections() {
            if needle.find_in(&section.title).is_some() {
                matches.push(found(
                    MatchLocation::Section {
                        section_title: section.title.clone(),
                    },
                    section.title.clone(),
                ));
            }

            for block in &section.blocks {
                if let Some(snippet) = block_snippet(&needle, block) {
                    matches.push(found(
                        MatchLocation::Block {
                            section_title: section.title.clone(),
                            block_type: block.block_type(),
                            block_title: block.title.clone(),
                        },
                        snippet,
                    ));
                }
            }
        }
    }
    matches
}

fn block_snippet(needle: &Needle, block: &Block) -> Option<String> {
    if let Some(position) = needle.find_in(&block.content) {
        return Some(snippet(&block.content, position, needle.len));
    }

    // Title-only match: the window is anchored one char before the content
    // start, so it reaches `len + context - 1` chars in.
    let title = block.title.as_deref()?;
    needle.find_in(title)?;
    Some(snippet(&block.content, 0, needle.len.saturating_sub(1)))
}

/// Excerpt of `content` around a match at char offset `position`.
///
/// Keeps up to [`SNIPPET_CONTEXT_CHARS`] characters before the match and
/// `match_len + SNIPPET_CONTEXT_CHARS` characters from it, marking each
/// clipped side with `...`.
#[must_use]
pub fn snippet(content: &str, position: usize, match_len: usize) -> String {
    let total = content.chars().count();
    let start = position.saturating_sub(SNIPPET_CONTEXT_CHARS).min(total);
    let end = position
        .saturating_add(match_len)
        .saturating_add(SNIPPET_CONTEXT_CHARS)
        .min(total);

    let mut out = String::new();
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(content.chars().skip(start).take(end.saturating_sub(start)));
    if end < total {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Lowercased query, compared char by char.
struct Needle {
    chars: Vec<char>,
    len: usize,
}

impl Needle {
    fn new(query: &str) -> Option<Self> {
        let len = query.chars().count();
        if len < MIN_QUERY_CHARS {
            return None;
        }
        Some(Self {
            chars: query.chars().flat_map(char::to_lowercase).collect(),
            len,
        })
    }

    /// Char offset in `haystack` of the first case-insensitive occurrence.
    fn find_in(&self, haystack: &str) -> Option<usize> {
        // Lowercasing can expand a char, so remember where each lowered char came from.
        let (lowered, origin): (Vec<char>, Vec<usize>) = haystack
            .chars()
            .enumerate()
            .flat_map(|(idx, c)| c.to_lowercase().map(move |lc| (lc, idx)))
            .unzip();

        lowered
            .windows(self.chars.len())
            .position(|window| window == self.chars.as_slice())
            .map(|start| origin[start])
    }
}
