// src/checker/extract.rs
// =============================================================================
// This module extracts inline links and images from Markdown text.
//
// We match links with a regular expression instead of parsing the Markdown:
// - [description](target)   is a doc link
// - ![alt text](target)     is an image
//
// The description may itself contain one level of brackets, which lets us
// see links that are wrapped around an image:
//
//   [See ![diagram](./img.png)](./page.md)
//
// produces two occurrences: the outer doc link to ./page.md and the image
// ./img.png found inside its description.
//
// Rust concepts:
// - Iterators: `Occurrences` is a lazy iterator, nothing is matched until asked
// - Clone: cloning the iterator restarts from the same position
// - Lifetimes: occurrences borrow their text from the document
// =============================================================================

use regex::{Captures, Regex};
use std::path::Path;

// Inline link or image: optional '!', a description that may hold one level
// of [brackets], then the target up to the first ')'. Links never span lines.
const MARKDOWN_LINK_PATTERN: &str = r"!?\[((?:[^\[\]\n]|\[[^\[\]\n]*\])*)\]\((.*?)\)";

// One link found in a document
//
// This is a plain value: the link text, where it came from, and whether it
// was written as an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence<'a> {
    /// The target between the parentheses, e.g. "./guide.md#install"
    pub link: &'a str,
    /// The markdown file containing the link
    pub file: &'a Path,
    /// True for ![alt](target)
    pub is_image: bool,
}

// Holds the compiled link pattern so we only build the regex once per scan
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: Regex,
}

impl LinkExtractor {
    pub fn new() -> Self {
        Self {
            // The pattern is a constant, so failing here is a programmer error
            pattern: Regex::new(MARKDOWN_LINK_PATTERN).expect("markdown link pattern is valid"),
        }
    }

    // Returns every link occurrence in `text`, in document order
    //
    // Links found inside a description come right after the link that
    // contains them.
    pub fn occurrences<'a>(&'a self, text: &'a str, file: &'a Path) -> Occurrences<'a> {
        Occurrences {
            pattern: &self.pattern,
            text,
            file,
            position: 0,
            nested: Vec::new(),
        }
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// Lazy iterator over the links of one document
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    pattern: &'a Regex,
    text: &'a str,
    file: &'a Path,
    // Byte offset where the next top-level search starts
    position: usize,
    // Links found inside the last description, still to be yielded (reversed)
    nested: Vec<LinkOccurrence<'a>>,
}

impl<'a> Occurrences<'a> {
    fn occurrence(&self, caps: &Captures<'a>) -> Option<LinkOccurrence<'a>> {
        let whole = caps.get(0)?;
        let link = caps.get(2)?.as_str();
        Some(LinkOccurrence {
            link,
            file: self.file,
            is_image: whole.as_str().starts_with('!'),
        })
    }
}

impl<'a> Iterator for Occurrences<'a> {
    type Item = LinkOccurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(nested) = self.nested.pop() {
            return Some(nested);
        }

        if self.position > self.text.len() {
            return None;
        }

        let caps = self.pattern.captures_at(self.text, self.position)?;
        let whole = caps.get(0)?;
        // Every match is at least "[]()" long, so this always moves forward
        self.position = whole.end();

        // Queue up the links hiding in the description
        if let Some(description) = caps.get(1) {
            let mut found: Vec<_> = self
                .pattern
                .captures_iter(description.as_str())
                .filter_map(|inner| self.occurrence(&inner))
                .collect();
            found.reverse();
            self.nested = found;
        }

        self.occurrence(&caps)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not just return a Vec?
//    - An iterator only does work when asked for the next item
//    - Callers that stop early never pay for the rest of the document
//    - Callers that want a Vec can still write .collect()
//
// 2. Why is `nested` reversed?
//    - Vec::pop() takes from the end
//    - Reversing once lets us pop the nested links in document order
//
// 3. What is captures_at?
//    - Like captures(), but starts searching at a byte offset
//    - Unlike slicing the text, ^ and other anchors still see the whole text
// -----------------------------------------------------------------------------
