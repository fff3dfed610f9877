// src/checker/classify.rs
// =============================================================================
// This module decides what kind of link a target string is.
//
// Docusaurus docs contain several link styles:
//   #install                      anchor in the same page
//   https://example.com           external link
//   /docs/guides/setup            absolute doc link (site prefix + path)
//   /docs/0.15.50/cli#anchor      absolute doc link pinned to a version
//   /img/diagram.png              absolute image (under the static root)
//   ./setup.md, ../other.md       relative doc link
//   ./diagram.png                 relative image
//   guides/setup.md               docroot link (relative to the docs folder)
//   /versioned/setup.mdx          raw absolute file path
//
// Some of these patterns overlap, so the rules are kept in an ordered table
// and the first rule that matches wins.
//
// Rust concepts:
// - Enums with data: each LinkShape variant carries what it extracted
// - Function pointers: each rule's matcher is a plain `fn`
// - Slices of structs: the rule table is a `&'static [Rule]`
// =============================================================================

use regex::Regex;

// The shape of a link target, plus whatever we pulled out of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkShape {
    /// Empty target or "#section": always valid
    Anchor,
    /// http:// or https://
    External { url: String },
    /// /{prefix}[/{version}]/{path}[#anchor]
    AbsoluteDoc {
        path: String,
        version: Option<String>,
    },
    /// /{path}.{ext} for images
    AbsoluteImage { path: String },
    /// ./path.md or ../path.md, optional #anchor
    RelativeDoc { path: String },
    /// ./path.{ext} or ../path.{ext} for images
    RelativeImage { path: String },
    /// word-initial path ending in .md, optional #anchor
    Docroot { path: String },
    /// Absolute .md/.mdx path outside the site prefix (not validated)
    RawAbsoluteFile,
    /// Nothing matched
    Invalid { image: bool },
}

// Which kind of occurrence a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliesTo {
    Any,
    Image,
    Doc,
}

impl AppliesTo {
    fn accepts(self, is_image: bool) -> bool {
        match self {
            AppliesTo::Any => true,
            AppliesTo::Image => is_image,
            AppliesTo::Doc => !is_image,
        }
    }
}

// One entry of the classification table
pub struct Rule {
    pub name: &'static str,
    pub applies_to: AppliesTo,
    pub matcher: fn(&Classifier, &str) -> Option<LinkShape>,
}

// Priority order matters: anchors and external links win over everything,
// relative patterns are tried before absolute ones.
pub const RULES: &[Rule] = &[
    Rule {
        name: "anchor",
        applies_to: AppliesTo::Any,
        matcher: match_anchor,
    },
    Rule {
        name: "external",
        applies_to: AppliesTo::Any,
        matcher: match_external,
    },
    Rule {
        name: "relative-image",
        applies_to: AppliesTo::Image,
        matcher: match_relative_image,
    },
    Rule {
        name: "absolute-image",
        applies_to: AppliesTo::Image,
        matcher: match_absolute_image,
    },
    Rule {
        name: "relative-doc",
        applies_to: AppliesTo::Doc,
        matcher: match_relative_doc,
    },
    Rule {
        name: "absolute-doc",
        applies_to: AppliesTo::Doc,
        matcher: match_absolute_doc,
    },
    Rule {
        name: "raw-absolute-file",
        applies_to: AppliesTo::Doc,
        matcher: match_raw_absolute_file,
    },
    Rule {
        name: "docroot",
        applies_to: AppliesTo::Doc,
        matcher: match_docroot,
    },
];

// Compiled patterns for one site prefix
#[derive(Debug, Clone)]
pub struct Classifier {
    site_prefix: String,
    external: Regex,
    relative_image: Regex,
    absolute_image: Regex,
    relative_doc: Regex,
    absolute_doc: Regex,
    raw_absolute_file: Regex,
    docroot: Regex,
}

impl Classifier {
    // Builds the classifier for a site prefix such as "docs"
    //
    // The prefix is escaped, so characters like '.' are matched literally.
    pub fn new(site_prefix: &str) -> Self {
        let site_prefix = site_prefix.trim_matches('/').to_string();
        let absolute_doc = format!(
            r"^/{}(?:/(?P<version>\d{{1,2}}\.\d{{1,2}}\.\d{{1,2}}))?/(?P<path>[\w/-]+?)(?:#\S+)?$",
            regex::escape(&site_prefix)
        );

        Self {
            external: compile(r"^https?://"),
            relative_image: compile(r"^(?P<path>\.\.?[.\w/-]+\.\w{3,4})$"),
            absolute_image: compile(r"^/(?P<path>[\w/-]+\.\w{3,4})$"),
            relative_doc: compile(r"^(?P<path>\.\.?[.\w/-]+\.md)(?:#\S+)?$"),
            absolute_doc: compile(&absolute_doc),
            raw_absolute_file: compile(r#"^/\S+\.mdx?(?:#[^'"]+)?$"#),
            docroot: compile(r"^(?P<path>\w[.\w/-]+\.md)(?:#\S+)?$"),
            site_prefix,
        }
    }

    pub fn site_prefix(&self) -> &str {
        &self.site_prefix
    }

    // Classifies a link target; always returns exactly one shape
    pub fn classify(&self, link: &str, is_image: bool) -> LinkShape {
        self.matching_rule(link, is_image)
            .map(|(_, shape)| shape)
            .unwrap_or(LinkShape::Invalid { image: is_image })
    }

    // Same as classify, but also tells you which rule fired
    pub fn matching_rule(&self, link: &str, is_image: bool) -> Option<(&'static str, LinkShape)> {
        RULES
            .iter()
            .filter(|rule| rule.applies_to.accepts(is_image))
            .find_map(|rule| (rule.matcher)(self, link).map(|shape| (rule.name, shape)))
    }
}

fn compile(pattern: &str) -> Regex {
    // Patterns are fixed apart from the escaped prefix, so they always compile
    Regex::new(pattern).expect("link shape pattern is valid")
}

fn path_group(re: &Regex, link: &str) -> Option<String> {
    re.captures(link)
        .and_then(|caps| caps.name("path"))
        .map(|m| m.as_str().to_string())
}

fn match_anchor(_: &Classifier, link: &str) -> Option<LinkShape> {
    (link.is_empty() || link.starts_with('#')).then_some(LinkShape::Anchor)
}

fn match_external(c: &Classifier, link: &str) -> Option<LinkShape> {
    c.external.is_match(link).then(|| LinkShape::External {
        url: link.to_string(),
    })
}

fn match_relative_image(c: &Classifier, link: &str) -> Option<LinkShape> {
    path_group(&c.relative_image, link).map(|path| LinkShape::RelativeImage { path })
}

fn match_absolute_image(c: &Classifier, link: &str) -> Option<LinkShape> {
    path_group(&c.absolute_image, link).map(|path| LinkShape::AbsoluteImage { path })
}

fn match_relative_doc(c: &Classifier, link: &str) -> Option<LinkShape> {
    path_group(&c.relative_doc, link).map(|path| LinkShape::RelativeDoc { path })
}

fn match_absolute_doc(c: &Classifier, link: &str) -> Option<LinkShape> {
    let caps = c.absolute_doc.captures(link)?;
    Some(LinkShape::AbsoluteDoc {
        path: caps.name("path")?.as_str().to_string(),
        version: caps.name("version").map(|m| m.as_str().to_string()),
    })
}

fn match_raw_absolute_file(c: &Classifier, link: &str) -> Option<LinkShape> {
    // Anything under /{prefix}/ belongs to the absolute-doc rule instead
    let under_prefix = format!("/{}/", c.site_prefix);
    if link.starts_with(&under_prefix) {
        return None;
    }
    c.raw_absolute_file
        .is_match(link)
        .then_some(LinkShape::RawAbsoluteFile)
}

fn match_docroot(c: &Classifier, link: &str) -> Option<LinkShape> {
    path_group(&c.docroot, link).map(|path| LinkShape::Docroot { path })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a table instead of if/else?
//    - The order of the rules IS the tie-break between overlapping patterns
//    - Keeping them in one list makes that order easy to read and to test
//
// 2. What does `then_some` / `then` do?
//    - bool::then_some(x) gives Some(x) if the bool is true, else None
//    - bool::then(|| x) is the lazy version, x is only built when needed
//
// 3. Why `{{1,2}}` in the format! string?
//    - format! treats { and } specially, so literal braces are doubled
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Classifier {
        Classifier::new("docs")
    }

    #[test]
    fn test_anchor_links() {
        let c = docs();
        assert_eq!(c.classify("#section", false), LinkShape::Anchor);
        assert_eq!(c.classify("#section", true), LinkShape::Anchor);
        assert_eq!(c.classify("", false), LinkShape::Anchor);
    }

    #[test]
    fn test_external_ignores_image_flag() {
        let c = docs();
        let expected = LinkShape::External {
            url: "https://example.com/x".to_string(),
        };
        assert_eq!(c.classify("https://example.com/x", false), expected);
        assert_eq!(c.classify("https://example.com/x", true), expected);
        assert!(matches!(
            c.classify("http://example.com", false),
            LinkShape::External { .. }
        ));
    }

    #[test]
    fn test_relative_doc() {
        let c = docs();
        assert_eq!(
            c.classify("./guide.md#install", false),
            LinkShape::RelativeDoc {
                path: "./guide.md".to_string()
            }
        );
        assert_eq!(
            c.classify("../other/page.md", false),
            LinkShape::RelativeDoc {
                path: "../other/page.md".to_string()
            }
        );
    }

    #[test]
    fn test_absolute_doc_with_and_without_version() {
        let c = docs();
        assert_eq!(
            c.classify("/docs/guide#anchor", false),
            LinkShape::AbsoluteDoc {
                path: "guide".to_string(),
                version: None
            }
        );
        assert_eq!(
            c.classify("/docs/1.2.3/guide", false),
            LinkShape::AbsoluteDoc {
                path: "guide".to_string(),
                version: Some("1.2.3".to_string())
            }
        );
        assert_eq!(
            c.classify("/docs/guides/setup/install", false),
            LinkShape::AbsoluteDoc {
                path: "guides/setup/install".to_string(),
                version: None
            }
        );
    }

    #[test]
    fn test_site_prefix_is_configurable() {
        let c = Classifier::new("/reference/");
        assert_eq!(c.site_prefix(), "reference");
        assert!(matches!(
            c.classify("/reference/api", false),
            LinkShape::AbsoluteDoc { .. }
        ));
        assert_eq!(c.classify("/docs/api", false), LinkShape::Invalid { image: false });
    }

    #[test]
    fn test_raw_absolute_file() {
        let c = docs();
        assert_eq!(c.classify("/versioned/setup.mdx", false), LinkShape::RawAbsoluteFile);
        assert_eq!(c.classify("/other/page.md#top", false), LinkShape::RawAbsoluteFile);
        // Under the site prefix a .md path is not a raw file, and not a valid doc link either
        assert_eq!(c.classify("/docs/page.md", false), LinkShape::Invalid { image: false });
    }

    #[test]
    fn test_docroot() {
        let c = docs();
        assert_eq!(
            c.classify("guides/setup.md#top", false),
            LinkShape::Docroot {
                path: "guides/setup.md".to_string()
            }
        );
    }

    #[test]
    fn test_images() {
        let c = docs();
        assert_eq!(
            c.classify("./img/diagram.png", true),
            LinkShape::RelativeImage {
                path: "./img/diagram.png".to_string()
            }
        );
        assert_eq!(
            c.classify("/img/diagram.jpeg", true),
            LinkShape::AbsoluteImage {
                path: "img/diagram.jpeg".to_string()
            }
        );
        assert_eq!(c.classify("img/diagram.png", true), LinkShape::Invalid { image: true });
    }

    #[test]
    fn test_image_rules_do_not_apply_to_docs() {
        // A relative .png written as a doc link is not a relative-doc either
        assert_eq!(docs().classify("./diagram.png", false), LinkShape::Invalid { image: false });
    }

    #[test]
    fn test_rule_priority() {
        let c = docs();
        // relative-image is tried before absolute-image
        assert_eq!(c.matching_rule("./a.png", true).map(|(n, _)| n), Some("relative-image"));
        // external beats every image rule
        assert_eq!(
            c.matching_rule("https://x.org/a.png", true).map(|(n, _)| n),
            Some("external")
        );
        // absolute-doc is tried before raw-absolute-file
        assert_eq!(c.matching_rule("/docs/guide", false).map(|(n, _)| n), Some("absolute-doc"));
        assert_eq!(c.matching_rule("mailto:someone@example.com", false), None);
    }

    #[test]
    fn test_rule_table_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "anchor",
                "external",
                "relative-image",
                "absolute-image",
                "relative-doc",
                "absolute-doc",
                "raw-absolute-file",
                "docroot"
            ]
        );
    }

    #[test]
    fn test_classification_is_deterministic() {
        let c = docs();
        for link in ["./a.md", "/docs/x", "https://a.b", "bad link", "#x", "/img/a.png"] {
            for is_image in [false, true] {
                assert_eq!(c.classify(link, is_image), c.classify(link, is_image));
            }
        }
    }

    #[test]
    fn test_invalid_catch_all() {
        let c = docs();
        assert_eq!(c.classify("not a link", false), LinkShape::Invalid { image: false });
        assert_eq!(c.classify("ftp://x/y.png", true), LinkShape::Invalid { image: true });
    }
}
