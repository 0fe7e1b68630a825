//! Crawl a flat directory of HTML pages into a [`LinkGraph`].
//!
//! Each `*.html` file is a node named by its file name. Links are the `href`
//! targets of `<a>` tags; self links and links to pages outside the directory
//! are dropped, so the resulting graph has no dangling links.

use crate::graph::LinkGraph;
use crate::{Error, Result};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const ANCHOR_HREF: &str = r#"<a\s+(?:[^>]*?)href="([^"]*)""#;

/// Read every `*.html` file directly inside `dir` (not recursive).
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let href = anchor_regex()?;
    let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".html") || !path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&path).map_err(io_err(&path))?;
        let mut links = links_in(&href, &contents);
        links.remove(name);
        pages.insert(name.to_string(), links);
    }

    let graph = LinkGraph::from_links_lossy(pages);
    log::info!(
        "crawled {} pages ({} links) from {}",
        graph.len(),
        graph.edge_count(),
        dir.display()
    );
    Ok(graph)
}

/// All `href` targets of `<a>` tags in `html`.
pub fn extract_links(html: &str) -> Result<BTreeSet<String>> {
    Ok(links_in(&anchor_regex()?, html))
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error {
    let path = path.to_path_buf();
    move |source| Error::Io { path, source }
}

fn anchor_regex() -> Result<Regex> {
    Regex::new(ANCHOR_HREF).map_err(|e| Error::Invariant(format!("anchor pattern: {e}")))
}

fn links_in(href: &Regex, html: &str) -> BTreeSet<String> {
    href.captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_href_targets() {
        let html = r#"<p><a href="1.html">one</a> <a class="x" href="2.html">two</a>
            <a href="1.html">again</a> <link href="style.css"></p>"#;
        let links = extract_links(html).unwrap();
        assert_eq!(
            links,
            BTreeSet::from(["1.html".to_string(), "2.html".to_string()])
        );
    }

    #[test]
    fn missing_dir_is_io_error() {
        let err = crawl("/definitely/not/a/corpus").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!err.is_invalid_input());
    }
}
