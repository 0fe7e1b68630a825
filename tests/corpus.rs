use linkrank::corpus::crawl;
use linkrank::{iterative_rank, sample_rank};
use std::fs;

fn write(dir: &std::path::Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn crawl_builds_filtered_graph() {
    let tmp = tempfile::tempdir().unwrap();
    let d = tmp.path();
    write(d, "1.html", r#"<a href="2.html">2</a> <a href="1.html">self</a>"#);
    write(d, "2.html", r#"<a href="1.html">1</a> <a href="https://example.com">x</a>"#);
    write(d, "3.html", r#"<p>no links here</p>"#);
    write(d, "notes.txt", r#"<a href="1.html">ignored</a>"#);
    fs::create_dir(d.join("sub.html")).unwrap();

    let g = crawl(d).unwrap();
    assert_eq!(g.node_names(), ["1.html", "2.html", "3.html"]);
    assert_eq!(g.links("1.html").unwrap().collect::<Vec<_>>(), vec!["2.html"]);
    assert_eq!(g.links("2.html").unwrap().collect::<Vec<_>>(), vec!["1.html"]);
    assert_eq!(g.is_sink("3.html"), Some(true));

    let s = sample_rank(&g, 0.85, 1_000).unwrap();
    let i = iterative_rank(&g, 0.85).unwrap();
    assert_eq!(s.len(), 3);
    assert!((i.sum() - 1.0).abs() < 1e-3);
}

#[test]
fn empty_directory_yields_empty_graph() {
    let tmp = tempfile::tempdir().unwrap();
    let g = crawl(tmp.path()).unwrap();
    assert!(g.is_empty());
    assert!(iterative_rank(&g, 0.85).is_err());
}
