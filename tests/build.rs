//! End-to-end tests driving `build_site` over temporary site directories.

use pagestamp::build::{build_site, Error};
use pagestamp::config::{Config, PAGES};
use pagestamp::render::Error as RenderError;
use std::fs;
use tempfile::TempDir;

const TEMPLATE: &str =
    "<html><head><title>%(title)s</title></head><body>%(contents)s</body></html>\n";

fn contents_for(page: &str) -> String {
    format!("<h2>{}</h2>\n<p>50% of the {} docs</p>\n", page, page)
}

/// Creates a directory holding the template and a fragment for every page.
fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("_template.html"), TEMPLATE).unwrap();
    for page in PAGES {
        fs::write(
            dir.path().join(format!("_{}.contents.html", page)),
            contents_for(page),
        )
        .unwrap();
    }
    dir
}

fn read_outputs(dir: &TempDir) -> Vec<String> {
    PAGES
        .iter()
        .map(|page| fs::read_to_string(dir.path().join(format!("{}.html", page))).unwrap())
        .collect()
}

#[test]
fn test_build_site_renders_every_page() {
    let dir = site();
    build_site(&Config::new(dir.path())).unwrap();

    for page in PAGES {
        assert_eq!(
            TEMPLATE
                .replace("%(title)s", page)
                .replace("%(contents)s", &contents_for(page)),
            fs::read_to_string(dir.path().join(format!("{}.html", page))).unwrap()
        );
    }
}

#[test]
fn test_build_site_is_idempotent() {
    let dir = site();
    let config = Config::new(dir.path());
    build_site(&config).unwrap();
    let first = read_outputs(&dir);
    build_site(&config).unwrap();
    assert_eq!(first, read_outputs(&dir));
}

#[test]
fn test_changing_one_fragment_changes_one_page() {
    let dir = site();
    let config = Config::new(dir.path());
    build_site(&config).unwrap();
    let before = read_outputs(&dir);

    fs::write(dir.path().join("_Faq.contents.html"), "<p>No questions yet.</p>").unwrap();
    build_site(&config).unwrap();
    let after = read_outputs(&dir);

    for (i, page) in PAGES.iter().enumerate() {
        if *page == "Faq" {
            assert_ne!(before[i], after[i]);
            assert_eq!(
                "<html><head><title>Faq</title></head><body><p>No questions yet.</p></body></html>\n",
                after[i]
            );
        } else {
            assert_eq!(before[i], after[i], "page `{}` changed", page);
        }
    }
}

#[test]
fn test_build_site_halts_at_first_missing_fragment() {
    let dir = site();
    fs::remove_file(dir.path().join("_Roadmap.contents.html")).unwrap();

    match build_site(&Config::new(dir.path())) {
        Err(Error::Page {
            page,
            err: RenderError::ReadContents { .. },
        }) => assert_eq!("Roadmap", page),
        other => panic!("expected a Roadmap read error, got {:?}", other),
    }

    let position = PAGES.iter().position(|page| *page == "Roadmap").unwrap();
    for (i, page) in PAGES.iter().enumerate() {
        let written = dir.path().join(format!("{}.html", page)).exists();
        assert_eq!(i < position, written, "page `{}`", page);
    }
}

#[test]
fn test_build_site_missing_template() {
    let dir = site();
    fs::remove_file(dir.path().join("_template.html")).unwrap();

    match build_site(&Config::new(dir.path())) {
        Err(Error::Page {
            page,
            err: RenderError::ReadTemplate { .. },
        }) => assert_eq!("index", page),
        other => panic!("expected a template read error, got {:?}", other),
    }
    assert!(!dir.path().join("index.html").exists());
}

#[test]
fn test_build_site_custom_page_list() {
    let dir = site();
    let config = Config {
        pages: vec![String::from("index")],
        ..Config::new(dir.path())
    };
    build_site(&config).unwrap();

    assert!(dir.path().join("index.html").exists());
    assert!(!dir.path().join("Features.html").exists());
}
