use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use super::bibliography::{EprintLink, References};
use super::error::Error;




/// Name of the bibliography page in the generated HTML directory.
pub const CITELIST_FILE: &str = "citelist.html";

static CITEREF_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^CITEREF_(.*)$").unwrap());




/**
 * Append an arXiv link to every entry of `citelist.html` in `html_dir` whose
 * bibliography record in `references_file` identifies an arXiv eprint. The
 * page is rewritten in place, but only once the whole document has been
 * processed: any failure leaves the file on disk as it was. Returns the
 * number of links appended.
 */
pub fn append_eprint_links_to_citelist<P, Q>(html_dir: P, references_file: Q) -> Result<usize, Error>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path = html_dir.as_ref().join(CITELIST_FILE);
    let html = fs::read_to_string(&path).map_err(|e| Error::Io(path.clone(), e))?;
    let references = References::load(references_file)?;
    let (rewritten, count) = append_eprint_links(&html, &references)?;

    fs::write(&path, rewritten).map_err(|e| Error::Io(path.clone(), e))?;
    Ok(count)
}




/**
 * Rewrite an HTML document, appending each supported eprint link (and a
 * trailing period) to the first `<p>` element that follows its citation
 * anchor in document order. Content that is not touched is passed through
 * byte for byte.
 */
pub fn append_eprint_links(html: &str, references: &References) -> Result<(String, usize), Error> {
    let pending: RefCell<Vec<(String, EprintLink)>> = RefCell::new(Vec::new());
    let failure: RefCell<Option<Error>> = RefCell::new(None);
    let count = Cell::new(0);

    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                // Must be registered before the anchor handler: a paragraph
                // that is itself an anchor only receives earlier links.
                element!("p", |el| {
                    for (key, link) in pending.borrow_mut().drain(..) {
                        let markup = link.to_html();
                        el.append(&format!("{}.", markup), ContentType::Html);
                        info!("Added eprint link to {}: {}", key, markup);
                        count.set(count.get() + 1);
                    }
                    Ok(())
                }),
                element!("*[id*=\"CITEREF\"]", |el| {
                    let id = match el.get_attribute("id") {
                        Some(id) => id,
                        None => return Ok(()),
                    };
                    let key = match CITEREF_ID.captures(&id).and_then(|c| c.get(1)) {
                        Some(key) => key.as_str().to_string(),
                        None => return Ok(()),
                    };
                    match references.eprint_link(&key) {
                        Ok(Some(link)) => {
                            debug!("Found arXiv link for {}.", key);
                            pending.borrow_mut().push((key, link));
                        }
                        Ok(None) => {
                            debug!("Found no supported eprint data for {}.", key);
                        }
                        Err(e) => {
                            *failure.borrow_mut() = Some(e);
                            return Err("bibliography lookup failed".into());
                        }
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::default()
        },
    );

    let rewritten = match result {
        Ok(rewritten) => rewritten,
        Err(e) => {
            return Err(failure
                .into_inner()
                .unwrap_or_else(|| Error::Rewrite(format!("{}", e))))
        }
    };

    if let Some((key, _)) = pending.into_inner().into_iter().next() {
        return Err(Error::MissingCitationText(key));
    }
    Ok((rewritten, count.get()))
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::fs;
    use super::{append_eprint_links, append_eprint_links_to_citelist, CITELIST_FILE};
    use crate::docs::bibliography::References;
    use crate::docs::Error;

    const BIB: &str = r#"
@article{Foo2018,
  author = {Foo, Alice},
  title = {Black hole binaries},
  year = {2018},
  archivePrefix = {arXiv},
  eprint = {1234.5678}
}

@article{Bar2019,
  author = {Bar, Bob},
  title = {Neutron stars},
  year = {2019}
}

@article{Qux2021,
  author = {Qux, Dan},
  title = {Spectral methods},
  year = {2021},
  archivePrefix = {arXiv},
  eprint = {2101.00001}
}

@article{PrefixOnly2022,
  author = {Roe, Eve},
  title = {Horizons},
  year = {2022},
  archivePrefix = {arXiv}
}

@article{EprintOnly2023,
  author = {Poe, Fay},
  title = {Boundary conditions},
  year = {2023},
  eprint = {2301.00002}
}

@article{EprintType2024,
  author = {Doe, Gus},
  title = {Initial data},
  year = {2024},
  eprinttype = {arXiv},
  eprint = {2401.00003}
}
"#;

    fn citation(key: &str, text: &str) -> String {
        format!(
            "<dt><a class=\"anchor\" id=\"CITEREF_{}\"></a>[{}]</dt><dd><p>{}</p></dd>\n",
            key, key, text
        )
    }

    fn citelist(body: &str) -> String {
        format!("<html><body><div class=\"contents\"><dl class=\"citelist\">\n{}</dl></div></body></html>\n", body)
    }

    #[test]
    fn arxiv_link_is_appended_to_the_following_paragraph() {
        let references = References::parse(BIB).unwrap();
        let html = citelist(&citation("Foo2018", "A. Foo, Black hole binaries (2018)"));
        let (rewritten, count) = append_eprint_links(&html, &references).unwrap();
        assert_eq!(count, 1);
        assert!(rewritten.contains(
            "<p>A. Foo, Black hole binaries (2018)<a href=\"https://arxiv.org/abs/1234.5678\">arXiv:1234.5678</a>.</p>"
        ));
    }

    #[test]
    fn entry_without_eprint_is_left_byte_for_byte_unchanged() {
        let references = References::parse(BIB).unwrap();
        let html = citelist(&citation("Bar2019", "B. Bar, Neutron stars &amp; more (2019)"));
        let (rewritten, count) = append_eprint_links(&html, &references).unwrap();
        assert_eq!(count, 0);
        assert_eq!(rewritten, html);
    }

    #[test]
    fn archive_prefix_without_eprint_is_left_unchanged() {
        let references = References::parse(BIB).unwrap();
        let html = citelist(&citation("PrefixOnly2022", "E. Roe, Horizons (2022)"));
        let (rewritten, count) = append_eprint_links(&html, &references).unwrap();
        assert_eq!(count, 0);
        assert_eq!(rewritten, html);
    }

    #[test]
    fn eprint_without_archive_prefix_is_left_unchanged() {
        let references = References::parse(BIB).unwrap();
        for key in &["EprintOnly2023", "EprintType2024"] {
            let html = citelist(&citation(key, "text"));
            let (rewritten, count) = append_eprint_links(&html, &references).unwrap();
            assert_eq!(count, 0);
            assert_eq!(rewritten, html);
        }
    }

    #[test]
    fn citation_keys_differing_in_case_resolve() {
        let references = References::parse(BIB).unwrap();
        let html = citelist(&citation("foo2018", "A. Foo"));
        let (rewritten, count) = append_eprint_links(&html, &references).unwrap();
        assert_eq!(count, 1);
        assert!(rewritten.contains("<p>A. Foo<a href=\"https://arxiv.org/abs/1234.5678\">arXiv:1234.5678</a>.</p>"));
    }

    #[test]
    fn every_supported_entry_is_linked_independently() {
        let references = References::parse(BIB).unwrap();
        let body = [
            citation("Foo2018", "first"),
            citation("Bar2019", "second"),
            citation("Qux2021", "third"),
        ]
        .concat();
        let (rewritten, count) = append_eprint_links(&citelist(&body), &references).unwrap();
        assert_eq!(count, 2);
        assert!(rewritten.contains("<p>first<a href=\"https://arxiv.org/abs/1234.5678\">arXiv:1234.5678</a>.</p>"));
        assert!(rewritten.contains("<p>second</p>"));
        assert!(rewritten.contains("<p>third<a href=\"https://arxiv.org/abs/2101.00001\">arXiv:2101.00001</a>.</p>"));
    }

    #[test]
    fn ids_not_matching_the_citation_pattern_are_skipped() {
        let references = References::parse(BIB).unwrap();
        let html = citelist("<dt><a id=\"xCITEREF_Nobody\"></a></dt><dd><p>text</p></dd>\n");
        let (rewritten, count) = append_eprint_links(&html, &references).unwrap();
        assert_eq!(count, 0);
        assert_eq!(rewritten, html);
    }

    #[test]
    fn anchor_without_following_paragraph_is_an_error() {
        let references = References::parse(BIB).unwrap();
        let html = citelist("<dt><a id=\"CITEREF_Foo2018\"></a></dt>\n");
        assert!(matches!(
            append_eprint_links(&html, &references),
            Err(Error::MissingCitationText(key)) if key == "Foo2018"
        ));
    }

    #[test]
    fn citelist_file_is_rewritten_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let bib = dir.path().join("References.bib");
        let page = dir.path().join(CITELIST_FILE);
        fs::write(&bib, BIB).unwrap();
        fs::write(&page, citelist(&citation("Foo2018", "A. Foo"))).unwrap();

        assert_eq!(append_eprint_links_to_citelist(dir.path(), &bib).unwrap(), 1);
        let rewritten = fs::read_to_string(&page).unwrap();
        assert!(rewritten.contains("<p>A. Foo<a href=\"https://arxiv.org/abs/1234.5678\">arXiv:1234.5678</a>.</p>"));
    }

    #[test]
    fn missing_reference_aborts_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let bib = dir.path().join("References.bib");
        let page = dir.path().join(CITELIST_FILE);
        let original = citelist(&[citation("Foo2018", "A. Foo"), citation("Nobody2000", "N. Body")].concat());
        fs::write(&bib, BIB).unwrap();
        fs::write(&page, &original).unwrap();

        assert!(matches!(
            append_eprint_links_to_citelist(dir.path(), &bib),
            Err(Error::MissingReference(key)) if key == "Nobody2000"
        ));
        assert_eq!(fs::read_to_string(&page).unwrap(), original);
    }

    #[test]
    fn missing_citelist_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let bib = dir.path().join("References.bib");
        fs::write(&bib, BIB).unwrap();
        assert!(matches!(append_eprint_links_to_citelist(dir.path(), &bib), Err(Error::Io(..))));
    }
}
