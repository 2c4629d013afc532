use std::fs;
use std::path::Path;
use biblatex::{Bibliography, ChunksExt, Entry};
use quick_xml::escape::escape;
use super::error::Error;




const ARXIV_ABS_URL: &str = "https://arxiv.org/abs/";




/**
 * The bibliography database the documentation was generated from, indexed by
 * citation key.
 */
pub struct References {
    bibliography: Bibliography,
}




// ============================================================================
impl References {

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| Error::Io(path.to_path_buf(), e))?;
        Self::parse(&source).map_err(|e| match e {
            Error::Bibliography(msg) => Error::Bibliography(format!("{}: {}", path.display(), msg)),
            e => e,
        })
    }

    pub fn parse(source: &str) -> Result<Self, Error> {
        let bibliography = Bibliography::parse(source)
            .map_err(|e| Error::Bibliography(format!("{}", e)))?;
        Ok(Self { bibliography })
    }

    pub fn len(&self) -> usize {
        self.bibliography.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /**
     * Return the eprint link for the entry with the given key, or `None` if
     * the entry carries no supported eprint. Keys are compared without
     * regard to case, as BibTeX does. A key that is not in the database at
     * all is an error.
     */
    pub fn eprint_link(&self, key: &str) -> Result<Option<EprintLink>, Error> {
        let entry = self
            .bibliography
            .get(key)
            .or_else(|| self.bibliography.iter().find(|entry| entry.key.eq_ignore_ascii_case(key)))
            .ok_or_else(|| Error::MissingReference(key.to_string()))?;
        Ok(EprintLink::from_entry(entry))
    }
}




/**
 * A link to the arXiv abstract page of a preprint.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EprintLink {
    eprint: String,
}




// ============================================================================
impl EprintLink {

    pub fn arxiv(eprint: &str) -> Self {
        Self { eprint: eprint.to_string() }
    }

    /**
     * Only arXiv eprints are supported: the `archivePrefix` field must be
     * exactly `arXiv` and the eprint identifier must be present and
     * non-empty. Field names are matched case-insensitively.
     */
    pub fn from_entry(entry: &Entry) -> Option<Self> {
        let archive = field(entry, "archivePrefix")?;
        let eprint = field(entry, "eprint")?;

        if archive != "arXiv" || eprint.is_empty() {
            return None;
        }
        Some(Self { eprint })
    }

    pub fn eprint(&self) -> &str {
        &self.eprint
    }

    pub fn url(&self) -> String {
        format!("{}{}", ARXIV_ABS_URL, self.eprint)
    }

    pub fn text(&self) -> String {
        format!("arXiv:{}", self.eprint)
    }

    pub fn to_html(&self) -> String {
        format!("<a href=\"{}\">{}</a>", escape(&self.url()), escape(&self.text()))
    }
}

fn field(entry: &Entry, name: &str) -> Option<String> {
    entry
        .fields
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, chunks)| chunks.format_verbatim().trim().to_string())
}
