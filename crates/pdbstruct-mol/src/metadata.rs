//! Bibliographic and experimental metadata
//!
//! Every field is optional; a coordinate-only file leaves all of them unset.

/// Header-section metadata of a structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Four-character deposition ID (HEADER)
    pub id_code: Option<String>,
    /// Classification (HEADER)
    pub classification: Option<String>,
    /// Deposition date as written, e.g. "03-JUN-98" (HEADER)
    pub deposition_date: Option<String>,
    /// Entry title (TITLE)
    pub title: Option<String>,
    /// Entry authors, comma separated (AUTHOR)
    pub authors: Option<String>,
    /// Primary citation title (JRNL TITL)
    pub journal_title: Option<String>,
    /// Primary citation authors, comma separated (JRNL AUTH)
    pub journal_authors: Option<String>,
    /// Journal name (JRNL REF)
    pub journal: Option<String>,
    pub volume: Option<String>,
    pub page: Option<String>,
    pub year: Option<i32>,
    /// PubMed ID (JRNL PMID)
    pub pmid: Option<String>,
    /// JRNL DOI
    pub doi: Option<String>,
    /// KEYWDS, split on commas
    pub keywords: Vec<String>,
    /// Experimental method (EXPDTA)
    pub experimental: Option<String>,
    /// Resolution in Angstroms (REMARK 2)
    pub resolution: Option<f64>,
}

impl Metadata {
    /// Whether any field is set
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }

    /// Whether any primary-citation field is set
    pub fn has_citation(&self) -> bool {
        self.journal_title.is_some()
            || self.journal_authors.is_some()
            || self.journal.is_some()
            || self.pmid.is_some()
            || self.doi.is_some()
    }
}
