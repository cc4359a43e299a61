//! Header and citation records
//!
//! Multi-line records are joined as they are read. Free text (TITLE,
//! EXPDTA, JRNL TITL) is joined with a single space; lists (AUTHOR, JRNL
//! AUTH, KEYWDS, the JRNL REF journal name) break after commas and are
//! joined directly when the text so far ends in one.

use nom::bytes::complete::tag;
use nom::character::complete::space0;
use nom::number::complete::double;
use nom::sequence::{delimited, preceded};
use nom::IResult;
use pdbstruct_mol::Metadata;

use super::records::{column, RecordType};

/// How a continuation line attaches to the text read so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Always one space
    Space,
    /// Directly after a trailing comma, otherwise one space
    List,
}

/// Append a continuation to a multi-line value
pub fn append_continued(field: &mut Option<String>, text: &str, join: Join) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    match field {
        Some(value) => {
            if join == Join::Space || !value.ends_with(',') {
                value.push(' ');
            }
            value.push_str(text);
        }
        None => *field = Some(text.to_string()),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn parse_resolution(input: &str) -> IResult<&str, f64> {
    preceded(delimited(space0, tag("RESOLUTION."), space0), double)(input)
}

/// Accumulates metadata records over one read
#[derive(Debug, Default)]
pub struct MetadataExtractor {
    metadata: Metadata,
    keywords: Option<String>,
    journal: Option<String>,
}

impl MetadataExtractor {
    pub fn new() -> Self {
        MetadataExtractor::default()
    }

    /// Feed one record; records that carry no metadata are ignored
    pub fn feed(&mut self, record: RecordType, line: &str) {
        let md = &mut self.metadata;
        match record {
            RecordType::Header => {
                md.classification = non_empty(column(line, 10, 50));
                md.deposition_date = non_empty(column(line, 50, 59));
                md.id_code = non_empty(column(line, 62, 66));
            }
            RecordType::Title => append_continued(&mut md.title, column(line, 10, 80), Join::Space),
            RecordType::Author => append_continued(&mut md.authors, column(line, 10, 79), Join::List),
            RecordType::Expdta => append_continued(&mut md.experimental, column(line, 10, 79), Join::Space),
            RecordType::Keywds => append_continued(&mut self.keywords, column(line, 10, 79), Join::List),
            RecordType::Jrnl => self.jrnl(line),
            RecordType::Remark => self.remark(line),
            _ => {}
        }
    }

    fn jrnl(&mut self, line: &str) {
        let text = column(line, 19, 79);
        let md = &mut self.metadata;
        match column(line, 12, 16).trim() {
            "AUTH" => append_continued(&mut md.journal_authors, text, Join::List),
            "TITL" => append_continued(&mut md.journal_title, text, Join::Space),
            "REF" => {
                append_continued(&mut self.journal, column(line, 19, 47), Join::List);
                // Only the first REF line carries volume, page and year
                if column(line, 16, 18).trim().is_empty() {
                    md.volume = non_empty(column(line, 51, 55));
                    md.page = non_empty(column(line, 56, 61));
                    md.year = column(line, 62, 66).trim().parse().ok();
                }
            }
            "PMID" => md.pmid = non_empty(text),
            "DOI" => md.doi = non_empty(text),
            _ => {}
        }
    }

    fn remark(&mut self, line: &str) {
        if column(line, 7, 10).trim() != "2" {
            return;
        }
        if let Ok((_, resolution)) = parse_resolution(column(line, 10, 80)) {
            self.metadata.resolution = Some(resolution);
        }
    }

    /// Finish the read and return the collected metadata
    pub fn finish(self) -> Metadata {
        let mut md = self.metadata;
        md.journal = self.journal;
        md.keywords = self
            .keywords
            .map(|k| {
                k.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        md
    }
}
