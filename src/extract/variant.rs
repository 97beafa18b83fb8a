//! The layout strategy interface and the built-in layout catalogue.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::model::Field;
use crate::parser::{Line, PageSection};

use super::context::ExtractionContext;
use super::labeled::{Labeled2019, Platform2023, Poster2023, Sectioned2021, Session2022};
use super::typeset::Typeset;

/// Identifier and title captured from a title marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    /// Identifier, when the layout prints one next to the title
    pub id: Option<String>,
    /// Title text following the marker
    pub title: String,
}

/// Layout-specific heuristics driving the field-state machine.
///
/// The matchers return the text captured after a field marker, or `None`
/// when the line does not carry that marker. Layouts without explicit
/// labels keep the defaults and drive the machine from geometry inside
/// [`LayoutVariant::extract_page`].
pub trait LayoutVariant: Send + Sync + fmt::Debug {
    /// Short layout name.
    fn name(&self) -> &'static str;

    /// Fields this layout fills; the rest stay empty.
    fn fields(&self) -> &'static [Field];

    /// Whether pages are read as two columns around a topic banner.
    fn is_two_column(&self) -> bool {
        false
    }

    /// Page sections extracted as independent units, empty for whole-document layouts.
    fn sections(&self) -> &[PageSection] {
        &[]
    }

    /// Line text as the matchers see it.
    fn line_text(&self, line: &Line) -> String {
        line.text()
    }

    /// Whether a line is layout chrome (running headers, navigation links).
    fn skip_line(&self, _line: &Line, _text: &str) -> bool {
        false
    }

    /// Match a session or topic marker.
    fn match_topic(&self, _text: &str) -> Option<String> {
        None
    }

    /// Match an identifier and title marker.
    fn match_title(&self, _text: &str) -> Option<TitleMatch> {
        None
    }

    /// Match an authors marker.
    fn match_authors(&self, _text: &str) -> Option<String> {
        None
    }

    /// Match an affiliations marker.
    fn match_affiliations(&self, _text: &str) -> Option<String> {
        None
    }

    /// Match a body-text marker.
    fn match_content(&self, _text: &str) -> Option<String> {
        None
    }

    /// Walk one page's lines, feeding the context.
    fn extract_page(&self, lines: &[Line], topic: &str, ctx: &mut ExtractionContext);
}

/// The built-in layouts, one per proceedings format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// 2013-2018: two columns, identifiers by font size, bold titles
    Typeset,
    /// 2019: "PgmNr", "Authors:", "Affiliations:" labels
    Labeled2019,
    /// 2021: "PrgmNr", "Author Block:", "Disclosure Block:" in four sections
    Sectioned2021,
    /// 2022: session headers open records, "ProgNbr"/"PB" identifiers
    Session2022,
    /// 2023 platform and plenary sessions: "Title:" labels, no identifiers
    Platform2023,
    /// 2023 posters: "PB" identifiers under poster session titles
    Poster2023,
}

impl Layout {
    /// All layouts, oldest first.
    pub const ALL: [Layout; 6] = [
        Layout::Typeset,
        Layout::Labeled2019,
        Layout::Sectioned2021,
        Layout::Session2022,
        Layout::Platform2023,
        Layout::Poster2023,
    ];

    /// Layout name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Layout::Typeset => "2013-2018",
            Layout::Labeled2019 => "2019",
            Layout::Sectioned2021 => "2021",
            Layout::Session2022 => "2022",
            Layout::Platform2023 => "2023",
            Layout::Poster2023 => "2023-poster",
        }
    }

    /// One-line description.
    pub fn description(self) -> &'static str {
        match self {
            Layout::Typeset => "two-column pages, font-size identifiers, bold titles",
            Layout::Labeled2019 => "PgmNr / Authors: / Affiliations: labels",
            Layout::Sectioned2021 => "PrgmNr / Author Block: / Disclosure Block:, four page sections",
            Layout::Session2022 => "session headers, ProgNbr or PB identifiers, Abstract: labels",
            Layout::Platform2023 => "Session NNN headers, Title: / Authors: / Abstract: labels",
            Layout::Poster2023 => "poster session titles, PB identifiers, Authors: labels",
        }
    }

    /// Build the layout's strategy with its default constants.
    pub fn variant(self) -> Box<dyn LayoutVariant> {
        match self {
            Layout::Typeset => Box::new(Typeset::new()),
            Layout::Labeled2019 => Box::new(Labeled2019::new()),
            Layout::Sectioned2021 => Box::new(Sectioned2021::new()),
            Layout::Session2022 => Box::new(Session2022::new()),
            Layout::Platform2023 => Box::new(Platform2023::new()),
            Layout::Poster2023 => Box::new(Poster2023::new()),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "2013-2018" | "2013" | "2014" | "2015" | "2016" | "2017" | "2018" | "typeset" => {
                Ok(Layout::Typeset)
            }
            "2019" => Ok(Layout::Labeled2019),
            "2021" => Ok(Layout::Sectioned2021),
            "2022" => Ok(Layout::Session2022),
            "2023" | "2023-platform" => Ok(Layout::Platform2023),
            "2023-poster" => Ok(Layout::Poster2023),
            _ => Err(Error::UnknownLayout(s.to_string())),
        }
    }
}
