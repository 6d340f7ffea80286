//! Domain models for the conversion pipeline.
//!
//! - [`MetadataRecord`] - the fifteen Dublin Core elements plus `about`
//! - [`DcElement`] - element names in their fixed emission order
//! - [`MacrepoRecord`] - the three macrepo bookkeeping fields
//! - [`OutputKind`] / [`RenderedDocument`] - a rendered document tagged with its format

// =============================================================================
// Namespaces
// =============================================================================

/// Dublin Core elements namespace, also the default schema location.
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// XML Schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// McMaster repository (macrepo) elements namespace.
pub const MACREPO_NS: &str = "http://repository.mcmaster.ca/schema/macrepo/elements/1.0/";

/// RDF syntax namespace.
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// Default namespace on the root of a plain Dublin Core XML document.
pub const APP_NS: &str = "http://example.org/myapp/";

// =============================================================================
// Dublin Core
// =============================================================================

/// One of the fifteen Dublin Core elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DcElement {
    Title,
    Creator,
    Subject,
    Description,
    Publisher,
    Contributor,
    Date,
    Type,
    Format,
    Identifier,
    Source,
    Language,
    Relation,
    Coverage,
    Rights,
}

impl DcElement {
    /// All elements, in emission order.
    pub const ALL: [DcElement; 15] = [
        DcElement::Title,
        DcElement::Creator,
        DcElement::Subject,
        DcElement::Description,
        DcElement::Publisher,
        DcElement::Contributor,
        DcElement::Date,
        DcElement::Type,
        DcElement::Format,
        DcElement::Identifier,
        DcElement::Source,
        DcElement::Language,
        DcElement::Relation,
        DcElement::Coverage,
        DcElement::Rights,
    ];

    /// Local element name (`title`, `creator`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Creator => "creator",
            Self::Subject => "subject",
            Self::Description => "description",
            Self::Publisher => "publisher",
            Self::Contributor => "contributor",
            Self::Date => "date",
            Self::Type => "type",
            Self::Format => "format",
            Self::Identifier => "identifier",
            Self::Source => "source",
            Self::Language => "language",
            Self::Relation => "relation",
            Self::Coverage => "coverage",
            Self::Rights => "rights",
        }
    }

    /// Prefixed name, used both as XML tag and as TSV column (`dc:title`).
    pub fn qualified_name(&self) -> String {
        format!("dc:{}", self.name())
    }
}

/// A Dublin Core record built from one TSV row.
///
/// Every field defaults to empty; an absent column and an empty cell are the
/// same thing here. `relation` is already split on `|`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: String,
    pub creator: String,
    pub subject: String,
    pub description: String,
    pub publisher: String,
    pub contributor: String,
    pub date: String,
    pub r#type: String,
    pub format: String,
    pub identifier: String,
    pub source: String,
    pub language: String,
    pub relation: Vec<String>,
    pub coverage: String,
    pub rights: String,
    /// Subject URI of the RDF description block. Not a Dublin Core element.
    pub about: String,
}

impl MetadataRecord {
    /// Non-empty values of `element`, in order.
    ///
    /// Single-valued elements yield at most one value; `relation` yields one
    /// entry per non-empty segment.
    pub fn values(&self, element: DcElement) -> Vec<&str> {
        let single = match element {
            DcElement::Title => &self.title,
            DcElement::Creator => &self.creator,
            DcElement::Subject => &self.subject,
            DcElement::Description => &self.description,
            DcElement::Publisher => &self.publisher,
            DcElement::Contributor => &self.contributor,
            DcElement::Date => &self.date,
            DcElement::Type => &self.r#type,
            DcElement::Format => &self.format,
            DcElement::Identifier => &self.identifier,
            DcElement::Source => &self.source,
            DcElement::Language => &self.language,
            DcElement::Coverage => &self.coverage,
            DcElement::Rights => &self.rights,
            DcElement::Relation => {
                return self
                    .relation
                    .iter()
                    .map(String::as_str)
                    .filter(|v| !v.is_empty())
                    .collect();
            }
        };

        if single.is_empty() {
            Vec::new()
        } else {
            vec![single.as_str()]
        }
    }

    /// Mutable access to a single-valued element. `None` for `relation`.
    pub fn field_mut(&mut self, element: DcElement) -> Option<&mut String> {
        let field = match element {
            DcElement::Title => &mut self.title,
            DcElement::Creator => &mut self.creator,
            DcElement::Subject => &mut self.subject,
            DcElement::Description => &mut self.description,
            DcElement::Publisher => &mut self.publisher,
            DcElement::Contributor => &mut self.contributor,
            DcElement::Date => &mut self.date,
            DcElement::Type => &mut self.r#type,
            DcElement::Format => &mut self.format,
            DcElement::Identifier => &mut self.identifier,
            DcElement::Source => &mut self.source,
            DcElement::Language => &mut self.language,
            DcElement::Coverage => &mut self.coverage,
            DcElement::Rights => &mut self.rights,
            DcElement::Relation => return None,
        };
        Some(field)
    }
}

// =============================================================================
// Macrepo
// =============================================================================

/// The macrepo bookkeeping fields of one TSV row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacrepoRecord {
    pub old_nid: String,
    pub notes: String,
    pub scale: String,
}

impl MacrepoRecord {
    /// Column names, in emission order.
    pub const COLUMNS: [&'static str; 3] = ["macrepo:oldNid", "macrepo:notes", "macrepo:scale"];

    /// `(tag, value)` pairs in emission order. Always three entries.
    pub fn elements(&self) -> [(&'static str, &str); 3] {
        [
            (Self::COLUMNS[0], self.old_nid.as_str()),
            (Self::COLUMNS[1], self.notes.as_str()),
            (Self::COLUMNS[2], self.scale.as_str()),
        ]
    }
}

// =============================================================================
// Rendered Output
// =============================================================================

/// Format of a rendered document, which decides its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Plain Dublin Core XML (`<ID>-DC.xml`).
    DublinCore,
    /// Dublin Core in RDF/XML (`<ID>-RDF.xml`).
    DublinCoreRdf,
    /// Macrepo element tree (`<ID>-macrepo.xml`).
    Macrepo,
}

impl OutputKind {
    /// File name suffix appended to the record identifier.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::DublinCore => "-DC.xml",
            Self::DublinCoreRdf => "-RDF.xml",
            Self::Macrepo => "-macrepo.xml",
        }
    }

    /// Output file name for `identifier`.
    pub fn file_name(&self, identifier: &str) -> String {
        format!("{}{}", identifier, self.file_suffix())
    }
}

/// A serialized document ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub kind: OutputKind,
    pub identifier: String,
    pub contents: String,
}

impl RenderedDocument {
    pub fn new(kind: OutputKind, identifier: impl Into<String>, contents: String) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
            contents,
        }
    }

    pub fn file_name(&self) -> String {
        self.kind.file_name(&self.identifier)
    }
}
