use serde::{Deserialize, Serialize};

/// One operation from the backend catalog: a method + path pair.
///
/// Duplicates are not deduplicated; each occurrence renders as its own row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiEntry {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState {
    Idle,
    Fetching,
    Complete,
    Error(String),
}

/// Body sent to the conversion endpoint, built fresh from the form at submit time.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionRequest {
    pub path: String,
    pub method: String,
    pub tag: String,
    pub summary: String,
    pub operation_id: String,
    pub root_template: String,
    pub xml_file: String,
    pub output: String,
}

/// Reply body from the conversion endpoint. At most one of the two fields is
/// meaningful; both may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConvertReply {
    pub message: Option<String>,
    pub error: Option<String>,
}

/// How a conversion attempt resolved, as far as the status line cares.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertOutcome {
    /// Got a well-formed JSON reply (application success or error).
    Reply(ConvertReply),
    /// Network failure or a body that wasn't JSON.
    Transport,
}

/// Body sent to the sample endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SampleRequest {
    pub path: String,
    pub method: String,
}

/// The sample viewer overlay. Closes only on an explicit close key; filtering
/// and catalog refreshes leave it alone.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleViewer {
    Closed,
    Open {
        /// Identity of the fetch that owns this overlay. Responses carrying a
        /// different token arrived late for an earlier open and are discarded.
        token: u64,
        entry: ApiEntry,
        content: SampleContent,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleContent {
    Generating,
    Ready(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Searching,
    EnteringUrl,
    EditingField,
}

/// Tracks which main panel has focus
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelFocus {
    Catalog, // Left panel
    Convert, // Right panel
}

/// The named fields of the conversion form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Path,
    Method,
    Tag,
    Summary,
    OperationId,
    RootTemplate,
    XmlFile,
    Output,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Path,
        FormField::Method,
        FormField::Tag,
        FormField::Summary,
        FormField::OperationId,
        FormField::RootTemplate,
        FormField::XmlFile,
        FormField::Output,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Path => "path",
            FormField::Method => "method",
            FormField::Tag => "tag",
            FormField::Summary => "summary",
            FormField::OperationId => "operation_id",
            FormField::RootTemplate => "root_template",
            FormField::XmlFile => "xml_file",
            FormField::Output => "output",
        }
    }

    pub fn next(self) -> FormField {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> FormField {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Values of the conversion form. All string-valued; empty means "not filled".
#[derive(Debug, Clone, Default)]
pub struct ConvertForm {
    pub path: String,
    pub method: String,
    pub tag: String,
    pub summary: String,
    pub operation_id: String,
    pub root_template: String,
    pub xml_file: String,
    pub output: String,
}

impl ConvertForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Path => &self.path,
            FormField::Method => &self.method,
            FormField::Tag => &self.tag,
            FormField::Summary => &self.summary,
            FormField::OperationId => &self.operation_id,
            FormField::RootTemplate => &self.root_template,
            FormField::XmlFile => &self.xml_file,
            FormField::Output => &self.output,
        }
    }

    pub fn set_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Path => self.path = value,
            FormField::Method => self.method = value,
            FormField::Tag => self.tag = value,
            FormField::Summary => self.summary = value,
            FormField::OperationId => self.operation_id = value,
            FormField::RootTemplate => self.root_template = value,
            FormField::XmlFile => self.xml_file = value,
            FormField::Output => self.output = value,
        }
    }

    /// Snapshot the current field values into a request body.
    pub fn to_request(&self) -> ConversionRequest {
        ConversionRequest {
            path: self.path.clone(),
            method: self.method.clone(),
            tag: self.tag.clone(),
            summary: self.summary.clone(),
            operation_id: self.operation_id.clone(),
            root_template: self.root_template.clone(),
            xml_file: self.xml_file.clone(),
            output: self.output.clone(),
        }
    }
}
