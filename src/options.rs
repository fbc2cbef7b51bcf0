//! Document service options.
//!
//! The defaults use the flat staging layout and write presentation edits
//! into the presentation. [`ServiceOptions::legacy`] restores the legacy
//! on-disk layout: nested staging directories and a sibling `.txt` file for
//! presentation edits.

use serde::{Deserialize, Serialize};

/// Where an uploaded file is placed under the staging root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StagingLayout {
    /// `uploads/<name>`
    #[default]
    Flat,
    /// `uploads/<name>/<name>`: a directory named after the file holds it.
    Nested,
}

/// How a text edit to a presentation is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresentationUpdate {
    /// Append a paragraph to the presentation, like Word edits.
    #[default]
    InPlace,
    /// Leave the presentation untouched and write `<base>.txt` beside it.
    ShadowText,
}

/// How the suggested download name is derived from the stored name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownloadName {
    /// Drop everything up to and including the first `_`.
    #[default]
    StripPrefix,
    /// Use the stored name unchanged.
    Verbatim,
}

impl DownloadName {
    /// Suggested download name for a stored file name.
    ///
    /// Only the final path component is considered. A name without `_`, or
    /// one where nothing follows the first `_`, is returned unchanged.
    pub fn apply<'a>(&self, stored_name: &'a str) -> &'a str {
        let name = stored_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(stored_name);
        match self {
            DownloadName::StripPrefix => match name.split_once('_') {
                Some((_, rest)) if !rest.is_empty() => rest,
                _ => name,
            },
            DownloadName::Verbatim => name,
        }
    }
}

/// Options for [`DocumentService`](crate::DocumentService).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOptions {
    /// Staging layout under the uploads root
    pub layout: StagingLayout,

    /// Persistence of presentation edits
    pub presentation_update: PresentationUpdate,

    /// Download name derivation
    pub download_name: DownloadName,
}

impl ServiceOptions {
    /// Create new options with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options reproducing the legacy on-disk behaviour.
    pub fn legacy() -> Self {
        Self {
            layout: StagingLayout::Nested,
            presentation_update: PresentationUpdate::ShadowText,
            download_name: DownloadName::StripPrefix,
        }
    }

    /// Set the staging layout.
    pub fn with_layout(mut self, layout: StagingLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set how presentation edits are persisted.
    pub fn with_presentation_update(mut self, update: PresentationUpdate) -> Self {
        self.presentation_update = update;
        self
    }

    /// Set the download name rule.
    pub fn with_download_name(mut self, rule: DownloadName) -> Self {
        self.download_name = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ServiceOptions::default();
        assert_eq!(opts.layout, StagingLayout::Flat);
        assert_eq!(opts.presentation_update, PresentationUpdate::InPlace);
        assert_eq!(opts.download_name, DownloadName::StripPrefix);
    }

    #[test]
    fn test_legacy_options() {
        let opts = ServiceOptions::legacy();
        assert_eq!(opts.layout, StagingLayout::Nested);
        assert_eq!(opts.presentation_update, PresentationUpdate::ShadowText);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = ServiceOptions::new()
            .with_layout(StagingLayout::Nested)
            .with_download_name(DownloadName::Verbatim);
        assert_eq!(opts.layout, StagingLayout::Nested);
        assert_eq!(opts.download_name, DownloadName::Verbatim);
        assert_eq!(opts.presentation_update, PresentationUpdate::InPlace);
    }

    #[test]
    fn test_strip_prefix() {
        let rule = DownloadName::StripPrefix;
        assert_eq!(rule.apply("abc_report.docx"), "report.docx");
        assert_eq!(rule.apply("a_b_c.pptx"), "b_c.pptx");
        assert_eq!(rule.apply("_x.doc"), "x.doc");
        assert_eq!(rule.apply("report.docx"), "report.docx");
        assert_eq!(rule.apply("report_"), "report_");
        assert_eq!(rule.apply("x.docx/abc_x.docx"), "x.docx");
    }

    #[test]
    fn test_verbatim() {
        let rule = DownloadName::Verbatim;
        assert_eq!(rule.apply("abc_report.docx"), "abc_report.docx");
        assert_eq!(rule.apply("dir/report.docx"), "report.docx");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&StagingLayout::Nested).unwrap();
        assert_eq!(json, "\"nested\"");
        let rule: DownloadName = serde_json::from_str("\"strip-prefix\"").unwrap();
        assert_eq!(rule, DownloadName::StripPrefix);
        let update: PresentationUpdate = serde_json::from_str("\"shadow-text\"").unwrap();
        assert_eq!(update, PresentationUpdate::ShadowText);
    }
}
