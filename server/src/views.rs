//! HTML pages: the upload form and the document editor.

use officedit::StoredDocument;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Document Editor</title>
<style>
body { font-family: sans-serif; margin: 2rem auto; max-width: 60rem; }
.error { color: #b00020; }
.status { margin-left: 1rem; }
textarea { width: 100%; min-height: 24rem; font-family: monospace; }
dt { font-weight: bold; }
</style>
</head>
<body>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

const UPLOAD_FORM: &str = r#"<form method="post" action="/Document/UploadDocumant" enctype="multipart/form-data">
<input type="file" name="File" accept=".doc,.docx,.ppt,.pptx">
<button type="submit">Upload</button>
</form>
"#;

const EDITOR_SCRIPT: &str = r#"<script>
(function () {
  const editor = document.getElementById("editor");
  const status = document.getElementById("status");
  document.getElementById("save").addEventListener("click", async function () {
    status.textContent = "";
    try {
      const response = await fetch("/Document/UpdateDocumentContent", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ FilePath: editor.dataset.path, Content: editor.value })
      });
      const result = await response.json();
      status.textContent = result.message;
      status.className = result.success ? "status" : "status error";
    } catch (err) {
      status.textContent = "An error occurred while updating the document.";
      status.className = "status error";
    }
  });
})();
</script>
"#;

/// The upload form, optionally with an error message above it.
pub fn index(error: Option<&str>) -> String {
    let mut html = String::from(PAGE_HEAD);
    html.push_str("<h1>Upload a document</h1>\n");
    if let Some(error) = error {
        html.push_str("<p class=\"error\">");
        html.push_str(&escape_html(error));
        html.push_str("</p>\n");
    }
    html.push_str(UPLOAD_FORM);
    html.push_str(PAGE_TAIL);
    html
}

/// The editor for an uploaded document.
pub fn editor(doc: &StoredDocument) -> String {
    let mut html = String::from(PAGE_HEAD);
    html.push_str("<h1>");
    html.push_str(&escape_html(&doc.file_name));
    html.push_str("</h1>\n");

    html.push_str("<p>");
    html.push_str(&escape_html(&doc.message));
    html.push_str("</p>\n<dl>\n");
    for (label, value) in [("File type", &doc.file_type), ("Stored at", &doc.file_path)] {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            label,
            escape_html(value)
        ));
    }
    html.push_str("</dl>\n");

    html.push_str("<textarea id=\"editor\" data-path=\"");
    html.push_str(&escape_html(&doc.file_path));
    html.push_str("\">");
    html.push_str(&escape_html(&doc.content));
    html.push_str("</textarea>\n");

    html.push_str("<p><button type=\"button\" id=\"save\">Save</button>");
    html.push_str("<span id=\"status\" class=\"status\"></span></p>\n");

    html.push_str("<p><a href=\"/Document/DownloadDocument?fileName=");
    html.push_str(&escape_html(&urlencoding::encode(download_key(&doc.file_path))));
    html.push_str("\">Download</a> | <a href=\"/Document/Index\">Upload another</a></p>\n");

    html.push_str(EDITOR_SCRIPT);
    html.push_str(PAGE_TAIL);
    html
}

/// Name the download endpoint expects: the staged path below `uploads/`.
pub fn download_key(file_path: &str) -> &str {
    file_path
        .strip_prefix(officedit::staging::UPLOADS_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(file_path)
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
