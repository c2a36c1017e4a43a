use crate::drawing::model::Point;

// @module: Selection fragments and standalone Ipe documents

// @const: Fixed document header values, kept constant so output is reproducible
pub const IPE_FORMAT_VERSION: &str = "70005";
pub const IPE_CREATOR: &str = "Ipe 7.1.4";
pub const IPE_TIMESTAMP: &str = "D:20151031152507";
pub const IPE_LAYER: &str = "alpha";

/// Header settings of a standalone document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHeader {
    pub pen_name: String,
    pub pen_value: String,
}

impl Default for DocumentHeader {
    fn default() -> Self {
        Self {
            pen_name: "fat".to_string(),
            pen_value: "1.2".to_string(),
        }
    }
}

/// Wrap path markup in an `<ipeselection>` anchored at `anchor`
pub fn selection_fragment(paths: &str, anchor: Point) -> String {
    format!("<ipeselection pos=\"{}\">\n{}</ipeselection>\n", anchor, paths)
}

/// Wrap path markup in a complete single-page Ipe document
pub fn standalone_document(paths: &str, header: &DocumentHeader) -> String {
    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\"?>\n");
    doc.push_str("<!DOCTYPE ipe SYSTEM \"ipe.dtd\">\n");
    doc.push_str(&format!("<ipe version=\"{}\" creator=\"{}\">\n", IPE_FORMAT_VERSION, IPE_CREATOR));
    doc.push_str(&format!("<info created=\"{0}\" modified=\"{0}\"/>\n", IPE_TIMESTAMP));
    doc.push_str("<ipestyle name=\"basic\">\n");
    doc.push_str(&format!("<pen name=\"{}\" value=\"{}\"/>\n", header.pen_name, header.pen_value));
    doc.push_str("<layout crop=\"no\"/>\n");
    doc.push_str("</ipestyle>\n");
    doc.push_str("<page>\n");
    doc.push_str(&format!("<layer name=\"{}\"/>\n", IPE_LAYER));
    doc.push_str(&format!("<view layers=\"{0}\" active=\"{0}\"/>\n", IPE_LAYER));
    doc.push_str(paths);
    doc.push_str("</page>\n</ipe>\n");
    doc
}
