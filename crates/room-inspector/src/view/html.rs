//! HTML rendering of a [`TableView`].

use ironhtml::typed::Element;
use ironhtml_elements::{Td, Th, Tr};

use super::TableView;

/// Class of the `<table>` element.
const TABLE_CLASS: &str = "table table-sm room-inspector";
/// Class given to every odd row, for alternating backgrounds.
const ALT_ROW_CLASS: &str = "row-alt";

impl TableView {
    /// Renders an HTML `<table>`. Each body row carries its positional
    /// index in `data-index`; odd rows get an alternate background class.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut header_cells = String::new();
        for column in &self.columns {
            Element::<Th>::new()
                .attr("scope", "col")
                .text(column)
                .render_to(&mut header_cells);
        }

        let mut rows_html = String::new();
        for (index, row) in self.rows.iter().enumerate() {
            let index_str = index.to_string();
            let mut tr = Element::<Tr>::new().attr("data-index", &index_str);
            if index % 2 != 0 {
                tr = tr.class(ALT_ROW_CLASS);
            }
            for cell in row {
                tr = tr.child::<Td, _>(|td| td.text(cell));
            }
            tr.render_to(&mut rows_html);
        }

        // Tr/Tbody can't take raw children, so the frame is assembled here.
        format!(
            "<table class=\"{TABLE_CLASS}\">\
             <thead><tr>{header_cells}</tr></thead>\
             <tbody>{rows_html}</tbody></table>"
        )
    }
}
