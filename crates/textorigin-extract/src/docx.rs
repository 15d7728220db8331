//! DOCX text extraction

use crate::ParseError;
use docx_rs::{
    DocumentChild, FooterChild, HeaderChild, InsertChild, Paragraph, ParagraphChild, Run,
    RunChild, StructuredDataTag, StructuredDataTagChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

/// Extract the text of a DOCX document.
///
/// Headers come first, then the body, then footers. Each paragraph
/// (including those in table cells and content controls) is preceded by a
/// blank line, tabs become `\t` and breaks become `\n`. Tracked insertions
/// are kept, tracked deletions are not. The result is trimmed.
pub fn extract_text(bytes: &[u8]) -> Result<String, ParseError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ParseError::Docx(e.to_string()))?;
    let section = &docx.document.section_property;

    let mut out = String::new();

    for (_, header) in section.get_headers() {
        for child in &header.children {
            match child {
                HeaderChild::Paragraph(paragraph) => push_paragraph(paragraph, &mut out),
                HeaderChild::Table(table) => push_table(table, &mut out),
                HeaderChild::StructuredDataTag(tag) => push_block_tag(tag, &mut out),
            }
        }
    }

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => push_paragraph(paragraph, &mut out),
            DocumentChild::Table(table) => push_table(table, &mut out),
            DocumentChild::StructuredDataTag(tag) => push_block_tag(tag, &mut out),
            _ => {}
        }
    }

    for (_, footer) in section.get_footers() {
        for child in &footer.children {
            match child {
                FooterChild::Paragraph(paragraph) => push_paragraph(paragraph, &mut out),
                FooterChild::Table(table) => push_table(table, &mut out),
                FooterChild::StructuredDataTag(tag) => push_block_tag(tag, &mut out),
            }
        }
    }

    Ok(out.trim().to_string())
}

fn push_paragraph(paragraph: &Paragraph, out: &mut String) {
    out.push_str("\n\n");
    push_paragraph_children(&paragraph.children, out);
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run(run, out);
                    }
                }
            }
            ParagraphChild::StructuredDataTag(tag) => push_block_tag(tag, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Content controls hold runs inline or whole paragraphs and tables
fn push_block_tag(tag: &StructuredDataTag, out: &mut String) {
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => push_run(run, out),
            StructuredDataTagChild::Paragraph(paragraph) => push_paragraph(paragraph, out),
            StructuredDataTagChild::Table(table) => push_table(table, out),
            StructuredDataTagChild::StructuredDataTag(nested) => push_block_tag(nested, out),
            _ => {}
        }
    }
}

fn push_table(table: &Table, out: &mut String) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(paragraph) => push_paragraph(paragraph, out),
                    TableCellContent::Table(nested) => push_table(nested, out),
                    TableCellContent::StructuredDataTag(tag) => push_block_tag(tag, out),
                    _ => {}
                }
            }
        }
    }
}
