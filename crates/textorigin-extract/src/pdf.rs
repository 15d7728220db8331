//! PDF text extraction

use crate::ParseError;
use std::any::Any;
use std::panic;

/// Extract the text of every page, in document order, with no separator
/// between pages.
pub fn extract_text(bytes: &[u8]) -> Result<String, ParseError> {
    // pdf-extract panics on some malformed inputs instead of returning an error
    let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|payload| ParseError::PdfPanic(panic_message(payload.as_ref())))?
        .map_err(|e| ParseError::Pdf(e.to_string()))?;

    tracing::debug!(pages = pages.len(), "extracted pdf pages");
    Ok(join_pages(pages.iter().map(|page| strip_page_start(page))))
}

/// pdf-extract opens every page with line breaks synthesized from its
/// initial pen position; they are not part of the page text.
fn strip_page_start(page: &str) -> &str {
    page.trim_start_matches('\n')
}

/// Concatenate page texts without inserting separators.
///
/// Words that straddle a page boundary run together; callers that care must
/// split on their own.
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages.into_iter().fold(String::new(), |mut text, page| {
        text.push_str(page.as_ref());
        text
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_inserts_no_separator() {
        assert_eq!(join_pages(["Hello ", "World", "!"]), "Hello World!");
    }

    #[test]
    fn test_join_pages_boundary_words_merge() {
        assert_eq!(join_pages(vec!["end".to_string(), "start".to_string()]), "endstart");
    }

    #[test]
    fn test_page_start_breaks_stripped() {
        let pages = ["\n\nHello ", "\n\nWorld", "\n\n!"];
        assert_eq!(
            join_pages(pages.iter().map(|page| strip_page_start(page))),
            "Hello World!"
        );
        assert_eq!(strip_page_start("\nline one\n\nline two\n"), "line one\n\nline two\n");
    }

    #[test]
    fn test_join_no_pages() {
        assert_eq!(join_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn test_corrupt_pdf() {
        assert!(extract_text(b"%PDF-1.4 this is not really a pdf").is_err());
        assert!(extract_text(b"").is_err());
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");
        let payload: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
