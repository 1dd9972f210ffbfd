//! Standalone HTML report generation.
//!
//! One report per `(topic, date)` pair:
//!
//! ```text
//! docs/
//! └── arxiv_LLM-RL_2024-01-01.html
//! ```
//!
//! The page is a static Bootstrap shell with one card per paper. All text
//! coming from the feed is HTML-escaped before it is embedded.

use crate::models::PaperEntry;
use crate::utils::html_escape;
use chrono::NaiveDate;
use itertools::Itertools;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Text shown instead of the card grid when a query returned nothing.
pub const NO_RESULTS: &str = "No papers found for today.";

const HEAD_LINKS: &str = "\
<link href='https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css' rel='stylesheet'>
<link href='https://fonts.googleapis.com/css2?family=Roboto:wght@400;700&display=swap' rel='stylesheet'>
<link rel='stylesheet' href='https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css'>
";

const STYLE: &str = "\
<style>
body {
    font-family: 'Roboto', sans-serif;
    background-color: #f5f7fa;
    padding: 20px;
}
.card {
    border-radius: 10px;
    box-shadow: 0 4px 8px rgba(0,0,0,0.1);
}
.card-title {
    font-weight: 700;
}
.card:hover {
    transform: scale(1.02);
    transition: 0.3s ease-in-out;
}
</style>
";

const SCRIPTS: &str =
    "<script src='https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js'></script>\n";

/// Filename of the report for `topic` generated on `date`.
///
/// ```ignore
/// assert_eq!(report_filename("LLM-RL", date), "arxiv_LLM-RL_2024-01-01.html");
/// ```
pub fn report_filename(topic: &str, date: NaiveDate) -> String {
    format!("arxiv_{}_{}.html", topic, date.format("%Y-%m-%d"))
}

/// A full report page, rendered through [`fmt::Display`].
struct ReportPage<'a> {
    entries: &'a [PaperEntry],
    topic: &'a str,
    date: NaiveDate,
}

impl fmt::Display for ReportPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = format!("{} - {}", html_escape(self.topic), self.date.format("%Y-%m-%d"));

        writeln!(f, "<!DOCTYPE html>\n<html lang='en'>\n<head>\n<meta charset='UTF-8'>")?;
        writeln!(f, "<title>{heading}</title>")?;
        f.write_str(HEAD_LINKS)?;
        f.write_str(STYLE)?;
        writeln!(f, "</head>\n<body>\n<div class='container'>")?;
        writeln!(f, "<h1 class='text-center my-4'><i class='fas fa-book'></i> {heading}</h1>")?;
        writeln!(f, "<div class='row'>")?;

        if self.entries.is_empty() {
            writeln!(f, "<p>❌ {NO_RESULTS}</p>")?;
        } else {
            for entry in self.entries {
                write_card(f, entry)?;
            }
        }

        writeln!(f, "</div>\n</div>")?;
        f.write_str(SCRIPTS)?;
        f.write_str("</body>\n</html>")
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, entry: &PaperEntry) -> fmt::Result {
    let authors = entry.authors.iter().map(|a| html_escape(a)).join(", ");

    writeln!(f, "<div class='col-md-6 mb-4'>\n<div class='card'>\n<div class='card-body'>")?;
    writeln!(
        f,
        "<h4 class='card-title'><a href='{}' target='_blank' rel='noopener'>{}</a></h4>",
        html_escape(&entry.link),
        html_escape(&entry.title)
    )?;
    writeln!(
        f,
        "<h5 class='card-subtitle mb-2 text-muted'>Authors: <span class='authors'>{authors}</span></h5>"
    )?;
    writeln!(
        f,
        "<h6 class='card-subtitle mb-2 text-muted'>Date: <span class='published'>{}</span></h6>",
        entry.published_display()
    )?;
    writeln!(f, "<p class='card-text'>{}</p>", html_escape(&entry.summary))?;

    write!(
        f,
        "<p class='card-footer-links'><span class='badge bg-secondary'>arXiv:{}</span>",
        html_escape(entry.arxiv_id())
    )?;
    if let Some(pdf) = &entry.pdf_link {
        write!(
            f,
            " <a class='pdf-link' href='{}' target='_blank' rel='noopener'><i class='fas fa-file-pdf'></i> PDF</a>",
            html_escape(pdf)
        )?;
    }
    writeln!(f, "</p>")?;
    writeln!(f, "</div>\n</div>\n</div>")
}

/// Render the report document for `entries` filed under `topic` on `date`.
///
/// `date` is the day the report is generated, not any paper's date.
pub fn render(entries: &[PaperEntry], topic: &str, date: NaiveDate) -> String {
    ReportPage {
        entries,
        topic,
        date,
    }
    .to_string()
}

/// Write the report to `{output_dir}/arxiv_{topic}_{date}.html`.
///
/// Creates `output_dir` if needed. The document is assembled in memory and
/// written in one call, replacing any report for the same topic and day.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip(entries), fields(count = entries.len()))]
pub async fn write_report(
    output_dir: &str,
    entries: &[PaperEntry],
    topic: &str,
    date: NaiveDate,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(output_dir).await?;
    let path = Path::new(output_dir).join(report_filename(topic, date));
    let html = render(entries, topic, date);
    fs::write(&path, html).await?;
    info!(path = %path.display(), "Wrote report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_published;
    use scraper::{Html, Selector};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paper(title: &str, link: &str, authors: &[&str], summary: &str) -> PaperEntry {
        PaperEntry {
            id: format!("http://arxiv.org/abs/{title}"),
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            link: link.to_string(),
            pdf_link: None,
            published: parse_published("2024-01-01T00:00:00Z").unwrap(),
            summary: summary.to_string(),
        }
    }

    fn select<'a>(doc: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
        let selector = Selector::parse(css).unwrap();
        doc.select(&selector).collect()
    }

    fn text(el: &scraper::ElementRef<'_>) -> String {
        el.text().collect::<String>()
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(
            report_filename("LLM-RL", date(2024, 1, 1)),
            "arxiv_LLM-RL_2024-01-01.html"
        );
        assert_eq!(
            report_filename("LLM-agent", date(2025, 12, 9)),
            "arxiv_LLM-agent_2025-12-09.html"
        );
    }

    #[test]
    fn test_render_empty_shows_placeholder_and_no_cards() {
        let html = render(&[], "LLM-RL", date(2024, 1, 1));
        assert!(html.contains("No papers found for today."));

        let doc = Html::parse_document(&html);
        assert!(select(&doc, ".card").is_empty());
        let title = select(&doc, "title");
        assert_eq!(text(&title[0]), "LLM-RL - 2024-01-01");
    }

    #[test]
    fn test_render_single_entry_card() {
        let entries = vec![paper("Foo", "http://x/1", &["A", "B"], "S")];
        let html = render(&entries, "LLM-RL", date(2024, 1, 1));
        let doc = Html::parse_document(&html);

        let cards = select(&doc, ".card");
        assert_eq!(cards.len(), 1);
        assert!(!html.contains(NO_RESULTS));

        let links = select(&doc, ".card-title a");
        assert_eq!(text(&links[0]), "Foo");
        assert_eq!(links[0].value().attr("href"), Some("http://x/1"));

        let authors = select(&doc, ".card .authors");
        assert_eq!(text(&authors[0]), "A, B");

        let body = select(&doc, ".card-text");
        assert_eq!(text(&body[0]), "S");

        let published = select(&doc, ".card .published");
        assert_eq!(text(&published[0]), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_render_one_card_per_entry_in_order() {
        let entries = vec![
            paper("First", "http://x/1", &["A"], "one"),
            paper("Second", "http://x/2", &["B", "C", "D"], "two"),
            paper("Third", "http://x/3", &[], "three"),
        ];
        let html = render(&entries, "t", date(2024, 1, 1));
        let doc = Html::parse_document(&html);

        assert_eq!(select(&doc, ".card").len(), 3);
        let titles: Vec<String> = select(&doc, ".card-title a").iter().map(text).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        let authors: Vec<String> = select(&doc, ".card .authors").iter().map(text).collect();
        assert_eq!(authors, vec!["A", "B, C, D", ""]);
    }

    #[test]
    fn test_render_escapes_feed_text() {
        let entries = vec![paper(
            "<script>alert(1)</script>",
            "http://x/1?a=1&b='2'",
            &["O'Brien"],
            "x < y && y > z",
        )];
        let html = render(&entries, "<topic>", date(2024, 1, 1));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));

        let doc = Html::parse_document(&html);
        let links = select(&doc, ".card-title a");
        assert_eq!(text(&links[0]), "<script>alert(1)</script>");
        assert_eq!(links[0].value().attr("href"), Some("http://x/1?a=1&b='2'"));
        assert_eq!(text(&select(&doc, ".card .authors")[0]), "O'Brien");
        assert_eq!(text(&select(&doc, ".card-text")[0]), "x < y && y > z");
        assert_eq!(text(&select(&doc, "h1")[0]).trim(), "<topic> - 2024-01-01");
    }

    #[test]
    fn test_render_pdf_link_and_id_badge() {
        let mut entry = paper("Foo", "http://arxiv.org/abs/2401.00001v1", &["A"], "S");
        entry.id = "http://arxiv.org/abs/2401.00001v1".to_string();
        entry.pdf_link = Some("http://arxiv.org/pdf/2401.00001v1".to_string());
        let html = render(&[entry], "t", date(2024, 1, 1));
        let doc = Html::parse_document(&html);

        assert_eq!(text(&select(&doc, ".badge")[0]), "arXiv:2401.00001v1");
        let pdf = select(&doc, "a.pdf-link");
        assert_eq!(pdf[0].value().attr("href"), Some("http://arxiv.org/pdf/2401.00001v1"));
    }

    #[test]
    fn test_render_without_pdf_has_no_pdf_link() {
        let html = render(&[paper("Foo", "http://x/1", &["A"], "S")], "t", date(2024, 1, 1));
        let doc = Html::parse_document(&html);
        assert!(select(&doc, "a.pdf-link").is_empty());
    }

    #[tokio::test]
    async fn test_write_report_path_and_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let docs = tmp.path().join("docs");
        let docs = docs.to_str().unwrap();

        let path = write_report(docs, &[], "LLM-RL", date(2024, 1, 1)).await.unwrap();
        assert_eq!(path, Path::new(docs).join("arxiv_LLM-RL_2024-01-01.html"));
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("No papers found for today."));

        let entries = vec![paper("Foo", "http://x/1", &["A", "B"], "S")];
        let again = write_report(docs, &entries, "LLM-RL", date(2024, 1, 1)).await.unwrap();
        assert_eq!(again, path);
        let second = std::fs::read_to_string(&path).unwrap();
        assert!(!second.contains("No papers found for today."));
        assert!(second.contains(">Foo</a>"));

        let files = std::fs::read_dir(docs).unwrap().count();
        assert_eq!(files, 1);
    }
}
