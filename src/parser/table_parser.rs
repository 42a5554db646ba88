// Extraction of (country, visitor count) rows from the first table of a rendered page
use crate::model::{ParserError, TourismRecord};
use crate::normalizer::parse_visitor_count;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

pub struct TableParser {
    count_suffix: String,
}

impl TableParser {
    pub fn new(count_suffix: impl Into<String>) -> Self {
        Self {
            count_suffix: count_suffix.into(),
        }
    }

    /// Returns one record per well-formed data row, in document order.
    ///
    /// A missing table or an empty table is a valid "no data" result. Rows whose
    /// count does not parse are logged and skipped.
    pub fn parse(&self, html: &str) -> Result<Vec<TourismRecord>, ParserError> {
        let document = Html::parse_document(html);

        let table_selector = selector("table")?;
        let row_selector = selector("tr")?;
        let th_selector = selector("th")?;
        let td_selector = selector("td")?;

        let mut records = Vec::new();

        let Some(table) = document.select(&table_selector).next() else {
            warn!("No <table> found in rendered page");
            return Ok(records);
        };

        let rows: Vec<ElementRef> = table.select(&row_selector).collect();
        if rows.is_empty() {
            warn!("Table has no <tr> rows");
            return Ok(records);
        }

        // First row is the header.
        for row in rows.iter().skip(1) {
            let ths: Vec<ElementRef> = row.select(&th_selector).collect();
            let tds: Vec<ElementRef> = row.select(&td_selector).collect();
            if ths.len() != 1 || tds.len() < 2 {
                continue;
            }

            let country_name = ths[0].text().collect::<String>().trim().to_string();
            let count_text = joined_text(&tds[1]);

            match parse_visitor_count(&count_text, &self.count_suffix) {
                Ok(number_of_foreigners) => records.push(TourismRecord {
                    country_name,
                    number_of_foreigners,
                }),
                Err(e) => {
                    warn!("Failed to parse visitor count {:?}: {}", count_text, e);
                    warn!("Offending row HTML: {}", row.html());
                }
            }
        }

        info!("Extracted {} records", records.len());
        Ok(records)
    }
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|e| ParserError::HtmlParseError(e.to_string()))
}

/// Text nodes trimmed, empty ones dropped, joined by a single space.
fn joined_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
