//! The capability a defense-vs-position page must offer, and parsing of the
//! table it renders.

use crate::cli::types::DefensePosition;
use crate::error::{IngestError, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

/// One data row of the results table, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// `data-team` attribute of the `.team-click` element in the first cell.
    pub team_abbr: Option<String>,
    /// Text of the second cell.
    pub value_text: String,
}

impl TableRow {
    pub fn new(team_abbr: Option<&str>, value_text: &str) -> Self {
        Self {
            team_abbr: team_abbr.map(str::to_string),
            value_text: value_text.to_string(),
        }
    }
}

/// A page with one clickable tab per position and a results table that
/// re-renders when a tab is activated.
#[async_trait]
pub trait DefenseTable: Send {
    /// Activate a position tab. Errors mean the tab could not be found or
    /// clicked.
    async fn activate_tab(&mut self, position: DefensePosition) -> Result<()>;

    /// Wait for the table to populate and return its data rows (header
    /// excluded).
    async fn read_table(&mut self) -> Result<Vec<TableRow>>;
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| IngestError::Scrape {
        message: format!("Failed to create selector {css}: {e}"),
    })
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Number of `<tr>` elements in a table's HTML, header included.
pub fn count_rows(html: &str) -> Result<usize> {
    let tr = selector("tr")?;
    Ok(Html::parse_fragment(html).select(&tr).count())
}

/// Parse the data rows of a results table. The first `<tr>` is the header;
/// rows with fewer than two cells are skipped.
pub fn parse_table_html(html: &str) -> Result<Vec<TableRow>> {
    let tr = selector("tr")?;
    let td = selector("td")?;
    let team_click = selector(".team-click")?;

    let document = Html::parse_fragment(html);
    let rows = document
        .select(&tr)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<ElementRef<'_>> = row.select(&td).collect();
            if cells.len() < 2 {
                return None;
            }
            let team_abbr = cells[0]
                .select(&team_click)
                .next()
                .and_then(|el| el.value().attr("data-team"))
                .map(|abbr| abbr.trim().to_string());
            Some(TableRow {
                team_abbr,
                value_text: cell_text(&cells[1]),
            })
        })
        .collect();

    Ok(rows)
}
