//! Zona search page extraction.

use scraper::Html;
use tracing::debug;

use super::{join_url, selector, ExtractError};
use crate::models::{LinkCandidate, MatchSignal};

/// One container per search result.
pub const RESULT_ITEM_SELECTOR: &str = ".results-item-wrap";
/// Release year inside a result container.
pub const RESULT_YEAR_SELECTOR: &str = ".results-item-year";
/// Link to the film page inside a result container.
pub const RESULT_LINK_SELECTOR: &str = "a";

/// Candidates whose listed year is exactly `year`, in page order.
///
/// Items with a missing or non-numeric year, or without a link, are skipped
/// without affecting the rest of the page.
pub fn year_matched_candidates(
    html: &str,
    year: i32,
    base_url: &str,
) -> Result<Vec<LinkCandidate>, ExtractError> {
    let document = Html::parse_document(html);
    let item_selector = selector(RESULT_ITEM_SELECTOR)?;
    let year_selector = selector(RESULT_YEAR_SELECTOR)?;
    let link_selector = selector(RESULT_LINK_SELECTOR)?;

    let mut candidates = Vec::new();

    for item in document.select(&item_selector) {
        let Some(year_element) = item.select(&year_selector).next() else {
            debug!("Result item without a year, skipping");
            continue;
        };

        let year_text = year_element.text().collect::<String>();
        let item_year = match year_text.trim().parse::<i32>() {
            Ok(y) => y,
            Err(_) => {
                debug!("Unparseable result year {:?}, skipping", year_text.trim());
                continue;
            }
        };
        if item_year != year {
            continue;
        }

        let Some(href) = item
            .select(&link_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
        else {
            debug!("Result item for {} without a link, skipping", year);
            continue;
        };

        candidates.push(LinkCandidate::new(
            join_url(base_url, href),
            MatchSignal::YearMatch(year),
        ));
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://zona.example";

    fn item(year: &str, href: Option<&str>) -> String {
        let link = href
            .map(|h| format!(r#"<a href="{}" class="results-item">Film</a>"#, h))
            .unwrap_or_default();
        format!(
            r#"<li class="results-item-wrap">{}<span class="results-item-year">{}</span></li>"#,
            link, year
        )
    }

    fn page(items: &[String]) -> String {
        format!(
            r#"<html><body><ul class="results">{}</ul></body></html>"#,
            items.concat()
        )
    }

    #[test]
    fn single_match_joins_base_and_href() {
        let html = page(&[item("2010", Some("/watch/55"))]);

        let candidates = year_matched_candidates(&html, 2010, BASE).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://zona.example/watch/55");
        assert_eq!(candidates[0].signal, MatchSignal::YearMatch(2010));
    }

    #[test]
    fn other_years_are_rejected() {
        let html = page(&[
            item("2009", Some("/watch/1")),
            item("2011", Some("/watch/2")),
        ]);
        assert!(year_matched_candidates(&html, 2010, BASE).unwrap().is_empty());
    }

    #[test]
    fn matches_keep_page_order() {
        let html = page(&[
            item("1995", Some("/movies/heat-tv")),
            item("1995", Some("/movies/heat")),
        ]);

        let candidates = year_matched_candidates(&html, 1995, BASE).unwrap();
        let urls: Vec<_> = candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://zona.example/movies/heat-tv",
                "https://zona.example/movies/heat"
            ]
        );
    }

    #[test]
    fn bad_year_does_not_abort_scan() {
        let html = page(&[
            item("скоро", Some("/watch/1")),
            item("", Some("/watch/2")),
            item(" 2010 ", Some("/watch/3")),
        ]);

        let candidates = year_matched_candidates(&html, 2010, BASE).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://zona.example/watch/3");
    }

    #[test]
    fn missing_pieces_are_skipped() {
        let html = page(&[
            r#"<li class="results-item-wrap"><a href="/watch/9">No year</a></li>"#.to_string(),
            item("2010", None),
            item("2010", Some("/watch/10")),
        ]);

        let candidates = year_matched_candidates(&html, 2010, BASE).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://zona.example/watch/10");
    }

    #[test]
    fn page_without_results_is_empty() {
        let html = "<html><body><p>Ничего не найдено</p></body></html>";
        assert!(year_matched_candidates(html, 2010, BASE).unwrap().is_empty());
    }
}
