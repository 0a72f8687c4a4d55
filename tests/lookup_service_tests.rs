//! End-to-end lookups against an in-memory page source
mod common;

use corp_registry_lib::application::CompanyLookupService;
use corp_registry_lib::infrastructure::{AppConfig, StaticPageFetcher};

use common::{DETAIL_PAGE, SEARCH_PAGE};

const ACME_SEARCH_URL: &str = "https://www.zaubacorp.com/companysearchresults/ACME";
const BETA_SEARCH_URL: &str = "https://www.zaubacorp.com/companysearchresults/BETA%20CORP";
const ACME_DETAIL_URL: &str = "https://www.zaubacorp.com/company/ACME-PRIVATE-LIMITED/U12345MH2000PTC000001";
const ACME_LIMITED_DETAIL_URL: &str = "https://www.zaubacorp.com/company/ACME-LIMITED/L67890KA1995PLC000002";
const TEXTLESS_PAGE: &str = "<html><body>\n  </body></html>";

fn detail_page_with_incorporation_date() -> String {
    DETAIL_PAGE.replace(
        "<tr><td>Company Status</td><td>Active</td></tr>",
        "<tr><td>Company Status</td><td>Active</td></tr>\n    <tr><td>Date of Incorporation</td><td>01 January 2000</td></tr>",
    )
}

fn service(fetcher: StaticPageFetcher) -> CompanyLookupService<StaticPageFetcher> {
    CompanyLookupService::new(fetcher, &AppConfig::default()).unwrap()
}

#[tokio::test]
async fn search_then_open_first_result() {
    let fetcher = StaticPageFetcher::new()
        .with_page(ACME_SEARCH_URL, SEARCH_PAGE)
        .with_page(ACME_DETAIL_URL, DETAIL_PAGE);
    let service = service(fetcher);

    let summaries = service.search("acme", 10).await;
    assert_eq!(summaries.len(), 3);

    let detail = service.detail_for(&summaries[0]).await.unwrap();
    assert_eq!(detail.display_name(), Some("ACME PRIVATE LIMITED"));
    assert_eq!(detail.directors.len(), 2);

    assert_eq!(service.fetcher().requests(), vec![ACME_SEARCH_URL, ACME_DETAIL_URL]);
}

#[tokio::test]
async fn search_respects_max_results() {
    let service = service(StaticPageFetcher::new().with_page(ACME_SEARCH_URL, SEARCH_PAGE));
    assert_eq!(service.search("ACME", 1).await.len(), 1);
    assert!(service.search("ACME", 0).await.is_empty());
}

#[tokio::test]
async fn batch_search_tags_hits_with_their_term() {
    let fetcher = StaticPageFetcher::new()
        .with_page(ACME_SEARCH_URL, SEARCH_PAGE)
        .with_page(BETA_SEARCH_URL, "<html><body><p>No results</p></body></html>");
    let service = service(fetcher);

    let hits = service.batch_search(&["acme", "beta corp", "missing"], 2).await;
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|hit| hit.search_term == "acme"));

    let json = serde_json::to_value(&hits[0]).unwrap();
    assert_eq!(json["search_term"], "acme");
    assert_eq!(json["name"], "ACME PRIVATE LIMITED");
    assert_eq!(service.fetcher().requests().len(), 3);
}

#[tokio::test]
async fn unparseable_detail_page_is_none() {
    let service = service(StaticPageFetcher::new().with_page(ACME_DETAIL_URL, "   "));
    assert!(service.detail(ACME_DETAIL_URL).await.is_none());
}

#[tokio::test]
async fn textless_detail_page_is_an_empty_detail() {
    let service = service(StaticPageFetcher::new().with_page(ACME_DETAIL_URL, TEXTLESS_PAGE));
    let detail = service.detail(ACME_DETAIL_URL).await.unwrap();
    assert!(detail.is_empty());
}

#[tokio::test]
async fn batch_details_stop_at_the_limit_and_count_failures() {
    let detail_page = detail_page_with_incorporation_date();
    let fetcher = StaticPageFetcher::new()
        .with_page(ACME_SEARCH_URL, SEARCH_PAGE)
        .with_page(ACME_DETAIL_URL, &detail_page)
        .with_page(ACME_LIMITED_DETAIL_URL, TEXTLESS_PAGE);
    let service = service(fetcher);

    let hits = service.batch_search(&["acme"], 10).await;
    assert_eq!(hits.len(), 3);

    let batch = service.batch_details(&hits, 2).await;
    assert_eq!((batch.succeeded, batch.failed), (1, 1));
    assert_eq!(batch.profiles[0].search_term, "acme");
    assert_eq!(batch.profiles[0].summary.name, "ACME PRIVATE LIMITED");
    assert_eq!(
        service.fetcher().requests(),
        vec![ACME_SEARCH_URL, ACME_DETAIL_URL, ACME_LIMITED_DETAIL_URL]
    );

    // the LLP row has no detail link
    let all = service.batch_details(&hits, 50).await;
    assert_eq!((all.succeeded, all.failed), (1, 2));
}

#[tokio::test]
async fn portfolio_summary_of_fetched_details() {
    let detail_page = detail_page_with_incorporation_date();
    let fetcher = StaticPageFetcher::new()
        .with_page(ACME_SEARCH_URL, SEARCH_PAGE)
        .with_page(ACME_DETAIL_URL, &detail_page);
    let service = service(fetcher);

    let hits = service.batch_search(&["acme"], 1).await;
    let summary = service.batch_details(&hits, 10).await.summary();

    assert_eq!(summary.companies, 1);
    assert_eq!(summary.capital.companies_with_capital_data, 1);
    assert_eq!(summary.capital.authorised_capital.mean, 100_000.0);
    assert_eq!(summary.capital.paid_up_capital.count, 0);
    assert_eq!(summary.directors.director_count.mean, 2.0);
    assert_eq!(summary.charges.total_charges, 2);
    assert_eq!(summary.charges.charge_amount.max, 20_000_000.0);
    assert_eq!(summary.charges.charge_amount.min, 5_000_000.0);
    assert_eq!(summary.geography.state_distribution["Maharashtra"], 1);
    assert_eq!(summary.incorporation.year_range, Some((2000, 2000)));
}

#[test]
fn saved_pages_parse_without_fetching() {
    let service = service(StaticPageFetcher::new());
    assert_eq!(service.parse_search_page(SEARCH_PAGE, 50).len(), 3);

    let detail = service.parse_detail_page(DETAIL_PAGE, None).unwrap();
    assert_eq!(detail.charges.len(), 2);
    assert!(service.fetcher().requests().is_empty());
}
