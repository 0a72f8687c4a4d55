//! Company detail page parsing
mod common;

use corp_registry_lib::infrastructure::parsing::{
    CompanyDetailParser, DetailParseContext, ParsingConfig, ParsingError,
};

use common::{BASE_URL, DETAIL_PAGE};

fn context() -> DetailParseContext {
    DetailParseContext::new(BASE_URL)
        .unwrap()
        .with_url("https://www.zaubacorp.com/company/ACME-PRIVATE-LIMITED/U12345MH2000PTC000001")
}

#[test]
fn full_page_fills_every_section() {
    let detail = CompanyDetailParser::new().unwrap().parse(DETAIL_PAGE, &context()).unwrap();

    assert_eq!(detail.company_name.as_deref(), Some("ACME PRIVATE LIMITED"));
    assert_eq!(detail.last_updated.as_deref(), Some("Last Updated: 12 March 2024"));
    assert!(detail.description.as_deref().unwrap().starts_with("ACME PRIVATE LIMITED is a private company"));

    assert_eq!(
        detail.basic_info.keys().collect::<Vec<_>>(),
        vec!["CIN", "Company Name", "Company Status"]
    );
    assert_eq!(detail.basic_info["Company Status"], "Active");

    assert_eq!(detail.financial_info.len(), 1);
    assert_eq!(detail.financial_info["Authorised Capital"], "₹ 1,00,000");

    assert_eq!(detail.directors.len(), 2);
    assert_eq!(detail.directors[0].din, "00000001");
    assert_eq!(detail.directors[0].name, "JANE DOE");
    assert_eq!(
        detail.directors[0].detail_url.as_deref(),
        Some("https://www.zaubacorp.com/director/JANE-DOE/00000001")
    );
    assert_eq!(
        detail.directors[1].detail_url.as_deref(),
        Some("https://www.zaubacorp.com/director/JOHN-ROE/00000002")
    );

    assert_eq!(detail.contact_info["email"], "Protected Email");
    assert_eq!(detail.contact_info["address"], "123 Street MH 400001");
    assert_eq!(detail.contact_info["website"], "https://acme.example");

    assert_eq!(detail.charges.len(), 2);
    assert_eq!(detail.open_charges().count(), 1);
    assert_eq!(detail.total_charge_amount(), Some(25_000_000.0));

    assert_eq!(detail.similar_companies.len(), 2);
    assert_eq!(detail.similar_companies[0].name, "BETA PRIVATE LIMITED");
    assert!(detail.similar_companies[0].name_url.is_some());
    assert_eq!(detail.similar_companies[1].cin_url, None);
}

#[test]
fn decoding_protected_email_is_opt_in() {
    let config = ParsingConfig {
        decode_protected_email: true,
        ..ParsingConfig::default()
    };
    let detail = CompanyDetailParser::with_config(&config)
        .unwrap()
        .parse(DETAIL_PAGE, &context())
        .unwrap();
    assert_eq!(detail.contact_info["email"], "a@b.co");
}

#[test]
fn missing_sections_leave_fields_empty() {
    let html = r#"<html><body><h1 id="title">LONE COMPANY</h1></body></html>"#;
    let detail = CompanyDetailParser::new().unwrap().parse(html, &context()).unwrap();

    assert_eq!(detail.company_name.as_deref(), Some("LONE COMPANY"));
    assert!(detail.basic_info.is_empty());
    assert!(detail.directors.is_empty());
    assert!(detail.contact_info.is_empty());
    assert!(detail.charges.is_empty());
    assert!(detail.similar_companies.is_empty());
}

#[test]
fn directors_table_without_caption_is_ignored() {
    let html = DETAIL_PAGE.replace("Current Directors", "Past Directors");
    let detail = CompanyDetailParser::new().unwrap().parse(&html, &context()).unwrap();
    assert!(detail.directors.is_empty());
    assert_eq!(detail.charges.len(), 2);
}

#[test]
fn blank_input_is_rejected_but_textless_markup_is_empty() {
    let parser = CompanyDetailParser::new().unwrap();
    assert!(matches!(
        parser.parse("", &context()),
        Err(ParsingError::EmptyDocument { url: Some(_) })
    ));

    let detail = parser.parse("<html><body>\n</body></html>", &context()).unwrap();
    assert!(detail.is_empty());
}

#[test]
fn reparsing_is_deterministic() {
    let parser = CompanyDetailParser::new().unwrap();
    let first = serde_json::to_string(&parser.parse(DETAIL_PAGE, &context()).unwrap()).unwrap();
    let second = serde_json::to_string(&parser.parse(DETAIL_PAGE, &context()).unwrap()).unwrap();
    assert_eq!(first, second);
}
