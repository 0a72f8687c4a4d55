//! Shared HTML fixtures for integration tests
#![allow(dead_code)]

pub const BASE_URL: &str = "https://www.zaubacorp.com";

/// Search results page with a header row, three readable rows and one
/// row without a name.
pub const SEARCH_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Search results</title></head>
<body>
  <table id="results" class="table">
    <tbody>
      <tr><th>CIN</th><th>Name</th><th>Address</th></tr>
      <tr>
        <td><a href="/company/ACME-PRIVATE-LIMITED/U12345MH2000PTC000001">U12345MH2000PTC000001</a></td>
        <td>ACME PRIVATE LIMITED</td>
        <td>123 Street MH 400001</td>
      </tr>
      <tr>
        <td>L67890KA1995PLC000002</td>
        <td><a href="/company/ACME-LIMITED/L67890KA1995PLC000002">ACME  LIMITED</a></td>
        <td>N/A</td>
      </tr>
      <tr>
        <td>AAB-1234</td>
        <td>ACME PARTNERS LLP</td>
        <td></td>
      </tr>
      <tr>
        <td>U00000DL2010PTC000003</td>
        <td>   </td>
        <td>Somewhere DL 110001</td>
      </tr>
    </tbody>
  </table>
</body>
</html>"#;

/// Detail page covering every section the parser reads.
pub const DETAIL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h1 id="title">ACME PRIVATE LIMITED</h1>
  <span id="last_updated">Last Updated: 12 March 2024</span>
  <p id="about">ACME PRIVATE LIMITED is a private company incorporated on 01 January 2000.</p>

  <table class="table table-striped">
    <tr><td>CIN</td><td>U12345MH2000PTC000001</td></tr>
    <tr><td>Company Name</td><td>ACME PRIVATE LIMITED</td></tr>
    <tr><td>Company Status</td><td>Active</td></tr>
  </table>

  <table class="table table-striped table-hover">
    <tr><td>Authorised Capital</td><td>₹ 1,00,000</td></tr>
    <tr><td>Paid up capital</td><td><i class="lock"></i></td></tr>
  </table>

  <table class="table table-striped table-bordered">
    <caption>Current Directors &amp; Key Managerial Personnel</caption>
    <thead><tr><th>DIN</th><th>Name</th><th>Designation</th><th>Appointed</th></tr></thead>
    <tbody>
      <tr>
        <td>00000001</td>
        <td><a href="/director/JANE-DOE/00000001">JANE DOE</a></td>
        <td>Director</td>
        <td>01 January 2000</td>
      </tr>
      <tr>
        <td><a href="/director/JOHN-ROE/00000002">00000002</a></td>
        <td>JOHN ROE</td>
        <td>Managing Director</td>
        <td>15 June 2010</td>
      </tr>
    </tbody>
  </table>

  <div id="contact-details-content">
    <a class="__cf_email__" data-cfemail="422302206c212d">[email&#160;protected]</a>
    <span>Address:</span><span>123 Street MH 400001</span>
    <span>Website: https://acme.example</span>
  </div>

  <div id="charges-content">
    <table>
      <thead><tr><th>Charge ID</th><th>Created</th><th>Modified</th><th>Closed</th><th>Assets</th><th>Amount</th><th>Holder</th></tr></thead>
      <tbody>
        <tr><td>100001</td><td>01/02/2015</td><td>-</td><td>-</td><td>Book debts</td><td>2 Crore</td><td>State Bank</td></tr>
        <tr><td>100002</td><td>05/06/2012</td><td>-</td><td>10/10/2014</td><td>Land</td><td>50 Lakh</td><td>Other Bank</td></tr>
        <tr><td><i class="lock"></i></td><td>x</td><td>x</td><td>x</td><td>x</td><td>x</td><td>x</td></tr>
      </tbody>
    </table>
  </div>

  <div id="similar-address-content">
    <table>
      <thead><tr><th>CIN</th><th>Name</th><th>Address</th></tr></thead>
      <tbody>
        <tr><td><a href="/company/BETA/U11111MH2001PTC000010">U11111MH2001PTC000010</a></td><td><a href="/company/BETA/U11111MH2001PTC000010">BETA PRIVATE LIMITED</a></td><td>123 Street MH 400001</td></tr>
        <tr><td>U22222MH2002PTC000020</td><td>GAMMA PRIVATE LIMITED</td><td>123 Street MH 400001</td></tr>
      </tbody>
    </table>
  </div>
</body>
</html>"#;

/// Search page with `rows` generated body rows.
pub fn generated_search_page(rows: usize) -> String {
    let body: String = (1..=rows)
        .map(|i| {
            format!(
                r#"<tr><td><a href="/company/CO-{i}/U{i:05}MH2000PTC000001">U{i:05}MH2000PTC000001</a></td><td>COMPANY {i} PRIVATE LIMITED</td><td>{i} Street MH 400001</td></tr>"#
            )
        })
        .collect();
    format!(r#"<html><body><table id="results"><tbody>{body}</tbody></table></body></html>"#)
}
