use serde_json::Value;
use tracing::{debug, info};

use crate::config::PickerConfig;
use crate::error::FetchError;

/// Keys that carry a country's display name, checked in order.
const NAME_KEYS: [&str; 3] = ["name", "country", "countryName"];

pub struct CountryFetcher {
    client: reqwest::blocking::Client,
    url: String,
}

impl CountryFetcher {
    pub fn new(config: &PickerConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| FetchError::Unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.api_url.clone(),
        })
    }

    /// One GET against the endpoint. Never retries.
    pub fn fetch_countries(&self) -> Result<Vec<String>, FetchError> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let data: Value = serde_json::from_str(&body).map_err(|e| {
            debug!("Response body is not JSON: {}", e);
            FetchError::InvalidJson
        })?;

        let countries = parse_countries(&data)?;
        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }
}

/// Turns the endpoint's JSON array into sorted display names.
///
/// Records without a usable name are skipped. An empty array yields an empty
/// list; a non-empty array where no record has a name is a format error.
pub fn parse_countries(data: &Value) -> Result<Vec<String>, FetchError> {
    let records = data.as_array().ok_or(FetchError::UnexpectedFormat)?;

    let mut countries = records.iter().filter_map(country_name).collect::<Vec<_>>();

    let skipped = records.len() - countries.len();
    if skipped > 0 {
        debug!("Skipped {} records without a country name", skipped);
    }
    if countries.is_empty() && !records.is_empty() {
        return Err(FetchError::UnexpectedFormat);
    }

    countries.sort();
    Ok(countries)
}

fn country_name(record: &Value) -> Option<String> {
    let record = record.as_object()?;

    NAME_KEYS.iter().find_map(|key| {
        let name = match record.get(*key)? {
            Value::String(s) => s.as_str(),
            // restcountries-style `{"name": {"common": "..."}}`
            Value::Object(inner) => inner.get("common")?.as_str()?,
            _ => return None,
        };
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::{Duration, Instant};

    /// Serves one canned HTTP response on a local port and returns its URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        });

        format!("http://{}/countries", addr)
    }

    fn fetcher_for(url: String) -> CountryFetcher {
        // bypass any proxy configured in the environment
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        CountryFetcher { client, url }
    }

    #[test]
    fn builds_from_config() {
        let fetcher = CountryFetcher::new(&PickerConfig::default()).unwrap();
        assert_eq!(fetcher.url, crate::config::DEFAULT_API_URL);
    }

    #[test]
    fn parses_and_sorts_names() {
        let data = json!([
            {"name": "Switzerland", "code": "CH"},
            {"name": "France", "code": "FR"},
            {"name": "Germany", "code": "DE"}
        ]);
        assert_eq!(
            parse_countries(&data).unwrap(),
            vec!["France", "Germany", "Switzerland"]
        );
    }

    #[test]
    fn sorting_is_case_sensitive() {
        let data = json!([{"name": "aland"}, {"name": "Zambia"}, {"name": "Austria"}]);
        assert_eq!(
            parse_countries(&data).unwrap(),
            vec!["Austria", "Zambia", "aland"]
        );
    }

    #[test]
    fn empty_array_is_an_empty_list() {
        assert!(parse_countries(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn records_without_a_name_are_skipped() {
        let data = json!([
            {"name": "Brazil", "code": "BR"},
            {"country": "Argentina", "code": "AR"},
            {"countryName": "Japan", "code": "JP"},
            {"invalid": "data"},
            {"name": "   "},
            {"name": 42},
            "Chile"
        ]);
        let countries = parse_countries(&data).unwrap();
        assert_eq!(countries, vec!["Argentina", "Brazil", "Japan"]);
    }

    #[test]
    fn nested_common_name_is_recognized() {
        let data = json!([{"name": {"common": "Iceland", "official": "Iceland"}}]);
        assert_eq!(parse_countries(&data).unwrap(), vec!["Iceland"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let data = json!([{"name": "Chad"}, {"name": "Chad"}]);
        assert_eq!(parse_countries(&data).unwrap().len(), 2);
    }

    #[test]
    fn only_nameless_records_is_a_format_error() {
        let data = json!([{"wrong_key": "Value"}]);
        assert_eq!(parse_countries(&data), Err(FetchError::UnexpectedFormat));
    }

    #[test]
    fn non_array_is_a_format_error() {
        let data = json!({"countries": [{"name": "Peru"}]});
        assert_eq!(parse_countries(&data), Err(FetchError::UnexpectedFormat));
    }

    #[test]
    fn fetches_from_endpoint() {
        let url = serve_once("200 OK", r#"[{"name": "Mexico"}, {"name": "Canada"}]"#);
        let countries = fetcher_for(url).fetch_countries().unwrap();
        assert_eq!(countries, vec!["Canada", "Mexico"]);
    }

    #[test]
    fn invalid_json_body() {
        let url = serve_once("200 OK", "<html>maintenance</html>");
        assert_eq!(
            fetcher_for(url).fetch_countries(),
            Err(FetchError::InvalidJson)
        );
    }

    #[test]
    fn non_success_status_is_a_network_error() {
        let url = serve_once("503 Service Unavailable", "[]");
        let err = fetcher_for(url).fetch_countries().unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
    }

    #[test]
    fn request_timeout_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            // accept, then never answer
            let (_stream, _) = listener.accept().unwrap();
            std::thread::sleep(Duration::from_secs(5));
        });

        let config = PickerConfig {
            api_url: format!("http://{}/countries", addr),
            request_timeout: Duration::from_millis(300),
            ..PickerConfig::default()
        };
        let fetcher = CountryFetcher::new(&config).unwrap();

        let started = Instant::now();
        let err = fetcher.fetch_countries().unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn connection_refused_is_a_network_error() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        // listener dropped, nothing is accepting on this port
        let err = fetcher_for(format!("http://{}/countries", addr))
            .fetch_countries()
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("Network error:"));
    }
}
