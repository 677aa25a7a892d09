//! Blocking client for the TraderMade market data REST API.

use std::fmt;

use serde_json::Value;

use crate::{
    errors::truncate_body,
    request::{Endpoint, RequestBuilder, DEFAULT_BASE_URL},
    transport::{HttpTransport, Transport},
    validation, Error,
};

type Connector = Box<dyn Fn() -> Result<Box<dyn Transport>, Error> + Send + Sync>;

/// Request builder and transport bound to one API key.
struct Session {
    requests: RequestBuilder,
    transport: Box<dyn Transport>,
}

/// Client for the TraderMade REST API, one method per remote operation.
///
/// Every data method fails with [`Error::NotConfigured`] until
/// [`set_rest_api_key`](Self::set_rest_api_key) has succeeded. Arguments are
/// validated before anything is sent, and the response body is returned as a
/// parsed JSON document.
///
/// Calls block until the round trip completes. Setting the key takes
/// `&mut self`, so sharing a configured client across threads needs external
/// synchronization only if the key may change.
pub struct TraderMade {
    /// Base URL for the API. Defaults to `https://marketdata.tradermade.com/api/v1`.
    base_api_url: String,
    api_key: String,
    connect: Connector,
    session: Option<Session>,
}

impl fmt::Debug for TraderMade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraderMade")
            .field("base_api_url", &self.base_api_url)
            .field("configured", &self.session.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for TraderMade {
    fn default() -> Self {
        Self::new()
    }
}

impl TraderMade {
    /// Creates an unconfigured client pointing at the production API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates an unconfigured client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_transport(base_url, HttpTransport::new)
    }

    /// Creates an unconfigured client whose transport comes from `connect`.
    ///
    /// `connect` runs once per successful [`set_rest_api_key`](Self::set_rest_api_key).
    pub fn with_transport<F, T>(base_url: &str, connect: F) -> Self
    where
        F: Fn() -> Result<T, Error> + Send + Sync + 'static,
        T: Transport + 'static,
    {
        Self {
            base_api_url: base_url.to_string(),
            api_key: String::new(),
            connect: Box::new(move || Ok(Box::new(connect()?) as Box<dyn Transport>)),
            session: None,
        }
    }

    /// Validates and stores the trimmed key, then binds a fresh transport to it.
    ///
    /// On failure the previous key and transport are left untouched.
    pub fn set_rest_api_key(&mut self, key: &str) -> Result<(), Error> {
        let key = validation::validate_api_key(key)?;
        let transport = (self.connect)()?;
        self.session = Some(Session {
            requests: RequestBuilder::new(&self.base_api_url, &key),
            transport,
        });
        self.api_key = key;
        Ok(())
    }

    /// The stored (trimmed) API key, or `""` if none was set.
    pub fn rest_api_key(&self) -> &str {
        &self.api_key
    }

    fn session(&self) -> Result<&Session, Error> {
        self.session.as_ref().ok_or(Error::NotConfigured)
    }

    fn get(&self, session: &Session, endpoint: Endpoint) -> Result<Value, Error> {
        tracing::debug!(path = endpoint.path(), "GET");
        let url = session.requests.build_endpoint(&endpoint);
        let body = session.transport.get(&url)?;
        serde_json::from_str(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::MalformedResponse {
                reason: e.to_string(),
                body: snippet,
            }
        })
    }

    fn get_list(&self, path: &str) -> Result<Value, Error> {
        let session = self.session()?;
        self.get(session, Endpoint::new(path))
    }

    /// Live quotes for one or more comma-separated currency pairs.
    pub fn get_live_rates(&self, currency: &str) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[("currency", currency)])?;
        self.get(session, Endpoint::new("/live").with_param("currency", currency))
    }

    pub fn get_live_currency_list(&self) -> Result<Value, Error> {
        self.get_list("/live_currencies_list")
    }

    pub fn get_streaming_currency_list(&self) -> Result<Value, Error> {
        self.get_list("/streaming_currencies_list")
    }

    pub fn get_crypto_list(&self) -> Result<Value, Error> {
        self.get_list("/live_crypto_list")
    }

    pub fn get_historical_currency_list(&self) -> Result<Value, Error> {
        self.get_list("/historical_currencies_list")
    }

    pub fn get_cfd_list(&self) -> Result<Value, Error> {
        self.get_list("/cfd_list")
    }

    /// Daily close for `symbol` on `date` (`YYYY-MM-DD`).
    pub fn get_historical_rates(&self, date: &str, symbol: &str) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[("date", date), ("symbol", symbol)])?;
        self.get(
            session,
            Endpoint::new("/historical")
                .with_param("currency", symbol)
                .with_param("date", date),
        )
    }

    /// Hourly bar for `symbol` at `date_time` (`YYYY-MM-DD-HH:00`).
    pub fn get_hourly_historical_data(&self, date_time: &str, symbol: &str) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[("date_time", date_time), ("symbol", symbol)])?;
        self.get(
            session,
            Endpoint::new("/hour_historical")
                .with_param("date_time", date_time)
                .with_param("currency", symbol),
        )
    }

    /// Minute bar for `symbol` at `date_time` (`YYYY-MM-DD-HH:MM`).
    pub fn get_minute_historical_data(&self, date_time: &str, symbol: &str) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[("date_time", date_time), ("symbol", symbol)])?;
        self.get(
            session,
            Endpoint::new("/minute_historical")
                .with_param("date_time", date_time)
                .with_param("currency", symbol),
        )
    }

    /// Raw ticks for `symbol` between two timestamps.
    ///
    /// `format` is optional here: an empty string leaves it out of the query.
    pub fn get_tick_historical_data(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        format: &str,
    ) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[
            ("symbol", symbol),
            ("start_date", start_date),
            ("end_date", end_date),
        ])?;
        self.get(
            session,
            Endpoint::tick("/tick_historical", symbol, start_date, end_date)
                .with_optional_param("format", format),
        )
    }

    /// Sample ticks for `symbol` between two timestamps.
    ///
    /// Unlike [`get_tick_historical_data`](Self::get_tick_historical_data), `format` is required.
    pub fn get_tick_historical_data_sample(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        format: &str,
    ) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[
            ("symbol", symbol),
            ("start_date", start_date),
            ("end_date", end_date),
            ("format", format),
        ])?;
        self.get(
            session,
            Endpoint::tick("/tick_historical_sample", symbol, start_date, end_date)
                .with_param("format", format),
        )
    }

    /// OHLC series for `currency`.
    ///
    /// Checks run in order: required arguments, `format`, `interval`, then
    /// `period` against the interval's table. The first failure is returned.
    pub fn get_time_series_data(
        &self,
        currency: &str,
        start_date: &str,
        end_date: &str,
        interval: &str,
        period: &str,
        format: &str,
    ) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[
            ("currency", currency),
            ("start_date", start_date),
            ("end_date", end_date),
        ])?;
        let format = validation::validate_time_series_format(format)?;
        let interval = validation::validate_interval(interval)?;
        let period = validation::validate_period(interval, period)?;
        self.get(
            session,
            Endpoint::new("/timeseries")
                .with_param("currency", currency)
                .with_param("start_date", start_date)
                .with_param("end_date", end_date)
                .with_param("interval", interval.as_str())
                .with_param("period", &period.to_string())
                .with_param("format", format.as_str()),
        )
    }

    pub fn get_open_market_status(&self) -> Result<Value, Error> {
        self.get_list("/market_open_status")
    }

    pub fn get_market_open_timing(&self) -> Result<Value, Error> {
        self.get_list("/market_opening_times")
    }

    /// Converts `amount` of `from` into `to`. The amount is sent with six decimals.
    pub fn get_currency_conversion(&self, from: &str, to: &str, amount: f64) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[("from", from), ("to", to)])?;
        let amount = validation::format_amount(amount)?;
        self.get(
            session,
            Endpoint::new("/convert")
                .with_param("from", from)
                .with_param("to", to)
                .with_param("amount", &amount),
        )
    }

    /// Tabular export shaped for a pandas DataFrame.
    pub fn get_data_as_pandas_data_frame(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
        format: &str,
        fields: &str,
    ) -> Result<Value, Error> {
        let session = self.session()?;
        validation::require(&[
            ("symbol", symbol),
            ("start_date", start_date),
            ("end_date", end_date),
        ])?;
        let format = validation::validate_export_format(format)?;
        let fields = validation::validate_export_fields(fields)?;
        self.get(
            session,
            Endpoint::new("/pandasDF")
                .with_param("currency", symbol)
                .with_param("start_date", start_date)
                .with_param("end_date", end_date)
                .with_param("format", format.as_str())
                .with_param("fields", fields.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Transport stub that records every URL and answers with a fixed body.
    #[derive(Clone)]
    struct Stub {
        body: String,
        urls: Arc<Mutex<Vec<String>>>,
    }

    impl Transport for Stub {
        fn get(&self, url: &str) -> Result<String, Error> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    fn client_with(body: &str) -> (TraderMade, Arc<Mutex<Vec<String>>>) {
        let stub = Stub {
            body: body.to_string(),
            urls: Arc::new(Mutex::new(Vec::new())),
        };
        let urls = stub.urls.clone();
        let mut client = TraderMade::with_transport(DEFAULT_BASE_URL, move || Ok(stub.clone()));
        client.set_rest_api_key("abc123").unwrap();
        (client, urls)
    }

    fn sent(urls: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        urls.lock().unwrap().clone()
    }

    #[test]
    fn unconfigured_client_fails_every_call() {
        let client = TraderMade::new();
        assert!(matches!(client.get_live_rates("EURUSD"), Err(Error::NotConfigured)));
        assert!(matches!(client.get_cfd_list(), Err(Error::NotConfigured)));
        assert!(matches!(
            client.get_currency_conversion("EUR", "USD", 1.0),
            Err(Error::NotConfigured)
        ));
        assert_eq!(client.rest_api_key(), "");
    }

    #[test]
    fn not_configured_reported_before_validation() {
        let client = TraderMade::new();
        assert!(matches!(client.get_live_rates(""), Err(Error::NotConfigured)));
    }

    #[test]
    fn key_is_trimmed_and_stored() {
        let mut client = TraderMade::new();
        client.set_rest_api_key("  abc123  ").unwrap();
        assert_eq!(client.rest_api_key(), "abc123");
    }

    #[test]
    fn blank_key_rejected_and_previous_kept() {
        let (mut client, _) = client_with("{}");
        assert!(matches!(client.set_rest_api_key("   "), Err(Error::InvalidArgument(_))));
        assert!(matches!(client.set_rest_api_key(""), Err(Error::InvalidArgument(_))));
        assert_eq!(client.rest_api_key(), "abc123");
    }

    #[test]
    fn failed_connector_keeps_previous_key() {
        let calls = Arc::new(Mutex::new(0));
        let urls = Arc::new(Mutex::new(Vec::new()));
        let (counter, log) = (calls.clone(), urls.clone());
        let mut client = TraderMade::with_transport(DEFAULT_BASE_URL, move || {
            let mut n = counter.lock().unwrap();
            *n += 1;
            if *n > 1 {
                return Err(Error::Transport("connector unavailable".to_string()));
            }
            Ok(Stub {
                body: "{}".to_string(),
                urls: log.clone(),
            })
        });
        client.set_rest_api_key("first").unwrap();
        assert!(matches!(client.set_rest_api_key("second"), Err(Error::Transport(_))));
        assert_eq!(client.rest_api_key(), "first");
        client.get_cfd_list().unwrap();
        assert_eq!(
            sent(&urls),
            vec!["https://marketdata.tradermade.com/api/v1/cfd_list?api_key=first"]
        );
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[test]
    fn resetting_key_rebinds_transport() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let mut client = TraderMade::with_transport(DEFAULT_BASE_URL, move || {
            *counter.lock().unwrap() += 1;
            Ok(Stub {
                body: "{}".to_string(),
                urls: Arc::new(Mutex::new(Vec::new())),
            })
        });
        client.set_rest_api_key("one").unwrap();
        client.set_rest_api_key("two").unwrap();
        assert_eq!(*calls.lock().unwrap(), 2);
        assert_eq!(client.rest_api_key(), "two");
    }

    #[test]
    fn new_key_used_in_subsequent_requests() {
        let (mut client, urls) = client_with("{}");
        client.set_rest_api_key("second").unwrap();
        client.get_cfd_list().unwrap();
        assert!(sent(&urls)[0].contains("api_key=second"));
    }

    #[test]
    fn parses_document() {
        let (client, _) = client_with(r#"{"quotes":[]}"#);
        let doc = client.get_live_rates("EURUSD").unwrap();
        assert_eq!(doc, serde_json::json!({"quotes": []}));
    }

    #[test]
    fn malformed_body_is_reported() {
        let (client, _) = client_with("not json");
        match client.get_live_rates("EURUSD") {
            Err(Error::MalformedResponse { body, .. }) => assert_eq!(body, "not json"),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn live_rates_url() {
        let (client, urls) = client_with("{}");
        client.get_live_rates("EUR/USD").unwrap();
        assert_eq!(
            sent(&urls),
            vec!["https://marketdata.tradermade.com/api/v1/live?api_key=abc123&currency=EUR%2FUSD"]
        );
    }

    #[test]
    fn list_endpoints_carry_only_key() {
        let (client, urls) = client_with("{}");
        client.get_live_currency_list().unwrap();
        client.get_streaming_currency_list().unwrap();
        client.get_crypto_list().unwrap();
        client.get_historical_currency_list().unwrap();
        client.get_cfd_list().unwrap();
        client.get_open_market_status().unwrap();
        client.get_market_open_timing().unwrap();
        let paths: Vec<String> = sent(&urls)
            .iter()
            .map(|u| u.trim_start_matches(DEFAULT_BASE_URL).to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/live_currencies_list?api_key=abc123",
                "/streaming_currencies_list?api_key=abc123",
                "/live_crypto_list?api_key=abc123",
                "/historical_currencies_list?api_key=abc123",
                "/cfd_list?api_key=abc123",
                "/market_open_status?api_key=abc123",
                "/market_opening_times?api_key=abc123",
            ]
        );
    }

    #[test]
    fn historical_endpoints() {
        let (client, urls) = client_with("{}");
        client.get_historical_rates("2024-01-02", "EURUSD").unwrap();
        client.get_hourly_historical_data("2024-01-02-10:00", "EURUSD").unwrap();
        client.get_minute_historical_data("2024-01-02-10:30", "GBPUSD").unwrap();
        let urls = sent(&urls);
        insta::assert_snapshot!(&urls[0], @"https://marketdata.tradermade.com/api/v1/historical?api_key=abc123&currency=EURUSD&date=2024-01-02");
        insta::assert_snapshot!(&urls[1], @"https://marketdata.tradermade.com/api/v1/hour_historical?api_key=abc123&currency=EURUSD&date_time=2024-01-02-10%3A00");
        insta::assert_snapshot!(&urls[2], @"https://marketdata.tradermade.com/api/v1/minute_historical?api_key=abc123&currency=GBPUSD&date_time=2024-01-02-10%3A30");
    }

    #[test]
    fn historical_requires_arguments() {
        let (client, urls) = client_with("{}");
        assert!(client.get_historical_rates("", "EURUSD").is_err());
        assert!(client.get_hourly_historical_data("2024-01-02-10:00", "").is_err());
        assert!(client.get_minute_historical_data("", "").is_err());
        assert!(sent(&urls).is_empty());
    }

    #[test]
    fn tick_historical_without_format_omits_param() {
        let (client, urls) = client_with("{}");
        client
            .get_tick_historical_data("EURUSD", "2026-01-08 15:00", "2026-01-08 15:30", "")
            .unwrap();
        let url = &sent(&urls)[0];
        assert!(!url.contains("format="));
        assert!(url.ends_with(
            "/tick_historical/EURUSD/2026-01-08%2015%3A00/2026-01-08%2015%3A30?api_key=abc123"
        ));
    }

    #[test]
    fn tick_historical_with_format() {
        let (client, urls) = client_with("{}");
        client
            .get_tick_historical_data("EURUSD", "2026-01-08 15:00", "2026-01-08 15:30", "csv")
            .unwrap();
        assert!(sent(&urls)[0].ends_with("?api_key=abc123&format=csv"));
    }

    #[test]
    fn tick_sample_requires_format() {
        let (client, urls) = client_with("{}");
        let err = client
            .get_tick_historical_data_sample("EURUSD", "2026-01-08 15:00", "2026-01-08 15:30", "")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref m) if m == "format is required"));
        assert!(sent(&urls).is_empty());
    }

    #[test]
    fn tick_sample_url() {
        let (client, urls) = client_with("{}");
        client
            .get_tick_historical_data_sample("GBPUSD", "2026-01-08 15:00", "2026-01-08 15:30", "json")
            .unwrap();
        let url = sent(&urls).remove(0);
        insta::assert_snapshot!(url, @"https://marketdata.tradermade.com/api/v1/tick_historical_sample/GBPUSD/2026-01-08%2015%3A00/2026-01-08%2015%3A30?api_key=abc123&format=json");
    }

    #[test]
    fn time_series_url() {
        let (client, urls) = client_with("{}");
        client
            .get_time_series_data("EURUSD", "2024-01-01", "2024-01-05", "hourly", "4", "records")
            .unwrap();
        let url = sent(&urls).remove(0);
        insta::assert_snapshot!(url, @"https://marketdata.tradermade.com/api/v1/timeseries?api_key=abc123&currency=EURUSD&end_date=2024-01-05&format=records&interval=hourly&period=4&start_date=2024-01-01");
    }

    #[test]
    fn time_series_bad_period_lists_choices() {
        let (client, urls) = client_with("{}");
        let err = client
            .get_time_series_data("EURUSD", "2024-01-01", "2024-01-05", "hourly", "3", "records")
            .unwrap_err();
        match err {
            Error::InvalidArgument(msg) => assert!(msg.contains("1, 2, 4, 6, 8, 24")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(sent(&urls).is_empty());
    }

    #[test]
    fn time_series_format_checked_before_interval_and_period() {
        let (client, _) = client_with("{}");
        let err = client
            .get_time_series_data("EURUSD", "2024-01-01", "2024-01-05", "yearly", "x", "bogus")
            .unwrap_err();
        assert!(err.to_string().contains("format 'bogus'"));
    }

    #[test]
    fn time_series_interval_checked_before_period() {
        let (client, _) = client_with("{}");
        let err = client
            .get_time_series_data("EURUSD", "2024-01-01", "2024-01-05", "yearly", "x", "csv")
            .unwrap_err();
        assert!(err.to_string().contains("interval 'yearly'"));
    }

    #[test]
    fn time_series_emptiness_checked_first() {
        let (client, _) = client_with("{}");
        let err = client
            .get_time_series_data("", "2024-01-01", "2024-01-05", "yearly", "x", "bogus")
            .unwrap_err();
        assert!(err.to_string().contains("currency is required"));
    }

    #[test]
    fn conversion_renders_amount() {
        let (client, urls) = client_with("{}");
        client.get_currency_conversion("EUR", "USD", 100.0).unwrap();
        let url = sent(&urls).remove(0);
        insta::assert_snapshot!(url, @"https://marketdata.tradermade.com/api/v1/convert?api_key=abc123&amount=100.000000&from=EUR&to=USD");
    }

    #[test]
    fn conversion_requires_from_and_to() {
        let (client, urls) = client_with("{}");
        let err = client.get_currency_conversion("", "USD", 100.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref m) if m == "from is required"));
        let err = client.get_currency_conversion("EUR", "", 100.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(ref m) if m == "to is required"));
        assert!(sent(&urls).is_empty());
    }

    #[test]
    fn conversion_rejects_non_finite_amount() {
        let (client, urls) = client_with("{}");
        assert!(matches!(
            client.get_currency_conversion("EUR", "USD", f64::NAN),
            Err(Error::InvalidArgument(_))
        ));
        assert!(sent(&urls).is_empty());
    }

    #[test]
    fn pandas_requires_symbol_and_dates() {
        let (client, urls) = client_with("{}");
        for (symbol, start, end, missing) in [
            ("", "2024-01-01", "2024-01-05", "symbol"),
            ("EURUSD", "", "2024-01-05", "start_date"),
            ("EURUSD", "2024-01-01", "", "end_date"),
        ] {
            let err = client
                .get_data_as_pandas_data_frame(symbol, start, end, "records", "close")
                .unwrap_err();
            match err {
                Error::InvalidArgument(msg) => assert_eq!(msg, format!("{} is required", missing)),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(sent(&urls).is_empty());
    }

    #[test]
    fn time_series_sends_leading_integer_period() {
        let (client, urls) = client_with("{}");
        client
            .get_time_series_data("EURUSD", "2024-01-01", "2024-01-05", "minute", " 15m", "csv")
            .unwrap();
        assert!(sent(&urls)[0].contains("&period=15&"));
    }

    #[test]
    fn pandas_rejects_open_field() {
        let (client, urls) = client_with("{}");
        let err = client
            .get_data_as_pandas_data_frame("EURUSD", "2024-01-01", "2024-01-05", "records", "open")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(sent(&urls).is_empty());
    }

    #[test]
    fn pandas_rejects_csv_format() {
        let (client, _) = client_with("{}");
        assert!(client
            .get_data_as_pandas_data_frame("EURUSD", "2024-01-01", "2024-01-05", "csv", "ohlc")
            .is_err());
    }

    #[test]
    fn pandas_url() {
        let (client, urls) = client_with("{}");
        client
            .get_data_as_pandas_data_frame("EURUSD", "2024-01-01", "2024-01-05", "index", "ohlc")
            .unwrap();
        let url = sent(&urls).remove(0);
        insta::assert_snapshot!(url, @"https://marketdata.tradermade.com/api/v1/pandasDF?api_key=abc123&currency=EURUSD&end_date=2024-01-05&fields=ohlc&format=index&start_date=2024-01-01");
    }

    #[test]
    fn transport_error_propagates() {
        struct Down;
        impl Transport for Down {
            fn get(&self, _url: &str) -> Result<String, Error> {
                Err(Error::Transport("connection refused".to_string()))
            }
        }
        let mut client = TraderMade::with_transport(DEFAULT_BASE_URL, || Ok(Down));
        client.set_rest_api_key("k").unwrap();
        assert!(matches!(client.get_cfd_list(), Err(Error::Transport(_))));
    }

    #[test]
    fn debug_hides_key() {
        let (client, _) = client_with("{}");
        assert!(!format!("{:?}", client).contains("abc123"));
    }
}
