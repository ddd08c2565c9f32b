//! CoflNet price source
//!
//! Blocking HTTP client for the sky.coflnet.com API. Every request is
//! followed by a short random pause so a full catalog pass does not hammer
//! the service.

use crate::config::Config;
use rand::Rng;
use std::time::Duration;
use talisman::{PriceError, PriceResult, PriceSource, Sale};

pub struct CoflClient {
    agent: ureq::Agent,
    base: String,
    retries: u32,
    delay_ms: (u64, u64),
}

impl CoflClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        Self {
            agent,
            base: config.api_base.trim_end_matches('/').to_string(),
            retries: config.retries,
            delay_ms: config.delay_range(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn polite_delay(&self) {
        let (min, max) = self.delay_ms;
        if max == 0 {
            return;
        }
        let ms = rand::thread_rng().gen_range(min..=max);
        std::thread::sleep(Duration::from_millis(ms));
    }

    fn get_json(&self, url: &str) -> PriceResult<serde_json::Value> {
        let mut attempt = 0;
        loop {
            let response = self.agent.get(url).call();
            self.polite_delay();

            let err = match response {
                Ok(resp) => {
                    return resp
                        .into_json()
                        .map_err(|e| PriceError::Decode(format!("{}: {}", url, e)));
                }
                Err(ureq::Error::Status(code, _)) if code == 429 || code >= 500 => {
                    PriceError::Status {
                        status: code,
                        url: url.to_string(),
                    }
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(PriceError::Status {
                        status: code,
                        url: url.to_string(),
                    });
                }
                Err(e) => PriceError::Request(e.to_string()),
            };

            if attempt >= self.retries {
                return Err(err);
            }
            attempt += 1;
            tracing::debug!("Retrying {} ({}/{}): {}", url, attempt, self.retries, err);
        }
    }
}

impl PriceSource for CoflClient {
    fn recent_sales(&self, item_id: &str) -> PriceResult<Vec<Sale>> {
        let url = self.url(&format!(
            "/auctions/tag/{}/recent/overview",
            urlencoding::encode(item_id)
        ));
        let value = self.get_json(&url)?;
        parse_sales(value)
    }

    fn auction_tier(&self, auction_id: &str) -> PriceResult<Option<String>> {
        let url = self.url(&format!("/auction/{}", urlencoding::encode(auction_id)));
        Ok(parse_tier(&self.get_json(&url)?))
    }

    fn bazaar_buy_price(&self, product_id: &str) -> PriceResult<Option<f64>> {
        let url = self.url(&format!("/bazaar/{}/snapshot", urlencoding::encode(product_id)));
        Ok(parse_buy_price(&self.get_json(&url)?))
    }
}

fn parse_sales(value: serde_json::Value) -> PriceResult<Vec<Sale>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value).map_err(|e| PriceError::Decode(e.to_string()))
}

/// Tier of an auction: `item.tier`, falling back to the top-level `tier`
fn parse_tier(value: &serde_json::Value) -> Option<String> {
    value["item"]["tier"]
        .as_str()
        .filter(|t| !t.is_empty())
        .or_else(|| value["tier"].as_str())
        .map(String::from)
}

/// A zero or missing buy price means the product is not trading
fn parse_buy_price(value: &serde_json::Value) -> Option<f64> {
    value["buyPrice"].as_f64().filter(|p| *p > 0.0)
}
