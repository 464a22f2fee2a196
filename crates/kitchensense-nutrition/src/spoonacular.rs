//! Spoonacular API client.
//!
//! Endpoints used:
//! - `POST /recipes/parseIngredients` — bulk parse with nutrition
//! - `GET /food/ingredients/search` — best ingredient match
//! - `GET /food/ingredients/{id}/information` — nutrients for an amount in grams
//!
//! The API key travels as the `apiKey` query parameter. Every call carries its
//! own timeout; a timeout is reported as an ordinary `Error::Http`.

use async_trait::async_trait;
use kitchensense_core::{Error, ProviderConfig, Result};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::extract::nutrients_from_json;
use crate::provider::NutritionProvider;
use crate::types::{IngredientMatch, NutrientItem, ParsedIngredient};

pub struct SpoonacularClient {
    http: Client,
    config: ProviderConfig,
}

impl SpoonacularClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let mut config = config.clone();
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            config,
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("SPOONACULAR_API_KEY is not set".into()))
    }

    /// Send a request and decode its JSON body, mapping failures to `Error`.
    async fn send_json(&self, request: RequestBuilder, what: &str) -> Result<Value> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Http(format!("{} timed out", what))
            } else {
                Error::Http(format!("{} request failed: {}", what, e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(format!("{} API error {}: {}", what, status, body)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("{} body read failed: {}", what, e)))?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl NutritionProvider for SpoonacularClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn parse_ingredients(&self, text: &str, servings: u32) -> Result<Vec<ParsedIngredient>> {
        let api_key = self.api_key()?;
        let url = format!("{}/recipes/parseIngredients", self.config.base_url);
        debug!("Bulk parse via {}", url);

        let servings = servings.to_string();
        let request = self
            .http
            .post(&url)
            .query(&[("apiKey", api_key)])
            .form(&[
                ("ingredientList", text),
                ("servings", servings.as_str()),
                ("includeNutrition", "true"),
            ])
            .timeout(self.config.bulk_timeout);

        let body = self.send_json(request, "parseIngredients").await?;
        Ok(parse_bulk_response(&body))
    }

    async fn search_ingredient(&self, name: &str) -> Result<Option<IngredientMatch>> {
        let api_key = self.api_key()?;
        let url = format!("{}/food/ingredients/search", self.config.base_url);

        let request = self
            .http
            .get(&url)
            .query(&[("query", name), ("number", "1"), ("apiKey", api_key)])
            .timeout(self.config.lookup_timeout);

        let body = self.send_json(request, "ingredient search").await?;
        Ok(parse_search_response(&body))
    }

    async fn ingredient_info(&self, id: u64, amount_grams: f64) -> Result<Vec<NutrientItem>> {
        let api_key = self.api_key()?;
        let url = format!("{}/food/ingredients/{}/information", self.config.base_url, id);

        let amount = amount_grams.to_string();
        let request = self
            .http
            .get(&url)
            .query(&[
                ("amount", amount.as_str()),
                ("unit", "grams"),
                ("apiKey", api_key),
            ])
            .timeout(self.config.lookup_timeout);

        let body = self.send_json(request, "ingredient information").await?;
        Ok(nutrients_from_json(&body))
    }
}

/// Bulk responses are a JSON array of ingredients; anything else is empty.
pub fn parse_bulk_response(body: &Value) -> Vec<ParsedIngredient> {
    let Some(items) = body.as_array() else {
        debug!("parseIngredients returned a non-array body");
        return Vec::new();
    };

    items
        .iter()
        .map(|item| ParsedIngredient {
            name: item
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            nutrients: nutrients_from_json(item),
        })
        .collect()
}

/// First entry of `results`, if it carries a numeric id.
pub fn parse_search_response(body: &Value) -> Option<IngredientMatch> {
    let first = body.get("results")?.as_array()?.first()?;
    Some(IngredientMatch {
        id: first.get("id")?.as_u64()?,
        name: first
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}
