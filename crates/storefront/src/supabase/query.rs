//! Query builder for PostgREST table resources.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::SupabaseClient;
use crate::backend::BackendError;

/// Sort direction for [`TableQuery::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A query against one table, built up fluently and then executed with
/// [`fetch`](Self::fetch), [`maybe_single`](Self::maybe_single),
/// [`insert`](Self::insert) or [`delete`](Self::delete).
#[must_use]
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl<'a> TableQuery<'a> {
    pub(super) fn new(client: &'a SupabaseClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Column list, including embedded relations (`*,brand:brands(*)`).
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    /// Keep rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl AsRef<str>) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.as_ref())));
        self
    }

    /// Keep rows where `column` differs from `value`.
    pub fn neq(mut self, column: &str, value: impl AsRef<str>) -> Self {
        self.filters
            .push((column.to_string(), format!("neq.{}", value.as_ref())));
        self
    }

    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some(format!("{column}.{}", order.as_str()));
        self
    }

    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Full request URL with all query parameters applied.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::InvalidUrl` if the table name does not form a
    /// valid URL.
    pub fn url(&self) -> Result<Url, BackendError> {
        let mut url = self.client.table_url(&self.table)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(select) = &self.select {
                pairs.append_pair("select", select);
            }
            for (column, condition) in &self.filters {
                pairs.append_pair(column, condition);
            }
            if let Some(order) = &self.order {
                pairs.append_pair("order", order);
            }
            if let Some(limit) = self.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
        }
        // An empty query string still leaves a trailing `?`
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    /// Fetch all matching rows.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or rows do not parse as `T`.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        let url = self.url()?;
        let body = self
            .client
            .execute(self.client.request(Method::GET, url))
            .await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                table = %self.table,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend rows"
            );
            BackendError::Parse(e)
        })
    }

    /// Fetch at most one row: `None` for zero rows, an error for several.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::MultipleRows` if more than one row matches, or
    /// any error [`fetch`](Self::fetch) can return.
    pub async fn maybe_single<T: DeserializeOwned>(self) -> Result<Option<T>, BackendError> {
        let mut rows = self.fetch::<T>().await?;
        match rows.len() {
            0 | 1 => Ok(rows.pop()),
            n => Err(BackendError::MultipleRows(n)),
        }
    }

    /// Insert one row without reading it back.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the row.
    pub async fn insert<T: Serialize + Sync>(self, row: &T) -> Result<(), BackendError> {
        let url = self.url()?;
        self.client
            .execute(
                self.client
                    .request(Method::POST, url)
                    .header("Prefer", "return=minimal")
                    .json(row),
            )
            .await?;
        Ok(())
    }

    /// Delete every row matching the filters.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the backend rejects the request.
    pub async fn delete(self) -> Result<(), BackendError> {
        let url = self.url()?;
        self.client
            .execute(
                self.client
                    .request(Method::DELETE, url)
                    .header("Prefer", "return=minimal"),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::supabase::tests::test_client;

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_bare_table_url_has_no_query() {
        let client = test_client();
        let url = client.from("brands").url().unwrap();
        assert_eq!(url.as_str(), "https://abc.supabase.co/rest/v1/brands");
    }

    #[test]
    fn test_query_parameters_in_call_order() {
        let client = test_client();
        let url = client
            .from("products")
            .select("*,brand:brands(*),category:categories(*)")
            .eq("category_id", "c1")
            .neq("id", "p1")
            .order("created_at", Order::Desc)
            .limit(5)
            .url()
            .unwrap();

        assert_eq!(url.path(), "/rest/v1/products");
        assert_eq!(
            pairs(&url),
            vec![
                (
                    "select".to_string(),
                    "*,brand:brands(*),category:categories(*)".to_string()
                ),
                ("category_id".to_string(), "eq.c1".to_string()),
                ("id".to_string(), "neq.p1".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_filter_values_are_encoded() {
        let client = test_client();
        let url = client
            .from("products")
            .eq("slug", "a&b=c")
            .url()
            .unwrap();
        assert_eq!(
            pairs(&url),
            vec![("slug".to_string(), "eq.a&b=c".to_string())]
        );
        assert!(!url.query().unwrap().contains("&b="));
    }

    #[test]
    fn test_order_ascending() {
        let client = test_client();
        let url = client.from("categories").order("name", Order::Asc).url().unwrap();
        assert_eq!(url.query(), Some("order=name.asc"));
    }
}
