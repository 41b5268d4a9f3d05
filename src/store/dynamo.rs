use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use super::{QuoteStore, StoreError, StoreResult, TABLE_NAME};
use crate::quote::Quote;

const ID: &str = "ID";
const ATTRIBUTED_TO: &str = "AttributedTo";
const TEXT: &str = "Text";

type Item = HashMap<String, AttributeValue>;

/// Quote store backed by a DynamoDB table with string partition key `ID`.
///
/// The SDK client pools its connections internally; one instance is shared by
/// every request.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self { client, table: table.into() }
    }

    /// Builds a client for `region` from the default credential chain and
    /// points it at [`TABLE_NAME`].
    pub async fn connect(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;
        Self::new(Client::new(&config), TABLE_NAME)
    }
}

#[async_trait]
impl QuoteStore for DynamoStore {
    /// Scans the whole table, following `LastEvaluatedKey` across pages.
    async fn list(&self) -> StoreResult<Vec<Quote>> {
        let mut quotes = Vec::new();
        let mut start: Option<Item> = None;

        loop {
            let page = self.client.scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start.take())
                .send()
                .await
                .map_err(store_error)?;

            for item in page.items() {
                quotes.push(quote_from_item(item)?);
            }

            match page.last_evaluated_key() {
                Some(key) if !key.is_empty() => {
                    debug!(fetched = quotes.len(), "scan continues on next page");
                    start = Some(key.clone());
                }
                _ => break,
            }
        }

        Ok(quotes)
    }

    async fn put(&self, quote: Quote) -> StoreResult<()> {
        self.client.put_item()
            .table_name(&self.table)
            .set_item(Some(item_from_quote(quote)))
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Quote>> {
        let out = self.client.get_item()
            .table_name(&self.table)
            .key(ID, AttributeValue::S(id.to_owned()))
            .send()
            .await
            .map_err(store_error)?;

        out.item().map(quote_from_item).transpose()
    }

    async fn ping(&self) -> StoreResult<()> {
        self.client.describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

fn item_from_quote(quote: Quote) -> Item {
    HashMap::from([
        (ID.to_owned(), AttributeValue::S(quote.id)),
        (ATTRIBUTED_TO.to_owned(), AttributeValue::S(quote.attributed_to)),
        (TEXT.to_owned(), AttributeValue::S(quote.text)),
    ])
}

fn quote_from_item(item: &Item) -> StoreResult<Quote> {
    Ok(Quote {
        id: string_attr(item, ID)?,
        attributed_to: string_attr(item, ATTRIBUTED_TO)?,
        text: string_attr(item, TEXT)?,
    })
}

fn string_attr(item: &Item, name: &str) -> StoreResult<String> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Ok(s.clone()),
        Some(_) => Err(StoreError::Malformed(format!("attribute `{name}` is not a string"))),
        None => Err(StoreError::Malformed(format!("missing attribute `{name}`"))),
    }
}

/// Transport failures mean the table was never reached; everything else is
/// an answer from the service.
fn store_error<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => StoreError::Unavailable(message),
        _ => StoreError::Backend(message),
    }
}
