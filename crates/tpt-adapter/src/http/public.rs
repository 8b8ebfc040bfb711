/*
[INPUT]:  Symbol identifiers
[OUTPUT]: Market news
[POS]:    HTTP layer - application-level endpoints (bearer token only)
[UPDATE]: When adding new application endpoints or changing response format
*/

use crate::http::{Result, TptClient};
use crate::types::NewsResponse;

pub const NEWS_PATH: &str = "/v1/news";

impl TptClient {
    /// Query news for a symbol
    ///
    /// GET /v1/news?symbol={symbol}
    pub async fn get_news(&self, symbol: &str) -> Result<NewsResponse> {
        self.request(NEWS_PATH)
            .await?
            .add_query("symbol", symbol)
            .decode_into()
            .await
    }
}
