/*
[INPUT]:  Chain id plus token address or symbol; search filters and cursor
[OUTPUT]: Single token (absent on 400/404) or a lazy stream of token pages
[POS]:    HTTP layer - token catalog endpoints
[UPDATE]: When token routes or the absence policy change
*/

use crate::http::client::absent_on;
use crate::http::dispatch::{RequestDescriptor, path_segment};
use crate::http::pagination::{CURSOR_PARAM, PageStream, paginate};
use crate::http::{Result, SwapClient};
use crate::types::{Token, TokenLookup, TokenSearch};

/// The token endpoints answer 400 as well as 404 for tokens they do not know
const TOKEN_ABSENT_STATUSES: &[u16] = &[400, 404];

impl SwapClient {
    /// Look up one token by address or symbol
    ///
    /// GET /v1/tokens/{chain_id}/address/{address}
    /// GET /v1/tokens/{chain_id}/symbol/{symbol}
    ///
    /// A plain `&str` is routed by [`TokenLookup::parse`]. Returns `Ok(None)`
    /// for 400 and 404 responses.
    pub async fn token(
        &self,
        chain_id: u64,
        lookup: impl Into<TokenLookup>,
    ) -> Result<Option<Token>> {
        let endpoint = match lookup.into() {
            TokenLookup::ByAddress(address) => {
                format!("/v1/tokens/{chain_id}/address/{}", path_segment(&address))
            }
            TokenLookup::BySymbol(symbol) => {
                format!("/v1/tokens/{chain_id}/symbol/{}", path_segment(&symbol))
            }
        };

        let result = self
            .dispatcher()
            .dispatch::<Option<Token>>(RequestDescriptor::get(endpoint))
            .await;
        absent_on(result, TOKEN_ABSENT_STATUSES).map(Option::flatten)
    }

    /// Search tokens, one stream item per page
    ///
    /// GET /v1/tokens/search?query={query}&chainId={chain_id}&limit={limit}&cursor={cursor}
    pub fn search_tokens(&self, search: TokenSearch, cursor: Option<u64>) -> PageStream<'_, Token> {
        paginate(self.dispatcher(), cursor, move |cursor| {
            RequestDescriptor::get("/v1/tokens/search")
                .query("query", &search.query)
                .query_opt("chainId", search.chain_id)
                .query_opt("limit", search.limit)
                .query_opt(CURSOR_PARAM, cursor)
        })
    }
}
