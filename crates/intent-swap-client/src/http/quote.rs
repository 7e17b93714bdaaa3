/*
[INPUT]:  QuoteRequest (chains, tokens, amount)
[OUTPUT]: Quote carrying the intent id to fund
[POS]:    HTTP layer - quote endpoint
[UPDATE]: When the quote route or payload changes
*/

use crate::http::dispatch::RequestDescriptor;
use crate::http::{Result, SwapClient};
use crate::types::{Quote, QuoteRequest};

impl SwapClient {
    /// Request a cross-chain swap quote
    ///
    /// POST /v1/quote
    pub async fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let descriptor = RequestDescriptor::post("/v1/quote").json(request);
        self.dispatcher().dispatch(descriptor).await
    }
}
