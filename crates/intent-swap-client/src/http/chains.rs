/*
[INPUT]:  Optional starting cursor
[OUTPUT]: Lazy stream of supported chain pages
[POS]:    HTTP layer - chain catalog endpoint
[UPDATE]: When the chain listing route changes
*/

use crate::http::SwapClient;
use crate::http::dispatch::RequestDescriptor;
use crate::http::pagination::{CURSOR_PARAM, PageStream, paginate};
use crate::types::Chain;

impl SwapClient {
    /// List supported chains, one stream item per page
    ///
    /// GET /v1/chains?cursor={cursor}
    pub fn chains(&self, cursor: Option<u64>) -> PageStream<'_, Chain> {
        paginate(self.dispatcher(), cursor, |cursor| {
            RequestDescriptor::get("/v1/chains").query_opt(CURSOR_PARAM, cursor)
        })
    }
}
