/*
[INPUT]:  Request builder keyed by cursor, optional starting cursor
[OUTPUT]: Lazy stream of item batches, one per page
[POS]:    HTTP layer - cursor pagination over the dispatcher
[UPDATE]: When the page envelope or cursor parameter changes
*/

use futures_util::StreamExt;
use futures_util::stream::{self, BoxStream};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::dispatch::{Dispatcher, RequestDescriptor};
use crate::http::error::ApiError;
use crate::types::Page;

/// Query parameter carrying the continuation cursor
pub const CURSOR_PARAM: &str = "cursor";

/// Stream of page batches; ends after the last page or the first error
pub type PageStream<'a, T> = BoxStream<'a, Result<Vec<T>, ApiError>>;

enum PageState {
    Fetching(Option<u64>),
    Done,
}

/// Walk a cursor-paginated endpoint
///
/// Each page is requested only when the consumer polls for it, so dropping
/// the stream stops pagination with nothing in flight. Every page is yielded,
/// empty ones included, until a response omits its cursor. A failing page
/// ends the stream with that error; resume by starting a new stream from the
/// last cursor that succeeded.
pub fn paginate<'a, T, F>(
    dispatcher: &'a Dispatcher,
    initial_cursor: Option<u64>,
    build_request: F,
) -> PageStream<'a, T>
where
    T: DeserializeOwned + Send + 'a,
    F: Fn(Option<u64>) -> RequestDescriptor + Send + 'a,
{
    stream::try_unfold(PageState::Fetching(initial_cursor), move |state| {
        let next = match state {
            PageState::Fetching(cursor) => Some((cursor, build_request(cursor))),
            PageState::Done => None,
        };

        async move {
            let Some((cursor, request)) = next else {
                return Ok::<_, ApiError>(None);
            };

            let page: Page<T> = dispatcher.dispatch(request).await?;
            debug!(
                ?cursor,
                items = page.data.len(),
                next_cursor = ?page.cursor,
                "fetched page"
            );

            let next_state = match page.cursor {
                Some(next_cursor) => PageState::Fetching(Some(next_cursor)),
                None => PageState::Done,
            };
            Ok::<_, ApiError>(Some((page.data, next_state)))
        }
    })
    .boxed()
}
