/*
[INPUT]:  Intent ids and deposit transaction details
[OUTPUT]: Intent status (absent on 404) and deposit acceptance flag
[POS]:    HTTP layer - intent lifecycle endpoints
[UPDATE]: When intent routes or acknowledgement format change
*/

use serde_json::Value;

use crate::http::client::absent_on;
use crate::http::dispatch::{RequestDescriptor, path_segment};
use crate::http::{Result, SwapClient};
use crate::types::{DepositSubmission, IntentStatus};

const INTENT_ABSENT_STATUSES: &[u16] = &[404];

/// Field of the deposit response that acknowledges the submission
const ACCEPTED_FIELD: &str = "accepted";

impl SwapClient {
    /// Fetch the current status of an intent
    ///
    /// GET /v1/intents/{intent_id}/status
    ///
    /// Returns `Ok(None)` when the server answers 404.
    pub async fn intent_status(&self, intent_id: &str) -> Result<Option<IntentStatus>> {
        let endpoint = format!("/v1/intents/{}/status", path_segment(intent_id));
        let result = self
            .dispatcher()
            .dispatch::<Option<IntentStatus>>(RequestDescriptor::get(endpoint))
            .await;
        absent_on(result, INTENT_ABSENT_STATUSES).map(Option::flatten)
    }

    /// Report the deposit transaction that funds an intent
    ///
    /// POST /v1/intents/{intent_id}/deposit
    ///
    /// `Ok(true)` only when the response body carries `"accepted": true`; any
    /// other successful body is `Ok(false)`. Non-2xx responses are errors.
    pub async fn submit_deposit(
        &self,
        intent_id: &str,
        deposit: &DepositSubmission,
    ) -> Result<bool> {
        let endpoint = format!("/v1/intents/{}/deposit", path_segment(intent_id));
        let body: Option<Value> = self
            .dispatcher()
            .dispatch(RequestDescriptor::post(endpoint).json(deposit))
            .await?;
        Ok(is_accepted(body.as_ref()))
    }
}

fn is_accepted(body: Option<&Value>) -> bool {
    body.and_then(|b| b.get(ACCEPTED_FIELD))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
